// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Export workflow tests.

use finform_core::{Field, Finform, Record, RecordCollection};

use crate::common::{sample_record, setup_temp_dirs, test_config};

#[tokio::test]
async fn export_round_trips_field_for_field() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    app.set_draft(sample_record()).unwrap();
    app.submit().await.unwrap();
    app.set_field(Field::FullName, "Other").unwrap();
    app.set_field(Field::Dependents, 4u32).unwrap();
    app.submit().await.unwrap();

    // Act
    let path = temp_dirs.export_dir.join("finance_data.json");
    app.export_to(&path).await.unwrap();

    // Assert
    let content = tokio::fs::read_to_string(&path).await.unwrap();
    let records: Vec<Record> = serde_json::from_str(&content).unwrap();
    assert_eq!(&RecordCollection::from_records(records), app.records());
}

#[tokio::test]
async fn export_is_pretty_printed() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    app.set_draft(sample_record()).unwrap();
    app.submit().await.unwrap();

    // Act
    let json = app.export_json().unwrap();

    // Assert
    assert!(json.starts_with("[\n  {\n    \"fullName\": \"Ada Lovelace\",\n"));
    assert!(json.contains("\n    \"riskTolerance\": \"high\",\n"));
    assert!(json.contains("\n    \"loanRequired\": true,\n"));
}

#[tokio::test]
async fn export_empty_collection() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    assert_eq!(app.export_json().unwrap(), "[]");
}

#[tokio::test]
async fn export_does_not_touch_the_snapshot() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Act
    app.export_to(&temp_dirs.export_dir.join("out.json"))
        .await
        .unwrap();

    // Assert
    assert!(!app.config().data_path().unwrap().exists());
}
