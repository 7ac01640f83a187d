// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Persistence workflow tests.
//!
//! These tests reopen the application over the same state directory to check that the
//! snapshot is the source of truth at startup.

use finform_core::{Config, DEFAULT_DATA_FILE, Field, Finform};

use crate::common::{assert_names, sample_record, setup_temp_dirs, test_config};

#[tokio::test]
async fn persistence_survives_restart() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    {
        let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
        app.set_draft(sample_record()).unwrap();
        app.submit().await.unwrap();
        app.set_field(Field::FullName, "Second").unwrap();
        app.submit().await.unwrap();
    }

    // Act
    let app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Assert
    assert_names(app.records(), &["Ada Lovelace", "Second"]);
    assert_eq!(app.get(0).unwrap(), &sample_record());
}

#[tokio::test]
async fn persistence_absent_snapshot_is_empty() {
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    assert!(app.records().is_empty());
    assert!(!temp_dirs.state_dir.join(DEFAULT_DATA_FILE).exists());
}

#[tokio::test]
async fn persistence_malformed_snapshot_is_empty() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.state_dir.join(DEFAULT_DATA_FILE);
    tokio::fs::write(&path, "not json at all").await.unwrap();

    // Act
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Assert - starts empty, and the next mutation overwrites the bad snapshot
    assert!(app.records().is_empty());
    app.set_field(Field::FullName, "fresh").unwrap();
    app.submit().await.unwrap();
    let reopened = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    assert_names(reopened.records(), &["fresh"]);
}

#[tokio::test]
async fn persistence_reads_snapshot_written_by_form() {
    // Arrange - a snapshot as written by the browser form, numbers typed as text
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.state_dir.join(DEFAULT_DATA_FILE);
    let snapshot = concat!(
        r#"[{"fullName":"Jo","dob":"1990-01-01","email":"jo@example.com","phone":"1","#,
        r#""address":"x","country":"NZ","income":63000,"expenses":12500,"#,
        r#""loanRequired":false,"loanAmount":"","loanPurpose":"","assets":"","#,
        r#""liabilities":"","employmentType":"","employerName":"","dependents":"3","#,
        r#""maritalStatus":"","riskTolerance":"low","feedback":""}]"#,
    );
    tokio::fs::write(&path, snapshot).await.unwrap();

    // Act
    let app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Assert
    let record = app.get(0).unwrap();
    assert_eq!(record.full_name, "Jo");
    assert_eq!(record.income, 63_000);
    assert_eq!(record.dependents, 3);
}

#[tokio::test]
async fn persistence_custom_data_file() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = Config {
        state_dir: Some(temp_dirs.state_dir.clone()),
        data_file: Some("clients.json".into()),
        export_file: None,
    };

    // Act
    let mut app = Finform::new(config).await.unwrap();
    app.set_field(Field::FullName, "custom").unwrap();
    app.submit().await.unwrap();

    // Assert
    assert!(temp_dirs.state_dir.join("clients.json").exists());
    assert!(!temp_dirs.state_dir.join(DEFAULT_DATA_FILE).exists());
}

#[tokio::test]
async fn persistence_negative_dependents_keeps_every_record() {
    // Arrange - the form's dependents input allows negative numbers
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.state_dir.join(DEFAULT_DATA_FILE);
    let snapshot = r#"[{"fullName":"Keep","dependents":"2"},{"fullName":"Neg","dependents":"-1"}]"#;
    tokio::fs::write(&path, snapshot).await.unwrap();

    // Act
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    app.set_field(Field::FullName, "New").unwrap();
    app.submit().await.unwrap();

    // Assert - nothing saved earlier is lost by the rewrite
    let reopened = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    assert_names(reopened.records(), &["Keep", "Neg", "New"]);
    assert_eq!(reopened.get(0).unwrap().dependents, 2);
    assert_eq!(reopened.get(1).unwrap().dependents, 0);
}

#[tokio::test]
async fn persistence_skips_unreadable_record_only() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let path = temp_dirs.state_dir.join(DEFAULT_DATA_FILE);
    let snapshot = r#"[{"fullName":"Keep"},{"fullName":"Bad","dependents":"many"}]"#;
    tokio::fs::write(&path, snapshot).await.unwrap();

    // Act
    let app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Assert
    assert_names(app.records(), &["Keep"]);
}
