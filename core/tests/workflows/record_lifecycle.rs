// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end record lifecycle workflow tests.
//!
//! These tests follow a record from submission through editing and deletion, checking the
//! live collection and the snapshot after every step.

use finform_core::{Error, Field, Finform, RiskTolerance, Submitted};

use crate::common::{
    assert_names, assert_snapshot_matches, sample_record, setup_temp_dirs, test_config,
};

#[tokio::test]
async fn record_lifecycle_add_edit_delete() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let config = test_config(&temp_dirs.state_dir);
    let mut app = Finform::new(config).await.unwrap();
    let snapshot = app.config().data_path().unwrap();
    assert!(app.records().is_empty());

    // Act - add
    app.set_field(Field::FullName, "A").unwrap();
    app.set_field(Field::Income, 50_000u32).unwrap();
    let added = app.submit().await.unwrap();

    // Assert
    assert!(matches!(added, Submitted::Added(_)));
    assert_names(app.records(), &["A"]);
    assert_snapshot_matches(&snapshot, app.records());

    // Act - edit index 0
    app.edit(0).unwrap();
    assert_eq!(app.form().draft().full_name, "A");
    app.set_field(Field::FullName, "B").unwrap();
    let updated = app.submit().await.unwrap();

    // Assert
    assert_eq!(updated, Submitted::Updated(added.id()));
    assert_names(app.records(), &["B"]);
    assert_snapshot_matches(&snapshot, app.records());

    // Act - delete index 0
    app.delete(0).await.unwrap();

    // Assert
    assert_names(app.records(), &[]);
    assert_snapshot_matches(&snapshot, app.records());
}

#[tokio::test]
async fn record_lifecycle_delete_shifts_later_records() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    for name in ["a", "b", "c", "d"] {
        app.set_field(Field::FullName, name).unwrap();
        app.submit().await.unwrap();
    }
    let id_c = app.records().id_at(2).unwrap();

    // Act
    let removed = app.delete(1).await.unwrap();

    // Assert
    assert_eq!(removed.full_name, "b");
    assert_eq!(app.records().len(), 3);
    assert_names(app.records(), &["a", "c", "d"]);
    assert_eq!(app.records().position(id_c), Some(1));
}

#[tokio::test]
async fn record_lifecycle_submit_resets_form() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    app.set_draft(sample_record()).unwrap();

    // Act
    app.submit().await.unwrap();

    // Assert
    assert!(!app.form().is_editing());
    assert_eq!(app.form().draft().income, 50_000);
    assert_eq!(app.form().draft().expenses, 20_000);
    assert_eq!(app.form().draft().risk_tolerance, RiskTolerance::Medium);
    assert_eq!(app.get(0).unwrap(), &sample_record());
}

#[tokio::test]
async fn record_lifecycle_loan_fields_stay_permissive() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();

    // Act - fill the loan, then untick loan required
    app.set_field(Field::LoanRequired, true).unwrap();
    app.set_field(Field::LoanAmount, "5000").unwrap();
    app.set_field(Field::LoanPurpose, "Car").unwrap();
    app.set_field(Field::LoanRequired, false).unwrap();
    app.submit().await.unwrap();

    // Assert - loan details are kept as entered
    let record = app.get(0).unwrap();
    assert!(!record.loan_required);
    assert_eq!(record.loan_amount, "5000");
    assert_eq!(record.loan_purpose, "Car");
}

#[tokio::test]
async fn record_lifecycle_out_of_range_is_rejected() {
    // Arrange
    let temp_dirs = setup_temp_dirs().await.unwrap();
    let mut app = Finform::new(test_config(&temp_dirs.state_dir)).await.unwrap();
    app.set_field(Field::FullName, "only").unwrap();
    app.submit().await.unwrap();

    // Act & Assert
    assert!(matches!(app.edit(1), Err(Error::OutOfRange { index: 1, len: 1 })));
    assert!(matches!(
        app.delete(7).await,
        Err(Error::OutOfRange { index: 7, len: 1 })
    ));
    assert_names(app.records(), &["only"]);
    assert!(!app.form().is_editing());
}
