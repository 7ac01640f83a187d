// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use finform_core::{Config, Record, RiskTolerance};

/// Creates a test configuration persisting into the given state directory.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        data_file: None,
        export_file: None,
    }
}

/// Creates a default record with the given full name.
#[must_use]
pub fn test_record(full_name: &str) -> Record {
    Record {
        full_name: full_name.to_string(),
        ..Default::default()
    }
}

/// Creates a record with every field filled in.
#[must_use]
pub fn sample_record() -> Record {
    Record {
        full_name: "Ada Lovelace".to_string(),
        dob: "1985-12-10".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+44 20 7946 0000".to_string(),
        address: "12 St James's Square\nLondon".to_string(),
        country: "United Kingdom".to_string(),
        income: 72_000,
        expenses: 31_500,
        loan_required: true,
        loan_amount: "250000".to_string(),
        loan_purpose: "Home purchase".to_string(),
        assets: "180000".to_string(),
        liabilities: "12000".to_string(),
        employment_type: "Salaried".to_string(),
        employer_name: "Analytical Engines Ltd".to_string(),
        dependents: 2,
        marital_status: "Married".to_string(),
        risk_tolerance: RiskTolerance::High,
        feedback: "Prefers email contact".to_string(),
    }
}
