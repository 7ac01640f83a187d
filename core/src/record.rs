// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::Error;

/// Range and step of a slider-bound field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    /// Lowest selectable value.
    pub min: u32,
    /// Highest selectable value.
    pub max: u32,
    /// Distance between two selectable values.
    pub step: u32,
}

impl Slider {
    /// Monthly income in USD.
    pub const INCOME: Slider = Slider {
        min: 0,
        max: 100_000,
        step: 1_000,
    };

    /// Monthly expenses in USD.
    pub const EXPENSES: Slider = Slider {
        min: 0,
        max: 50_000,
        step: 500,
    };

    /// Move the value onto the slider: clamp into the range and snap to the nearest step.
    pub fn fit(&self, value: i64) -> u32 {
        let (min, max, step) = (i64::from(self.min), i64::from(self.max), i64::from(self.step));
        let clamped = value.clamp(min, max);
        let snapped = min + (clamped - min + step / 2) / step * step;
        // snapped is within [min, max] here, the conversion cannot fail
        u32::try_from(snapped.min(max)).unwrap_or(self.max)
    }

    /// Whether the value is selectable on the slider.
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value) && (value - self.min) % self.step == 0
    }
}

/// Risk tolerance of a client.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RiskTolerance {
    /// Prefers capital preservation.
    Low,

    /// Balanced.
    #[default]
    Medium,

    /// Accepts volatility for higher returns.
    High,
}

impl RiskTolerance {
    /// All variants, in display order.
    pub const ALL: [RiskTolerance; 3] = [Self::Low, Self::Medium, Self::High];

    /// The wire name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTolerance::Low => "low",
            RiskTolerance::Medium => "medium",
            RiskTolerance::High => "high",
        }
    }
}

impl Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskTolerance::Low),
            "medium" => Ok(RiskTolerance::Medium),
            "high" => Ok(RiskTolerance::High),
            _ => Err(Error::InvalidValue {
                field: Field::RiskTolerance.name(),
                value: s.to_string(),
            }),
        }
    }
}

/// One client's captured finance-intake data.
///
/// Field names are serialized in camelCase, the layout of the persisted snapshot and the export
/// file. Missing fields take their default value when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    pub full_name: String,
    pub dob: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,

    #[serde(deserialize_with = "lenient_u32")]
    pub income: u32,

    #[serde(deserialize_with = "lenient_u32")]
    pub expenses: u32,

    pub loan_required: bool,

    /// Numeric string, stored as entered.
    pub loan_amount: String,
    pub loan_purpose: String,

    /// Numeric string, stored as entered.
    pub assets: String,

    /// Numeric string, stored as entered.
    pub liabilities: String,

    pub employment_type: String,
    pub employer_name: String,

    #[serde(deserialize_with = "lenient_u32")]
    pub dependents: u32,

    pub marital_status: String,
    pub risk_tolerance: RiskTolerance,
    pub feedback: String,
}

impl Default for Record {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            dob: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            country: String::new(),
            income: 50_000,
            expenses: 20_000,
            loan_required: false,
            loan_amount: String::new(),
            loan_purpose: String::new(),
            assets: String::new(),
            liabilities: String::new(),
            employment_type: String::new(),
            employer_name: String::new(),
            dependents: 0,
            marital_status: String::new(),
            risk_tolerance: RiskTolerance::Medium,
            feedback: String::new(),
        }
    }
}

impl Record {
    /// Fields a record must fill in before the form accepts it.
    pub const REQUIRED: [Field; 6] = [
        Field::FullName,
        Field::Dob,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::Country,
    ];

    /// Set one field, coercing the value to the type of the field.
    ///
    /// Slider fields are clamped into their range and snapped to the slider step. Numeric string
    /// fields keep the text as entered.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), Error> {
        match field.kind() {
            FieldKind::Text => *self.text_mut(field) = value.into_text(),
            FieldKind::Flag => self.loan_required = value.into_flag(field)?,
            FieldKind::Slider(slider) => {
                let fitted = slider.fit(value.into_number(field)?);
                match field {
                    Field::Income => self.income = fitted,
                    _ => self.expenses = fitted,
                }
            }
            FieldKind::Count => {
                let n = value.into_number(field)?;
                self.dependents = u32::try_from(n).map_err(|_| Error::InvalidValue {
                    field: field.name(),
                    value: n.to_string(),
                })?;
            }
            FieldKind::Choice => self.risk_tolerance = value.into_risk(field)?,
        }
        Ok(())
    }

    /// Read one field.
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::Income => FieldValue::Number(self.income.into()),
            Field::Expenses => FieldValue::Number(self.expenses.into()),
            Field::Dependents => FieldValue::Number(self.dependents.into()),
            Field::LoanRequired => FieldValue::Checked(self.loan_required),
            Field::RiskTolerance => FieldValue::Risk(self.risk_tolerance),
            _ => FieldValue::Text(self.text(field).to_string()),
        }
    }

    /// Required fields that are still blank.
    pub fn missing_required(&self) -> Vec<Field> {
        Self::REQUIRED
            .into_iter()
            .filter(|&f| self.text(f).trim().is_empty())
            .collect()
    }

    /// The date of birth as a calendar date, if it is one.
    pub fn dob_date(&self) -> Option<jiff::civil::Date> {
        self.dob.trim().parse().ok()
    }

    fn text(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Dob => &self.dob,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::Country => &self.country,
            Field::LoanAmount => &self.loan_amount,
            Field::LoanPurpose => &self.loan_purpose,
            Field::Assets => &self.assets,
            Field::Liabilities => &self.liabilities,
            Field::EmploymentType => &self.employment_type,
            Field::EmployerName => &self.employer_name,
            Field::MaritalStatus => &self.marital_status,
            Field::Feedback => &self.feedback,
            _ => "",
        }
    }

    fn text_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Dob => &mut self.dob,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::Country => &mut self.country,
            Field::LoanAmount => &mut self.loan_amount,
            Field::LoanPurpose => &mut self.loan_purpose,
            Field::Assets => &mut self.assets,
            Field::Liabilities => &mut self.liabilities,
            Field::EmploymentType => &mut self.employment_type,
            Field::EmployerName => &mut self.employer_name,
            Field::MaritalStatus => &mut self.marital_status,
            // only reached for text fields, see `Field::kind`
            _ => &mut self.feedback,
        }
    }
}

/// The fields of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FullName,
    Dob,
    Email,
    Phone,
    Address,
    Country,
    Income,
    Expenses,
    LoanRequired,
    LoanAmount,
    LoanPurpose,
    Assets,
    Liabilities,
    EmploymentType,
    EmployerName,
    Dependents,
    MaritalStatus,
    RiskTolerance,
    Feedback,
}

/// How a field is bound to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, including numeric strings.
    Text,
    /// Checkbox.
    Flag,
    /// Slider with a fixed range and step.
    Slider(Slider),
    /// Non-negative integer.
    Count,
    /// One of the risk tolerance levels.
    Choice,
}

impl Field {
    /// All fields, in form order.
    pub const ALL: [Field; 19] = [
        Field::FullName,
        Field::Dob,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::Country,
        Field::Income,
        Field::Expenses,
        Field::LoanRequired,
        Field::LoanAmount,
        Field::LoanPurpose,
        Field::Assets,
        Field::Liabilities,
        Field::EmploymentType,
        Field::EmployerName,
        Field::Dependents,
        Field::MaritalStatus,
        Field::RiskTolerance,
        Field::Feedback,
    ];

    /// The JSON name of the field.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Dob => "dob",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Country => "country",
            Field::Income => "income",
            Field::Expenses => "expenses",
            Field::LoanRequired => "loanRequired",
            Field::LoanAmount => "loanAmount",
            Field::LoanPurpose => "loanPurpose",
            Field::Assets => "assets",
            Field::Liabilities => "liabilities",
            Field::EmploymentType => "employmentType",
            Field::EmployerName => "employerName",
            Field::Dependents => "dependents",
            Field::MaritalStatus => "maritalStatus",
            Field::RiskTolerance => "riskTolerance",
            Field::Feedback => "feedback",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Dob => "Date of Birth",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Address => "Address",
            Field::Country => "Country",
            Field::Income => "Monthly Income (USD)",
            Field::Expenses => "Monthly Expenses (USD)",
            Field::LoanRequired => "Loan Required",
            Field::LoanAmount => "Loan Amount (USD)",
            Field::LoanPurpose => "Purpose of Loan",
            Field::Assets => "Total Assets (USD)",
            Field::Liabilities => "Total Liabilities (USD)",
            Field::EmploymentType => "Employment Type",
            Field::EmployerName => "Employer Name",
            Field::Dependents => "Number of Dependents",
            Field::MaritalStatus => "Marital Status",
            Field::RiskTolerance => "Risk Tolerance",
            Field::Feedback => "Feedback",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Income => FieldKind::Slider(Slider::INCOME),
            Field::Expenses => FieldKind::Slider(Slider::EXPENSES),
            Field::LoanRequired => FieldKind::Flag,
            Field::Dependents => FieldKind::Count,
            Field::RiskTolerance => FieldKind::Choice,
            _ => FieldKind::Text,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// A value bound to a form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text input, also accepted by every other kind after parsing.
    Text(String),
    /// Checkbox state.
    Checked(bool),
    /// Slider or number input.
    Number(i64),
    /// Radio group selection.
    Risk(RiskTolerance),
}

impl FieldValue {
    fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Checked(b) => b.to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Risk(r) => r.to_string(),
        }
    }

    fn into_flag(self, field: Field) -> Result<bool, Error> {
        match self {
            FieldValue::Checked(b) => Ok(b),
            FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(true),
                "false" | "no" | "n" | "0" | "off" | "" => Ok(false),
                _ => Err(invalid(field, s)),
            },
            other => Err(invalid(field, other.into_text())),
        }
    }

    fn into_number(self, field: Field) -> Result<i64, Error> {
        match self {
            FieldValue::Number(n) => Ok(n),
            FieldValue::Text(s) => s.trim().parse().map_err(|_| invalid(field, s)),
            other => Err(invalid(field, other.into_text())),
        }
    }

    fn into_risk(self, field: Field) -> Result<RiskTolerance, Error> {
        match self {
            FieldValue::Risk(r) => Ok(r),
            FieldValue::Text(s) => s.parse(),
            other => Err(invalid(field, other.into_text())),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Checked(true) => f.write_str("Yes"),
            FieldValue::Checked(false) => f.write_str("No"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Risk(r) => write!(f, "{r}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Checked(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<RiskTolerance> for FieldValue {
    fn from(value: RiskTolerance) -> Self {
        FieldValue::Risk(value)
    }
}

fn invalid(field: Field, value: String) -> Error {
    Error::InvalidValue {
        field: field.name(),
        value,
    }
}

/// Accept integers written either as JSON numbers or as numeric strings, as produced by text
/// inputs of type number. An empty string reads as zero, negative values are clamped to zero.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(i64),
        Float(f64),
        Text(String),
    }

    let n = match Lenient::deserialize(deserializer)? {
        Lenient::Number(n) => n,
        Lenient::Float(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
        Lenient::Float(f) => return Err(serde::de::Error::custom(format!("not a count: {f}"))),
        Lenient::Text(s) if s.trim().is_empty() => 0,
        Lenient::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("not a count: {s}")))?,
    };
    Ok(u32::try_from(n.max(0)).unwrap_or(u32::MAX))
}
