use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store when an application is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub(crate) fn from_sequence(sequence: u64) -> Self {
        Self(format!("app-{sequence:06}"))
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applicant supplied fields of a credit card service application, in display order.
///
/// None of the text fields are format-checked; they are only bounded in length when
/// passed through [`ApplicationDetails::bounded`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationDetails {
    pub name: String,
    pub gender: String,
    pub address: String,
    pub date: String,
    pub time: String,
    pub ifsc: String,
    pub account_number: String,
    pub balance: f64,
    pub service_type: String,
    pub phone: String,
    pub transaction_status: String,
    pub pan: String,
    pub aadhar: String,
    pub payment_status: String,
}

impl ApplicationDetails {
    pub fn field(&self, key: KeyField) -> &str {
        match key {
            KeyField::Name => &self.name,
            KeyField::Gender => &self.gender,
            KeyField::Address => &self.address,
            KeyField::Date => &self.date,
            KeyField::Time => &self.time,
            KeyField::Ifsc => &self.ifsc,
            KeyField::AccountNumber => &self.account_number,
            KeyField::ServiceType => &self.service_type,
            KeyField::Phone => &self.phone,
            KeyField::TransactionStatus => &self.transaction_status,
            KeyField::Pan => &self.pan,
            KeyField::Aadhar => &self.aadhar,
            KeyField::PaymentStatus => &self.payment_status,
        }
    }

    pub fn set_field(&mut self, key: KeyField, value: String) {
        *self.field_mut(key) = value;
    }

    fn field_mut(&mut self, key: KeyField) -> &mut String {
        match key {
            KeyField::Name => &mut self.name,
            KeyField::Gender => &mut self.gender,
            KeyField::Address => &mut self.address,
            KeyField::Date => &mut self.date,
            KeyField::Time => &mut self.time,
            KeyField::Ifsc => &mut self.ifsc,
            KeyField::AccountNumber => &mut self.account_number,
            KeyField::ServiceType => &mut self.service_type,
            KeyField::Phone => &mut self.phone,
            KeyField::TransactionStatus => &mut self.transaction_status,
            KeyField::Pan => &mut self.pan,
            KeyField::Aadhar => &mut self.aadhar,
            KeyField::PaymentStatus => &mut self.payment_status,
        }
    }

    /// Apply the per-field length limits, either cutting oversized values or refusing them.
    ///
    /// Under [`FieldPolicy::Reject`] the first oversized field (in display order) is reported
    /// and the details are dropped untouched.
    pub fn bounded(mut self, policy: FieldPolicy) -> Result<Self, IntakeError> {
        for key in KeyField::ALL {
            let limit = key.max_chars();
            let value = self.field_mut(key);
            let actual = value.chars().count();
            if actual <= limit {
                continue;
            }

            match policy {
                FieldPolicy::Truncate => {
                    if let Some((cut, _)) = value.char_indices().nth(limit) {
                        value.truncate(cut);
                    }
                }
                FieldPolicy::Reject => {
                    return Err(IntakeError::FieldTooLong {
                        field: key,
                        limit,
                        actual,
                    })
                }
            }
        }

        Ok(self)
    }
}

/// Stored application: the store-assigned identity plus the current details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    #[serde(flatten)]
    pub details: ApplicationDetails,
}

/// Text attributes a record can be matched on during search, update, and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyField {
    Name,
    Gender,
    Address,
    Date,
    Time,
    Ifsc,
    AccountNumber,
    ServiceType,
    Phone,
    TransactionStatus,
    Pan,
    Aadhar,
    PaymentStatus,
}

impl KeyField {
    pub const ALL: [KeyField; 13] = [
        KeyField::Name,
        KeyField::Gender,
        KeyField::Address,
        KeyField::Date,
        KeyField::Time,
        KeyField::Ifsc,
        KeyField::AccountNumber,
        KeyField::ServiceType,
        KeyField::Phone,
        KeyField::TransactionStatus,
        KeyField::Pan,
        KeyField::Aadhar,
        KeyField::PaymentStatus,
    ];

    /// Machine name used in configuration, CLI flags, and CSV headers.
    pub const fn key(self) -> &'static str {
        match self {
            KeyField::Name => "name",
            KeyField::Gender => "gender",
            KeyField::Address => "address",
            KeyField::Date => "date",
            KeyField::Time => "time",
            KeyField::Ifsc => "ifsc",
            KeyField::AccountNumber => "account_number",
            KeyField::ServiceType => "service_type",
            KeyField::Phone => "phone",
            KeyField::TransactionStatus => "transaction_status",
            KeyField::Pan => "pan",
            KeyField::Aadhar => "aadhar",
            KeyField::PaymentStatus => "payment_status",
        }
    }

    /// Human readable label used in prompts and listings.
    pub const fn label(self) -> &'static str {
        match self {
            KeyField::Name => "Name",
            KeyField::Gender => "Gender",
            KeyField::Address => "Address",
            KeyField::Date => "Date",
            KeyField::Time => "Time",
            KeyField::Ifsc => "IFSC",
            KeyField::AccountNumber => "Account No",
            KeyField::ServiceType => "Service",
            KeyField::Phone => "Phone",
            KeyField::TransactionStatus => "Transaction",
            KeyField::Pan => "PAN",
            KeyField::Aadhar => "Aadhar",
            KeyField::PaymentStatus => "Payment",
        }
    }

    /// Longest value, in characters, the field accepts.
    pub const fn max_chars(self) -> usize {
        match self {
            KeyField::Name => 49,
            KeyField::Gender => 9,
            KeyField::Address => 99,
            KeyField::Date => 14,
            KeyField::Time => 9,
            KeyField::Ifsc => 19,
            KeyField::AccountNumber => 19,
            KeyField::ServiceType => 19,
            KeyField::Phone => 14,
            KeyField::TransactionStatus => 19,
            KeyField::Pan => 14,
            KeyField::Aadhar => 19,
            KeyField::PaymentStatus => 19,
        }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for KeyField {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let field = match normalized.as_str() {
            "acc_no" | "account" => KeyField::AccountNumber,
            "service" => KeyField::ServiceType,
            "transaction" => KeyField::TransactionStatus,
            "payment" => KeyField::PaymentStatus,
            other => KeyField::ALL
                .into_iter()
                .find(|field| field.key() == other)
                .ok_or_else(|| ParseOptionError::new("key field", value))?,
        };
        Ok(field)
    }
}

/// What happens to a text value longer than its field allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Keep the leading characters up to the limit.
    #[default]
    Truncate,
    Reject,
}

impl FieldPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            FieldPolicy::Truncate => "truncate",
            FieldPolicy::Reject => "reject",
        }
    }
}

impl FromStr for FieldPolicy {
    type Err = ParseOptionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "truncate" => Ok(FieldPolicy::Truncate),
            "reject" => Ok(FieldPolicy::Reject),
            _ => Err(ParseOptionError::new("field policy", value)),
        }
    }
}

/// Raised when details are refused at intake.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("{field} is {actual} characters long; at most {limit} are allowed")]
    FieldTooLong {
        field: KeyField,
        limit: usize,
        actual: usize,
    },
}

/// Unrecognised name for one of the textual options (key field, policy, output format).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

impl ParseOptionError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
