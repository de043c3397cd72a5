use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CustomerId,
    Amount,
    PaymentMethod,
    PaymentDate,
    TransactionId,
    ChequeNumber,
    BankId,
    CreditType,
    Reason,
    BankName,
    AccountNumber,
    IfscCode,
    AccountHolderName,
    OpeningBalance,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Field::CustomerId => "customer_id",
            Field::Amount => "amount",
            Field::PaymentMethod => "payment_method",
            Field::PaymentDate => "payment_date",
            Field::TransactionId => "transaction_id",
            Field::ChequeNumber => "cheque_number",
            Field::BankId => "bank_id",
            Field::CreditType => "credit_type",
            Field::Reason => "reason",
            Field::BankName => "bank_name",
            Field::AccountNumber => "account_number",
            Field::IfscCode => "ifsc_code",
            Field::AccountHolderName => "account_holder_name",
            Field::OpeningBalance => "opening_balance",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of a single-field check.
///
/// Serialises as `{ "valid": bool, "error": string|null }`. Validity is
/// derived from the error, so the two can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    error: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_error(self) -> Option<String> {
        self.error
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for Validation {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(err) => Self::fail(err.to_string()),
        }
    }
}

impl Serialize for Validation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Validation", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("error", &self.error)?;
        state.end()
    }
}

/// Outcome of a multi-field check, keyed by the offending field.
///
/// Serialises as `{ "valid": bool, "errors": { field: message } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Records a message for `field`. The first message recorded for a field wins.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Records `err` under `field` when the check failed.
    pub fn check<T, E: fmt::Display>(&mut self, field: Field, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.insert(field, err.to_string());
                None
            }
        }
    }

    pub fn attach(&mut self, field: Field, validation: Validation) {
        if let Some(message) = validation.into_error() {
            self.insert(field, message);
        }
    }

    pub fn merge(&mut self, other: ValidationReport) {
        for (field, message) in other.errors {
            self.insert(field, message);
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}
