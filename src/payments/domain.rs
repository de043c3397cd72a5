use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::date::parse_payment_date;

/// Scalar collected from a form field before any typing is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Whether a form would treat the value as filled in: non-empty text or a
    /// non-zero, non-NaN number.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Boolean(value) => *value,
            FieldValue::Integer(value) => *value != 0,
            FieldValue::Float(value) => *value != 0.0 && !value.is_nan(),
            FieldValue::Text(value) => !value.is_empty(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            _ => !self.is_truthy(),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Boolean(value) => Cow::Borrowed(if *value { "true" } else { "false" }),
            FieldValue::Integer(value) => Cow::Owned(value.to_string()),
            FieldValue::Float(value) => Cow::Owned(value.to_string()),
            FieldValue::Text(value) => Cow::Borrowed(value.as_str()),
        }
    }

    /// Reads the value the way a form's float parser would: numbers pass
    /// through, text yields its leading numeral. `None` when nothing numeric
    /// can be read.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            FieldValue::Boolean(_) => None,
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Float(value) if value.is_nan() => None,
            FieldValue::Float(value) => Some(*value),
            FieldValue::Text(value) => parse_leading_float(value),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Parses the longest numeric prefix of `raw` after leading whitespace.
pub(crate) fn parse_leading_float(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if text[end..].starts_with("Infinity") {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if exponent_end < bytes.len() && matches!(bytes[exponent_end], b'+' | b'-') {
            exponent_end += 1;
        }
        let exponent_digits = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits {
            end = exponent_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// How a payment was tendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    Cash,
    Cheque,
    Online,
    Card,
    Upi,
    BankTransfer,
    /// Tags this crate has no rules for, kept verbatim.
    Other(String),
}

impl PaymentMethod {
    /// Case-insensitive lookup; unknown tags become [`PaymentMethod::Other`].
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "cash" => Self::Cash,
            "cheque" => Self::Cheque,
            "online" => Self::Online,
            "card" => Self::Card,
            "upi" => Self::Upi,
            "bank_transfer" => Self::BankTransfer,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Cash => "cash",
            Self::Cheque => "cheque",
            Self::Online => "online",
            Self::Card => "card",
            Self::Upi => "upi",
            Self::BankTransfer => "bank_transfer",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Other(tag) if tag.is_empty())
    }
}

impl FromStr for PaymentMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl From<String> for PaymentMethod {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        Self::from_tag(value)
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.tag().to_string()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Clearing state of a cheque payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChequeStatus {
    Pending,
    Cleared,
    Bounced,
    Other(String),
}

impl ChequeStatus {
    pub fn from_tag(tag: &str) -> Self {
        let trimmed = tag.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "cleared" => Self::Cleared,
            "bounced" => Self::Bounced,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Cleared => "cleared",
            Self::Bounced => "bounced",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ChequeStatus {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<ChequeStatus> for String {
    fn from(value: ChequeStatus) -> Self {
        value.tag().to_string()
    }
}

/// Payment entry form as submitted by a collections screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentFormInput {
    pub customer_id: Option<FieldValue>,
    pub amount: Option<FieldValue>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_date: Option<String>,
    pub project_id: Option<FieldValue>,
    pub unit_id: Option<FieldValue>,
    pub transaction_id: Option<FieldValue>,
    pub cheque_number: Option<FieldValue>,
    pub bank_id: Option<FieldValue>,
    pub remarks: Option<FieldValue>,
}

/// Manual credit adjustment against a customer ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditFormInput {
    pub customer_id: Option<FieldValue>,
    pub amount: Option<FieldValue>,
    pub credit_type: Option<String>,
    pub reason: Option<String>,
}

/// Stored payment as returned by the collections backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPayment {
    #[serde(deserialize_with = "deserialize_payment_date")]
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub cheque_status: Option<ChequeStatus>,
}

fn deserialize_payment_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_payment_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised payment date '{raw}'")))
}

/// Direction a payment moves the customer's running balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceEffect {
    Credit,
    #[default]
    Debit,
}

impl BalanceEffect {
    /// `"credit"` (any case) credits; every other tag debits.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("credit") {
            Self::Credit
        } else {
            Self::Debit
        }
    }
}
