use thiserror::Error;

use crate::validation::Validation;

use super::domain::FieldValue;
use super::policy::PaymentPolicy;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    #[error("Amount is required")]
    Required,
    #[error("Amount must be a valid number")]
    NotANumber,
    #[error("Amount must be positive")]
    NotPositive,
    #[error("Amount exceeds maximum of {max}")]
    ExceedsMaximum { max: f64 },
}

/// Parses and bounds-checks a raw amount, returning the parsed value.
///
/// Text is read by its leading numeral, so `"1500.50"` and `" 1500"` pass but
/// currency symbols are not stripped here.
pub fn check_amount(raw: Option<&FieldValue>, policy: &PaymentPolicy) -> Result<f64, AmountError> {
    let value = match raw {
        None => return Err(AmountError::Required),
        Some(FieldValue::Text(text)) if text.is_empty() => return Err(AmountError::Required),
        Some(value) => value,
    };

    let amount = value.to_number().ok_or(AmountError::NotANumber)?;
    if amount <= 0.0 {
        return Err(AmountError::NotPositive);
    }
    if amount > policy.max_amount {
        return Err(AmountError::ExceedsMaximum {
            max: policy.max_amount,
        });
    }

    Ok(amount)
}

pub fn validate_amount(raw: Option<&FieldValue>, policy: &PaymentPolicy) -> Validation {
    check_amount(raw, policy).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: impl Into<FieldValue>) -> Result<f64, AmountError> {
        check_amount(Some(&value.into()), &PaymentPolicy::default())
    }

    #[test]
    fn accepts_amounts_within_range() {
        assert_eq!(check(50_000), Ok(50_000.0));
        assert_eq!(check("1500.50"), Ok(1500.5));
        assert_eq!(check(100_000_000), Ok(100_000_000.0));
        assert_eq!(check(0.01), Ok(0.01));
    }

    #[test]
    fn rejects_missing_or_unreadable_amounts() {
        let policy = PaymentPolicy::default();
        assert_eq!(check_amount(None, &policy), Err(AmountError::Required));
        assert_eq!(check(""), Err(AmountError::Required));
        assert_eq!(check("abc"), Err(AmountError::NotANumber));
        assert_eq!(check("   "), Err(AmountError::NotANumber));
        assert_eq!(check(f64::NAN), Err(AmountError::NotANumber));
    }

    #[test]
    fn rejects_amounts_out_of_range() {
        assert_eq!(check(0), Err(AmountError::NotPositive));
        assert_eq!(check("-25"), Err(AmountError::NotPositive));
        assert_eq!(
            check(100_000_001),
            Err(AmountError::ExceedsMaximum { max: 100_000_000.0 })
        );
        assert!(matches!(
            check("Infinity"),
            Err(AmountError::ExceedsMaximum { .. })
        ));
    }

    #[test]
    fn validation_carries_message() {
        let result = validate_amount(Some(&FieldValue::from(100_000_001)), &PaymentPolicy::default());
        assert!(!result.is_valid());
        assert_eq!(result.error(), Some("Amount exceeds maximum of 100000000"));
    }
}
