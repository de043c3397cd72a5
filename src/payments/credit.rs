use thiserror::Error;

use crate::validation::{Field, ValidationReport};

use super::amount::check_amount;
use super::domain::CreditFormInput;
use super::policy::PaymentPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditError {
    #[error("Customer is required")]
    CustomerRequired,
    #[error("Credit type is required")]
    CreditTypeRequired,
    #[error("Reason is required")]
    ReasonRequired,
    #[error("Reason must be at least {min} characters")]
    ReasonTooShort { min: usize },
}

/// Validates a manual credit adjustment.
pub fn validate_credit_payment(form: &CreditFormInput, policy: &PaymentPolicy) -> ValidationReport {
    let mut report = ValidationReport::new();

    if !form
        .customer_id
        .as_ref()
        .map(|id| id.is_truthy())
        .unwrap_or(false)
    {
        report.insert(Field::CustomerId, CreditError::CustomerRequired.to_string());
    }

    report.check(Field::Amount, check_amount(form.amount.as_ref(), policy));

    if is_blank(form.credit_type.as_deref()) {
        report.insert(Field::CreditType, CreditError::CreditTypeRequired.to_string());
    }

    report.check(Field::Reason, check_reason(form.reason.as_deref(), policy));

    report
}

fn check_reason(reason: Option<&str>, policy: &PaymentPolicy) -> Result<(), CreditError> {
    let reason = reason
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .ok_or(CreditError::ReasonRequired)?;

    let min = policy.min_reason_length;
    if reason.chars().count() < min {
        return Err(CreditError::ReasonTooShort { min });
    }

    Ok(())
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|value| value.trim().is_empty()).unwrap_or(true)
}
