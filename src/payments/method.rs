use thiserror::Error;

use crate::validation::{Field, ValidationReport};

use super::domain::{FieldValue, PaymentFormInput, PaymentMethod};
use super::policy::PaymentPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MethodFieldError {
    #[error("Cheque number is required for cheque payments")]
    ChequeNumberRequired,
    #[error("Bank is required for cheque payments")]
    BankRequired,
    #[error("Transaction ID is required for online payments")]
    TransactionIdRequired,
    #[error("Card transaction ID must be at least {min} characters")]
    CardReferenceTooShort { min: usize },
    #[error("UPI transaction ID must be at least {min} characters")]
    UpiReferenceTooShort { min: usize },
}

/// Checks the fields each payment method needs on top of the common ones.
pub fn validate_payment_method_fields(
    method: &PaymentMethod,
    form: &PaymentFormInput,
    policy: &PaymentPolicy,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    match method {
        PaymentMethod::Cheque => {
            if is_blank(form.cheque_number.as_ref()) {
                report.insert(
                    Field::ChequeNumber,
                    MethodFieldError::ChequeNumberRequired.to_string(),
                );
            }
            if !is_present(form.bank_id.as_ref()) {
                report.insert(Field::BankId, MethodFieldError::BankRequired.to_string());
            }
        }
        PaymentMethod::Online => {
            if is_blank(form.transaction_id.as_ref()) {
                report.insert(
                    Field::TransactionId,
                    MethodFieldError::TransactionIdRequired.to_string(),
                );
            }
        }
        PaymentMethod::Card => {
            let min = policy.min_card_reference_length;
            if reference_shorter_than(form.transaction_id.as_ref(), min) {
                report.insert(
                    Field::TransactionId,
                    MethodFieldError::CardReferenceTooShort { min }.to_string(),
                );
            }
        }
        PaymentMethod::Upi => {
            let min = policy.min_upi_reference_length;
            if reference_shorter_than(form.transaction_id.as_ref(), min) {
                report.insert(
                    Field::TransactionId,
                    MethodFieldError::UpiReferenceTooShort { min }.to_string(),
                );
            }
        }
        PaymentMethod::Cash | PaymentMethod::BankTransfer | PaymentMethod::Other(_) => {}
    }

    report
}

fn is_present(value: Option<&FieldValue>) -> bool {
    value.map(FieldValue::is_truthy).unwrap_or(false)
}

fn is_blank(value: Option<&FieldValue>) -> bool {
    value.map(FieldValue::is_blank).unwrap_or(true)
}

/// Optional references only fail when supplied and too short.
fn reference_shorter_than(value: Option<&FieldValue>, min: usize) -> bool {
    match value.filter(|value| value.is_truthy()) {
        Some(value) => value.as_text().chars().count() < min,
        None => false,
    }
}
