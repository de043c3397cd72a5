use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::payments::FieldValue;
use crate::validation::{Field, ValidationReport};

use super::domain::BankFormInput;

const MAX_NAME_LENGTH: usize = 100;
const MIN_ACCOUNT_DIGITS: usize = 9;
const MAX_ACCOUNT_DIGITS: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankFieldError {
    #[error("Bank name is required")]
    BankNameRequired,
    #[error("Bank name must be at most {} characters", MAX_NAME_LENGTH)]
    BankNameTooLong,
    #[error("Account number is required")]
    AccountNumberRequired,
    #[error("Account number must be {} to {} digits", MIN_ACCOUNT_DIGITS, MAX_ACCOUNT_DIGITS)]
    AccountNumberMalformed,
    #[error("IFSC code is required")]
    IfscRequired,
    #[error("IFSC code must be 4 letters, a zero, then 6 letters or digits")]
    IfscMalformed,
    #[error("Account holder name must be at most {} characters", MAX_NAME_LENGTH)]
    HolderNameTooLong,
    #[error("Opening balance must be a valid number")]
    OpeningBalanceNotANumber,
    #[error("Opening balance cannot be negative")]
    OpeningBalanceNegative,
}

fn ifsc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC regex"))
}

/// Validates a bank account master record.
pub fn validate_bank_details(form: &BankFormInput) -> ValidationReport {
    let mut report = ValidationReport::new();

    report.check(Field::BankName, check_bank_name(form.bank_name.as_deref()));
    report.check(
        Field::AccountNumber,
        check_account_number(form.account_number.as_ref()),
    );
    report.check(Field::IfscCode, check_ifsc(form.ifsc_code.as_deref()));

    if let Some(holder) = form.account_holder_name.as_deref() {
        if holder.trim().chars().count() > MAX_NAME_LENGTH {
            report.insert(
                Field::AccountHolderName,
                BankFieldError::HolderNameTooLong.to_string(),
            );
        }
    }

    report.check(
        Field::OpeningBalance,
        check_opening_balance(form.opening_balance.as_ref()),
    );

    report
}

fn check_bank_name(name: Option<&str>) -> Result<(), BankFieldError> {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(BankFieldError::BankNameRequired)?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(BankFieldError::BankNameTooLong);
    }
    Ok(())
}

/// Spaces are ignored so grouped account numbers pass.
fn check_account_number(number: Option<&FieldValue>) -> Result<String, BankFieldError> {
    let number = number
        .filter(|number| !number.is_blank())
        .ok_or(BankFieldError::AccountNumberRequired)?;
    let digits: String = number.as_text().chars().filter(|c| !c.is_whitespace()).collect();

    let well_formed = digits.chars().all(|c| c.is_ascii_digit())
        && (MIN_ACCOUNT_DIGITS..=MAX_ACCOUNT_DIGITS).contains(&digits.len());
    if !well_formed {
        return Err(BankFieldError::AccountNumberMalformed);
    }
    Ok(digits)
}

fn check_ifsc(code: Option<&str>) -> Result<String, BankFieldError> {
    let code = code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .ok_or(BankFieldError::IfscRequired)?
        .to_ascii_uppercase();
    if !ifsc_pattern().is_match(&code) {
        return Err(BankFieldError::IfscMalformed);
    }
    Ok(code)
}

fn check_opening_balance(balance: Option<&FieldValue>) -> Result<(), BankFieldError> {
    let Some(balance) = balance.filter(|balance| !balance.is_blank()) else {
        return Ok(());
    };
    let value = balance
        .to_number()
        .ok_or(BankFieldError::OpeningBalanceNotANumber)?;
    if value < 0.0 {
        return Err(BankFieldError::OpeningBalanceNegative);
    }
    Ok(())
}
