//! Bank account master data used to receive cheque and transfer payments.

pub mod domain;
pub mod validation;

pub use domain::BankFormInput;
pub use validation::{validate_bank_details, BankFieldError};
