//! Payment rules for collections: field validation, balance arithmetic,
//! submission payloads and edit/delete eligibility of stored payments.
//!
//! Every check is a pure function over caller-supplied values. The only
//! ambient input is the [`Clock`](crate::clock::Clock) used by the date rule
//! and the eligibility windows.

pub mod amount;
pub mod balance;
pub mod credit;
pub mod date;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod form;
pub mod method;
pub mod payload;
pub mod policy;

pub use amount::{check_amount, validate_amount, AmountError};
pub use balance::calculate_customer_balance;
pub use credit::{validate_credit_payment, CreditError};
pub use date::{check_payment_date, validate_payment_date, DateError};
pub use domain::{
    BalanceEffect, ChequeStatus, CreditFormInput, FieldValue, PaymentFormInput, PaymentMethod,
    PersistedPayment,
};
pub use eligibility::{can_delete_payment, can_edit_payment, Eligibility};
pub use engine::PaymentRuleEngine;
pub use form::validate_payment_form;
pub use method::{validate_payment_method_fields, MethodFieldError};
pub use payload::{format_payment_data, CanonicalPaymentPayload};
pub use policy::{PaymentPolicy, MAX_PAYMENT_AMOUNT};
