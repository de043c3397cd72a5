use serde::{Deserialize, Serialize};

/// Ceiling for a single payment: ten crore.
pub const MAX_PAYMENT_AMOUNT: f64 = 100_000_000.0;

/// Tunable limits applied by the payment rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentPolicy {
    pub max_amount: f64,
    pub max_payment_age_months: u32,
    pub edit_window_days: i64,
    pub delete_window_days: i64,
    pub min_card_reference_length: usize,
    pub min_upi_reference_length: usize,
    pub min_reason_length: usize,
}

impl Default for PaymentPolicy {
    fn default() -> Self {
        Self {
            max_amount: MAX_PAYMENT_AMOUNT,
            max_payment_age_months: 12,
            edit_window_days: 30,
            delete_window_days: 7,
            min_card_reference_length: 4,
            min_upi_reference_length: 12,
            min_reason_length: 10,
        }
    }
}
