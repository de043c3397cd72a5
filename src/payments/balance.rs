use tracing::warn;

use super::domain::{BalanceEffect, FieldValue};

/// Applies a payment to a running customer balance.
///
/// Unreadable inputs count as zero. This keeps existing ledgers working but
/// makes a malformed amount look like a zero payment, so every coercion is
/// logged. Arithmetic is plain `f64`; callers that need paise-exact totals
/// must round themselves.
pub fn calculate_customer_balance(
    current_balance: Option<&FieldValue>,
    payment_amount: Option<&FieldValue>,
    effect: BalanceEffect,
) -> f64 {
    let balance = coerce("current_balance", current_balance);
    let amount = coerce("payment_amount", payment_amount);

    match effect {
        BalanceEffect::Credit => balance + amount,
        BalanceEffect::Debit => balance - amount,
    }
}

fn coerce(field: &'static str, value: Option<&FieldValue>) -> f64 {
    match value.and_then(FieldValue::to_number) {
        Some(number) => number,
        None => {
            warn!(
                field,
                raw = ?value,
                "non-numeric balance input treated as zero"
            );
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(current: impl Into<FieldValue>, amount: impl Into<FieldValue>, effect: &str) -> f64 {
        calculate_customer_balance(
            Some(&current.into()),
            Some(&amount.into()),
            BalanceEffect::from_tag(effect),
        )
    }

    #[test]
    fn credit_increases_and_debit_decreases() {
        assert_eq!(balance(1000, 200, "credit"), 1200.0);
        assert_eq!(balance(1000, 200, "debit"), 800.0);
        assert_eq!(balance("1000.50", "0.50", "credit"), 1001.0);
    }

    #[test]
    fn unknown_effect_debits() {
        assert_eq!(balance(1000, 200, "refund"), 800.0);
        assert_eq!(BalanceEffect::default(), BalanceEffect::Debit);
    }

    #[test]
    fn unreadable_inputs_count_as_zero() {
        assert_eq!(balance(1000, "x", "debit"), 1000.0);
        assert_eq!(balance("n/a", 250, "credit"), 250.0);
        assert_eq!(
            calculate_customer_balance(None, None, BalanceEffect::Credit),
            0.0
        );
    }
}
