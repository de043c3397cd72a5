use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;

use super::domain::{ChequeStatus, PaymentMethod, PersistedPayment};
use super::policy::PaymentPolicy;

/// Whether a stored payment may be changed, with the reason when it may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl Eligibility {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Edit,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Edit => "edited",
            Mutation::Delete => "deleted",
        }
    }

    fn window_days(self, policy: &PaymentPolicy) -> i64 {
        match self {
            Mutation::Edit => policy.edit_window_days,
            Mutation::Delete => policy.delete_window_days,
        }
    }
}

pub fn can_edit_payment(
    payment: Option<&PersistedPayment>,
    clock: &impl Clock,
    policy: &PaymentPolicy,
) -> Eligibility {
    evaluate(Mutation::Edit, payment, clock, policy)
}

pub fn can_delete_payment(
    payment: Option<&PersistedPayment>,
    clock: &impl Clock,
    policy: &PaymentPolicy,
) -> Eligibility {
    evaluate(Mutation::Delete, payment, clock, policy)
}

fn evaluate(
    mutation: Mutation,
    payment: Option<&PersistedPayment>,
    clock: &impl Clock,
    policy: &PaymentPolicy,
) -> Eligibility {
    let Some(payment) = payment else {
        return Eligibility::denied("Payment not found");
    };

    let window_days = mutation.window_days(policy);
    let elapsed = clock.now() - payment.payment_date.and_time(NaiveTime::MIN);
    // A window too wide for a Duration never closes.
    if let Some(window) = Duration::try_days(window_days) {
        if elapsed > window {
            debug!(
                payment_date = %payment.payment_date,
                window_days,
                mutation = mutation.verb(),
                "payment outside mutation window"
            );
            return Eligibility::denied(format!(
                "Payments older than {window_days} days cannot be {}",
                mutation.verb()
            ));
        }
    }

    if payment.payment_method == PaymentMethod::Cheque
        && payment.cheque_status == Some(ChequeStatus::Cleared)
    {
        return Eligibility::denied(format!(
            "Cleared cheque payments cannot be {}",
            mutation.verb()
        ));
    }

    Eligibility::allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn now() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2025, 5, 31)
                .and_then(|date| date.and_hms_opt(9, 0, 0))
                .expect("valid instant"),
        )
    }

    fn payment(days_ago: i64, method: PaymentMethod, status: Option<ChequeStatus>) -> PersistedPayment {
        PersistedPayment {
            payment_date: now().today() - Duration::days(days_ago),
            payment_method: method,
            cheque_status: status,
        }
    }

    #[test]
    fn exactly_at_window_edge_is_allowed() {
        let policy = PaymentPolicy::default();
        let clock = FixedClock::at_date(now().today());

        let edge = payment(30, PaymentMethod::Cash, None);
        assert!(can_edit_payment(Some(&edge), &clock, &policy).allowed);

        let later = FixedClock::new(clock.now() + Duration::seconds(1));
        assert!(!can_edit_payment(Some(&edge), &later, &policy).allowed);
    }

    #[test]
    fn reasons_name_the_mutation() {
        let policy = PaymentPolicy::default();
        let stale = payment(10, PaymentMethod::Upi, None);

        assert_eq!(
            can_delete_payment(Some(&stale), &now(), &policy).reason.as_deref(),
            Some("Payments older than 7 days cannot be deleted")
        );

        let cleared = payment(1, PaymentMethod::Cheque, Some(ChequeStatus::Cleared));
        assert_eq!(
            can_edit_payment(Some(&cleared), &now(), &policy).reason.as_deref(),
            Some("Cleared cheque payments cannot be edited")
        );
    }

    #[test]
    fn pending_cheque_can_still_change() {
        let policy = PaymentPolicy::default();
        let pending = payment(2, PaymentMethod::Cheque, Some(ChequeStatus::Pending));

        assert_eq!(can_edit_payment(Some(&pending), &now(), &policy), Eligibility::allowed());
        assert_eq!(can_delete_payment(Some(&pending), &now(), &policy), Eligibility::allowed());
    }

    #[test]
    fn unrepresentable_window_never_closes() {
        let policy: PaymentPolicy =
            serde_json::from_str(r#"{"edit_window_days": 200000000000000}"#).expect("policy parses");
        let ancient = payment(3650, PaymentMethod::Cash, None);

        assert!(can_edit_payment(Some(&ancient), &now(), &policy).allowed);
        assert!(!can_delete_payment(Some(&ancient), &now(), &policy).allowed);

        let cleared = payment(3650, PaymentMethod::Cheque, Some(ChequeStatus::Cleared));
        assert_eq!(
            can_edit_payment(Some(&cleared), &now(), &policy).reason.as_deref(),
            Some("Cleared cheque payments cannot be edited")
        );
    }
}
