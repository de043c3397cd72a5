use chrono::{Duration, NaiveDate, NaiveDateTime};
use realty_payments::payments::{
    can_delete_payment, can_edit_payment, ChequeStatus, PaymentMethod, PaymentPolicy,
    PaymentRuleEngine, PersistedPayment,
};
use realty_payments::FixedClock;

fn evaluation_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 2)
        .and_then(|date| date.and_hms_opt(16, 20, 0))
        .expect("valid instant")
}

fn clock() -> FixedClock {
    FixedClock::new(evaluation_instant())
}

fn payment_days_ago(days: i64, method: &str, cheque_status: Option<&str>) -> PersistedPayment {
    PersistedPayment {
        payment_date: evaluation_instant().date() - Duration::days(days),
        payment_method: PaymentMethod::from_tag(method),
        cheque_status: cheque_status.map(ChequeStatus::from_tag),
    }
}

#[test]
fn missing_record_is_not_eligible() {
    let policy = PaymentPolicy::default();

    for eligibility in [
        can_edit_payment(None, &clock(), &policy),
        can_delete_payment(None, &clock(), &policy),
    ] {
        assert!(!eligibility.allowed);
        assert_eq!(eligibility.reason.as_deref(), Some("Payment not found"));
    }
}

#[test]
fn edit_window_is_thirty_days() {
    let policy = PaymentPolicy::default();

    let stale = payment_days_ago(31, "cash", None);
    let denied = can_edit_payment(Some(&stale), &clock(), &policy);
    assert!(!denied.allowed);
    assert!(denied.reason.expect("reason").contains("30 days"));

    let recent = payment_days_ago(29, "cash", None);
    let allowed = can_edit_payment(Some(&recent), &clock(), &policy);
    assert!(allowed.allowed);
    assert!(allowed.reason.is_none());
}

#[test]
fn cleared_cheques_are_locked() {
    let policy = PaymentPolicy::default();
    let cleared = payment_days_ago(29, "cheque", Some("cleared"));

    let edit = can_edit_payment(Some(&cleared), &clock(), &policy);
    assert!(!edit.allowed);
    assert!(edit.reason.expect("reason").contains("Cleared cheque"));

    let recent_cleared = payment_days_ago(1, "cheque", Some("cleared"));
    assert!(!can_delete_payment(Some(&recent_cleared), &clock(), &policy).allowed);

    let bounced = payment_days_ago(1, "cheque", Some("bounced"));
    assert!(can_delete_payment(Some(&bounced), &clock(), &policy).allowed);
}

#[test]
fn delete_window_is_seven_days() {
    let policy = PaymentPolicy::default();

    let stale = payment_days_ago(8, "cash", None);
    assert!(!can_delete_payment(Some(&stale), &clock(), &policy).allowed);
    assert!(can_edit_payment(Some(&stale), &clock(), &policy).allowed);

    let recent = payment_days_ago(6, "cash", None);
    assert!(can_delete_payment(Some(&recent), &clock(), &policy).allowed);
}

#[test]
fn same_record_loses_eligibility_as_time_passes() {
    let record = payment_days_ago(6, "upi", None);
    let before = PaymentRuleEngine::with_clock(PaymentPolicy::default(), clock());
    let after = PaymentRuleEngine::with_clock(
        PaymentPolicy::default(),
        FixedClock::new(evaluation_instant() + Duration::days(2)),
    );

    assert!(before.can_delete_payment(Some(&record)).allowed);
    assert!(!after.can_delete_payment(Some(&record)).allowed);
}

#[test]
fn stored_records_deserialise_from_api_json() {
    let record: PersistedPayment = serde_json::from_str(
        r#"{
            "id": 881,
            "payment_date": "2025-09-30",
            "payment_method": "CHEQUE",
            "cheque_status": "pending",
            "amount": "45000.00"
        }"#,
    )
    .expect("record parses");

    let eligibility = can_edit_payment(Some(&record), &clock(), &PaymentPolicy::default());
    assert!(eligibility.allowed);
}
