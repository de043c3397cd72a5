use crate::clock::Clock;
use crate::validation::{Field, ValidationReport};

use super::amount::check_amount;
use super::date::check_payment_date;
use super::domain::PaymentFormInput;
use super::method::validate_payment_method_fields;
use super::policy::PaymentPolicy;

/// Runs every check a payment entry form needs before it can be submitted.
pub fn validate_payment_form(
    form: &PaymentFormInput,
    clock: &impl Clock,
    policy: &PaymentPolicy,
) -> ValidationReport {
    let mut report = ValidationReport::new();

    if form
        .customer_id
        .as_ref()
        .map(|id| !id.is_truthy())
        .unwrap_or(true)
    {
        report.insert(Field::CustomerId, "Customer is required");
    }

    report.check(Field::Amount, check_amount(form.amount.as_ref(), policy));

    match form.payment_method.as_ref().filter(|method| !method.is_blank()) {
        Some(method) => report.merge(validate_payment_method_fields(method, form, policy)),
        None => report.insert(Field::PaymentMethod, "Payment method is required"),
    }

    report.check(
        Field::PaymentDate,
        check_payment_date(form.payment_date.as_deref(), clock, policy),
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::payments::domain::{FieldValue, PaymentMethod};
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::at_date(NaiveDate::from_ymd_opt(2025, 1, 20).expect("valid date"))
    }

    #[test]
    fn cash_payment_with_common_fields_passes() {
        let form = PaymentFormInput {
            customer_id: Some(FieldValue::from(12)),
            amount: Some(FieldValue::from("75000")),
            payment_method: Some(PaymentMethod::Cash),
            payment_date: Some("2025-01-18".to_string()),
            ..PaymentFormInput::default()
        };

        let report = validate_payment_form(&form, &clock(), &PaymentPolicy::default());
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors());
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let report =
            validate_payment_form(&PaymentFormInput::default(), &clock(), &PaymentPolicy::default());

        assert!(report.has_error(Field::CustomerId));
        assert!(report.has_error(Field::Amount));
        assert!(report.has_error(Field::PaymentMethod));
        assert_eq!(report.error(Field::PaymentDate), Some("Payment date is required"));
    }

    #[test]
    fn method_specific_errors_are_merged() {
        let form = PaymentFormInput {
            customer_id: Some(FieldValue::from(12)),
            amount: Some(FieldValue::from(5000)),
            payment_method: Some(PaymentMethod::from_tag("CHEQUE")),
            payment_date: Some("2025-01-20".to_string()),
            ..PaymentFormInput::default()
        };

        let report = validate_payment_form(&form, &clock(), &PaymentPolicy::default());
        assert_eq!(report.len(), 2);
        assert!(report.has_error(Field::ChequeNumber));
        assert!(report.has_error(Field::BankId));
    }

    #[test]
    fn blank_method_tag_counts_as_missing() {
        let form = PaymentFormInput {
            payment_method: Some(PaymentMethod::from_tag("")),
            ..PaymentFormInput::default()
        };

        let report = validate_payment_form(&form, &clock(), &PaymentPolicy::default());
        assert_eq!(
            report.error(Field::PaymentMethod),
            Some("Payment method is required")
        );
    }
}
