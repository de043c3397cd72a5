use serde::{Deserialize, Serialize};

use super::domain::{FieldValue, PaymentFormInput, PaymentMethod};

/// Normalised payment ready to hand to the collections API.
///
/// The four core fields are always serialised, as `null` when the form lacked
/// them. Optional references are omitted entirely unless filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalPaymentPayload {
    pub customer_id: Option<FieldValue>,
    pub amount: f64,
    pub payment_method: Option<PaymentMethod>,
    pub payment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_number: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<FieldValue>,
}

/// Maps a form onto the submission payload. Performs no validation; run the
/// validators first.
///
/// An amount with no readable numeral becomes `NaN`, which serialises as `null`.
pub fn format_payment_data(form: &PaymentFormInput) -> CanonicalPaymentPayload {
    CanonicalPaymentPayload {
        customer_id: form.customer_id.clone(),
        amount: form
            .amount
            .as_ref()
            .and_then(FieldValue::to_number)
            .unwrap_or(f64::NAN),
        payment_method: form.payment_method.clone(),
        payment_date: form.payment_date.clone(),
        project_id: truthy(&form.project_id),
        unit_id: truthy(&form.unit_id),
        transaction_id: truthy(&form.transaction_id),
        cheque_number: truthy(&form.cheque_number),
        bank_id: truthy(&form.bank_id),
        remarks: truthy(&form.remarks),
    }
}

fn truthy(value: &Option<FieldValue>) -> Option<FieldValue> {
    value.as_ref().filter(|value| value.is_truthy()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omits_absent_optional_fields() {
        let form = PaymentFormInput {
            customer_id: Some(FieldValue::from(1)),
            amount: Some(FieldValue::from("500")),
            payment_method: Some(PaymentMethod::Cash),
            payment_date: Some("2025-01-01".to_string()),
            ..PaymentFormInput::default()
        };

        let payload = format_payment_data(&form);
        assert_eq!(payload.amount, 500.0);
        assert_eq!(
            serde_json::to_value(&payload).expect("serialises"),
            json!({
                "customer_id": 1,
                "amount": 500.0,
                "payment_method": "cash",
                "payment_date": "2025-01-01"
            })
        );
    }

    #[test]
    fn keeps_filled_references_and_drops_empty_ones() {
        let form = PaymentFormInput {
            customer_id: Some(FieldValue::from("CUST-9")),
            amount: Some(FieldValue::from(12500.75)),
            payment_method: Some(PaymentMethod::Cheque),
            payment_date: Some("2025-01-05".to_string()),
            project_id: Some(FieldValue::from(4)),
            unit_id: Some(FieldValue::from(0)),
            cheque_number: Some(FieldValue::from("000981")),
            bank_id: Some(FieldValue::from(2)),
            transaction_id: Some(FieldValue::from("")),
            remarks: Some(FieldValue::from("")),
        };

        let value = serde_json::to_value(format_payment_data(&form)).expect("serialises");
        let object = value.as_object().expect("payload is an object");

        assert_eq!(object["project_id"], json!(4));
        assert_eq!(object["cheque_number"], json!("000981"));
        assert_eq!(object["bank_id"], json!(2));
        assert!(!object.contains_key("unit_id"));
        assert!(!object.contains_key("transaction_id"));
        assert!(!object.contains_key("remarks"));
    }

    #[test]
    fn numeric_remarks_are_kept_as_entered() {
        let form: PaymentFormInput = serde_json::from_value(json!({
            "customer_id": 3,
            "amount": 900,
            "payment_method": "cash",
            "payment_date": "2025-02-11",
            "remarks": 2024
        }))
        .expect("form parses");

        let value = serde_json::to_value(format_payment_data(&form)).expect("serialises");
        assert_eq!(value["remarks"], json!(2024));
    }

    #[test]
    fn unreadable_amount_serialises_as_null() {
        let form = PaymentFormInput {
            amount: Some(FieldValue::from("abc")),
            ..PaymentFormInput::default()
        };

        let value = serde_json::to_value(format_payment_data(&form)).expect("serialises");
        assert_eq!(value["amount"], json!(null));
        assert_eq!(value["customer_id"], json!(null));
    }
}
