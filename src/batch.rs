//! Bulk validation of payment forms exported as CSV, one payment per row.

use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::payments::{
    CanonicalPaymentPayload, FieldValue, PaymentFormInput, PaymentMethod, PaymentRuleEngine,
};
use crate::validation::ValidationReport;

/// Verdict for one CSV row. `row` is 1-based and excludes the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub row: usize,
    pub report: ValidationReport,
    /// Present only when the row passed validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<CanonicalPaymentPayload>,
}

/// Validates every row and formats the ones that pass.
pub fn validate_csv<R: Read, C: Clock>(
    reader: R,
    engine: &PaymentRuleEngine<C>,
) -> Result<Vec<BatchOutcome>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut outcomes = Vec::new();

    for (index, record) in csv_reader.deserialize::<PaymentRow>().enumerate() {
        let form = PaymentFormInput::from(record?);
        let report = engine.validate_payment_form(&form);
        let payload = report
            .is_valid()
            .then(|| engine.format_payment_data(&form));

        if !report.is_valid() {
            debug!(row = index + 1, errors = report.len(), "payment row rejected");
        }

        outcomes.push(BatchOutcome {
            row: index + 1,
            report,
            payload,
        });
    }

    let accepted = outcomes.iter().filter(|outcome| outcome.payload.is_some()).count();
    info!(
        rows = outcomes.len(),
        accepted,
        rejected = outcomes.len() - accepted,
        "payment batch validated"
    );

    Ok(outcomes)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PaymentRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    customer_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    amount: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    payment_method: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    payment_date: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    project_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    unit_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    transaction_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    cheque_number: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    bank_id: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    remarks: Option<String>,
}

impl From<PaymentRow> for PaymentFormInput {
    fn from(row: PaymentRow) -> Self {
        Self {
            customer_id: row.customer_id.map(identifier),
            amount: row.amount.map(FieldValue::Text),
            payment_method: row.payment_method.map(PaymentMethod::from),
            payment_date: row.payment_date,
            project_id: row.project_id.map(identifier),
            unit_id: row.unit_id.map(identifier),
            transaction_id: row.transaction_id.map(FieldValue::Text),
            cheque_number: row.cheque_number.map(FieldValue::Text),
            bank_id: row.bank_id.map(identifier),
            remarks: row.remarks.map(FieldValue::Text),
        }
    }
}

/// Numeric ids become integers; references with leading zeros or letters stay text.
fn identifier(raw: String) -> FieldValue {
    match raw.parse::<i64>() {
        Ok(id) if !raw.starts_with('0') || raw == "0" => FieldValue::Integer(id),
        _ => FieldValue::Text(raw),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
