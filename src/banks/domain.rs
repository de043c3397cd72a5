use serde::{Deserialize, Serialize};

use crate::payments::FieldValue;

/// Bank account master record as entered on the bank setup screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankFormInput {
    pub bank_name: Option<String>,
    pub account_number: Option<FieldValue>,
    pub ifsc_code: Option<String>,
    pub branch_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub opening_balance: Option<FieldValue>,
}
