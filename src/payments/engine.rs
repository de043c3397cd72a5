use crate::clock::{Clock, SystemClock};
use crate::validation::{Validation, ValidationReport};

use super::amount::validate_amount;
use super::balance::calculate_customer_balance;
use super::credit::validate_credit_payment;
use super::date::validate_payment_date;
use super::domain::{
    BalanceEffect, CreditFormInput, FieldValue, PaymentFormInput, PaymentMethod, PersistedPayment,
};
use super::eligibility::{can_delete_payment, can_edit_payment, Eligibility};
use super::form::validate_payment_form;
use super::method::validate_payment_method_fields;
use super::payload::{format_payment_data, CanonicalPaymentPayload};
use super::policy::PaymentPolicy;

/// Stateless rule engine binding a [`PaymentPolicy`] to a clock.
#[derive(Debug, Clone, Default)]
pub struct PaymentRuleEngine<C = SystemClock> {
    policy: PaymentPolicy,
    clock: C,
}

impl PaymentRuleEngine<SystemClock> {
    pub fn new(policy: PaymentPolicy) -> Self {
        Self {
            policy,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> PaymentRuleEngine<C> {
    pub fn with_clock(policy: PaymentPolicy, clock: C) -> Self {
        Self { policy, clock }
    }

    pub fn policy(&self) -> &PaymentPolicy {
        &self.policy
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn validate_amount(&self, raw: Option<&FieldValue>) -> Validation {
        validate_amount(raw, &self.policy)
    }

    pub fn validate_payment_date(&self, raw: Option<&str>) -> Validation {
        validate_payment_date(raw, &self.clock, &self.policy)
    }

    pub fn validate_payment_method_fields(
        &self,
        method: &PaymentMethod,
        form: &PaymentFormInput,
    ) -> ValidationReport {
        validate_payment_method_fields(method, form, &self.policy)
    }

    pub fn validate_credit_payment(&self, form: &CreditFormInput) -> ValidationReport {
        validate_credit_payment(form, &self.policy)
    }

    pub fn validate_payment_form(&self, form: &PaymentFormInput) -> ValidationReport {
        validate_payment_form(form, &self.clock, &self.policy)
    }

    pub fn calculate_customer_balance(
        &self,
        current_balance: Option<&FieldValue>,
        payment_amount: Option<&FieldValue>,
        effect: BalanceEffect,
    ) -> f64 {
        calculate_customer_balance(current_balance, payment_amount, effect)
    }

    pub fn format_payment_data(&self, form: &PaymentFormInput) -> CanonicalPaymentPayload {
        format_payment_data(form)
    }

    pub fn can_edit_payment(&self, payment: Option<&PersistedPayment>) -> Eligibility {
        can_edit_payment(payment, &self.clock, &self.policy)
    }

    pub fn can_delete_payment(&self, payment: Option<&PersistedPayment>) -> Eligibility {
        can_delete_payment(payment, &self.clock, &self.policy)
    }
}
