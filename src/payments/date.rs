use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::clock::Clock;
use crate::validation::Validation;

use super::policy::PaymentPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Payment date is required")]
    Required,
    #[error("Invalid date format")]
    InvalidFormat,
    #[error("Payment date cannot be in the future")]
    InFuture,
    #[error("Payment date cannot be more than {} old", age_label(*months))]
    TooOld { months: u32 },
}

impl DateError {
    fn too_old(months: u32) -> Self {
        Self::TooOld { months }
    }
}

fn age_label(months: u32) -> String {
    match (months / 12, months % 12) {
        (1, 0) => "1 year".to_string(),
        (years, 0) => format!("{years} years"),
        _ => format!("{months} months"),
    }
}

/// Parses the date part of an ISO date or timestamp.
pub(crate) fn parse_payment_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|dt| dt.date())
}

/// Checks a payment date against today and the configured look-back window.
/// Both ends of the window are inclusive.
pub fn check_payment_date(
    value: Option<&str>,
    clock: &impl Clock,
    policy: &PaymentPolicy,
) -> Result<NaiveDate, DateError> {
    let raw = value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or(DateError::Required)?;
    let date = parse_payment_date(raw).ok_or(DateError::InvalidFormat)?;

    let today = clock.today();
    if date > today {
        return Err(DateError::InFuture);
    }

    let months = policy.max_payment_age_months;
    let earliest = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    if date < earliest {
        return Err(DateError::too_old(months));
    }

    Ok(date)
}

pub fn validate_payment_date(
    value: Option<&str>,
    clock: &impl Clock,
    policy: &PaymentPolicy,
) -> Validation {
    check_payment_date(value, clock, policy).into()
}
