//! Field-format validators for command parameters.
//!
//! Every validator is a pure `&str -> bool` predicate; failures never raise.
//! Aggregation (collect all bad fields, not fail-fast) is the interpreter's
//! job. `validate_param_count` is the one check that produces an error value,
//! because its message must name both the expected and received counts.

use crate::core::error::TallerError;
use crate::lang::token::Value;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{7,20}$").unwrap());

static PLATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,3}-[0-9]{4}$").unwrap());

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap());

pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn validate_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Plate format `XX(X)-9999`; input is uppercased before matching.
pub fn validate_plate(value: &str) -> bool {
    PLATE_RE.is_match(&value.to_uppercase())
}

/// Strict `YYYY-MM-DD` with a real calendar date.
pub fn validate_date(value: &str) -> bool {
    let Some(caps) = DATE_RE.captures(value) else {
        return false;
    };
    let year: i32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let day: u32 = caps[3].parse().unwrap_or(0);
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Strict zero-padded 24-hour `HH:MM`.
pub fn validate_time(value: &str) -> bool {
    TIME_RE.is_match(value)
}

/// Lowercased value must be one of the four user subtype names.
pub fn validate_user_type(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "cliente" | "mecanico" | "secretaria" | "propietario"
    )
}

/// Exact-arity check for command parameters. Equal lengths never fail; a
/// mismatch names both counts.
pub fn validate_param_count(
    params: &[Value],
    expected: usize,
    entity: &str,
    action: &str,
) -> Result<(), TallerError> {
    if params.len() != expected {
        return Err(TallerError::Validation(format!(
            "Se esperaban {} parámetros para '{} {}', pero se recibieron {}",
            expected,
            entity,
            action,
            params.len()
        )));
    }
    Ok(())
}
