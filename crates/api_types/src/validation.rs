//! Validation of untrusted expense payloads.
//!
//! Serde stops at the first bad field, so payloads are checked field by field
//! on a [`serde_json::Value`] instead and every failure is collected.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::expense::{Category, ExpenseInput, PaymentMethod};

/// Location used when the payload as a whole is unusable.
const BODY: &str = "body";

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// An expense payload rejected by [`ExpenseInput::validate`].
///
/// Never empty: holds one entry per offending field, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid expense payload: {}", describe(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Error located on the whole body, e.g. when it is not JSON.
    pub fn body(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(BODY, message)],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

fn expected_one_of(values: impl IntoIterator<Item = &'static str>) -> String {
    let quoted: Vec<String> = values.into_iter().map(|v| format!("'{v}'")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            format!("input should be {} or {last}", rest.join(", "))
        }
        _ => format!("input should be {}", quoted.join("")),
    }
}

fn required<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a Value> {
    let value = body.get(field);
    if value.is_none() {
        errors.push(FieldError::new(field, "field required"));
    }
    value
}

/// Drop `_` digit separators (`"1_000"`). A separator must sit between two
/// digits, otherwise the string is not a number.
fn strip_digit_separators(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut digits = String::with_capacity(raw.len());
    for (i, c) in raw.char_indices() {
        if c != '_' {
            digits.push(c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| bytes.get(j));
        let after = bytes.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(digits)
}

/// Numbers are taken as is, booleans count as 1 and 0, strings are accepted
/// when they parse as a finite decimal.
fn coerce_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            strip_digit_separators(s.trim()).and_then(|digits| digits.parse::<f64>().ok())
        }
        _ => None,
    }
    .filter(|amount| amount.is_finite())
}

fn parse_enum<T: for<'a> TryFrom<&'a str>>(value: &Value) -> Option<T> {
    value.as_str().and_then(|s| T::try_from(s).ok())
}

impl ExpenseInput {
    /// Validate a raw JSON payload.
    ///
    /// Unknown fields are ignored. On failure every offending field is
    /// reported, not only the first one.
    pub fn validate(raw: &Value) -> Result<ExpenseInput, ValidationError> {
        let Some(body) = raw.as_object() else {
            return Err(ValidationError::body("input should be a JSON object"));
        };
        let mut errors = Vec::new();

        let amount = required(body, "amount", &mut errors).and_then(|value| {
            let amount = coerce_amount(value);
            if amount.is_none() {
                errors.push(FieldError::new("amount", "input should be a valid number"));
            }
            amount
        });

        let category = required(body, "category", &mut errors).and_then(|value| {
            let category = parse_enum::<Category>(value);
            if category.is_none() {
                errors.push(FieldError::new(
                    "category",
                    expected_one_of(Category::ALL.map(Category::as_str)),
                ));
            }
            category
        });

        let payment_method = required(body, "payment_method", &mut errors).and_then(|value| {
            let method = parse_enum::<PaymentMethod>(value);
            if method.is_none() {
                errors.push(FieldError::new(
                    "payment_method",
                    expected_one_of(PaymentMethod::ALL.map(PaymentMethod::as_str)),
                ));
            }
            method
        });

        let description = match body.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new(
                    "description",
                    "input should be a valid string",
                ));
                None
            }
        };

        match (amount, category, payment_method) {
            (Some(amount), Some(category), Some(payment_method)) if errors.is_empty() => {
                Ok(ExpenseInput {
                    amount,
                    category,
                    payment_method,
                    description,
                })
            }
            _ => Err(ValidationError { errors }),
        }
    }
}
