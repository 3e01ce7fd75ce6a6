use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{Age, Comments, EmailAddress, PersonName, Rating};

/// A fully validated survey submission.
///
/// Construction goes through [`SurveySubmission::parse`], which checks every
/// field independently and reports all violations at once rather than
/// stopping at the first.
#[derive(Debug)]
pub struct SurveySubmission {
    pub name: PersonName,
    pub email: EmailAddress,
    pub age: Age,
    pub consent: bool,
    pub rating: Rating,
    pub comments: Option<Comments>,
    pub user_agent: Option<String>,
    pub submission_id: Option<String>,
}

/// One violated constraint: the offending field and a human-readable reason
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Every constraint a payload violated, in field order
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|v| v.field).collect();
        write!(f, "Validation failed for: {}", fields.join(", "))
    }
}

impl SurveySubmission {
    /// Validate a decoded JSON payload into a well-typed submission.
    ///
    /// Consent must be the boolean `true`; `"true"` or `1` do not count.
    pub fn parse(payload: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let object = match payload.as_object() {
            Some(object) => object,
            None => {
                errors.push("body", "Payload must be a JSON object");
                return Err(errors);
            }
        };

        let name = required_text(object, "name", &mut errors)
            .and_then(|text| collect(text.parse::<PersonName>(), "name", &mut errors));

        let email = required_text(object, "email", &mut errors)
            .and_then(|text| collect(text.parse::<EmailAddress>(), "email", &mut errors));

        let age = required_integer(object, "age", &mut errors)
            .and_then(|value| collect(Age::try_from(value), "age", &mut errors));

        match object.get("consent") {
            Some(Value::Bool(true)) => {}
            Some(Value::Bool(false)) => errors.push("consent", "Consent must be true"),
            Some(_) => errors.push("consent", "Must be a boolean"),
            None => errors.push("consent", "Field is required"),
        }

        let rating = required_integer(object, "rating", &mut errors)
            .and_then(|value| collect(Rating::try_from(value), "rating", &mut errors));

        let comments = match optional_text(object, "comments", &mut errors) {
            Some(text) => collect(text.parse::<Comments>(), "comments", &mut errors),
            None => None,
        };

        let user_agent = optional_text(object, "user_agent", &mut errors).map(str::to_owned);

        let submission_id = optional_text(object, "submission_id", &mut errors).map(str::to_owned);

        match (name, email, age, rating) {
            (Some(name), Some(email), Some(age), Some(rating)) if errors.is_empty() => Ok(Self {
                name,
                email,
                age,
                consent: true,
                rating,
                comments,
                user_agent,
                submission_id,
            }),
            _ => Err(errors),
        }
    }
}

fn collect<T, E: Into<String>>(
    result: Result<T, E>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

fn required_text<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match object.get(field) {
        Some(Value::String(text)) => Some(text),
        Some(_) => {
            errors.push(field, "Must be a string");
            None
        }
        None => {
            errors.push(field, "Field is required");
            None
        }
    }
}

fn required_integer(
    object: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<i64> {
    match object.get(field) {
        Some(Value::Number(number)) => match number.as_i64() {
            Some(value) => Some(value),
            None => {
                errors.push(field, "Must be an integer");
                None
            }
        },
        Some(_) => {
            errors.push(field, "Must be an integer");
            None
        }
        None => {
            errors.push(field, "Field is required");
            None
        }
    }
}

/// Absent and `null` both count as "not supplied"
fn optional_text<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match object.get(field) {
        Some(Value::String(text)) => Some(text),
        Some(Value::Null) | None => None,
        Some(_) => {
            errors.push(field, "Must be a string");
            None
        }
    }
}
