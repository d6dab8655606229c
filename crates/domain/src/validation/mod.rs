//! Schema-based validation of untrusted input.
//!
//! Schemas are plain data ([`Schema`], [`Field`]) interpreted by [`validate`],
//! which checks every declared field and reports all violations at once.

pub mod formats;
mod schema;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub use schema::{Field, FieldKind, Schema};

/// Path used for violations that concern the payload as a whole
pub const ROOT: &str = "$";

/// Constraint a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Required,
    InvalidType,
    NotNullable,
    InvalidId,
    Empty,
    TooLong,
    InvalidEmail,
    NotAMember,
    InvalidTimestamp,
    MalformedJson,
}

/// A single field-level problem
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub constraint: Constraint,
    pub message: String,
    /// Offending value, absent when the field itself was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        constraint: Constraint,
        message: impl Into<String>,
        value: Option<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            constraint,
            message: message.into(),
            value,
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, Constraint::Required, "required", None)
    }

    pub(crate) fn shape(err: serde_json::Error) -> Self {
        Self::new(ROOT, Constraint::InvalidType, err.to_string(), None)
    }
}

/// Input rejected by a schema, with every violation found
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Validation failed for {schema}: {} violation(s)", .violations.len())]
pub struct ValidationFailure {
    pub schema: &'static str,
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    pub fn single(schema: &'static str, violation: Violation) -> Self {
        Self {
            schema,
            violations: vec![violation],
        }
    }

    /// Violations reported against `field`
    pub fn on(&self, field: &str) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.field == field)
    }
}

/// Check `raw` against `schema`
///
/// On success the declared fields come back unchanged; keys the schema does
/// not declare are dropped.
pub fn validate(schema: &Schema, raw: &Value) -> Result<Value, ValidationFailure> {
    let Some(object) = raw.as_object() else {
        return Err(ValidationFailure::single(
            schema.name,
            Violation::new(
                ROOT,
                Constraint::InvalidType,
                "expected an object",
                Some(raw.clone()),
            ),
        ));
    };

    let mut violations = Vec::new();
    let mut normalized = Map::new();

    for field in schema.fields {
        match object.get(field.name) {
            None if field.required => violations.push(Violation::missing(field.name)),
            None => {}
            Some(Value::Null) if field.nullable => {
                normalized.insert(field.name.to_string(), Value::Null);
            }
            Some(Value::Null) => violations.push(Violation::new(
                field.name,
                Constraint::NotNullable,
                "must not be null",
                Some(Value::Null),
            )),
            Some(value) => match check(field, value) {
                Ok(()) => {
                    normalized.insert(field.name.to_string(), value.clone());
                }
                Err(violation) => violations.push(violation),
            },
        }
    }

    if violations.is_empty() {
        Ok(Value::Object(normalized))
    } else {
        Err(ValidationFailure {
            schema: schema.name,
            violations,
        })
    }
}

fn check(field: &Field, value: &Value) -> Result<(), Violation> {
    let reject = |constraint: Constraint, message: String| -> Result<(), Violation> {
        Err(Violation::new(
            field.name,
            constraint,
            message,
            Some(value.clone()),
        ))
    };

    let Some(text) = value.as_str() else {
        return reject(Constraint::InvalidType, "expected a string".to_string());
    };

    match field.kind {
        FieldKind::Id if !formats::is_uuid(text) => {
            reject(Constraint::InvalidId, "invalid id".to_string())
        }
        FieldKind::BoundedString { .. } | FieldKind::Email { .. } if text.trim().is_empty() => {
            reject(Constraint::Empty, format!("{} must not be empty", field.name))
        }
        FieldKind::BoundedString { max_len, too_long } if text.chars().count() > max_len => {
            reject(Constraint::TooLong, too_long.to_string())
        }
        FieldKind::Email { max_len } if text.chars().count() > max_len => reject(
            Constraint::TooLong,
            format!("{} must be at most {max_len} characters", field.name),
        ),
        FieldKind::Email { .. } if !formats::is_email(text) => {
            reject(Constraint::InvalidEmail, "invalid email address".to_string())
        }
        FieldKind::OneOf { set, members } if !members.iter().any(|member| *member == text) => reject(
            Constraint::NotAMember,
            format!("not a recognized member of {set}"),
        ),
        FieldKind::Timestamp if !formats::is_timestamp(text) => {
            reject(Constraint::InvalidTimestamp, "invalid timestamp".to_string())
        }
        _ => Ok(()),
    }
}

/// Validate a path or query identifier
///
/// Accepts the same hyphenated form the schemas accept for id fields.
pub fn parse_id(field: &'static str, raw: &str) -> Result<Uuid, ValidationFailure> {
    formats::is_uuid(raw)
        .then(|| Uuid::try_parse(raw).ok())
        .flatten()
        .ok_or_else(|| {
            ValidationFailure::single(
                field,
                Violation::new(
                    field,
                    Constraint::InvalidId,
                    "invalid id",
                    Some(Value::String(raw.to_string())),
                ),
            )
        })
}

/// Decode a request body and run it through `schema`
pub fn parse_json<T: DeserializeOwned>(
    schema: &Schema,
    body: &[u8],
) -> Result<T, ValidationFailure> {
    let raw: Value = serde_json::from_slice(body).map_err(|err| {
        ValidationFailure::single(
            schema.name,
            Violation::new(ROOT, Constraint::MalformedJson, err.to_string(), None),
        )
    })?;
    schema.parse(&raw)
}
