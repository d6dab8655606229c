use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ValidationFailure, validate};

/// Primitive kind of a schema field and its constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UUID string
    Id,
    /// Non-empty string of at most `max_len` characters
    BoundedString {
        max_len: usize,
        too_long: &'static str,
    },
    /// Bounded string that must also look like an email address
    Email { max_len: usize },
    /// Member of a fixed, named value set
    OneOf {
        set: &'static str,
        members: &'static [&'static str],
    },
    /// RFC 3339 timestamp
    Timestamp,
    /// Free-form string without a length bound
    Text,
}

/// One field of a [`Schema`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
}

impl Field {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
        }
    }

    pub const fn id(name: &'static str) -> Self {
        Self::new(name, FieldKind::Id)
    }

    pub const fn bounded(name: &'static str, max_len: usize, too_long: &'static str) -> Self {
        Self::new(name, FieldKind::BoundedString { max_len, too_long })
    }

    pub const fn email(name: &'static str, max_len: usize) -> Self {
        Self::new(name, FieldKind::Email { max_len })
    }

    pub const fn one_of(
        name: &'static str,
        set: &'static str,
        members: &'static [&'static str],
    ) -> Self {
        Self::new(name, FieldKind::OneOf { set, members })
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, FieldKind::Timestamp)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    /// Accept `null` as a valid value
    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Allow the key to be absent
    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }
}

/// Declarative description of an entity or input payload
///
/// Pure data; [`validate`] is the only interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// True when every field of `self` exists in `full` with identical constraints
    /// and `full` has at least one field `self` lacks.
    pub fn is_subset_of(&self, full: &Schema) -> bool {
        let shared = self
            .fields
            .iter()
            .all(|field| full.field(field.name) == Some(field));
        shared && full.fields.len() > self.fields.len()
    }

    pub fn validate(&self, raw: &Value) -> Result<Value, ValidationFailure> {
        validate(self, raw)
    }

    /// Validate, then deserialize into the typed payload
    pub fn parse<T: DeserializeOwned>(&self, raw: &Value) -> Result<T, ValidationFailure> {
        let value = validate(self, raw)?;
        serde_json::from_value(value)
            .map_err(|err| ValidationFailure::single(self.name, super::Violation::shape(err)))
    }
}
