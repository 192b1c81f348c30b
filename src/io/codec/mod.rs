//! Text codecs for the entity model.
//!
//! Every entity describes itself once, as an ordered list of [`FieldSpec`]s,
//! and both text encodings are driven from that list:
//!
//! | Form | Example | Used for |
//! |------|---------|----------|
//! | Brace | `Coordinates{x=10, y=2.5}` | Display, nested cells of a CSV row |
//! | Delimited | `3 ; 4 ; Home` | Construction from user-typed text |
//!
//! The two forms are not interchangeable. Decoding failures of any kind are
//! reported as a single [`Error::Format`] carrying the offending input.

pub mod brace;
pub mod delimited;
pub mod schema;
pub mod timestamp;

pub use schema::{FieldKind, FieldSpec, Value};

use crate::models::NamedEnum;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::str::FromStr;

/// An entity with a schema-driven text representation.
pub trait Record: Sized {
    /// Type name written in front of the brace form.
    const TYPE_NAME: &'static str;

    /// Ordered field list.
    const FIELDS: &'static [FieldSpec];

    /// Returns one value per entry of [`Self::FIELDS`], in order.
    fn to_values(&self) -> Vec<Value>;

    /// Builds the entity from decoded fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be converted or violates a bound.
    fn from_fields(fields: &Fields<'_>) -> Result<Self>;
}

/// A decoded but not yet converted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue<'a> {
    /// The `null` sentinel.
    Null,
    /// A bare token (number or enum name).
    Token(&'a str),
    /// Text with quoting and escapes removed.
    Text(String),
    /// A nested record in brace form.
    Nested(&'a str),
}

/// Decoded fields of one record, addressed by name.
#[derive(Debug)]
pub struct Fields<'a> {
    type_name: &'static str,
    specs: &'static [FieldSpec],
    values: Vec<RawValue<'a>>,
}

impl<'a> Fields<'a> {
    pub(crate) const fn new(
        type_name: &'static str,
        specs: &'static [FieldSpec],
        values: Vec<RawValue<'a>>,
    ) -> Self {
        Self {
            type_name,
            specs,
            values,
        }
    }

    fn raw(&self, name: &str) -> Result<&RawValue<'a>> {
        self.specs
            .iter()
            .position(|field| field.name == name)
            .and_then(|idx| self.values.get(idx))
            .ok_or_else(|| {
                Error::InvalidInput(format!("{} has no field '{name}'", self.type_name))
            })
    }

    fn mismatch(&self, name: &str, expected: &str) -> Error {
        Error::InvalidInput(format!(
            "{} field '{name}' does not hold {expected}",
            self.type_name
        ))
    }

    fn missing(&self, name: &str) -> Error {
        Error::validation(self.type_name, format!("field '{name}' must not be null"))
    }

    /// Reads a required numeric field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is null or does not parse as `T`.
    pub fn number<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.opt_number(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a nullable numeric field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field does not parse as `T`.
    pub fn opt_number<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.raw(name)? {
            RawValue::Null => Ok(None),
            RawValue::Token(token) => token.parse().map(Some).map_err(|e| {
                Error::InvalidInput(format!("field '{name}': cannot parse '{token}': {e}"))
            }),
            _ => Err(self.mismatch(name, "a number")),
        }
    }

    /// Reads a required text field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is null or not text.
    pub fn text(&self, name: &str) -> Result<String> {
        self.opt_text(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a nullable text field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is not text.
    pub fn opt_text(&self, name: &str) -> Result<Option<String>> {
        match self.raw(name)? {
            RawValue::Null => Ok(None),
            RawValue::Text(text) => Ok(Some(text.clone())),
            _ => Err(self.mismatch(name, "text")),
        }
    }

    /// Reads a required enum field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is null or names no member of `E`.
    pub fn variant<E: NamedEnum>(&self, name: &str) -> Result<E> {
        self.opt_variant(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a nullable enum field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field names no member of `E`.
    pub fn opt_variant<E: NamedEnum>(&self, name: &str) -> Result<Option<E>> {
        match self.raw(name)? {
            RawValue::Null => Ok(None),
            RawValue::Token(token) => E::from_name(token).map(Some),
            _ => Err(self.mismatch(name, "an enum name")),
        }
    }

    /// Reads a required timestamp field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is null or not in the timestamp pattern.
    pub fn timestamp(&self, name: &str) -> Result<DateTime<Utc>> {
        match self.raw(name)? {
            RawValue::Null => Err(self.missing(name)),
            RawValue::Text(text) => timestamp::parse(text),
            _ => Err(self.mismatch(name, "a timestamp")),
        }
    }

    /// Reads a required nested record.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is null or the nested text does not decode.
    pub fn record<R: Record>(&self, name: &str) -> Result<R> {
        self.opt_record(name)?.ok_or_else(|| self.missing(name))
    }

    /// Reads a nullable nested record.
    ///
    /// # Errors
    ///
    /// Returns an error if the nested text does not decode.
    pub fn opt_record<R: Record>(&self, name: &str) -> Result<Option<R>> {
        match self.raw(name)? {
            RawValue::Null => Ok(None),
            RawValue::Nested(text) => brace::decode(text).map(Some),
            _ => Err(self.mismatch(name, "a record")),
        }
    }
}
