//! Product owners.

use super::{Color, Country, Location};
use crate::Result;
use crate::io::codec::{FieldKind, FieldSpec, Fields, Record, Value, brace};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Longest accepted passport id, in characters.
pub const MAX_PASSPORT_ID_LEN: usize = 42;

/// The owner of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    /// Full name, never empty.
    pub name: String,
    /// Passport id, meant to be unique.
    pub passport_id: Option<String>,
    /// Hair color.
    pub hair_color: Option<Color>,
    /// Nationality.
    pub nationality: Country,
    /// Home location.
    pub location: Option<Location>,
}

impl Person {
    /// Creates a person without checking them.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        passport_id: Option<String>,
        hair_color: Option<Color>,
        nationality: Country,
        location: Option<Location>,
    ) -> Self {
        Self {
            name: name.into(),
            passport_id,
            hair_color,
            nationality,
            location,
        }
    }

    /// Returns true if the person is complete enough to own a stored product.
    ///
    /// Requires a non-empty name, a passport id of 1 to
    /// [`MAX_PASSPORT_ID_LEN`] characters, a hair color and a valid location.
    #[must_use]
    pub fn validate(&self) -> bool {
        if self.name.is_empty() {
            return false;
        }
        let passport_ok = self.passport_id.as_deref().is_some_and(|id| {
            !id.is_empty() && id.chars().count() <= MAX_PASSPORT_ID_LEN
        });
        passport_ok
            && self.hair_color.is_some()
            && self.location.as_ref().is_some_and(Location::validate)
    }

    /// Orders by name, then passport id with missing ids first.
    #[must_use]
    pub fn sort_order(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.passport_id.cmp(&other.passport_id))
    }
}

impl Record for Person {
    const TYPE_NAME: &'static str = "Person";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::nullable("passportID", FieldKind::Text),
        FieldSpec::nullable("hairColor", FieldKind::Enum),
        FieldSpec::required("nationality", FieldKind::Enum),
        FieldSpec::nullable("location", FieldKind::Record),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.name.as_str().into(),
            self.passport_id.clone().into(),
            self.hair_color.as_ref().map_or(Value::Null, Value::variant),
            Value::variant(&self.nationality),
            self.location.as_ref().map_or(Value::Null, Value::record),
        ]
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.text("name")?,
            passport_id: fields.opt_text("passportID")?,
            hair_color: fields.opt_variant("hairColor")?,
            nationality: fields.variant("nationality")?,
            location: fields.opt_record("location")?,
        })
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&brace::encode(self))
    }
}
