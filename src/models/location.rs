//! Owner location.

use crate::io::codec::{FieldKind, FieldSpec, Fields, Record, Value, brace};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a product owner lives.
///
/// Either coordinate may be unknown; a known coordinate is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Horizontal position.
    pub x: Option<i64>,
    /// Vertical position.
    pub y: Option<i32>,
    /// Place name, never empty.
    pub name: String,
}

impl Location {
    /// Creates a location without checking it.
    #[must_use]
    pub fn new(x: Option<i64>, y: Option<i32>, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            name: name.into(),
        }
    }

    /// Returns true if the name is present and trimmed and known coordinates
    /// are non-negative.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.problem().is_none()
    }

    fn problem(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("name must not be empty".to_string());
        }
        if self.name.trim() != self.name {
            return Some("name must not start or end with whitespace".to_string());
        }
        if let Some(x) = self.x.filter(|x| *x < 0) {
            return Some(format!("x must be non-negative, got {x}"));
        }
        if let Some(y) = self.y.filter(|y| *y < 0) {
            return Some(format!("y must be non-negative, got {y}"));
        }
        None
    }
}

impl Record for Location {
    const TYPE_NAME: &'static str = "Location";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::nullable("x", FieldKind::Integer),
        FieldSpec::nullable("y", FieldKind::Integer),
        FieldSpec::required("name", FieldKind::Text),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![self.x.into(), self.y.into(), self.name.as_str().into()]
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        let location = Self::new(
            fields.opt_number("x")?,
            fields.opt_number("y")?,
            fields.text("name")?,
        );
        match location.problem() {
            Some(reason) => Err(Error::validation(Self::TYPE_NAME, reason)),
            None => Ok(location),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&brace::encode(self))
    }
}
