//! Field schemas shared by the brace and delimited codecs.

use chrono::{DateTime, Utc};

use super::{Record, brace};
use crate::models::NamedEnum;

/// Kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed integer, written as bare digits.
    Integer,
    /// Floating point number, written as bare text.
    Float,
    /// Free text, single-quoted in brace form.
    Text,
    /// Member of a [`NamedEnum`], written as its bare name.
    Enum,
    /// Instant in the fixed timestamp pattern, single-quoted in brace form.
    Timestamp,
    /// Nested record in its own brace form.
    Record,
}

/// One entry of an entity's ordered field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, used as the `name=` key in brace form.
    pub name: &'static str,
    /// Kind of value.
    pub kind: FieldKind,
    /// Whether the `null` sentinel is accepted.
    pub nullable: bool,
}

impl FieldSpec {
    /// A field that must always carry a value.
    #[must_use]
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    /// A field that may be `null`.
    #[must_use]
    pub const fn nullable(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            nullable: true,
        }
    }
}

/// A field value ready for encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value, written as `null`.
    Null,
    /// Integer value.
    Integer(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Enum member name.
    Enum(&'static str),
    /// Timestamp value.
    Timestamp(DateTime<Utc>),
    /// Nested record, already in brace form.
    Record(String),
}

impl Value {
    /// Encodes a nested record.
    pub fn record<R: Record>(record: &R) -> Self {
        Self::Record(brace::encode(record))
    }

    /// Encodes an enum member by name.
    pub fn variant<E: NamedEnum>(variant: &E) -> Self {
        Self::Enum(variant.name())
    }

    /// Returns the kind of value, or `None` for [`Value::Null`].
    #[must_use]
    pub const fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Null => None,
            Self::Integer(_) => Some(FieldKind::Integer),
            Self::Float(_) => Some(FieldKind::Float),
            Self::Text(_) => Some(FieldKind::Text),
            Self::Enum(_) => Some(FieldKind::Enum),
            Self::Timestamp(_) => Some(FieldKind::Timestamp),
            Self::Record(_) => Some(FieldKind::Record),
        }
    }

    /// Returns true if the value may be written into a field of `field`.
    #[must_use]
    pub fn fits(&self, field: &FieldSpec) -> bool {
        self.kind()
            .map_or(field.nullable, |kind| kind == field.kind)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_fits_spec() {
        let x = FieldSpec::required("x", FieldKind::Integer);
        let price = FieldSpec::nullable("price", FieldKind::Integer);

        assert!(Value::from(3).fits(&x));
        assert!(!Value::Null.fits(&x));
        assert!(!Value::from("3").fits(&x));
        assert!(Value::Null.fits(&price));
        assert!(Value::from(None::<i32>).fits(&price));
    }
}
