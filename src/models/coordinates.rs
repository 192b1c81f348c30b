//! Product placement coordinates.

use crate::io::codec::{FieldKind, FieldSpec, Fields, Record, Value, brace};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinates `x` must be strictly greater than this.
pub const MIN_X_EXCLUSIVE: i32 = -454;

/// Where a product sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Horizontal position, greater than [`MIN_X_EXCLUSIVE`].
    pub x: i32,
    /// Vertical position.
    pub y: f64,
}

impl Coordinates {
    /// Creates coordinates without checking them.
    #[must_use]
    pub const fn new(x: i32, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if `x` is within bounds.
    #[must_use]
    pub const fn validate(&self) -> bool {
        self.x > MIN_X_EXCLUSIVE
    }
}

impl Record for Coordinates {
    const TYPE_NAME: &'static str = "Coordinates";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("x", FieldKind::Integer),
        FieldSpec::required("y", FieldKind::Float),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![self.x.into(), self.y.into()]
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        let coordinates = Self::new(fields.number("x")?, fields.number("y")?);
        if !coordinates.validate() {
            return Err(Error::validation(
                Self::TYPE_NAME,
                format!("x must be greater than {MIN_X_EXCLUSIVE}, got {}", coordinates.x),
            ));
        }
        Ok(coordinates)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&brace::encode(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::codec::delimited;
    use test_case::test_case;

    #[test]
    fn test_brace_form() {
        let c = Coordinates::new(10, 2.5);
        assert_eq!(c.to_string(), "Coordinates{x=10, y=2.5}");
        assert_eq!(Coordinates::new(0, 3.0).to_string(), "Coordinates{x=0, y=3.0}");
    }

    #[test]
    fn test_brace_decode() {
        let c: Coordinates = brace::decode("Coordinates{x=-453, y=-0.25}").unwrap();
        assert_eq!(c, Coordinates::new(-453, -0.25));
    }

    #[test]
    fn test_delimited_form() {
        let c: Coordinates = delimited::decode("7 ; 1.5").unwrap();
        assert_eq!(c, Coordinates::new(7, 1.5));
        assert_eq!(delimited::encode(&c).unwrap(), "7 ; 1.5");
    }

    #[test_case(-453, true)]
    #[test_case(-454, false)]
    #[test_case(i32::MIN, false)]
    #[test_case(i32::MAX, true)]
    fn test_validate_lower_bound(x: i32, valid: bool) {
        assert_eq!(Coordinates::new(x, 0.0).validate(), valid);
    }

    #[test_case("Coordinates{x=-454, y=1.0}" ; "x at bound")]
    #[test_case("Coordinates{x=1}" ; "missing y")]
    #[test_case("Coordinates{x=null, y=1.0}" ; "null x")]
    #[test_case("Coordinates{x=2147483648, y=1.0}" ; "x overflows i32")]
    #[test_case("Coordinates{x=1, y=abc}" ; "y not a number")]
    #[test_case("Coords{x=1, y=1.0}" ; "wrong type name")]
    fn test_brace_decode_rejects(input: &str) {
        let err = brace::decode::<Coordinates>(input).unwrap_err();
        assert!(matches!(err, Error::Format { entity: "Coordinates", .. }));
    }
}
