//! Closed value sets referenced by products and their owners.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of named values with a case-sensitive name lookup.
///
/// The name of a variant is exactly the text used in the brace and row forms.
pub trait NamedEnum: Sized + Copy + 'static {
    /// Enum name used in error messages.
    const KIND: &'static str;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Returns the member's name.
    fn name(&self) -> &'static str;

    /// Looks a member up by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVariant`] if no member has that name.
    fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|variant| variant.name() == name)
            .copied()
            .ok_or_else(|| Error::UnknownVariant {
                kind: Self::KIND,
                name: name.to_string(),
            })
    }

    /// Returns all member names joined by `", "`.
    #[must_use]
    fn names() -> String {
        Self::ALL
            .iter()
            .map(Self::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Hair color of a product owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    /// Green.
    Green,
    /// Red.
    Red,
    /// Black.
    Black,
    /// Blue.
    Blue,
    /// Brown.
    Brown,
}

impl NamedEnum for Color {
    const KIND: &'static str = "Color";
    const ALL: &'static [Self] = &[Self::Green, Self::Red, Self::Black, Self::Blue, Self::Brown];

    fn name(&self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Red => "RED",
            Self::Black => "BLACK",
            Self::Blue => "BLUE",
            Self::Brown => "BROWN",
        }
    }
}

/// Nationality of a product owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Country {
    /// United Kingdom.
    UnitedKingdom,
    /// Germany.
    Germany,
    /// France.
    France,
    /// Italy.
    Italy,
}

impl NamedEnum for Country {
    const KIND: &'static str = "Country";
    const ALL: &'static [Self] = &[Self::UnitedKingdom, Self::Germany, Self::France, Self::Italy];

    fn name(&self) -> &'static str {
        match self {
            Self::UnitedKingdom => "UNITED_KINGDOM",
            Self::Germany => "GERMANY",
            Self::France => "FRANCE",
            Self::Italy => "ITALY",
        }
    }
}

/// Unit a product is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitOfMeasure {
    /// Meters.
    Meters,
    /// Centimeters.
    Centimeters,
    /// Liters.
    Liters,
}

impl NamedEnum for UnitOfMeasure {
    const KIND: &'static str = "UnitOfMeasure";
    const ALL: &'static [Self] = &[Self::Meters, Self::Centimeters, Self::Liters];

    fn name(&self) -> &'static str {
        match self {
            Self::Meters => "METERS",
            Self::Centimeters => "CENTIMETERS",
            Self::Liters => "LITERS",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("GREEN", Color::Green)]
    #[test_case("BROWN", Color::Brown)]
    fn test_color_from_name(name: &str, expected: Color) {
        assert_eq!(Color::from_name(name).unwrap(), expected);
    }

    #[test_case("green" ; "lowercase")]
    #[test_case("Green" ; "capitalized")]
    #[test_case("" ; "empty")]
    #[test_case(" GREEN" ; "leading space")]
    fn test_color_lookup_is_case_sensitive(name: &str) {
        let err = Color::from_name(name).unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { kind: "Color", .. }));
    }

    #[test]
    fn test_names_lists_members_in_order() {
        assert_eq!(
            Country::names(),
            "UNITED_KINGDOM, GERMANY, FRANCE, ITALY"
        );
        assert_eq!(UnitOfMeasure::names(), "METERS, CENTIMETERS, LITERS");
    }

    #[test]
    fn test_every_member_resolves_by_its_name() {
        for unit in UnitOfMeasure::ALL {
            assert_eq!(UnitOfMeasure::from_name(unit.name()).unwrap(), *unit);
        }
        for country in Country::ALL {
            assert_eq!(Country::from_name(&country.to_string()).unwrap(), *country);
        }
    }
}
