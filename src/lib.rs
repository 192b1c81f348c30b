//! # Stockroom
//!
//! An in-memory collection of products persisted to a flat CSV file.
//!
//! Each [`Product`] owns its [`Coordinates`] and an optional [`Person`] owner,
//! who in turn may carry a [`Location`]. The collection is written to disk one
//! row per product; nested entities travel inside their cells in a brace form
//! such as `Coordinates{x=10, y=2.5}`.
//!
//! ## Features
//!
//! - Schema-driven brace and delimited codecs, one field list per entity
//! - CSV dump/load with per-row partial-failure handling
//! - Explicit, atomic identifier generation
//! - Millisecond-precision UTC timestamps
//!
//! ## Example
//!
//! ```rust,ignore
//! use stockroom::io::{DumpManager, StdConsole};
//! use stockroom::models::ProductCollection;
//!
//! let dump = DumpManager::new("products.csv", StdConsole)?;
//! let report = dump.read_collection();
//! let mut collection = ProductCollection::from_loaded(report.products);
//! dump.write_collection(collection.iter())?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod io;
pub mod models;
pub mod observability;

pub use config::StockroomConfig;
pub use models::{
    Color, Coordinates, Country, IdGenerator, Location, NamedEnum, Person, Product,
    ProductCollection, ProductId, UnitOfMeasure,
};

/// Error type for stockroom operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Format` | Brace, delimited, row or timestamp text cannot be decoded |
/// | `Validation` | An entity fails a bound or its validation predicate |
/// | `UnknownVariant` | An enum name is not a member of its closed set |
/// | `DuplicateId` | A product id is already present in the collection |
/// | `NotFound` | No product carries the requested id |
/// | `InvalidInput` | Empty file path, malformed CLI arguments |
/// | `OperationFailed` | File I/O, CSV framing, config or logging setup fails |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Text could not be decoded into an entity.
    ///
    /// Every decoding failure is funnelled into this variant at the entity
    /// boundary, so nested failures show up as a chain of causes.
    #[error("invalid {entity} format in '{input}': {cause}")]
    Format {
        /// The codec that rejected the input.
        entity: &'static str,
        /// The offending text.
        input: String,
        /// The underlying cause.
        cause: String,
    },

    /// An entity failed validation.
    #[error("invalid {entity}: {reason}")]
    Validation {
        /// The entity that failed.
        entity: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// An enum name was not recognized.
    #[error("unknown {kind} '{name}'")]
    UnknownVariant {
        /// The enum being looked up.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// A product id is already in use.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),

    /// No product has the given id.
    #[error("no product with id {0}")]
    NotFound(ProductId),

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Wraps any error as a format error for `entity` on `input`.
    pub fn format(entity: &'static str, input: &str, cause: impl std::fmt::Display) -> Self {
        Self::Format {
            entity,
            input: input.to_string(),
            cause: cause.to_string(),
        }
    }

    /// Creates a validation error.
    pub fn validation(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            entity,
            reason: reason.into(),
        }
    }
}

/// Result type alias for stockroom operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::format("Coordinates", "Coordinates{x=a}", "bad number");
        assert_eq!(
            err.to_string(),
            "invalid Coordinates format in 'Coordinates{x=a}': bad number"
        );

        let err = Error::validation("Product", "name must not be empty");
        assert_eq!(err.to_string(), "invalid Product: name must not be empty");

        let err = Error::UnknownVariant {
            kind: "Country",
            name: "SPAIN".to_string(),
        };
        assert_eq!(err.to_string(), "unknown Country 'SPAIN'");

        let err = Error::OperationFailed {
            operation: "write_csv".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'write_csv' failed: disk full");
    }
}
