//! Product identifiers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

/// Identifier of a product.
///
/// Valid identifiers are strictly positive and unique within a collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product ID without checking it.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns true if the id is strictly positive.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Hands out strictly increasing product identifiers.
///
/// The counter is atomic, so one generator may be shared between threads.
/// After loading persisted products call [`IdGenerator::advance_past`] with
/// the largest loaded id so new products never collide with stored ones.
///
/// Issuing stops with an error once `i64::MAX` has been handed out or loaded;
/// the counter never wraps.
#[derive(Debug)]
pub struct IdGenerator {
    /// The largest id issued or reserved so far.
    last: AtomicI64,
}

impl IdGenerator {
    /// Creates a generator whose first id is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a generator whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: i64) -> Self {
        Self {
            last: AtomicI64::new(first.saturating_sub(1)),
        }
    }

    /// Consumes and returns the next identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if every identifier up to
    /// `i64::MAX` is already taken.
    pub fn next(&self) -> Result<ProductId> {
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|last| ProductId(last + 1))
            .map_err(|_| Error::OperationFailed {
                operation: "next_id".to_string(),
                cause: "id space exhausted".to_string(),
            })
    }

    /// Returns the identifier the next call to [`Self::next`] will produce,
    /// or `None` once the id space is exhausted.
    #[must_use]
    pub fn peek(&self) -> Option<ProductId> {
        self.last.load(Ordering::SeqCst).checked_add(1).map(ProductId)
    }

    /// Ensures every future identifier is greater than `id`.
    pub fn advance_past(&self, id: ProductId) {
        self.last.fetch_max(id.0, Ordering::SeqCst);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
