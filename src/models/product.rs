//! Products, the root entity of the collection.

use super::{Coordinates, IdGenerator, Person, ProductId, UnitOfMeasure};
use crate::io::codec::{FieldKind, FieldSpec, Fields, Record, Value, brace, timestamp};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, strictly positive identifier.
    pub id: ProductId,
    /// Product name, never empty.
    pub name: String,
    /// Placement.
    pub coordinates: Coordinates,
    /// When the product was created, millisecond precision.
    pub creation_date: DateTime<Utc>,
    /// Price; positive when present.
    pub price: Option<i32>,
    /// Unit of measure.
    pub unit_of_measure: Option<UnitOfMeasure>,
    /// Owner.
    pub owner: Option<Person>,
}

impl Product {
    /// Creates a product with the next id from `ids`, created now.
    ///
    /// # Errors
    ///
    /// Returns an error if `ids` has no identifier left to hand out.
    pub fn new(
        ids: &IdGenerator,
        name: impl Into<String>,
        coordinates: Coordinates,
        price: Option<i32>,
        unit_of_measure: Option<UnitOfMeasure>,
        owner: Option<Person>,
    ) -> Result<Self> {
        Ok(Self {
            id: ids.next()?,
            name: name.into(),
            coordinates,
            creation_date: timestamp::now(),
            price,
            unit_of_measure,
            owner,
        })
    }

    /// Recreates a product whose id and creation date are already known.
    #[must_use]
    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        coordinates: Coordinates,
        creation_date: DateTime<Utc>,
        price: Option<i32>,
        unit_of_measure: Option<UnitOfMeasure>,
        owner: Option<Person>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            coordinates,
            creation_date,
            price,
            unit_of_measure,
            owner,
        }
    }

    /// Returns true if the product and its nested entities are valid.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Explains why [`Self::validate`] fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first failed requirement.
    pub fn check(&self) -> Result<()> {
        let fail = |reason: String| Err(Error::validation(Self::TYPE_NAME, reason));

        if !self.id.is_valid() {
            return fail(format!("id must be positive, got {}", self.id));
        }
        if self.name.is_empty() {
            return fail("name must not be empty".to_string());
        }
        if !self.coordinates.validate() {
            return fail(format!("coordinates are invalid: {}", self.coordinates));
        }
        if let Some(price) = self.price.filter(|p| *p < 0) {
            return fail(format!("price must not be negative, got {price}"));
        }
        if self.unit_of_measure.is_none() {
            return fail("unit of measure is required".to_string());
        }
        match &self.owner {
            None => fail("owner is required".to_string()),
            Some(owner) if !owner.validate() => fail(format!("owner is invalid: {owner}")),
            Some(_) => Ok(()),
        }
    }

    /// Copies every field except the id from `other`.
    ///
    /// The result is not re-validated.
    pub fn update(&mut self, other: &Self) {
        self.name.clone_from(&other.name);
        self.coordinates = other.coordinates;
        self.creation_date = other.creation_date;
        self.price = other.price;
        self.unit_of_measure = other.unit_of_measure;
        self.owner.clone_from(&other.owner);
    }

    /// Orders by price with missing prices first, then by name.
    #[must_use]
    pub fn sort_order(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl Record for Product {
    const TYPE_NAME: &'static str = "Product";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Integer),
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("coordinates", FieldKind::Record),
        FieldSpec::required("creationDate", FieldKind::Timestamp),
        FieldSpec::nullable("price", FieldKind::Integer),
        FieldSpec::nullable("unitOfMeasure", FieldKind::Enum),
        FieldSpec::nullable("owner", FieldKind::Record),
    ];

    fn to_values(&self) -> Vec<Value> {
        vec![
            self.id.get().into(),
            self.name.as_str().into(),
            Value::record(&self.coordinates),
            self.creation_date.into(),
            self.price.into(),
            self.unit_of_measure.as_ref().map_or(Value::Null, Value::variant),
            self.owner.as_ref().map_or(Value::Null, Value::record),
        ]
    }

    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self::with_id(
            ProductId::new(fields.number("id")?),
            fields.text("name")?,
            fields.record("coordinates")?,
            fields.timestamp("creationDate")?,
            fields.opt_number("price")?,
            fields.opt_variant("unitOfMeasure")?,
            fields.opt_record("owner")?,
        ))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&brace::encode(self))
    }
}
