//! Row form of a product: the seven cells of one CSV record.
//!
//! | # | Column | Cell |
//! |---|--------|------|
//! | 0 | `id` | positive integer |
//! | 1 | `name` | raw text |
//! | 2 | `coordinates` | brace form |
//! | 3 | `creationDate` | fixed timestamp pattern |
//! | 4 | `price` | positive integer or `null` |
//! | 5 | `unitOfMeasure` | enum name |
//! | 6 | `owner` | brace form or `null` |

use crate::io::codec::{brace, timestamp};
use crate::models::{NamedEnum, Product, ProductId, UnitOfMeasure};
use crate::{Error, Result};

/// Column names, written as the header row.
pub const HEADER: [&str; COLUMNS] = [
    "id",
    "name",
    "coordinates",
    "creationDate",
    "price",
    "unitOfMeasure",
    "owner",
];

/// Number of cells in a row.
pub const COLUMNS: usize = 7;

/// Sentinel for an absent cell.
pub const NULL: &str = "null";

const ENTITY: &str = "Product row";

/// Flattens a product into its row cells.
///
/// A price that is absent or not positive is written as `null`.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the id is not positive, the name is
/// blank, the coordinates are out of bounds, the unit of measure is missing,
/// or a present owner fails validation.
pub fn to_row(product: &Product) -> Result<[String; COLUMNS]> {
    if !product.id.is_valid() {
        return Err(Error::validation(
            "Product",
            format!("id must be positive, got {}", product.id),
        ));
    }
    if product.name.trim().is_empty() {
        return Err(Error::validation("Product", "name must not be blank"));
    }
    if !product.coordinates.validate() {
        return Err(Error::validation(
            "Product",
            format!("coordinates are invalid: {}", product.coordinates),
        ));
    }
    let Some(unit) = product.unit_of_measure else {
        return Err(Error::validation("Product", "unit of measure is required"));
    };
    if let Some(owner) = product.owner.as_ref().filter(|owner| !owner.validate()) {
        return Err(Error::validation(
            "Product",
            format!("owner is invalid: {owner}"),
        ));
    }

    Ok([
        product.id.to_string(),
        product.name.clone(),
        brace::encode(&product.coordinates),
        timestamp::format(&product.creation_date),
        product
            .price
            .filter(|price| *price > 0)
            .map_or_else(|| NULL.to_string(), |price| price.to_string()),
        unit.name().to_string(),
        product
            .owner
            .as_ref()
            .map_or_else(|| NULL.to_string(), brace::encode),
    ])
}

/// Rebuilds a product from its row cells.
///
/// The result is not validated; callers decide whether to keep it.
///
/// # Errors
///
/// Returns [`Error::Format`] if the row does not have exactly
/// [`COLUMNS`] cells or any cell fails to decode.
pub fn from_row<S: AsRef<str>>(cells: &[S]) -> Result<Product> {
    parse_cells(cells).map_err(|e| {
        let joined = cells
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        Error::format(ENTITY, &joined, e)
    })
}

fn parse_cells<S: AsRef<str>>(cells: &[S]) -> Result<Product> {
    let [id, name, coordinates, creation_date, price, unit, owner] = cells else {
        return Err(Error::InvalidInput(format!(
            "expected {COLUMNS} cells, got {}",
            cells.len()
        )));
    };

    let id: ProductId = id
        .as_ref()
        .trim()
        .parse()
        .map_err(|e| Error::InvalidInput(format!("id '{}': {e}", id.as_ref())))?;
    if !id.is_valid() {
        return Err(Error::InvalidInput(format!("id must be positive, got {id}")));
    }

    let name = name.as_ref();
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("name must not be blank".to_string()));
    }

    let price = match price.as_ref().trim() {
        null if null.eq_ignore_ascii_case(NULL) => None,
        text => {
            let price: i32 = text
                .parse()
                .map_err(|e| Error::InvalidInput(format!("price '{text}': {e}")))?;
            if price <= 0 {
                return Err(Error::InvalidInput(format!(
                    "price must be positive, got {price}"
                )));
            }
            Some(price)
        },
    };

    let owner = match owner.as_ref().trim() {
        null if null.eq_ignore_ascii_case(NULL) => None,
        text => Some(brace::decode(text)?),
    };

    Ok(Product::with_id(
        id,
        name,
        brace::decode(coordinates.as_ref())?,
        timestamp::parse(creation_date.as_ref().trim())?,
        price,
        Some(UnitOfMeasure::from_name(unit.as_ref().trim())?),
        owner,
    ))
}
