//! Entity model.
//!
//! Plain data types with their validation predicates. Each entity also
//! implements [`crate::io::codec::Record`], which gives it a brace form for
//! `Display` and storage.

mod collection;
mod coordinates;
mod enums;
mod id;
mod location;
mod person;
mod product;

pub use collection::ProductCollection;
pub use coordinates::{Coordinates, MIN_X_EXCLUSIVE};
pub use enums::{Color, Country, NamedEnum, UnitOfMeasure};
pub use id::{IdGenerator, ProductId};
pub use location::Location;
pub use person::{MAX_PASSPORT_ID_LEN, Person};
pub use product::Product;
