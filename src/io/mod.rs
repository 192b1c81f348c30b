//! Storage I/O.
//!
//! # Architecture
//!
//! - [`codec`] renders entities in brace and delimited textual forms
//! - [`row`] flattens a product into the seven cells of a CSV record
//! - [`dump`] reads and writes the whole collection file
//! - [`console`] is where load and save progress is reported
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom::io::{DumpManager, StdConsole};
//! use stockroom::ProductCollection;
//!
//! let dump = DumpManager::new("products.csv", StdConsole)?;
//! let report = dump.read_collection();
//! let collection = ProductCollection::from_loaded(report.products);
//! dump.write_collection(&collection)?;
//! ```

pub mod codec;
pub mod console;
pub mod dump;
pub mod row;

pub use console::{Console, StdConsole};
pub use dump::{DumpManager, DumpOptions, LoadReport, RejectedRow};
