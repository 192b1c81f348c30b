//! Whole-collection persistence to a CSV file.
//!
//! Writing is all-or-nothing on the serialization side: one product that
//! cannot be flattened aborts the write before the file is touched. Reading is
//! row-by-row: rows that fail to parse or validate are reported and dropped,
//! and the rest of the file still loads. Callers that save what they loaded
//! use [`DumpManager::load_for_rewrite`], which fails on any dropped row.

use super::console::Console;
use super::row::{self, HEADER};
use crate::models::{Product, ProductCollection, ProductId};
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// File layout options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    /// Whether the file starts with a header row.
    ///
    /// Governs both sides: the writer emits [`HEADER`] and the reader skips
    /// the first row, or neither happens.
    pub header: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self { header: true }
    }
}

impl DumpOptions {
    /// Sets header handling.
    #[must_use]
    pub const fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// A row that was dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line number in the file.
    pub line: u64,
    /// The row's cells as read.
    pub fields: Vec<String>,
    /// Why the row was dropped.
    pub reason: String,
}

/// Outcome of loading a file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Products that parsed and validated, in file order.
    pub products: Vec<Product>,
    /// Rows that were dropped.
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    /// Returns whether any row was dropped.
    #[must_use]
    pub const fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Reads and writes the product collection file.
#[derive(Debug)]
pub struct DumpManager<C: Console> {
    path: PathBuf,
    options: DumpOptions,
    console: C,
}

impl<C: Console> DumpManager<C> {
    /// Creates a dump manager for `path` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the path is empty.
    pub fn new(path: impl Into<PathBuf>, console: C) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInput(
                "data file path must not be empty".to_string(),
            ));
        }
        Ok(Self {
            path,
            options: DumpOptions::default(),
            console,
        })
    }

    /// Sets the file layout options.
    #[must_use]
    pub const fn with_options(mut self, options: DumpOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file layout options.
    #[must_use]
    pub const fn options(&self) -> DumpOptions {
        self.options
    }

    /// Serializes products to CSV text.
    ///
    /// # Errors
    ///
    /// Returns the first product's flattening error, or
    /// [`Error::OperationFailed`] if CSV framing fails.
    pub fn to_csv<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        if self.options.header {
            writer.write_record(HEADER).map_err(|e| Error::OperationFailed {
                operation: "write_csv_headers".to_string(),
                cause: e.to_string(),
            })?;
        }

        for product in products {
            let cells = row::to_row(product)?;
            writer.write_record(&cells).map_err(|e| Error::OperationFailed {
                operation: "write_csv".to_string(),
                cause: e.to_string(),
            })?;
        }

        let bytes = writer.into_inner().map_err(|e| Error::OperationFailed {
            operation: "flush_csv".to_string(),
            cause: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| Error::OperationFailed {
            operation: "encode_csv".to_string(),
            cause: e.to_string(),
        })
    }

    /// Overwrites the file with the given products.
    ///
    /// Failures are reported on the console and returned. The file is left
    /// untouched when serialization fails.
    ///
    /// # Errors
    ///
    /// Returns the serialization error, or [`Error::OperationFailed`] if the
    /// file cannot be written.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn write_collection<'a>(
        &self,
        products: impl IntoIterator<Item = &'a Product>,
    ) -> Result<()> {
        let payload = self.to_csv(products).inspect_err(|e| {
            self.console.print_error(&format!("serialization error: {e}"));
        })?;

        fs::write(&self.path, payload).map_err(|e| {
            self.console.print_error(&format!(
                "failed to write collection to {}: {e}",
                self.path.display()
            ));
            Error::OperationFailed {
                operation: "write_collection".to_string(),
                cause: format!("{}: {e}", self.path.display()),
            }
        })?;

        tracing::info!("Collection saved");
        self.console
            .println(&format!("collection saved to {}", self.path.display()));
        Ok(())
    }

    /// Loads the file, reporting failures on the console instead of returning them.
    ///
    /// A missing or unreadable file yields an empty report.
    pub fn read_collection(&self) -> LoadReport {
        self.try_read_collection().unwrap_or_else(|e| {
            self.console
                .print_error(&format!("failed to read collection: {e}"));
            LoadReport::default()
        })
    }

    /// Loads the file for a read-modify-write cycle.
    ///
    /// Unlike [`Self::read_collection`], nothing is swallowed: writing back a
    /// collection built from a partial load would delete the dropped rows, so
    /// any rejected row fails the load.
    ///
    /// # Errors
    ///
    /// Returns the [`Self::try_read_collection`] error, or
    /// [`Error::OperationFailed`] if any row was rejected.
    pub fn load_for_rewrite(&self) -> Result<ProductCollection> {
        let report = self.try_read_collection()?;
        if let Some(first) = report.rejected.first() {
            return Err(Error::OperationFailed {
                operation: "load_for_rewrite".to_string(),
                cause: format!(
                    "{} rows rejected in {} (first at line {}: {}); refusing to overwrite",
                    report.rejected.len(),
                    self.path.display(),
                    first.line,
                    first.reason
                ),
            });
        }
        Ok(ProductCollection::from_loaded(report.products))
    }

    /// Loads the file.
    ///
    /// A missing file is not an error and yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the file cannot be read or its
    /// CSV structure is malformed. Individual bad rows are not errors.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn try_read_collection(&self) -> Result<LoadReport> {
        if !self.path.exists() {
            tracing::debug!("Data file does not exist");
            self.console.println(&format!(
                "data file not found, starting empty: {}",
                self.path.display()
            ));
            return Ok(LoadReport::default());
        }

        let bytes = fs::read(&self.path).map_err(|e| Error::OperationFailed {
            operation: "read_collection".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            self.console
                .println(&format!("data file is empty: {}", self.path.display()));
            return Ok(LoadReport::default());
        }

        let report = self.from_csv(&bytes)?;
        tracing::info!(
            loaded = report.products.len(),
            rejected = report.rejected.len(),
            "Collection read"
        );
        if report.products.is_empty() {
            self.console
                .println(&format!("no products found in {}", self.path.display()));
        } else {
            self.console.println(&format!(
                "collection loaded: {} products, {} rows rejected",
                report.products.len(),
                report.rejected.len()
            ));
        }
        Ok(report)
    }

    /// Parses CSV input into products, dropping rows that fail.
    ///
    /// Rows that are not valid UTF-8 are dropped like any other bad row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the CSV structure itself is malformed.
    pub fn from_csv(&self, input: impl AsRef<[u8]>) -> Result<LoadReport> {
        let input = input.as_ref();
        let mut report = LoadReport::default();
        if input.iter().all(u8::is_ascii_whitespace) {
            return Ok(report);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.options.header)
            .flexible(true)
            .from_reader(input);

        let mut seen: HashSet<ProductId> = HashSet::new();
        for record in reader.byte_records() {
            let record = record.map_err(|e| Error::OperationFailed {
                operation: "read_csv".to_string(),
                cause: e.to_string(),
            })?;
            let line = record.position().map_or(0, csv::Position::line);
            let decoded: std::result::Result<Vec<String>, _> = record
                .iter()
                .map(|cell| std::str::from_utf8(cell).map(str::to_string))
                .collect();

            let (cells, outcome) = match decoded {
                Ok(cells) => {
                    let outcome = Self::accept(&cells, &mut seen);
                    (cells, outcome)
                },
                Err(e) => {
                    let cells: Vec<String> = record
                        .iter()
                        .map(|cell| String::from_utf8_lossy(cell).into_owned())
                        .collect();
                    let error = Error::InvalidInput(format!("row is not valid UTF-8: {e}"));
                    (cells, Err(("failed to decode row", error)))
                },
            };

            match outcome {
                Ok(product) => {
                    tracing::debug!(line, id = %product.id, "Loaded product");
                    report.products.push(product);
                },
                Err((what, e)) => {
                    tracing::warn!(line, error = %e, "Dropping row");
                    self.console
                        .print_error(&format!("{what} {line}: {}", cells.join(", ")));
                    self.console.print_error(&e.to_string());
                    report.rejected.push(RejectedRow {
                        line,
                        fields: cells,
                        reason: e.to_string(),
                    });
                },
            }
        }

        Ok(report)
    }

    fn accept(
        cells: &[String],
        seen: &mut HashSet<ProductId>,
    ) -> std::result::Result<Product, (&'static str, Error)> {
        let product = row::from_row(cells).map_err(|e| ("failed to parse row", e))?;
        product
            .check()
            .map_err(|e| ("invalid product in row", e))?;
        if seen.insert(product.id) {
            Ok(product)
        } else {
            Err(("duplicate product in row", Error::DuplicateId(product.id)))
        }
    }
}
