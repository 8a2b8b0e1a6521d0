//! Catalog metadata for linked-open datasets.
//!
//! Scrapes title, scope and data types, terminology artifacts and conditions
//! of use from FAIRsharing.org record pages and tabulates the results.

pub mod schema;
pub mod extract;
pub mod fetch;
pub mod table;

pub use schema::*;
pub use extract::{ExtractionError, FairsharingExtractor, MetadataExtractor};
pub use fetch::{FetchError, HttpPageFetcher, PageSource};
pub use table::{write_table, TableError};
