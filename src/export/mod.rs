//! Export of grocery lists
//!
//! - CSV: one row per item (spreadsheet-compatible)
//! - JSON: machine-readable listing with totals
//! - YAML: human-readable listing with totals

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_listing_csv;
pub use json::{export_listing_json, ListingExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_listing_yaml;
