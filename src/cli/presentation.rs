//! CLI presentation: text and json formatters per command family.

mod catalog;

pub use catalog::{format_catalog_json, format_catalog_text};
