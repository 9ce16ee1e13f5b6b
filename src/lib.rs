//! pdp-normalizer - structured data from product-detail rich text
//!
//! Retail product pages ship their descriptions and spec sheets as HTML
//! strings inside JSON state. This crate turns those fragments into lists,
//! label/value tables and bold-label mappings, and offers path lookups and
//! declarative field tables for the surrounding JSON.

pub mod commands;
pub mod config;
pub mod embedded;
pub mod fields;
pub mod format;
pub mod html;
pub mod json_path;

pub use config::Config;
pub use embedded::embedded_json;
pub use fields::{FieldKind, FieldSpec, FieldTable};
pub use html::{html_to_text, normalize, normalize_str, Block, NormalizedResult, TableValue};
pub use json_path::{get_from_json, JsonPath, PathError};
