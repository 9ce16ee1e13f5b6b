//! HTML fragment handling: structural normalization and text flattening.

pub mod models;
pub mod normalizer;
pub mod selectors;
pub mod text;

pub use models::{Block, FieldMap, NormalizedResult, TableValue};
pub use normalizer::{normalize, normalize_str, ITEMS_KEY};
pub use text::html_to_text;
