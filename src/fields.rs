//! Declarative field tables.
//!
//! A site's extractor is a list of `name = value at path` records, loaded
//! from TOML:
//!
//! ```toml
//! [[field]]
//! name = "name"
//! path = "product.descriptors.name"
//!
//! [[field]]
//! name = "specifications"
//! path = "product.manufacturingInfo.specification"
//! kind = "blocks"
//! ```

use crate::html::{html_to_text, normalize_str};
use crate::json_path::JsonPath;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, trace};

/// How a located value is turned into the output field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Copied as-is
    #[default]
    Raw,
    /// HTML string flattened to plain text
    Text,
    /// HTML string normalized into blocks
    Blocks,
    /// First list block of a normalized HTML string
    FirstList,
}

/// One output field and where to find it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub path: JsonPath,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, path: JsonPath, kind: FieldKind) -> Self {
        Self { name: name.into(), path, kind }
    }

    /// Extracts this field from `document`; anything missing becomes `null`.
    pub fn extract(&self, document: &Value) -> Value {
        let Some(found) = self.path.lookup(document) else {
            trace!("Field '{}' missing at {}", self.name, self.path);
            return Value::Null;
        };

        match self.kind {
            FieldKind::Raw => found.clone(),
            FieldKind::Text => found
                .as_str()
                .map(|html| Value::String(html_to_text(Some(html))))
                .unwrap_or(Value::Null),
            FieldKind::Blocks => found
                .as_str()
                .map(normalize_str)
                .filter(|result| !result.is_empty())
                .and_then(|result| serde_json::to_value(result).ok())
                .unwrap_or(Value::Null),
            FieldKind::FirstList => found
                .as_str()
                .map(normalize_str)
                .and_then(|result| result.first_list().map(|items| Value::from(items.to_vec())))
                .unwrap_or(Value::Null),
        }
    }
}

/// Ordered set of field specs for one site layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTable {
    #[serde(default, rename = "field")]
    pub fields: Vec<FieldSpec>,
}

impl FieldTable {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Parses a table from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse field table")
    }

    /// Loads a table from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading field table from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read field table: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse field table: {}", path.display()))
    }

    /// Extracts every field, keyed by name in table order.
    pub fn apply(&self, document: &Value) -> Map<String, Value> {
        let record: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.extract(document)))
            .collect();

        debug!(
            "Extracted {} fields ({} present)",
            record.len(),
            record.values().filter(|value| !value.is_null()).count()
        );

        record
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
