//! Data models for normalized product-description blocks.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Label → value mapping that keeps labels in first-insertion order.
///
/// Re-inserting an existing label replaces its value in place, so the
/// mapping behaves like a dictionary built while walking the markup.
/// Lookups scan the entries linearly, which suits fragment-sized tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> FieldMap<V> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Inserts a value, replacing (but not moving) an existing label.
    pub fn insert(&mut self, label: impl Into<String>, value: V) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Returns the value for a label, inserting one built by `default` first if absent.
    pub fn get_or_insert_with(&mut self, label: &str, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.entries.iter().position(|(existing, _)| existing == label) {
            Some(index) => index,
            None => {
                self.entries.push((label.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.entries.iter().find(|(existing, _)| existing == label).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(label, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), value))
    }

    /// Returns the labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for FieldMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut map, (label, value)| {
            map.insert(label, value);
            map
        })
    }
}

impl<V: Serialize> Serialize for FieldMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Value of a table entry: a single cell, or the cells grouped under a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TableValue {
    Text(String),
    List(Vec<String>),
}

impl TableValue {
    /// Appends an item, promoting `Text` to a two-element `List` on first use.
    pub fn push(&mut self, item: impl Into<String>) {
        let item = item.into();
        match self {
            TableValue::List(items) => items.push(item),
            TableValue::Text(text) => {
                let first = std::mem::take(text);
                *self = TableValue::List(vec![first, item]);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TableValue::Text(text) => text.is_empty(),
            TableValue::List(items) => items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TableValue::Text(text) => Some(text),
            TableValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            TableValue::Text(_) => None,
            TableValue::List(items) => Some(items),
        }
    }
}

impl From<&str> for TableValue {
    fn from(text: &str) -> Self {
        TableValue::Text(text.to_string())
    }
}

impl From<String> for TableValue {
    fn from(text: String) -> Self {
        TableValue::Text(text)
    }
}

impl From<Vec<String>> for TableValue {
    fn from(items: Vec<String>) -> Self {
        TableValue::List(items)
    }
}

/// One structured block recovered from a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// Bullet items from `<ul>`/`<li>` markup
    List(Vec<String>),
    /// Label/value rows from a `<table>`
    Table(FieldMap<TableValue>),
    /// Bold-label paragraphs (`<p><strong>Label:</strong> value</p>`)
    #[serde(rename = "paragraph_map")]
    Paragraph(FieldMap<String>),
}

impl Block {
    /// Returns true if the block has no entries worth reporting.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::List(items) => items.iter().all(|item| item.is_empty()),
            Block::Table(table) => table.iter().all(|(_, value)| value.is_empty()),
            Block::Paragraph(map) => map.iter().all(|(_, value)| value.is_empty()),
        }
    }

    /// Short name of the block kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::List(_) => "list",
            Block::Table(_) => "table",
            Block::Paragraph(_) => "paragraph_map",
        }
    }
}

/// Ordered blocks extracted from one fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedResult {
    blocks: Vec<Block>,
}

impl NormalizedResult {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block unless it is empty.
    pub fn push(&mut self, block: Block) {
        if !block.is_empty() {
            self.blocks.push(block);
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over list blocks.
    pub fn lists(&self) -> impl Iterator<Item = &[String]> {
        self.blocks.iter().filter_map(|block| match block {
            Block::List(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Iterates over table blocks.
    pub fn tables(&self) -> impl Iterator<Item = &FieldMap<TableValue>> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    /// Returns the paragraph mapping, if any paragraph carried a bold label.
    pub fn paragraphs(&self) -> Option<&FieldMap<String>> {
        self.blocks.iter().find_map(|block| match block {
            Block::Paragraph(map) => Some(map),
            _ => None,
        })
    }

    /// Returns the first list block (a product's "highlights" in most layouts).
    pub fn first_list(&self) -> Option<&[String]> {
        self.lists().next()
    }
}

impl IntoIterator for NormalizedResult {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

impl<'a> IntoIterator for &'a NormalizedResult {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
