//! Normalizer for product-description HTML fragments.
//!
//! Rich text fields ("long description", "specifications") come in as HTML
//! strings embedded in JSON. Each pass below re-reads the whole parsed
//! fragment for one construct: bullet lists, label/value tables, and
//! bold-label paragraphs. Passes never fail; markup they don't recognize
//! simply contributes no block.

use crate::html::models::{Block, FieldMap, NormalizedResult, TableValue};
use crate::html::selectors::{self, names};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Key collecting value-only rows of tables without a header group.
pub const ITEMS_KEY: &str = "Items";

/// Converts an HTML fragment into structured blocks.
///
/// Lists come first, then tables, then one mapping gathered from all
/// bold-label paragraphs. Absent, blank or structure-free input yields an
/// empty result.
pub fn normalize(fragment: Option<&str>) -> NormalizedResult {
    let Some(fragment) = fragment.filter(|f| !f.trim().is_empty()) else {
        trace!("Empty fragment, nothing to normalize");
        return NormalizedResult::new();
    };

    let document = Html::parse_fragment(fragment);
    if !document.errors.is_empty() {
        trace!("Fragment parsed with {} recoverable errors", document.errors.len());
    }

    let mut result = NormalizedResult::new();

    for items in list_blocks(&document) {
        result.push(Block::List(items));
    }

    for table in document.select(&selectors::TABLE) {
        result.push(Block::Table(parse_table(table)));
    }

    result.push(Block::Paragraph(paragraph_map(&document)));

    debug!(
        "Normalized fragment into {} blocks ({} lists, {} tables, paragraphs: {})",
        result.len(),
        result.lists().count(),
        result.tables().count(),
        result.paragraphs().is_some()
    );

    result
}

/// Shorthand for [`normalize`] on a present fragment.
pub fn normalize_str(fragment: &str) -> NormalizedResult {
    normalize(Some(fragment))
}

/// One item list per `<ul>`, or a single list of every `<li>` when no `<ul>` exists.
fn list_blocks(document: &Html) -> Vec<Vec<String>> {
    let lists: Vec<ElementRef> = document.select(&selectors::UNORDERED_LIST).collect();

    if lists.is_empty() {
        trace!("No <ul> found, collecting bare <li> items");
        return vec![document.select(&selectors::LIST_ITEM).map(element_text).collect()];
    }

    lists
        .into_iter()
        .map(|list| child_elements(list, names::LIST_ITEM).map(element_text).collect())
        .collect()
}

fn parse_table(table: ElementRef) -> FieldMap<TableValue> {
    let data = if child_elements(table, names::TABLE_HEAD).next().is_some() {
        sectioned_table(table)
    } else {
        flat_table(table)
    };

    trace!("Parsed table with {} entries", data.len());
    data
}

/// Table with a `<thead>`: header rows open sections that collect value-only rows.
fn sectioned_table(table: ElementRef) -> FieldMap<TableValue> {
    let mut data = FieldMap::new();
    let mut section: Option<String> = None;

    for row in table_rows(table) {
        match classify_row(row) {
            Row::Header(name) => {
                if name.is_empty() {
                    continue;
                }
                data.get_or_insert_with(&name, || TableValue::List(Vec::new()));
                section = Some(name);
            }
            Row::Pair(label, value) => data.insert(label, TableValue::Text(value)),
            Row::Continuation(value) => match &section {
                Some(name) => {
                    data.get_or_insert_with(name, || TableValue::List(Vec::new())).push(value)
                }
                None => trace!("Skipping continuation row outside any section: {}", value),
            },
            Row::Ignored => {}
        }
    }

    data
}

/// Table without a header group: value-only rows gather under [`ITEMS_KEY`].
fn flat_table(table: ElementRef) -> FieldMap<TableValue> {
    let mut data = FieldMap::new();

    for row in table_rows(table) {
        match classify_row(row) {
            Row::Pair(label, value) => data.insert(label, TableValue::Text(value)),
            Row::Continuation(value) => {
                data.get_or_insert_with(ITEMS_KEY, || TableValue::List(Vec::new())).push(value)
            }
            Row::Header(_) | Row::Ignored => {}
        }
    }

    data
}

/// Shape of a table row as far as the table passes care.
#[derive(Debug, PartialEq, Eq)]
enum Row {
    /// Only `<th>` cells; carries their joined text
    Header(String),
    /// First two `<td>` cells both have text
    Pair(String, String),
    /// First `<td>` empty, second has text
    Continuation(String),
    Ignored,
}

fn classify_row(row: ElementRef) -> Row {
    let cells: Vec<String> = child_elements(row, names::DATA_CELL).map(element_text).collect();

    if cells.is_empty() {
        let headers: Vec<ElementRef> = child_elements(row, names::HEADER_CELL).collect();
        if headers.is_empty() {
            return Row::Ignored;
        }
        let name = headers
            .into_iter()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        return Row::Header(name);
    }

    let mut cells = cells.into_iter();
    let (Some(label), Some(value)) = (cells.next(), cells.next()) else {
        return Row::Ignored;
    };

    match (label.is_empty(), value.is_empty()) {
        (false, false) => Row::Pair(label, value),
        (true, false) => Row::Continuation(value),
        _ => Row::Ignored,
    }
}

/// Rows whose nearest enclosing table is `table` (nested tables keep their own rows).
fn table_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    let table_id = table.id();
    table.select(&selectors::TABLE_ROW).filter(move |row| {
        row.ancestors()
            .find(|node| node.value().as_element().is_some_and(|e| e.name() == names::TABLE))
            .is_some_and(|owner| owner.id() == table_id)
    })
}

/// Folds every bold-label paragraph into one mapping.
fn paragraph_map(document: &Html) -> FieldMap<String> {
    document.select(&selectors::PARAGRAPH).filter_map(label_value).fold(
        FieldMap::new(),
        |mut map, (label, value)| {
            map.insert(label, value);
            map
        },
    )
}

/// Splits `<p><strong>Label:</strong> value</p>` into `("Label", "value")`.
fn label_value(paragraph: ElementRef) -> Option<(String, String)> {
    let emphasis = paragraph.select(&selectors::EMPHASIS).next()?;
    let emphasized = element_text(emphasis);

    let label = emphasized.strip_suffix(':').unwrap_or(emphasized.as_str()).trim().to_string();

    let text = paragraph.text().collect::<String>();
    let remainder = text.replacen(&emphasized, "", 1);
    let value = remainder.trim().trim_start_matches(':').trim_start().to_string();

    if label.is_empty() || value.is_empty() {
        return None;
    }

    trace!("Paragraph label '{}' -> '{}'", label, value);
    Some((label, value))
}

fn child_elements<'a>(
    parent: ElementRef<'a>,
    name: &'static str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    parent.children().filter_map(ElementRef::wrap).filter(move |child| child.value().name() == name)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
