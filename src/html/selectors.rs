//! CSS selectors for product-description markup.
//!
//! Rich text fields are authored by many different merchandising tools;
//! these are plain element names with no classes.

use scraper::Selector;
use std::sync::LazyLock;

/// Bullet lists.
pub static UNORDERED_LIST: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul").unwrap());

/// List items, used when a fragment has no `<ul>` wrapper at all.
pub static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());

pub static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());

pub static TABLE_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

pub static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Emphasized label inside a paragraph.
pub static EMPHASIS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong, b").unwrap());

/// Element names used when walking direct children.
pub mod names {
    pub const LIST_ITEM: &str = "li";
    pub const TABLE: &str = "table";
    pub const TABLE_HEAD: &str = "thead";
    pub const HEADER_CELL: &str = "th";
    pub const DATA_CELL: &str = "td";
}
