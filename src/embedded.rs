//! JSON state embedded in saved product pages.
//!
//! Most storefronts render from a JSON blob shipped inside a `<script>` tag
//! (`script#__NEXT_DATA__`, `script#tb-djs-wml-redux-state`, ...). This
//! locates that tag and parses its contents.

use anyhow::{anyhow, Context, Result};
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Selector for Next.js page state, the most common layout.
pub const NEXT_DATA: &str = "script#__NEXT_DATA__";

/// Parses the text of the first element matching `selector` as JSON.
pub fn embedded_json(html: &str, selector: &str) -> Result<Value> {
    let parsed = Selector::parse(selector)
        .map_err(|e| anyhow!("Invalid CSS selector '{}': {}", selector, e))?;

    let document = Html::parse_document(html);

    let element = document
        .select(&parsed)
        .next()
        .with_context(|| format!("No element matches '{}'", selector))?;

    let text = element.text().collect::<String>();
    debug!("Found {} bytes of embedded JSON under '{}'", text.len(), selector);

    serde_json::from_str(text.trim())
        .with_context(|| format!("Element '{}' does not contain valid JSON", selector))
}
