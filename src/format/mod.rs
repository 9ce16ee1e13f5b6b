//! Output formatting for normalized blocks and extracted values (text, JSON, markdown).

use crate::config::OutputFormat;
use crate::html::{Block, FieldMap, NormalizedResult, TableValue};
use serde::Serialize;
use serde_json::Value;

/// Formats results for output.
pub struct Formatter {
    format: OutputFormat,
    pretty: bool,
}

impl Formatter {
    /// Creates a new formatter with pretty JSON.
    pub fn new(format: OutputFormat) -> Self {
        Self { format, pretty: true }
    }

    /// Toggles pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Formats the blocks of one fragment.
    pub fn format_result(&self, result: &NormalizedResult) -> String {
        if result.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No structured data found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json(result, "[]"),
            OutputFormat::Text => self.text_result(result),
            OutputFormat::Markdown => self.markdown_result(result),
        }
    }

    /// Formats flattened text.
    pub fn format_text(&self, text: &str) -> String {
        match self.format {
            OutputFormat::Json => self.json(&text, "\"\""),
            _ => text.to_string(),
        }
    }

    /// Formats a JSON value (a path lookup or an extracted record).
    pub fn format_value(&self, value: &Value) -> String {
        match self.format {
            OutputFormat::Json => self.json(value, "null"),
            OutputFormat::Text => self.text_value(value),
            OutputFormat::Markdown => self.markdown_value(value),
        }
    }

    // JSON formatting

    fn json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }

    // Text formatting

    fn text_result(&self, result: &NormalizedResult) -> String {
        let mut sections = Vec::new();
        let (mut lists, mut tables) = (0, 0);

        for block in result {
            let mut lines = Vec::new();
            match block {
                Block::List(items) => {
                    lists += 1;
                    lines.push(format!("[list {}]", lists));
                    lines.extend(items.iter().map(|item| format!("- {}", item)));
                }
                Block::Table(table) => {
                    tables += 1;
                    lines.push(format!("[table {}]", tables));
                    lines.extend(Self::text_table(table));
                }
                Block::Paragraph(map) => {
                    lines.push("[details]".to_string());
                    lines.extend(map.iter().map(|(label, value)| format!("{}: {}", label, value)));
                }
            }
            sections.push(lines.join("\n"));
        }

        sections.join("\n\n")
    }

    fn text_table(table: &FieldMap<TableValue>) -> Vec<String> {
        let mut lines = Vec::new();
        for (label, value) in table.iter() {
            match value {
                TableValue::Text(text) => lines.push(format!("{}: {}", label, text)),
                TableValue::List(items) => {
                    lines.push(format!("{}:", label));
                    lines.extend(items.iter().map(|item| format!("  - {}", item)));
                }
            }
        }
        lines
    }

    fn text_value(&self, value: &Value) -> String {
        match value {
            Value::Object(map) if !map.is_empty() => map
                .iter()
                .map(|(key, value)| format!("{}: {}", key, Self::inline(value)))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => Self::inline(value),
        }
    }

    // Markdown formatting

    fn markdown_result(&self, result: &NormalizedResult) -> String {
        let mut sections = Vec::new();
        let (mut lists, mut tables) = (0, 0);

        for block in result {
            let mut lines = Vec::new();
            match block {
                Block::List(items) => {
                    lists += 1;
                    lines.push(format!("### List {}", lists));
                    lines.push(String::new());
                    lines.extend(items.iter().map(|item| format!("- {}", item)));
                }
                Block::Table(table) => {
                    tables += 1;
                    lines.push(format!("### Table {}", tables));
                    lines.push(String::new());
                    lines.push("| Label | Value |".to_string());
                    lines.push("|-------|-------|".to_string());
                    for (label, value) in table.iter() {
                        let value = match value {
                            TableValue::Text(text) => Self::markdown_escape(text),
                            TableValue::List(items) => items
                                .iter()
                                .map(|item| Self::markdown_escape(item))
                                .collect::<Vec<_>>()
                                .join("<br>"),
                        };
                        lines.push(format!("| {} | {} |", Self::markdown_escape(label), value));
                    }
                }
                Block::Paragraph(map) => {
                    lines.push("### Details".to_string());
                    lines.push(String::new());
                    lines.extend(
                        map.iter().map(|(label, value)| format!("- **{}:** {}", label, value)),
                    );
                }
            }
            sections.push(lines.join("\n"));
        }

        sections.join("\n\n")
    }

    fn markdown_value(&self, value: &Value) -> String {
        match value {
            Value::Object(map) if !map.is_empty() => map
                .iter()
                .map(|(key, value)| format!("- **{}:** {}", key, Self::inline(value)))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => Self::inline(value),
        }
    }

    /// Single-line rendering: bare strings, `N/A` for null, compact JSON otherwise.
    fn inline(value: &Value) -> String {
        match value {
            Value::Null => "N/A".to_string(),
            Value::String(s) => s.clone(),
            Value::Array(items) if items.iter().all(Value::is_string) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }

    fn markdown_escape(s: &str) -> String {
        s.replace('|', "\\|").replace('\n', " ")
    }
}
