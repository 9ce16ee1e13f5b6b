//! Normalize and text commands for HTML fragments.

use crate::config::Config;
use crate::format::Formatter;
use crate::html::{html_to_text, normalize_str};
use tracing::info;

/// Turns one HTML fragment into blocks or plain text.
pub struct NormalizeCommand {
    config: Config,
}

impl NormalizeCommand {
    /// Creates a new normalize command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Normalizes a fragment and returns formatted blocks.
    pub fn execute(&self, fragment: &str) -> String {
        info!("Normalizing {} bytes of HTML", fragment.len());

        let result = normalize_str(fragment);
        self.formatter().format_result(&result)
    }

    /// Flattens a fragment to plain text.
    pub fn execute_text(&self, fragment: &str) -> String {
        info!("Flattening {} bytes of HTML", fragment.len());

        let text = html_to_text(Some(fragment));
        self.formatter().format_text(&text)
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(self.config.format).with_pretty(self.config.pretty)
    }
}
