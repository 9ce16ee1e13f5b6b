//! Path lookup and field-table extraction over JSON documents.

use crate::config::Config;
use crate::embedded::embedded_json;
use crate::fields::FieldTable;
use crate::format::Formatter;
use crate::json_path::JsonPath;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Reads values out of a product JSON document.
pub struct ExtractCommand {
    config: Config,
}

impl ExtractCommand {
    /// Creates a new extract command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up one dotted path and returns the formatted value.
    pub fn execute_get(&self, input: &str, path: &str) -> Result<String> {
        let path: JsonPath =
            path.parse().with_context(|| format!("Invalid path: '{}'", path))?;
        let document = self.document(input)?;

        info!("Looking up {}", path);

        let value = match path.lookup(&document) {
            Some(value) => value.clone(),
            None => {
                warn!("Nothing found at {}", path);
                Value::Null
            }
        };

        Ok(self.formatter().format_value(&value))
    }

    /// Applies a field table and returns the formatted record.
    pub fn execute(&self, input: &str, fields: &FieldTable) -> Result<String> {
        if fields.is_empty() {
            warn!("Field table has no fields");
        }

        let document = self.document(input)?;

        info!("Extracting {} fields", fields.len());

        let record = fields.apply(&document);
        Ok(self.formatter().format_value(&Value::Object(record)))
    }

    /// Loads the field table from `explicit`, falling back to the configured one.
    pub fn load_fields(&self, explicit: Option<&Path>) -> Result<FieldTable> {
        let path = explicit.or(self.config.fields.as_deref()).context(
            "No field table given. Pass --fields or set `fields` in the config file.",
        )?;

        FieldTable::from_file(path)
    }

    /// Parses the input as JSON, or as a saved page when a script selector is configured.
    fn document(&self, input: &str) -> Result<Value> {
        match &self.config.script {
            Some(selector) => embedded_json(input, selector),
            None => serde_json::from_str(input).context("Input is not valid JSON"),
        }
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(self.config.format).with_pretty(self.config.pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::fields::{FieldKind, FieldSpec};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOCUMENT: &str = r#"{
        "product": {
            "name": "Slim Trash Can",
            "description": "<ul><li>Motion sensor</li><li>50 liters</li></ul>",
            "skus": [{ "skuId": "S-1" }]
        }
    }"#;

    fn make_test_config(format: OutputFormat) -> Config {
        Config { format, pretty: false, fields: None, script: None }
    }

    fn make_fields() -> FieldTable {
        FieldTable::new(vec![
            FieldSpec::new("name", "product.name".parse().unwrap(), FieldKind::Raw),
            FieldSpec::new("features", "product.description".parse().unwrap(), FieldKind::FirstList),
            FieldSpec::new("upc", "product.skus.0.upc".parse().unwrap(), FieldKind::Raw),
        ])
    }

    #[test]
    fn test_get_found() {
        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Json));
        assert_eq!(cmd.execute_get(DOCUMENT, "product.skus.0.skuId").unwrap(), r#""S-1""#);
    }

    #[test]
    fn test_get_missing_is_null() {
        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Json));
        assert_eq!(cmd.execute_get(DOCUMENT, "product.brand").unwrap(), "null");

        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Text));
        assert_eq!(cmd.execute_get(DOCUMENT, "product.brand").unwrap(), "N/A");
    }

    #[test]
    fn test_get_invalid_path() {
        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Json));
        let err = cmd.execute_get(DOCUMENT, "product..name").unwrap_err();
        assert!(err.to_string().contains("Invalid path"));
    }

    #[test]
    fn test_get_invalid_json() {
        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Json));
        let err = cmd.execute_get("<html></html>", "product").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_get_from_saved_page() {
        let mut config = make_test_config(OutputFormat::Text);
        config.script = Some("script#__NEXT_DATA__".to_string());
        let cmd = ExtractCommand::new(config);

        let page = format!(
            r#"<html><head><script id="__NEXT_DATA__" type="application/json">{}</script></head></html>"#,
            DOCUMENT
        );
        assert_eq!(cmd.execute_get(&page, "product.name").unwrap(), "Slim Trash Can");
    }

    #[test]
    fn test_extract_record() {
        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Json));
        let output = cmd.execute(DOCUMENT, &make_fields()).unwrap();
        assert_eq!(
            output,
            r#"{"name":"Slim Trash Can","features":["Motion sensor","50 liters"],"upc":null}"#
        );
    }

    #[test]
    fn test_extract_record_markdown() {
        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Markdown));
        let output = cmd.execute(DOCUMENT, &make_fields()).unwrap();
        assert!(output.contains("- **name:** Slim Trash Can"));
        assert!(output.contains("- **features:** Motion sensor, 50 liters"));
        assert!(output.contains("- **upc:** N/A"));
    }

    #[test]
    fn test_load_fields_explicit_and_configured() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[field]]\nname = \"name\"\npath = \"product.name\"").unwrap();

        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Json));
        assert_eq!(cmd.load_fields(Some(file.path())).unwrap().len(), 1);

        let mut config = make_test_config(OutputFormat::Json);
        config.fields = Some(file.path().to_path_buf());
        let cmd = ExtractCommand::new(config);
        assert_eq!(cmd.load_fields(None).unwrap().len(), 1);
    }

    #[test]
    fn test_load_fields_missing() {
        let cmd = ExtractCommand::new(make_test_config(OutputFormat::Json));
        let err = cmd.load_fields(None).unwrap_err();
        assert!(err.to_string().contains("No field table given"));
    }
}
