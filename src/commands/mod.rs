//! CLI command implementations.

pub mod extract;
pub mod normalize;

pub use extract::ExtractCommand;
pub use normalize::NormalizeCommand;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Reads a whole input file, or stdin when no path (or `-`) is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}
