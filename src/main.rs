//! pdp-normalizer - structured data from product-detail rich text
//!
//! Reads HTML fragments or product JSON from a file or stdin.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdp_normalizer::commands::{read_input, ExtractCommand, NormalizeCommand};
use pdp_normalizer::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdp-normalizer",
    version,
    about = "Structured data from product-detail rich text",
    long_about = "Turns product description HTML (bullet lists, spec tables, bold-label paragraphs) \
                  into structured blocks, and pulls fields out of product JSON."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Compact JSON output
    #[arg(long, global = true)]
    compact: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize an HTML fragment into lists, tables and label/value pairs
    #[command(alias = "n")]
    Normalize {
        /// HTML file (stdin if omitted or "-")
        file: Option<PathBuf>,
    },

    /// Flatten an HTML fragment to plain text
    Text {
        /// HTML file (stdin if omitted or "-")
        file: Option<PathBuf>,
    },

    /// Look up a dotted path in a JSON document
    Get {
        /// Path such as props.pageProps.product.skus.0.skuId
        path: String,

        /// JSON file, or saved page with --script (stdin if omitted or "-")
        file: Option<PathBuf>,

        /// CSS selector of the script element holding the JSON
        #[arg(long)]
        script: Option<String>,
    },

    /// Extract named fields from a JSON document using a field table
    #[command(alias = "x")]
    Extract {
        /// JSON file, or saved page with --script (stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Field table (TOML)
        #[arg(long)]
        fields: Option<PathBuf>,

        /// CSS selector of the script element holding the JSON
        #[arg(long)]
        script: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.compact {
        config.pretty = false;
    }

    match cli.command {
        Commands::Normalize { file } => {
            let fragment = read_input(file.as_deref())?;
            let cmd = NormalizeCommand::new(config);
            println!("{}", cmd.execute(&fragment));
        }

        Commands::Text { file } => {
            let fragment = read_input(file.as_deref())?;
            let cmd = NormalizeCommand::new(config);
            println!("{}", cmd.execute_text(&fragment));
        }

        Commands::Get { path, file, script } => {
            if script.is_some() {
                config.script = script;
            }

            let input = read_input(file.as_deref())?;
            let cmd = ExtractCommand::new(config);
            println!("{}", cmd.execute_get(&input, &path)?);
        }

        Commands::Extract { file, fields, script } => {
            if script.is_some() {
                config.script = script;
            }

            let cmd = ExtractCommand::new(config);
            let table = cmd.load_fields(fields.as_deref())?;
            let input = read_input(file.as_deref())?;
            println!("{}", cmd.execute(&input, &table)?);
        }
    }

    Ok(())
}
