//! Inspect the sample dataset catalog.
//!
//! Builds the catalog from environment configuration (`CF_DATASETS_*`,
//! optionally from a `.env` file) and prints fixture summaries, ncdump-style
//! headers or JSON schemas, or runs the consistency checks.

use anyhow::{bail, Result};
use cf_common::{check_consistency, check_encoding};
use cf_datasets::{Catalog, CatalogConfig};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Encoding/attribute divergences that fixtures carry on purpose.
const KNOWN_DIVERGENCES: [(&str, &str); 1] = [("romsds", "temp")];

#[derive(Parser, Debug)]
#[command(name = "cf-datasets")]
#[command(about = "Inspect the CF sample dataset catalog", long_about = None)]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List fixtures with their dimension sizes
    List,

    /// Print an ncdump-style header of a fixture
    Show {
        /// Fixture name (see `list`)
        name: String,
    },

    /// Print a fixture as JSON
    Json {
        /// Fixture name (see `list`)
        name: String,

        /// Include array values instead of shapes and dtypes
        #[arg(long)]
        data: bool,
    },

    /// Run the consistency checks over every fixture
    Check,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = CatalogConfig::from_env();
    info!(?config, "Building sample catalog");
    let catalog = Catalog::build(&config)?;

    match cli.command {
        Commands::List => {
            for (name, fixture) in catalog.iter() {
                let ds = fixture.to_dataset()?;
                let dims: Vec<String> = ds
                    .sizes()
                    .iter()
                    .map(|(dim, size)| format!("{}={}", dim, size))
                    .collect();
                println!("{:<12} {}", name, dims.join(" "));
            }
        }
        Commands::Show { name } => {
            let ds = catalog.get(&name)?.to_dataset()?;
            print!("{}", ds.header(&name));
        }
        Commands::Json { name, data } => {
            let ds = catalog.get(&name)?.to_dataset()?;
            println!("{}", serde_json::to_string_pretty(&ds.to_dict(data))?);
        }
        Commands::Check => {
            let mut unexpected = 0;
            for (name, fixture) in catalog.iter() {
                let ds = fixture.to_dataset()?;

                for issue in check_consistency(&ds) {
                    warn!(dataset = name, kind = ?issue.kind, "{}", issue);
                    unexpected += 1;
                }
                for issue in check_encoding(&ds) {
                    let known = KNOWN_DIVERGENCES
                        .iter()
                        .any(|&(ds_name, var)| ds_name == name && var == issue.variable);
                    if known {
                        info!(dataset = name, "Intentional divergence: {}", issue);
                    } else {
                        warn!(dataset = name, kind = ?issue.kind, "{}", issue);
                        unexpected += 1;
                    }
                }
            }

            if unexpected > 0 {
                bail!("{} unexpected consistency issue(s)", unexpected);
            }
            println!("All {} fixtures consistent", Catalog::names().len());
        }
    }

    Ok(())
}
