use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process;

use serde_json::Value;
use tracing_subscriber::EnvFilter;

use teambox::client::TeamboxClient;
use teambox::config::{default_config_path, load_config, save_config, ClientConfig};
use teambox::errors::Result;
use teambox::resolution::{materialize, Materialized};

/// Teambox API client with reference materialization.
#[derive(Parser)]
#[command(name = "teambox", about = "Teambox API client with reference materialization")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Materialize a saved objects/references response
    Materialize {
        /// JSON file to read (default: stdin)
        file: Option<PathBuf>,
        /// Replace foreign-key ids with the referenced objects
        #[arg(short, long)]
        expand: bool,
    },
    /// Fetch a resource, e.g. `projects/3/activities`
    Get {
        /// Resource path relative to the API root
        resource: String,
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Replace foreign-key ids with the referenced objects
        #[arg(short, long)]
        expand: bool,
    },
    /// Write a default config file
    InitConfig {
        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Materialize { file, expand } => {
            let contents = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let response: Value = serde_json::from_str(&contents)?;
            print_materialized(&materialize(response)?, expand)?;
        }
        Commands::Get {
            resource,
            config,
            expand,
        } => {
            let mut config = load_config(&config.unwrap_or_else(default_config_path))?;
            config.apply_env_overrides();
            let client = TeamboxClient::new(config);
            print_materialized(&client.get(&resource)?, expand)?;
        }
        Commands::InitConfig { config } => {
            let path = config.unwrap_or_else(default_config_path);
            save_config(&path, &ClientConfig::default())?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

/// Prints records as a JSON array, or a pass-through body as it came.
fn print_materialized(materialized: &Materialized, expand: bool) -> Result<()> {
    let output = match materialized {
        Materialized::Records(records) => Value::Array(
            records
                .iter()
                .map(|r| Value::Object(if expand { r.expand() } else { r.to_raw() }))
                .collect(),
        ),
        Materialized::Raw(value) => value.clone(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
