//! AccessGraph CLI — catalog inspection and access checks.
//!
//! Every command reads the catalog from the configured `catalog.backup_dir`:
//!
//! ```bash
//! accessgraph validate
//! accessgraph resolve admin_group
//! accessgraph check --groups internal,forecast_users volume_forecast
//! accessgraph graph --groups admin_group --pretty
//! ```
//!
//! See `accessgraph --help` for all available commands and options.

mod commands;

use accessgraph_core::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use commands::Context;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "accessgraph", about = "AccessGraph catalog and access inspection tool", version)]
struct Cli {
    /// Configuration file (missing file means defaults plus AG_* variables)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report dangling references in the catalog; exits 1 if any
    Validate,

    /// Show the groups inherited from the given groups
    Resolve {
        #[arg(required = true)]
        groups: Vec<String>,
    },

    /// Decide whether the given groups may open an app instance
    Check {
        /// Comma-separated direct groups
        #[arg(long, value_delimiter = ',')]
        groups: Vec<String>,

        instance: String,
    },

    /// List the instances, apps and sections the given groups can reach
    Access {
        #[arg(required = true)]
        groups: Vec<String>,
    },

    /// Print the access graph as cytoscape elements
    Graph {
        /// Comma-separated direct groups
        #[arg(long, value_delimiter = ',')]
        groups: Vec<String>,

        #[arg(long)]
        pretty: bool,
    },
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let ctx = Context::load(&cli.config).await?;

    match cli.command {
        Commands::Validate => {
            let findings = commands::validate::run(&ctx);
            for line in &findings {
                println!("{}", line);
            }
            if findings.is_empty() {
                println!("Catalog OK");
            }
            Ok(findings.is_empty())
        }
        Commands::Resolve { groups } => {
            print!("{}", commands::resolve::run(&ctx, &groups).await?);
            Ok(true)
        }
        Commands::Check { groups, instance } => {
            let allowed = commands::check::run(&ctx, &groups, &instance).await?;
            println!("{}", if allowed { "allowed" } else { "denied" });
            Ok(true)
        }
        Commands::Access { groups } => {
            print!("{}", commands::access::run(&ctx, &groups).await?);
            Ok(true)
        }
        Commands::Graph { groups, pretty } => {
            println!("{}", commands::graph::run(&ctx, &groups, pretty)?);
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
