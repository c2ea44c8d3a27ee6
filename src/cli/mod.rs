pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8001";

#[derive(Parser)]
#[command(name = "digihome")]
#[command(about = "DigiHome CLI - run and inspect the DigiHome API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API server")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides DIGIHOME_API_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Check server health from the /health endpoint")]
    Health {
        #[arg(long, env = "DIGIHOME_API_URL", default_value = DEFAULT_API_URL)]
        url: String,
    },

    #[command(about = "List leads")]
    Leads {
        #[arg(long, env = "DIGIHOME_API_URL", default_value = DEFAULT_API_URL)]
        url: String,
        #[arg(long, help = "Number of records to skip")]
        skip: Option<u64>,
        #[arg(long, help = "Maximum number of records")]
        limit: Option<u64>,
    },

    #[command(about = "List owner portals")]
    Owners {
        #[arg(long, env = "DIGIHOME_API_URL", default_value = DEFAULT_API_URL)]
        url: String,
        #[arg(long, help = "Number of records to skip")]
        skip: Option<u64>,
        #[arg(long, help = "Maximum number of records")]
        limit: Option<u64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Serve { port } => {
            let mut config = crate::config::config().clone();
            if let Some(port) = port {
                config.api.port = port;
            }
            commands::serve::run(&config).await
        }
        Commands::Health { url } => commands::health::handle(&url, output_format).await,
        Commands::Leads { url, skip, limit } => {
            commands::records::list(&url, commands::records::Listing::Leads, skip, limit, output_format).await
        }
        Commands::Owners { url, skip, limit } => {
            commands::records::list(&url, commands::records::Listing::Owners, skip, limit, output_format).await
        }
    }
}
