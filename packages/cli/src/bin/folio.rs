use clap::{Parser, Subcommand};
use folio_cli::config::{normalize_upstream_url, Config};
use folio_content::ContentConfig;
use std::path::PathBuf;
use std::process;
use tracing::error;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - headless CMS gateway and content server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the file endpoints that proxy the content API
    Gateway {
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..), help = "Gateway port (overrides FOLIO_GATEWAY_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Content API base URL (overrides FOLIO_UPSTREAM_URL)")]
        upstream: Option<String>,
    },
    /// Serve sites, sections and files from disk
    Content {
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..), help = "Content API port (overrides FOLIO_CONTENT_PORT)")]
        port: Option<u16>,
        #[arg(long, help = "Sites directory (overrides FOLIO_SITES_ROOT)")]
        root: Option<PathBuf>,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Gateway { port, upstream } => {
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(upstream) = upstream {
                config.upstream_url = normalize_upstream_url(&upstream)?;
            }
            folio_cli::run_gateway(config).await
        }
        Commands::Content { port, root } => {
            let mut config = ContentConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(root) = root {
                config.sites_root = root;
            }
            folio_content::serve(config).await?;
            Ok(())
        }
    }
}
