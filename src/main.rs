use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use regmap::{
    AnthropicClient, AnthropicConfig, AppState, Catalog, LlmRewriter, build_report,
    parse_catalog_file, run_pipeline, write_human_readable, write_report,
};

#[derive(Parser)]
#[command(name = "regmap")]
#[command(author, version, about = "Regulation-to-policy compliance mapping pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map a regulation against the policy catalog and report changed policies
    Map {
        /// Regulation identifier (e.g., reg-001)
        #[arg(short, long)]
        reg_id: String,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Output file for a human-readable report (text)
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Catalog file (JSON) to use instead of the built-in tables
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Model to use for rewrites
        #[arg(long)]
        model: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the regulation and policy tables without calling the model
    Catalog {
        /// Catalog file (JSON) to use instead of the built-in tables
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Serve the web presentation layer
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Catalog file (JSON) to use instead of the built-in tables
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Model to use for rewrites
        #[arg(long)]
        model: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Map {
            reg_id,
            output,
            human_readable,
            catalog,
            model,
            verbose,
        } => {
            setup_logging(verbose);
            map_regulation(reg_id, output, human_readable, catalog, model).await
        }
        Commands::Catalog { catalog } => {
            setup_logging(false);
            show_catalog(catalog)
        }
        Commands::Serve {
            addr,
            catalog,
            model,
            verbose,
        } => {
            setup_logging(verbose);
            serve(addr, catalog, model).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    match path {
        Some(path) => {
            info!("Loading catalog from {:?}", path);
            parse_catalog_file(&path).context("Failed to load catalog")
        }
        None => Ok(Catalog::builtin()),
    }
}

fn build_client(model: Option<String>) -> Result<AnthropicClient> {
    let mut config = AnthropicConfig::from_env()?;
    if let Some(model) = model {
        config.model = model;
    }
    Ok(AnthropicClient::new(config))
}

async fn map_regulation(
    reg_id: String,
    output: PathBuf,
    human_readable: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    model: Option<String>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let client = build_client(model)?;
    let rewriter = LlmRewriter::new(&client);

    let (regulation_text, mapped) = run_pipeline(&catalog, &rewriter, &reg_id).await?;

    if regulation_text.is_empty() {
        warn!("Unknown regulation id {:?}; writing an empty report", reg_id);
    }

    let report = build_report(&catalog, &reg_id, regulation_text, mapped, client.model());

    write_report(&report, &output)?;
    info!("Report written to {:?}", output);

    if let Some(path) = human_readable {
        write_human_readable(&report, &path)?;
        info!("Human-readable report written to {:?}", path);
    }

    info!(
        "Complete: {} of {} policies changed",
        report.metadata.policies_changed, report.metadata.policies_considered
    );

    Ok(())
}

fn show_catalog(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    println!("Regulations");
    println!("===========");
    for regulation in catalog.regulations() {
        println!("{}: {}", regulation.id, regulation.text);
        println!();
    }

    println!("Policies");
    println!("========");
    for policy in catalog.list_policies() {
        println!("{} ({})", policy.title, policy.id);
        println!("  {}", policy.text);
        println!();
    }

    Ok(())
}

async fn serve(
    addr: SocketAddr,
    catalog_path: Option<PathBuf>,
    model: Option<String>,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let client = build_client(model)?;

    let state = AppState {
        catalog: Arc::new(catalog),
        client: Arc::new(client),
    };

    regmap::serve(state, addr).await
}
