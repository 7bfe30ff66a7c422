//! Codecell server CLI
//!
//! Serves the code studio: static entry page, code execution API, and the
//! AI assistant proxy.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codecell::{Config, EXAMPLE_CONFIG, Executor};
use codecell_server::{AppState, DEFAULT_MODEL, GeminiClient};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codecell")]
#[command(about = "A code studio server for running untrusted Python submissions")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (the default)
    Serve {
        /// Address to bind
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },

    /// Initialize a new configuration file
    Init {
        /// Output path (default: codecell.toml)
        #[arg(short, long, default_value = "codecell.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        info!(?path, "loading configuration");
        Config::from_file(path).context("failed to load configuration")?
    } else {
        debug!("using default configuration");
        Config::default()
    };

    match cli.command {
        Some(Commands::Init { output, force }) => init_config(&output, force).await,
        Some(Commands::Serve { bind }) => serve(config, bind).await,
        None => serve(config, "127.0.0.1:5000".parse()?).await,
    }
}

async fn serve(config: Config, bind: SocketAddr) -> Result<()> {
    // The credential is read once here and handed to the client at
    // construction; nothing else in the process sees it.
    let gemini = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => Some(Arc::new(GeminiClient::new(
            key,
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        ))),
        _ => {
            warn!("GEMINI_API_KEY is not set. AI functionality will not work.");
            None
        }
    };

    info!(
        interpreter = %config.interpreter_binary().display(),
        time_limit = config.time_limit,
        "starting executor"
    );
    let executor = Arc::new(Executor::new(config));

    let app = codecell_server::router(AppState { executor, gemini });

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!("listening on http://{bind}");

    axum::serve(listener, app).await.context("server failed")?;

    Ok(())
}

async fn init_config(output: &PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at '{}'. Use --force to overwrite.",
            output.display()
        );
    }

    tokio::fs::write(output, EXAMPLE_CONFIG)
        .await
        .context("failed to write configuration file")?;

    println!("Created configuration file at '{}'", output.display());
    Ok(())
}
