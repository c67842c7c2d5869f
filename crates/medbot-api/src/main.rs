//! MedBot CLI and HTTP backend entry point.
//!
//! Binary name: `medbot`
//!
//! Parses CLI arguments, sets up tracing, loads `config.toml`, then either
//! starts the chat backend server, builds the document index, or runs one of
//! the client commands.

mod cli;
mod http;
mod state;

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::generate;

use medbot_infra::config::{load_config, load_config_file, resolve_data_dir};
use medbot_types::config::MedbotConfig;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,medbot=debug",
        _ => "trace",
    };
    medbot_observe::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need a config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "medbot", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = resolve_data_dir();
    let config = match &cli.config {
        Some(path) => load_config_file(path).await?,
        None => load_config(&data_dir).await,
    };

    let result = run(cli.command, config, data_dir).await;
    medbot_observe::shutdown_tracing();
    result
}

async fn run(command: Commands, mut config: MedbotConfig, data_dir: PathBuf) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config, &data_dir).await?;
        }

        Commands::Chat { endpoint } => {
            if let Some(endpoint) = endpoint {
                config.client.endpoint = endpoint;
            }
            cli::chat::loop_runner::run_chat_loop(&config.client).await?;
        }

        Commands::Check => {
            let state = AppState::init(config, &data_dir).await?;
            check_provider(&state).await?;
        }

        Commands::Index { dir } => {
            cli::index::index_documents(&dir, &config.retrieval, &data_dir).await?;
        }

        Commands::Format { file, page } => {
            cli::format::format_text(file.as_deref(), page, &config.client.avatar).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

async fn serve(config: MedbotConfig, data_dir: &Path) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::init(config, data_dir).await?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let grounding = if state.reply_service.has_retriever() {
        "document index"
    } else {
        "no document index"
    };
    println!(
        "  {} MedBot backend listening on {} ({}, {})",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan(),
        console::style(state.reply_service.provider_name()).dim(),
        console::style(grounding).dim()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let sweeper = state.spawn_session_sweeper();
    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    sweeper.abort();

    println!("\n  Server stopped.");
    Ok(())
}

async fn check_provider(state: &AppState) -> anyhow::Result<()> {
    let provider = state.reply_service.provider_name().to_string();
    match state.reply_service.check_connection().await {
        Ok(()) => {
            println!(
                "  {} {} answered",
                console::style("✓").green(),
                console::style(&provider).cyan()
            );
            Ok(())
        }
        Err(e) => {
            println!("  {} {}: {e}", console::style("✗").red(), provider);
            Err(e.into())
        }
    }
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
