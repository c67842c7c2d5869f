//! CLI command definitions for the `medbot` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod format;
pub mod index;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Medical chat assistant: backend server and terminal client.
#[derive(Parser)]
#[command(name = "medbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (defaults to ~/.medbot/config.toml).
    #[arg(long, global = true, env = "MEDBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat backend (`POST /get`).
    Serve {
        /// Host to bind to.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with a running backend from the terminal.
    Chat {
        /// Reply endpoint URL (e.g. http://127.0.0.1:8080/get).
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Send a one-line completion to the configured LLM provider.
    Check,

    /// Chunk, embed and store the `.txt`/`.md` documents in a directory.
    Index {
        /// Directory holding the reference documents.
        dir: PathBuf,
    },

    /// Render reply text as chat HTML.
    Format {
        /// File to read (stdin when omitted).
        file: Option<PathBuf>,

        /// Print the whole chat box with the text as one bot message.
        #[arg(long)]
        page: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["medbot", "serve", "--host", "127.0.0.1", "-p", "5005"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(5005));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_format_page_and_verbosity() {
        let cli = Cli::try_parse_from(["medbot", "-vv", "format", "--page", "reply.txt"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Format { file, page } => {
                assert!(page);
                assert_eq!(file, Some(PathBuf::from("reply.txt")));
            }
            _ => panic!("expected format"),
        }
    }

    #[test]
    fn test_parse_index_dir() {
        let cli = Cli::try_parse_from(["medbot", "index", "Data"]).unwrap();
        match cli.command {
            Commands::Index { dir } => assert_eq!(dir, PathBuf::from("Data")),
            _ => panic!("expected index"),
        }
        assert!(Cli::try_parse_from(["medbot", "index"]).is_err());
    }
}
