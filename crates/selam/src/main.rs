// SPDX-FileCopyrightText: 2026 Selam Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selam - a Tigrinya/English translate-augmented chat relay.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod memory;
mod serve;
mod shutdown;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use selam_config::{ConfigError, SelamConfig};

/// Selam - a Tigrinya/English translate-augmented chat relay.
#[derive(Parser, Debug)]
#[command(name = "selam", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Send one message through the pipeline and print the reply.
    Chat {
        message: String,
        /// Language code for the reply (defaults to pipeline.default_reply_lang).
        #[arg(long)]
        reply_lang: Option<String>,
    },
    /// Translate text and print the result with a browser link.
    Translate {
        text: String,
        #[arg(long)]
        reply_lang: Option<String>,
    },
}

fn load_config(path: Option<&Path>) -> Result<SelamConfig, Vec<ConfigError>> {
    match path {
        Some(path) => selam_config::load_and_validate_path(path),
        None => selam_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            selam_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Chat {
            message,
            reply_lang,
        }) => commands::run_chat(&config, message, reply_lang).await,
        Some(Commands::Translate { text, reply_lang }) => {
            commands::run_translate(&config, text, reply_lang).await
        }
        None => {
            println!("selam: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn chat_subcommand_parses_reply_lang() {
        let cli = Cli::parse_from(["selam", "chat", "ሰላም", "--reply-lang", "en"]);
        match cli.command {
            Some(Commands::Chat {
                message,
                reply_lang,
            }) => {
                assert_eq!(message, "ሰላም");
                assert_eq!(reply_lang.as_deref(), Some("en"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["selam", "serve", "--config", "/tmp/selam.toml"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/selam.toml")));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selam.toml");
        std::fs::write(&path, "[server]\nport = 8088\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    fn invalid_config_file_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selam.toml");
        std::fs::write(&path, "[server]\nprot = 8088\n").unwrap();

        let errors = load_config(Some(&path)).unwrap_err();
        assert!(!errors.is_empty());
    }
}
