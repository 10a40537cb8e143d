//! Command-line interface for the `helpdesk` binary.
//!
//! Every setting can come from a flag or its environment variable; flags win.
//! Running without a subcommand starts the server.

pub mod history;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::SecretString;

use helpdesk_infra::llm::openai::DEFAULT_BASE_URL;
use helpdesk_infra::sqlite::pool::default_database_url;

/// Customer-support chat backend.
#[derive(Parser)]
#[command(name = "helpdesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Host to bind to.
    #[arg(long, env = "HOST", global = true, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", global = true, default_value_t = 3000)]
    pub port: u16,

    /// SQLite database URL.
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Base URL of the OpenAI-compatible completion API.
    #[arg(long, env = "OPENAI_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub llm_base_url: String,

    /// TOML file with `[reply]` settings.
    #[arg(long, env = "HELPDESK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export trace spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// More log output (-v for debug, -vv for trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default).
    Serve,

    /// Print the stored history of a session.
    History {
        /// Session id returned by `POST /chat/message`.
        session_id: String,
    },
}

/// Settings needed to wire the application state.
pub struct RuntimeConfig {
    pub database_url: String,
    pub llm_base_url: String,
    pub api_key: Option<SecretString>,
    pub config_path: Option<PathBuf>,
}

impl Cli {
    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "info,helpdesk_api=debug,helpdesk_core=debug,helpdesk_infra=debug",
            _ => "trace",
        }
    }

    /// Resolve runtime settings. The API key is only read from the environment.
    pub fn runtime_config(&self) -> RuntimeConfig {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from);

        RuntimeConfig {
            database_url: self.database_url.clone().unwrap_or_else(default_database_url),
            llm_base_url: self.llm_base_url.clone(),
            api_key,
            config_path: self.config.clone(),
        }
    }
}
