use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dream-accountctl", version)]
#[command(about = "Register, log in and probe a Dream account server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub server: ServerArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// Account server base URL (overrides config and DREAM_ACCOUNT_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout, e.g. "10s" or "1m 30s"
    #[arg(long, global = true)]
    pub timeout: Option<String>,

    /// TOML config file (defaults to ./dream-account.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account
    Register(CredentialArgs),
    /// Log in and print the issued token
    Login {
        #[command(flatten)]
        credentials: CredentialArgs,

        /// Validate the new token against the auth endpoint afterwards
        #[arg(long)]
        authenticate: bool,
    },
    /// Measure round-trip latency to the server
    Ping {
        /// URL to probe (defaults to the base URL)
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    /// Account name
    #[arg(long)]
    pub name: String,

    /// Account password
    #[arg(long, env = "DREAM_ACCOUNT_PASSWORD", hide_env_values = true)]
    pub password: String,
}
