use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apimock",
    about = "apimock: a mock REST backend that serves back whatever it was sent",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub options: ServerOptions,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the mock server (the default)
    Serve,
    /// Print the effective configuration as TOML
    Config,
}

/// Settings layered over the configuration file. Each one can also come
/// from the environment.
#[derive(Args, Clone, Debug, Default)]
pub struct ServerOptions {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "APIMOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. `0.0.0.0:8080` or `:8080`
    #[arg(long, global = true, env = "HOST")]
    pub host: Option<String>,

    /// Content type stored when a request has none
    #[arg(long, global = true, env = "DEFAULT_CONTENT_TYPE")]
    pub default_content_type: Option<String>,

    /// Content type stored for every request
    #[arg(long, global = true, env = "OVERRIDE_CONTENT_TYPE")]
    pub override_content_type: Option<String>,

    /// Largest accepted request body, in bytes
    #[arg(long, global = true, env = "MAX_BODY_SIZE")]
    pub max_body_size: Option<usize>,
}
