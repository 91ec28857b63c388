use std::net::SocketAddr;

use anyhow::Context;
use colored::Colorize;

use apimock_server::{ApimockServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli.options)?;
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cmd_serve(config).await,
        Command::Config => cmd_config(&config),
    }
}

async fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    println!(
        "{} apimock on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );
    ApimockServer::new(config).serve().await?;
    Ok(())
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    println!("{}", "# effective apimock configuration".dimmed());
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Start from the config file (or defaults) and apply every option that was
/// given on the command line or through the environment. Empty values count
/// as unset.
pub fn resolve_config(options: &ServerOptions) -> anyhow::Result<ServerConfig> {
    let mut config = match &options.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = non_empty(&options.host) {
        config.bind_addr = parse_bind_addr(host)?;
    }
    if let Some(content_type) = non_empty(&options.default_content_type) {
        config.default_content_type = content_type.to_string();
    }
    if let Some(content_type) = non_empty(&options.override_content_type) {
        config.override_content_type = Some(content_type.to_string());
    }
    if let Some(size) = options.max_body_size {
        config.max_body_size = size;
    }
    Ok(config)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Accepts a full socket address or a bare `:port`, which binds every
/// interface.
fn parse_bind_addr(host: &str) -> anyhow::Result<SocketAddr> {
    let full = match host.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => host.to_string(),
    };
    full.parse()
        .with_context(|| format!("invalid listen address {host:?}"))
}
