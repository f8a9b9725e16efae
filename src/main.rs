use anyhow::Context;
use clap::Parser;
use mdocs_mcp::config::{Config, DEFAULT_CONFIG_FILE};
use mdocs_mcp::error::Result;
use mdocs_mcp::server::DocsServer;
use rmcp::{ServiceExt, transport::stdio};
use std::borrow::Cow;
use std::path::PathBuf;

/// Serve a Markdown documentation tree to AI agents over MCP (stdio)
#[derive(Parser, Debug)]
#[command(name = "mdocs-mcp", version, about)]
struct Args {
    /// Path to the config file; `docs` inside it is resolved relative to this file
    #[arg(long, short = 'c', env = "MDOCS_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Enable debug logging (outputs to stderr)
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Expands a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    mdocs_mcp::tracing::init(args.verbose);

    let config_path = PathBuf::from(expand_tilde(&args.config).as_ref());
    let config = Config::load(&config_path)?;
    let root = config
        .doc_root(&config_path)
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
    let walk_cache = config.walk_cache_policy()?;

    tracing::info!(
        "Starting mdocs-mcp for {} ({}), walk cache {:?}",
        root.relative_path(),
        root.absolute_path().display(),
        walk_cache
    );

    let server = DocsServer::new(root, config.response_format, walk_cache);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
