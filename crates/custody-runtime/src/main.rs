//! # custody-node
//!
//! Bootstraps one deployment from the environment and serves newline-delimited
//! JSON requests on stdin, writing one JSON response per line to stdout. Logs
//! go to stderr.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use custody_runtime::{Deployment, NonceStrategy, RequestHandler, RuntimeConfig};

fn init_tracing(fallback: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("invalid log filter {fallback:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("installing tracing subscriber")
}

fn main() -> Result<()> {
    // Load configuration
    let config = RuntimeConfig::from_env().context("loading configuration")?;
    init_tracing(&config.log_level)?;

    // Build the deployment
    let deployment = Deployment::launch(&config).context("bootstrapping deployment")?;
    let handler = RequestHandler::new(Arc::new(deployment), NonceStrategy::Sequential);
    info!(version = custody_runtime::VERSION, "custody-node serving on stdin");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("reading request")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handler.handle_line(&line).context("encoding response")?;
        writeln!(stdout, "{response}").context("writing response")?;
        stdout.flush().context("flushing response")?;
    }

    let stats = handler.stats();
    info!(
        processed = stats.processed,
        accepted = stats.accepted,
        rejected = stats.rejected,
        "input closed, shutting down"
    );
    Ok(())
}
