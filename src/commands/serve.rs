//! Search API server command.

use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::corpus::JsonCorpus;
use crate::metrics;
use crate::search::RankingEngine;
use crate::web::{AppState, WebServer};

/// Run the server command
///
/// Loads the course catalog once and serves it until Ctrl+C.
///
/// # Arguments
///
/// * `config` - Resolved configuration
/// * `root` - Project root that relative paths resolve against
/// * `host` - Bind host override
/// * `port` - Bind port override
/// * `corpus` - Catalog file override
pub async fn run(
    config: &Config,
    root: &Path,
    host: Option<String>,
    port: Option<u16>,
    corpus: Option<PathBuf>,
) -> Result<()> {
    let corpus_path = corpus.unwrap_or_else(|| config.corpus_path(root));
    info!("Loading course catalog from {}", corpus_path.display());

    let corpus = JsonCorpus::load(&corpus_path)?;
    metrics::CORPUS_RECORDS.set(corpus.len() as f64);

    let engine = Arc::new(
        RankingEngine::new(Arc::new(corpus)).with_max_results(config.search.max_results),
    );
    let state = AppState::new(engine, &config.search);

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let ip: IpAddr = host
        .parse()
        .with_context(|| format!("Invalid bind host: {}", host))?;
    let addr = SocketAddr::new(ip, port.unwrap_or(config.server.port));

    WebServer::new(state).start(addr).await
}
