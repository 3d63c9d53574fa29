//! API server command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use jobclub_api::ApiServer;

use crate::config::{load_config, Integrations};

/// Run the serve command.
pub async fn run(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let server_config = config.server_config(host, port, static_dir);

    if let Some(dir) = &server_config.static_dir {
        if !dir.exists() {
            anyhow::bail!(
                "Directory not found: {}. Build the site first or drop --static-dir.",
                dir.display()
            );
        }
    }

    let integrations = Integrations::from_env(&config.content)?;
    tracing::debug!(
        "Content store project {} ({})",
        integrations.sanity.project_id,
        integrations.sanity.dataset
    );

    let server = ApiServer::new(server_config, integrations.into_state());
    server.start().await.context("API server failed")?;

    Ok(())
}
