//! Write starter configuration for a new deployment.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing jobclub...");

    let dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    write_file(config_path, DEFAULT_CONFIG, yes)?;
    write_file(&dir.join(".env.example"), ENV_EXAMPLE, yes)?;

    tracing::info!("Copy .env.example to .env and fill in the secrets.");
    tracing::info!("Run 'jobclub serve' to start the API server.");

    Ok(())
}

fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
        return Ok(());
    }

    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Job Club Configuration

[server]
host = "127.0.0.1"
port = 3000

# Pre-built site served for non-API paths
# static_dir = "dist"

[content]
# Content store API version
api_version = "2025-12-01"

# Read from the CDN host instead of the live API
use_cdn = false
"#;

const ENV_EXAMPLE: &str = r#"# Content store (required)
SANITY_PROJECT_ID=
SANITY_DATASET=production
SANITY_WRITE_TOKEN=

# Member tracking database (optional)
NOTION_API_KEY=
NOTION_DATABASE_ID=

# Chat webhook (optional)
DISCORD_WEBHOOK_URL=
DISCORD_INTRO_CHANNEL_ID=
"#;
