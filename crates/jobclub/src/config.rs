//! Configuration: `jobclub.toml` for server settings, environment for secrets.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use jobclub_api::{ApiServerConfig, AppState};
use jobclub_integrations::{
    DiscordConfig, DiscordWebhook, NotionClient, NotionConfig, SanityClient, SanityConfig,
};

/// Configuration file structure (jobclub.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub server: ServerSettings,
    pub content: ContentSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Pre-built site to serve alongside the API
    pub static_dir: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    pub api_version: String,
    pub use_cdn: bool,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            api_version: "2025-12-01".to_string(),
            use_cdn: false,
        }
    }
}

impl ConfigFile {
    /// Server settings with command-line overrides applied.
    pub fn server_config(
        &self,
        host: Option<String>,
        port: Option<u16>,
        static_dir: Option<PathBuf>,
    ) -> ApiServerConfig {
        ApiServerConfig {
            host: host.unwrap_or_else(|| self.server.host.clone()),
            port: port.unwrap_or(self.server.port),
            static_dir: static_dir.or_else(|| self.server.static_dir.as_ref().map(PathBuf::from)),
        }
    }
}

/// Load configuration from the given path if it exists.
/// Returns an error if the file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Connection settings for the three external systems.
#[derive(Debug)]
pub struct Integrations {
    pub sanity: SanityConfig,
    pub notion: Option<NotionConfig>,
    pub discord: Option<DiscordConfig>,
}

impl Integrations {
    /// Read secrets from the process environment.
    pub fn from_env(content: &ContentSettings) -> Result<Self> {
        Self::from_lookup(content, |key| std::env::var(key).ok())
    }

    /// Read secrets through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(content: &ContentSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let project_id = get("SANITY_PROJECT_ID").context("SANITY_PROJECT_ID must be set")?;

        let sanity = SanityConfig {
            project_id,
            dataset: get("SANITY_DATASET").unwrap_or_else(|| "production".to_string()),
            token: get("SANITY_WRITE_TOKEN"),
            api_version: content.api_version.clone(),
            use_cdn: content.use_cdn,
        };

        let notion = match (get("NOTION_API_KEY"), get("NOTION_DATABASE_ID")) {
            (Some(api_key), Some(database_id)) => Some(NotionConfig {
                api_key,
                database_id,
            }),
            _ => None,
        };

        let discord = get("DISCORD_WEBHOOK_URL").map(|webhook_url| DiscordConfig {
            webhook_url,
            intro_channel_id: get("DISCORD_INTRO_CHANNEL_ID"),
        });

        if sanity.token.is_none() {
            tracing::warn!("SANITY_WRITE_TOKEN not set; onboarding writes will be rejected");
        }

        Ok(Self {
            sanity,
            notion,
            discord,
        })
    }

    /// Build the shared clients.
    pub fn into_state(self) -> AppState {
        AppState::new(
            Arc::new(SanityClient::new(self.sanity)),
            Arc::new(NotionClient::new(self.notion)),
            Arc::new(DiscordWebhook::new(self.discord)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("jobclub.toml")).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.content.api_version, "2025-12-01");
    }

    #[test]
    fn reads_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobclub.toml");
        fs::write(&path, "[server]\nport = 8080\nstatic_dir = \"_site\"\n").unwrap();

        let config = load_config(&path).unwrap();
        let server = config.server_config(None, None, None);

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8080);
        assert_eq!(server.static_dir, Some(PathBuf::from("_site")));
    }

    #[test]
    fn cli_overrides_file() {
        let server = ConfigFile::default().server_config(Some("0.0.0.0".into()), Some(9000), None);

        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 9000);
    }

    #[test]
    fn rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobclub.toml");
        fs::write(&path, "[server\nport = ").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn requires_project_id() {
        let result = Integrations::from_lookup(&ContentSettings::default(), lookup(&[]));

        assert!(result.is_err());
    }

    #[test]
    fn optional_integrations_need_all_their_keys() {
        let integrations = Integrations::from_lookup(
            &ContentSettings::default(),
            lookup(&[
                ("SANITY_PROJECT_ID", "proj"),
                ("NOTION_API_KEY", "key"),
                ("NOTION_DATABASE_ID", ""),
                ("DISCORD_WEBHOOK_URL", "https://discord.example/webhook"),
            ]),
        )
        .unwrap();

        assert_eq!(integrations.sanity.dataset, "production");
        assert!(integrations.notion.is_none());
        let discord = integrations.discord.unwrap();
        assert_eq!(discord.webhook_url, "https://discord.example/webhook");
        assert_eq!(discord.intro_channel_id, None);
    }
}
