//! Client configuration loader for AURA.
//!
//! Reads `config.toml` from the data directory (`~/.aura/` by default) and
//! deserializes it into [`ClientConfig`]. The lenient loader falls back to
//! defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use aura_types::config::ClientConfig;
use aura_types::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `AURA_DATA_DIR` environment variable
/// 2. `~/.aura`
/// 3. `.aura` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("AURA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".aura");
    }

    PathBuf::from(".aura")
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Strictly read `{data_dir}/config.toml`.
///
/// A missing file is not an error and yields `Ok(None)`.
pub async fn read_client_config(data_dir: &Path) -> Result<Option<ClientConfig>, ConfigError> {
    let path = config_path(data_dir);

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str::<ClientConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file cannot be read or parsed, logs a warning and returns the default.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    match read_client_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!(
                "No config.toml found in {}, using defaults",
                data_dir.display()
            );
            ClientConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ClientConfig::default()
        }
    }
}
