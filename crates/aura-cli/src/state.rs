//! Application state shared by the CLI commands.
//!
//! AppState holds the effective client configuration: `config.toml` from the
//! data directory with command-line overrides applied on top.

use std::path::PathBuf;

use aura_infra::config::{load_client_config, resolve_data_dir};
use aura_types::config::{ClientConfig, SendOrdering};

/// Values from global CLI flags that take precedence over `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub clinic_id: Option<String>,
    pub send_ordering: Option<SendOrdering>,
    pub timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut ClientConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(clinic_id) = self.clinic_id {
            config.clinic_id = clinic_id;
        }
        if let Some(ordering) = self.send_ordering {
            config.send_ordering = ordering;
        }
        if let Some(timeout) = self.timeout_secs {
            config.request_timeout_secs = Some(timeout);
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, and apply overrides.
    pub async fn init(overrides: ConfigOverrides) -> Self {
        let data_dir = resolve_data_dir();
        let mut config = load_client_config(&data_dir).await;
        overrides.apply(&mut config);
        tracing::debug!(base_url = %config.base_url, clinic_id = %config.clinic_id, "Configuration loaded");
        Self { config, data_dir }
    }
}
