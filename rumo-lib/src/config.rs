use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, fs::config_dir, revenue::Costs};

const FILE_NAME: &str = "rumo.toml";

/// Handle to the shared core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The core configuration, serialized to TOML.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub endpoints: Endpoints,
    /// Costs a new record starts with
    pub cost_defaults: Costs,
}

/// Where the automation webhook lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub list_open: String,
    pub submit: String,
    /// Optional client-side timeout. The transport default applies when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            list_open: "https://ron8n.myrvm.com.br/webhook/receitas-aberto".into(),
            submit: "https://ron8n.myrvm.com.br/webhook/entrada-receita".into(),
            timeout_secs: None,
        }
    }
}

impl Endpoints {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl CoreConfig {
    /// Load the configuration from the user's config directory, writing the defaults
    /// there first if no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load the configuration from a specific file, creating it with defaults if it
    /// doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            debug!("No configuration at {}, writing defaults", path.display());
            let cfg = Self::default();
            cfg.save_to(path)?;
            Ok(cfg)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }

    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }
}
