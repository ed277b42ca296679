//! Global eventdesk configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, EventDeskError};
use crate::ids::Id;
use crate::validate::FormDefaults;

static DEFAULT_API_URL: &str = "http://localhost:3000";
static DEFAULT_SESSION_DIR: &str = "~/.local/share/eventdesk/session";
const DEFAULT_FALLBACK_CATEGORY_ID: u64 = 4;
const DEFAULT_FALLBACK_CREATOR_ID: u64 = 1;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_session_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SESSION_DIR)
}

fn default_fallback_category_id() -> Id {
    Id::from(DEFAULT_FALLBACK_CATEGORY_ID)
}

fn default_fallback_creator_id() -> Id {
    Id::from(DEFAULT_FALLBACK_CREATOR_ID)
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Configuration at ~/.config/eventdesk/config.toml
///
/// Every key can be overridden with an `EVENTDESK_<KEY>` environment
/// variable, e.g. `EVENTDESK_API_URL`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventDeskConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,

    /// Category given to events created without one.
    #[serde(default = "default_fallback_category_id")]
    pub fallback_category_id: Id,

    /// Creator recorded when no user is selected.
    #[serde(default = "default_fallback_creator_id")]
    pub fallback_creator_id: Id,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EventDeskConfig {
    fn default() -> Self {
        EventDeskConfig {
            api_url: default_api_url(),
            session_dir: default_session_dir(),
            fallback_category_id: default_fallback_category_id(),
            fallback_creator_id: default_fallback_creator_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EventDeskConfig {
    pub fn config_path() -> CoreResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventDeskError::Config("Could not determine config directory".into()))?
            .join("eventdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template first
    /// if none exists.
    pub fn load() -> CoreResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CoreResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVENTDESK"))
            .build()
            .map_err(|e| EventDeskError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventDeskError::Config(e.to_string()))
    }

    /// Session directory with `~` expanded.
    pub fn session_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.session_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            fallback_category_id: self.fallback_category_id.clone(),
            fallback_creator_id: self.fallback_creator_id.clone(),
        }
    }

    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EventDeskError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| EventDeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CoreResult<()> {
        let contents = format!(
            "\
# eventdesk configuration

# REST backend serving /events, /categories and /users:
# api_url = \"{}\"

# Where the selected user and cached users list are kept:
# session_dir = \"{}\"

# Category for events created without one:
# fallback_category_id = {}

# Creator recorded when no user is selected:
# fallback_creator_id = {}

# Seconds before a request to the backend is abandoned:
# request_timeout_secs = {}
",
            DEFAULT_API_URL,
            DEFAULT_SESSION_DIR,
            DEFAULT_FALLBACK_CATEGORY_ID,
            DEFAULT_FALLBACK_CREATOR_ID,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventDeskError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventDeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
