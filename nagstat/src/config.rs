//! Tool settings for nagsrv.
//!
//! Settings file resolution order:
//! 1. Explicit path passed to Settings::load_from()
//! 2. NAGSRV_CONFIG environment variable
//! 3. Default: platform config dir (e.g. ~/.config/nagsrv/config.toml)
//!
//! File locations are then resolved per lookup as CLI flag, then settings,
//! then the daemon's `nagios.cfg`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nagios_cfg::NagiosConfig;
use crate::{Error, Result};

/// Environment variable pointing at the settings file.
pub const SETTINGS_VAR: &str = "NAGSRV_CONFIG";

/// nagsrv settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to the daemon's main config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nagios_cfg: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_cache_file: Option<PathBuf>,

    /// Author recorded on acknowledgements and comments.
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_author() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "nagsrv".to_string())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nagios_cfg: None,
            status_file: None,
            command_file: None,
            object_cache_file: None,
            author: default_author(),
        }
    }
}

/// Files nagsrv needs to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Status,
    Command,
    ObjectCache,
}

impl FileKind {
    /// Key naming this file in `nagios.cfg`.
    pub fn nagios_key(self) -> &'static str {
        match self {
            FileKind::Status => "status_file",
            FileKind::Command => "command_file",
            FileKind::ObjectCache => "object_cache_file",
        }
    }
}

impl Settings {
    /// Load settings from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        match resolve_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to a file, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn configured(&self, kind: FileKind) -> Option<&Path> {
        match kind {
            FileKind::Status => self.status_file.as_deref(),
            FileKind::Command => self.command_file.as_deref(),
            FileKind::ObjectCache => self.object_cache_file.as_deref(),
        }
    }

    /// The daemon config: `override_path`, else `nagios_cfg`, else discovery.
    pub fn nagios_config(&self, override_path: Option<&Path>) -> Result<NagiosConfig> {
        match override_path.or(self.nagios_cfg.as_deref()) {
            Some(path) => NagiosConfig::load(path),
            None => NagiosConfig::discover(),
        }
    }

    /// Locate a file: `flag`, else settings, else `nagios.cfg`.
    ///
    /// `nagios.cfg` is only read when the first two are unset.
    pub fn resolve(&self, kind: FileKind, flag: Option<&Path>, nagios_cfg: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = flag.or(self.configured(kind)) {
            return Ok(path.to_path_buf());
        }
        let cfg = self.nagios_config(nagios_cfg)?;
        cfg.get(kind.nagios_key()).map(PathBuf::from).ok_or_else(|| {
            let origin = cfg
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "nagios.cfg".to_string());
            Error::Config(format!("{} does not set {}", origin, kind.nagios_key()))
        })
    }
}

/// Resolve the settings file path using the standard resolution order.
fn resolve_settings_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_VAR) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("", "", "nagsrv").map(|dirs| dirs.config_dir().join("config.toml"))
}
