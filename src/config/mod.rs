use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::api::DEFAULT_ENDPOINT;
use crate::form::{ParameterEntry, ParameterSet};

pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_LOG_FILE: &str = "./cbuild.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub theme: String,
    /// Initial form profile; its keys are the form's fields for the whole session.
    pub parameters: ParameterSet,
    pub project_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme: DEFAULT_THEME.to_string(),
            parameters: ParameterSet::default_profile(),
            project_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub theme: Option<String>,
    pub parameters: Option<Vec<ParameterEntry>>,
}

/// Values that come from the command line and environment, already resolved.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub theme: Option<String>,
}

impl AppConfig {
    pub fn from_cli(cli: &crate::Cli) -> Result<Self> {
        let project_root = std::env::current_dir().context("resolve current dir")?;

        let project_cfg = load_project_config(&project_root).unwrap_or_default();
        let file_cfg = load_file_config().unwrap_or_default();

        let overrides = Overrides {
            endpoint: cli
                .endpoint
                .clone()
                .or_else(|| std::env::var("CBUILD_ENDPOINT").ok()),
            theme: cli.theme.clone(),
        };

        Ok(Self::merge(overrides, project_cfg, file_cfg, project_root))
    }

    /// Precedence: overrides, then project config, then global config, then defaults.
    pub fn merge(
        overrides: Overrides,
        project_cfg: FileConfig,
        file_cfg: FileConfig,
        project_root: PathBuf,
    ) -> Self {
        let endpoint = overrides
            .endpoint
            .or(project_cfg.endpoint)
            .or(file_cfg.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let theme = overrides
            .theme
            .or(project_cfg.theme)
            .or(file_cfg.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        // A profile replaces the built-in one as a whole; entries are not merged
        // across files so the field order stays the one written by the user.
        let parameters = match project_cfg.parameters.or(file_cfg.parameters) {
            Some(entries) if !entries.is_empty() => ParameterSet::from_entries(entries),
            Some(_) => {
                warn!("configured parameter profile is empty; using built-in profile");
                ParameterSet::default_profile()
            }
            None => ParameterSet::default_profile(),
        };

        Self {
            endpoint,
            theme,
            parameters,
            project_root,
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Ok(p) = std::env::var("CBUILD_CONFIG") {
        v.push(PathBuf::from(p));
    }
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        v.push(Path::new(&xdg_home).join("cbuild/config.toml"));
    } else if let Some(home) = dirs::home_dir() {
        v.push(home.join(".config/cbuild/config.toml"));
    }
    v
}

pub fn load_file_config() -> Result<FileConfig> {
    for p in candidate_paths() {
        if p.exists() {
            let s = fs::read_to_string(&p)
                .with_context(|| format!("read config file: {}", p.display()))?;
            match toml::from_str::<FileConfig>(&s) {
                Ok(cfg) => {
                    info!(path=%p.display(), "loaded config file");
                    return Ok(cfg);
                }
                Err(e) => {
                    warn!(path=%p.display(), error=%e.to_string(), "parse config failed");
                    continue;
                }
            }
        }
    }
    Ok(FileConfig::default())
}

/// Load project-specific configuration from .cbuild/config.toml
pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    let project_config_path = project_root.join(".cbuild").join("config.toml");

    if project_config_path.exists() {
        let s = fs::read_to_string(&project_config_path).with_context(|| {
            format!(
                "read project config file: {}",
                project_config_path.display()
            )
        })?;
        match toml::from_str::<FileConfig>(&s) {
            Ok(cfg) => {
                info!(path=%project_config_path.display(), "loaded project config file");
                Ok(cfg)
            }
            Err(e) => {
                warn!(path=%project_config_path.display(), error=%e.to_string(), "parse project config failed");
                Ok(FileConfig::default())
            }
        }
    } else {
        Ok(FileConfig::default())
    }
}
