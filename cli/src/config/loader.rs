//! Simple CLI configuration loader for pagenav
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./pagenav.json or ./.pagenav/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/pagenav/config.json or the platform config dir
//! 4. Built-in defaults (no files)

use crate::app::pages::DASHBOARD_PAGE;
use anyhow::{anyhow, Context, Result};
use pagenav_core::NavigatorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "pagenav.json";

/// File name of the JSON record store when none is configured
pub const DEFAULT_STORE_FILE: &str = "library.json";

/// Navigator options as written in the config file. Missing fields keep the
/// shell defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorSection {
    #[serde(alias = "content_area")]
    pub content_area: Option<String>,
    #[serde(alias = "landing_page")]
    pub landing_page: Option<String>,
    #[serde(alias = "base_template_path")]
    pub base_template_path: Option<String>,
    #[serde(alias = "link_attribute")]
    pub link_attribute: Option<String>,
    #[serde(alias = "record_id_attribute")]
    pub record_id_attribute: Option<String>,
    #[serde(alias = "group_attribute")]
    pub group_attribute: Option<String>,
}

impl NavigatorSection {
    /// Overlay the fields that are set onto `base`
    pub fn apply(self, mut base: NavigatorConfig) -> NavigatorConfig {
        if let Some(value) = self.content_area {
            base.content_area = value;
        }
        if let Some(value) = self.landing_page {
            base.landing_page = value;
        }
        if let Some(value) = self.base_template_path {
            base.base_template_path = value;
        }
        if let Some(value) = self.link_attribute {
            base.link_attribute = value;
        }
        if let Some(value) = self.record_id_attribute {
            base.record_id_attribute = value;
        }
        if let Some(value) = self.group_attribute {
            base.group_attribute = value;
        }
        base
    }
}

/// Where external templates come from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesSection {
    /// Directory templates are resolved against
    pub root: Option<String>,
    /// Base URL for fetching templates over HTTP; wins over `root`
    #[serde(alias = "base_url")]
    pub base_url: Option<String>,
}

/// Record store location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    /// Path of the JSON store file
    pub path: Option<String>,
}

/// Raw configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub navigator: NavigatorSection,
    #[serde(default)]
    pub templates: TemplatesSection,
    #[serde(default)]
    pub storage: StorageSection,
}

/// Resolved template source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Read templates from a directory
    Directory(PathBuf),
    /// Fetch templates relative to a base URL
    Http(String),
}

impl TemplateSource {
    /// Interpret a `--templates` value: URLs fetch over HTTP, anything else is
    /// a directory
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Http(value.to_string())
        } else {
            Self::Directory(expand_path(value))
        }
    }
}

/// Fully resolved shell configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub navigator: NavigatorConfig,
    pub templates: TemplateSource,
    pub store_path: PathBuf,
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Navigator defaults for the game collection shell
pub fn shell_navigator_config() -> NavigatorConfig {
    NavigatorConfig::default().with_landing_page(DASHBOARD_PAGE)
}

/// Default location of the record store
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("pagenav").join(DEFAULT_STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
}

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    landing_page_override: Option<String>,
    store_override: Option<PathBuf>,
    templates_override: Option<String>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            landing_page_override: None,
            store_override: None,
            templates_override: None,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set landing page override
    pub fn with_landing_page_override(mut self, key: String) -> Self {
        self.landing_page_override = Some(key);
        self
    }

    /// Set record store override
    pub fn with_store_override(mut self, path: PathBuf) -> Self {
        self.store_override = Some(path);
        self
    }

    /// Set template source override
    pub fn with_templates_override(mut self, templates: String) -> Self {
        self.templates_override = Some(templates);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ResolvedConfig> {
        // Step 1: Find and load base configuration
        let (config, source) = if let Some(override_path) = &self.config_override {
            let (config, file) = self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?;
            (config, Some(file))
        } else {
            self.search_and_load().await?
        };

        match &source {
            Some(path) => debug!("Using config file: {}", path.display()),
            None => debug!("No config file found, using defaults"),
        }

        // Step 2: Resolve and apply flag overrides
        let mut resolved = self.resolve_config(config, source)?;

        if let Some(landing_page) = &self.landing_page_override {
            resolved.navigator.landing_page = landing_page.clone();
        }
        if let Some(store) = &self.store_override {
            resolved.store_path = store.clone();
        }
        if let Some(templates) = &self.templates_override {
            resolved.templates = TemplateSource::parse(templates);
        }

        resolved
            .navigator
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(resolved)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<(RawConfig, Option<PathBuf>)> {
        // 1. Current working directory
        if let Some(found) = self.try_load_cwd().await? {
            return Ok(found);
        }

        // 2. XDG config directory
        if let Some(found) = self.try_load_xdg().await? {
            return Ok(found);
        }

        // 3. Defaults only
        Ok((RawConfig::default(), None))
    }

    /// Try loading from current working directory
    async fn try_load_cwd(&self) -> Result<Option<(RawConfig, Option<PathBuf>)>> {
        let cwd = std::env::current_dir()?;

        // Try ./pagenav.json first
        let pagenav_json = cwd.join(CONFIG_FILE_NAME);
        if pagenav_json.exists() {
            let config = self.load_file(&pagenav_json).await?;
            return Ok(Some((config, Some(pagenav_json))));
        }

        // Try ./.pagenav/config.json
        let pagenav_dir_config = cwd.join(".pagenav").join("config.json");
        if pagenav_dir_config.exists() {
            let config = self.load_file(&pagenav_dir_config).await?;
            return Ok(Some((config, Some(pagenav_dir_config))));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<(RawConfig, Option<PathBuf>)>> {
        if let Some(config_dir) = self.get_xdg_config_dir() {
            let config_path = config_dir.join("pagenav").join("config.json");
            if config_path.exists() {
                let config = self.load_file(&config_path).await?;
                return Ok(Some((config, Some(config_path))));
            }
        }
        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<(RawConfig, PathBuf)> {
        if path.is_file() {
            Ok((self.load_file(path).await?, path.to_path_buf()))
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                let config = self.load_file(&config_file).await?;
                Ok((config, config_file))
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get XDG config directory
    fn get_xdg_config_dir(&self) -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
    }

    /// Resolve raw config against the shell defaults
    fn resolve_config(&self, config: RawConfig, source: Option<PathBuf>) -> Result<ResolvedConfig> {
        let navigator = config.navigator.apply(shell_navigator_config());

        let templates = match (config.templates.base_url, config.templates.root) {
            (Some(base_url), _) => TemplateSource::Http(base_url),
            (None, Some(root)) => TemplateSource::Directory(expand_path(&root)),
            (None, None) => TemplateSource::Directory(PathBuf::from(".")),
        };

        let store_path = config
            .storage
            .path
            .as_deref()
            .map(expand_path)
            .unwrap_or_else(default_store_path);

        Ok(ResolvedConfig {
            navigator,
            templates,
            store_path,
            source,
        })
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
