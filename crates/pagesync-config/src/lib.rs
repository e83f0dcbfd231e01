//! Configuration management for pagesync.
//!
//! Parses `pagesync.toml` with serde and discovers the file in the current
//! directory or any of its parents. CLI settings are applied on top of the
//! loaded values via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `confluence.base_url`
//! - `confluence.token`
//! - `confluence.username`
//! - `confluence.password`
//! - `upload.space`
//! - `upload.parent_id`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "pagesync.toml";

/// Default change message attached to page versions.
const DEFAULT_CHANGE_MESSAGE: &str = "Automated upload by pagesync";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override target space key.
    pub space: Option<String>,
    /// Override root parent page id.
    pub parent_id: Option<String>,
    /// Override version change message.
    pub change_message: Option<String>,
    /// Override watcher notification flag.
    pub notify_watchers: Option<bool>,
    /// Override change detection strategy.
    pub change_detector: Option<ChangeDetectorKind>,
    /// Override orphan cleanup policy.
    pub remove_orphans: Option<OrphanPolicy>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Confluence connection (optional until a command needs it).
    pub confluence: Option<ConfluenceConfig>,
    /// Upload behaviour.
    pub upload: UploadSettings,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence connection configuration.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence server base URL.
    pub base_url: String,
    /// Personal access token (bearer auth).
    #[serde(default)]
    pub token: Option<String>,
    /// Username for basic auth.
    #[serde(default)]
    pub username: Option<String>,
    /// Password for basic auth.
    #[serde(default)]
    pub password: Option<String>,
    /// Disable TLS certificate verification.
    #[serde(default)]
    pub skip_ssl: bool,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ConfluenceConfig {
    /// Validate that the connection settings are usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or inconsistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "confluence.base_url")?;
        require_http_url(&self.base_url, "confluence.base_url")?;
        if let Some(token) = &self.token {
            require_non_empty(token, "confluence.token")?;
        }
        match (&self.username, &self.password) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(ConfigError::Validation(
                    "confluence.username and confluence.password must be set together".to_owned(),
                ));
            }
            (Some(username), Some(_)) => require_non_empty(username, "confluence.username")?,
            (None, None) => {}
        }
        if self.token.is_some() && self.username.is_some() {
            return Err(ConfigError::Validation(
                "confluence.token cannot be combined with username/password".to_owned(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "confluence.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Upload behaviour configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Target space key.
    pub space: Option<String>,
    /// Id of the page new top-level pages are filed under.
    pub parent_id: Option<String>,
    /// Version comment for created and updated pages. Empty sends none.
    pub change_message: String,
    /// Whether page watchers get notified (non-minor edit).
    pub notify_watchers: bool,
    /// How page changes are detected.
    pub change_detector: ChangeDetectorKind,
    /// Editor format marker written on page creation.
    pub editor_version: EditorVersion,
    /// What to do with remote child pages no longer in the source tree.
    pub remove_orphans: OrphanPolicy,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            space: None,
            parent_id: None,
            change_message: DEFAULT_CHANGE_MESSAGE.to_owned(),
            notify_watchers: false,
            change_detector: ChangeDetectorKind::default(),
            editor_version: EditorVersion::default(),
            remove_orphans: OrphanPolicy::default(),
        }
    }
}

/// Change detection strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDetectorKind {
    /// Compare the stored `contenthash` page property.
    #[default]
    Hash,
    /// Compare the remote storage-format body.
    Content,
}

/// Confluence editor generation the uploaded markup targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorVersion {
    /// Legacy editor.
    V1,
    /// Fabric editor.
    #[default]
    V2,
}

impl EditorVersion {
    /// Value stored in the `editor` page property.
    #[must_use]
    pub fn property_value(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

/// Cleanup policy for remote pages missing from the source tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave orphans alone.
    #[default]
    None,
    /// Delete orphans that were published by pagesync.
    Managed,
    /// Delete every orphan.
    All,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`confluence.token`").
        field: String,
        /// Error message (e.g., "${`CONFLUENCE_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `pagesync.toml` in the current directory and its parents, falling
    /// back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let upload = &mut self.upload;
        if let Some(space) = &settings.space {
            upload.space = Some(space.clone());
        }
        if let Some(parent_id) = &settings.parent_id {
            upload.parent_id = Some(parent_id.clone());
        }
        if let Some(message) = &settings.change_message {
            upload.change_message.clone_from(message);
        }
        if let Some(notify) = settings.notify_watchers {
            upload.notify_watchers = notify;
        }
        if let Some(detector) = settings.change_detector {
            upload.change_detector = detector;
        }
        if let Some(policy) = settings.remove_orphans {
            upload.remove_orphans = policy;
        }
    }

    /// Get validated Confluence configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_confluence(&self) -> Result<&ConfluenceConfig, ConfigError> {
        let conf = self.confluence.as_ref().ok_or_else(|| {
            ConfigError::Validation("[confluence] section required in config".into())
        })?;
        conf.validate()?;
        Ok(conf)
    }

    /// Get the target space key and root parent id for an upload.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if either value is missing or empty.
    pub fn require_upload_target(&self) -> Result<(&str, &str), ConfigError> {
        let space = self.upload.space.as_deref().ok_or_else(|| {
            ConfigError::Validation("upload.space required (via --space or config)".into())
        })?;
        let parent_id = self.upload.parent_id.as_deref().ok_or_else(|| {
            ConfigError::Validation("upload.parent_id required (via --parent-id or config)".into())
        })?;
        require_non_empty(space, "upload.space")?;
        require_non_empty(parent_id, "upload.parent_id")?;
        Ok((space, parent_id))
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate values that are checked eagerly on load.
    ///
    /// The `[confluence]` section is validated lazily by
    /// [`Config::require_confluence`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(space) = &self.upload.space {
            require_non_empty(space, "upload.space")?;
        }
        if let Some(parent_id) = &self.upload.parent_id {
            require_non_empty(parent_id, "upload.parent_id")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.upload.space, "upload.space")?;
        expand::expand_opt(&mut self.upload.parent_id, "upload.parent_id")?;

        if let Some(ref mut confluence) = self.confluence {
            confluence.base_url = expand::expand_env(&confluence.base_url, "confluence.base_url")?;
            expand::expand_opt(&mut confluence.token, "confluence.token")?;
            expand::expand_opt(&mut confluence.username, "confluence.username")?;
            expand::expand_opt(&mut confluence.password, "confluence.password")?;
        }

        Ok(())
    }
}
