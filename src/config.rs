use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "dx.sh-script-generator";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Runtime settings, read once at startup
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the GitHub REST API
    pub api_url: String,
    pub user_agent: String,
    /// Optional token sent as `Authorization: Bearer`
    pub token: Option<String>,
    /// Bind address for `serve`
    pub listen: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            token: None,
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("listen", &self.listen)
            .finish()
    }
}

impl Settings {
    /// Load settings from a TOML file and the environment
    ///
    /// An explicit `path` must exist. Without one, `<config dir>/dxsh/config.toml`
    /// is used when present and silently skipped otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Read settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay environment variables: `DXSH_API_URL`, then `GITHUB_TOKEN` or `GH_TOKEN`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(api_url) = lookup("DXSH_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = api_url;
        }
        if let Some(token) = lookup("GITHUB_TOKEN")
            .or_else(|| lookup("GH_TOKEN"))
            .filter(|v| !v.is_empty())
        {
            self.token = Some(token);
        }
    }
}

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dxsh").join("config.toml"))
}
