//! YAML configuration shared by `folio` and `folio-top`.
//!
//! Lookup order: `$XDG_CONFIG_HOME/folio/config.yaml`,
//! `~/.config/folio/config.yaml`, then built-in defaults.

use crate::error::ParseError;
use folio_core::{DEFAULT_COUNTER_DURATION, DEFAULT_INTERVAL, DEFAULT_TYPEWRITER_STEP};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Terminal colour preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Detect from `COLORTERM`/`TERM`
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "truecolor")]
    TrueColor,
    #[serde(rename = "256")]
    Color256,
    #[serde(rename = "16")]
    Color16,
    #[serde(rename = "mono")]
    Mono,
}

/// Address the HTTP surface binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Headline and counter animation timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Milliseconds per revealed headline character
    pub typewriter_ms: u64,
    /// Milliseconds for a stat counter to reach its value
    pub counter_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            typewriter_ms: DEFAULT_TYPEWRITER_STEP.as_millis() as u64,
            counter_ms: DEFAULT_COUNTER_DURATION.as_millis() as u64,
        }
    }
}

impl AnimationConfig {
    #[must_use]
    pub const fn typewriter_step(&self) -> Duration {
        Duration::from_millis(self.typewriter_ms)
    }

    #[must_use]
    pub const fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_ms)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    /// Milliseconds between metric ticks
    pub refresh_ms: u64,
    /// Fixed RNG seed; unset means entropy
    pub seed: Option<u64>,
    pub color: ColorChoice,
    /// Site manifest path; unset means the bundled one
    pub site: Option<PathBuf>,
    pub server: ServerConfig,
    pub animation: AnimationConfig,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            refresh_ms: DEFAULT_INTERVAL.as_millis() as u64,
            seed: None,
            color: ColorChoice::Auto,
            site: None,
            server: ServerConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl FolioConfig {
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }

    /// XDG-compliant config paths, most specific first.
    pub fn config_paths() -> Vec<PathBuf> {
        Self::config_paths_from(
            std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            std::env::var_os("HOME").map(PathBuf::from),
        )
    }

    /// Testable core of [`FolioConfig::config_paths`].
    pub fn config_paths_from(xdg_config: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(xdg) = xdg_config.filter(|p| !p.as_os_str().is_empty()) {
            paths.push(xdg.join("folio").join("config.yaml"));
        }
        if let Some(home) = home {
            let fallback = home.join(".config").join("folio").join("config.yaml");
            if !paths.contains(&fallback) {
                paths.push(fallback);
            }
        }
        paths
    }

    /// First config found on the XDG paths, else defaults.
    ///
    /// A file that exists but fails to parse is skipped with a warning.
    pub fn load() -> Self {
        for path in Self::config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    return config;
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring config"),
            }
        }
        Self::default()
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ParseError> {
        let yaml = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        if self.refresh_ms == 0 {
            return Err(ParseError::invalid("refresh_ms", "must be greater than zero"));
        }
        if self.server.host.trim().is_empty() {
            return Err(ParseError::MissingField("server.host".to_string()));
        }
        Ok(())
    }

    /// Default configuration as commented YAML, for `--dump-config`.
    pub fn default_yaml() -> String {
        let body = serde_yaml_ng::to_string(&Self::default()).unwrap_or_default();
        format!(
            "# folio configuration\n\
             # Place at $XDG_CONFIG_HOME/folio/config.yaml or ~/.config/folio/config.yaml\n\
             # color: auto | truecolor | 256 | 16 | mono\n{body}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = FolioConfig::default();
        assert_eq!(c.refresh_ms, 2000);
        assert_eq!(c.refresh_interval(), Duration::from_secs(2));
        assert_eq!(c.seed, None);
        assert_eq!(c.color, ColorChoice::Auto);
        assert_eq!(c.server.address(), "127.0.0.1:8080");
        assert_eq!(c.animation.typewriter_ms, 100);
        assert_eq!(c.animation.counter_ms, 2000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let c = FolioConfig::from_yaml("refresh_ms: 500\nserver:\n  port: 9000\n").unwrap();
        assert_eq!(c.refresh_ms, 500);
        assert_eq!(c.server.port, 9000);
        assert_eq!(c.server.host, "127.0.0.1");
        assert_eq!(c.animation, AnimationConfig::default());
    }

    #[test]
    fn test_color_choice_names() {
        let c = FolioConfig::from_yaml("color: \"256\"\n").unwrap();
        assert_eq!(c.color, ColorChoice::Color256);
        let c = FolioConfig::from_yaml("color: mono\n").unwrap();
        assert_eq!(c.color, ColorChoice::Mono);
    }

    #[test]
    fn test_zero_refresh_rejected() {
        let err = FolioConfig::from_yaml("refresh_ms: 0\n").unwrap_err();
        assert!(err.to_string().contains("refresh_ms"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FolioConfig::from_yaml("refresh: 10\n").is_err());
    }

    #[test]
    fn test_default_yaml_roundtrips() {
        let yaml = FolioConfig::default_yaml();
        assert!(yaml.starts_with("# folio configuration"));
        assert_eq!(FolioConfig::from_yaml(&yaml).unwrap(), FolioConfig::default());
    }

    #[test]
    fn test_config_paths_order() {
        let paths = FolioConfig::config_paths_from(
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/u")),
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/xdg/folio/config.yaml"),
                PathBuf::from("/home/u/.config/folio/config.yaml"),
            ]
        );
        let paths = FolioConfig::config_paths_from(None, None);
        assert!(paths.is_empty());
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = FolioConfig::load_from_file(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
