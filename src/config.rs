//! Configuration documents (YAML, TOML or JSON) and default paths

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::executable::JUJU_EXECUTABLE;
use crate::version::{Version, VersionNumber};

/// Application name used for config and data directories
pub const APP_NAME: &str = "juju-version";

/// Configuration file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported config format: {0:?}")]
    UnsupportedFormat(PathBuf),
}

/// Top-level configuration document
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub juju: JujuConfig,
}

/// Juju client selection
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct JujuConfig {
    /// Executable name or path of the Juju client
    pub executable: String,
    /// Accepted client versions, e.g. `2.9.x`
    pub version: Option<VersionNumber>,
    /// Agent version to deploy, e.g. `2.9.42-focal-amd64`
    pub agent_version: Option<Version>,
}

impl Default for JujuConfig {
    fn default() -> Self {
        Self {
            executable: JUJU_EXECUTABLE.to_string(),
            version: None,
            agent_version: None,
        }
    }
}

impl Config {
    /// Load a config file, picking the decoder from its extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Returns the path to the config directory for juju-version.
/// Uses $XDG_CONFIG_HOME/juju-version if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/juju-version,
/// or ./juju-version if neither is available.
pub fn config_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Returns the path to the data directory for juju-version.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{}.log", APP_NAME))
}

fn dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, fallback: &str) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_from_empty_object_uses_defaults() {
        let result = serde_json::from_value::<Config>(json!({})).unwrap();

        assert_eq!(result, Config::default());
        assert_eq!(result.juju.executable, "juju");
    }

    #[test]
    fn config_from_full_toml_parses_all_fields() {
        let result = Config::from_toml_str(
            r#"
[juju]
executable = "/snap/bin/juju"
version = "2.9.x"
agent_version = "2.9.42-focal-amd64"
"#,
        )
        .unwrap();

        assert_eq!(
            result,
            Config {
                juju: JujuConfig {
                    executable: "/snap/bin/juju".to_string(),
                    version: Some(VersionNumber::parse("2.9.x").unwrap()),
                    agent_version: Some(
                        Version::new("2.9.42", None, Some("focal"), Some("amd64")).unwrap()
                    ),
                }
            }
        );
    }

    #[test]
    fn config_from_partial_json_uses_defaults_for_missing_fields() {
        let result = Config::from_json_str(r#"{"juju": {"version": "3.x"}}"#).unwrap();

        assert_eq!(result.juju.executable, "juju");
        assert_eq!(
            result.juju.version,
            Some(VersionNumber::parse("3.x").unwrap())
        );
        assert_eq!(result.juju.agent_version, None);
    }

    #[test]
    fn config_from_yaml_parses_versions() {
        let result = Config::from_yaml_str(
            r#"
juju:
  version: "2.9"
  agent_version: 2.9.42-focal-amd64
"#,
        )
        .unwrap();

        assert_eq!(result.juju.executable, "juju");
        assert_eq!(
            result.juju.version,
            Some(VersionNumber::parse("2.9").unwrap())
        );
        assert_eq!(
            result.juju.agent_version,
            Some(Version::parse("2.9.42-focal-amd64").unwrap())
        );
    }

    #[test]
    fn config_with_malformed_yaml_version_is_rejected() {
        let result = Config::from_yaml_str("juju:\n  agent_version: 2.9-focal-amd64\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn load_picks_decoder_from_extension() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let yaml = temp_dir.path().join("config.yml");
        std::fs::write(&yaml, "juju:\n  executable: /snap/bin/juju\n").unwrap();
        let ini = temp_dir.path().join("config.ini");
        std::fs::write(&ini, "").unwrap();

        assert_eq!(Config::load(&yaml).unwrap().juju.executable, "/snap/bin/juju");
        assert!(matches!(
            Config::load(&ini),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn config_with_malformed_version_is_rejected() {
        let result = Config::from_toml_str(
            r#"
[juju]
version = "2.9."
"#,
        );

        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn config_with_wildcard_agent_version_is_rejected() {
        let result = Config::from_json_str(r#"{"juju": {"agent_version": "2.9-focal-amd64"}}"#);

        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn dir_with_env_uses_xdg_home_when_set() {
        let path = dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
            ".config",
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/juju-version"));
    }

    #[test]
    fn dir_with_env_falls_back_to_home() {
        let path = dir_with_env(None, Some(PathBuf::from("/home/user")), ".local/share");

        assert_eq!(path, PathBuf::from("/home/user/.local/share/juju-version"));
    }

    #[test]
    fn dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = dir_with_env(None, None, ".config");
        assert_eq!(path, PathBuf::from("./juju-version"));
    }
}
