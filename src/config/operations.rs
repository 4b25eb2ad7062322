//! Config loading, format detection, and validation.

use super::model::ShortcutSet;
use crate::error::{Result, TrayrunError};
use std::path::{Path, PathBuf};

/// Source formats supported for the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

/// Extensions probed, in order, when the named config file does not exist.
const PROBE_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "toml", "tml"];

impl ConfigFormat {
    /// Map a file extension (without the dot, case-insensitive) to a format.
    pub fn for_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" | "tml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    fn for_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::for_extension(ext).ok_or_else(|| {
            TrayrunError::ConfigError(format!(
                "unsupported config format '{}' (expected json, yaml, or toml)",
                path.display()
            ))
        })
    }
}

impl ShortcutSet {
    /// Load a shortcut set from a file.
    ///
    /// The parser is chosen by extension. When the named file does not exist,
    /// sibling files with the same stem and a known extension are probed in a
    /// fixed order before giving up, so `-c config.json` also finds
    /// `config.yaml` or `config.toml`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = resolve_config_path(path.as_ref())?;

        let content = std::fs::read_to_string(&path).map_err(|e| {
            TrayrunError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let set = Self::parse(&content, ConfigFormat::for_path(&path)?)?;
        set.validate()?;
        Ok(set)
    }

    /// Parse a shortcut set from a string in the given format.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| {
                TrayrunError::ConfigError(format!("failed to parse config JSON: {}", e))
            }),
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
                TrayrunError::ConfigError(format!("failed to parse config YAML: {}", e))
            }),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| {
                TrayrunError::ConfigError(format!("failed to parse config TOML: {}", e))
            }),
        }
    }

    /// Validate structural config values.
    ///
    /// Validation rules:
    /// - shortcut ids must be non-empty
    /// - `timeout_seconds` must not exceed one day (86400)
    ///
    /// Charset labels are deliberately not checked here; the engine resolves
    /// them per step so a bad label only fails the shortcut that uses it.
    pub fn validate(&self) -> Result<()> {
        const MAX_TIMEOUT_SECONDS: u64 = 86_400;

        for (id, shortcut) in &self.shortcuts {
            if id.trim().is_empty() {
                return Err(TrayrunError::ConfigError(
                    "config validation failed: shortcut ids must be non-empty".to_string(),
                ));
            }
            if shortcut.timeout_seconds > MAX_TIMEOUT_SECONDS {
                return Err(TrayrunError::ConfigError(format!(
                    "config validation failed: shortcut '{}' timeout of {}s exceeds the {}s maximum",
                    id, shortcut.timeout_seconds, MAX_TIMEOUT_SECONDS
                )));
            }
        }
        Ok(())
    }
}

/// Resolve the config path, probing sibling extensions when the named file
/// is missing.
fn resolve_config_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    for ext in PROBE_EXTENSIONS {
        let candidate = path.with_extension(ext);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(TrayrunError::ConfigError(format!(
        "config file '{}' not found (also probed .json/.yaml/.yml/.toml/.tml siblings)",
        path.display()
    )))
}
