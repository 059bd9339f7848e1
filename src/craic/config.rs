use crate::error::{CraicError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DOCUMENTS_KEY: &str = "documents";
pub const DEFAULT_ANNOTATION_SETS_KEY: &str = "annotationSets";
pub const SESSION_KEY: &str = "session";

/// Configuration for craic, stored in .craic/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CraicConfig {
    /// Storage key holding the document list
    #[serde(default = "default_documents_key")]
    pub documents_key: String,

    /// Storage key holding the annotation set list
    #[serde(default = "default_annotation_sets_key")]
    pub annotation_sets_key: String,

    /// File extensions accepted on upload (e.g. ".md", ".txt")
    #[serde(default = "default_accepted_extensions")]
    pub accepted_extensions: Vec<String>,
}

fn default_documents_key() -> String {
    DEFAULT_DOCUMENTS_KEY.to_string()
}

fn default_annotation_sets_key() -> String {
    DEFAULT_ANNOTATION_SETS_KEY.to_string()
}

fn default_accepted_extensions() -> Vec<String> {
    vec![".md".to_string(), ".txt".to_string()]
}

/// Keys the stores may not take: the scope's own files share the namespace.
const RESERVED_KEYS: [&str; 2] = ["config", SESSION_KEY];

fn parse_storage_key(
    name: &str,
    value: &str,
    other_store_key: &str,
) -> std::result::Result<String, String> {
    let value = value.trim();
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(format!(
            "{} must be letters, digits, '-' or '_' (got {:?})",
            name, value
        ));
    }
    if RESERVED_KEYS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(value))
    {
        return Err(format!("{} cannot be {:?}: that key is reserved", name, value));
    }
    if other_store_key.eq_ignore_ascii_case(value) {
        return Err(format!(
            "{} cannot be {:?}: the other store already uses it",
            name, value
        ));
    }
    Ok(value.to_string())
}

impl Default for CraicConfig {
    fn default() -> Self {
        Self {
            documents_key: default_documents_key(),
            annotation_sets_key: default_annotation_sets_key(),
            accepted_extensions: default_accepted_extensions(),
        }
    }
}

impl CraicConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CraicError::Io)?;
        let config: CraicConfig =
            serde_json::from_str(&content).map_err(CraicError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CraicError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CraicError::Serialization)?;
        fs::write(config_path, content).map_err(CraicError::Io)?;
        Ok(())
    }

    pub fn exists<P: AsRef<Path>>(config_dir: P) -> bool {
        config_dir.as_ref().join(CONFIG_FILENAME).exists()
    }

    pub const KEYS: [&'static str; 3] =
        ["documents-key", "annotation-sets-key", "accepted-extensions"];

    /// Get a config value by its CLI key name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "documents-key" => Some(self.documents_key.clone()),
            "annotation-sets-key" => Some(self.annotation_sets_key.clone()),
            "accepted-extensions" => Some(self.accepted_extensions.join(",")),
            _ => None,
        }
    }

    /// Set a config value by its CLI key name.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "documents-key" => {
                self.documents_key = parse_storage_key(key, value, &self.annotation_sets_key)?;
            }
            "annotation-sets-key" => {
                self.annotation_sets_key = parse_storage_key(key, value, &self.documents_key)?;
            }
            "accepted-extensions" => {
                let previous = std::mem::take(&mut self.accepted_extensions);
                self.set_accepted_extensions(value.split(','));
                if self.accepted_extensions.is_empty() {
                    self.accepted_extensions = previous;
                    return Err("accepted-extensions needs at least one extension".to_string());
                }
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// Replace the accepted extensions, normalizing each to start with a dot.
    /// Blank entries are dropped.
    pub fn set_accepted_extensions<I, E>(&mut self, exts: I)
    where
        I: IntoIterator<Item = E>,
        E: AsRef<str>,
    {
        self.accepted_extensions = exts
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .map(|e| {
                if e.starts_with('.') {
                    e
                } else {
                    format!(".{}", e)
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CraicConfig::default();
        assert_eq!(config.documents_key, "documents");
        assert_eq!(config.annotation_sets_key, "annotationSets");
        assert_eq!(config.accepted_extensions, vec![".md", ".txt"]);
    }

    #[test]
    fn test_set_extensions_normalizes_dots() {
        let mut config = CraicConfig::default();
        config.set_accepted_extensions(["md", ".txt", " text ", ""]);
        assert_eq!(config.accepted_extensions, vec![".md", ".txt", ".text"]);
    }

    #[test]
    fn test_storage_keys_cannot_collide() {
        let mut config = CraicConfig::default();

        assert!(config.set("documents-key", "config").is_err());
        assert!(config.set("documents-key", "Session").is_err());
        assert!(config.set("annotation-sets-key", "session").is_err());
        assert!(config.set("annotation-sets-key", "documents").is_err());
        assert!(config.set("documents-key", "annotationSets").is_err());
        assert_eq!(config, CraicConfig::default());

        config.set("documents-key", "papers").unwrap();
        assert!(config.set("annotation-sets-key", "papers").is_err());
        config.set("annotation-sets-key", "documents").unwrap();
        assert_eq!(config.annotation_sets_key, "documents");
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = CraicConfig::default();
        config.set("documents-key", "papers").unwrap();
        config.set("accepted-extensions", "md,markdown").unwrap();

        assert_eq!(config.get("documents-key").as_deref(), Some("papers"));
        assert_eq!(
            config.get("accepted-extensions").as_deref(),
            Some(".md,.markdown")
        );
        assert_eq!(config.get("bogus"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CraicConfig::default();
        assert!(config.set("documents-key", "../escape").is_err());
        assert!(config.set("annotation-sets-key", "").is_err());
        assert!(config.set("accepted-extensions", " , ").is_err());
        assert!(config.set("bogus", "x").is_err());
        assert_eq!(config, CraicConfig::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = CraicConfig::load(temp.path().join("missing")).unwrap();
        assert_eq!(config, CraicConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".craic");

        let mut config = CraicConfig::default();
        config.documents_key = "my-docs".to_string();
        config.save(&dir).unwrap();

        assert!(CraicConfig::exists(&dir));
        let loaded = CraicConfig::load(&dir).unwrap();
        assert_eq!(loaded.documents_key, "my-docs");
        assert_eq!(loaded.annotation_sets_key, "annotationSets");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.json"),
            r#"{"documents_key": "papers"}"#,
        )
        .unwrap();

        let config = CraicConfig::load(temp.path()).unwrap();
        assert_eq!(config.documents_key, "papers");
        assert_eq!(config.accepted_extensions, vec![".md", ".txt"]);
    }
}
