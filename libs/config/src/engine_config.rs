//! Engine Configuration Module
//!
//! Loads engine settings from a base TOML file, an optional
//! environment-specific overlay and `FEED__`-prefixed environment variables.

use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Processing switches shared by every listener
    pub engine: EngineSettings,

    /// Field dictionary entries and name aliases
    pub schema: SchemaConfig,

    /// Subscriber settings
    pub logging: LoggingConfig,
}

/// Processing switches applied to every new listener
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    /// Conflation count assumed when a message carries none
    pub default_conflation: u64,

    /// Whether the trade listener reports Update messages as trades
    pub process_update_as_trade: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_conflation: 1,
            process_update_as_trade: true,
        }
    }
}

/// Field dictionary sources and deployment-specific field names
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SchemaConfig {
    /// Optional TOML file of `name = id` entries; `~` and `$VAR` are expanded
    pub dictionary: Option<String>,

    /// Inline entries, applied after the dictionary file
    pub fields: Vec<FieldEntry>,

    /// Logical field names renamed by this deployment's dictionary
    pub aliases: Vec<FieldAlias>,
}

/// One inline dictionary entry
///
/// Kept as a table array rather than a map: configuration keys are not
/// case-preserving, field names are.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldEntry {
    pub name: String,
    pub id: u16,
}

/// Maps a logical field name onto the name a deployment publishes
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FieldAlias {
    pub field: String,
    pub name: String,
}

/// Tracing subscriber settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of the human-readable format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl EngineConfig {
    /// Load configuration from files with environment overrides
    ///
    /// An overlay at `<base dir>/environments/<environment>.toml` is applied
    /// when it exists. Environment variables such as
    /// `FEED__ENGINE__DEFAULT_CONFLATION=2` override both files.
    pub fn load(base_path: &Path, environment: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder().add_source(File::from(base_path).required(true));

        if let Some(env) = environment {
            let env_file = base_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("environments")
                .join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("FEED")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build engine configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize engine configuration")
    }

    /// Parse configuration held in memory, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to build engine configuration")?
            .try_deserialize()
            .context("Failed to deserialize engine configuration")
    }
}

impl SchemaConfig {
    /// Every `name -> id` entry this configuration provides
    ///
    /// The dictionary file is read first; inline entries replace file entries
    /// of the same name.
    pub fn dictionary_entries(&self) -> Result<HashMap<String, u16>> {
        let mut entries = match &self.dictionary {
            Some(path) => load_dictionary_file(path)?,
            None => HashMap::new(),
        };

        for entry in &self.fields {
            if let Some(previous) = entries.insert(entry.name.clone(), entry.id) {
                if previous != entry.id {
                    debug!(
                        field = %entry.name,
                        previous,
                        id = entry.id,
                        "inline field id overrides dictionary file"
                    );
                }
            }
        }

        Ok(entries)
    }

    /// Aliases as a lookup map
    pub fn alias_map(&self) -> HashMap<String, String> {
        self.aliases
            .iter()
            .map(|alias| (alias.field.clone(), alias.name.clone()))
            .collect()
    }
}

fn load_dictionary_file(path: &str) -> Result<HashMap<String, u16>> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Failed to expand dictionary path {}", path))?;
    let path = PathBuf::from(expanded.as_ref());

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read dictionary file {:?}", path))?;
    let entries: HashMap<String, u16> = toml::from_str(&content)
        .with_context(|| format!("Failed to parse dictionary file {:?}", path))?;

    info!(entries = entries.len(), "Loaded field dictionary from {:?}", path);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_base_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("engine.toml");

        let config_content = r#"
[engine]
default_conflation = 3
process_update_as_trade = false

[[schema.fields]]
name = "wTradePrice"
id = 101

[[schema.fields]]
name = "wTradeVolume"
id = 102

[[schema.aliases]]
field = "wTradeVolume"
name = "wTradeSize"

[logging]
level = "debug"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = EngineConfig::load(&config_path, None).unwrap();

        assert_eq!(config.engine.default_conflation, 3);
        assert!(!config.engine.process_update_as_trade);
        assert_eq!(
            config.schema.fields[0],
            FieldEntry {
                name: "wTradePrice".to_string(),
                id: 101
            }
        );
        let aliases = config.schema.alias_map();
        assert_eq!(aliases.get("wTradeVolume").map(String::as_str), Some("wTradeSize"));
        assert!(!aliases.contains_key("wTradePrice"));
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_environment_overlay() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("engine.toml");
        fs::write(&config_path, "[engine]\ndefault_conflation = 1\n").unwrap();

        let env_dir = dir.path().join("environments");
        fs::create_dir_all(&env_dir).unwrap();
        fs::write(
            env_dir.join("replay.toml"),
            "[engine]\nprocess_update_as_trade = false\n",
        )
        .unwrap();

        let config = EngineConfig::load(&config_path, Some("replay")).unwrap();
        assert_eq!(config.engine.default_conflation, 1);
        assert!(!config.engine.process_update_as_trade);

        // Missing overlay only warns
        let config = EngineConfig::load(&config_path, Some("absent")).unwrap();
        assert!(config.engine.process_update_as_trade);
    }

    #[test]
    fn test_defaults_from_empty_document() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.engine.default_conflation, 1);
        assert!(config.engine.process_update_as_trade);
    }

    #[test]
    fn test_dictionary_file_merged_with_inline_fields() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("dictionary.toml");
        fs::write(&dict_path, "wSymbol = 1\nwTradePrice = 50\n").unwrap();

        let schema = SchemaConfig {
            dictionary: Some(dict_path.to_string_lossy().into_owned()),
            fields: vec![FieldEntry {
                name: "wTradePrice".to_string(),
                id: 101,
            }],
            aliases: Vec::new(),
        };

        let entries = schema.dictionary_entries().unwrap();
        assert_eq!(entries.get("wSymbol"), Some(&1));
        assert_eq!(entries.get("wTradePrice"), Some(&101));
    }

    #[test]
    fn test_missing_dictionary_file_is_an_error() {
        let schema = SchemaConfig {
            dictionary: Some("/nonexistent/feed/dictionary.toml".to_string()),
            ..SchemaConfig::default()
        };
        assert!(schema.dictionary_entries().is_err());
    }
}
