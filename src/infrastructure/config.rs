use crate::presentation::config::keybindings;
use crate::presentation::config::styles;

use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;

use crate::domain::{contact::Contact, preferences::Layout};
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// Form page settings
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Fractional digits of the amount field
    pub scale: u8,
    pub decimal_separator: char,
    pub debounce_ms: u64,
    /// Option rows shown by the dropdown
    pub dropdown_rows: u16,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub placeholder: Option<String>,
    pub amount_required: bool,
    pub contact_required: bool,
    /// Username preselected in the contact field
    pub initial_contact: Option<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            decimal_separator: '.',
            debounce_ms: 300,
            dropdown_rows: 6,
            prefix: None,
            suffix: None,
            placeholder: None,
            amount_required: false,
            contact_required: false,
            initial_contact: None,
        }
    }
}

/// In-memory contact catalog behavior
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Simulated lookup latency
    pub latency_ms: u64,
    pub max_results: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            latency_ms: 150,
            max_results: 20,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: keybindings::KeyBindings,
    #[serde(default)]
    pub styles: styles::Styles,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub preferences: Layout,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl Config {
    /// Defaults compiled into the binary
    pub fn embedded() -> Result<Self, ConfigError> {
        json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))
    }

    /// Loads user configuration on top of the embedded defaults.
    /// A missing user file is not an error.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(utils::get_data_dir(), utils::get_config_dir())
    }

    pub fn load_from(data_dir: PathBuf, config_dir: PathBuf) -> Result<Self, ConfigError> {
        let default_config = Self::embedded()?;
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("_config_dir", config_dir.to_string_lossy().to_string())?
            .add_source(config::File::from_str(CONFIG, config::FileFormat::Json5));

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!(
                "No configuration file found in {}, using defaults",
                config_dir.display()
            );
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // Merge default keybindings into user config (flat mapping)
        for (keyseq, action) in default_config.keybindings.iter() {
            cfg.keybindings.entry(keyseq.clone()).or_insert(*action);
        }
        for (style_key, style) in default_config.styles.iter() {
            cfg.styles.entry(style_key.clone()).or_insert(*style);
        }

        if cfg.contacts.is_empty() {
            cfg.contacts.clone_from(&default_config.contacts);
        }

        if cfg.form.scale > 12 {
            return Err(ConfigError::Message(format!(
                "form.scale must be at most 12, got {}",
                cfg.form.scale
            )));
        }

        Ok(cfg)
    }
}
