use crate::{domain::preferences::Layout, infrastructure::config::Config};

pub mod form;
pub mod settings;
pub mod system;
pub mod ui;

use form::FormState;
use settings::SettingsState;
use system::SystemState;
use ui::UiState;

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FormState,
    pub settings: SettingsState,
    pub ui: UiState,
    pub system: SystemState,
    pub config: ConfigState,
}

/// Configuration state - holds all user-configurable settings
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Current configuration loaded from file
    pub config: Config,
}

impl AppState {
    /// Initialize AppState from the loaded config
    pub fn new_with_config(config: Config) -> Self {
        let preferences = config.preferences;
        Self::new_with_layout(config, preferences)
    }

    /// Initialize AppState from the config and previously persisted preferences
    pub fn new_with_layout(config: Config, layout: Layout) -> Self {
        Self {
            form: FormState::from_config(&config.form),
            settings: SettingsState::new(layout.dark_theme),
            config: ConfigState { config },
            ..Default::default()
        }
    }

    pub fn dark_theme(&self) -> bool {
        self.settings.dark_theme
    }
}
