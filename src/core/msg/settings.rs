use serde::{Deserialize, Serialize};

/// Messages for the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsMsg {
    ToggleDarkTheme,
    SetDarkTheme(bool),
    /// The layout store was written by someone else
    StoreChanged(bool),
}
