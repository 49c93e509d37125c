use serde::{Deserialize, Serialize};

pub mod autocomplete;
pub mod decimal;
pub mod settings;
pub mod system;
pub mod ui;

use autocomplete::AutocompleteMsg;
use decimal::DecimalMsg;
use settings::SettingsMsg;
use system::SystemMsg;
use ui::UiMsg;

/// Domain messages representing application intent
/// These are processed by the update function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    System(SystemMsg),
    Ui(UiMsg),
    Decimal(DecimalMsg),
    Autocomplete(AutocompleteMsg),
    Settings(SettingsMsg),
}

impl Msg {
    /// Helper to exclude frequent messages while debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, Msg::Autocomplete(m) if m.is_async_result())
    }
}
