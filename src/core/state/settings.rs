use crate::core::{cmd::Cmd, msg::settings::SettingsMsg};

/// Settings page state
///
/// Holds the toggle's control value. The shared layout store stays the
/// source of truth; every change is written through with
/// [`Cmd::SetDarkTheme`], and outside writes come back as
/// [`SettingsMsg::StoreChanged`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsState {
    pub dark_theme: bool,
}

impl SettingsState {
    /// Initializes the toggle from the current store value.
    pub fn new(dark_theme: bool) -> Self {
        Self { dark_theme }
    }

    pub fn update(&mut self, msg: SettingsMsg) -> Vec<Cmd> {
        let next = match msg {
            SettingsMsg::ToggleDarkTheme => !self.dark_theme,
            SettingsMsg::SetDarkTheme(value) => value,
            SettingsMsg::StoreChanged(value) => {
                if value == self.dark_theme {
                    return vec![];
                }
                self.dark_theme = value;
                return vec![Cmd::RequestRender];
            }
        };
        if next == self.dark_theme {
            return vec![];
        }
        self.dark_theme = next;
        vec![Cmd::SetDarkTheme(next), Cmd::RequestRender]
    }
}
