use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::domain::{autocomplete::Epoch, contact::Contact, navigation::Move};

/// Messages for the autocomplete (contact) field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AutocompleteMsg {
    /// Run the initial fetch for a preset value
    Initialize,
    /// Edit key for the search input
    Key(KeyEvent),
    /// Replace the whole search text
    SetText(String),
    /// Search right away, without waiting for the debounce
    SearchNow,
    DebounceElapsed(Epoch),
    Results { epoch: Epoch, rows: Vec<Contact> },
    QueryFailed { epoch: Epoch, error: String },
    Fetched { value: String, option: Option<Contact> },
    Navigate(Move),
    Enter,
    Escape,
    Select(Option<Contact>),
    OutsideClick,
    SetDisabled(bool),
}

impl AutocompleteMsg {
    /// Messages produced by background tasks rather than the user
    pub fn is_async_result(&self) -> bool {
        matches!(
            self,
            AutocompleteMsg::DebounceElapsed(_)
                | AutocompleteMsg::Results { .. }
                | AutocompleteMsg::QueryFailed { .. }
                | AutocompleteMsg::Fetched { .. }
        )
    }
}
