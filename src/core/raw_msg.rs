use crossterm::event::{KeyEvent, MouseEvent};
use serde::{Deserialize, Serialize};

use crate::{
    core::state::form::FieldId,
    domain::{autocomplete::Epoch, contact::Contact},
};

/// Raw messages from external sources (input, background tasks, system)
/// These represent unprocessed events that need to be translated to domain messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawMsg {
    // System events
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Suspend,
    Resume,

    // User input
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    /// A pointer click outside the area of a field with a registered listener
    OutsideClick(FieldId),

    // Background task results
    DebounceElapsed {
        field: FieldId,
        epoch: Epoch,
    },
    SearchResults {
        field: FieldId,
        epoch: Epoch,
        rows: Vec<Contact>,
    },
    QueryFailed {
        field: FieldId,
        epoch: Epoch,
        error: String,
    },
    Fetched {
        field: FieldId,
        value: String,
        option: Option<Contact>,
    },

    // System status
    SystemMessage(String),
    Error(String),
}

impl RawMsg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, RawMsg::Tick | RawMsg::Render | RawMsg::Mouse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_raw_msg_frequent_detection() {
        assert!(RawMsg::Tick.is_frequent());
        assert!(RawMsg::Render.is_frequent());
        assert!(!RawMsg::Quit.is_frequent());
        assert!(!RawMsg::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)).is_frequent());
    }

    #[test]
    fn test_raw_msg_equality() {
        assert_eq!(RawMsg::Quit, RawMsg::Quit);
        assert_ne!(RawMsg::Tick, RawMsg::Render);
        assert_ne!(
            RawMsg::OutsideClick(FieldId::Contact),
            RawMsg::OutsideClick(FieldId::Amount)
        );
    }

    #[test]
    fn test_raw_msg_serialization() {
        let msg = RawMsg::SearchResults {
            field: FieldId::Contact,
            epoch: 2,
            rows: vec![Contact::new("ann", "Ann Lee")],
        };
        let serialized = serde_json::to_string(&msg).unwrap();
        let deserialized: RawMsg = serde_json::from_str(&serialized).unwrap();
        assert_eq!(msg, deserialized);
    }
}
