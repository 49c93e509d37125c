use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::domain::decimal::DecimalPart;

/// Messages for the decimal (amount) field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecimalMsg {
    /// Edit key for the focused part
    Key(KeyEvent),
    FocusPart(DecimalPart),
    Blur,
    SetScale(u8),
    /// Value written from outside the field
    WriteValue(Option<String>),
    SetDisabled(bool),
}
