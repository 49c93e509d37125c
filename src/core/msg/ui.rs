use serde::{Deserialize, Serialize};

use crate::core::state::ui::Page;

/// Page and focus navigation messages for UiState transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiMsg {
    NextField,
    PrevField,
    ShowPage(Page),
    TogglePage,
}

#[cfg(test)]
mod tests {
    use super::*;

    use color_eyre::Result;

    #[test]
    fn ui_msg_serde() -> Result<()> {
        let msg = UiMsg::ShowPage(Page::Settings);
        let s = serde_json::to_string(&msg)?;
        let back: UiMsg = serde_json::from_str(&s)?;
        assert_eq!(msg, back);

        Ok(())
    }
}
