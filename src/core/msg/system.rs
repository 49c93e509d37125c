use serde::{Deserialize, Serialize};

/// Messages specific to SystemState
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SystemMsg {
    // System control
    Quit,
    Suspend,
    Resume,
    Resize(u16, u16),

    // Status management
    UpdateStatusMessage(String),
    ClearStatusMessage,
    ShowError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    use color_eyre::Result;

    #[test]
    fn test_system_msg_serialization() -> Result<()> {
        let msg = SystemMsg::Resize(80, 24);
        let s = serde_json::to_string(&msg)?;
        let back: SystemMsg = serde_json::from_str(&s)?;
        assert_eq!(msg, back);

        Ok(())
    }
}
