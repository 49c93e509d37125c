use crate::core::{
    cmd::{Cmd, TuiCommand},
    msg::system::SystemMsg,
};

/// System-related state
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub status_message: Option<String>,
    /// Last known terminal size (width, height)
    pub size: Option<(u16, u16)>,
}

impl SystemState {
    /// System-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: SystemMsg) -> Vec<Cmd> {
        match msg {
            // System control
            SystemMsg::Quit => {
                self.should_quit = true;
                vec![]
            }

            SystemMsg::Suspend => {
                self.should_suspend = true;
                vec![]
            }

            SystemMsg::Resume => {
                self.should_suspend = false;
                vec![]
            }

            SystemMsg::Resize(width, height) => {
                self.size = Some((width, height));
                vec![Cmd::Tui(TuiCommand::Resize { width, height })]
            }

            // Status management
            SystemMsg::UpdateStatusMessage(message) => {
                self.status_message = Some(message);
                vec![]
            }

            SystemMsg::ClearStatusMessage => {
                self.status_message = None;
                vec![]
            }

            SystemMsg::ShowError(error) => {
                self.status_message = Some(format!("Error: {error}"));
                vec![Cmd::LogError { message: error }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_state_quit_isolated() {
        let mut system = SystemState::default();
        assert!(!system.should_quit);

        let cmds = system.update(SystemMsg::Quit);

        assert!(system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_system_state_resize_generates_command() {
        let mut system = SystemState::default();

        let cmds = system.update(SystemMsg::Resize(80, 24));

        assert_eq!(system.size, Some((80, 24)));
        assert_eq!(
            cmds,
            vec![Cmd::Tui(TuiCommand::Resize {
                width: 80,
                height: 24
            })]
        );
    }

    #[test]
    fn test_status_message_flow_unit() {
        let mut system = SystemState::default();
        assert!(system.status_message.is_none());

        let cmds = system.update(SystemMsg::UpdateStatusMessage("Amount: 12.50".to_string()));
        assert!(cmds.is_empty());
        assert_eq!(system.status_message.as_deref(), Some("Amount: 12.50"));

        let cmds = system.update(SystemMsg::ClearStatusMessage);
        assert!(cmds.is_empty());
        assert!(system.status_message.is_none());
    }

    #[test]
    fn test_error_is_shown_and_logged() {
        let mut system = SystemState::default();

        let cmds = system.update(SystemMsg::ShowError("lookup failed".to_string()));

        assert_eq!(
            system.status_message.as_deref(),
            Some("Error: lookup failed")
        );
        assert_eq!(
            cmds,
            vec![Cmd::LogError {
                message: "lookup failed".to_string()
            }]
        );
    }

    #[test]
    fn test_suspend_resume_unit() {
        let mut system = SystemState::default();

        system.update(SystemMsg::Suspend);
        assert!(system.should_suspend);

        system.update(SystemMsg::Resume);
        assert!(!system.should_suspend);
    }
}
