use crossterm::event::KeyCode;

use crate::{
    core::cmd::Cmd,
    core::msg::{
        autocomplete::AutocompleteMsg, decimal::DecimalMsg, system::SystemMsg, Msg,
    },
    core::state::{form::FieldId, AppState},
    core::textarea_engine::TextAreaEngine,
    domain::{
        autocomplete::{AutocompleteEffect, AutocompleteItem},
        contact::Contact,
        decimal::DecimalEvent,
    },
    infrastructure::tui::textarea_engine::TuiTextAreaEngine,
};

/// Keys an open dropdown claims from the global bindings
const DROPDOWN_KEYS: [KeyCode; 4] = [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::Esc];

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, state: AppState) -> (AppState, Vec<Cmd>) {
    update_with_engine(msg, state, &TuiTextAreaEngine)
}

/// Same as [`update`] with an explicit text editing engine
pub fn update_with_engine(
    msg: Msg,
    mut state: AppState,
    engine: &dyn TextAreaEngine,
) -> (AppState, Vec<Cmd>) {
    match msg {
        // System messages (delegated to SystemState)
        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        // Focus leaving a field blurs it
        Msg::Ui(ui_msg) => {
            let (previous, mut commands) = state.ui.update(ui_msg);
            if let Some(previous) = previous {
                commands.extend(leave_field(&mut state, previous, engine));
            }
            (state, commands)
        }

        Msg::Decimal(decimal_msg) => {
            let events = state.form.update_amount(decimal_msg, engine);
            let commands = decimal_commands(&mut state, events);
            (state, commands)
        }

        Msg::Autocomplete(autocomplete_msg) => {
            let failure = match &autocomplete_msg {
                AutocompleteMsg::QueryFailed { error, .. } => Some(error.clone()),
                _ => None,
            };
            let effects = state.form.update_contact(autocomplete_msg, engine);
            let mut commands = autocomplete_commands(&mut state, FieldId::Contact, effects);
            if let Some(error) = failure {
                commands.extend(state.system.update(SystemMsg::ShowError(error)));
            }
            (state, commands)
        }

        // Settings messages (delegated to SettingsState)
        Msg::Settings(settings_msg) => {
            let commands = state.settings.update(settings_msg);
            (state, commands)
        }
    }
}

fn leave_field(state: &mut AppState, field: FieldId, engine: &dyn TextAreaEngine) -> Vec<Cmd> {
    match field {
        FieldId::Amount => {
            let events = state.form.update_amount(DecimalMsg::Blur, engine);
            decimal_commands(state, events)
        }
        FieldId::Contact => {
            let effects = state
                .form
                .update_contact(AutocompleteMsg::OutsideClick, engine);
            autocomplete_commands(state, field, effects)
        }
        FieldId::DarkTheme => vec![],
    }
}

fn decimal_commands(state: &mut AppState, events: Vec<DecimalEvent>) -> Vec<Cmd> {
    let mut commands = vec![];
    for event in events {
        match event {
            DecimalEvent::Changed(value) => {
                let shown = value.as_deref().unwrap_or("empty");
                commands.extend(
                    state
                        .system
                        .update(SystemMsg::UpdateStatusMessage(format!("Amount: {shown}"))),
                );
            }
            DecimalEvent::Blurred => {
                log::debug!("amount blurred with value {:?}", state.form.amount.value());
            }
            DecimalEvent::FocusPart(part) => {
                log::trace!("amount focus moved to {part:?}");
            }
        }
    }
    commands
}

/// Turns state machine effects into executor commands and keeps the
/// shortcut registry in step with the dropdown.
fn autocomplete_commands(
    state: &mut AppState,
    field: FieldId,
    effects: Vec<AutocompleteEffect<Contact>>,
) -> Vec<Cmd> {
    let mut commands = vec![];
    for effect in effects {
        match effect {
            AutocompleteEffect::ScheduleSearch { epoch } => commands.push(Cmd::ScheduleSearch {
                field,
                epoch,
                delay_ms: state.form.debounce_ms,
            }),
            AutocompleteEffect::CancelSearch => commands.push(Cmd::CancelSearch { field }),
            AutocompleteEffect::Query { text, epoch } => {
                commands.push(Cmd::Query { field, text, epoch })
            }
            AutocompleteEffect::Fetch { value } => commands.push(Cmd::Fetch { field, value }),
            AutocompleteEffect::Selected(selected) => {
                let message = match selected {
                    Some(contact) => format!("Contact: {}", contact.display()),
                    None => "Contact cleared".to_string(),
                };
                commands.extend(state.system.update(SystemMsg::UpdateStatusMessage(message)));
            }
            AutocompleteEffect::Opened => {
                state.ui.shortcuts.claim(field, DROPDOWN_KEYS);
                commands.push(Cmd::ListenPointer { field });
            }
            AutocompleteEffect::Closed => {
                state.ui.shortcuts.release(field);
                commands.push(Cmd::UnlistenPointer { field });
            }
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::msg::{settings::SettingsMsg, ui::UiMsg},
        domain::{autocomplete::Phase, navigation::Move},
    };

    fn create_test_state() -> AppState {
        AppState::default()
    }

    fn open_with(state: AppState, rows: Vec<Contact>) -> AppState {
        let (state, _) = update(
            Msg::Autocomplete(AutocompleteMsg::SetText("j".into())),
            state,
        );
        let epoch = state.form.contact.epoch();
        let (state, _) = update(
            Msg::Autocomplete(AutocompleteMsg::DebounceElapsed(epoch)),
            state,
        );
        let (state, _) = update(
            Msg::Autocomplete(AutocompleteMsg::Results { epoch, rows }),
            state,
        );
        state
    }

    #[test]
    fn test_update_quit() {
        let state = create_test_state();
        let (new_state, cmds) = update(Msg::System(SystemMsg::Quit), state);

        assert!(new_state.system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_edit_schedules_debounced_search() {
        let state = create_test_state();
        let (new_state, cmds) = update(
            Msg::Autocomplete(AutocompleteMsg::SetText("jo".into())),
            state,
        );

        assert_eq!(
            cmds,
            vec![Cmd::ScheduleSearch {
                field: FieldId::Contact,
                epoch: 1,
                delay_ms: new_state.form.debounce_ms,
            }]
        );
    }

    #[test]
    fn test_open_claims_shortcuts_and_listens() {
        let state = create_test_state();
        let (state, _) = update(
            Msg::Autocomplete(AutocompleteMsg::SetText("j".into())),
            state,
        );
        let (state, _) = update(Msg::Autocomplete(AutocompleteMsg::DebounceElapsed(1)), state);
        let (state, cmds) = update(
            Msg::Autocomplete(AutocompleteMsg::Results {
                epoch: 1,
                rows: vec![Contact::new("jdoe", "John Doe")],
            }),
            state,
        );

        assert_eq!(
            cmds,
            vec![Cmd::ListenPointer {
                field: FieldId::Contact
            }]
        );
        assert_eq!(state.ui.shortcuts.owner_of(KeyCode::Esc), Some(FieldId::Contact));
    }

    #[test]
    fn test_select_releases_shortcuts_and_reports() {
        let state = open_with(create_test_state(), vec![Contact::new("jdoe", "John Doe")]);
        let (state, _) = update(Msg::Autocomplete(AutocompleteMsg::Navigate(Move::Down)), state);
        let (state, cmds) = update(Msg::Autocomplete(AutocompleteMsg::Enter), state);

        assert_eq!(
            cmds,
            vec![
                Cmd::UnlistenPointer {
                    field: FieldId::Contact
                },
                Cmd::CancelSearch {
                    field: FieldId::Contact
                },
            ]
        );
        assert!(state.ui.shortcuts.is_empty());
        assert_eq!(
            state.system.status_message.as_deref(),
            Some("Contact: John Doe (jdoe)")
        );
        assert_eq!(state.form.contact.value().map(String::as_str), Some("jdoe"));
    }

    #[test]
    fn test_leaving_contact_closes_dropdown() {
        let mut state = open_with(create_test_state(), vec![Contact::new("ann", "Ann Lee")]);
        state.ui.focus = FieldId::Contact;

        let (state, cmds) = update(Msg::Ui(UiMsg::NextField), state);

        assert_eq!(state.form.contact.phase(), Phase::Closed);
        assert!(cmds.contains(&Cmd::UnlistenPointer {
            field: FieldId::Contact
        }));
    }

    #[test]
    fn test_leaving_amount_blurs_it() {
        let state = create_test_state();
        let (state, _) = update(
            Msg::Decimal(DecimalMsg::WriteValue(Some("3".into()))),
            state,
        );
        assert_eq!(state.form.amount.parts().fractional, "");

        let (state, _) = update(Msg::Ui(UiMsg::NextField), state);

        assert!(state.form.amount.control().is_touched());
        assert_eq!(state.form.amount.parts().fractional, "00");
        assert_eq!(state.form.fractional_input.content, "00");
    }

    #[test]
    fn test_query_failure_shows_error() {
        let state = create_test_state();
        let (state, _) = update(
            Msg::Autocomplete(AutocompleteMsg::SetText("j".into())),
            state,
        );
        let (state, _) = update(Msg::Autocomplete(AutocompleteMsg::DebounceElapsed(1)), state);
        let (state, cmds) = update(
            Msg::Autocomplete(AutocompleteMsg::QueryFailed {
                epoch: 1,
                error: "offline".into(),
            }),
            state,
        );

        assert_eq!(state.form.contact.phase(), Phase::Closed);
        assert_eq!(state.system.status_message.as_deref(), Some("Error: offline"));
        assert_eq!(
            cmds,
            vec![Cmd::LogError {
                message: "offline".into()
            }]
        );
    }

    #[test]
    fn test_amount_change_is_reported() {
        let state = create_test_state();
        let (state, _) = update(
            Msg::Decimal(DecimalMsg::Key(crossterm::event::KeyEvent::new(
                KeyCode::Char('9'),
                crossterm::event::KeyModifiers::NONE,
            ))),
            state,
        );
        assert_eq!(state.system.status_message.as_deref(), Some("Amount: 9.00"));
    }

    #[test]
    fn test_settings_toggle() {
        let state = create_test_state();
        let (state, cmds) = update(Msg::Settings(SettingsMsg::ToggleDarkTheme), state);
        assert!(state.settings.dark_theme);
        assert_eq!(cmds, vec![Cmd::SetDarkTheme(true), Cmd::RequestRender]);
    }
}
