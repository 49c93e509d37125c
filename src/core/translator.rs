use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::presentation::config::keybindings::Action;
use crate::{
    core::{
        msg::{
            autocomplete::AutocompleteMsg, decimal::DecimalMsg, settings::SettingsMsg,
            system::SystemMsg, ui::UiMsg, Msg,
        },
        raw_msg::RawMsg,
        state::{form::FieldId, AppState},
    },
    domain::navigation::Move,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        RawMsg::Resume => vec![Msg::System(SystemMsg::Resume)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],

        // User input - translate based on context and key bindings
        RawMsg::Key(key) => translate_key_event(key, state),
        RawMsg::Paste(text) => translate_paste(&text, state),
        RawMsg::OutsideClick(field) => match field {
            FieldId::Contact => vec![Msg::Autocomplete(AutocompleteMsg::OutsideClick)],
            FieldId::Amount | FieldId::DarkTheme => vec![],
        },

        // Background task results, routed to the field that issued them
        RawMsg::DebounceElapsed { field, epoch } => {
            autocomplete_result(field, AutocompleteMsg::DebounceElapsed(epoch))
        }
        RawMsg::SearchResults { field, epoch, rows } => {
            autocomplete_result(field, AutocompleteMsg::Results { epoch, rows })
        }
        RawMsg::QueryFailed {
            field,
            epoch,
            error,
        } => autocomplete_result(field, AutocompleteMsg::QueryFailed { epoch, error }),
        RawMsg::Fetched {
            field,
            value,
            option,
        } => autocomplete_result(field, AutocompleteMsg::Fetched { value, option }),

        // System events
        RawMsg::SystemMessage(msg) => vec![Msg::System(SystemMsg::UpdateStatusMessage(msg))],
        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        // Pointer hit-testing happens in the runner; ticks carry no intent
        RawMsg::Tick | RawMsg::Render | RawMsg::Mouse(_) => vec![],
    }
}

fn autocomplete_result(field: FieldId, msg: AutocompleteMsg) -> Vec<Msg> {
    match field {
        FieldId::Contact => vec![Msg::Autocomplete(msg)],
        FieldId::Amount | FieldId::DarkTheme => {
            log::warn!("dropping {msg:?} addressed to {field}");
            vec![]
        }
    }
}

/// Translates keyboard input to domain events based on current application state
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    // Handle global key bindings first
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return vec![Msg::System(SystemMsg::Quit)],

        KeyEvent {
            code: KeyCode::Char('z'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return vec![Msg::System(SystemMsg::Suspend)],

        _ => {}
    }

    // Keys claimed by an open dropdown take precedence over bindings
    if let Some(owner) = state.ui.shortcuts.owner_of(key.code) {
        if let Some(msgs) = translate_claimed_key(owner, key) {
            return msgs;
        }
    }

    if let Some(action) = state.config.config.keybindings.get(&vec![key]) {
        return translate_action_to_msg(action, state);
    }

    translate_field_key(key, state)
}

fn translate_claimed_key(owner: FieldId, key: KeyEvent) -> Option<Vec<Msg>> {
    let msg = match (owner, key.code) {
        (FieldId::Contact, KeyCode::Up) => AutocompleteMsg::Navigate(Move::Up),
        (FieldId::Contact, KeyCode::Down) => AutocompleteMsg::Navigate(Move::Down),
        (FieldId::Contact, KeyCode::Enter) => AutocompleteMsg::Enter,
        (FieldId::Contact, KeyCode::Esc) => AutocompleteMsg::Escape,
        _ => return None,
    };
    Some(vec![Msg::Autocomplete(msg)])
}

fn translate_action_to_msg(action: &Action, state: &AppState) -> Vec<Msg> {
    match action {
        Action::Quit => vec![Msg::System(SystemMsg::Quit)],
        Action::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        Action::NextField => vec![Msg::Ui(UiMsg::NextField)],
        Action::PrevField => vec![Msg::Ui(UiMsg::PrevField)],
        Action::ToggleSettings => vec![Msg::Ui(UiMsg::TogglePage)],
        Action::Search => {
            // Only meaningful while the search input has focus
            if state.ui.is_focused(FieldId::Contact) {
                vec![Msg::Autocomplete(AutocompleteMsg::SearchNow)]
            } else {
                vec![]
            }
        }
        Action::ClearStatus => vec![Msg::System(SystemMsg::ClearStatusMessage)],
    }
}

/// Keys that reach the focused field itself
fn translate_field_key(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    match state.ui.focus {
        FieldId::Amount => vec![Msg::Decimal(DecimalMsg::Key(key))],
        FieldId::Contact => match key.code {
            KeyCode::Enter => vec![Msg::Autocomplete(AutocompleteMsg::SearchNow)],
            _ => vec![Msg::Autocomplete(AutocompleteMsg::Key(key))],
        },
        FieldId::DarkTheme => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                vec![Msg::Settings(SettingsMsg::ToggleDarkTheme)]
            }
            _ => vec![],
        },
    }
}

/// Pasted text is inserted at the cursor of the focused input
fn translate_paste(text: &str, state: &AppState) -> Vec<Msg> {
    let text: String = text.chars().filter(|c| !c.is_control()).collect();
    if text.is_empty() {
        return vec![];
    }
    match state.ui.focus {
        FieldId::Amount => text
            .chars()
            .map(|c| {
                Msg::Decimal(DecimalMsg::Key(KeyEvent::new(
                    KeyCode::Char(c),
                    KeyModifiers::NONE,
                )))
            })
            .collect(),
        FieldId::Contact => {
            let input = &state.form.contact_input;
            let mut content: Vec<char> = input.content.chars().collect();
            let at = input.cursor.min(content.len());
            content.splice(at..at, text.chars());
            vec![Msg::Autocomplete(AutocompleteMsg::SetText(
                content.into_iter().collect(),
            ))]
        }
        FieldId::DarkTheme => vec![],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::state::ui::Page,
        domain::{contact::Contact, ui::InputSnapshot},
        presentation::config::keybindings::parse_key_sequence,
    };

    fn create_test_state() -> AppState {
        let mut state = AppState::default();
        for (seq, action) in [
            ("<Tab>", Action::NextField),
            ("<Shift-BackTab>", Action::PrevField),
            ("<F2>", Action::ToggleSettings),
            ("<Ctrl-f>", Action::Search),
        ] {
            let keys = parse_key_sequence(seq).unwrap();
            state.config.config.keybindings.insert(keys, action);
        }
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits() {
        let state = create_test_state();
        let msgs = translate_raw_to_domain(
            RawMsg::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            &state,
        );
        assert_eq!(msgs, vec![Msg::System(SystemMsg::Quit)]);
    }

    #[test]
    fn test_tab_moves_focus() {
        let state = create_test_state();
        let msgs = translate_raw_to_domain(RawMsg::Key(key(KeyCode::Tab)), &state);
        assert_eq!(msgs, vec![Msg::Ui(UiMsg::NextField)]);
    }

    #[test]
    fn test_digits_go_to_amount() {
        let state = create_test_state();
        let msgs = translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('4'))), &state);
        assert_eq!(msgs, vec![Msg::Decimal(DecimalMsg::Key(key(KeyCode::Char('4'))))]);
    }

    #[test]
    fn test_claimed_arrows_navigate_options() {
        let mut state = create_test_state();
        state.ui.focus = FieldId::Contact;
        state
            .ui
            .shortcuts
            .claim(FieldId::Contact, [KeyCode::Up, KeyCode::Down, KeyCode::Enter, KeyCode::Esc]);

        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Up)), &state),
            vec![Msg::Autocomplete(AutocompleteMsg::Navigate(Move::Up))]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Enter)), &state),
            vec![Msg::Autocomplete(AutocompleteMsg::Enter)]
        );
    }

    #[test]
    fn test_unclaimed_enter_searches_now() {
        let mut state = create_test_state();
        state.ui.focus = FieldId::Contact;
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Enter)), &state),
            vec![Msg::Autocomplete(AutocompleteMsg::SearchNow)]
        );
    }

    #[test]
    fn test_space_toggles_dark_theme() {
        let mut state = create_test_state();
        state.ui.page = Page::Settings;
        state.ui.focus = FieldId::DarkTheme;
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char(' '))), &state),
            vec![Msg::Settings(SettingsMsg::ToggleDarkTheme)]
        );
    }

    #[test]
    fn test_results_are_routed_to_contact() {
        let state = create_test_state();
        let rows = vec![Contact::new("ann", "Ann Lee")];
        let msgs = translate_raw_to_domain(
            RawMsg::SearchResults {
                field: FieldId::Contact,
                epoch: 3,
                rows: rows.clone(),
            },
            &state,
        );
        assert_eq!(
            msgs,
            vec![Msg::Autocomplete(AutocompleteMsg::Results { epoch: 3, rows })]
        );

        let stray = translate_raw_to_domain(
            RawMsg::DebounceElapsed {
                field: FieldId::Amount,
                epoch: 1,
            },
            &state,
        );
        assert!(stray.is_empty());
    }

    #[test]
    fn test_paste_into_contact_inserts_at_cursor() {
        let mut state = create_test_state();
        state.ui.focus = FieldId::Contact;
        state.form.contact_input = InputSnapshot {
            content: "jn".into(),
            cursor: 1,
        };
        assert_eq!(
            translate_raw_to_domain(RawMsg::Paste("oh".into()), &state),
            vec![Msg::Autocomplete(AutocompleteMsg::SetText("john".into()))]
        );
    }

    #[test]
    fn test_outside_click_only_for_contact() {
        let state = create_test_state();
        assert_eq!(
            translate_raw_to_domain(RawMsg::OutsideClick(FieldId::Contact), &state),
            vec![Msg::Autocomplete(AutocompleteMsg::OutsideClick)]
        );
        assert!(translate_raw_to_domain(RawMsg::OutsideClick(FieldId::Amount), &state).is_empty());
    }
}
