use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{
    core::{cmd::Cmd, msg::ui::UiMsg, state::form::FieldId},
    domain::shortcuts::ShortcutRegistry,
};

/// Top-level pages of the application
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Page {
    #[default]
    Form,
    Settings,
}

impl Page {
    /// Fields in focus order
    pub fn fields(self) -> &'static [FieldId] {
        match self {
            Page::Form => &[FieldId::Amount, FieldId::Contact],
            Page::Settings => &[FieldId::DarkTheme],
        }
    }

    pub fn toggled(self) -> Page {
        match self {
            Page::Form => Page::Settings,
            Page::Settings => Page::Form,
        }
    }
}

/// UI-related state
#[derive(Debug, Clone)]
pub struct UiState {
    pub page: Page,
    pub focus: FieldId,
    pub shortcuts: ShortcutRegistry<FieldId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            page: Page::Form,
            focus: FieldId::Amount,
            shortcuts: ShortcutRegistry::new(),
        }
    }
}

impl UiState {
    pub fn is_focused(&self, field: FieldId) -> bool {
        self.focus == field
    }

    /// Applies page and focus navigation.
    /// Returns the previously focused field when focus moved.
    pub fn update(&mut self, msg: UiMsg) -> (Option<FieldId>, Vec<Cmd>) {
        let previous = self.focus;
        match msg {
            UiMsg::NextField => self.focus = self.cycle(1),
            UiMsg::PrevField => self.focus = self.cycle(-1),
            UiMsg::ShowPage(page) => self.show(page),
            UiMsg::TogglePage => self.show(self.page.toggled()),
        }

        if previous == self.focus {
            (None, vec![])
        } else {
            (Some(previous), vec![Cmd::RequestRender])
        }
    }

    fn show(&mut self, page: Page) {
        if self.page == page {
            return;
        }
        self.page = page;
        if let Some(first) = page.fields().first() {
            self.focus = *first;
        }
    }

    fn cycle(&self, step: isize) -> FieldId {
        let fields = self.page.fields();
        let Some(current) = fields.iter().position(|f| *f == self.focus) else {
            return fields.first().copied().unwrap_or(self.focus);
        };
        let len = fields.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        fields[next]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_next_field_cycles_within_page() {
        let mut ui = UiState::default();

        let (previous, cmds) = ui.update(UiMsg::NextField);
        assert_eq!(previous, Some(FieldId::Amount));
        assert_eq!(ui.focus, FieldId::Contact);
        assert_eq!(cmds, vec![Cmd::RequestRender]);

        ui.update(UiMsg::NextField);
        assert_eq!(ui.focus, FieldId::Amount);
    }

    #[test]
    fn test_prev_field_wraps() {
        let mut ui = UiState::default();
        ui.update(UiMsg::PrevField);
        assert_eq!(ui.focus, FieldId::Contact);
    }

    #[test]
    fn test_toggle_page_moves_focus() {
        let mut ui = UiState::default();

        let (previous, _) = ui.update(UiMsg::TogglePage);
        assert_eq!(ui.page, Page::Settings);
        assert_eq!(ui.focus, FieldId::DarkTheme);
        assert_eq!(previous, Some(FieldId::Amount));

        ui.update(UiMsg::ShowPage(Page::Form));
        assert_eq!(ui.focus, FieldId::Amount);
    }

    #[test]
    fn test_single_field_page_keeps_focus() {
        let mut ui = UiState::default();
        ui.update(UiMsg::ShowPage(Page::Settings));

        let (previous, cmds) = ui.update(UiMsg::NextField);
        assert_eq!(previous, None);
        assert!(cmds.is_empty());
    }
}
