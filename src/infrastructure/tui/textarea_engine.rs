use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{CursorMove, TextArea};

use crate::core::textarea_engine::TextAreaEngine;
use crate::domain::ui::InputSnapshot;

/// Production engine based on tui-textarea. It constructs a temporary TextArea,
/// hydrates it from the given snapshot, applies keys, then extracts the new snapshot.
///
/// Inputs are single-line: keys that would split the line are dropped.
pub struct TuiTextAreaEngine;

impl TuiTextAreaEngine {
    fn restore_textarea_from_snapshot(textarea: &mut TextArea<'_>, snapshot: &InputSnapshot) {
        if !snapshot.content.is_empty() {
            textarea.insert_str(&snapshot.content);
        }
        let column = u16::try_from(snapshot.cursor).unwrap_or(u16::MAX);
        textarea.move_cursor(CursorMove::Jump(0, column));
    }

    fn breaks_line(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => true,
            KeyCode::Char('m') | KeyCode::Char('j') => {
                key.modifiers.contains(KeyModifiers::CONTROL)
            }
            _ => false,
        }
    }
}

impl TextAreaEngine for TuiTextAreaEngine {
    fn apply_keys(&self, snapshot: &InputSnapshot, keys: &[KeyEvent]) -> InputSnapshot {
        let mut textarea = TextArea::default();
        Self::restore_textarea_from_snapshot(&mut textarea, snapshot);
        for key in keys.iter().filter(|k| !Self::breaks_line(k)) {
            textarea.input(Event::Key(*key));
        }
        let content = textarea.lines().concat();
        let (_, column) = textarea.cursor();
        InputSnapshot {
            cursor: column.min(content.chars().count()),
            content,
        }
    }
}
