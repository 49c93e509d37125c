use serde::{Deserialize, Serialize};

/// Content and cursor of a single-line input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub content: String,
    /// Cursor column, in characters
    pub cursor: usize,
}

impl InputSnapshot {
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    /// Replaces the content, keeping the cursor inside it.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.cursor.min(self.content.chars().count());
    }

    /// Replaces the content and moves the cursor to its end.
    pub fn reset(&mut self, content: impl Into<String>) {
        *self = Self::new(content);
    }
}

/// Which way a dropdown unfolds from its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropDirection {
    #[default]
    Down,
    Up,
}

impl DropDirection {
    /// Drops up when fewer than `needed` rows are left below the input.
    pub fn decide(input_bottom: u16, viewport_height: u16, needed: u16) -> Self {
        if viewport_height.saturating_sub(input_bottom) < needed {
            DropDirection::Up
        } else {
            DropDirection::Down
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_snapshot_cursor_at_end() {
        let snap = InputSnapshot::new("héllo");
        assert_eq!(snap.cursor, 5);
    }

    #[test]
    fn test_set_content_clamps_cursor() {
        let mut snap = InputSnapshot::new("hello");
        snap.set_content("hi");
        assert_eq!(snap.cursor, 2);
    }

    #[test]
    fn test_drop_direction() {
        assert_eq!(DropDirection::decide(5, 40, 8), DropDirection::Down);
        assert_eq!(DropDirection::decide(35, 40, 8), DropDirection::Up);
        assert_eq!(DropDirection::decide(32, 40, 8), DropDirection::Down);
    }
}
