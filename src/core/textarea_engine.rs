use crossterm::event::KeyEvent;

use crate::domain::ui::InputSnapshot;

/// Engine interface that applies a sequence of key events to a single-line
/// input snapshot and returns the resulting snapshot. The implementation should
/// be deterministic and free of external side effects so that it can be used
/// from the pure update path.
pub trait TextAreaEngine {
    /// Apply keys to the given snapshot and return the updated snapshot.
    fn apply_keys(&self, snapshot: &InputSnapshot, keys: &[KeyEvent]) -> InputSnapshot;
}

/// No-op engine used for tests or when no editing should occur.
pub struct NoopTextAreaEngine;

impl TextAreaEngine for NoopTextAreaEngine {
    fn apply_keys(&self, snapshot: &InputSnapshot, _keys: &[KeyEvent]) -> InputSnapshot {
        snapshot.clone()
    }
}
