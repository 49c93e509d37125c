//! Shared layout and display preferences
//!
//! The store is owned by the application and handed explicitly to whoever
//! needs it. Readers and writers go through [`SharedLayout`].

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::domain::text;

/// Display preferences that outlive a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub dark_theme: bool,
}

/// Cloneable handle to the process-wide [`Layout`]
#[derive(Debug, Clone, Default)]
pub struct SharedLayout {
    inner: Arc<RwLock<Layout>>,
}

impl SharedLayout {
    pub fn new(layout: Layout) -> Self {
        Self {
            inner: Arc::new(RwLock::new(layout)),
        }
    }

    pub fn snapshot(&self) -> Layout {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn dark_theme(&self) -> bool {
        self.snapshot().dark_theme
    }

    /// Returns whether the stored flag changed.
    pub fn set_dark_theme(&self, dark_theme: bool) -> bool {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.dark_theme == dark_theme {
            return false;
        }
        guard.dark_theme = dark_theme;
        true
    }

    /// Width of `s` in terminal cells.
    pub fn text_width(&self, s: &str) -> usize {
        text::text_width(s)
    }

    /// Whether both handles point at the same store.
    pub fn same_store(&self, other: &SharedLayout) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_clones_share_state() {
        let layout = SharedLayout::new(Layout { dark_theme: false });
        let other = layout.clone();

        assert!(other.set_dark_theme(true));
        assert!(layout.dark_theme());
        assert!(layout.same_store(&other));
    }

    #[test]
    fn test_set_same_value_reports_no_change() {
        let layout = SharedLayout::new(Layout { dark_theme: true });
        assert!(!layout.set_dark_theme(true));
    }

    #[test]
    fn test_text_width() {
        let layout = SharedLayout::default();
        assert_eq!(layout.text_width("00"), 2);
        assert_eq!(layout.text_width("円"), 2);
    }
}
