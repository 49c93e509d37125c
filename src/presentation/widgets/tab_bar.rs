use ratatui::prelude::*;
use ratatui::widgets::{Tabs, Widget};
use strum::IntoEnumIterator;

use crate::core::state::ui::Page;

#[derive(Clone)]
pub struct TabBarWidget {
    active: Page,
    style: Style,
    highlight_style: Style,
}

impl TabBarWidget {
    pub fn new(active: Page) -> Self {
        Self {
            active,
            style: Style::default(),
            highlight_style: Style::default().reversed(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    pub fn titles(&self) -> Vec<String> {
        Page::iter().map(|page| page.to_string()).collect()
    }

    fn active_index(&self) -> usize {
        Page::iter()
            .position(|page| page == self.active)
            .unwrap_or_default()
    }
}

impl Widget for TabBarWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let tabs = Tabs::new(self.titles())
            .select(self.active_index())
            .style(self.style)
            .highlight_style(self.highlight_style);

        tabs.render(area, buf);
    }
}
