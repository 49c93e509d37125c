use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// One row of the dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownItem {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DropdownStyles {
    pub border: Style,
    pub option: Style,
    pub focused: Style,
    pub selected: Style,
    pub empty: Style,
}

/// Bordered option list with a focused row and selected markers
#[derive(Debug, Clone)]
pub struct DropdownWidget {
    items: Vec<DropdownItem>,
    focused: Option<usize>,
    styles: DropdownStyles,
    empty_text: String,
}

impl DropdownWidget {
    pub fn new(items: Vec<DropdownItem>, focused: Option<usize>) -> Self {
        Self {
            items,
            focused,
            styles: DropdownStyles::default(),
            empty_text: "No results".to_string(),
        }
    }

    pub fn styles(mut self, styles: DropdownStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Rows needed to show every item, borders included
    pub fn height_for(items: usize, max_rows: u16) -> u16 {
        let rows = u16::try_from(items).unwrap_or(u16::MAX).clamp(1, max_rows.max(1));
        rows + 2
    }

    fn list_item(&self, item: &DropdownItem) -> ListItem<'static> {
        let marker = if item.selected { "✓ " } else { "  " };
        let style = if item.selected {
            self.styles.selected
        } else {
            self.styles.option
        };
        ListItem::new(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(item.label.clone(), style),
        ]))
    }
}

impl Widget for DropdownWidget {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border);

        if self.items.is_empty() {
            Paragraph::new(Span::styled(self.empty_text.clone(), self.styles.empty))
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self.items.iter().map(|item| self.list_item(item)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(self.styles.focused);
        let mut state = ListState::default().with_selected(self.focused);
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn items(n: usize) -> Vec<DropdownItem> {
        (0..n)
            .map(|i| DropdownItem {
                label: format!("option {i}"),
                selected: i == 1,
            })
            .collect()
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_height_for() {
        assert_eq!(DropdownWidget::height_for(0, 6), 3);
        assert_eq!(DropdownWidget::height_for(3, 6), 5);
        assert_eq!(DropdownWidget::height_for(30, 6), 8);
    }

    #[test]
    fn test_renders_markers_and_focus() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let styles = DropdownStyles {
            focused: Style::default().bg(Color::Blue),
            ..Default::default()
        };
        DropdownWidget::new(items(3), Some(2))
            .styles(styles)
            .render(area, &mut buf);

        assert!(row(&buf, 1).contains("  option 0"));
        assert!(row(&buf, 2).contains("✓ option 1"));
        assert_eq!(buf[(1, 3)].bg, Color::Blue);
    }

    #[test]
    fn test_empty_list_shows_text() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        DropdownWidget::new(vec![], None).render(area, &mut buf);
        assert!(row(&buf, 1).contains("No results"));
    }
}
