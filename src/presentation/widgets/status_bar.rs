use ratatui::{prelude::*, widgets::Paragraph};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext<'a> {
    /// `(keys, description)` pairs shown on the hint line
    pub hints: &'a [(String, String)],
    pub hint_style: Style,
    pub message_style: Style,
}

pub struct StatusBarWidget<'a> {
    message: Option<&'a str>,
    ctx: ViewContext<'a>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(message: Option<&'a str>, ctx: ViewContext<'a>) -> Self {
        Self { message, ctx }
    }

    pub fn hint_line(&self) -> String {
        self.ctx
            .hints
            .iter()
            .map(|(keys, description)| format!("{keys} {description}"))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(1), // Key hints
                Constraint::Length(1), // Status message
            ],
        )
        .split(area);

        let hints = Span::styled(self.hint_line(), self.ctx.hint_style.italic());
        Paragraph::new(hints).render(layout[1], buf);

        Paragraph::new(self.message.unwrap_or_default())
            .style(self.ctx.message_style)
            .render(layout[2], buf);
    }
}
