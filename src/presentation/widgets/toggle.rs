use ratatui::{prelude::*, widgets::Paragraph};

/// On/off switch with a label, e.g. `Dark theme  [ ON  ]`
#[derive(Debug, Clone)]
pub struct ToggleWidget<'a> {
    label: &'a str,
    on: bool,
    label_style: Style,
    on_style: Style,
    off_style: Style,
}

impl<'a> ToggleWidget<'a> {
    pub fn new(label: &'a str, on: bool) -> Self {
        Self {
            label,
            on,
            label_style: Style::default(),
            on_style: Style::default().fg(Color::Green),
            off_style: Style::default().dim(),
        }
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    pub fn on_style(mut self, style: Style) -> Self {
        self.on_style = style;
        self
    }

    pub fn off_style(mut self, style: Style) -> Self {
        self.off_style = style;
        self
    }

    fn switch(&self) -> Span<'static> {
        if self.on {
            Span::styled("[ ON  ]", self.on_style)
        } else {
            Span::styled("[ OFF ]", self.off_style)
        }
    }
}

impl<'a> Widget for ToggleWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let line = Line::from(vec![
            Span::styled(self.label, self.label_style),
            Span::raw("  "),
            self.switch(),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
