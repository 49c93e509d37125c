//! Decimal field component
//!
//! Renders the integer and fractional inputs of a [`DecimalField`] on one
//! line: `prefix [integer].[fractional] suffix`.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::{
    core::state::form::FormState,
    domain::{
        decimal::{DecimalField, DecimalPart},
        format::NumberFormat,
        preferences::SharedLayout,
        text,
        ui::InputSnapshot,
    },
    presentation::components::{field_style, Theme},
};

/// Stateless renderer for the amount field
#[derive(Debug, Clone, Default)]
pub struct DecimalFieldComponent;

impl DecimalFieldComponent {
    pub fn new() -> Self {
        Self
    }

    /// Render the field into the single-line `area`
    pub fn view(
        &self,
        form: &FormState,
        focused: bool,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme<'_>,
        layout: &SharedLayout,
    ) {
        let field = &form.amount;
        let style = field_style(theme, field.control(), focused);
        let measure = |s: &str| layout.text_width(s);

        let prefix_width = field
            .prefix
            .as_deref()
            .map(|p| measure(p) + 1)
            .unwrap_or_default();
        let has_fraction = field.scale() > 0;
        let trailing_width = if has_fraction {
            field.fractional_width(measure)
        } else {
            field
                .suffix
                .as_deref()
                .map(|s| measure(s) + 1)
                .unwrap_or_default()
        };

        let [prefix_area, integer_area, separator_area, trailing_area] = Layout::horizontal([
            Constraint::Length(to_u16(prefix_width)),
            Constraint::Min(1),
            Constraint::Length(u16::from(has_fraction)),
            Constraint::Length(to_u16(trailing_width)),
        ])
        .areas(area);

        if let Some(prefix) = &field.prefix {
            frame.render_widget(
                Paragraph::new(format!("{prefix} ")).style(theme.style("affix")),
                prefix_area,
            );
        }

        let placeholder = field.placeholder.as_deref().unwrap_or_default();
        frame.render_widget(
            input_paragraph(&form.integer_input, placeholder, style, theme),
            integer_area,
        );

        if has_fraction {
            frame.render_widget(
                Paragraph::new(form.format.decimal_separator().to_string()).style(style),
                separator_area,
            );
            self.view_fraction(field, &form.fractional_input, frame, trailing_area, style, theme, layout);
        } else if let Some(suffix) = &field.suffix {
            frame.render_widget(
                Paragraph::new(format!(" {suffix}")).style(theme.style("affix")),
                trailing_area,
            );
        }

        if focused {
            let (input, part_area) = match field.focus() {
                DecimalPart::Integer => (&form.integer_input, integer_area),
                DecimalPart::Fractional => (&form.fractional_input, trailing_area),
            };
            frame.set_cursor_position(cursor_position(input, part_area));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn view_fraction(
        &self,
        field: &DecimalField,
        input: &InputSnapshot,
        frame: &mut Frame,
        area: Rect,
        style: Style,
        theme: &Theme<'_>,
        layout: &SharedLayout,
    ) {
        let digits = "0".repeat(usize::from(field.scale()));
        let [digits_area, suffix_area] = Layout::horizontal([
            Constraint::Length(to_u16(layout.text_width(&digits))),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(input_paragraph(input, &digits, style, theme), digits_area);
        if let Some(suffix) = &field.suffix {
            frame.render_widget(
                Paragraph::new(format!(" {suffix}")).style(theme.style("affix")),
                suffix_area,
            );
        }
    }
}

fn input_paragraph<'a>(
    input: &'a InputSnapshot,
    placeholder: &'a str,
    style: Style,
    theme: &Theme<'_>,
) -> Paragraph<'a> {
    if input.content.is_empty() {
        Paragraph::new(placeholder).style(theme.style("placeholder"))
    } else {
        Paragraph::new(input.content.as_str()).style(style)
    }
}

/// Screen position of the text cursor of `input` drawn at `area`
pub(crate) fn cursor_position(input: &InputSnapshot, area: Rect) -> Position {
    let before: String = input.content.chars().take(input.cursor).collect();
    let offset = to_u16(text::text_width(&before)).min(area.width.saturating_sub(1));
    Position::new(area.x + offset, area.y)
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::{infrastructure::config::FormConfig, presentation::config::Styles};

    fn render(form: &FormState, focused: bool) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(30, 1)).unwrap();
        let styles = Styles::default();
        let theme = Theme::new(&styles, false);
        let layout = SharedLayout::default();
        terminal
            .draw(|f| {
                let area = f.area();
                DecimalFieldComponent::new().view(form, focused, f, area, &theme, &layout)
            })
            .unwrap();
        terminal
    }

    fn line(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol())
            .collect::<String>()
    }

    fn form(config: FormConfig) -> FormState {
        FormState::from_config(&config)
    }

    #[test]
    fn test_renders_placeholder_and_suffix() {
        let form = form(FormConfig {
            prefix: Some("$".into()),
            suffix: Some("EUR".into()),
            placeholder: Some("0".into()),
            ..Default::default()
        });
        let text = line(&render(&form, false));

        assert!(text.starts_with("$ 0"));
        assert!(text.trim_end().ends_with(".00 EUR"));
    }

    #[test]
    fn test_renders_parts() {
        let mut form = form(FormConfig::default());
        form.integer_input = InputSnapshot::new("42");
        form.fractional_input = InputSnapshot::new("5");
        let text = line(&render(&form, false));

        assert!(text.starts_with("42"));
        assert!(text.trim_end().ends_with(".5"));
    }

    #[test]
    fn test_scale_zero_has_no_separator() {
        let mut form = form(FormConfig {
            scale: 0,
            suffix: Some("pcs".into()),
            ..Default::default()
        });
        form.integer_input = InputSnapshot::new("7");
        let text = line(&render(&form, false));

        assert!(!text.contains('.'));
        assert!(text.trim_end().ends_with(" pcs"));
    }

    #[test]
    fn test_cursor_follows_integer_input() {
        let mut form = form(FormConfig::default());
        form.integer_input = InputSnapshot::new("123");
        let mut terminal = render(&form, true);

        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3, 0));
    }

    #[test]
    fn test_cursor_position_clamps_to_area() {
        let input = InputSnapshot::new("123456");
        let area = Rect::new(2, 1, 4, 1);
        assert_eq!(cursor_position(&input, area), Position::new(5, 1));
    }
}
