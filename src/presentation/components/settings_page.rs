//! Settings page component

use ratatui::{prelude::*, widgets::Paragraph};

use crate::presentation::{components::Theme, widgets::toggle::ToggleWidget};

const DARK_THEME_LABEL: &str = "Dark theme";
const DARK_THEME_HELP: &str = "Switches the palette of every page";

#[derive(Debug, Clone, Default)]
pub struct SettingsPage;

impl SettingsPage {
    pub fn new() -> Self {
        Self
    }

    /// Render the settings and return the area of the dark theme toggle
    ///
    /// `dark_theme` is the value held by the layout store.
    pub fn view(
        &self,
        dark_theme: bool,
        focused: bool,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme<'_>,
    ) -> Rect {
        let [toggle_area, help_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let label_style = if focused {
            theme.style("field.focused")
        } else {
            theme.style("field")
        };
        let toggle = ToggleWidget::new(DARK_THEME_LABEL, dark_theme)
            .label_style(label_style)
            .on_style(theme.style("toggle.on"))
            .off_style(theme.style("toggle.off"));
        frame.render_widget(toggle, toggle_area);
        frame.render_widget(
            Paragraph::new(DARK_THEME_HELP).style(theme.style("placeholder")),
            help_area,
        );

        toggle_area
    }
}
