//! Autocomplete field component
//!
//! Draws the search input and, while open, the option dropdown. The drop
//! direction is decided once per open and kept until the next one.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::{
    core::state::form::FormState,
    domain::{
        autocomplete::{AutocompleteItem, Phase},
        ui::DropDirection,
    },
    presentation::{
        components::{decimal_field::cursor_position, field_style, Theme},
        widgets::dropdown::{DropdownItem, DropdownStyles, DropdownWidget},
    },
};

const PLACEHOLDER: &str = "Type to search";
const SEARCHING: &str = "…";

/// Rectangles drawn by the component, used for outside-click hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutocompleteAreas {
    pub input: Rect,
    pub dropdown: Option<Rect>,
}

#[derive(Debug, Clone, Default)]
pub struct AutocompleteFieldComponent {
    direction: DropDirection,
    /// `open_count` the current direction was decided for
    decided_for: Option<u64>,
}

impl AutocompleteFieldComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> DropDirection {
        self.direction
    }

    /// Render the input into `area` and the dropdown inside `viewport`
    pub fn view(
        &mut self,
        form: &FormState,
        focused: bool,
        frame: &mut Frame,
        area: Rect,
        viewport: Rect,
        theme: &Theme<'_>,
    ) -> AutocompleteAreas {
        let contact = &form.contact;
        let style = field_style(theme, contact.control(), focused);
        let style = if contact.input_errors().is_some() {
            theme.style("field.invalid")
        } else {
            style
        };

        let text = contact.display_text();
        let input = if text.is_empty() {
            Paragraph::new(PLACEHOLDER).style(theme.style("placeholder"))
        } else {
            Paragraph::new(text).style(style)
        };
        frame.render_widget(input, area);

        if contact.phase() == Phase::Searching && area.width > 0 {
            let indicator = Rect::new(area.right() - 1, area.y, 1, 1);
            frame.render_widget(
                Paragraph::new(SEARCHING).style(theme.style("placeholder")),
                indicator,
            );
        }

        if focused && !contact.control().is_disabled() {
            frame.set_cursor_position(cursor_position(&form.contact_input, area));
        }

        let mut areas = AutocompleteAreas {
            input: area,
            dropdown: None,
        };
        if !contact.is_open() {
            return areas;
        }

        let options = contact.options().unwrap_or_default();
        let height = DropdownWidget::height_for(options.len(), form.dropdown_rows);
        if self.decided_for != Some(contact.open_count()) {
            self.direction = DropDirection::decide(area.bottom(), viewport.bottom(), height);
            self.decided_for = Some(contact.open_count());
            log::debug!("dropdown opens {:?}", self.direction);
        }

        let dropdown_area = dropdown_rect(area, viewport, height, self.direction);
        if dropdown_area.is_empty() {
            return areas;
        }

        let items = options
            .iter()
            .map(|option| DropdownItem {
                label: option.display(),
                selected: contact.is_option_selected(option),
            })
            .collect();
        let styles = DropdownStyles {
            border: theme.style("field"),
            option: theme.style("option"),
            focused: theme.style("option.focused"),
            selected: theme.style("option.selected"),
            empty: theme.style("placeholder"),
        };
        frame.render_widget(
            DropdownWidget::new(items, contact.focused_option()).styles(styles),
            dropdown_area,
        );
        areas.dropdown = Some(dropdown_area);
        areas
    }
}

fn dropdown_rect(input: Rect, viewport: Rect, height: u16, direction: DropDirection) -> Rect {
    match direction {
        DropDirection::Down => {
            let y = input.bottom();
            let height = height.min(viewport.bottom().saturating_sub(y));
            Rect::new(input.x, y, input.width, height)
        }
        DropDirection::Up => {
            let height = height.min(input.y.saturating_sub(viewport.y));
            Rect::new(input.x, input.y - height, input.width, height)
        }
    }
}
