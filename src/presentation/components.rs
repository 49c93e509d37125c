//! Component collection and management
//!
//! Components are renderers that receive state as parameters. The only
//! state they keep is presentational: the drop direction of the dropdown
//! and the screen areas used for outside-click hit testing.

use std::collections::HashMap;

use ratatui::{prelude::*, widgets::Block};

use crate::{
    core::state::{form::FieldId, ui::Page, AppState},
    domain::{
        control::{FieldControl, FieldStatus},
        preferences::SharedLayout,
    },
    presentation::{
        config::{
            keybindings::{key_event_to_string, Action},
            KeyBindings, Styles,
        },
        widgets::{
            status_bar::{StatusBarWidget, ViewContext as StatusBarViewContext},
            tab_bar::TabBarWidget,
        },
    },
};

pub mod autocomplete_field;
pub mod decimal_field;
pub mod settings_page;

pub use autocomplete_field::AutocompleteFieldComponent;
pub use decimal_field::DecimalFieldComponent;
pub use settings_page::SettingsPage;

/// Widest an input is drawn
const INPUT_WIDTH: u16 = 40;

/// Styles resolved for the active palette
#[derive(Debug, Clone, Copy)]
pub struct Theme<'a> {
    styles: &'a Styles,
    dark: bool,
}

impl<'a> Theme<'a> {
    pub fn new(styles: &'a Styles, dark: bool) -> Self {
        Self { styles, dark }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn style(&self, key: &str) -> Style {
        self.styles.style(key, self.dark)
    }
}

/// Style of an input from its control status and focus
pub fn field_style<T: Clone + PartialEq>(
    theme: &Theme<'_>,
    control: &FieldControl<T>,
    focused: bool,
) -> Style {
    match control.status() {
        FieldStatus::Disabled => theme.style("field.disabled"),
        FieldStatus::Invalid if control.is_touched() => theme.style("field.invalid"),
        _ if focused => theme.style("field.focused"),
        _ => theme.style("field"),
    }
}

/// Screen areas drawn for each field in the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAreas(HashMap<FieldId, Vec<Rect>>);

impl FieldAreas {
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn record(&mut self, field: FieldId, area: Rect) {
        self.0.entry(field).or_default().push(area);
    }

    pub fn get(&self, field: FieldId) -> &[Rect] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the cell at `(x, y)` belongs to `field`
    pub fn contains(&self, field: FieldId, x: u16, y: u16) -> bool {
        self.get(field)
            .iter()
            .any(|area| area.contains(Position::new(x, y)))
    }
}

/// Collection of all components
pub struct Components {
    pub amount: DecimalFieldComponent,
    pub contact: AutocompleteFieldComponent,
    pub settings: SettingsPage,
    areas: FieldAreas,
}

impl Components {
    /// Create a new component collection
    pub fn new() -> Self {
        Self {
            amount: DecimalFieldComponent::new(),
            contact: AutocompleteFieldComponent::new(),
            settings: SettingsPage::new(),
            areas: FieldAreas::default(),
        }
    }

    /// Areas recorded by the last render
    pub fn areas(&self) -> &FieldAreas {
        &self.areas
    }

    /// Render all components
    ///
    /// The palette follows the shared layout store.
    pub fn render(&mut self, frame: &mut Frame, state: &AppState, layout: &SharedLayout) {
        let styles = &state.config.config.styles;
        let theme = Theme::new(styles, layout.dark_theme());
        let area = frame.area();
        self.areas.clear();

        frame.render_widget(Block::default().style(theme.style("base")), area);

        // [tab bar, page, status bar (2 rows)]
        let [tabs_area, page_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);

        frame.render_widget(
            TabBarWidget::new(state.ui.page)
                .style(theme.style("title"))
                .highlight_style(theme.style("title").reversed()),
            tabs_area,
        );

        let page_area = page_area.inner(Margin::new(1, 1));
        match state.ui.page {
            Page::Form => self.render_form(frame, state, page_area, &theme, layout),
            Page::Settings => {
                let focused = state.ui.is_focused(FieldId::DarkTheme);
                let toggle_area =
                    self.settings
                        .view(layout.dark_theme(), focused, frame, page_area, &theme);
                self.areas.record(FieldId::DarkTheme, toggle_area);
            }
        }

        let hints = hints(&state.config.config.keybindings, state.ui.page);
        let ctx = StatusBarViewContext {
            hints: &hints,
            hint_style: theme.style("placeholder"),
            message_style: theme.style("status"),
        };
        frame.render_widget(
            StatusBarWidget::new(state.system.status_message.as_deref(), ctx),
            status_area,
        );
    }

    fn render_form(
        &mut self,
        frame: &mut Frame,
        state: &AppState,
        area: Rect,
        theme: &Theme<'_>,
        layout: &SharedLayout,
    ) {
        let [amount_label, amount_area, _, contact_label, contact_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);
        let narrow = |rect: Rect| Rect {
            width: rect.width.min(INPUT_WIDTH),
            ..rect
        };

        let form = &state.form;
        frame.render_widget(
            label("Amount", form.amount.control().is_required(), theme),
            amount_label,
        );
        let amount_area = narrow(amount_area);
        self.amount.view(
            form,
            state.ui.is_focused(FieldId::Amount),
            frame,
            amount_area,
            theme,
            layout,
        );
        self.areas.record(FieldId::Amount, amount_area);

        frame.render_widget(
            label("Contact", form.contact.control().is_required(), theme),
            contact_label,
        );
        let contact_area = narrow(contact_area);
        let drawn = self.contact.view(
            form,
            state.ui.is_focused(FieldId::Contact),
            frame,
            contact_area,
            area,
            theme,
        );
        self.areas.record(FieldId::Contact, drawn.input);
        if let Some(dropdown) = drawn.dropdown {
            self.areas.record(FieldId::Contact, dropdown);
        }
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::new()
    }
}

fn label<'a>(text: &'a str, required: bool, theme: &Theme<'_>) -> Line<'a> {
    let mut spans = vec![Span::styled(text, theme.style("title"))];
    if required {
        spans.push(Span::styled(" *", theme.style("field.invalid")));
    }
    Line::from(spans)
}

/// Key hints for the status bar, in a fixed order
fn hints(keybindings: &KeyBindings, page: Page) -> Vec<(String, String)> {
    let toggle = match page {
        Page::Form => "settings",
        Page::Settings => "form",
    };
    [
        (Action::NextField, "next field"),
        (Action::ToggleSettings, toggle),
        (Action::Search, "search"),
        (Action::Quit, "quit"),
    ]
    .into_iter()
    .filter_map(|(action, description)| {
        keybindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(keys, _)| {
                keys.iter()
                    .map(|key| format!("<{}>", key_event_to_string(key)))
                    .collect::<String>()
            })
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
            .map(|keys| (keys, description.to_string()))
    })
    .collect()
}
