use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{
    core::{
        msg::{autocomplete::AutocompleteMsg, decimal::DecimalMsg},
        textarea_engine::TextAreaEngine,
    },
    domain::{
        autocomplete::{Autocomplete, AutocompleteEffect},
        contact::Contact,
        decimal::{DecimalEvent, DecimalField, DecimalPart},
        format::{LocaleFormat, NumberFormat},
        ui::InputSnapshot,
    },
    infrastructure::config::FormConfig,
};

/// Identifies a focusable field; also the owner key for listeners and shortcuts
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize,
)]
pub enum FieldId {
    Amount,
    Contact,
    DarkTheme,
}

/// State of the demo form page
#[derive(Debug, Clone)]
pub struct FormState {
    pub amount: DecimalField,
    pub integer_input: InputSnapshot,
    pub fractional_input: InputSnapshot,
    pub contact: Autocomplete<Contact>,
    pub contact_input: InputSnapshot,
    pub last_selected: Option<Contact>,
    pub format: LocaleFormat,
    pub debounce_ms: u64,
    pub dropdown_rows: u16,
}

impl Default for FormState {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

impl FormState {
    pub fn from_config(config: &FormConfig) -> Self {
        let mut amount = DecimalField::new(config.scale)
            .with_name("amount")
            .required(config.amount_required);
        if let Some(prefix) = &config.prefix {
            amount = amount.with_prefix(prefix);
        }
        if let Some(suffix) = &config.suffix {
            amount = amount.with_suffix(suffix);
        }
        if let Some(placeholder) = &config.placeholder {
            amount = amount.with_placeholder(placeholder);
        }

        let contact = Autocomplete::new()
            .with_value(config.initial_contact.clone())
            .required(config.contact_required);

        Self {
            amount,
            integer_input: InputSnapshot::default(),
            fractional_input: InputSnapshot::default(),
            contact,
            contact_input: InputSnapshot::default(),
            last_selected: None,
            format: LocaleFormat::new(config.decimal_separator),
            debounce_ms: config.debounce_ms,
            dropdown_rows: config.dropdown_rows,
        }
    }

    pub fn update_amount(
        &mut self,
        msg: DecimalMsg,
        engine: &dyn TextAreaEngine,
    ) -> Vec<DecimalEvent> {
        let events = match msg {
            DecimalMsg::Key(key) => self.amount_key(key, engine),
            DecimalMsg::FocusPart(part) => self.amount.focus_part(part),
            DecimalMsg::Blur => self.amount.blur(&self.format),
            DecimalMsg::SetScale(scale) => self.amount.set_scale(scale, &self.format),
            DecimalMsg::WriteValue(value) => {
                self.amount.write_value(value.as_deref(), &self.format);
                self.integer_input.reset(self.amount.parts().integer.clone());
                self.fractional_input
                    .reset(self.amount.parts().fractional.clone());
                vec![]
            }
            DecimalMsg::SetDisabled(disabled) => {
                self.amount.set_disabled(disabled);
                vec![]
            }
        };
        self.sync_amount_inputs();
        events
    }

    pub fn update_contact(
        &mut self,
        msg: AutocompleteMsg,
        engine: &dyn TextAreaEngine,
    ) -> Vec<AutocompleteEffect<Contact>> {
        let effects = match msg {
            AutocompleteMsg::Initialize => self.contact.initialize(),
            AutocompleteMsg::Key(key) => {
                let edited = engine.apply_keys(&self.contact_input, &[key]);
                if edited.content == self.contact_input.content {
                    self.contact_input = edited;
                    vec![]
                } else {
                    let content = edited.content.clone();
                    self.contact_input = edited;
                    self.contact.edit_text(content)
                }
            }
            AutocompleteMsg::SetText(text) => self.contact.edit_text(text),
            AutocompleteMsg::SearchNow => self.contact.search_now(None),
            AutocompleteMsg::DebounceElapsed(epoch) => self.contact.debounce_elapsed(epoch),
            AutocompleteMsg::Results { epoch, rows } => self.contact.results(epoch, rows),
            AutocompleteMsg::QueryFailed { epoch, .. } => {
                self.contact.query_failed(epoch);
                vec![]
            }
            AutocompleteMsg::Fetched { value, option } => self.contact.fetched(value, option),
            AutocompleteMsg::Navigate(movement) => {
                self.contact.move_focus(movement);
                vec![]
            }
            AutocompleteMsg::Enter => self.contact.enter(),
            AutocompleteMsg::Escape => self.contact.escape(),
            AutocompleteMsg::Select(option) => self.contact.select(option, None),
            AutocompleteMsg::OutsideClick => self.contact.outside_click(),
            AutocompleteMsg::SetDisabled(disabled) => self.contact.set_disabled(disabled),
        };

        for effect in &effects {
            if let AutocompleteEffect::Selected(selected) = effect {
                self.last_selected = selected.clone();
            }
        }
        self.sync_contact_input();
        effects
    }

    fn amount_key(&mut self, key: KeyEvent, engine: &dyn TextAreaEngine) -> Vec<DecimalEvent> {
        let separator = self.format.decimal_separator();
        match (self.amount.focus(), key.code) {
            (DecimalPart::Integer, KeyCode::Char(c)) if c == separator => {
                if let Some(events) = self.amount.separator_typed(c, &self.format) {
                    self.fractional_input.cursor = 0;
                    return events;
                }
                return vec![];
            }
            (DecimalPart::Integer, KeyCode::Right)
                if self.amount.scale() > 0
                    && self.integer_input.cursor >= self.integer_input.content.chars().count() =>
            {
                self.fractional_input.cursor = 0;
                return self.amount.focus_part(DecimalPart::Fractional);
            }
            (DecimalPart::Fractional, KeyCode::Left | KeyCode::Backspace)
                if self.fractional_input.cursor == 0 =>
            {
                self.integer_input.cursor = self.integer_input.content.chars().count();
                return self.amount.focus_part(DecimalPart::Integer);
            }
            (part, KeyCode::Char(c)) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !accepts_char(part, c) {
                    return vec![];
                }
            }
            _ => {}
        }

        match self.amount.focus() {
            DecimalPart::Integer => {
                let edited = engine.apply_keys(&self.integer_input, &[key]);
                let changed = edited.content != self.integer_input.content;
                self.integer_input = edited;
                if changed {
                    let raw = self.integer_input.content.clone();
                    self.amount.edit_integer(raw, &self.format)
                } else {
                    vec![]
                }
            }
            DecimalPart::Fractional => {
                let edited = engine.apply_keys(&self.fractional_input, &[key]);
                let changed = edited.content != self.fractional_input.content;
                self.fractional_input = edited;
                if changed {
                    let raw = self.fractional_input.content.clone();
                    self.amount.edit_fractional(raw, &self.format)
                } else {
                    vec![]
                }
            }
        }
    }

    /// Copies normalized parts back into the inputs after a resync.
    fn sync_amount_inputs(&mut self) {
        let parts = self.amount.parts();
        if self.integer_input.content != parts.integer {
            self.integer_input.set_content(parts.integer.clone());
        }
        if self.fractional_input.content != parts.fractional {
            self.fractional_input.set_content(parts.fractional.clone());
        }
    }

    fn sync_contact_input(&mut self) {
        if self.contact_input.content != self.contact.input() {
            self.contact_input.reset(self.contact.input());
        }
    }
}

fn accepts_char(part: DecimalPart, c: char) -> bool {
    match part {
        DecimalPart::Integer => c.is_ascii_digit() || c == '-',
        DecimalPart::Fractional => c.is_ascii_digit(),
    }
}
