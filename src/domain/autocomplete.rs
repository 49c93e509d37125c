//! Search-and-select state machine behind the autocomplete field
//!
//! The state is pure: every operation mutates the state and returns the
//! [`AutocompleteEffect`]s the host has to carry out (start a debounce timer,
//! run a query, register the outside-click listener, ...). Asynchronous
//! results come back tagged with the [`Epoch`] they were issued for; a result
//! whose epoch is no longer current is dropped, which gives switch-to-latest
//! semantics regardless of the order responses arrive in.

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::domain::{
    control::{FieldControl, FieldErrors, FieldStatus},
    navigation::{self, Move},
    text,
};

/// A result row that can be offered and selected
pub trait AutocompleteItem: Clone + PartialEq + Debug {
    /// The internal value bound to the form when the item is selected
    type Value: Clone + PartialEq + Debug + Display;

    /// Text shown for the item in the option list
    fn display(&self) -> String;

    /// Internal value of the item
    fn value(&self) -> Self::Value;
}

/// Counter bumped on every text edit or selection
pub type Epoch = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Closed,
    Searching,
    OpenWithOptions,
    OpenEmpty,
}

/// Side effects requested by the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum AutocompleteEffect<A: AutocompleteItem> {
    /// (Re)start the debounce timer for `epoch`
    ScheduleSearch { epoch: Epoch },
    /// Drop any pending timer or query
    CancelSearch,
    /// Run the query right away
    Query { text: String, epoch: Epoch },
    /// Resolve the option matching an initial value
    Fetch { value: A::Value },
    /// An option (or nothing) was selected
    Selected(Option<A>),
    /// The dropdown was shown
    Opened,
    /// The dropdown was hidden
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Autocomplete<A: AutocompleteItem> {
    input: String,
    input_errors: Option<FieldErrors>,
    control: FieldControl<A::Value>,
    selection: Option<A>,
    options: Option<Vec<A>>,
    open: bool,
    open_count: u64,
    focused_option: Option<usize>,
    auto_search: bool,
    allow_options: bool,
    epoch: Epoch,
    in_flight: Option<Epoch>,
    last_query: Option<String>,
}

impl<A: AutocompleteItem> Default for Autocomplete<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AutocompleteItem> Autocomplete<A> {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            input_errors: None,
            control: FieldControl::new(None),
            selection: None,
            options: None,
            open: false,
            open_count: 0,
            focused_option: None,
            auto_search: true,
            allow_options: true,
            epoch: 0,
            in_flight: None,
            last_query: None,
        }
    }

    pub fn with_value(mut self, value: Option<A::Value>) -> Self {
        self.control.set_value(value);
        self.sync_status();
        self
    }

    pub fn auto_search(mut self, auto_search: bool) -> Self {
        self.auto_search = auto_search;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.control = self.control.required(required);
        self.sync_status();
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_errors(&self) -> Option<&FieldErrors> {
        self.input_errors.as_ref()
    }

    pub fn value(&self) -> Option<&A::Value> {
        self.control.value()
    }

    pub fn control(&self) -> &FieldControl<A::Value> {
        &self.control
    }

    pub fn selection(&self) -> Option<&A> {
        self.selection.as_ref()
    }

    pub fn options(&self) -> Option<&[A]> {
        self.options.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of times the dropdown has been opened so far.
    pub fn open_count(&self) -> u64 {
        self.open_count
    }

    pub fn focused_option(&self) -> Option<usize> {
        self.focused_option
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn allows_options(&self) -> bool {
        self.allow_options
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Searching
        } else if !self.open {
            Phase::Closed
        } else if self.options.as_ref().is_some_and(|o| !o.is_empty()) {
            Phase::OpenWithOptions
        } else {
            Phase::OpenEmpty
        }
    }

    /// Text shown in place of the input while disabled.
    pub fn display_text(&self) -> String {
        if !self.control.is_disabled() {
            return self.input.clone();
        }
        match (&self.selection, self.control.value()) {
            (Some(selection), _) => selection.display(),
            (None, Some(value)) => value.to_string(),
            (None, None) => String::new(),
        }
    }

    pub fn is_option_selected(&self, option: &A) -> bool {
        self.control.value() == Some(&option.value())
    }

    /// Effects to run once the field is mounted: a non-empty initial value is
    /// resolved to its option without searching.
    pub fn initialize(&self) -> Vec<AutocompleteEffect<A>> {
        match self.control.value() {
            Some(value) if !text::is_blank(&value.to_string()) => {
                vec![AutocompleteEffect::Fetch {
                    value: value.clone(),
                }]
            }
            _ => vec![],
        }
    }

    /// Applies the option resolved for the initial value. Ignored if the
    /// value was changed meanwhile.
    pub fn fetched(&mut self, value: A::Value, option: Option<A>) -> Vec<AutocompleteEffect<A>> {
        if self.control.value() != Some(&value) {
            log::debug!("autocomplete: dropping fetch result for stale value {value}");
            return vec![];
        }
        self.select(option, Some(value))
    }

    pub fn edit_text(&mut self, text: impl Into<String>) -> Vec<AutocompleteEffect<A>> {
        let text = text.into();
        if self.control.is_disabled() || text == self.input {
            return vec![];
        }
        self.input = text;
        self.epoch += 1;
        self.focused_option = None;
        // An unanswered query is superseded by this edit; its text must not
        // count as already searched.
        if self.in_flight.take().is_some() {
            self.last_query = None;
        }

        if text::is_blank(&self.input) {
            self.in_flight = None;
            self.last_query = None;
            let mut effects = vec![AutocompleteEffect::CancelSearch];
            effects.extend(self.close());
            effects
        } else if self.auto_search && self.allow_options {
            vec![AutocompleteEffect::ScheduleSearch { epoch: self.epoch }]
        } else {
            vec![]
        }
    }

    /// The debounce timer for `epoch` fired.
    pub fn debounce_elapsed(&mut self, epoch: Epoch) -> Vec<AutocompleteEffect<A>> {
        if epoch != self.epoch
            || !self.auto_search
            || !self.allow_options
            || text::is_blank(&self.input)
        {
            return vec![];
        }
        if self.last_query.as_deref() == Some(self.input.as_str()) {
            return vec![];
        }
        self.last_query = Some(self.input.clone());
        self.in_flight = Some(epoch);
        vec![AutocompleteEffect::Query {
            text: self.input.clone(),
            epoch,
        }]
    }

    /// Searches immediately, bypassing the debounce. `text` defaults to the
    /// current input.
    pub fn search_now(&mut self, text: Option<&str>) -> Vec<AutocompleteEffect<A>> {
        if !self.allow_options {
            return vec![];
        }
        let text = match text {
            Some(t) if !text::is_blank(t) => t.to_string(),
            _ => self.input.clone(),
        };
        if text::is_blank(&text) {
            self.options = Some(vec![]);
            return self.close();
        }
        self.in_flight = Some(self.epoch);
        vec![
            AutocompleteEffect::CancelSearch,
            AutocompleteEffect::Query {
                text,
                epoch: self.epoch,
            },
        ]
    }

    /// Query results for `epoch` arrived.
    pub fn results(&mut self, epoch: Epoch, rows: Vec<A>) -> Vec<AutocompleteEffect<A>> {
        if epoch != self.epoch {
            log::debug!(
                "autocomplete: discarding results of epoch {epoch}, current is {}",
                self.epoch
            );
            return vec![];
        }
        self.in_flight = None;
        if !self.allow_options || text::is_blank(&self.input) {
            self.options = Some(vec![]);
            return vec![];
        }
        let has_rows = !rows.is_empty();
        self.options = Some(rows);
        self.focused_option = None;
        if has_rows {
            self.open()
        } else {
            vec![]
        }
    }

    /// The query for `epoch` failed; leaves the options untouched.
    pub fn query_failed(&mut self, epoch: Epoch) {
        if self.in_flight == Some(epoch) {
            self.in_flight = None;
        }
    }

    /// Selects `selected`, binding `value` or the selected item's value.
    pub fn select(
        &mut self,
        selected: Option<A>,
        value: Option<A::Value>,
    ) -> Vec<AutocompleteEffect<A>> {
        let new_value = value.or_else(|| selected.as_ref().map(AutocompleteItem::value));
        self.control.set_value(new_value.clone());
        self.sync_status();
        self.selection = selected.clone();

        let mut effects = vec![AutocompleteEffect::Selected(selected)];
        effects.extend(self.close());

        let new_text = new_value.map(|v| v.to_string()).unwrap_or_default();
        if self.input != new_text {
            self.input = new_text;
        }
        // a selection supersedes whatever search was pending
        self.epoch += 1;
        self.in_flight = None;
        self.last_query = None;
        effects.push(AutocompleteEffect::CancelSearch);
        effects
    }

    pub fn escape(&mut self) -> Vec<AutocompleteEffect<A>> {
        self.select(None, None)
    }

    pub fn move_focus(&mut self, movement: Move) {
        let len = self.options.as_ref().map_or(0, Vec::len);
        if !self.open || len == 0 {
            return;
        }
        self.focused_option = navigation::step(self.focused_option, movement, len);
    }

    pub fn enter(&mut self) -> Vec<AutocompleteEffect<A>> {
        let focused = self
            .focused_option
            .and_then(|i| self.options.as_ref().and_then(|o| o.get(i)))
            .cloned();
        match focused {
            Some(option) => self.select(Some(option), None),
            None => vec![],
        }
    }

    /// A pointer click landed outside the field.
    pub fn outside_click(&mut self) -> Vec<AutocompleteEffect<A>> {
        if self.open {
            self.close()
        } else {
            vec![]
        }
    }

    pub fn open(&mut self) -> Vec<AutocompleteEffect<A>> {
        if self.open {
            return vec![];
        }
        self.open = true;
        self.open_count += 1;
        vec![AutocompleteEffect::Opened]
    }

    pub fn close(&mut self) -> Vec<AutocompleteEffect<A>> {
        self.options = None;
        self.focused_option = None;
        if !self.open {
            return vec![];
        }
        self.open = false;
        vec![AutocompleteEffect::Closed]
    }

    pub fn set_allow_options(&mut self, allow: bool) -> Vec<AutocompleteEffect<A>> {
        self.allow_options = allow;
        if allow {
            vec![]
        } else {
            self.in_flight = None;
            let mut effects = vec![AutocompleteEffect::CancelSearch];
            effects.extend(self.close());
            effects
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) -> Vec<AutocompleteEffect<A>> {
        self.control.set_disabled(disabled);
        if disabled {
            self.close()
        } else {
            vec![]
        }
    }

    /// Sets validation errors on the bound control (e.g. from a server-side
    /// check) and mirrors them onto the input.
    pub fn set_control_errors(&mut self, errors: Option<FieldErrors>) {
        self.control.set_errors(errors);
        self.sync_status();
    }

    fn sync_status(&mut self) {
        match self.control.status() {
            FieldStatus::Invalid => self.input_errors = self.control.errors().cloned(),
            FieldStatus::Valid => self.input_errors = None,
            FieldStatus::Disabled => {}
        }
    }
}
