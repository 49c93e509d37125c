//! Decimal value composition
//!
//! A decimal field is edited as two independent parts, the integer digits and
//! the fractional digits. Every edit recomposes a single normalized value:
//!
//! - the integer part is formatted as a plain integer and cut to
//!   [`MAX_INTEGER_LEN`] characters
//! - the fractional part is padded with `0` or truncated to the field scale
//! - the value is `None` while the integer part is empty
//!
//! The composed value uses `.` as separator regardless of the display locale.

use serde::{Deserialize, Serialize};

use crate::domain::{control::FieldControl, format::NumberFormat, text};

pub const MAX_INTEGER_LEN: usize = 15;

/// Raw text of both editable parts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalParts {
    pub integer: String,
    pub fractional: String,
}

impl DecimalParts {
    pub fn new(integer: impl Into<String>, fractional: impl Into<String>) -> Self {
        Self {
            integer: integer.into(),
            fractional: fractional.into(),
        }
    }

    /// Splits a composed value (`"-12.50"`) back into its parts.
    pub fn split(value: &str) -> Self {
        let (integer, fractional) = value.split_once('.').unwrap_or((value, ""));
        Self::new(integer, fractional)
    }
}

/// Result of a single recomposition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub value: Option<String>,
    pub normalized: DecimalParts,
}

pub fn normalize_integer(raw: &str, format: &impl NumberFormat) -> String {
    let formatted = format.number_to_fixed(raw, 0).unwrap_or_default();
    text::truncate_chars(&formatted, MAX_INTEGER_LEN)
}

pub fn normalize_fractional(raw: &str, scale: u8) -> String {
    text::fit_right(raw, usize::from(scale), '0')
}

pub fn compose_value(integer: &str, fractional: &str, scale: u8) -> Option<String> {
    if integer.is_empty() {
        None
    } else if scale == 0 {
        Some(integer.to_string())
    } else {
        Some(format!("{integer}.{fractional}"))
    }
}

/// Pure recomposition of raw parts into a normalized value.
pub fn compose(parts: &DecimalParts, scale: u8, format: &impl NumberFormat) -> Composition {
    let integer = normalize_integer(&parts.integer, format);
    let fractional = normalize_fractional(&parts.fractional, scale);
    Composition {
        value: compose_value(&integer, &fractional, scale),
        normalized: DecimalParts {
            integer,
            fractional,
        },
    }
}

/// Whether the raw parts must be rewritten with the normalized ones.
///
/// A raw fractional part that is a prefix of the normalized one is left alone
/// so that trailing padding does not fight the user while typing. A lone `-`
/// is an integer still being typed.
pub fn needs_resync(current: &DecimalParts, normalized: &DecimalParts) -> bool {
    let integer_differs =
        current.integer != normalized.integer && !is_partial_integer(&current.integer);
    let fractional_prefix: String = normalized
        .fractional
        .chars()
        .take(current.fractional.chars().count())
        .collect();
    integer_differs || current.fractional != fractional_prefix
}

fn is_partial_integer(raw: &str) -> bool {
    raw == "-"
}

/// Which of the two inputs has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecimalPart {
    #[default]
    Integer,
    Fractional,
}

/// Notifications produced by the decimal field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecimalEvent {
    /// The bound value changed
    Changed(Option<String>),
    /// The field lost focus
    Blurred,
    /// Focus moved to the given part
    FocusPart(DecimalPart),
}

/// Decimal field state: raw parts, scale and the bound value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalField {
    pub name: String,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub placeholder: Option<String>,
    scale: u8,
    parts: DecimalParts,
    control: FieldControl<String>,
    focus: DecimalPart,
    part_writes: usize,
}

impl Default for DecimalField {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DecimalField {
    pub fn new(scale: u8) -> Self {
        Self {
            name: String::new(),
            prefix: None,
            suffix: None,
            placeholder: None,
            scale,
            parts: DecimalParts::default(),
            control: FieldControl::new(None),
            focus: DecimalPart::Integer,
            part_writes: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.control = self.control.required(required);
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.control.value().map(String::as_str)
    }

    pub fn parts(&self) -> &DecimalParts {
        &self.parts
    }

    pub fn scale(&self) -> u8 {
        self.scale
    }

    pub fn control(&self) -> &FieldControl<String> {
        &self.control
    }

    pub fn focus(&self) -> DecimalPart {
        self.focus
    }

    /// How many times the raw parts were rewritten by normalization.
    pub fn part_writes(&self) -> usize {
        self.part_writes
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.control.set_disabled(disabled);
    }

    pub fn focus_part(&mut self, part: DecimalPart) -> Vec<DecimalEvent> {
        if self.focus == part {
            return vec![];
        }
        self.focus = part;
        vec![DecimalEvent::FocusPart(part)]
    }

    pub fn edit_integer(
        &mut self,
        raw: impl Into<String>,
        format: &impl NumberFormat,
    ) -> Vec<DecimalEvent> {
        if self.control.is_disabled() {
            return vec![];
        }
        self.parts.integer = raw.into();
        self.recompose(format, true)
    }

    pub fn edit_fractional(
        &mut self,
        raw: impl Into<String>,
        format: &impl NumberFormat,
    ) -> Vec<DecimalEvent> {
        if self.control.is_disabled() {
            return vec![];
        }
        self.parts.fractional = raw.into();
        self.recompose(format, true)
    }

    /// Typing the decimal separator in the integer part jumps to the
    /// fractional part. Returns `None` when `c` is not the separator.
    pub fn separator_typed(&mut self, c: char, format: &impl NumberFormat) -> Option<Vec<DecimalEvent>> {
        if c != format.decimal_separator() || self.scale == 0 {
            return None;
        }
        Some(self.focus_part(DecimalPart::Fractional))
    }

    /// Writes a value coming from outside the field, without echoing it back
    /// as a change.
    pub fn write_value(&mut self, value: Option<&str>, format: &impl NumberFormat) {
        self.parts = value.map(DecimalParts::split).unwrap_or_default();
        self.recompose(format, false);
    }

    pub fn set_scale(&mut self, scale: u8, format: &impl NumberFormat) -> Vec<DecimalEvent> {
        if scale == self.scale {
            return vec![];
        }
        self.scale = scale;
        let mut events = self.adjust_fractional(format);
        events.extend(self.recompose(format, true));
        events
    }

    pub fn blur(&mut self, format: &impl NumberFormat) -> Vec<DecimalEvent> {
        let mut events = self.adjust_fractional(format);
        self.control.mark_touched();
        self.focus = DecimalPart::Integer;
        events.push(DecimalEvent::Blurred);
        events
    }

    /// Columns taken by the fractional input, including the suffix.
    pub fn fractional_width(&self, measure: impl Fn(&str) -> usize) -> usize {
        if self.scale == 0 {
            return 0;
        }
        let suffix_width = match self.suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => measure(&format!(" {suffix}")),
            _ => 0,
        };
        suffix_width + measure(&"0".repeat(usize::from(self.scale)))
    }

    fn adjust_fractional(&mut self, format: &impl NumberFormat) -> Vec<DecimalEvent> {
        let normalized = normalize_fractional(&self.parts.fractional, self.scale);
        if normalized == self.parts.fractional {
            return vec![];
        }
        self.parts.fractional = normalized;
        self.part_writes += 1;
        self.recompose(format, true)
    }

    fn recompose(&mut self, format: &impl NumberFormat, emit: bool) -> Vec<DecimalEvent> {
        let Composition { value, normalized } = compose(&self.parts, self.scale, format);
        let mut events = vec![];
        if self.control.set_value(value.clone()) && emit {
            events.push(DecimalEvent::Changed(value));
        }
        if needs_resync(&self.parts, &normalized) {
            log::debug!(
                "decimal field {:?}: resync parts {:?} -> {:?}",
                self.name,
                self.parts,
                normalized
            );
            self.parts = normalized;
            self.part_writes += 1;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::{control::FieldStatus, format::LocaleFormat};

    fn fmt() -> LocaleFormat {
        LocaleFormat::default()
    }

    #[rstest]
    #[case("5", 2, "50")]
    #[case("1234", 2, "12")]
    #[case("", 3, "000")]
    #[case("99", 0, "")]
    #[case("12", 2, "12")]
    fn test_normalize_fractional(#[case] raw: &str, #[case] scale: u8, #[case] expected: &str) {
        let normalized = normalize_fractional(raw, scale);
        assert_eq!(normalized, expected);
        assert_eq!(normalized.len(), usize::from(scale));
    }

    #[test]
    fn test_normalize_integer_truncates_to_fifteen() {
        let raw = "12345678901234567890";
        assert_eq!(normalize_integer(raw, &fmt()), "123456789012345");
    }

    #[test]
    fn test_normalize_integer_plain() {
        assert_eq!(normalize_integer("007", &fmt()), "7");
        assert_eq!(normalize_integer("-42", &fmt()), "-42");
        assert_eq!(normalize_integer("", &fmt()), "");
        assert_eq!(normalize_integer("x", &fmt()), "");
    }

    #[test]
    fn test_compose_empty_integer_is_none() {
        let composition = compose(&DecimalParts::new("", "99"), 2, &fmt());
        assert_eq!(composition.value, None);
    }

    #[test]
    fn test_compose_scale_zero_is_integer_only() {
        let composition = compose(&DecimalParts::new("12", "99"), 0, &fmt());
        assert_eq!(composition.value.as_deref(), Some("12"));
    }

    #[test]
    fn test_compose_with_scale() {
        let composition = compose(&DecimalParts::new("12", "5"), 2, &fmt());
        assert_eq!(composition.value.as_deref(), Some("12.50"));
        assert_eq!(composition.normalized, DecimalParts::new("12", "50"));
    }

    #[test]
    fn test_needs_resync_keeps_typing_prefix() {
        let normalized = DecimalParts::new("1", "50");
        assert!(!needs_resync(&DecimalParts::new("1", "5"), &normalized));
        assert!(!needs_resync(&DecimalParts::new("1", ""), &normalized));
        assert!(needs_resync(&DecimalParts::new("01", "5"), &normalized));
        assert!(needs_resync(&DecimalParts::new("1", "6"), &normalized));
    }

    #[test]
    fn test_needs_resync_truncated_fraction() {
        let normalized = DecimalParts::new("1", "12");
        assert!(needs_resync(&DecimalParts::new("1", "1234"), &normalized));
    }

    #[test]
    fn test_lone_minus_is_kept_while_typing() {
        let mut field = DecimalField::new(2);
        let events = field.edit_integer("-", &fmt());
        assert!(events.is_empty());
        assert_eq!(field.parts().integer, "-");
        assert_eq!(field.value(), None);

        let events = field.edit_integer("-3", &fmt());
        assert_eq!(events, vec![DecimalEvent::Changed(Some("-3.00".into()))]);
    }

    #[test]
    fn test_edit_emits_changed_once() {
        let mut field = DecimalField::new(2);
        let events = field.edit_integer("12", &fmt());
        assert_eq!(events, vec![DecimalEvent::Changed(Some("12.00".into()))]);

        let events = field.edit_integer("12", &fmt());
        assert!(events.is_empty());
    }

    #[test]
    fn test_recompose_is_idempotent() {
        let mut field = DecimalField::new(2);
        field.edit_integer("007", &fmt());
        field.edit_fractional("1234", &fmt());
        let writes = field.part_writes();
        assert_eq!(field.parts(), &DecimalParts::new("7", "12"));

        let events = field.edit_fractional("12", &fmt());
        assert!(events.is_empty());
        assert_eq!(field.part_writes(), writes);
    }

    #[test]
    fn test_fraction_prefix_not_padded_until_blur() {
        let mut field = DecimalField::new(2);
        field.edit_integer("1", &fmt());
        field.edit_fractional("5", &fmt());
        assert_eq!(field.parts().fractional, "5");
        assert_eq!(field.value(), Some("1.50"));

        let events = field.blur(&fmt());
        assert_eq!(field.parts().fractional, "50");
        assert_eq!(events, vec![DecimalEvent::Blurred]);
        assert!(field.control().is_touched());
    }

    #[test]
    fn test_blur_normalizes_untouched_fraction() {
        let mut field = DecimalField::new(3);
        field.blur(&fmt());
        assert_eq!(field.parts().fractional, "000");
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_set_scale_renormalizes_fraction_only() {
        let mut field = DecimalField::new(2);
        field.edit_integer("7", &fmt());
        field.edit_fractional("25", &fmt());

        let events = field.set_scale(1, &fmt());
        assert_eq!(field.parts(), &DecimalParts::new("7", "2"));
        assert_eq!(events, vec![DecimalEvent::Changed(Some("7.2".into()))]);

        let events = field.set_scale(3, &fmt());
        assert_eq!(field.parts(), &DecimalParts::new("7", "200"));
        assert_eq!(events, vec![DecimalEvent::Changed(Some("7.200".into()))]);
    }

    #[test]
    fn test_set_same_scale_is_noop() {
        let mut field = DecimalField::new(2);
        field.edit_integer("7", &fmt());
        assert!(field.set_scale(2, &fmt()).is_empty());
    }

    #[test]
    fn test_separator_moves_focus() {
        let mut field = DecimalField::new(2);
        assert_eq!(field.separator_typed('x', &fmt()), None);
        assert_eq!(
            field.separator_typed('.', &fmt()),
            Some(vec![DecimalEvent::FocusPart(DecimalPart::Fractional)])
        );
        assert_eq!(field.focus(), DecimalPart::Fractional);
    }

    #[test]
    fn test_separator_ignored_without_scale() {
        let mut field = DecimalField::new(0);
        assert_eq!(field.separator_typed('.', &fmt()), None);
    }

    #[test]
    fn test_write_value_does_not_echo() {
        let mut field = DecimalField::new(2);
        field.write_value(Some("10.5"), &fmt());
        assert_eq!(field.value(), Some("10.50"));
        assert_eq!(field.parts(), &DecimalParts::new("10", "5"));

        field.write_value(None, &fmt());
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_required_status() {
        let mut field = DecimalField::new(2).required(true);
        assert_eq!(field.control().status(), FieldStatus::Invalid);
        field.edit_integer("1", &fmt());
        assert_eq!(field.control().status(), FieldStatus::Valid);
    }

    #[test]
    fn test_disabled_ignores_edits() {
        let mut field = DecimalField::new(2);
        field.set_disabled(true);
        assert!(field.edit_integer("5", &fmt()).is_empty());
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_fractional_width() {
        let measure = |s: &str| s.chars().count();
        assert_eq!(DecimalField::new(0).with_suffix("kg").fractional_width(measure), 0);
        assert_eq!(DecimalField::new(2).fractional_width(measure), 2);
        assert_eq!(DecimalField::new(2).with_suffix("kg").fractional_width(measure), 5);
    }
}
