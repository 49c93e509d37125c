//! Number formatting used by the decimal field

use serde::{Deserialize, Serialize};

/// Formats numbers for display and input normalization
pub trait NumberFormat {
    /// The character separating integer and fractional digits.
    fn decimal_separator(&self) -> char;

    /// Formats `raw` as a plain number (no digit grouping) with exactly
    /// `digits` fractional digits, rounding half away from zero.
    ///
    /// Returns `None` when `raw` is empty or not a number.
    fn number_to_fixed(&self, raw: &str, digits: usize) -> Option<String> {
        fixed(raw, self.decimal_separator(), digits)
    }
}

/// Locale-driven formatting settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleFormat {
    pub decimal_separator: char,
}

impl LocaleFormat {
    pub fn new(decimal_separator: char) -> Self {
        Self { decimal_separator }
    }
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self::new('.')
    }
}

impl NumberFormat for LocaleFormat {
    fn decimal_separator(&self) -> char {
        self.decimal_separator
    }
}

fn fixed(raw: &str, separator: char, digits: usize) -> Option<String> {
    let raw = raw.trim();
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (int_part, frac_part) = body.split_once(separator).unwrap_or((body, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || !is_digits(frac_part) {
        return None;
    }

    let mut kept: Vec<u8> = int_part.bytes().map(|b| b - b'0').collect();
    kept.extend(
        frac_part
            .bytes()
            .map(|b| b - b'0')
            .chain(std::iter::repeat(0))
            .take(digits),
    );
    if frac_part.as_bytes().get(digits).is_some_and(|b| *b >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let split = kept.len() - digits;
    let int_digits: String = kept[..split]
        .iter()
        .map(|d| char::from(b'0' + d))
        .skip_while(|c| *c == '0')
        .collect();
    let int_digits = if int_digits.is_empty() {
        "0".to_string()
    } else {
        int_digits
    };
    let frac_digits: String = kept[split..].iter().map(|d| char::from(b'0' + d)).collect();

    let is_zero = kept.iter().all(|d| *d == 0);
    let sign = if negative && !is_zero { "-" } else { "" };
    if digits == 0 {
        Some(format!("{sign}{int_digits}"))
    } else {
        Some(format!("{sign}{int_digits}{separator}{frac_digits}"))
    }
}
