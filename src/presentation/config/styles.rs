use std::collections::HashMap;

use derive_deref::{Deref, DerefMut};
use ratatui::style::{Color, Modifier, Style};
use serde::{de::Deserializer, Deserialize};

/// Prefix of keys that only apply while the dark theme is on
const DARK_PREFIX: &str = "dark.";

/// Named styles, e.g. `"field.focused": "bold white on blue"`
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Styles(pub HashMap<String, Style>);

impl Styles {
    /// Looks up `key` for the active palette. Dark entries fall back to the
    /// plain ones.
    pub fn style(&self, key: &str, dark: bool) -> Style {
        let dark_style = if dark {
            self.get(&format!("{DARK_PREFIX}{key}"))
        } else {
            None
        };
        dark_style
            .or_else(|| self.get(key))
            .copied()
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<String, String>::deserialize(deserializer)?;

        let styles = parsed_map
            .into_iter()
            .map(|(key, style)| (key, parse_style(&style)))
            .collect();

        Ok(Styles(styles))
    }
}

pub fn parse_style(line: &str) -> Style {
    let lower = line.to_lowercase();
    let (foreground, background) = lower.split_at(lower.find("on ").unwrap_or(lower.len()));
    let foreground = process_color_string(foreground);
    let background = process_color_string(&background.replacen("on ", "", 1));

    let mut style = Style::default();
    if let Some(fg) = parse_color(&foreground.0) {
        style = style.fg(fg);
    }
    if let Some(bg) = parse_color(&background.0) {
        style = style.bg(bg);
    }
    style.add_modifier(foreground.1 | background.1)
}

fn process_color_string(color_str: &str) -> (String, Modifier) {
    let color = color_str
        .replace("grey", "gray")
        .replace("bright ", "")
        .replace("bold ", "")
        .replace("underline ", "")
        .replace("inverse ", "")
        .replace("italic ", "")
        .replace("dim ", "");

    let mut modifiers = Modifier::empty();
    if color_str.contains("underline") {
        modifiers |= Modifier::UNDERLINED;
    }
    if color_str.contains("bold") {
        modifiers |= Modifier::BOLD;
    }
    if color_str.contains("inverse") {
        modifiers |= Modifier::REVERSED;
    }
    if color_str.contains("italic") {
        modifiers |= Modifier::ITALIC;
    }
    if color_str.contains("dim") {
        modifiers |= Modifier::DIM;
    }

    (color, modifiers)
}

fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(index) = s.strip_prefix("color") {
        index.trim().parse::<u8>().ok().map(Color::Indexed)
    } else if let Some(level) = s.strip_prefix("gray") {
        let level = level.trim().parse::<u8>().ok()?.min(23);
        Some(Color::Indexed(232 + level))
    } else if let Some(rgb) = s.strip_prefix("rgb") {
        let digits: Vec<u8> = rgb
            .trim()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d.min(5) as u8)
            .collect();
        match digits.as_slice() {
            [r, g, b] => Some(Color::Indexed(16 + r * 36 + g * 6 + b)),
            _ => None,
        }
    } else {
        match s {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "gray" => Some(Color::Gray),
            "darkgray" | "dark gray" => Some(Color::DarkGray),
            "white" => Some(Color::White),
            "reset" => Some(Color::Reset),
            _ => None,
        }
    }
}
