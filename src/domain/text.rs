use unicode_width::UnicodeWidthStr;

/// Whether the given text is empty or whitespace only.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Like [`is_blank`], for optional text.
pub fn is_blank_opt(s: Option<&str>) -> bool {
    s.map_or(true, is_blank)
}

/// Display width in terminal cells.
pub fn text_width(s: &str) -> usize {
    s.width()
}

/// Keeps at most `max_chars` characters (not bytes).
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Right-pads with `fill` up to `len` characters, or truncates to `len`.
pub fn fit_right(s: &str, len: usize, fill: char) -> String {
    let count = s.chars().count();
    if count < len {
        let mut out = String::with_capacity(len);
        out.push_str(s);
        out.extend(std::iter::repeat(fill).take(len - count));
        out
    } else {
        truncate_chars(s, len)
    }
}

/// Shortens `s` to fit in `width` cells, ending with `…` when cut.
pub fn ellipsize(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if s.width() <= width {
        return s.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.to_string().width();
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_is_blank_opt() {
        assert!(is_blank_opt(None));
        assert!(is_blank_opt(Some(" ")));
        assert!(!is_blank_opt(Some("x")));
    }

    #[test]
    fn test_text_width_double_width() {
        assert_eq!(text_width("abc"), 3);
        assert_eq!(text_width("こんにちは"), 10);
    }

    #[test]
    fn test_fit_right_pads() {
        assert_eq!(fit_right("5", 2, '0'), "50");
        assert_eq!(fit_right("", 3, '0'), "000");
    }

    #[test]
    fn test_fit_right_truncates() {
        assert_eq!(fit_right("1234", 2, '0'), "12");
        assert_eq!(fit_right("1234", 0, '0'), "");
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("hello", 10), "hello");
        assert_eq!(ellipsize("hello world", 6), "hello…");
        assert_eq!(ellipsize("hello", 0), "");
    }
}
