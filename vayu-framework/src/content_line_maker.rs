use ratatui::text::Line;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn sanitize_control_chars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphabetic() {
                        chars.next();
                        break;
                    }
                    chars.next();
                }
            }
            continue;
        }
        if c.is_control() && c != '\n' {
            continue;
        }
        result.push(c);
    }

    result
}

/// split content into unstyled lines, one per source line
pub fn content_into_lines(content: &str) -> Vec<Line<'static>> {
    sanitize_control_chars(content)
        .lines()
        .map(|s| Line::from(s.to_string()))
        .collect()
}

/// fit the first line of `content` into exactly `width` display columns
///
/// shorter text is padded with spaces, longer text is cut and marked with ".."
pub fn fit_to_width(content: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let sanitized = sanitize_control_chars(content);
    let first_line = sanitized.lines().next().unwrap_or("");
    let text_width = first_line.width();

    if text_width <= width {
        return format!("{}{}", first_line, " ".repeat(width - text_width));
    }

    let budget = width.saturating_sub(2);
    let mut truncated = String::new();
    let mut used = 0;
    for ch in first_line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        truncated.push(ch);
        used += w;
    }
    let marker = &".."[..width.min(2)];
    format!("{}{}{}", truncated, " ".repeat(budget - used), marker)
}
