use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// a transient message shown in the footer until it expires
pub struct DisplayEvent {
    pub text: String,
    pub duration: Duration,
    pub start_time: Instant,
    pub style: Style,
}

impl DisplayEvent {
    pub fn new(text: String, duration: Duration, style: Style) -> Self {
        Self {
            text,
            duration,
            start_time: Instant::now(),
            style,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.start_time.elapsed() >= self.duration
    }

    pub fn check_and_clear(event: Option<Self>) -> Option<Self> {
        match event {
            Some(e) if e.is_expired() => None,
            other => other,
        }
    }
}

/// one-line footer with left, centered and right-aligned text
#[derive(Default)]
pub struct StatusBar {
    left: String,
    mid: String,
    right: String,
    left_fg: Option<Color>,
    right_fg: Option<Color>,
    style: Option<Style>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_left(mut self, text: impl Into<String>) -> Self {
        self.left = text.into();
        self
    }

    pub fn set_mid(mut self, text: impl Into<String>) -> Self {
        self.mid = text.into();
        self
    }

    pub fn set_right(mut self, text: impl Into<String>) -> Self {
        self.right = text.into();
        self
    }

    pub fn set_left_fg(mut self, color: Color) -> Self {
        self.left_fg = Some(color);
        self
    }

    pub fn set_right_fg(mut self, color: Color) -> Self {
        self.right_fg = Some(color);
        self
    }

    pub fn set_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    fn styled<'a>(text: &'a str, fg: Option<Color>) -> Span<'a> {
        match fg {
            Some(color) => Span::styled(text, Style::default().fg(color)),
            None => Span::raw(text),
        }
    }

    pub fn render(self, area: Rect, buf: &mut Buffer) {
        let total_width = area.width as usize;

        let left_len = self.left.width();
        let mid_len = self.mid.width();
        let right_len = self.right.width();

        let mid_center_start = total_width.saturating_sub(mid_len) / 2;
        let left_to_mid_padding = mid_center_start.saturating_sub(left_len);

        let right_start = total_width.saturating_sub(right_len);
        let mid_end = mid_center_start + mid_len;
        let mid_to_right_padding = right_start.saturating_sub(mid_end);

        let line = Line::from(vec![
            Self::styled(&self.left, self.left_fg),
            Span::raw(" ".repeat(left_to_mid_padding)),
            Span::raw(self.mid.as_str()),
            Span::raw(" ".repeat(mid_to_right_padding)),
            Self::styled(&self.right, self.right_fg),
        ]);

        let style = self.style.unwrap_or_default();
        Paragraph::new(line).style(style).render(area, buf);
    }
}
