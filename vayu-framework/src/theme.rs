use ratatui::{prelude::*, style::Color};

pub const TEXT_FG_COLOR: Color = Color::Gray;

pub const BORDER_COLOR: Color = Color::Rgb(125, 86, 244);

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Rgb(250, 250, 250))
    .bg(Color::Rgb(125, 86, 244))
    .add_modifier(Modifier::BOLD);

pub const SELECTED_STYLE: Style = Style::new().bg(Color::Rgb(68, 68, 68));

pub const DISPLAY_EVENT_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FILTER_FOCUS_STYLE: Style = Style::new().bg(Color::DarkGray);

pub const HINT_FG_COLOR: Color = Color::DarkGray;

/// styles used by the renderer, chosen once at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text_fg: Color,
    pub border: Color,
    pub header: Style,
    pub selected: Style,
    pub display_event: Style,
    pub filter_focus: Style,
    pub hint_fg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text_fg: TEXT_FG_COLOR,
            border: BORDER_COLOR,
            header: HEADER_STYLE,
            selected: SELECTED_STYLE,
            display_event: DISPLAY_EVENT_STYLE,
            filter_focus: FILTER_FOCUS_STYLE,
            hint_fg: HINT_FG_COLOR,
        }
    }
}
