//! Syntax highlighting for the detail pane.
//!
//! The detail renderer only depends on the [`Highlighter`] trait; a failed
//! highlight is never fatal, the caller falls back to unstyled text.

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use syntect::{
    easy::HighlightLines,
    highlighting::{FontStyle, ThemeSet},
    parsing::SyntaxSet,
    util::LinesWithEndings,
};

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// turns text of a given language into styled lines
pub trait Highlighter: Send + Sync {
    fn highlight(&self, text: &str, language: &str, theme: &str) -> Result<Vec<Line<'static>>>;
}

struct SyntaxAssets {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

static ASSETS: Lazy<SyntaxAssets> = Lazy::new(|| SyntaxAssets {
    syntaxes: SyntaxSet::load_defaults_newlines(),
    themes: ThemeSet::load_defaults(),
});

/// highlighter backed by syntect's bundled syntaxes and themes
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// names of the bundled themes, sorted
    pub fn theme_names() -> Vec<String> {
        ASSETS.themes.themes.keys().cloned().collect()
    }
}

fn to_ratatui_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut result = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        result = result.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        result = result.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        result = result.add_modifier(Modifier::UNDERLINED);
    }
    result
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, text: &str, language: &str, theme: &str) -> Result<Vec<Line<'static>>> {
        let assets = &*ASSETS;
        let syntax = assets
            .syntaxes
            .find_syntax_by_token(language)
            .ok_or_else(|| anyhow!("No syntax for language '{}'", language))?;
        let theme = assets
            .themes
            .themes
            .get(theme)
            .ok_or_else(|| anyhow!("Unknown highlight theme '{}'", theme))?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(text) {
            let ranges = highlighter.highlight_line(line, &assets.syntaxes)?;
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, piece)| (style, piece.trim_end_matches(['\n', '\r'])))
                .filter(|(_, piece)| !piece.is_empty())
                .map(|(style, piece)| Span::styled(piece.to_string(), to_ratatui_style(style)))
                .collect();
            lines.push(Line::from(spans));
        }
        Ok(lines)
    }
}

/// highlighter that applies no styling
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, text: &str, _language: &str, _theme: &str) -> Result<Vec<Line<'static>>> {
        Ok(text.lines().map(|s| Line::from(s.to_string())).collect())
    }
}
