use crate::{
    content_line_maker::{content_into_lines, sanitize_control_chars},
    highlight::Highlighter,
};
use ratatui::text::Line;
use serde_json::Value;
use std::sync::Arc;

/// language handed to the highlighter for every record
const DETAIL_LANGUAGE: &str = "json";

/// rebuild mappings with their keys in alphabetical order, at every depth
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// pretty-print a raw line with 2-space indentation; keys come out alphabetically
///
/// lines that are not valid JSON are returned unchanged
pub fn pretty_text(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => {
            serde_json::to_string_pretty(&sort_keys(value)).unwrap_or_else(|_| raw.to_string())
        }
        Err(_) => raw.to_string(),
    }
}

/// renders the selected record for the detail pane
pub struct DetailRenderer {
    highlighter: Arc<dyn Highlighter>,
    theme: String,
}

impl DetailRenderer {
    pub fn new(highlighter: Arc<dyn Highlighter>, theme: impl Into<String>) -> Self {
        Self {
            highlighter,
            theme: theme.into(),
        }
    }

    pub fn render(&self, raw: &str) -> Vec<Line<'static>> {
        let text = sanitize_control_chars(&pretty_text(raw));
        match self.highlighter.highlight(&text, DETAIL_LANGUAGE, &self.theme) {
            Ok(lines) => lines,
            Err(e) => {
                log::debug!("Highlighting failed, showing plain text: {}", e);
                content_into_lines(&text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{DEFAULT_THEME, PlainHighlighter, SyntectHighlighter};
    use anyhow::{Result, anyhow};

    struct FailingHighlighter;

    impl Highlighter for FailingHighlighter {
        fn highlight(&self, _: &str, _: &str, _: &str) -> Result<Vec<Line<'static>>> {
            Err(anyhow!("highlighter unavailable"))
        }
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_pretty_text_indents_and_sorts_keys() {
        let pretty = pretty_text(r#"{"ts":"1","level":"info","msg":"a","ctx":{"b":1,"a":[1,2]}}"#);
        let expected = "{\n  \"ctx\": {\n    \"a\": [\n      1,\n      2\n    ],\n    \"b\": 1\n  },\n  \"level\": \"info\",\n  \"msg\": \"a\",\n  \"ts\": \"1\"\n}";
        assert_eq!(pretty, expected);
    }

    #[test]
    fn test_pretty_text_falls_back_to_raw() {
        assert_eq!(pretty_text("not { json"), "not { json");
    }

    #[test]
    fn test_render_with_plain_highlighter() {
        let renderer = DetailRenderer::new(Arc::new(PlainHighlighter), DEFAULT_THEME);
        let lines = renderer.render(r#"{"b":2,"a":1}"#);
        assert_eq!(texts(&lines), vec!["{", "  \"a\": 1,", "  \"b\": 2", "}"]);
    }

    #[test]
    fn test_highlight_failure_falls_back_to_plain_text() {
        let renderer = DetailRenderer::new(Arc::new(FailingHighlighter), DEFAULT_THEME);
        let lines = renderer.render(r#"{"msg":"x"}"#);
        assert_eq!(texts(&lines), vec!["{", "  \"msg\": \"x\"", "}"]);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_plain_text() {
        let renderer = DetailRenderer::new(Arc::new(SyntectHighlighter::new()), "missing");
        let lines = renderer.render("raw \x1b[31mtext");
        assert_eq!(texts(&lines), vec!["raw text"]);
    }

    #[test]
    fn test_syntect_render_matches_pretty_text() {
        let renderer = DetailRenderer::new(Arc::new(SyntectHighlighter::new()), DEFAULT_THEME);
        let raw = r#"{"level":"error","msg":"b","ts":"2"}"#;
        let lines = renderer.render(raw);
        let expected: Vec<String> = pretty_text(raw).lines().map(String::from).collect();
        assert_eq!(texts(&lines), expected);
    }
}
