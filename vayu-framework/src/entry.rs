use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

/// result of looking up a field on a log line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Absent,
    Present(&'a Value),
}

impl Field<'_> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// text shown in a table cell; absent fields render as an empty cell
    pub fn display_text(&self) -> String {
        match self {
            Field::Absent => String::new(),
            Field::Present(Value::String(s)) => s.clone(),
            Field::Present(Value::Null) => "null".to_string(),
            Field::Present(value) => value.to_string(),
        }
    }
}

/// a single raw line from the input, parsed on first access
#[derive(Debug)]
pub struct LogLine {
    raw: String,
    parsed: OnceCell<Value>,
}

impl LogLine {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: OnceCell::new(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// structured form of the line; an empty mapping when the line is not valid JSON
    pub fn value(&self) -> &Value {
        self.parsed.get_or_init(|| {
            serde_json::from_str(&self.raw).unwrap_or_else(|_| Value::Object(Map::new()))
        })
    }

    pub fn field(&self, key: &str) -> Field<'_> {
        match self.value().get(key) {
            Some(value) => Field::Present(value),
            None => Field::Absent,
        }
    }
}

/// every line loaded at startup, in file order
#[derive(Debug, Default)]
pub struct EntryStore {
    lines: Vec<LogLine>,
}

impl EntryStore {
    pub fn new(raw_lines: Vec<String>) -> Self {
        Self {
            lines: raw_lines.into_iter().map(LogLine::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&LogLine> {
        self.lines.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }
}
