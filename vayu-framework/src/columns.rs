use itertools::Itertools;
use serde_json::Value;
use std::collections::HashMap;

/// number of leading sample entries considered when detecting columns
pub const SAMPLE_LIMIT: usize = 100;

pub const DEFAULT_COLUMN_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub width: usize,
    pub visible: bool,
}

impl Column {
    pub fn new(key: impl Into<String>, width: usize) -> Self {
        Self {
            key: key.into(),
            width,
            visible: true,
        }
    }
}

/// priority tier of a key: time, level, message, error, then everything else
fn key_score(key: &str) -> u8 {
    match key {
        "time" | "@timestamp" | "ts" => 0,
        "level" | "severity" | "levelname" => 1,
        "msg" | "message" => 2,
        "error" => 3,
        _ => 4,
    }
}

/// derive the column list from the first `SAMPLE_LIMIT` sampled entries
///
/// every key seen in the sample becomes a column; order is `(score, key)` ascending
pub fn detect_columns(sample: &[Value], width: usize) -> Vec<Column> {
    let mut key_frequency: HashMap<&str, usize> = HashMap::new();
    for entry in sample.iter().take(SAMPLE_LIMIT) {
        let Some(map) = entry.as_object() else {
            continue;
        };
        for key in map.keys() {
            *key_frequency.entry(key.as_str()).or_default() += 1;
        }
    }

    let columns: Vec<Column> = key_frequency
        .into_keys()
        .sorted_by(|a, b| (key_score(a), *a).cmp(&(key_score(b), *b)))
        .map(|key| Column::new(key, width))
        .collect();

    log::debug!(
        "Detected {} columns from {} sampled entries",
        columns.len(),
        sample.len().min(SAMPLE_LIMIT)
    );
    columns
}

/// the operator-managed column list; order is fixed, only visibility changes
#[derive(Debug, Default)]
pub struct ColumnSet {
    columns: Vec<Column>,
    cursor: usize,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns, cursor: 0 }
    }

    pub fn all(&self) -> &[Column] {
        &self.columns
    }

    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.columns.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn toggle_at_cursor(&mut self) {
        if let Some(column) = self.columns.get_mut(self.cursor) {
            column.visible = !column.visible;
            log::debug!("Column '{}' visible: {}", column.key, column.visible);
        }
    }
}
