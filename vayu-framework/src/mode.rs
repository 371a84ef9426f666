use std::fmt;

/// top-level interaction context; decides which handler receives key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Filtering,
    ColumnManagement,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "NORMAL",
            Mode::Filtering => "FILTER",
            Mode::ColumnManagement => "COLUMNS",
        };
        f.write_str(name)
    }
}
