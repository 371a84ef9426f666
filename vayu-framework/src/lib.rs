//! # vayu-framework
//!
//! The interactive exploration engine behind `vayu`, a terminal viewer for
//! newline-delimited JSON logs.
//!
//! ## Overview
//!
//! A log file is loaded once into an [`EntryStore`]. From a bounded sample of parsed
//! records the framework detects an ordered set of [`Column`]s, then runs a single
//! threaded event loop where every key press is routed by the current [`Mode`]:
//!
//! - **Normal**: move the cursor, reverse the view, enter the other modes
//! - **Filtering**: live, case-insensitive regex filtering over raw lines
//! - **ColumnManagement**: toggle which columns are shown
//!
//! The record under the cursor is pretty-printed and highlighted in a detail pane.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vayu_framework::{AppDesc, loader, start_with_desc};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     use ratatui::{Terminal, backend::CrosstermBackend};
//!     use std::io;
//!
//!     let loaded = loader::load_file("app.ndjson")?;
//!     vayu_framework::install_panic_hooks(|| {})?;
//!     let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
//!     start_with_desc(&mut terminal, loaded, AppDesc::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Key Bindings
//!
//! - `j`/`k`, `↓`/`↑`: move down/up
//! - `g`/`G`: jump to first/last line, `Ctrl+d`/`Ctrl+u`: half page down/up
//! - `/`: filter; `Enter`/`Esc` leave the input and keep the pattern
//! - `s`: reverse the filtered view
//! - `c`: manage columns (`Space`/`Enter` toggles, `c`/`Esc` exits)
//! - `y`: copy the selected line, `?`: help, `q`: quit
//!
//! ## Performance
//!
//! Filtering re-scans every raw line on each keystroke. Large files are scanned in
//! parallel with rayon, but the cost stays linear in the number of lines.

// internal modules (not part of public API but needed for app)
pub(crate) mod app_block;
pub(crate) mod content_line_maker;
pub(crate) mod theme;
pub mod status_bar;

pub mod app;
pub mod columns;
pub mod detail;
pub mod entry;
pub mod filter;
pub mod highlight;
pub mod loader;
pub mod mode;
pub mod viewport;

// re-export commonly used types
pub use app::{App, AppDesc, FrameView, install_panic_hooks, start_with_desc};
pub use columns::{Column, ColumnSet, detect_columns};
pub use detail::DetailRenderer;
pub use entry::{EntryStore, Field, LogLine};
pub use filter::{FilterEngine, FilterOutcome};
pub use highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};
pub use loader::Loaded;
pub use mode::Mode;
pub use theme::Palette;
pub use viewport::Viewport;
