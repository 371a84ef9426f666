use crate::columns::SAMPLE_LIMIT;
use anyhow::{Context, Result};
use serde_json::Value;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// raw lines plus a parsed sample used for column detection
#[derive(Debug, Default)]
pub struct Loaded {
    /// every non-empty line, in file order
    pub lines: Vec<String>,
    /// the first `SAMPLE_LIMIT` lines that parsed as JSON
    pub sample: Vec<Value>,
}

/// read newline-delimited JSON from any reader
///
/// lines that are not JSON are kept as raw lines but left out of the sample
pub fn load_from_reader<R: Read>(reader: R) -> Result<Loaded> {
    let mut reader = BufReader::new(reader);
    let mut loaded = Loaded::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read log data")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            continue;
        }

        if loaded.sample.len() < SAMPLE_LIMIT
            && let Ok(value) = serde_json::from_str::<Value>(line)
        {
            loaded.sample.push(value);
        }
        loaded.lines.push(line.to_string());
    }

    log::debug!(
        "Loaded {} lines ({} sampled)",
        loaded.lines.len(),
        loaded.sample.len()
    );
    Ok(loaded)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Loaded> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    load_from_reader(file).with_context(|| format!("Failed to load {}", path.display()))
}
