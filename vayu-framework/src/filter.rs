use crate::entry::EntryStore;
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};

/// search spaces larger than this are scanned in parallel
const PARALLEL_THRESHOLD: usize = 1000;

/// outcome of applying a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// the filtered view was recomputed
    Applied,
    /// the pattern failed to compile; the previous view is kept
    Rejected,
}

/// filtering engine over the raw text of every stored line
///
/// the view is always recomputed from the whole store, never incrementally;
/// each call costs O(n) regex matches
pub struct FilterEngine {
    /// pattern that produced the current view
    pattern: String,
    /// indices into the entry store, in store order unless reversed
    filtered: Vec<usize>,
    reversed: bool,
}

impl FilterEngine {
    /// create a filter engine showing every line of the store
    pub fn new(store: &EntryStore) -> Self {
        Self {
            pattern: String::new(),
            filtered: (0..store.len()).collect(),
            reversed: false,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<usize> {
        self.filtered.get(position).copied()
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// recompute the filtered view for `pattern`
    ///
    /// the pattern is a case-insensitive regex matched against raw line text;
    /// an empty pattern selects every line
    pub fn apply(&mut self, store: &EntryStore, pattern: &str) -> FilterOutcome {
        if pattern.is_empty() {
            self.pattern.clear();
            self.filtered = (0..store.len()).collect();
            self.reversed = false;
            return FilterOutcome::Applied;
        }

        let regex = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => regex,
            Err(e) => {
                log::debug!("Ignoring invalid filter pattern {:?}: {}", pattern, e);
                return FilterOutcome::Rejected;
            }
        };

        self.filtered = if store.len() > PARALLEL_THRESHOLD {
            Self::filter_parallel(store, &regex)
        } else {
            Self::filter_sequential(store, &regex)
        };
        self.pattern = pattern.to_string();
        self.reversed = false;

        log::debug!(
            "Filter {:?} matched {} of {} lines",
            pattern,
            self.filtered.len(),
            store.len()
        );
        FilterOutcome::Applied
    }

    /// reverse the current view in place; applying it twice restores the order
    pub fn reverse(&mut self) {
        self.filtered.reverse();
        self.reversed = !self.reversed;
    }

    /// sequential filtering (for small stores)
    fn filter_sequential(store: &EntryStore, regex: &Regex) -> Vec<usize> {
        store
            .iter()
            .enumerate()
            .filter(|(_, line)| regex.is_match(line.raw()))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// parallel filtering (for large stores); collection keeps store order
    fn filter_parallel(store: &EntryStore, regex: &Regex) -> Vec<usize> {
        let lines = store.lines();
        (0..lines.len())
            .into_par_iter()
            .filter(|&idx| regex.is_match(lines[idx].raw()))
            .collect()
    }
}
