//! Candidate sources feed a deck its cards.
//!
//! A deck takes a finite, ordered list once at construction. Refilling
//! means building a new deck from a fresh call to `candidates()`.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::types::{Candidate, Roster};

/// Supplies the ordered candidates for one deck.
///
/// `Send + Sync` so a source can be shared with a session task.
pub trait CandidateSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Produce the candidates in deal order
    fn candidates(&self) -> Result<Vec<Candidate>>;
}

/// Candidates injected directly, e.g. already fetched by the caller
pub struct StaticSource {
    candidates: Vec<Candidate>,
}

impl StaticSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl CandidateSource for StaticSource {
    fn name(&self) -> &str {
        "StaticSource"
    }

    fn candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self.candidates.clone())
    }
}

/// Candidates read from roster JSON files on every call
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl CandidateSource for FileSource {
    fn name(&self) -> &str {
        "FileSource"
    }

    fn candidates(&self) -> Result<Vec<Candidate>> {
        let roster = Roster::load_from_files(&self.paths)
            .with_context(|| format!("Failed to load roster from {} file(s)", self.paths.len()))?;
        Ok(roster.into_candidates())
    }
}
