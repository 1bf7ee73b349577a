//! Roster building and indexing logic.
//!
//! Builds a `Roster` from one or more parsed files:
//! - files are parsed in parallel with Rayon
//! - results are merged in the order the paths were given
//! - a cast listed in several files is kept once, first file wins

use crate::error::{RosterError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

impl Roster {
    /// Build a roster from candidates already in memory.
    ///
    /// Fails on a duplicate id, since the deck needs ids to be unique.
    pub fn from_candidates(candidates: Vec<Candidate>) -> Result<Self> {
        let mut roster = Roster::new();
        for candidate in candidates {
            let id = candidate.id;
            if !roster.insert(candidate) {
                return Err(RosterError::DuplicateId {
                    id,
                    file: "<memory>".to_string(),
                });
            }
        }
        Ok(roster)
    }

    /// Load and merge roster files.
    ///
    /// Steps:
    /// 1. Parse every file in parallel
    /// 2. Surface the first parse error, if any
    /// 3. Append candidates in path order, dropping repeated ids
    pub fn load_from_files(paths: &[PathBuf]) -> Result<Self> {
        info!("Loading roster from {} file(s)", paths.len());

        // par_iter + collect keeps input order
        let parsed: Vec<Result<Vec<Candidate>>> = paths
            .par_iter()
            .map(|path| parser::parse_candidates(path))
            .collect();

        let mut roster = Roster::new();
        for (path, result) in paths.iter().zip(parsed) {
            let candidates = result?;
            debug!("{} candidates in {}", candidates.len(), path.display());
            roster.merge(path, candidates);
        }

        info!("Roster ready with {} candidates", roster.len());
        Ok(roster)
    }

    /// Load a single roster file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::load_from_files(&[path.to_path_buf()])
    }

    fn merge(&mut self, path: &Path, candidates: Vec<Candidate>) {
        for candidate in candidates {
            let id = candidate.id;
            if !self.insert(candidate) {
                warn!(
                    "Cast {} from {} already in roster, keeping the first copy",
                    id,
                    path.display()
                );
            }
        }
    }

    /// Append a candidate. Returns false if the id is already present.
    pub fn insert(&mut self, candidate: Candidate) -> bool {
        if self.positions.contains_key(&candidate.id) {
            return false;
        }
        self.positions.insert(candidate.id, self.candidates.len());
        self.candidates.push(candidate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_roster(name: &str, json: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("roster-index-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_from_candidates_keeps_order() {
        let roster = Roster::from_candidates(vec![
            Candidate::new(3, "Rina", "rina.png"),
            Candidate::new(1, "Yuka", "yuka.png"),
        ])
        .unwrap();

        let ids: Vec<_> = roster.candidates().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(roster.get(1).unwrap().name, "Yuka");
    }

    #[test]
    fn test_from_candidates_rejects_duplicates() {
        let result = Roster::from_candidates(vec![
            Candidate::new(1, "Yuka", "yuka.png"),
            Candidate::new(1, "Yuka", "yuka.png"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_merges_files_first_wins() {
        let first = write_roster(
            "first.json",
            r#"[{"id": 1, "name": "Yuka", "image": "yuka.png"},
                {"id": 2, "name": "Kana", "image": "kana.png"}]"#,
        );
        let second = write_roster(
            "second.json",
            r#"{"casts": [{"id": 2, "name": "Kana (old)", "image": "kana.png"},
                          {"id": 3, "name": "Natsuki", "image": "natsuki.png"}]}"#,
        );

        let roster = Roster::load_from_files(&[first, second]).unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.get(2).unwrap().name, "Kana");
        let ids: Vec<_> = roster.candidates().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_load_surfaces_parse_errors() {
        let broken = write_roster("broken.json", "[{\"id\": 1,");
        let result = Roster::load_from_file(&broken);
        assert!(matches!(result, Err(RosterError::ParseError { .. })));
    }
}
