//! # Roster Crate
//!
//! This crate handles loading the casts a guest swipes through.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Candidate, CastRank, Roster)
//! - **parser**: Parse roster JSON into Rust structs
//! - **index**: Merge several roster files into one ordered Roster
//! - **source**: The `CandidateSource` seam decks are built from
//! - **error**: Error types for roster loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use roster::Roster;
//! use std::path::PathBuf;
//!
//! let roster = Roster::load_from_files(&[PathBuf::from("data/casts.json")])?;
//! let yuka = roster.get(1).unwrap();
//! println!("{} works in {:?}", yuka.name, yuka.location());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod source;

// Re-export commonly used types for convenience
pub use error::{RosterError, Result};
pub use source::{CandidateSource, FileSource, StaticSource};
pub use types::{Candidate, CastId, CastRank, Roster};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_creation() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn test_insert_candidate() {
        let mut roster = Roster::new();
        assert!(roster.insert(Candidate::new(1, "Yuka", "yuka.png")));
        assert!(!roster.insert(Candidate::new(1, "Yuka", "yuka.png")));

        let retrieved = roster.get(1).unwrap();
        assert_eq!(retrieved.name, "Yuka");
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_empty_queries() {
        let roster = Roster::new();
        assert!(roster.get(999).is_none());
        assert!(roster.candidates().is_empty());
    }

    #[test]
    fn test_rank_rates() {
        assert_eq!(CastRank::Standard.hourly_rate(), 60.0);
        assert_eq!(CastRank::Premium.hourly_rate(), 100.0);
        assert_eq!(CastRank::Vip.hourly_rate(), 150.0);
    }

    #[test]
    fn test_tags_are_capped() {
        let mut candidate = Candidate::new(1, "Yuka", "yuka.png");
        candidate.interests = vec!["a".into(), "b".into()];
        assert_eq!(candidate.tags(3).len(), 2);
        assert_eq!(candidate.tags(1), &["a".to_string()]);
    }
}
