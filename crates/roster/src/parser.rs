//! Parser for roster JSON files.
//!
//! Two shapes are accepted:
//! - a bare array of cast objects: `[{"id": 1, ...}, ...]`
//! - the search endpoint payload: `{"casts": [{"id": 1, ...}, ...]}`
//!
//! Parsing is strict about the required fields (`id`, `name`, `image`)
//! and lenient about everything else.

use crate::error::{RosterError, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum RosterPayload {
    Bare(Vec<Candidate>),
    Wrapped { casts: Vec<Candidate> },
}

impl RosterPayload {
    fn into_candidates(self) -> Vec<Candidate> {
        match self {
            RosterPayload::Bare(casts) | RosterPayload::Wrapped { casts } => casts,
        }
    }
}

/// Parse roster JSON held in memory.
///
/// `origin` names the source in error messages (usually the file name).
pub fn parse_candidates_str(origin: &str, json: &str) -> Result<Vec<Candidate>> {
    let payload: RosterPayload =
        serde_json::from_str(json).map_err(|e| RosterError::ParseError {
            file: origin.to_string(),
            line: e.line(),
            column: e.column(),
            reason: e.to_string(),
        })?;

    let candidates = payload.into_candidates();
    validate(origin, &candidates)?;
    Ok(candidates)
}

/// Parse a roster file from disk
pub fn parse_candidates(path: &Path) -> Result<Vec<Candidate>> {
    if !path.exists() {
        return Err(RosterError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let json = fs::read_to_string(path)?;
    let origin = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_candidates_str(&origin, &json)
}

fn validate(origin: &str, candidates: &[Candidate]) -> Result<()> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate.name.trim().is_empty() {
            return Err(RosterError::EmptyField {
                id: candidate.id,
                field: "name",
            });
        }
        if candidate.image.trim().is_empty() {
            return Err(RosterError::EmptyField {
                id: candidate.id,
                field: "image",
            });
        }
        if !seen.insert(candidate.id) {
            return Err(RosterError::DuplicateId {
                id: candidate.id,
                file: origin.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const YUKA: &str = r#"{
        "id": 1,
        "name": "Yuka",
        "age": 25,
        "image": "static/images/casts/yuka.png",
        "rating": 4.9,
        "rank": "premium",
        "serviceAreas": ["Roppongi", "Shibuya"],
        "interests": ["Movies", "Cooking", "Travel", "Wine"],
        "zodiacSign": "Virgo",
        "occupation": "Model",
        "verified": true
    }"#;

    #[test]
    fn test_parse_bare_array() {
        let json = format!("[{}]", YUKA);
        let candidates = parse_candidates_str("casts.json", &json).unwrap();

        assert_eq!(candidates.len(), 1);
        let yuka = &candidates[0];
        assert_eq!(yuka.id, 1);
        assert_eq!(yuka.age, Some(25));
        assert_eq!(yuka.rank, CastRank::Premium);
        assert_eq!(yuka.location(), Some("Roppongi"));
        assert_eq!(yuka.tags(3).len(), 3);
        assert!(yuka.verified);
    }

    #[test]
    fn test_parse_wrapped_payload() {
        let json = format!(r#"{{"casts": [{}]}}"#, YUKA);
        let candidates = parse_candidates_str("search.json", &json).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Yuka");
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let json = format!("[{}]", YUKA);
        let candidates = parse_candidates_str("casts.json", &json).unwrap();
        let rating = candidates[0].extra.get("rating").and_then(|v| v.as_f64());
        assert_eq!(rating, Some(4.9));
    }

    #[test]
    fn test_minimal_record() {
        let json = r#"[{"id": 7, "name": "Mio", "image": "mio.png"}]"#;
        let candidates = parse_candidates_str("casts.json", json).unwrap();
        let mio = &candidates[0];
        assert_eq!(mio.rank, CastRank::Standard);
        assert!(mio.service_areas.is_empty());
        assert!(mio.location().is_none());
        assert!(mio.extra.is_empty());
    }

    #[test]
    fn test_missing_required_field() {
        let json = r#"[{"id": 7, "name": "Mio"}]"#;
        let result = parse_candidates_str("casts.json", json);
        assert!(matches!(result, Err(RosterError::ParseError { .. })));
    }

    #[test]
    fn test_empty_name_rejected() {
        let json = r#"[{"id": 7, "name": "  ", "image": "mio.png"}]"#;
        let result = parse_candidates_str("casts.json", json);
        assert!(matches!(
            result,
            Err(RosterError::EmptyField { id: 7, field: "name" })
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            {"id": 3, "name": "Rina", "image": "rina.png"},
            {"id": 3, "name": "Rina again", "image": "rina2.png"}
        ]"#;
        let result = parse_candidates_str("casts.json", json);
        assert!(matches!(result, Err(RosterError::DuplicateId { id: 3, .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_candidates(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(RosterError::FileNotFound { .. })));
    }
}
