//! Integration tests for roster loading.
//!
//! These write small roster files the way the search page exports them
//! and load them through the public API.

use roster::{CandidateSource, CastRank, FileSource, Roster, RosterError};
use std::fs;
use std::path::PathBuf;

fn fixture_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("roster-it-{}-{}", test, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const TONIGHT: &str = r#"{
  "casts": [
    {
      "id": 11,
      "name": "Yuka",
      "image": "/img/yuka.jpg",
      "age": 24,
      "verified": true,
      "serviceAreas": ["Ginza", "Roppongi"],
      "interests": ["Wine", "Golf", "Jazz", "Film"],
      "zodiacSign": "Libra",
      "rank": "vip",
      "rating": 4.8
    },
    { "id": 12, "name": "Kana", "image": "/img/kana.jpg" }
  ]
}"#;

const WEEKEND: &str = r#"[
  { "id": 12, "name": "Kana (weekend)", "image": "/img/kana2.jpg" },
  { "id": 13, "name": "Mio", "image": "/img/mio.jpg", "rank": "premium" }
]"#;

#[test]
fn test_load_and_merge_files() {
    let dir = fixture_dir("merge");
    let tonight = dir.join("tonight.json");
    let weekend = dir.join("weekend.json");
    fs::write(&tonight, TONIGHT).unwrap();
    fs::write(&weekend, WEEKEND).unwrap();

    let roster = Roster::load_from_files(&[tonight, weekend]).unwrap();

    let ids: Vec<_> = roster.candidates().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![11, 12, 13]);
    assert_eq!(roster.get(12).unwrap().name, "Kana", "first file wins");

    let yuka = roster.get(11).unwrap();
    assert_eq!(yuka.rank, CastRank::Vip);
    assert_eq!(yuka.location(), Some("Ginza"));
    assert_eq!(yuka.tags(3).len(), 3);
    assert!(yuka.extra.contains_key("rating"));

    assert_eq!(roster.get(13).unwrap().rank.hourly_rate(), 100.0);
}

#[test]
fn test_file_source_feeds_candidates_in_order() {
    let dir = fixture_dir("source");
    let path = dir.join("tonight.json");
    fs::write(&path, TONIGHT).unwrap();

    let source = FileSource::new(vec![path]);
    let candidates = source.candidates().unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name, "Yuka");
    assert_eq!(candidates[1].rank, CastRank::Standard);
}

#[test]
fn test_missing_file_is_reported() {
    let dir = fixture_dir("missing");
    let result = Roster::load_from_files(&[dir.join("nope.json")]);
    assert!(matches!(result, Err(RosterError::FileNotFound { .. })));
}

#[test]
fn test_malformed_file_is_reported_with_position() {
    let dir = fixture_dir("malformed");
    let path = dir.join("broken.json");
    fs::write(&path, "[{\"id\": 1, \"name\": \"A\"\n").unwrap();

    match Roster::load_from_file(&path) {
        Err(RosterError::ParseError { file, line, .. }) => {
            assert_eq!(file, "broken.json");
            assert!(line >= 1);
        }
        other => panic!("expected parse error, got {:?}", other.map(|r| r.len())),
    }
}
