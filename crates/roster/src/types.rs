//! Core domain types for cast rosters.
//!
//! A roster is the ordered list of casts a guest swipes through. Records
//! arrive as JSON objects from the marketplace backend, so the fields use
//! the backend's camelCase names.
//!
//! Key points:
//! - `CastId` alias keeps ids from being confused with ages or ranks
//! - required fields are plain values, decorative ones are `Option`/`Vec`
//! - unknown fields land in `extra` so newer payloads still load

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a cast profile
pub type CastId = u32;

// =============================================================================
// Cast Rank
// =============================================================================

/// Pricing tier of a cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastRank {
    #[default]
    Standard,
    Premium,
    Vip,
}

impl CastRank {
    /// Hourly booking rate for this tier
    pub fn hourly_rate(&self) -> f64 {
        match self {
            CastRank::Standard => 60.0,
            CastRank::Premium => 100.0,
            CastRank::Vip => 150.0,
        }
    }
}

// =============================================================================
// Candidate
// =============================================================================

/// A cast profile shown on a swipe card.
///
/// Only `id`, `name` and `image` are required. Everything else is
/// decoration for the card face; the deck never looks at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CastId,
    pub name: String,
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    /// Identity has been checked by the marketplace
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zodiac_sign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(default)]
    pub rank: CastRank,

    /// Fields this crate does not know about, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Candidate {
    /// Create a candidate with only the required fields set
    pub fn new(id: CastId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            age: None,
            verified: false,
            service_areas: Vec::new(),
            interests: Vec::new(),
            occupation: None,
            personality: None,
            zodiac_sign: None,
            introduction: None,
            rank: CastRank::default(),
            extra: BTreeMap::new(),
        }
    }

    /// First listed service area, used as the card's location line
    pub fn location(&self) -> Option<&str> {
        self.service_areas.first().map(|s| s.as_str())
    }

    /// Up to `limit` interest tags for the card face
    pub fn tags(&self, limit: usize) -> &[String] {
        let end = self.interests.len().min(limit);
        &self.interests[..end]
    }
}

// =============================================================================
// Roster - ordered candidates with an id index
// =============================================================================

/// Ordered list of candidates with O(1) lookup by id.
///
/// Order matters: it is the order cards are dealt in.
#[derive(Debug, Default)]
pub struct Roster {
    pub(crate) candidates: Vec<Candidate>,
    /// Position of each id in `candidates`
    pub(crate) positions: HashMap<CastId, usize>,
}

impl Roster {
    /// Creates a new, empty Roster
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Get a candidate by id
    pub fn get(&self, id: CastId) -> Option<&Candidate> {
        self.positions.get(&id).map(|&pos| &self.candidates[pos])
    }

    /// All candidates in deal order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Consume the roster, yielding candidates in deal order
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }
}
