//! Error types for the swipe crate.
//!
//! Deck actions never fail. When one is dropped the deck says why with a
//! `Rejection`; only building a deck from a bad config is an error.

use thiserror::Error;

/// Errors raised while setting up a deck
#[derive(Error, Debug)]
pub enum SwipeError {
    #[error("Invalid config value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

/// Why a deck action was a no-op
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// An exit animation is still running
    #[error("a card is still leaving the stack")]
    Busy,

    #[error("no cards left in the queue")]
    Exhausted,

    #[error("daily swipe quota used up")]
    QuotaExhausted,

    /// Pointer went down on a card that is not on top
    #[error("card is not on top of the stack")]
    NotTopCard,

    /// Move or release without a preceding pointer-down
    #[error("no drag in progress")]
    NoDrag,

    #[error("already at the first card")]
    AtStart,

    /// The session was shut down
    #[error("swipe session is closed")]
    Closed,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SwipeError>;

/// Outcome of a deck action: the value, or why it was dropped
pub type ActionResult<T> = std::result::Result<T, Rejection>;
