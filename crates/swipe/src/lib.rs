//! Swipe deck core: gestures, queue, quota and matches.
//!
//! This crate is synchronous and free of I/O. It decides what happens;
//! the `session` crate decides when.
//!
//! ## Architecture
//! - `gesture`: drag sessions, release classification, mid-drag feedback
//! - `queue`: the ordered cards and the cursor into them
//! - `quota`: daily swipe allowance and the countdown to midnight
//! - `matching`: the probabilistic match check
//! - `stack`: `CardStack`, the state container tying them together
//! - `view`: pure render model built from a `CardStack`
//! - `traits`: collaborators the host supplies (notifications, routing, clock)
//!
//! ## Example Usage
//! ```ignore
//! use swipe::{CardStack, RngSampler, SwipeConfig, render};
//!
//! let mut stack = CardStack::new(candidates, SwipeConfig::default(),
//!     Box::new(RngSampler::from_os_rng()), 3_600)?;
//!
//! let advance = stack.like()?;          // busy until the card is gone
//! // ... play the exit animation ...
//! let report = stack.complete_advance();
//! let view = render(&stack);
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod matching;
pub mod queue;
pub mod quota;
pub mod stack;
pub mod traits;
pub mod view;

// Re-export main types
pub use config::SwipeConfig;
pub use error::{ActionResult, Rejection, SwipeError};
pub use gesture::{
    CardTransform, Direction, DragFeedback, DragSession, Hint, HintFeedback, Outcome, Point,
    classify, hint_for,
};
pub use matching::{MatchPolicy, ReplaySampler, RngSampler, Sampler};
pub use queue::CardQueue;
pub use quota::{DailyQuota, format_countdown, seconds_until_midnight};
pub use stack::{Advance, AdvanceReport, CardStack, Release};
pub use traits::{
    Clock, ClockReading, Navigator, NotificationSink, Route, Severity, SystemClock, TracingSink,
};
pub use view::{Badges, CardView, DeckView, render};
