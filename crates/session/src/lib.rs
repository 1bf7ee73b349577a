//! Session crate for the cast swipe deck.
//!
//! Wraps a `swipe::CardStack` with the timers a live page needs: the exit
//! animation delay, delayed match announcements and the once-a-second
//! quota countdown.
//!
//! ## Example Usage
//! ```ignore
//! use roster::FileSource;
//! use session::SwipeSession;
//! use swipe::SwipeConfig;
//!
//! let source = FileSource::new(vec!["data/casts.json".into()]);
//! let mut session = SwipeSession::builder(SwipeConfig::default()).start(&source)?;
//!
//! session.like().await?;
//! session.settle().await;
//! println!("{:?}", session.view());
//! session.shutdown().await;
//! ```

pub mod session;

pub use session::{SessionBuilder, SwipeSession};
