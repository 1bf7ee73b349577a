//! # Card Stack
//!
//! The deck's single state container. It owns the queue, the quota, the
//! match policy, the active drag and the busy flag, and every transition
//! goes through a method here.
//!
//! A swipe is two steps so the caller can play the exit animation in
//! between:
//! 1. `skip`/`like`/`superlike` (or a classified `pointer_up`) decide the
//!    outcome, set the busy flag and roll the match. Nothing moves yet.
//! 2. `complete_advance` moves the cursor, spends one swipe and clears
//!    the busy flag.
//!
//! While busy every other action is dropped, so each accepted swipe
//! advances the cursor exactly once.

use roster::{Candidate, CastId};
use tracing::{debug, instrument, warn};

use crate::config::SwipeConfig;
use crate::error::{ActionResult, Rejection, Result};
use crate::gesture::{Direction, DragFeedback, DragSession, Hint, Outcome, Point};
use crate::matching::{MatchPolicy, Sampler};
use crate::queue::CardQueue;
use crate::quota::DailyQuota;

/// A swipe that has been accepted and is waiting for its exit animation
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub outcome: Outcome,
    pub direction: Direction,
    /// The card that is leaving
    pub candidate: Candidate,
    pub matched: bool,
}

impl Advance {
    pub fn exit_transform(&self) -> &'static str {
        self.direction.exit_transform()
    }

    /// Hint forced to full opacity during the exit animation
    pub fn exit_hint(&self) -> Hint {
        self.direction.hint()
    }
}

/// State after an advance finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceReport {
    pub cursor: usize,
    pub exhausted: bool,
    pub quota_remaining: u32,
    /// This advance spent the last swipe of the day
    pub quota_depleted: bool,
}

/// What a pointer release turned into
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// Card springs back to neutral
    Reset,
    Advance(Advance),
}

#[derive(Debug)]
pub struct CardStack {
    config: SwipeConfig,
    queue: CardQueue,
    quota: DailyQuota,
    matcher: MatchPolicy,
    drag: Option<DragSession>,
    busy: bool,
}

impl CardStack {
    /// Build a deck over `candidates`.
    ///
    /// `countdown_secs` is the time left until the quota refills, usually
    /// `ClockReading::until_midnight` of the current time.
    pub fn new(
        candidates: Vec<Candidate>,
        config: SwipeConfig,
        sampler: Box<dyn Sampler>,
        countdown_secs: u64,
    ) -> Result<Self> {
        config.validate()?;
        let quota = DailyQuota::new(config.daily_limit, countdown_secs);
        let matcher = MatchPolicy::new(
            config.like_match_probability,
            config.superlike_match_probability,
            sampler,
        );
        debug!("New card stack with {} candidates", candidates.len());
        Ok(Self {
            config,
            queue: CardQueue::new(candidates),
            quota,
            matcher,
            drag: None,
            busy: false,
        })
    }

    // Accessors

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn queue(&self) -> &CardQueue {
        &self.queue
    }

    pub fn quota(&self) -> &DailyQuota {
        &self.quota
    }

    pub fn cursor(&self) -> usize {
        self.queue.cursor()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_exhausted()
    }

    pub fn top(&self) -> Option<&Candidate> {
        self.queue.current()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    // Buttons

    pub fn skip(&mut self) -> ActionResult<Advance> {
        self.begin_advance(Direction::Left)
    }

    pub fn like(&mut self) -> ActionResult<Advance> {
        self.begin_advance(Direction::Right)
    }

    pub fn superlike(&mut self) -> ActionResult<Advance> {
        self.begin_advance(Direction::Up)
    }

    /// Apply an outcome from any input. `Reset` only drops the drag.
    pub fn apply(&mut self, outcome: Outcome) -> ActionResult<Release> {
        match outcome.direction() {
            Some(direction) => self.begin_advance(direction).map(Release::Advance),
            None => {
                self.drag = None;
                Ok(Release::Reset)
            }
        }
    }

    #[instrument(skip(self), fields(cursor = self.queue.cursor()))]
    fn begin_advance(&mut self, direction: Direction) -> ActionResult<Advance> {
        self.check_ready()?;
        let Some(candidate) = self.queue.current().cloned() else {
            return Err(Rejection::Exhausted);
        };

        self.busy = true;
        self.drag = None;
        let matched = self.matcher.roll(direction);
        debug!(
            "Card {} leaving {:?} (matched: {})",
            candidate.id, direction, matched
        );

        Ok(Advance {
            outcome: Outcome::from(direction),
            direction,
            candidate,
            matched,
        })
    }

    /// Finish the advance started by the last accepted swipe.
    ///
    /// Returns `None` if no advance is in flight.
    #[instrument(skip(self))]
    pub fn complete_advance(&mut self) -> Option<AdvanceReport> {
        if !self.busy {
            return None;
        }
        self.queue.advance();
        let quota_depleted = self.quota.consume();
        self.busy = false;

        if quota_depleted {
            warn!("Daily swipe quota used up");
        }
        debug!(
            "Advanced to {}/{} ({} swipes left)",
            self.queue.cursor(),
            self.queue.len(),
            self.quota.remaining()
        );

        Some(AdvanceReport {
            cursor: self.queue.cursor(),
            exhausted: self.queue.is_exhausted(),
            quota_remaining: self.quota.remaining(),
            quota_depleted,
        })
    }

    /// Drop an in-flight advance without moving the cursor.
    ///
    /// Used when the deck is torn down mid-animation.
    pub fn cancel_advance(&mut self) {
        self.busy = false;
        self.drag = None;
    }

    /// Step back to the previous card. Does not refund the quota.
    #[instrument(skip(self), fields(cursor = self.queue.cursor()))]
    pub fn rewind(&mut self) -> ActionResult<&Candidate> {
        if self.busy {
            return Err(Rejection::Busy);
        }
        if !self.queue.rewind() {
            return Err(Rejection::AtStart);
        }
        self.drag = None;
        debug!("Rewound to {}", self.queue.cursor());
        self.queue.current().ok_or(Rejection::Exhausted)
    }

    // Pointer input

    /// Start dragging `card` at `point`.
    ///
    /// Only the top card can be dragged. A new pointer-down replaces a
    /// drag that never got its pointer-up.
    pub fn pointer_down(&mut self, card: CastId, point: Point) -> ActionResult<()> {
        self.check_ready()?;
        match self.queue.current() {
            Some(top) if top.id == card => {}
            Some(_) => return Err(Rejection::NotTopCard),
            None => return Err(Rejection::Exhausted),
        }
        if self.drag.is_some() {
            debug!("Superseding unfinished drag");
        }
        self.drag = Some(DragSession::begin(card, point));
        Ok(())
    }

    /// Follow the pointer. `None` when no drag is active.
    pub fn pointer_move(&mut self, point: Point) -> Option<DragFeedback> {
        let config = &self.config;
        self.drag.as_mut().map(|drag| drag.move_to(point, config))
    }

    /// Release the pointer and act on the classified outcome
    pub fn pointer_up(&mut self) -> ActionResult<Release> {
        let drag = self.drag.take().ok_or(Rejection::NoDrag)?;
        let outcome = drag.release(self.config.release_threshold);
        debug!("Drag on {} released as {:?}", drag.card(), outcome);
        self.apply(outcome)
    }

    /// Drop the active drag, e.g. on pointer-cancel
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    // Timer

    /// One quota timer tick. Returns true when the quota refilled.
    pub fn tick(&mut self, next_countdown: impl FnOnce() -> u64) -> bool {
        let refilled = self.quota.tick(next_countdown);
        if refilled {
            debug!("Daily quota refilled to {}", self.quota.limit());
        }
        refilled
    }

    /// Align the quota countdown with a clock reading. A new local day
    /// refills the quota. Returns true on refill.
    pub fn resync(&mut self, until_midnight: u64, day_changed: bool) -> bool {
        let refilled = self.quota.resync(until_midnight, day_changed);
        if refilled {
            debug!("New day, quota refilled to {}", self.quota.limit());
        }
        refilled
    }

    fn check_ready(&self) -> ActionResult<()> {
        if self.busy {
            return Err(Rejection::Busy);
        }
        if self.queue.is_exhausted() {
            return Err(Rejection::Exhausted);
        }
        if self.quota.is_depleted() {
            return Err(Rejection::QuotaExhausted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::ReplaySampler;

    fn abc() -> Vec<Candidate> {
        vec![
            Candidate::new(1, "A", "a.png"),
            Candidate::new(2, "B", "b.png"),
            Candidate::new(3, "C", "c.png"),
        ]
    }

    fn stack_with(samples: Vec<f64>, config: SwipeConfig) -> CardStack {
        CardStack::new(abc(), config, Box::new(ReplaySampler::new(samples)), 3_600).unwrap()
    }

    fn stack() -> CardStack {
        stack_with(vec![], SwipeConfig::default())
    }

    #[test]
    fn test_like_advances_after_completion() {
        let mut stack = stack_with(vec![0.1], SwipeConfig::default());

        let advance = stack.like().unwrap();
        assert_eq!(advance.candidate.id, 1);
        assert!(advance.matched);
        assert_eq!(advance.exit_hint(), Hint::Like);
        // nothing moves until the animation is done
        assert_eq!(stack.cursor(), 0);
        assert!(stack.is_busy());

        let report = stack.complete_advance().unwrap();
        assert_eq!(report.cursor, 1);
        assert_eq!(report.quota_remaining, 29);
        assert!(!report.exhausted);
        assert_eq!(stack.top().map(|c| c.id), Some(2));
        assert!(!stack.is_busy());
    }

    #[test]
    fn test_busy_drops_second_swipe() {
        let mut stack = stack();
        stack.like().unwrap();
        assert_eq!(stack.skip(), Err(Rejection::Busy));
        assert_eq!(stack.superlike(), Err(Rejection::Busy));
        assert_eq!(stack.rewind().map(|c| c.id), Err(Rejection::Busy));
        assert_eq!(
            stack.pointer_down(1, Point::default()),
            Err(Rejection::Busy)
        );

        stack.complete_advance().unwrap();
        assert!(stack.complete_advance().is_none());
        assert_eq!(stack.cursor(), 1);
    }

    #[test]
    fn test_rewind_restores_cursor_only() {
        let mut stack = stack_with(vec![0.0], SwipeConfig::default());
        let advance = stack.like().unwrap();
        assert!(advance.matched);
        stack.complete_advance().unwrap();

        let back = stack.rewind().unwrap();
        assert_eq!(back.id, 1);
        assert_eq!(stack.cursor(), 0);
        assert_eq!(stack.quota().remaining(), 29);
    }

    #[test]
    fn test_rewind_at_start_is_noop() {
        let mut stack = stack();
        assert_eq!(stack.rewind().map(|c| c.id), Err(Rejection::AtStart));
        assert_eq!(stack.cursor(), 0);
    }

    #[test]
    fn test_exhausted_queue_rejects_swipes() {
        let mut stack = stack();
        for _ in 0..3 {
            stack.skip().unwrap();
            stack.complete_advance().unwrap();
        }
        assert!(stack.is_exhausted());
        assert_eq!(stack.like(), Err(Rejection::Exhausted));
        assert_eq!(stack.cursor(), 3);
    }

    #[test]
    fn test_depleted_quota_blocks_all_swipes() {
        let mut stack = stack_with(vec![], SwipeConfig::default().with_daily_limit(1));
        stack.skip().unwrap();
        let report = stack.complete_advance().unwrap();
        assert!(report.quota_depleted);

        assert_eq!(stack.like(), Err(Rejection::QuotaExhausted));
        assert_eq!(stack.skip(), Err(Rejection::QuotaExhausted));
        assert_eq!(stack.superlike(), Err(Rejection::QuotaExhausted));
        assert_eq!(stack.cursor(), 1);

        // rewind is not a swipe
        assert!(stack.rewind().is_ok());
    }

    #[test]
    fn test_tick_refill_unblocks() {
        let mut stack = CardStack::new(
            abc(),
            SwipeConfig::default().with_daily_limit(1),
            Box::new(ReplaySampler::default()),
            1,
        )
        .unwrap();
        stack.skip().unwrap();
        stack.complete_advance().unwrap();
        assert_eq!(stack.like(), Err(Rejection::QuotaExhausted));

        assert!(stack.tick(|| 86_400));
        assert_eq!(stack.quota().remaining(), 1);
        assert!(stack.like().is_ok());
    }

    #[test]
    fn test_drag_right_likes() {
        let mut stack = stack_with(vec![0.9], SwipeConfig::default());
        stack.pointer_down(1, Point::new(100.0, 100.0)).unwrap();
        stack.pointer_move(Point::new(180.0, 90.0));
        stack.pointer_move(Point::new(220.0, -30.0));

        match stack.pointer_up().unwrap() {
            Release::Advance(advance) => {
                assert_eq!(advance.outcome, Outcome::Like);
                assert!(!advance.matched);
            }
            Release::Reset => panic!("expected a like"),
        }
        assert!(stack.is_busy());
    }

    #[test]
    fn test_short_drag_resets() {
        let mut stack = stack();
        stack.pointer_down(1, Point::new(0.0, 0.0)).unwrap();
        stack.pointer_move(Point::new(60.0, -60.0));
        assert_eq!(stack.pointer_up(), Ok(Release::Reset));
        assert!(!stack.is_busy());
        assert!(stack.drag().is_none());
        assert_eq!(stack.cursor(), 0);
    }

    #[test]
    fn test_pointer_down_only_on_top_card() {
        let mut stack = stack();
        assert_eq!(
            stack.pointer_down(2, Point::default()),
            Err(Rejection::NotTopCard)
        );
        assert!(stack.pointer_move(Point::new(300.0, 0.0)).is_none());
        assert_eq!(stack.pointer_up(), Err(Rejection::NoDrag));
    }

    #[test]
    fn test_new_pointer_down_supersedes_drag() {
        let mut stack = stack();
        stack.pointer_down(1, Point::new(0.0, 0.0)).unwrap();
        stack.pointer_move(Point::new(300.0, 0.0));
        stack.pointer_down(1, Point::new(500.0, 500.0)).unwrap();

        assert_eq!(stack.drag().map(|d| d.origin()), Some(Point::new(500.0, 500.0)));
        assert_eq!(stack.pointer_up(), Ok(Release::Reset));
    }

    #[test]
    fn test_skip_does_not_draw_match() {
        let mut stack = stack_with(vec![0.0], SwipeConfig::default());
        assert!(!stack.skip().unwrap().matched);
        stack.complete_advance();
        assert!(stack.superlike().unwrap().matched);
    }

    #[test]
    fn test_cancel_advance_keeps_cursor() {
        let mut stack = stack();
        stack.like().unwrap();
        stack.cancel_advance();
        assert!(!stack.is_busy());
        assert_eq!(stack.cursor(), 0);
        assert_eq!(stack.quota().remaining(), 30);
    }

    #[test]
    fn test_resync_refills_on_new_day_only() {
        let mut stack = stack_with(vec![], SwipeConfig::default().with_daily_limit(1));
        stack.skip().unwrap();
        stack.complete_advance();
        assert_eq!(stack.like(), Err(Rejection::QuotaExhausted));

        assert!(!stack.resync(90, false));
        assert_eq!(stack.quota().countdown_secs(), 90);
        assert!(stack.quota().is_depleted());

        assert!(stack.resync(86_400, true));
        assert!(stack.like().is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = CardStack::new(
            abc(),
            SwipeConfig::default().with_stack_depth(0),
            Box::new(ReplaySampler::default()),
            10,
        );
        assert!(result.is_err());
    }
}
