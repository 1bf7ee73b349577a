//! # Swipe Session
//!
//! Drives a `CardStack` in real time:
//! 1. Accept input (buttons, pointer events) and apply it to the stack
//! 2. Hold the accepted card for the exit animation, then advance
//! 3. Announce matches after a short delay, without blocking input
//! 4. Tick the quota countdown once a second
//! 5. Publish a fresh `DeckView` after every change
//!
//! All deferred work runs on tokio tasks owned by the session. Dropping
//! or shutting down the session aborts them, so nothing touches the deck
//! after teardown.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use roster::{CandidateSource, CastId};
use swipe::{
    ActionResult, Advance, AdvanceReport, CardStack, Clock, DeckView, DragFeedback, Navigator,
    NotificationSink, Point, Rejection, Release, Route, RngSampler, Sampler, Severity,
    SwipeConfig, SystemClock, TracingSink, render,
};

const MSG_REWIND: &str = "Moved back to the previous card";
const MSG_BOOST: &str = "Boost is not available yet";
const MSG_NO_MORE: &str = "No more casts for today";

fn quota_message(limit: u32) -> String {
    format!("Today's free likes are used up. You get {} more tomorrow.", limit)
}

fn match_message(name: &str) -> String {
    format!("It's a match! You and {} liked each other.", name)
}

/// State shared with the timer tasks
struct Shared {
    stack: Mutex<CardStack>,
    notifier: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    view_tx: watch::Sender<DeckView>,
}

impl Shared {
    fn publish(&self, stack: &CardStack) {
        self.view_tx.send_replace(render(stack));
    }

    /// Runs when the exit animation is over
    async fn finish_advance(&self) -> Option<AdvanceReport> {
        let mut stack = self.stack.lock().await;
        let report = stack.complete_advance()?;
        self.publish(&stack);

        if report.exhausted {
            info!("Deck exhausted after {} cards", report.cursor);
            self.notifier.notify(MSG_NO_MORE, Severity::Info);
        }
        if report.quota_depleted {
            self.notifier
                .notify(&quota_message(stack.quota().limit()), Severity::Warning);
        }
        Some(report)
    }

    /// Re-read the clock. `day` is the local date seen on the last tick.
    async fn tick(&self, day: &mut NaiveDate) {
        let reading = self.clock.reading();
        let day_changed = reading.date > *day;
        *day = reading.date;

        let mut stack = self.stack.lock().await;
        if stack.resync(reading.until_midnight, day_changed) {
            info!("Daily quota refilled to {}", stack.quota().limit());
        }
        self.publish(&stack);
    }
}

/// Builder for [`SwipeSession`].
///
/// Defaults: notifications go to the log, no navigator, system clock,
/// OS-seeded match sampler.
pub struct SessionBuilder {
    config: SwipeConfig,
    notifier: Arc<dyn NotificationSink>,
    navigator: Option<Arc<dyn Navigator>>,
    clock: Arc<dyn Clock>,
    sampler: Option<Box<dyn Sampler>>,
}

impl SessionBuilder {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            notifier: Arc::new(TracingSink),
            navigator: None,
            clock: Arc::new(SystemClock),
            sampler: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_sampler(mut self, sampler: Box<dyn Sampler>) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// Pull candidates from `source`, build the deck and start the
    /// quota ticker. Must be called inside a tokio runtime.
    pub fn start(self, source: &dyn CandidateSource) -> Result<SwipeSession> {
        let candidates = source
            .candidates()
            .with_context(|| format!("Failed to fetch candidates from {}", source.name()))?;
        info!(
            "Starting swipe session with {} candidates from {}",
            candidates.len(),
            source.name()
        );

        let sampler: Box<dyn Sampler> = match self.sampler {
            Some(sampler) => sampler,
            None => Box::new(RngSampler::from_os_rng()),
        };
        let reading = self.clock.reading();
        let tick_period = self.config.tick_period();

        let stack = CardStack::new(candidates, self.config, sampler, reading.until_midnight)
            .context("Invalid swipe configuration")?;
        let (view_tx, _) = watch::channel(render(&stack));

        let shared = Arc::new(Shared {
            stack: Mutex::new(stack),
            notifier: self.notifier,
            clock: self.clock,
            view_tx,
        });

        let ticker = tokio::spawn({
            let shared = shared.clone();
            let mut day = reading.date;
            async move {
                let mut interval =
                    tokio::time::interval_at(Instant::now() + tick_period, tick_period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    interval.tick().await;
                    shared.tick(&mut day).await;
                }
            }
        });

        Ok(SwipeSession {
            shared,
            navigator: self.navigator,
            ticker: Some(ticker),
            animation: None,
            announcements: Vec::new(),
            closed: false,
        })
    }
}

/// A live deck bound to its timers
pub struct SwipeSession {
    shared: Arc<Shared>,
    navigator: Option<Arc<dyn Navigator>>,
    ticker: Option<JoinHandle<()>>,
    animation: Option<JoinHandle<Option<AdvanceReport>>>,
    announcements: Vec<JoinHandle<()>>,
    closed: bool,
}

impl SwipeSession {
    pub fn builder(config: SwipeConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Current view
    pub fn view(&self) -> DeckView {
        self.shared.view_tx.borrow().clone()
    }

    /// Receive every view the session publishes
    pub fn subscribe(&self) -> watch::Receiver<DeckView> {
        self.shared.view_tx.subscribe()
    }

    /// Read deck state under the lock
    pub async fn inspect<R>(&self, f: impl FnOnce(&CardStack) -> R) -> R {
        let stack = self.shared.stack.lock().await;
        f(&stack)
    }

    pub async fn skip(&mut self) -> ActionResult<Advance> {
        self.ensure_open()?;
        let result = self.shared.stack.lock().await.skip();
        self.after_swipe(result).await
    }

    pub async fn like(&mut self) -> ActionResult<Advance> {
        self.ensure_open()?;
        let result = self.shared.stack.lock().await.like();
        self.after_swipe(result).await
    }

    pub async fn superlike(&mut self) -> ActionResult<Advance> {
        self.ensure_open()?;
        let result = self.shared.stack.lock().await.superlike();
        self.after_swipe(result).await
    }

    pub async fn rewind(&mut self) -> ActionResult<CastId> {
        self.ensure_open()?;
        let id = {
            let mut stack = self.shared.stack.lock().await;
            let id = stack.rewind().map(|candidate| candidate.id)?;
            self.shared.publish(&stack);
            id
        };
        self.shared.notifier.notify(MSG_REWIND, Severity::Info);
        Ok(id)
    }

    pub fn boost(&self) {
        self.shared.notifier.notify(MSG_BOOST, Severity::Info);
    }

    pub async fn pointer_down(&mut self, card: CastId, point: Point) -> ActionResult<()> {
        self.ensure_open()?;
        let result = self.shared.stack.lock().await.pointer_down(card, point);
        if let Err(rejection) = result {
            debug!("Pointer-down on {} ignored: {}", card, rejection);
        }
        result
    }

    pub async fn pointer_move(&mut self, point: Point) -> Option<DragFeedback> {
        if self.closed {
            return None;
        }
        self.shared.stack.lock().await.pointer_move(point)
    }

    pub async fn pointer_up(&mut self) -> ActionResult<Release> {
        self.ensure_open()?;
        let result = self.shared.stack.lock().await.pointer_up();
        match result {
            Ok(Release::Advance(advance)) => self
                .after_swipe(Ok(advance))
                .await
                .map(Release::Advance),
            Ok(Release::Reset) => {
                let stack = self.shared.stack.lock().await;
                self.shared.publish(&stack);
                Ok(Release::Reset)
            }
            Err(rejection) => Err(rejection),
        }
    }

    /// Leave the exhausted view for cast search. Returns false while
    /// there are still cards to swipe, or once the session is closed.
    pub async fn leave_exhausted(&self) -> bool {
        if self.closed || !self.shared.stack.lock().await.is_exhausted() {
            return false;
        }
        match &self.navigator {
            Some(navigator) => navigator.navigate(&Route::Search),
            None => warn!("No navigator set, cannot leave the deck"),
        }
        true
    }

    /// Wait for the in-flight exit animation, if any, and return its report
    pub async fn settle(&mut self) -> Option<AdvanceReport> {
        let animation = self.animation.take()?;
        match animation.await {
            Ok(report) => report,
            Err(e) => {
                warn!("Exit animation task ended early: {}", e);
                None
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Stop every timer and drop any advance still in flight. Every
    /// later action is rejected with [`Rejection::Closed`].
    pub async fn shutdown(&mut self) {
        self.closed = true;
        self.abort_tasks();
        self.shared.stack.lock().await.cancel_advance();
        info!("Swipe session shut down");
    }

    fn ensure_open(&self) -> ActionResult<()> {
        if self.closed {
            return Err(Rejection::Closed);
        }
        Ok(())
    }

    async fn after_swipe(&mut self, result: ActionResult<Advance>) -> ActionResult<Advance> {
        let advance = match result {
            Ok(advance) => advance,
            Err(Rejection::QuotaExhausted) => {
                let stack = self.shared.stack.lock().await;
                self.shared.publish(&stack);
                self.shared
                    .notifier
                    .notify(&quota_message(stack.quota().limit()), Severity::Warning);
                return Err(Rejection::QuotaExhausted);
            }
            Err(rejection) => {
                debug!("Swipe ignored: {}", rejection);
                return Err(rejection);
            }
        };

        info!(
            "Card {} swiped {:?}, exit via {}",
            advance.candidate.id,
            advance.direction,
            advance.exit_transform()
        );
        let (exit_delay, match_delay) = {
            let stack = self.shared.stack.lock().await;
            (stack.config().exit_animation(), stack.config().match_delay())
        };

        self.animation = Some(tokio::spawn({
            let shared = self.shared.clone();
            async move {
                tokio::time::sleep(exit_delay).await;
                shared.finish_advance().await
            }
        }));

        if advance.matched {
            self.announcements.retain(|handle| !handle.is_finished());
            let shared = self.shared.clone();
            let name = advance.candidate.name.clone();
            self.announcements.push(tokio::spawn(async move {
                tokio::time::sleep(match_delay).await;
                info!("Matched with {}", name);
                shared.notifier.notify(&match_message(&name), Severity::Success);
            }));
        }

        Ok(advance)
    }

    fn abort_tasks(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        if let Some(animation) = self.animation.take() {
            animation.abort();
        }
        for handle in self.announcements.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for SwipeSession {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}
