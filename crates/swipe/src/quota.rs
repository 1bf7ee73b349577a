//! Daily swipe quota and the countdown to local midnight.

use chrono::{DateTime, TimeZone, Timelike};
use serde::Serialize;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Swipes left today plus seconds until the quota refills.
///
/// `remaining` stays within `[0, limit]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyQuota {
    remaining: u32,
    limit: u32,
    countdown_secs: u64,
}

impl DailyQuota {
    pub fn new(limit: u32, countdown_secs: u64) -> Self {
        Self {
            remaining: limit,
            limit,
            countdown_secs: countdown_secs.max(1),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn countdown_secs(&self) -> u64 {
        self.countdown_secs
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining == 0
    }

    /// Use one swipe. Returns true if this was the last one.
    pub fn consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Advance the countdown by one second.
    ///
    /// When it runs out the quota refills and `next_countdown` supplies
    /// the seconds until the following midnight. Returns true on refill.
    pub fn tick(&mut self, next_countdown: impl FnOnce() -> u64) -> bool {
        self.countdown_secs = self.countdown_secs.saturating_sub(1);
        if self.countdown_secs > 0 {
            return false;
        }
        self.remaining = self.limit;
        self.countdown_secs = next_countdown().max(1);
        true
    }

    /// Take the countdown from a fresh clock reading instead of counting
    /// ticks, so missed ticks and host suspends do not drift it.
    ///
    /// `day_changed` means local midnight passed since the last reading;
    /// the quota refills. Returns true on refill.
    pub fn resync(&mut self, until_midnight: u64, day_changed: bool) -> bool {
        self.countdown_secs = until_midnight.max(1);
        if day_changed {
            self.remaining = self.limit;
        }
        day_changed
    }
}

/// Whole seconds from `now` until the next local midnight, at least 1.
pub fn seconds_until_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> u64 {
    let timezone = now.timezone();
    let next_midnight = now
        .date_naive()
        .succ_opt()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|naive| timezone.from_local_datetime(&naive).earliest());

    let seconds = match next_midnight {
        Some(midnight) => (midnight - now.clone()).num_seconds(),
        // midnight skipped by a DST change
        None => SECONDS_PER_DAY - i64::from(now.num_seconds_from_midnight()),
    };
    seconds.max(1) as u64
}

/// `HH:MM` rendering of a countdown, as shown on the timer badge
pub fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{:02}:{:02}", hours, minutes)
}
