//! Collaborators the deck talks to but does not implement.
//!
//! All of them are `Send + Sync` so a session can hand them to the tasks
//! that fire after a delay.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::quota::seconds_until_midnight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// User-visible feedback: toasts, popups, banners
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Sink that only writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!(?severity, "{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Cast search page, offered once the deck runs out
    Search,
    Named(String),
}

impl Route {
    pub fn as_str(&self) -> &str {
        match self {
            Route::Search => "search",
            Route::Named(name) => name,
        }
    }
}

/// Page router owned by the host application
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// One look at the local wall clock.
///
/// Taken while the zone rules are still at hand, so the midnight math
/// sees the offset that applies at midnight rather than the one in
/// effect now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Local calendar date
    pub date: NaiveDate,
    /// Seconds until the next local midnight, at least 1
    pub until_midnight: u64,
}

impl ClockReading {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self {
            date: now.date_naive(),
            until_midnight: seconds_until_midnight(now),
        }
    }
}

/// Wall clock in the guest's local time
pub trait Clock: Send + Sync {
    fn reading(&self) -> ClockReading;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn reading(&self) -> ClockReading {
        ClockReading::at(&Local::now())
    }
}
