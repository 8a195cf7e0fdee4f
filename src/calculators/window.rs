use chrono::{DateTime, Duration, Utc};

/// Default trailing window length
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Trailing window of `days` days ending at an anchor instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingWindow {
    anchor: DateTime<Utc>,
    days: u32,
}

impl ReportingWindow {
    /// Window ending now
    pub fn trailing(days: u32) -> Self {
        Self::ending_at(Utc::now(), days)
    }

    pub fn ending_at(anchor: DateTime<Utc>, days: u32) -> Self {
        Self { anchor, days }
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Exclusive lower bound
    pub fn start(&self) -> DateTime<Utc> {
        self.anchor - Duration::days(i64::from(self.days))
    }

    /// True when `ts` is strictly after the start of the window
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts > self.start()
    }

    /// Like [`contains`](Self::contains), but a missing timestamp never qualifies
    pub fn contains_opt(&self, ts: Option<DateTime<Utc>>) -> bool {
        ts.map(|t| self.contains(t)).unwrap_or(false)
    }
}

impl Default for ReportingWindow {
    fn default() -> Self {
        Self::trailing(DEFAULT_WINDOW_DAYS)
    }
}
