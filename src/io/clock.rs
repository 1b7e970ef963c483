use chrono::{DateTime, Local};

/// Timestamp layout used inside task files, e.g. `20250314_0915`
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Source of wall-clock time for ids and edit stamps
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// `YYYYMMDD_HHMM` in local time
pub fn format_stamp(t: &DateTime<Local>) -> String {
    t.format(STAMP_FORMAT).to_string()
}

/// Task id for a creation instant: Unix seconds as a decimal string
pub fn id_for(t: &DateTime<Local>) -> String {
    t.timestamp().to_string()
}
