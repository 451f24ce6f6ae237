//! Time-of-day buckets based on the local clock.

use chrono::{NaiveDateTime, Timelike};

/// Start hour of each bucket.
const MORNING_START: u32 = 6;
const NOON_START: u32 = 11;
const AFTERNOON_START: u32 = 14;
const EVENING_START: u32 = 18;
const NIGHT_START: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    /// [0, 6)
    Sleep,
    Morning,
    Noon,
    Afternoon,
    Evening,
    /// [22, 24)
    Night,
}

impl TimePeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            h if h < MORNING_START => TimePeriod::Sleep,
            h if h < NOON_START => TimePeriod::Morning,
            h if h < AFTERNOON_START => TimePeriod::Noon,
            h if h < EVENING_START => TimePeriod::Afternoon,
            h if h < NIGHT_START => TimePeriod::Evening,
            _ => TimePeriod::Night,
        }
    }

    pub fn at(time: NaiveDateTime) -> Self {
        Self::from_hour(time.hour())
    }

    pub fn label(self) -> &'static str {
        match self {
            TimePeriod::Sleep => "sleep",
            TimePeriod::Morning => "morning",
            TimePeriod::Noon => "noon",
            TimePeriod::Afternoon => "afternoon",
            TimePeriod::Evening => "evening",
            TimePeriod::Night => "night",
        }
    }

    pub fn is_sleep(self) -> bool {
        self == TimePeriod::Sleep
    }
}
