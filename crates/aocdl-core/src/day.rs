//! Puzzle day numbers (1..=25).

use chrono::Datelike;
use std::fmt;

use crate::error::AocError;

/// Validated day-of-month of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(u8);

impl Day {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = 25;

    pub fn new(day: u32) -> Result<Self, AocError> {
        if (u32::from(Self::FIRST)..=u32::from(Self::LAST)).contains(&day) {
            Ok(Day(day as u8))
        } else {
            Err(AocError::DayOutOfRange(day))
        }
    }

    /// Today's day-of-month in local time. Fails after the 25th.
    pub fn today() -> Result<Self, AocError> {
        Self::new(current_day_of_month())
    }

    /// `explicit` if given, otherwise today.
    pub fn or_today(explicit: Option<u8>) -> Result<Self, AocError> {
        Self::or_default(explicit, current_day_of_month())
    }

    /// `explicit` if given, otherwise `today` (a day-of-month).
    pub fn or_default(explicit: Option<u8>, today: u32) -> Result<Self, AocError> {
        match explicit {
            Some(d) => Self::new(u32::from(d)),
            None => Self::new(today),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Output file name for this day: `day_<n>.txt`.
    pub fn file_name(self) -> String {
        format!("day_{}.txt", self.0)
    }
}

/// Local day-of-month, 1..=31.
pub fn current_day_of_month() -> u32 {
    chrono::Local::now().day()
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
