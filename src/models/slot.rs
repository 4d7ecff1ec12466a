//! Weekly slot grid.
//!
//! A week is seven days, each split into half-hour slots starting at
//! 08:00 and ending with the 21:30 slot (28 per day, 196 per week).
//! A slot is identified by its canonical key `"{day}-{HH:MM}"`,
//! e.g. `"mon-09:00"`.
//!
//! # Ordering
//! [`SlotKey`] orders chronologically (Monday 08:00 first), which is the
//! same order as [`SlotKey::minutes_since_week_start`]. Lexical order of
//! the key strings is different (`"fri-…"` sorts before `"mon-…"`) and is
//! only used when explicitly requested by the assigner configuration.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// First bookable hour of the day.
pub const DAY_START_HOUR: u32 = 8;
/// Hour at which the last slot ends.
pub const DAY_END_HOUR: u32 = 22;
/// Slot length in minutes.
pub const SLOT_MINUTES: u32 = 30;
/// Bookable slots per day.
pub const SLOTS_PER_DAY: usize = ((DAY_END_HOUR - DAY_START_HOUR) * 60 / SLOT_MINUTES) as usize;
/// Bookable slots per week.
pub const SLOTS_PER_WEEK: usize = SLOTS_PER_DAY * 7;
/// Minutes in one day; also the distance at which slots count as "a day apart".
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// All days in week order.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Zero-based position in the week (Monday = 0).
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Three-letter lowercase code used in slot keys.
    pub fn code(self) -> &'static str {
        match self {
            Day::Mon => "mon",
            Day::Tue => "tue",
            Day::Wed => "wed",
            Day::Thu => "thu",
            Day::Fri => "fri",
            Day::Sat => "sat",
            Day::Sun => "sun",
        }
    }

    /// Capitalized display name.
    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    /// Parses a slot-key day code.
    pub fn from_code(code: &str) -> Option<Self> {
        Day::ALL.into_iter().find(|d| d.code() == code)
    }

    /// The matching calendar weekday.
    pub fn weekday(self) -> Weekday {
        match self {
            Day::Mon => Weekday::Mon,
            Day::Tue => Weekday::Tue,
            Day::Wed => Weekday::Wed,
            Day::Thu => Weekday::Thu,
            Day::Fri => Weekday::Fri,
            Day::Sat => Weekday::Sat,
            Day::Sun => Weekday::Sun,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A bookable half-hour unit: day plus start time on the grid.
///
/// Always valid by construction; use [`SlotKey::new`] or parse a
/// `"{day}-{HH:MM}"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotKey {
    day: Day,
    minute_of_day: u16,
}

impl SlotKey {
    /// Creates a slot key, checking that the time lies on the grid.
    pub fn new(day: Day, hour: u32, minute: u32) -> Result<Self, ScheduleError> {
        if !(DAY_START_HOUR..DAY_END_HOUR).contains(&hour)
            || minute >= 60
            || minute % SLOT_MINUTES != 0
        {
            return Err(ScheduleError::InvalidSlotKey(format!(
                "{}-{:02}:{:02}",
                day.code(),
                hour,
                minute
            )));
        }
        Ok(Self {
            day,
            minute_of_day: (hour * 60 + minute) as u16,
        })
    }

    /// Every slot of the week in chronological order.
    pub fn all() -> impl Iterator<Item = SlotKey> {
        Day::ALL.into_iter().flat_map(|day| {
            (0..SLOTS_PER_DAY as u32).map(move |i| SlotKey {
                day,
                minute_of_day: (DAY_START_HOUR * 60 + i * SLOT_MINUTES) as u16,
            })
        })
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.minute_of_day) / 60
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minute_of_day) % 60
    }

    /// Start time as `"HH:MM"`.
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// `dayIndex * 1440 + hour * 60 + minute`.
    #[inline]
    pub fn minutes_since_week_start(&self) -> u32 {
        self.day.index() * MINUTES_PER_DAY + u32::from(self.minute_of_day)
    }

    /// Absolute distance between two slot starts, in minutes.
    #[inline]
    pub fn distance_minutes(&self, other: &SlotKey) -> u32 {
        self.minutes_since_week_start()
            .abs_diff(other.minutes_since_week_start())
    }

    /// Human label for notifications, e.g. `"Mon 9:00 AM"`.
    pub fn label(&self) -> String {
        let hour = self.hour();
        let meridiem = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        format!(
            "{} {}:{:02} {}",
            self.day.label(),
            display_hour,
            self.minute(),
            meridiem
        )
    }

    /// Maps this slot onto a calendar date-time within a season week.
    ///
    /// Week `w` starts `7 * (w - 1)` days after `season_start`; the slot
    /// falls on the first date on or after that which has the slot's
    /// weekday. Returns `None` for week 0 or on date overflow.
    pub fn resolve(&self, season_start: NaiveDate, week: u32) -> Option<NaiveDateTime> {
        let weeks_in = week.checked_sub(1)?;
        let week_start = season_start.checked_add_days(Days::new(u64::from(weeks_in) * 7))?;
        let target = self.day.weekday().num_days_from_monday();
        let current = week_start.weekday().num_days_from_monday();
        let offset = (target + 7 - current) % 7;
        week_start
            .checked_add_days(Days::new(u64::from(offset)))?
            .and_hms_opt(self.hour(), self.minute(), 0)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}:{:02}", self.day.code(), self.hour(), self.minute())
    }
}

impl FromStr for SlotKey {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidSlotKey(s.to_string());

        let (day, time) = s.split_once('-').ok_or_else(invalid)?;
        let day = Day::from_code(day).ok_or_else(invalid)?;
        let (hh, mm) = time.split_once(':').ok_or_else(invalid)?;
        if !is_two_digits(hh) || !is_two_digits(mm) {
            return Err(invalid());
        }
        let hour: u32 = hh.parse().map_err(|_| invalid())?;
        let minute: u32 = mm.parse().map_err(|_| invalid())?;

        SlotKey::new(day, hour, minute).map_err(|_| invalid())
    }
}

fn is_two_digits(part: &str) -> bool {
    part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit())
}

impl TryFrom<String> for SlotKey {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotKey> for String {
    fn from(slot: SlotKey) -> Self {
        slot.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> SlotKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(SLOTS_PER_DAY, 28);
        assert_eq!(SLOTS_PER_WEEK, 196);
        assert_eq!(SlotKey::all().count(), SLOTS_PER_WEEK);
    }

    #[test]
    fn test_all_is_chronological() {
        let all: Vec<SlotKey> = SlotKey::all().collect();
        assert_eq!(all.first().unwrap().to_string(), "mon-08:00");
        assert_eq!(all.last().unwrap().to_string(), "sun-21:30");
        assert!(all
            .windows(2)
            .all(|w| w[0].minutes_since_week_start() < w[1].minutes_since_week_start()));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_and_display() {
        let s = slot("tue-10:30");
        assert_eq!(s.day(), Day::Tue);
        assert_eq!(s.hour(), 10);
        assert_eq!(s.minute(), 30);
        assert_eq!(s.time_label(), "10:30");
        assert_eq!(s.to_string(), "tue-10:30");
    }

    #[test]
    fn test_parse_rejects_off_grid() {
        for bad in [
            "mon-07:30",
            "mon-22:00",
            "mon-09:15",
            "xyz-09:00",
            "mon09:00",
            "mon-9:00",
            "mon-09:0a",
            "mon-+9:00",
            "mon-0+:00",
            "mon-09:+0",
            "",
        ] {
            assert!(
                matches!(bad.parse::<SlotKey>(), Err(ScheduleError::InvalidSlotKey(_))),
                "{bad} should be rejected"
            );
        }
        assert!("sun-21:30".parse::<SlotKey>().is_ok());
        assert!("mon-08:00".parse::<SlotKey>().is_ok());
    }

    #[test]
    fn test_minutes_since_week_start() {
        assert_eq!(slot("mon-08:00").minutes_since_week_start(), 480);
        assert_eq!(slot("tue-10:00").minutes_since_week_start(), 1440 + 600);
        assert_eq!(slot("mon-09:00").distance_minutes(&slot("tue-09:00")), 1440);
        assert_eq!(slot("tue-09:00").distance_minutes(&slot("mon-09:00")), 1440);
    }

    #[test]
    fn test_label() {
        assert_eq!(slot("mon-09:00").label(), "Mon 9:00 AM");
        assert_eq!(slot("fri-12:30").label(), "Fri 12:30 PM");
        assert_eq!(slot("sun-21:30").label(), "Sun 9:30 PM");
    }

    #[test]
    fn test_resolve_to_calendar_date() {
        // 2025-01-01 is a Wednesday.
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        let wed = slot("wed-18:00").resolve(start, 1).unwrap();
        assert_eq!(wed, start.and_hms_opt(18, 0, 0).unwrap());

        let mon = slot("mon-09:30").resolve(start, 1).unwrap();
        assert_eq!(mon.date(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert_eq!(mon.time().to_string(), "09:30:00");

        let week3 = slot("thu-08:00").resolve(start, 3).unwrap();
        assert_eq!(week3.date(), NaiveDate::from_ymd_opt(2025, 1, 16).unwrap());

        assert!(slot("thu-08:00").resolve(start, 0).is_none());
    }

    #[test]
    fn test_serde_as_string() {
        let s = slot("sat-14:00");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"sat-14:00\"");
        let back: SlotKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(serde_json::from_str::<SlotKey>("\"sat-14:10\"").is_err());
    }
}
