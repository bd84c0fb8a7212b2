// Civil-calendar arithmetic over integer-encoded dates.
//
// A date is the integer `YYYY*10000 + MM*100 + DD`. Every operation converts
// through a day count relative to 1970-01-01 (Hinnant's days_from_civil and
// civil_from_days), so results never depend on the local time zone.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    Malformed { input: String },

    #[error("invalid date {input:?}: month must be 1-12 and day 1-31")]
    OutOfRange { input: String },

    #[error("unknown weekday {input:?}")]
    UnknownWeekday { input: String },
}

// ---------------------------------------------------------------------------
// Weekdays
// ---------------------------------------------------------------------------

/// Day of the week, indexed 0 (Sunday) through 6 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

/// Whether a night is one of the lighter league nights or a crowded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NightKind {
    Off,
    Heavy,
}

impl Weekday {
    /// All weekdays in index order (Sunday first).
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn abbr(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sun",
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
        }
    }

    /// Parse a weekday from its three-letter abbreviation or full English
    /// name, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, CalendarError> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| {
                let abbr = d.abbr().to_lowercase();
                lower == abbr || lower == format!("{:?}", d).to_lowercase()
            })
            .ok_or_else(|| CalendarError::UnknownWeekday {
                input: s.to_string(),
            })
    }

    pub fn night_kind(self) -> NightKind {
        if WeekdaySet::OFF_NIGHTS.contains(self) {
            NightKind::Off
        } else {
            NightKind::Heavy
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

impl FromStr for Weekday {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::parse(s)
    }
}

/// A set of weekdays stored as a 7-bit mask (bit `i` = weekday index `i`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// Sunday, Monday, Wednesday, Friday.
    pub const OFF_NIGHTS: WeekdaySet = WeekdaySet(0b0010_1011);

    /// Tuesday, Thursday, Saturday.
    pub const HEAVY_NIGHTS: WeekdaySet = WeekdaySet(0b0101_0100);

    pub const ALL: WeekdaySet = WeekdaySet(0b0111_1111);

    pub const fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day as u8) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.index();
    }

    pub const fn with(self, day: Weekday) -> Self {
        WeekdaySet(self.0 | (1 << day as u8))
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn intersection(self, other: WeekdaySet) -> Self {
        WeekdaySet(self.0 & other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Weekday::abbr).collect();
        f.write_str(&names.join(","))
    }
}

// ---------------------------------------------------------------------------
// Ymd: integer-encoded date
// ---------------------------------------------------------------------------

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A civil date encoded as `YYYYMMDD` (e.g. `20251006`).
///
/// Ordering, equality and hashing are plain integer operations. Values built
/// with [`Ymd::from_raw`] or [`Ymd::from_ymd`] are trusted to name a real
/// calendar date; [`Ymd::parse_iso`] and [`Ymd::has_valid_fields`] are the
/// only checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ymd(u32);

impl Ymd {
    pub const fn from_raw(raw: u32) -> Self {
        Ymd(raw)
    }

    pub const fn from_ymd(year: u32, month: u32, day: u32) -> Self {
        Ymd(year * 10_000 + month * 100 + day)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn year(self) -> u32 {
        self.0 / 10_000
    }

    pub const fn month(self) -> u32 {
        (self.0 % 10_000) / 100
    }

    pub const fn day(self) -> u32 {
        self.0 % 100
    }

    /// Parse a `YYYY-MM-DD` string. Surrounding whitespace is ignored.
    pub fn parse_iso(s: &str) -> Result<Self, CalendarError> {
        let malformed = || CalendarError::Malformed {
            input: s.to_string(),
        };

        let mut parts = s.trim().split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        if y.len() != 4 || m.is_empty() || m.len() > 2 || d.is_empty() || d.len() > 2 {
            return Err(malformed());
        }

        let parse = |p: &str| p.parse::<u32>().map_err(|_| malformed());
        let ymd = Ymd::from_ymd(parse(y)?, parse(m)?, parse(d)?);

        if !ymd.has_valid_fields() {
            return Err(CalendarError::OutOfRange {
                input: s.to_string(),
            });
        }

        Ok(ymd)
    }

    /// Month in `1..=12` and day in `1..=31`. Day-of-month limits per month
    /// are not checked.
    pub const fn has_valid_fields(self) -> bool {
        let (month, day) = (self.month(), self.day());
        month >= 1 && month <= 12 && day >= 1 && day <= 31
    }

    /// Today's date on the UTC civil calendar.
    pub fn today_utc() -> Self {
        Ymd::from(chrono::Utc::now().date_naive())
    }

    /// Days since 1970-01-01 (negative before it).
    fn to_days(self) -> i64 {
        days_from_civil(
            i64::from(self.year()),
            i64::from(self.month()),
            i64::from(self.day()),
        )
    }

    fn from_days(days: i64) -> Self {
        let (y, m, d) = civil_from_days(days);
        Ymd::from_ymd(y.max(0) as u32, m as u32, d as u32)
    }

    pub fn weekday(self) -> Weekday {
        // 1970-01-01 was a Thursday.
        let index = (self.to_days() + 4).rem_euclid(7);
        Weekday::ALL[index as usize]
    }

    pub fn night_kind(self) -> NightKind {
        self.weekday().night_kind()
    }

    /// Add `n` calendar days (`n` may be negative).
    pub fn add_days(self, n: i64) -> Self {
        Ymd::from_days(self.to_days() + n)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Ymd) -> i64 {
        other.to_days() - self.to_days()
    }

    /// `self` if it is a Monday, otherwise the next Monday.
    pub fn next_monday_on_or_after(self) -> Self {
        let wd = i64::from(self.weekday().index());
        self.add_days((8 - wd) % 7)
    }

    /// Short display label such as `Oct 6`.
    pub fn short_label(self) -> String {
        let month = MONTH_ABBR
            .get((self.month() as usize).wrapping_sub(1))
            .copied()
            .unwrap_or("???");
        format!("{} {}", month, self.day())
    }
}

impl fmt::Display for Ymd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for Ymd {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ymd::parse_iso(s)
    }
}

impl From<chrono::NaiveDate> for Ymd {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Ymd::from_ymd(date.year().max(0) as u32, date.month(), date.day())
    }
}

/// The Monday strictly after `today`. A Monday maps to the following Monday.
pub fn next_week_monday_from(today: Ymd) -> Ymd {
    let wd = i64::from(today.weekday().index());
    let diff = match (8 - wd) % 7 {
        0 => 7,
        d => d,
    };
    today.add_days(diff)
}

fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

/// An inclusive date window. `start <= end` holds for every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    start_ymd: Ymd,
    end_ymd: Ymd,
}

impl DateRange {
    /// Returns `None` when `start` falls after `end`.
    pub fn new(start: Ymd, end: Ymd) -> Option<Self> {
        (start <= end).then_some(DateRange {
            start_ymd: start,
            end_ymd: end,
        })
    }

    pub fn single_day(day: Ymd) -> Self {
        DateRange {
            start_ymd: day,
            end_ymd: day,
        }
    }

    pub fn start(&self) -> Ymd {
        self.start_ymd
    }

    pub fn end(&self) -> Ymd {
        self.end_ymd
    }

    pub fn contains(&self, ymd: Ymd) -> bool {
        self.start_ymd <= ymd && ymd <= self.end_ymd
    }

    /// Number of calendar days covered, counting both ends.
    pub fn len_days(&self) -> u32 {
        (self.start_ymd.days_until(self.end_ymd) + 1) as u32
    }

    /// Every date in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = Ymd> {
        let start = self.start_ymd;
        (0..i64::from(self.len_days())).map(move |n| start.add_days(n))
    }

    /// Consecutive 7-day bins starting at `start`; the last bin is cut short
    /// at `end` when the range is not a whole number of weeks.
    pub fn week_bins(&self) -> Vec<DateRange> {
        let mut bins = Vec::with_capacity(self.len_days().div_ceil(7) as usize);
        let mut cur = self.start_ymd;
        while cur <= self.end_ymd {
            let end = cur.add_days(6).min(self.end_ymd);
            bins.push(DateRange {
                start_ymd: cur,
                end_ymd: end,
            });
            cur = end.add_days(1);
        }
        bins
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_ymd, self.end_ymd)
    }
}

// ---------------------------------------------------------------------------
// Season clamping
// ---------------------------------------------------------------------------

/// Build a Monday-aligned window of `week_count` weeks inside the season.
///
/// 1. Snap `desired_start` forward to a Monday.
/// 2. Before the season: re-snap from `season_start`.
/// 3. Past the season: collapse to the single day `season_end`.
/// 4. End is `start + week_count*7 - 1`, clipped to `season_end`.
///
/// A `week_count` of 0 counts as one week, and the end never precedes the
/// start, so the result is always a valid range.
pub fn clamp_to_season_window(
    desired_start: Ymd,
    week_count: u32,
    season_start: Ymd,
    season_end: Ymd,
) -> DateRange {
    let mut start = desired_start.next_monday_on_or_after();
    if start < season_start {
        start = season_start.next_monday_on_or_after();
    }
    if start > season_end {
        start = season_end;
    }

    let weeks = i64::from(week_count.max(1));
    let end = start.add_days(weeks * 7 - 1).min(season_end).max(start);

    DateRange {
        start_ymd: start,
        end_ymd: end,
    }
}

/// Clip an arbitrary user-chosen range into the season. If nothing is left,
/// the result is the single day at the clipped start.
pub fn clamp_custom_range_to_season(
    raw_start: Ymd,
    raw_end: Ymd,
    season_start: Ymd,
    season_end: Ymd,
) -> DateRange {
    let start = raw_start.max(season_start);
    let end = raw_end.min(season_end).max(start);
    DateRange {
        start_ymd: start,
        end_ymd: end,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
