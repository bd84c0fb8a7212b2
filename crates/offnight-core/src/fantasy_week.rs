// Fantasy week numbering: Monday-to-Sunday weeks counted from a fixed first
// Monday of the season (week 1).

use crate::calendar::{DateRange, Ymd};

/// Default first fantasy week start: Monday 2025-10-06.
pub const DEFAULT_FIRST_WEEK_START: Ymd = Ymd::from_ymd(2025, 10, 6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FantasyWeeks {
    first_week_start: Ymd,
}

impl Default for FantasyWeeks {
    fn default() -> Self {
        FantasyWeeks::new(DEFAULT_FIRST_WEEK_START)
    }
}

impl FantasyWeeks {
    pub const fn new(first_week_start: Ymd) -> Self {
        FantasyWeeks { first_week_start }
    }

    pub fn first_week_start(&self) -> Ymd {
        self.first_week_start
    }

    /// 1-based week number containing `ymd`, or 0 for dates before week 1.
    pub fn week_of(&self, ymd: Ymd) -> u32 {
        let diff = self.first_week_start.days_until(ymd);
        if diff < 0 {
            0
        } else {
            (diff / 7) as u32 + 1
        }
    }

    /// Seven-day range of the given week. Weeks below 1 are treated as week 1.
    pub fn week_range(&self, week: u32) -> DateRange {
        let start = self
            .first_week_start
            .add_days(i64::from(week.max(1) - 1) * 7);
        DateRange::new(start, start.add_days(6)).unwrap_or(DateRange::single_day(start))
    }

    /// Label such as `Week 1 (Oct 6 - Oct 12)`.
    pub fn week_label(&self, week: u32) -> String {
        let range = self.week_range(week);
        format!(
            "Week {} ({} - {})",
            week.max(1),
            range.start().short_label(),
            range.end().short_label()
        )
    }
}
