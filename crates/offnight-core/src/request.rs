// Window requests: turn a user's choice of window into a season-clamped range.

use crate::calendar::{
    clamp_custom_range_to_season, clamp_to_season_window, DateRange, Ymd,
};
use crate::fantasy_week::FantasyWeeks;

/// Upper bound on the number of weeks a rolling window may span.
pub const MAX_WINDOW_WEEKS: u32 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    /// `weeks` Monday-aligned weeks starting at (or after) `start`.
    Weeks { start: Ymd, weeks: u32 },
    /// Arbitrary inclusive range, no Monday alignment.
    Custom { start: Ymd, end: Ymd },
    /// A numbered fantasy week (Mon..Sun).
    FantasyWeek(u32),
}

impl WindowRequest {
    /// Resolve against the season bounds. `weeks` is clamped to
    /// `1..=MAX_WINDOW_WEEKS`. `Weeks` and `FantasyWeek` always land inside
    /// the season; `Custom` only raises the start to the season start.
    pub fn resolve(&self, season: &DateRange, fantasy_weeks: &FantasyWeeks) -> DateRange {
        match *self {
            WindowRequest::Weeks { start, weeks } => clamp_to_season_window(
                start,
                weeks.clamp(1, MAX_WINDOW_WEEKS),
                season.start(),
                season.end(),
            ),
            WindowRequest::Custom { start, end } => {
                clamp_custom_range_to_season(start, end, season.start(), season.end())
            }
            WindowRequest::FantasyWeek(week) => {
                let week_range = fantasy_weeks.week_range(week);
                // Weeks after the season collapse onto its last day.
                if week_range.start() > season.end() {
                    return DateRange::single_day(season.end());
                }
                clamp_custom_range_to_season(
                    week_range.start(),
                    week_range.end(),
                    season.start(),
                    season.end(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(raw: u32) -> Ymd {
        Ymd::from_raw(raw)
    }

    fn season() -> DateRange {
        DateRange::new(ymd(20251007), ymd(20260416)).unwrap()
    }

    #[test]
    fn weeks_request_is_monday_aligned() {
        let req = WindowRequest::Weeks {
            start: ymd(20251015),
            weeks: 4,
        };
        let r = req.resolve(&season(), &FantasyWeeks::default());
        assert_eq!(r.start(), ymd(20251020));
        assert_eq!(r.end(), ymd(20251116));
    }

    #[test]
    fn weeks_request_caps_week_count() {
        let req = WindowRequest::Weeks {
            start: ymd(20251013),
            weeks: 500,
        };
        let r = req.resolve(&season(), &FantasyWeeks::default());
        assert_eq!(r.end(), ymd(20260416));

        let zero = WindowRequest::Weeks {
            start: ymd(20251013),
            weeks: 0,
        };
        assert_eq!(zero.resolve(&season(), &FantasyWeeks::default()).len_days(), 7);
    }

    #[test]
    fn custom_request_is_clipped_not_aligned() {
        let req = WindowRequest::Custom {
            start: ymd(20251001),
            end: ymd(20251010),
        };
        let r = req.resolve(&season(), &FantasyWeeks::default());
        assert_eq!(r.start(), ymd(20251007));
        assert_eq!(r.end(), ymd(20251010));
    }

    #[test]
    fn fantasy_week_is_clipped_to_season() {
        let weeks = FantasyWeeks::default();
        let first = WindowRequest::FantasyWeek(1).resolve(&season(), &weeks);
        assert_eq!(first.start(), ymd(20251007));
        assert_eq!(first.end(), ymd(20251012));

        let second = WindowRequest::FantasyWeek(2).resolve(&season(), &weeks);
        assert_eq!(second.start(), ymd(20251013));
        assert_eq!(second.end(), ymd(20251019));
    }

    #[test]
    fn fantasy_week_past_season_collapses_to_last_day() {
        let weeks = FantasyWeeks::default();
        // Week 45 starts 2026-08-10, well after the 2026-04-16 season end.
        let late = WindowRequest::FantasyWeek(45).resolve(&season(), &weeks);
        assert_eq!(late, DateRange::single_day(ymd(20260416)));

        // Week 28 (Apr 13..Apr 19) straddles the end and is cut at it.
        let last = WindowRequest::FantasyWeek(28).resolve(&season(), &weeks);
        assert_eq!(last.start(), ymd(20260413));
        assert_eq!(last.end(), ymd(20260416));
    }

    #[test]
    fn fantasy_week_before_season_collapses_to_first_day() {
        let late_season = DateRange::new(ymd(20251103), ymd(20260416)).unwrap();
        let early = WindowRequest::FantasyWeek(1).resolve(&late_season, &FantasyWeeks::default());
        assert_eq!(early, DateRange::single_day(ymd(20251103)));
    }
}
