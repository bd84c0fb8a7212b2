// Fixture filters applied before aggregation.

use crate::calendar::{WeekdaySet, Ymd};
use crate::schedule::Fixture;

/// Which fixtures count toward a team's window totals, and how many a team
/// needs to be listed at all.
///
/// `off_nights_only` and `days_of_week` are applied independently, so setting
/// both keeps only the days present in both sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSet {
    pub include_home: bool,
    pub include_away: bool,
    pub off_nights_only: bool,
    /// Empty means any day.
    pub days_of_week: WeekdaySet,
    pub min_games: u32,
}

impl Default for FilterSet {
    fn default() -> Self {
        FilterSet {
            include_home: true,
            include_away: true,
            off_nights_only: false,
            days_of_week: WeekdaySet::EMPTY,
            min_games: 0,
        }
    }
}

impl FilterSet {
    /// Whether a fixture survives the venue and weekday filters.
    /// The window bounds and `min_games` are checked elsewhere.
    pub fn admits(&self, fixture: &Fixture) -> bool {
        if fixture.is_home && !self.include_home {
            return false;
        }
        if !fixture.is_home && !self.include_away {
            return false;
        }
        self.admits_day(fixture.ymd)
    }

    fn admits_day(&self, ymd: Ymd) -> bool {
        let weekday = ymd.weekday();
        if self.off_nights_only && !WeekdaySet::OFF_NIGHTS.contains(weekday) {
            return false;
        }
        self.days_of_week.is_empty() || self.days_of_week.contains(weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Weekday;

    // 2025-10-06 is a Monday.
    fn fixture(offset: i64, is_home: bool) -> Fixture {
        Fixture::new(Ymd::from_raw(20251006).add_days(offset), is_home, "OPP")
    }

    #[test]
    fn default_admits_everything() {
        let filters = FilterSet::default();
        for offset in 0..7 {
            assert!(filters.admits(&fixture(offset, true)));
            assert!(filters.admits(&fixture(offset, false)));
        }
    }

    #[test]
    fn venue_filters_drop_the_excluded_side() {
        let home_only = FilterSet {
            include_away: false,
            ..FilterSet::default()
        };
        assert!(home_only.admits(&fixture(0, true)));
        assert!(!home_only.admits(&fixture(0, false)));

        let neither = FilterSet {
            include_home: false,
            include_away: false,
            ..FilterSet::default()
        };
        assert!(!neither.admits(&fixture(0, true)));
        assert!(!neither.admits(&fixture(0, false)));
    }

    #[test]
    fn off_nights_only_drops_heavy_nights() {
        let filters = FilterSet {
            off_nights_only: true,
            ..FilterSet::default()
        };
        let admitted: Vec<Weekday> = (0..7)
            .map(|o| fixture(o, true))
            .filter(|f| filters.admits(f))
            .map(|f| f.ymd.weekday())
            .collect();
        assert_eq!(
            admitted,
            vec![
                Weekday::Monday,
                Weekday::Wednesday,
                Weekday::Friday,
                Weekday::Sunday
            ]
        );
    }

    #[test]
    fn days_of_week_keeps_listed_days() {
        let filters = FilterSet {
            days_of_week: [Weekday::Tuesday, Weekday::Saturday].into_iter().collect(),
            ..FilterSet::default()
        };
        assert!(!filters.admits(&fixture(0, true)));
        assert!(filters.admits(&fixture(1, true)));
        assert!(filters.admits(&fixture(5, false)));
    }

    #[test]
    fn combined_day_filters_intersect() {
        let filters = FilterSet {
            off_nights_only: true,
            days_of_week: [Weekday::Monday, Weekday::Tuesday].into_iter().collect(),
            ..FilterSet::default()
        };
        assert!(filters.admits(&fixture(0, true)));
        assert!(!filters.admits(&fixture(1, true)));
        assert!(!filters.admits(&fixture(2, true)));
    }
}
