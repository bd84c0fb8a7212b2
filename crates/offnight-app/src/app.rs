// Query execution: resolve the season and the requested window, then rank
// teams over it.

use offnight_core::schedule::league_games_by_date;
use offnight_core::{
    summarize_all, DateRange, FilterSet, TeamSchedule, TeamWindowSummary, WindowRequest,
};
use tracing::{debug, info};

use crate::config::SeasonConfig;

/// One optimizer run: which window to look at and which games count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub request: WindowRequest,
    pub filters: FilterSet,
}

/// Ranked rows for the resolved window.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub range: DateRange,
    pub rows: Vec<TeamWindowSummary>,
}

pub fn execute(schedules: &[TeamSchedule], season: &SeasonConfig, query: &Query) -> Outcome {
    let season_range = season.resolve(schedules);
    let fantasy_weeks = season.fantasy_weeks();
    let range = query.request.resolve(&season_range, &fantasy_weeks);
    info!(
        "Season {}, window {} ({} days) for {:?}",
        season_range,
        range,
        range.len_days(),
        query.request
    );
    let first_week = fantasy_weeks.week_of(range.start());
    if first_week > 0 {
        info!("Window opens in {}", fantasy_weeks.week_label(first_week));
    }
    if let Some((date, count)) = league_games_by_date(schedules, &range)
        .into_iter()
        .max_by_key(|&(date, count)| (count, std::cmp::Reverse(date)))
    {
        debug!("Busiest date in window: {} ({} fixtures)", date, count);
    }

    let rows = summarize_all(schedules, &range, &query.filters);
    info!("{} of {} teams ranked", rows.len(), schedules.len());

    Outcome { range, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offnight_core::{Fixture, Ymd};

    fn ymd(raw: u32) -> Ymd {
        Ymd::from_raw(raw)
    }

    fn schedules() -> Vec<TeamSchedule> {
        vec![
            TeamSchedule::new(
                "COL",
                vec![
                    Fixture::new(ymd(20251007), false, "LAK"),
                    Fixture::new(ymd(20251008), true, "DAL"),
                    Fixture::new(ymd(20251015), true, "LAK"),
                ],
            ),
            TeamSchedule::new(
                "LAK",
                vec![
                    Fixture::new(ymd(20251007), true, "COL"),
                    Fixture::new(ymd(20251015), false, "COL"),
                ],
            ),
        ]
    }

    fn season() -> SeasonConfig {
        SeasonConfig {
            first_week_start: ymd(20251006),
            start: None,
            end: None,
        }
    }

    #[test]
    fn fantasy_week_is_clamped_to_schedule_span() {
        let query = Query {
            request: WindowRequest::FantasyWeek(1),
            filters: FilterSet::default(),
        };
        let outcome = execute(&schedules(), &season(), &query);

        // Week 1 is Oct 6..Oct 12; the schedule opens on Oct 7.
        assert_eq!(outcome.range.start(), ymd(20251007));
        assert_eq!(outcome.range.end(), ymd(20251012));
        let ranked: Vec<(&str, u32)> = outcome
            .rows
            .iter()
            .map(|r| (r.team_id.as_str(), r.games_total))
            .collect();
        assert_eq!(ranked, vec![("COL", 2), ("LAK", 1)]);
    }

    #[test]
    fn rolling_window_covers_whole_weeks() {
        let query = Query {
            request: WindowRequest::Weeks {
                start: ymd(20251006),
                weeks: 2,
            },
            filters: FilterSet::default(),
        };
        let season = SeasonConfig {
            start: Some(ymd(20251006)),
            ..season()
        };
        let outcome = execute(&schedules(), &season, &query);

        // Clamped at the last scheduled day.
        assert_eq!(outcome.range.start(), ymd(20251006));
        assert_eq!(outcome.range.end(), ymd(20251015));
        assert_eq!(outcome.rows[0].team_id, "COL");
        assert_eq!(outcome.rows[0].per_week, vec![2, 1]);
    }
}
