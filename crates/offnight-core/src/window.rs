// Window aggregation: per-team schedule density over a date window.
//
// Each team is summarized on its own (in parallel), then the rows are ranked
// with a single global sort.

use std::cmp::Ordering;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{DateRange, NightKind, Ymd};
use crate::filters::FilterSet;
use crate::schedule::{Fixture, TeamId, TeamSchedule};

// ---------------------------------------------------------------------------
// Output row
// ---------------------------------------------------------------------------

/// One team's totals for the selected window and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamWindowSummary {
    #[serde(rename = "team")]
    pub team_id: TeamId,
    pub games_total: u32,
    /// Sun/Mon/Wed/Fri games.
    pub off_night_games: u32,
    /// Tue/Thu/Sat games.
    pub heavy_night_games: u32,
    #[serde(rename = "b2bCount")]
    pub back_to_back_count: u32,
    #[serde(rename = "home")]
    pub home_games: u32,
    #[serde(rename = "away")]
    pub away_games: u32,
    /// Game counts per bin of `DateRange::week_bins`, aligned to the window
    /// start and identical in length for every team.
    pub per_week: Vec<u32>,
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Summarize every team over `range` and return the rows ranked by
/// [`rank_order`]. Teams with fewer than `filters.min_games` surviving
/// fixtures are left out.
pub fn summarize_all(
    schedules: &[TeamSchedule],
    range: &DateRange,
    filters: &FilterSet,
) -> Vec<TeamWindowSummary> {
    let bins = range.week_bins();

    let mut rows: Vec<TeamWindowSummary> = schedules
        .par_iter()
        .filter_map(|schedule| summarize_with_bins(schedule, range, &bins, filters))
        .collect();

    rows.sort_by(rank_order);

    debug!(
        "summarized {} of {} teams over {} ({} week bins)",
        rows.len(),
        schedules.len(),
        range,
        bins.len()
    );

    rows
}

/// Summarize a single team, or `None` when it falls short of `min_games`.
pub fn summarize_team(
    schedule: &TeamSchedule,
    range: &DateRange,
    filters: &FilterSet,
) -> Option<TeamWindowSummary> {
    summarize_with_bins(schedule, range, &range.week_bins(), filters)
}

fn summarize_with_bins(
    schedule: &TeamSchedule,
    range: &DateRange,
    bins: &[DateRange],
    filters: &FilterSet,
) -> Option<TeamWindowSummary> {
    let games: Vec<&Fixture> = schedule
        .fixtures_in(range)
        .iter()
        .filter(|f| filters.admits(f))
        .collect();

    let games_total = games.len() as u32;
    if games_total < filters.min_games {
        return None;
    }

    let mut off_night_games = 0;
    let mut heavy_night_games = 0;
    let mut home_games = 0;
    for game in &games {
        match game.ymd.night_kind() {
            NightKind::Off => off_night_games += 1,
            NightKind::Heavy => heavy_night_games += 1,
        }
        if game.is_home {
            home_games += 1;
        }
    }

    // Fixtures are date-sorted, so a dedup leaves distinct ascending dates.
    let mut dates: Vec<Ymd> = games.iter().map(|g| g.ymd).collect();
    dates.dedup();

    let per_week = bins
        .iter()
        .map(|bin| games.iter().filter(|g| bin.contains(g.ymd)).count() as u32)
        .collect();

    Some(TeamWindowSummary {
        team_id: schedule.team_id().to_string(),
        games_total,
        off_night_games,
        heavy_night_games,
        back_to_back_count: count_back_to_backs(&dates),
        home_games,
        away_games: games_total - home_games,
        per_week,
    })
}

/// Count adjacent pairs exactly one day apart in a sorted, duplicate-free
/// list of dates.
pub fn count_back_to_backs(sorted_unique_dates: &[Ymd]) -> u32 {
    sorted_unique_dates
        .windows(2)
        .filter(|pair| pair[0].add_days(1) == pair[1])
        .count() as u32
}

/// Ranking: more games first, then more off-night games, then fewer
/// back-to-backs, then team id.
pub fn rank_order(a: &TeamWindowSummary, b: &TeamWindowSummary) -> Ordering {
    b.games_total
        .cmp(&a.games_total)
        .then_with(|| b.off_night_games.cmp(&a.off_night_games))
        .then_with(|| a.back_to_back_count.cmp(&b.back_to_back_count))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
