// Team-centric schedule model.
//
// A league calendar arrives either as per-team fixture lists or as a flat list
// of games between two already-canonical team ids. Both end up as
// `TeamSchedule`s whose fixtures are sorted by date.

use crate::calendar::{DateRange, Ymd};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Canonical team identifier, e.g. `"COL"`.
pub type TeamId = String;

/// One game seen from a single team's side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    pub ymd: Ymd,
    #[serde(rename = "home")]
    pub is_home: bool,
    #[serde(rename = "opp")]
    pub opponent: TeamId,
}

impl Fixture {
    pub fn new(ymd: Ymd, is_home: bool, opponent: impl Into<TeamId>) -> Self {
        Fixture {
            ymd,
            is_home,
            opponent: opponent.into(),
        }
    }
}

/// All fixtures of one team for a season, ascending by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSchedule {
    #[serde(rename = "team")]
    team_id: TeamId,
    #[serde(rename = "games")]
    fixtures: Vec<Fixture>,
}

impl TeamSchedule {
    /// Build a schedule, sorting `fixtures` by date. The sort is stable, so
    /// same-day fixtures keep their input order.
    pub fn new(team_id: impl Into<TeamId>, mut fixtures: Vec<Fixture>) -> Self {
        fixtures.sort_by_key(|f| f.ymd);
        TeamSchedule {
            team_id: team_id.into(),
            fixtures,
        }
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Fixtures dated inside `range`. Relies on the date ordering to skip
    /// straight to the window.
    pub fn fixtures_in(&self, range: &DateRange) -> &[Fixture] {
        let lo = self.fixtures.partition_point(|f| f.ymd < range.start());
        let hi = self.fixtures.partition_point(|f| f.ymd <= range.end());
        &self.fixtures[lo..hi.max(lo)]
    }
}

impl<'de> Deserialize<'de> for TeamSchedule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RawTeamBlock {
            team: TeamId,
            #[serde(default)]
            games: Vec<Fixture>,
        }

        let raw = RawTeamBlock::deserialize(deserializer)?;
        Ok(TeamSchedule::new(raw.team, raw.games))
    }
}

/// A single game between two teams, as listed in a league calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueGame {
    pub date: Ymd,
    pub home: TeamId,
    pub away: TeamId,
}

// ---------------------------------------------------------------------------
// Construction from a league calendar
// ---------------------------------------------------------------------------

/// Split league games into per-team schedules.
///
/// Each game is recorded once for the home side and once for the away side.
/// A team that already has a fixture with the same date, venue side and
/// opponent does not get a second copy. Output is sorted by team id.
pub fn build_team_schedules(games: &[LeagueGame]) -> Vec<TeamSchedule> {
    let mut per_team: BTreeMap<&str, BTreeSet<(Ymd, bool, &str)>> = BTreeMap::new();

    for game in games {
        per_team
            .entry(game.home.as_str())
            .or_default()
            .insert((game.date, true, game.away.as_str()));
        per_team
            .entry(game.away.as_str())
            .or_default()
            .insert((game.date, false, game.home.as_str()));
    }

    per_team
        .into_iter()
        .map(|(team, entries)| {
            let fixtures = entries
                .into_iter()
                .map(|(ymd, is_home, opp)| Fixture::new(ymd, is_home, opp))
                .collect();
            TeamSchedule::new(team, fixtures)
        })
        .collect()
}

/// Earliest and latest fixture date across all schedules, or `None` when
/// there are no fixtures at all.
pub fn season_bounds(schedules: &[TeamSchedule]) -> Option<DateRange> {
    let first = schedules
        .iter()
        .filter_map(|s| s.fixtures.first())
        .map(|f| f.ymd)
        .min()?;
    let last = schedules
        .iter()
        .filter_map(|s| s.fixtures.last())
        .map(|f| f.ymd)
        .max()?;
    DateRange::new(first, last)
}

/// Number of fixtures on each date inside `range`, summed over all teams.
/// A game appears once per participating team that lists it.
pub fn league_games_by_date(schedules: &[TeamSchedule], range: &DateRange) -> BTreeMap<Ymd, u32> {
    let mut volume = BTreeMap::new();
    for schedule in schedules {
        for fixture in schedule.fixtures_in(range) {
            *volume.entry(fixture.ymd).or_insert(0) += 1;
        }
    }
    volume
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
