// League schedule loading.
//
// Two on-disk shapes are accepted, chosen by file extension:
// - `.csv`: one row per game with `date,home,away` columns (ISO dates,
//   canonical team ids). Malformed rows are skipped with a warning.
// - `.json`: team-centric blocks, `[{"team": "COL", "games": [{"ymd":
//   20251007, "home": false, "opp": "LAK"}]}]`. Fixtures with an impossible
//   month or day are skipped with a warning.

use offnight_core::schedule::{build_team_schedules, LeagueGame, TeamSchedule};
use offnight_core::Ymd;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ScheduleFileError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("unsupported schedule format for {path}: expected .csv or .json")]
    UnsupportedFormat { path: String },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One CSV game row. Extra columns (time, venue, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawGameRow {
    date: String,
    #[serde(alias = "home_team")]
    home: String,
    #[serde(alias = "away_team")]
    away: String,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_games_from_reader<R: Read>(rdr: R) -> Result<Vec<LeagueGame>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let mut games = Vec::new();
    for result in reader.deserialize::<RawGameRow>() {
        match result {
            Ok(raw) => {
                let date = match Ymd::parse_iso(&raw.date) {
                    Ok(d) => d,
                    Err(e) => {
                        warn!("skipping game {} vs {}: {}", raw.home, raw.away, e);
                        continue;
                    }
                };
                if raw.home.is_empty() || raw.away.is_empty() {
                    warn!("skipping game on {}: missing team id", date);
                    continue;
                }
                if raw.home == raw.away {
                    warn!("skipping game on {}: {} listed against itself", date, raw.home);
                    continue;
                }
                games.push(LeagueGame {
                    date,
                    home: raw.home,
                    away: raw.away,
                });
            }
            Err(e) => {
                warn!("skipping malformed game row: {}", e);
            }
        }
    }
    Ok(games)
}

fn load_team_blocks_from_reader<R: Read>(rdr: R) -> Result<Vec<TeamSchedule>, serde_json::Error> {
    let blocks: Vec<TeamSchedule> = serde_json::from_reader(rdr)?;
    let mut schedules: Vec<TeamSchedule> = blocks
        .into_iter()
        .filter(|s| {
            let keep = !s.team_id().trim().is_empty();
            if !keep {
                warn!("skipping team block with empty team id");
            }
            keep
        })
        .map(drop_invalid_dates)
        .collect();
    schedules.sort_by(|a, b| a.team_id().cmp(b.team_id()));
    Ok(schedules)
}

/// Remove fixtures whose `ymd` has a month outside 1-12 or a day outside 1-31.
fn drop_invalid_dates(schedule: TeamSchedule) -> TeamSchedule {
    if schedule.fixtures().iter().all(|f| f.ymd.has_valid_fields()) {
        return schedule;
    }
    let fixtures = schedule
        .fixtures()
        .iter()
        .filter(|f| {
            let keep = f.ymd.has_valid_fields();
            if !keep {
                warn!(
                    "skipping {} game vs {}: invalid date {}",
                    schedule.team_id(),
                    f.opponent,
                    f.ymd.raw()
                );
            }
            keep
        })
        .cloned()
        .collect();
    TeamSchedule::new(schedule.team_id(), fixtures)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load league games from a `date,home,away` CSV file.
pub fn load_league_games(path: &Path) -> Result<Vec<LeagueGame>, ScheduleFileError> {
    let file = std::fs::File::open(path).map_err(|e| ScheduleFileError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_games_from_reader(file).map_err(|e| ScheduleFileError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load team-centric schedule blocks from a JSON file.
pub fn load_team_blocks(path: &Path) -> Result<Vec<TeamSchedule>, ScheduleFileError> {
    let file = std::fs::File::open(path).map_err(|e| ScheduleFileError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_team_blocks_from_reader(std::io::BufReader::new(file)).map_err(|e| {
        ScheduleFileError::Json {
            path: path.display().to_string(),
            source: e,
        }
    })
}

/// Load per-team schedules from either supported format.
pub fn load_schedule(path: &Path) -> Result<Vec<TeamSchedule>, ScheduleFileError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let schedules = match extension.as_deref() {
        Some("csv") => {
            let games = load_league_games(path)?;
            info!("Loaded {} games from {}", games.len(), path.display());
            build_team_schedules(&games)
        }
        Some("json") => load_team_blocks(path)?,
        _ => {
            return Err(ScheduleFileError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    };

    if schedules.is_empty() {
        return Err(ScheduleFileError::Validation(format!(
            "schedule {} produced zero teams",
            path.display()
        )));
    }

    Ok(schedules)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
