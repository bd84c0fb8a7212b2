// Configuration loading and parsing (config/optimizer.toml).

use offnight_core::schedule::{season_bounds, TeamSchedule};
use offnight_core::{DateRange, FantasyWeeks, FilterSet, Weekday, WeekdaySet, Ymd};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::report::OutputFormat;

/// Season used when neither the config nor the schedule pins one down.
pub const FALLBACK_SEASON_START: Ymd = Ymd::from_ymd(2025, 10, 6);
pub const FALLBACK_SEASON_END: Ymd = Ymd::from_ymd(2026, 4, 15);

const CONFIG_FILE: &str = "optimizer.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub season: SeasonConfig,
    pub window_weeks: u32,
    pub filters: FilterSet,
    pub schedule_path: String,
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy)]
pub struct SeasonConfig {
    pub first_week_start: Ymd,
    /// Explicit season bounds. Missing ends are derived from the schedule.
    pub start: Option<Ymd>,
    pub end: Option<Ymd>,
}

impl SeasonConfig {
    pub fn fantasy_weeks(&self) -> FantasyWeeks {
        FantasyWeeks::new(self.first_week_start)
    }

    /// Season bounds: configured values first, then the span of the loaded
    /// schedule, then the built-in fallback season.
    pub fn resolve(&self, schedules: &[TeamSchedule]) -> DateRange {
        let derived = season_bounds(schedules);
        let start = self
            .start
            .or(derived.map(|r| r.start()))
            .unwrap_or(FALLBACK_SEASON_START);
        let end = self
            .end
            .or(derived.map(|r| r.end()))
            .unwrap_or(FALLBACK_SEASON_END);
        DateRange::new(start, end).unwrap_or(DateRange::single_day(start))
    }
}

// ---------------------------------------------------------------------------
// optimizer.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire optimizer.toml file.
#[derive(Debug, Clone, Deserialize)]
struct OptimizerFile {
    season: SeasonSection,
    window: WindowSection,
    #[serde(default)]
    filters: FiltersSection,
    data: DataSection,
    #[serde(default)]
    output: OutputSection,
}

#[derive(Debug, Clone, Deserialize)]
struct SeasonSection {
    first_week_start: String,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    end: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct WindowSection {
    weeks: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct FiltersSection {
    include_home: bool,
    include_away: bool,
    off_nights_only: bool,
    days_of_week: Vec<String>,
    min_games: u32,
}

impl Default for FiltersSection {
    fn default() -> Self {
        FiltersSection {
            include_home: true,
            include_away: true,
            off_nights_only: false,
            days_of_week: Vec::new(),
            min_games: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct DataSection {
    schedule: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputSection {
    #[serde(default)]
    format: OutputFormat,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/optimizer.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()` which handles default initialization automatically.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: OptimizerFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let season = SeasonConfig {
        first_week_start: parse_date("season.first_week_start", &file.season.first_week_start)?,
        start: file
            .season
            .start
            .as_deref()
            .map(|s| parse_date("season.start", s))
            .transpose()?,
        end: file
            .season
            .end
            .as_deref()
            .map(|s| parse_date("season.end", s))
            .transpose()?,
    };

    let days_of_week = file
        .filters
        .days_of_week
        .iter()
        .map(|d| {
            Weekday::parse(d).map_err(|e| ConfigError::ValidationError {
                field: "filters.days_of_week".into(),
                message: e.to_string(),
            })
        })
        .collect::<Result<WeekdaySet, _>>()?;

    let config = Config {
        season,
        window_weeks: file.window.weeks,
        filters: FilterSet {
            include_home: file.filters.include_home,
            include_away: file.filters.include_away,
            off_nights_only: file.filters.off_nights_only,
            days_of_week,
            min_games: file.filters.min_games,
        },
        schedule_path: file.data.schedule,
        output_format: file.output.format,
    };

    validate(&config)?;

    Ok(config)
}

/// Seed `config/optimizer.toml` from `defaults/optimizer.toml` when the
/// config file does not exist yet. Returns the path written, if any. An
/// existing config file is never touched.
pub fn seed_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.is_file() {
        return Ok(None);
    }

    let seed = base_dir.join("defaults").join(CONFIG_FILE);
    if !seed.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} and no defaults/{CONFIG_FILE} to seed it from in {}; \
                 run from the project root or pass --config-dir",
                base_dir.display()
            ),
        });
    }

    let seed_error = |what: &str, path: &Path, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to {what} {}: {e}", path.display()),
    };

    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| seed_error("create", &config_dir, e))?;
    let content = std::fs::read(&seed).map_err(|e| seed_error("read", &seed, e))?;

    // `create_new` so a config written concurrently is left alone.
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, &content)
                .map_err(|e| seed_error("write", &target, e))?;
            info!("Seeded {} from {}", target.display(), seed.display());
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(seed_error("create", &target, e)),
    }
}

/// Load config relative to `base_dir`, seeding `config/` from `defaults/`
/// first.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    seed_config_file(base_dir)?;
    load_config_from(base_dir)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn parse_date(field: &str, value: &str) -> Result<Ymd, ConfigError> {
    Ymd::parse_iso(value).map_err(|e| ConfigError::ValidationError {
        field: field.into(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let weeks = config.window_weeks;
    if !(1..=offnight_core::request::MAX_WINDOW_WEEKS).contains(&weeks) {
        return Err(ConfigError::ValidationError {
            field: "window.weeks".into(),
            message: format!(
                "must be between 1 and {} inclusive, got {weeks}",
                offnight_core::request::MAX_WINDOW_WEEKS
            ),
        });
    }

    if let (Some(start), Some(end)) = (config.season.start, config.season.end) {
        if start > end {
            return Err(ConfigError::ValidationError {
                field: "season.start".into(),
                message: format!("must not be after season.end ({start} > {end})"),
            });
        }
    }

    if config.season.first_week_start.weekday() != Weekday::Monday {
        return Err(ConfigError::ValidationError {
            field: "season.first_week_start".into(),
            message: format!(
                "must be a Monday, got {} ({})",
                config.season.first_week_start,
                config.season.first_week_start.weekday()
            ),
        });
    }

    if config.schedule_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.schedule".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
