// Command-line interface. Flags override the matching config values.

use clap::Parser;
use offnight_core::calendar::next_week_monday_from;
use offnight_core::{FilterSet, Weekday, WindowRequest, Ymd};
use std::path::PathBuf;

use crate::app::Query;
use crate::config::Config;
use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "offnight")]
#[command(about = "Rank teams by schedule density over a date window", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding config/ and defaults/
    #[arg(long, default_value = ".", env = "OFFNIGHT_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Schedule file (.csv or .json); overrides data.schedule
    #[arg(long)]
    pub schedule: Option<PathBuf>,

    /// Window start, YYYY-MM-DD (defaults to next week's Monday)
    #[arg(long)]
    pub start: Option<Ymd>,

    /// Rolling window length in weeks
    #[arg(long, conflicts_with = "end")]
    pub weeks: Option<u32>,

    /// Inclusive window end for a custom range, YYYY-MM-DD
    #[arg(long, requires = "start")]
    pub end: Option<Ymd>,

    /// Fantasy week number instead of a start date
    #[arg(long, conflicts_with_all = ["start", "end", "weeks"])]
    pub week: Option<u32>,

    /// Count only Sun/Mon/Wed/Fri games
    #[arg(long)]
    pub off_nights: bool,

    /// Restrict to these days, e.g. Mon,Wed,Fri
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<Weekday>,

    /// Drop teams with fewer games than this
    #[arg(long)]
    pub min_games: Option<u32>,

    /// Exclude home games
    #[arg(long)]
    pub no_home: bool,

    /// Exclude away games
    #[arg(long)]
    pub no_away: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl Cli {
    /// Schedule file to load: the flag, else the config path relative to
    /// `--config-dir`.
    pub fn schedule_path(&self, config: &Config) -> PathBuf {
        self.schedule
            .clone()
            .unwrap_or_else(|| self.config_dir.join(&config.schedule_path))
    }

    pub fn output_format(&self, config: &Config) -> OutputFormat {
        self.format.unwrap_or(config.output_format)
    }

    /// Combine flags with config defaults into a query. `today` anchors the
    /// default window start.
    pub fn query(&self, config: &Config, today: Ymd) -> Query {
        Query {
            request: self.window_request(config, today),
            filters: self.filters(config),
        }
    }

    fn window_request(&self, config: &Config, today: Ymd) -> WindowRequest {
        if let Some(week) = self.week {
            return WindowRequest::FantasyWeek(week);
        }
        let start = self.start.unwrap_or_else(|| next_week_monday_from(today));
        match self.end {
            Some(end) => WindowRequest::Custom { start, end },
            None => WindowRequest::Weeks {
                start,
                weeks: self.weeks.unwrap_or(config.window_weeks),
            },
        }
    }

    fn filters(&self, config: &Config) -> FilterSet {
        let mut filters = config.filters;
        if self.off_nights {
            filters.off_nights_only = true;
        }
        if !self.days.is_empty() {
            filters.days_of_week = self.days.iter().copied().collect();
        }
        if let Some(min_games) = self.min_games {
            filters.min_games = min_games;
        }
        if self.no_home {
            filters.include_home = false;
        }
        if self.no_away {
            filters.include_away = false;
        }
        filters
    }
}
