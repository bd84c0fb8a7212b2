// Report rendering for ranked window summaries: an aligned text table for the
// terminal, or JSON for other tools.

use offnight_core::{DateRange, TeamWindowSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything the presentation side needs for one query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub range: DateRange,
    pub week_bins: Vec<DateRange>,
    pub teams: &'a [TeamWindowSummary],
}

impl<'a> Report<'a> {
    pub fn new(range: DateRange, teams: &'a [TeamWindowSummary]) -> Self {
        Report {
            range,
            week_bins: range.week_bins(),
            teams,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Table => Ok(self.to_table()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    /// Fixed-width table: one row per team, one column per week bin headed by
    /// the bin's first day.
    pub fn to_table(&self) -> String {
        const FIXED: [&str; 7] = ["Team", "GP", "Off", "Heavy", "B2B", "Home", "Away"];

        let week_labels: Vec<String> = self
            .week_bins
            .iter()
            .map(|bin| bin.start().short_label())
            .collect();

        let team_width = self
            .teams
            .iter()
            .map(|t| t.team_id.len())
            .max()
            .unwrap_or(0)
            .max(FIXED[0].len());

        let mut out = format!(
            "Window {} ({} days, {} week bins)\n",
            self.range,
            self.range.len_days(),
            self.week_bins.len()
        );

        let mut header = format!("{:<team_width$}", FIXED[0]);
        for name in &FIXED[1..] {
            header.push_str(&format!("  {name:>5}"));
        }
        for label in &week_labels {
            header.push_str(&format!("  {label:>6}"));
        }
        out.push_str(header.trim_end());
        out.push('\n');

        if self.teams.is_empty() {
            out.push_str("(no teams match the current filters)\n");
            return out;
        }

        for team in self.teams {
            let mut line = format!("{:<team_width$}", team.team_id);
            for value in [
                team.games_total,
                team.off_night_games,
                team.heavy_night_games,
                team.back_to_back_count,
                team.home_games,
                team.away_games,
            ] {
                line.push_str(&format!("  {value:>5}"));
            }
            for count in &team.per_week {
                line.push_str(&format!("  {count:>6}"));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }
}
