// Library root: calendar arithmetic, schedule model, filters and the window
// aggregator that ranks teams by schedule density.

pub mod calendar;
pub mod fantasy_week;
pub mod filters;
pub mod request;
pub mod schedule;
pub mod window;

pub use calendar::{
    clamp_custom_range_to_season, clamp_to_season_window, CalendarError, DateRange, NightKind,
    Weekday, WeekdaySet, Ymd,
};
pub use fantasy_week::FantasyWeeks;
pub use filters::FilterSet;
pub use request::WindowRequest;
pub use schedule::{Fixture, LeagueGame, TeamId, TeamSchedule};
pub use window::{summarize_all, summarize_team, TeamWindowSummary};
