// Schedule-window optimizer entry point.
//
// Startup sequence:
// 1. Parse command-line flags
// 2. Initialize tracing (stderr, so stdout carries only the report)
// 3. Load config, seeding config/ from defaults/ when needed
// 4. Load the league schedule
// 5. Resolve the window and rank teams
// 6. Print the report

use offnight_app::app;
use offnight_app::cli::Cli;
use offnight_app::config;
use offnight_app::report::Report;
use offnight_app::schedule_file;
use offnight_core::Ymd;

use anyhow::Context;
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Parse flags
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing()?;

    // 3. Load config
    let config = config::load_config(&cli.config_dir).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config_dir.display()
        )
    })?;
    info!(
        "Config loaded: first week starts {}, {}-week window",
        config.season.first_week_start, config.window_weeks
    );

    // 4. Load the schedule
    let schedule_path = cli.schedule_path(&config);
    let schedules = schedule_file::load_schedule(&schedule_path)
        .with_context(|| format!("failed to load schedule {}", schedule_path.display()))?;
    info!("Loaded schedules for {} teams", schedules.len());

    // 5. Rank
    let query = cli.query(&config, Ymd::today_utc());
    let outcome = app::execute(&schedules, &config.season, &query);

    // 6. Print
    let report = Report::new(outcome.range, &outcome.rows);
    let rendered = report
        .render(cli.output_format(&config))
        .context("failed to render report")?;
    println!("{}", rendered.trim_end());

    Ok(())
}

/// Initialize tracing to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("offnight=info,offnight_app=info,offnight_core=info,warn")
            }),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
