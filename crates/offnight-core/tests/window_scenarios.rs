// End-to-end scenarios for the window aggregator, driven through the public
// API the way a caller would: league games -> team schedules -> clamped
// window -> ranked rows.

use offnight_core::schedule::build_team_schedules;
use offnight_core::*;

// ===========================================================================
// Test helpers
// ===========================================================================

fn ymd(raw: u32) -> Ymd {
    Ymd::from_raw(raw)
}

fn game(date: u32, home: &str, away: &str) -> LeagueGame {
    LeagueGame {
        date: ymd(date),
        home: home.into(),
        away: away.into(),
    }
}

/// Two weeks of a small four-team league starting Monday 2025-10-06.
fn two_week_league() -> Vec<TeamSchedule> {
    build_team_schedules(&[
        game(20251006, "ANA", "BOS"), // Mon
        game(20251007, "CAR", "DAL"), // Tue
        game(20251008, "BOS", "CAR"), // Wed
        game(20251009, "ANA", "DAL"), // Thu
        game(20251010, "DAL", "BOS"), // Fri
        game(20251011, "ANA", "CAR"), // Sat
        game(20251012, "BOS", "ANA"), // Sun
        game(20251013, "CAR", "ANA"), // Mon
        game(20251014, "DAL", "ANA"), // Tue
        game(20251015, "BOS", "DAL"), // Wed
        game(20251016, "ANA", "DAL"), // Thu
        game(20251018, "CAR", "BOS"), // Sat
    ])
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn single_team_end_to_end() {
    let schedules = vec![TeamSchedule::new(
        "COL",
        vec![
            Fixture::new(ymd(20251006), true, "CHI"),
            Fixture::new(ymd(20251008), false, "DAL"),
            Fixture::new(ymd(20251011), true, "LAK"),
        ],
    )];
    let range = DateRange::new(ymd(20251006), ymd(20251012)).unwrap();

    let rows = summarize_all(&schedules, &range, &FilterSet::default());

    assert_eq!(rows.len(), 1);
    let col = &rows[0];
    assert_eq!(col.games_total, 3);
    assert_eq!(col.off_night_games, 2);
    assert_eq!(col.heavy_night_games, 1);
    assert_eq!(col.home_games, 2);
    assert_eq!(col.away_games, 1);
    assert_eq!(col.back_to_back_count, 0);
    assert_eq!(col.per_week, vec![3]);
}

#[test]
fn league_ranking_over_two_weeks() {
    let schedules = two_week_league();
    let season = DateRange::new(ymd(20251006), ymd(20260416)).unwrap();
    let range = WindowRequest::Weeks {
        start: ymd(20251006),
        weeks: 2,
    }
    .resolve(&season, &FantasyWeeks::default());
    assert_eq!(range.len_days(), 14);

    let rows = summarize_all(&schedules, &range, &FilterSet::default());
    let order: Vec<&str> = rows.iter().map(|r| r.team_id.as_str()).collect();

    // ANA 7 games; BOS 6 (5 off); DAL 6 (2 off); CAR 5.
    assert_eq!(order, vec!["ANA", "BOS", "DAL", "CAR"]);

    let ana = &rows[0];
    assert_eq!(ana.games_total, 7);
    assert_eq!(ana.per_week, vec![4, 3]);
    assert_eq!(ana.back_to_back_count, 3);

    for row in &rows {
        assert_eq!(row.home_games + row.away_games, row.games_total);
        assert_eq!(row.off_night_games + row.heavy_night_games, row.games_total);
        assert_eq!(row.per_week.len(), 2);
        assert_eq!(row.per_week.iter().sum::<u32>(), row.games_total);
    }
}

#[test]
fn ties_prefer_fewer_back_to_backs_then_team_id() {
    // Both teams: 4 games, 2 off-nights. BOS plays Mon+Tue (one b2b),
    // ANA never plays consecutive days.
    let schedules = vec![
        TeamSchedule::new(
            "BOS",
            vec![
                Fixture::new(ymd(20251006), true, "X"), // Mon
                Fixture::new(ymd(20251007), true, "X"), // Tue
                Fixture::new(ymd(20251009), true, "X"), // Thu
                Fixture::new(ymd(20251012), true, "X"), // Sun
            ],
        ),
        TeamSchedule::new(
            "ANA",
            vec![
                Fixture::new(ymd(20251006), true, "X"), // Mon
                Fixture::new(ymd(20251009), true, "X"), // Thu
                Fixture::new(ymd(20251011), true, "X"), // Sat
                Fixture::new(ymd(20251017), true, "X"), // Fri
            ],
        ),
    ];
    let range = DateRange::new(ymd(20251006), ymd(20251019)).unwrap();
    let rows = summarize_all(&schedules, &range, &FilterSet::default());

    assert_eq!(rows[0].team_id, "ANA");
    assert_eq!(rows[0].back_to_back_count, 0);
    assert_eq!(rows[1].team_id, "BOS");
    assert_eq!(rows[1].back_to_back_count, 1);
    for row in &rows {
        assert_eq!(row.games_total, 4);
        assert_eq!(row.off_night_games, 2);
    }
}

#[test]
fn off_night_filter_over_league() {
    let schedules = two_week_league();
    let range = DateRange::new(ymd(20251006), ymd(20251019)).unwrap();
    let filters = FilterSet {
        off_nights_only: true,
        min_games: 3,
        ..FilterSet::default()
    };

    let rows = summarize_all(&schedules, &range, &filters);

    for row in &rows {
        assert_eq!(row.heavy_night_games, 0);
        assert_eq!(row.off_night_games, row.games_total);
        assert!(row.games_total >= 3);
    }
    // BOS: Mon, Wed, Fri, Sun, Wed. ANA: Mon, Sun, Mon. DAL and CAR have 2.
    let order: Vec<(&str, u32)> = rows
        .iter()
        .map(|r| (r.team_id.as_str(), r.games_total))
        .collect();
    assert_eq!(order, vec![("BOS", 5), ("ANA", 3)]);
}

#[test]
fn ten_day_window_has_short_second_bin() {
    let schedules = two_week_league();
    let season = DateRange::new(ymd(20251006), ymd(20260416)).unwrap();
    let range = WindowRequest::Custom {
        start: ymd(20251006),
        end: ymd(20251015),
    }
    .resolve(&season, &FantasyWeeks::default());

    let bins = range.week_bins();
    assert_eq!(bins.len(), 2);
    assert_eq!(bins[1].len_days(), 3);

    let rows = summarize_all(&schedules, &range, &FilterSet::default());
    assert!(rows.iter().all(|r| r.per_week.len() == 2));
    let ana = rows.iter().find(|r| r.team_id == "ANA").unwrap();
    assert_eq!(ana.per_week, vec![4, 2]);
}

#[test]
fn window_past_season_end_collapses_to_last_day() {
    let schedules = two_week_league();
    let season = offnight_core::schedule::season_bounds(&schedules).unwrap();
    assert_eq!(season.end(), ymd(20251018));

    let range = clamp_to_season_window(ymd(20251101), 4, season.start(), season.end());
    assert_eq!(range, DateRange::single_day(ymd(20251018)));

    let rows = summarize_all(&schedules, &range, &FilterSet::default());
    let playing: Vec<&str> = rows
        .iter()
        .filter(|r| r.games_total > 0)
        .map(|r| r.team_id.as_str())
        .collect();
    assert_eq!(playing, vec!["BOS", "CAR"]);
}
