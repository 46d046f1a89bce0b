/// custom date-range report with projection
use league_dues_rs::chrono::{NaiveDate, TimeZone, Utc};
use league_dues_rs::{
    DateRange, Division, DuesEngine, LeagueSnapshot, Money, ReportOptions, SafeTimeProvider, Team,
    TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let division = Division {
        id: Uuid::new_v4(),
        name: "Thursday 9-Ball".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 8),
        total_weeks: Some(12),
        matches_per_week: 4,
        first_matches_per_week: 0,
        second_matches_per_week: 0,
        dues_per_player_per_match: Money::from_major(4),
        players_per_week: 4,
        is_double_play: false,
        week_play_dates: None,
        is_archived: false,
    };
    let snapshot = LeagueSnapshot {
        teams: vec![Team {
            id: Uuid::new_v4(),
            name: "Break And Run".to_string(),
            division: division.name.clone(),
            payments: Vec::new(),
            is_archived: false,
            is_active: true,
        }],
        divisions: vec![division],
    };

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap(),
    ));

    // restrict the report to february play nights
    let february = DateRange::new(
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    )?;
    let options = ReportOptions {
        custom_range: Some(february),
        projection: false,
        ..Default::default()
    };

    let summary = DuesEngine::new().compute(&snapshot, &options, &time)?;
    println!("window: {}", summary.period_label.as_deref().unwrap_or("-"));
    println!("owed:   {}", summary.total_owed);

    Ok(())
}
