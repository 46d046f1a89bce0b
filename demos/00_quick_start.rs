/// quick start - minimal dues reconciliation run
use league_dues_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use league_dues_rs::{
    Division, DuesEngine, LeagueSnapshot, Money, PaymentStatus, ReportOptions, SafeTimeProvider,
    Team, TimeSource, Uuid, WeeklyPayment,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();

    // a $25/week division that started six weeks ago
    let division = Division {
        id: Uuid::new_v4(),
        name: "Tuesday 8-Ball".to_string(),
        start_date: Some(start),
        total_weeks: Some(16),
        matches_per_week: 5,
        first_matches_per_week: 0,
        second_matches_per_week: 0,
        dues_per_player_per_match: Money::from_major(5),
        players_per_week: 5,
        is_double_play: false,
        week_play_dates: None,
        is_archived: false,
    };

    // a team with four full weeks and one partial on record
    let mut payments: Vec<WeeklyPayment> = (1..=4)
        .map(|week| WeeklyPayment {
            week,
            status: PaymentStatus::Paid(Money::from_major(25)),
            payment_date: Some(start + Duration::days(7 * (week as i64 - 1))),
            sanction_fee: Money::ZERO,
        })
        .collect();
    payments.push(WeeklyPayment {
        week: 5,
        status: PaymentStatus::Partial(Money::from_major(10)),
        payment_date: Some(start + Duration::days(28)),
        sanction_fee: Money::ZERO,
    });

    let snapshot = LeagueSnapshot {
        teams: vec![Team {
            id: Uuid::new_v4(),
            name: "Rack Attack".to_string(),
            division: division.name.clone(),
            payments,
            is_archived: false,
            is_active: true,
        }],
        divisions: vec![division],
    };

    // fixed "now" six weeks into the season
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 2, 17, 12, 0, 0).unwrap(),
    ));

    let summary = DuesEngine::new().compute(&snapshot, &ReportOptions::default(), &time)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
