use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use log::warn;

use crate::arrears::{team_arrears, ArrearsTotals};
use crate::decimal::Money;
use crate::errors::{DuesError, Result};
use crate::payments::{expected_weekly_dues, match_payments};
use crate::period::{PeriodConfig, PeriodLedger};
use crate::plan_limit::PlanLimitCache;
use crate::schedule::WeekSchedule;
use crate::snapshot::{Division, LeagueSnapshot, Team};
use crate::summary::{DivisionBreakdown, DuesBreakdown, DuesSummary, PeriodBreakdown};
use crate::types::{DateRange, DivisionId};

/// report surface for one engine run
#[derive(Default)]
pub struct ReportOptions {
    /// restrict the report to one division
    pub division: Option<DivisionId>,
    /// add projected future-week amounts to collected totals
    pub projection: bool,
    /// current combined billing period plus its rolling past windows
    pub period: Option<PeriodConfig>,
    /// ad-hoc window; overrides the combined-period logic entirely
    pub custom_range: Option<DateRange>,
}

/// dues reconciliation and projection engine
///
/// a single deterministic synchronous pass over an immutable snapshot: resolve
/// schedules, match payments to weeks, then fold obligations, arrears, and
/// period buckets into one summary. Re-running on an identical snapshot at an
/// identical time yields identical totals.
pub struct DuesEngine {
    plan_limits: PlanLimitCache,
    breakdown: Option<Box<dyn DuesBreakdown>>,
}

impl DuesEngine {
    pub fn new() -> Self {
        Self {
            plan_limits: PlanLimitCache::default(),
            breakdown: None,
        }
    }

    /// inject the memoized plan-limit accessor
    pub fn with_plan_limits(mut self, plan_limits: PlanLimitCache) -> Self {
        self.plan_limits = plan_limits;
        self
    }

    /// plug in the external league-manager dues breakdown
    pub fn with_breakdown(mut self, breakdown: Box<dyn DuesBreakdown>) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    /// compute the dues summary for a snapshot at the provider's current time
    pub fn compute(
        &self,
        snapshot: &LeagueSnapshot,
        options: &ReportOptions,
        time: &SafeTimeProvider,
    ) -> Result<DuesSummary> {
        let now = time.now();

        if let Some(range) = &options.custom_range {
            if range.start > range.end {
                return Err(DuesError::InvalidDateRange {
                    start: range.start,
                    end: range.end,
                });
            }
        }
        if let Some(config) = &options.period {
            // a zero or negative length window would also make every rolling
            // past window degenerate
            if config.current.start >= config.current.end {
                return Err(DuesError::InvalidConfiguration {
                    message: format!(
                        "period {:?} must end after it starts ({} to {})",
                        config.current.label, config.current.start, config.current.end
                    ),
                });
            }
        }
        let window = CollectionWindow::from_options(options)?;

        let divisions: Vec<&Division> = snapshot
            .active_divisions()
            .filter(|d| options.division.map_or(true, |id| d.id == id))
            .collect();

        let mut rows: BTreeMap<DivisionId, DivisionRow> = divisions
            .iter()
            .map(|d| (d.id, DivisionRow::resolve(d, now)))
            .collect();
        let mut ledger = PeriodLedger::new(options.period.as_ref(), options.custom_range);

        let mut total_teams = 0u32;
        let mut total_collected = Money::ZERO;
        let mut league = ArrearsTotals::default();

        for team in snapshot.active_teams() {
            let Some(division) = snapshot.resolve_division(&team.division) else {
                // one malformed team never aborts the rest of the run
                let err = DuesError::UnresolvedDivision {
                    team_id: team.id,
                    reference: team.division.clone(),
                };
                warn!("{err}; team {} excluded from totals", team.name);
                continue;
            };
            let Some(row) = rows.get_mut(&division.id) else {
                continue; // filtered out by division selection
            };

            let (collected, owed) = row.add_team(team, options, &window, &mut ledger, now);

            total_teams += 1;
            total_collected += collected;
            league.add_team(owed);
        }

        let by_division: Vec<DivisionBreakdown> = divisions
            .iter()
            .map(|d| rows[&d.id].breakdown(&d.name))
            .collect();

        let league_profit = match &self.breakdown {
            Some(breakdown) => divisions
                .iter()
                .map(|d| breakdown.league_share(d, rows[&d.id].expected))
                .sum(),
            None => Money::ZERO,
        };

        let by_period: Vec<PeriodBreakdown> = ledger
            .buckets()
            .iter()
            .map(|(period, totals)| PeriodBreakdown {
                label: period.label.clone(),
                totals: *totals,
            })
            .collect();

        Ok(DuesSummary {
            total_teams,
            total_collected,
            total_owed: league.total_owed,
            by_division,
            period_label: ledger.current_label().map(str::to_string),
            by_period,
            league_profit,
            team_capacity: self.plan_limits.team_limit(),
            projected: options.projection,
        })
    }
}

impl Default for DuesEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// per-division working state for one run
struct DivisionRow {
    schedule: WeekSchedule,
    weekly_dues: Money,
    expected: Money,
    collected: Money,
    totals: ArrearsTotals,
    team_count: u32,
}

impl DivisionRow {
    fn resolve(division: &Division, now: DateTime<Utc>) -> Self {
        Self {
            schedule: WeekSchedule::resolve(division, now),
            weekly_dues: expected_weekly_dues(division),
            expected: Money::ZERO,
            collected: Money::ZERO,
            totals: ArrearsTotals::default(),
            team_count: 0,
        }
    }

    /// fold one team into the row; returns (collected, owed) for the run totals
    fn add_team(
        &mut self,
        team: &Team,
        options: &ReportOptions,
        window: &CollectionWindow,
        ledger: &mut PeriodLedger,
        now: DateTime<Utc>,
    ) -> (Money, Money) {
        let matched = match_payments(&self.schedule, &team.payments, self.schedule.total_weeks());

        let mut collected = Money::ZERO;
        for payment in matched.values() {
            let net = payment.net_collected();
            if net.is_zero() {
                continue;
            }
            if window.admits(payment.payment_date) {
                collected += net;
            }
            if let Some(paid_on) = payment.payment_date {
                ledger.record_collection(paid_on, net);
            }
        }

        let owed = team_arrears(
            &self.schedule,
            &matched,
            self.weekly_dues,
            options.custom_range.as_ref(),
            now,
        );

        // expected dues for the report window: resolvable weeks through the
        // due week, one share per team
        for week in 1..=self.schedule.due_week() {
            let Some(play_date) = self.schedule.play_date(week) else {
                continue;
            };
            if let Some(range) = &options.custom_range {
                if !range.contains(play_date) {
                    continue;
                }
            }
            self.expected += self.weekly_dues;
        }

        // period buckets see every resolvable scheduled week; the ledger
        // splits to-date from full-period by play date
        for week in 1..=self.schedule.total_weeks() {
            if let Some(play_date) = self.schedule.play_date(week) {
                ledger.record_obligation(play_date, self.weekly_dues, now);
            }
        }

        let projected = if options.projection {
            self.projected_future(options.custom_range.as_ref())
        } else {
            Money::ZERO
        };
        let collected = collected + projected;

        self.collected += collected;
        self.totals.add_team(owed);
        self.team_count += 1;

        (collected, owed)
    }

    /// forward-looking estimate for weeks beyond the due week
    fn projected_future(&self, custom_range: Option<&DateRange>) -> Money {
        let mut projected = Money::ZERO;
        for week in (self.schedule.due_week() + 1)..=self.schedule.total_weeks() {
            match (custom_range, self.schedule.play_date(week)) {
                (Some(range), Some(play_date)) if range.contains(play_date) => {
                    projected += self.weekly_dues;
                }
                (Some(_), _) => {}
                (None, _) => projected += self.weekly_dues,
            }
        }
        projected
    }

    fn breakdown(&self, name: &str) -> DivisionBreakdown {
        DivisionBreakdown {
            name: name.to_string(),
            expected: self.expected,
            collected: self.collected,
            owed: self.totals.total_owed,
            team_count: self.team_count,
            teams_in_arrears: self.totals.teams_in_arrears,
        }
    }
}

/// which payments count toward collected totals for the active window
enum CollectionWindow {
    /// whole season
    All,
    /// dated payments inside the window only
    Range(DateRange),
}

impl CollectionWindow {
    fn from_options(options: &ReportOptions) -> Result<Self> {
        if let Some(range) = options.custom_range {
            return Ok(CollectionWindow::Range(range));
        }
        if let Some(config) = &options.period {
            let range = DateRange::new(config.current.start, config.current.end)?;
            return Ok(CollectionWindow::Range(range));
        }
        Ok(CollectionWindow::All)
    }

    fn admits(&self, payment_date: Option<chrono::NaiveDate>) -> bool {
        match self {
            CollectionWindow::All => true,
            CollectionWindow::Range(range) => {
                payment_date.map(|date| range.contains(date)).unwrap_or(false)
            }
        }
    }
}
