use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::decimal::Money;
use crate::schedule::{is_past_grace, WeekSchedule};
use crate::types::{DateRange, PaymentStatus, WeeklyPayment};

/// outstanding balance for weeks at or before the due week
///
/// a week contributes only when its play date is resolvable and at least 24
/// hours past; a week with no resolvable date is excluded rather than assumed
/// late, so a schedule gap can never create debt
pub fn team_arrears(
    schedule: &WeekSchedule,
    matched: &BTreeMap<u32, &WeeklyPayment>,
    expected: Money,
    custom_range: Option<&DateRange>,
    now: DateTime<Utc>,
) -> Money {
    let mut owed = Money::ZERO;

    for week in 1..=schedule.due_week() {
        let Some(play_date) = schedule.play_date(week) else {
            continue;
        };
        if let Some(range) = custom_range {
            if !range.contains(play_date) {
                continue;
            }
        }
        if !is_past_grace(play_date, now) {
            continue;
        }

        let status = matched
            .get(&week)
            .map(|payment| payment.status)
            .unwrap_or(PaymentStatus::Unpaid);

        match status {
            PaymentStatus::Paid(_) | PaymentStatus::Bye => {}
            PaymentStatus::Partial(paid) => owed += (expected - paid).floor_zero(),
            PaymentStatus::Unpaid | PaymentStatus::Makeup => owed += expected,
        }
    }

    owed
}

/// running arrears rollup for a division or the whole league
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrearsTotals {
    pub total_owed: Money,
    pub teams_in_arrears: u32,
}

impl ArrearsTotals {
    pub fn add_team(&mut self, owed: Money) {
        self.total_owed += owed;
        if owed.is_positive() {
            self.teams_in_arrears += 1;
        }
    }
}
