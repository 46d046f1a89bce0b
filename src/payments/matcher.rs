use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::schedule::WeekSchedule;
use crate::types::WeeklyPayment;

/// map a team's recorded payments onto schedule weeks, one payment per week
///
/// payments are applied in ascending recorded-week order and each week is
/// claimable once; per payment the priority is:
/// 1. exact match between the payment date and a week's resolved play date
/// 2. the nearest preceding play date at or before the payment date among
///    still-unclaimed weeks
/// 3. literal week-number equality with an unclaimed week
///
/// the date-first order lands makeup games on the week they were actually
/// played instead of the week they were recorded against
pub fn match_payments<'a>(
    schedule: &WeekSchedule,
    payments: &'a [WeeklyPayment],
    max_weeks: u32,
) -> BTreeMap<u32, &'a WeeklyPayment> {
    let max_weeks = max_weeks.min(schedule.total_weeks());
    let mut matched: BTreeMap<u32, &'a WeeklyPayment> = BTreeMap::new();

    let mut ordered: Vec<&WeeklyPayment> = payments.iter().collect();
    ordered.sort_by_key(|p| p.week);

    for payment in ordered {
        if let Some(week) = claim_week(schedule, &matched, payment, max_weeks) {
            matched.insert(week, payment);
        }
    }

    matched
}

fn claim_week(
    schedule: &WeekSchedule,
    matched: &BTreeMap<u32, &WeeklyPayment>,
    payment: &WeeklyPayment,
    max_weeks: u32,
) -> Option<u32> {
    let unclaimed = |week: &u32| !matched.contains_key(week);

    if let Some(paid_on) = payment.payment_date {
        // exact play-date match first
        if let Some(week) = (1..=max_weeks)
            .filter(unclaimed)
            .find(|&w| schedule.play_date(w) == Some(paid_on))
        {
            return Some(week);
        }

        // otherwise the latest play date at or before the payment date
        if let Some(week) = nearest_preceding(schedule, matched, paid_on, max_weeks) {
            return Some(week);
        }
    }

    // fallback: the recorded week number itself
    if payment.week >= 1 && payment.week <= max_weeks && !matched.contains_key(&payment.week) {
        return Some(payment.week);
    }

    None
}

fn nearest_preceding(
    schedule: &WeekSchedule,
    matched: &BTreeMap<u32, &WeeklyPayment>,
    paid_on: NaiveDate,
    max_weeks: u32,
) -> Option<u32> {
    (1..=max_weeks)
        .filter(|week| !matched.contains_key(week))
        .filter_map(|week| schedule.play_date(week).map(|date| (week, date)))
        .filter(|&(_, date)| date <= paid_on)
        .max_by_key(|&(_, date)| date)
        .map(|(week, _)| week)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::snapshot::Division;
    use crate::types::PaymentStatus;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(start: Option<NaiveDate>) -> WeekSchedule {
        let division = Division {
            id: Uuid::new_v4(),
            name: "Tuesday 8-Ball".to_string(),
            start_date: start,
            total_weeks: Some(10),
            matches_per_week: 5,
            first_matches_per_week: 0,
            second_matches_per_week: 0,
            dues_per_player_per_match: Money::from_major(5),
            players_per_week: 5,
            is_double_play: false,
            week_play_dates: None,
            is_archived: false,
        };
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        WeekSchedule::resolve(&division, now)
    }

    fn payment(week: u32, paid_on: Option<NaiveDate>) -> WeeklyPayment {
        WeeklyPayment {
            week,
            status: PaymentStatus::Paid(Money::from_major(25)),
            payment_date: paid_on,
            sanction_fee: Money::ZERO,
        }
    }

    #[test]
    fn test_exact_date_beats_week_number() {
        // week 1 starts 2026-01-06; a payment recorded against week 5 but
        // dated on week 3's play night lands on week 3
        let schedule = schedule(Some(date(2026, 1, 6)));
        let payments = vec![payment(5, Some(date(2026, 1, 20)))];

        let matched = match_payments(&schedule, &payments, 10);
        assert_eq!(matched.len(), 1);
        assert!(matched.contains_key(&3));
    }

    #[test]
    fn test_nearest_preceding_play_date() {
        let schedule = schedule(Some(date(2026, 1, 6)));
        // paid two days after week 2's play night (2026-01-13)
        let payments = vec![payment(2, Some(date(2026, 1, 15)))];

        let matched = match_payments(&schedule, &payments, 10);
        assert!(matched.contains_key(&2));
    }

    #[test]
    fn test_week_number_fallback_without_dates() {
        // no start date, so no play dates resolve at all
        let schedule = schedule(None);
        let payments = vec![payment(4, None), payment(7, Some(date(2026, 1, 15)))];

        let matched = match_payments(&schedule, &payments, 10);
        assert!(matched.contains_key(&4));
        assert!(matched.contains_key(&7));
    }

    #[test]
    fn test_each_week_claimed_once() {
        let schedule = schedule(Some(date(2026, 1, 6)));
        // both payments dated on week 1's play night; the second falls through
        // to its recorded week number
        let payments = vec![
            payment(1, Some(date(2026, 1, 6))),
            payment(2, Some(date(2026, 1, 6))),
        ];

        let matched = match_payments(&schedule, &payments, 10);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched.get(&1).unwrap().week, 1);
        assert_eq!(matched.get(&2).unwrap().week, 2);
    }

    #[test]
    fn test_unmatchable_payment_dropped() {
        let schedule = schedule(None);
        // duplicate recorded week with no dates: second payment has nowhere
        // to go and is dropped rather than double-counted
        let payments = vec![payment(4, None), payment(4, None)];

        let matched = match_payments(&schedule, &payments, 10);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_out_of_range_week_ignored() {
        let schedule = schedule(None);
        let payments = vec![payment(0, None), payment(11, None)];
        let matched = match_payments(&schedule, &payments, 10);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_ascending_week_order_application() {
        let schedule = schedule(Some(date(2026, 1, 6)));
        // recorded out of order; the lower recorded week is applied first and
        // takes the exact date match
        let payments = vec![
            payment(6, Some(date(2026, 1, 20))),
            payment(3, Some(date(2026, 1, 20))),
        ];

        let matched = match_payments(&schedule, &payments, 10);
        // week 3's payment (recorded week 3) claims the exact match on week 3
        assert_eq!(matched.get(&3).unwrap().week, 3);
        // the week-6 payment then claims the nearest preceding unclaimed week
        assert_eq!(matched.get(&2).unwrap().week, 6);
    }
}
