use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{DateRange, Period};

/// how many past billing windows are kept alongside the current one
pub const DEFAULT_PAST_WINDOW: usize = 24;

fn default_past_window() -> usize {
    DEFAULT_PAST_WINDOW
}

/// operator-configured combined payment period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodConfig {
    /// the current recurring billing window
    pub current: Period,
    /// rolling count of equal-length past windows to report on
    #[serde(default = "default_past_window")]
    pub past_window: usize,
}

impl PeriodConfig {
    pub fn new(current: Period) -> Self {
        Self {
            current,
            past_window: DEFAULT_PAST_WINDOW,
        }
    }

    /// the current window followed by its past windows, newest first
    pub fn periods(&self) -> Vec<Period> {
        let mut periods = Vec::with_capacity(self.past_window + 1);
        periods.push(self.current.clone());
        for index in 0..self.past_window {
            periods.push(self.current.previous(index));
        }
        periods
    }
}

/// per-period money totals
///
/// "to-date" counts only weeks whose play date has already occurred;
/// "full-period" counts every week nominally scheduled in the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub expected_to_date: Money,
    pub expected_full: Money,
    pub collected: Money,
}

/// buckets obligations (by play date) and collections (by payment date) into
/// billing windows; an active custom range overrides the combined-period
/// logic entirely and restricts everything to [start, end)
#[derive(Debug, Clone)]
pub struct PeriodLedger {
    buckets: Vec<(Period, PeriodTotals)>,
}

impl PeriodLedger {
    pub fn new(config: Option<&PeriodConfig>, custom_range: Option<DateRange>) -> Self {
        let periods = match (custom_range, config) {
            (Some(range), _) => vec![Period::new(
                format!("{} to {}", range.start, range.end),
                range.start,
                range.end,
            )],
            (None, Some(config)) => config.periods(),
            (None, None) => Vec::new(),
        };

        Self {
            buckets: periods
                .into_iter()
                .map(|p| (p, PeriodTotals::default()))
                .collect(),
        }
    }

    /// record an expected weekly amount against the week's play date
    pub fn record_obligation(&mut self, play_date: NaiveDate, amount: Money, now: DateTime<Utc>) {
        let occurred = play_date <= now.date_naive();
        for (period, totals) in &mut self.buckets {
            if period.contains(play_date) {
                totals.expected_full += amount;
                if occurred {
                    totals.expected_to_date += amount;
                }
            }
        }
    }

    /// record a net collected amount against its payment date
    pub fn record_collection(&mut self, payment_date: NaiveDate, amount: Money) {
        for (period, totals) in &mut self.buckets {
            if period.contains(payment_date) {
                totals.collected += amount;
            }
        }
    }

    /// label of the window summaries are reported under
    pub fn current_label(&self) -> Option<&str> {
        self.buckets.first().map(|(period, _)| period.label.as_str())
    }

    /// totals for the current (or custom) window
    pub fn current_totals(&self) -> PeriodTotals {
        self.buckets
            .first()
            .map(|(_, totals)| *totals)
            .unwrap_or_default()
    }

    /// all windows with their totals, newest first
    pub fn buckets(&self) -> &[(Period, PeriodTotals)] {
        &self.buckets
    }
}
