use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{DuesError, Result};

/// unique identifier for a division
pub type DivisionId = Uuid;

/// unique identifier for a team
pub type TeamId = Uuid;

/// payment status for one schedule week
///
/// closed variant set; the recorded amount travels with the status so a
/// `Paid`/`Partial` week can never lose its amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "lowercase")]
pub enum PaymentStatus {
    /// full weekly dues received
    Paid(Money),
    /// something received, but less than the weekly dues
    Partial(Money),
    /// team had a bye; nothing is due
    Bye,
    /// match deferred to a makeup date; dues still owed
    Makeup,
    /// nothing received
    Unpaid,
}

impl PaymentStatus {
    /// amount actually received for the week
    pub fn amount_paid(&self) -> Money {
        match self {
            PaymentStatus::Paid(amount) | PaymentStatus::Partial(amount) => *amount,
            PaymentStatus::Bye | PaymentStatus::Makeup | PaymentStatus::Unpaid => Money::ZERO,
        }
    }

    /// true when the week carries no outstanding balance regardless of amounts
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Paid(_) | PaymentStatus::Bye)
    }
}

/// a payment record against one schedule week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPayment {
    /// 1-based week index the payment was recorded against
    pub week: u32,
    #[serde(flatten)]
    pub status: PaymentStatus,
    /// date the payment was taken, used for date-first matching
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// sanction-fee sub-component carried on the payment; not dues revenue
    #[serde(default)]
    pub sanction_fee: Money,
}

impl WeeklyPayment {
    /// net dues collected from this payment, sanction fees excluded
    pub fn net_collected(&self) -> Money {
        (self.status.amount_paid() - self.sanction_fee).floor_zero()
    }
}

/// play date entry in a division's explicit per-week override list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayDate {
    /// scheduled play on a concrete date
    Scheduled(NaiveDate),
    /// the week is skipped and never contributes to lateness
    NoPlay,
}

impl PlayDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PlayDate::Scheduled(date) => Some(*date),
            PlayDate::NoPlay => None,
        }
    }
}

/// a billing window, half-open over [start, end)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    /// true if the given date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// window length in days
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// the equal-length window immediately before this one
    pub fn previous(&self, index: usize) -> Period {
        let span = Duration::days(self.length_days());
        let shift = self.length_days() * (index as i64 + 1);
        let start = self.start - Duration::days(shift);
        Period {
            label: format!("{} -{}", self.label, index + 1),
            start,
            end: start + span,
        }
    }
}

/// ad-hoc reporting window, half-open over [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DuesError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_amounts() {
        assert_eq!(
            PaymentStatus::Paid(Money::from_major(25)).amount_paid(),
            Money::from_major(25)
        );
        assert_eq!(
            PaymentStatus::Partial(Money::from_major(10)).amount_paid(),
            Money::from_major(10)
        );
        assert_eq!(PaymentStatus::Bye.amount_paid(), Money::ZERO);
        assert_eq!(PaymentStatus::Makeup.amount_paid(), Money::ZERO);

        assert!(PaymentStatus::Paid(Money::ZERO).is_settled());
        assert!(PaymentStatus::Bye.is_settled());
        assert!(!PaymentStatus::Partial(Money::from_major(10)).is_settled());
        assert!(!PaymentStatus::Makeup.is_settled());
    }

    #[test]
    fn test_net_collected_excludes_sanction_fee() {
        let payment = WeeklyPayment {
            week: 3,
            status: PaymentStatus::Paid(Money::from_major(30)),
            payment_date: Some(date(2026, 2, 10)),
            sanction_fee: Money::from_major(5),
        };
        assert_eq!(payment.net_collected(), Money::from_major(25));

        // fee larger than the payment never goes negative
        let odd = WeeklyPayment {
            week: 4,
            status: PaymentStatus::Partial(Money::from_major(3)),
            payment_date: None,
            sanction_fee: Money::from_major(5),
        };
        assert_eq!(odd.net_collected(), Money::ZERO);
    }

    #[test]
    fn test_payment_status_serde() {
        let paid = PaymentStatus::Paid(Money::from_decimal(dec!(25)));
        let json = serde_json::to_value(&paid).unwrap();
        assert_eq!(json["status"], "paid");

        let bye: PaymentStatus = serde_json::from_value(serde_json::json!({
            "status": "bye"
        }))
        .unwrap();
        assert_eq!(bye, PaymentStatus::Bye);
    }

    #[test]
    fn test_period_contains_half_open() {
        let period = Period::new("Feb 2026", date(2026, 2, 1), date(2026, 3, 1));
        assert!(period.contains(date(2026, 2, 1)));
        assert!(period.contains(date(2026, 2, 28)));
        assert!(!period.contains(date(2026, 3, 1)));
        assert!(!period.contains(date(2026, 1, 31)));
    }

    #[test]
    fn test_period_previous_windows() {
        let period = Period::new("current", date(2026, 3, 1), date(2026, 3, 29));
        let prev = period.previous(0);
        assert_eq!(prev.start, date(2026, 2, 1));
        assert_eq!(prev.end, date(2026, 3, 1));

        let two_back = period.previous(1);
        assert_eq!(two_back.start, date(2026, 1, 4));
        assert_eq!(two_back.end, date(2026, 2, 1));
    }

    #[test]
    fn test_date_range_validation() {
        assert!(DateRange::new(date(2026, 1, 1), date(2026, 2, 1)).is_ok());
        assert!(matches!(
            DateRange::new(date(2026, 2, 1), date(2026, 1, 1)),
            Err(DuesError::InvalidDateRange { .. })
        ));
        // empty range is legal and contains nothing
        let empty = DateRange::new(date(2026, 1, 1), date(2026, 1, 1)).unwrap();
        assert!(!empty.contains(date(2026, 1, 1)));
    }
}
