use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::period::PeriodTotals;
use crate::snapshot::Division;

/// external per-division dues-breakdown collaborator
///
/// the engine never computes the league-manager split itself; operators plug
/// in their own breakdown and the summary carries the resulting sub-total
pub trait DuesBreakdown {
    /// league-manager share of a division's expected dues
    fn league_share(&self, division: &Division, expected: Money) -> Money;
}

/// per-division breakdown row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionBreakdown {
    pub name: String,
    /// expected dues for the weeks in the report window
    pub expected: Money,
    /// net dues collected in the report window
    pub collected: Money,
    /// outstanding arrears
    pub owed: Money,
    pub team_count: u32,
    pub teams_in_arrears: u32,
}

/// per-window billing totals row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    pub label: String,
    #[serde(flatten)]
    pub totals: PeriodTotals,
}

/// result of one engine run, handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuesSummary {
    pub total_teams: u32,
    /// actual collections, or collections plus future-week projection when
    /// projection mode is active
    pub total_collected: Money,
    pub total_owed: Money,
    pub by_division: Vec<DivisionBreakdown>,
    /// label of the billing window the totals are reported under
    pub period_label: Option<String>,
    /// to-date and full-period totals per window, newest first; the first row
    /// is the window `period_label` names. empty when no window is configured
    pub by_period: Vec<PeriodBreakdown>,
    /// league-manager profit sub-total from the external dues breakdown
    pub league_profit: Money,
    /// cached plan capacity (teams per division) for display
    pub team_capacity: u32,
    /// true when total_collected includes projected future weeks
    pub projected: bool,
}

impl DuesSummary {
    /// sum of per-division collected figures; equals `total_collected` when
    /// projection mode is off
    pub fn division_collected(&self) -> Money {
        self.by_division.iter().map(|row| row.collected).sum()
    }

    /// sum of per-division owed figures
    pub fn division_owed(&self) -> Money {
        self.by_division.iter().map(|row| row.owed).sum()
    }

    /// totals for the reported window, when one is configured
    pub fn current_period(&self) -> Option<&PeriodBreakdown> {
        self.by_period.first()
    }
}
