use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{DivisionId, PlayDate, TeamId, WeeklyPayment};

/// season length assumed when a division does not record one
pub const DEFAULT_TOTAL_WEEKS: u32 = 20;

/// a scheduled competition group with its own pricing and schedule
///
/// numeric fields default to zero on missing/malformed input so a bad record
/// can never overstate a debt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
    pub id: DivisionId,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_weeks: Option<u32>,
    #[serde(default)]
    pub matches_per_week: u32,
    /// double-play split: matches for the first game type
    #[serde(default)]
    pub first_matches_per_week: u32,
    /// double-play split: matches for the second game type
    #[serde(default)]
    pub second_matches_per_week: u32,
    #[serde(default)]
    pub dues_per_player_per_match: Money,
    #[serde(default)]
    pub players_per_week: u32,
    #[serde(default)]
    pub is_double_play: bool,
    /// explicit per-week play dates; takes precedence over the weekly cadence
    #[serde(default)]
    pub week_play_dates: Option<Vec<PlayDate>>,
    #[serde(default)]
    pub is_archived: bool,
}

impl Division {
    /// number of schedule weeks, defaulted and never zero
    pub fn season_weeks(&self) -> u32 {
        self.total_weeks.unwrap_or(DEFAULT_TOTAL_WEEKS).max(1)
    }
}

/// a team entry holding its recorded weekly payments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// division name reference, resolved against the snapshot
    pub division: String,
    #[serde(default)]
    pub payments: Vec<WeeklyPayment>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// immutable input snapshot for one engine run; never mutated or persisted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub divisions: Vec<Division>,
    pub teams: Vec<Team>,
}

impl LeagueSnapshot {
    /// divisions that participate in totals
    pub fn active_divisions(&self) -> impl Iterator<Item = &Division> {
        self.divisions.iter().filter(|d| !d.is_archived)
    }

    /// teams that participate in totals
    pub fn active_teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(|t| !t.is_archived && t.is_active)
    }

    /// resolve a team's division reference to exactly one division
    ///
    /// match order: exact name, case-insensitive name, then for double-play
    /// divisions either " / "-separated component of the composite
    /// "A - type / B - type" name on either side
    pub fn resolve_division(&self, reference: &str) -> Option<&Division> {
        let reference = reference.trim();

        if let Some(division) = self.active_divisions().find(|d| d.name == reference) {
            return Some(division);
        }

        if let Some(division) = self
            .active_divisions()
            .find(|d| d.name.eq_ignore_ascii_case(reference))
        {
            return Some(division);
        }

        self.active_divisions()
            .filter(|d| d.is_double_play)
            .find(|d| composite_matches(&d.name, reference))
    }
}

/// component-wise match between a composite double-play name and a reference
fn composite_matches(division_name: &str, reference: &str) -> bool {
    let division_parts: Vec<&str> = division_name.split('/').map(str::trim).collect();
    let reference_parts: Vec<&str> = reference.split('/').map(str::trim).collect();

    division_parts
        .iter()
        .any(|part| part.eq_ignore_ascii_case(reference))
        || reference_parts
            .iter()
            .any(|part| part.eq_ignore_ascii_case(division_name))
}
