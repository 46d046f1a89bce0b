use chrono::NaiveDate;
use thiserror::Error;

use crate::types::TeamId;

#[derive(Error, Debug)]
pub enum DuesError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("division reference not resolvable: team {team_id} references {reference:?}")]
    UnresolvedDivision {
        team_id: TeamId,
        reference: String,
    },

    #[error("plan limit lookup failed: {message}")]
    PlanLimitUnavailable {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, DuesError>;
