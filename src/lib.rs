pub mod arrears;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod payments;
pub mod period;
pub mod plan_limit;
pub mod schedule;
pub mod snapshot;
pub mod summary;
pub mod types;

// re-export key types
pub use decimal::Money;
pub use engine::{DuesEngine, ReportOptions};
pub use errors::{DuesError, Result};
pub use payments::{expected_weekly_dues, match_payments};
pub use period::{PeriodConfig, PeriodLedger, PeriodTotals, DEFAULT_PAST_WINDOW};
pub use plan_limit::{FixedPlanLimit, PlanLimitCache, PlanLimitSource, DEFAULT_PLAN_LIMIT};
pub use schedule::{is_past_grace, WeekSchedule, GRACE_HOURS};
pub use snapshot::{Division, LeagueSnapshot, Team, DEFAULT_TOTAL_WEEKS};
pub use summary::{DivisionBreakdown, DuesBreakdown, DuesSummary, PeriodBreakdown};
pub use types::{
    DateRange, DivisionId, PaymentStatus, Period, PlayDate, TeamId, WeeklyPayment,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
