pub mod matcher;
pub mod obligation;

pub use matcher::match_payments;
pub use obligation::expected_weekly_dues;
