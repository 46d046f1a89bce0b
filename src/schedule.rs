use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::snapshot::Division;

/// hours after a week's play date before its payment counts as delinquent
pub const GRACE_HOURS: i64 = 24;

/// true once at least 24 hours have passed since the play date's UTC midnight
pub fn is_past_grace(play_date: NaiveDate, now: DateTime<Utc>) -> bool {
    let played_at = Utc.from_utc_datetime(&play_date.and_time(NaiveTime::MIN));
    now >= played_at + Duration::hours(GRACE_HOURS)
}

/// resolved weekly schedule for one division at a fixed moment
///
/// explicit per-week play-date overrides take precedence over the weekly
/// cadence everywhere, including the due-week grace check; a week with no
/// resolvable date never delays the due week and never creates lateness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSchedule {
    total_weeks: u32,
    /// index 0 holds week 1; `None` marks a no-play or unresolvable week
    play_dates: Vec<Option<NaiveDate>>,
    calendar_week: u32,
    due_week: u32,
}

impl WeekSchedule {
    pub fn resolve(division: &Division, now: DateTime<Utc>) -> Self {
        let total_weeks = division.season_weeks();
        let play_dates: Vec<Option<NaiveDate>> = (1..=total_weeks)
            .map(|week| play_date_for_week(division, week))
            .collect();

        let calendar_week = match division.start_date {
            None => 1,
            Some(start) => {
                let elapsed_days = (now.date_naive() - start).num_days();
                let weeks = elapsed_days.div_euclid(7) + 1;
                weeks.clamp(1, total_weeks as i64) as u32
            }
        };

        // a week's payment isn't delinquent until a day after it was played
        let due_week = match play_dates[calendar_week as usize - 1] {
            Some(play_date) if !is_past_grace(play_date, now) => calendar_week - 1,
            _ => calendar_week,
        };

        Self {
            total_weeks,
            play_dates,
            calendar_week,
            due_week,
        }
    }

    /// week index implied purely by elapsed time since the start date
    pub fn calendar_week(&self) -> u32 {
        self.calendar_week
    }

    /// last week for which payment is currently expected; 0 means none yet
    pub fn due_week(&self) -> u32 {
        self.due_week
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    /// resolved play date for a 1-based week, if any
    pub fn play_date(&self, week: u32) -> Option<NaiveDate> {
        if week == 0 || week > self.total_weeks {
            return None;
        }
        self.play_dates[week as usize - 1]
    }
}

/// play date for a 1-based week: override list first, weekly cadence otherwise
fn play_date_for_week(division: &Division, week: u32) -> Option<NaiveDate> {
    if let Some(overrides) = &division.week_play_dates {
        return overrides
            .get(week as usize - 1)
            .and_then(|entry| entry.as_date());
    }
    division
        .start_date
        .map(|start| start + Duration::days(7 * (week as i64 - 1)))
}
