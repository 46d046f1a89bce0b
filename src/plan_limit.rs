use std::cell::Cell;

use log::debug;

use crate::errors::Result;

/// team capacity assumed when the plan lookup is unavailable
pub const DEFAULT_PLAN_LIMIT: u32 = 16;

/// external lookup of the plan's team capacity per division
pub trait PlanLimitSource {
    fn fetch_team_limit(&self) -> Result<u32>;
}

/// a source with a known fixed capacity
pub struct FixedPlanLimit(pub u32);

impl PlanLimitSource for FixedPlanLimit {
    fn fetch_team_limit(&self) -> Result<u32> {
        Ok(self.0)
    }
}

/// memoizing accessor over a plan-limit source
///
/// the first successful fetch is cached for all later reads; a failed fetch
/// falls back to [`DEFAULT_PLAN_LIMIT`] without poisoning the cache, so a
/// later call may still succeed
pub struct PlanLimitCache {
    source: Box<dyn PlanLimitSource>,
    cached: Cell<Option<u32>>,
}

impl PlanLimitCache {
    pub fn new(source: Box<dyn PlanLimitSource>) -> Self {
        Self {
            source,
            cached: Cell::new(None),
        }
    }

    pub fn fixed(limit: u32) -> Self {
        Self::new(Box::new(FixedPlanLimit(limit)))
    }

    pub fn team_limit(&self) -> u32 {
        if let Some(limit) = self.cached.get() {
            return limit;
        }
        match self.source.fetch_team_limit() {
            Ok(limit) => {
                self.cached.set(Some(limit));
                limit
            }
            Err(err) => {
                debug!("plan limit lookup failed, using default {DEFAULT_PLAN_LIMIT}: {err}");
                DEFAULT_PLAN_LIMIT
            }
        }
    }
}

impl Default for PlanLimitCache {
    fn default() -> Self {
        Self::fixed(DEFAULT_PLAN_LIMIT)
    }
}
