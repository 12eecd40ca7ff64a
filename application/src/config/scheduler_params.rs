//! Scheduler parameters: demand loop control.
//!
//! [`SchedulerParams`] groups the static parameters that control the
//! [`DemandSchedulerUseCase`](crate::use_cases::demand_scheduler::DemandSchedulerUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Demand loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerParams {
    /// Time between iterations.
    pub interval: Duration,
    /// Evaluating generations wanted per (subject, category) pair.
    pub target_pool_size: usize,
    /// Upper bound on texts requested per pair per iteration.
    pub requests_per_pair: usize,
    /// How long a single generator call may take.
    pub generator_timeout: Duration,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            target_pool_size: 5,
            requests_per_pair: 1,
            generator_timeout: Duration::from_secs(60),
        }
    }
}

impl SchedulerParams {
    // ==================== Builder Methods ====================

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_target_pool_size(mut self, target: usize) -> Self {
        self.target_pool_size = target;
        self
    }

    pub fn with_requests_per_pair(mut self, requests: usize) -> Self {
        self.requests_per_pair = requests;
        self
    }

    pub fn with_generator_timeout(mut self, timeout: Duration) -> Self {
        self.generator_timeout = timeout;
        self
    }
}
