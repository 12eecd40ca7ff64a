//! Application-level configuration.
//!
//! - [`SchedulerParams`]: demand scheduler cadence, pool target and generator timeout

pub mod scheduler_params;

pub use scheduler_params::SchedulerParams;
