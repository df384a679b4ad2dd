//! Shared types for the allocation dashboard
//!
//! Domain model, ranking, utilization math and dashboard aggregation.
//! Everything here is synchronous and pure; fetching lives in `alloc-client`.

pub mod dashboard;
pub mod error;
pub mod models;
pub mod ranking;
pub mod response;
pub mod utilization;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use dashboard::{DashboardAggregator, DashboardOptions, build_summary};
pub use error::{DomainError, DomainResult};
pub use ranking::{Ranked, RequestFilter, rank};
pub use response::ApiErrorBody;
pub use utilization::{TierThresholds, UtilizationTier};
