//! Allocation Client - REST data source for the allocation dashboard
//!
//! Fetches requests, resources and allocations from the backend and hands
//! them to the pure aggregation code in `shared`.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod loader;
pub mod logger;
pub mod source;

pub use config::ClientConfig;
pub use endpoint::{AllocationFilter, Endpoint, ResourceFilter};
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use loader::DashboardLoader;
pub use source::{ApiDataSource, DataSource};

// Re-export shared types for convenience
pub use shared::models::{Allocation, DashboardSnapshot, DashboardSummary, Request, Resource};
