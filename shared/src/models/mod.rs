//! Data models
//!
//! One canonical shape per entity. Nested relations (a request's allocation,
//! an allocation's request/resource, a resource's allocations) are optional
//! because each endpoint embeds a different subset.

pub mod allocation;
pub mod dashboard;
pub mod request;
pub mod resource;
pub mod user;

// Re-exports
pub use allocation::*;
pub use dashboard::*;
pub use request::*;
pub use resource::*;
pub use user::*;
