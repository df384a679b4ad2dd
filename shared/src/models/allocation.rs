//! Allocation Model
//!
//! An allocation is a join record binding one request to one resource for a
//! bounded period. It references both sides and owns neither.

use super::{PriorityScore, Request, Resource};
use crate::error::{DomainError, DomainResult};
use crate::utilization;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allocation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStatus {
    Assigned,
    Completed,
}

impl AllocationStatus {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "ASSIGNED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Assigned => "Assigned",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Allocation of a request onto a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub id: String,
    pub request_id: String,
    pub resource_id: String,
    /// Copied from the request at assignment time
    pub priority_score: PriorityScore,
    pub status: AllocationStatus,
    /// Assignment time
    #[serde(rename = "timestamp")]
    pub assigned_at: DateTime<Utc>,
    #[serde(default)]
    pub expected_completion_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Box<Request>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Box<Resource>>,
}

impl Allocation {
    /// Reject structurally invalid values (empty identifiers)
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::missing_identifier("allocation"));
        }
        if self.request_id.trim().is_empty() {
            return Err(DomainError::missing_identifier("allocation.requestId"));
        }
        if self.resource_id.trim().is_empty() {
            return Err(DomainError::missing_identifier("allocation.resourceId"));
        }
        if let Some(request) = &self.request {
            request.validate()?;
        }
        if let Some(resource) = &self.resource {
            resource.validate()?;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == AllocationStatus::Assigned
    }

    /// Time-based progress in `0..=100`; completed allocations report 100
    pub fn progress(&self, now: DateTime<Utc>) -> u8 {
        match self.status {
            AllocationStatus::Completed => 100,
            AllocationStatus::Assigned => {
                utilization::allocation_progress(self.assigned_at, self.expected_completion_at, now)
            }
        }
    }

    /// Whole seconds until the expected completion; 0 once completed
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.status {
            AllocationStatus::Completed => 0,
            AllocationStatus::Assigned => {
                utilization::remaining_seconds(self.expected_completion_at, now)
            }
        }
    }

    /// Length of the planned assignment window in whole seconds
    pub fn total_duration_seconds(&self) -> Option<i64> {
        self.expected_completion_at
            .map(|expected| (expected - self.assigned_at).num_seconds().max(0))
    }

    /// City of the assigned resource, when embedded
    pub fn resource_city(&self) -> Option<&str> {
        self.resource.as_deref().map(|r| r.city.as_str())
    }
}
