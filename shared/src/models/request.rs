//! Service Request Model

use super::{Allocation, User};
use crate::error::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency level attached to a request (independent of the priority score)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// All urgency levels, lowest first
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request lifecycle status.
///
/// Transitions are monotonic: `PENDING -> ASSIGNED -> COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Assigned,
    Completed,
}

impl RequestStatus {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Assigned => "ASSIGNED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Assigned => "Assigned",
            Self::Completed => "Completed",
        }
    }

    /// Check whether moving to `next` keeps the lifecycle monotonic
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        next >= *self
    }

    /// Move to `next`, rejecting any step backwards
    pub fn transition_to(self, next: RequestStatus) -> DomainResult<RequestStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority score, always within `0..=100`.
///
/// Out-of-range wire values are clamped on decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct PriorityScore(u8);

impl PriorityScore {
    pub const MIN: PriorityScore = PriorityScore(0);
    pub const MAX: PriorityScore = PriorityScore(100);

    /// Create a score, clamping into `0..=100`
    pub fn new(value: i64) -> Self {
        let clamped = value.clamp(0, 100);
        if clamped != value {
            tracing::warn!(value, clamped, "Priority score out of range, clamped");
        }
        Self(clamped as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<i64> for PriorityScore {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<PriorityScore> for i64 {
    fn from(score: PriorityScore) -> Self {
        i64::from(score.0)
    }
}

impl fmt::Display for PriorityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

/// Service request waiting in (or processed through) the allocation queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: String,
    pub user_id: String,
    pub service: String,
    pub request_type: String,
    pub urgency: Urgency,
    pub status: RequestStatus,
    /// Absent on requests embedded inside allocations; defaults to 0
    #[serde(default)]
    pub priority_score: PriorityScore,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub queued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
    /// Embedded requesting user (present on most endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Active allocation, once assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<Box<Allocation>>,
}

impl Request {
    /// Reject structurally invalid values (empty identifiers)
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::missing_identifier("request"));
        }
        if self.user_id.trim().is_empty() {
            return Err(DomainError::missing_identifier("request.userId"));
        }
        if let Some(allocation) = &self.allocation {
            allocation.validate()?;
        }
        Ok(())
    }

    /// Whether the request is still waiting for a resource
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Whether the request has been placed into the server-side queue
    pub fn is_queued(&self) -> bool {
        self.queued_at.is_some()
    }
}
