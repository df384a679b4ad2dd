//! Resource Model (field teams, technicians, support desks)

use super::{Allocation, AllocationStatus};
use crate::error::{DomainError, DomainResult};
use crate::utilization;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceStatus {
    Available,
    Busy,
}

impl ResourceStatus {
    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Busy => "BUSY",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Busy => "Busy",
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource that requests are allocated onto
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub resource_type: String,
    /// Concurrent allocations this resource is expected to handle.
    /// `used() <= capacity` is expected but not enforced.
    pub capacity: u32,
    pub city: String,
    pub status: ResourceStatus,
    /// Allocations embedded by the resources endpoint; empty elsewhere
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allocations: Vec<Allocation>,
    /// Server-reported active count (diagnostics only)
    #[serde(default, rename = "activeAllocations", skip_serializing_if = "Option::is_none")]
    pub reported_active: Option<u32>,
    /// Server-reported utilization (diagnostics only)
    #[serde(default, rename = "utilization", skip_serializing_if = "Option::is_none")]
    pub reported_utilization: Option<i64>,
}

impl Resource {
    /// Reject structurally invalid values (empty identifiers)
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::missing_identifier("resource"));
        }
        for allocation in &self.allocations {
            allocation.validate()?;
        }
        Ok(())
    }

    /// Number of active (assigned) allocations
    pub fn used(&self) -> u32 {
        self.allocations
            .iter()
            .filter(|a| a.status == AllocationStatus::Assigned)
            .count() as u32
    }

    /// Capacity left before the resource is full (never negative)
    pub fn available(&self) -> u32 {
        self.capacity.saturating_sub(self.used())
    }

    /// Utilization percentage; values above 100 signal over-capacity
    pub fn utilization(&self) -> i64 {
        utilization::utilization_percent(i64::from(self.used()), i64::from(self.capacity))
    }

    /// Whether the derived utilization disagrees with what the server reported
    pub fn utilization_drift(&self) -> Option<i64> {
        self.reported_utilization
            .map(|reported| self.utilization() - reported)
            .filter(|drift| *drift != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCE_JSON: &str = r#"{
        "id": "res-1",
        "resourceType": "TECHNICAL_TEAM",
        "capacity": 4,
        "city": "Izmir",
        "status": "BUSY",
        "allocations": [
            {
                "id": "a1", "requestId": "r1", "resourceId": "res-1",
                "priorityScore": 90, "status": "ASSIGNED",
                "timestamp": "2026-01-15T10:00:00Z"
            },
            {
                "id": "a2", "requestId": "r2", "resourceId": "res-1",
                "priorityScore": 60, "status": "ASSIGNED",
                "timestamp": "2026-01-15T10:05:00Z"
            },
            {
                "id": "a3", "requestId": "r3", "resourceId": "res-1",
                "priorityScore": 40, "status": "ASSIGNED",
                "timestamp": "2026-01-15T10:07:00Z"
            }
        ],
        "activeAllocations": 3,
        "utilization": 70
    }"#;

    #[test]
    fn test_resource_decodes_full_payload() {
        let resource: Resource = serde_json::from_str(RESOURCE_JSON).unwrap();

        assert_eq!(resource.capacity, 4);
        assert_eq!(resource.status, ResourceStatus::Busy);
        assert_eq!(resource.used(), 3);
        assert_eq!(resource.available(), 1);
        assert_eq!(resource.utilization(), 75);
        assert_eq!(resource.reported_active, Some(3));
        assert_eq!(resource.utilization_drift(), Some(5));
    }

    #[test]
    fn test_resource_without_allocations() {
        let json = r#"{
            "id": "res-2",
            "resourceType": "SUPPORT_DESK",
            "capacity": 0,
            "city": "Bursa",
            "status": "AVAILABLE"
        }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();

        assert!(resource.allocations.is_empty());
        assert_eq!(resource.utilization(), 0);
        assert_eq!(resource.available(), 0);
        assert_eq!(resource.utilization_drift(), None);
    }

    #[test]
    fn test_negative_capacity_fails_decoding() {
        let json = RESOURCE_JSON.replace("\"capacity\": 4", "\"capacity\": -1");
        assert!(serde_json::from_str::<Resource>(&json).is_err());
    }
}
