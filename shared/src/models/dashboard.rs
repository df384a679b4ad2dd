//! Dashboard Models
//!
//! [`DashboardSummary`] is the client-side derived view produced by
//! [`crate::dashboard`]. [`DashboardSnapshot`] mirrors the backend's
//! `/dashboard/summary` payload as decoded from the wire.

use super::{Allocation, Request, ResourceStatus, Urgency};
use crate::ranking;
use crate::utilization::{TierThresholds, UtilizationTier, utilization_status_tier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Derived summary
// =============================================================================

/// Headline counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub pending_requests: usize,
    pub assigned_requests: usize,
    pub completed_requests: usize,
    /// Pending requests that have entered the server-side queue
    pub queued_requests: usize,
    pub active_allocations: usize,
    pub completed_allocations: usize,
    /// Allocations completed on the same UTC day as the summary
    pub today_completed: usize,
    pub total_resources: usize,
}

/// Per-resource utilization row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUtilization {
    pub resource_id: String,
    pub resource_type: String,
    pub city: String,
    pub capacity: u32,
    pub used: u32,
    pub percentage: i64,
    pub tier: UtilizationTier,
    pub status: ResourceStatus,
}

/// Capacity totals for one city
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCapacity {
    pub total: u32,
    pub used: u32,
    pub available: u32,
}

/// Allocation with its time-based derivations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAllocation {
    #[serde(flatten)]
    pub allocation: Allocation,
    pub progress: u8,
    pub remaining_seconds: i64,
    pub total_duration_seconds: Option<i64>,
}

/// Request counts grouped by urgency and by service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub by_urgency: BTreeMap<Urgency, usize>,
    pub by_service: BTreeMap<String, usize>,
}

/// Read-only dashboard snapshot, recomputed on every refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub resource_utilization: Vec<ResourceUtilization>,
    pub resources_by_city: BTreeMap<String, CityCapacity>,
    /// Pending requests, highest priority first
    pub priority_queue: Vec<Request>,
    /// Newest assignments first
    pub recent_allocations: Vec<RecentAllocation>,
    pub breakdown: Breakdown,
    pub generated_at: DateTime<Utc>,
}

// =============================================================================
// Backend snapshot
// =============================================================================

/// Counters as reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStats {
    pub pending_requests: u64,
    pub active_allocations: u64,
    pub completed_allocations: u64,
    pub total_resources: u64,
    pub today_completed: u64,
    pub queued_requests: u64,
}

/// Backend automation loop intervals (milliseconds)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AutomationConfig {
    pub request_interval: u64,
    pub allocation_interval: u64,
    pub completion_interval: u64,
    pub min_completion_time: u64,
    pub max_completion_time: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomationStatus {
    pub is_running: bool,
    pub config: AutomationConfig,
}

/// Utilization row as computed by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedUtilization {
    pub resource_id: String,
    pub resource_type: String,
    pub city: String,
    pub capacity: u32,
    pub used: u32,
    pub percentage: i64,
    pub status: ResourceStatus,
}

impl ReportedUtilization {
    pub fn tier(&self, thresholds: &TierThresholds) -> UtilizationTier {
        utilization_status_tier(self.percentage, thresholds)
    }
}

/// Allocation row with server-side progress fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedAllocation {
    #[serde(flatten)]
    pub allocation: Allocation,
    pub progress: i64,
    pub remaining_seconds: i64,
    #[serde(default)]
    pub total_duration_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMetadata {
    #[serde(default)]
    pub processing_time: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
}

/// Backend activity log entry; `event_data` varies by event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    pub event_type: String,
    pub event_data: serde_json::Value,
    pub entity_type: String,
    pub entity_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Option<LogMetadata>,
}

/// `_count` object produced by the backend's group-by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub id: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyCount {
    #[serde(rename = "_count")]
    pub count: GroupCount,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCount {
    #[serde(rename = "_count")]
    pub count: GroupCount,
    pub service: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotBreakdown {
    pub by_urgency: Vec<UrgencyCount>,
    pub by_service: Vec<ServiceCount>,
}

/// `/dashboard/summary` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: SnapshotStats,
    #[serde(default)]
    pub automation_status: AutomationStatus,
    #[serde(default)]
    pub resource_utilization: Vec<ReportedUtilization>,
    #[serde(default)]
    pub resources_by_city: BTreeMap<String, CityCapacity>,
    #[serde(default)]
    pub recent_allocations: Vec<ReportedAllocation>,
    #[serde(default)]
    pub recent_logs: Vec<ActivityLog>,
    #[serde(default)]
    pub priority_queue: Vec<Request>,
    #[serde(default)]
    pub breakdown: SnapshotBreakdown,
}

impl DashboardSnapshot {
    /// Priority queue re-ranked locally, independent of server order
    pub fn ranked_queue(&self) -> Vec<Request> {
        ranking::rank(&self.priority_queue)
    }

    pub fn urgency_counts(&self) -> BTreeMap<Urgency, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.breakdown.by_urgency {
            *counts.entry(row.urgency).or_insert(0) += row.count.id;
        }
        counts
    }

    pub fn service_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.breakdown.by_service {
            *counts.entry(row.service.clone()).or_insert(0) += row.count.id;
        }
        counts
    }
}
