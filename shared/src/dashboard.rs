//! Dashboard Aggregator
//!
//! Combines ranking and utilization outputs into a [`DashboardSummary`].
//! The aggregator holds no state besides its options: the same inputs and
//! `now` always produce the same summary.

use crate::models::{
    Allocation, AllocationStatus, Breakdown, CityCapacity, DashboardStats, DashboardSummary,
    RecentAllocation, Request, RequestStatus, Resource, ResourceUtilization,
};
use crate::ranking;
use crate::utilization::{TierThresholds, utilization_percent, utilization_status_tier};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Default number of entries in the recent allocations list
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Aggregation knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub thresholds: TierThresholds,
    pub recent_limit: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::DASHBOARD,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl DashboardOptions {
    pub fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }
}

/// Builds [`DashboardSummary`] values
#[derive(Debug, Clone, Default)]
pub struct DashboardAggregator {
    options: DashboardOptions,
}

impl DashboardAggregator {
    pub fn new(options: DashboardOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    /// Build a summary from freshly fetched collections
    pub fn build(
        &self,
        requests: &[Request],
        resources: &[Resource],
        allocations: &[Allocation],
        now: DateTime<Utc>,
    ) -> DashboardSummary {
        let mut stats = DashboardStats {
            total_resources: resources.len(),
            ..Default::default()
        };
        let mut breakdown = Breakdown::default();

        for request in requests {
            match request.status {
                RequestStatus::Pending => {
                    stats.pending_requests += 1;
                    if request.is_queued() {
                        stats.queued_requests += 1;
                    }
                }
                RequestStatus::Assigned => stats.assigned_requests += 1,
                RequestStatus::Completed => stats.completed_requests += 1,
            }
            *breakdown.by_urgency.entry(request.urgency).or_insert(0) += 1;
            *breakdown
                .by_service
                .entry(request.service.clone())
                .or_insert(0) += 1;
        }

        let today = now.date_naive();
        for allocation in allocations {
            match allocation.status {
                AllocationStatus::Assigned => stats.active_allocations += 1,
                AllocationStatus::Completed => {
                    stats.completed_allocations += 1;
                    if allocation
                        .completed_at
                        .is_some_and(|done| done.date_naive() == today)
                    {
                        stats.today_completed += 1;
                    }
                }
            }
        }

        let active = active_by_resource(resources, allocations);
        let resource_utilization: Vec<ResourceUtilization> = resources
            .iter()
            .map(|resource| {
                let used = active.get(resource.id.as_str()).map_or(0, |ids| ids.len() as u32);
                let percentage = utilization_percent(i64::from(used), i64::from(resource.capacity));
                ResourceUtilization {
                    resource_id: resource.id.clone(),
                    resource_type: resource.resource_type.clone(),
                    city: resource.city.clone(),
                    capacity: resource.capacity,
                    used,
                    percentage,
                    tier: utilization_status_tier(percentage, &self.options.thresholds),
                    status: resource.status,
                }
            })
            .collect();

        let mut resources_by_city: BTreeMap<String, CityCapacity> = BTreeMap::new();
        for row in &resource_utilization {
            let city = resources_by_city.entry(row.city.clone()).or_default();
            city.total = city.total.saturating_add(row.capacity);
            city.used = city.used.saturating_add(row.used);
            city.available = city
                .available
                .saturating_add(row.capacity.saturating_sub(row.used));
        }

        let priority_queue =
            ranking::rank(&ranking::filter_by_status(requests, Some(RequestStatus::Pending)));

        let summary = DashboardSummary {
            stats,
            resource_utilization,
            resources_by_city,
            priority_queue,
            recent_allocations: self.recent_allocations(allocations, now),
            breakdown,
            generated_at: now,
        };

        tracing::debug!(
            pending = summary.stats.pending_requests,
            active = summary.stats.active_allocations,
            resources = summary.stats.total_resources,
            "Dashboard summary built"
        );
        summary
    }

    fn recent_allocations(
        &self,
        allocations: &[Allocation],
        now: DateTime<Utc>,
    ) -> Vec<RecentAllocation> {
        let mut newest_first: Vec<&Allocation> = allocations.iter().collect();
        newest_first.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));

        newest_first
            .into_iter()
            .take(self.options.recent_limit)
            .map(|allocation| RecentAllocation {
                progress: allocation.progress(now),
                remaining_seconds: allocation.remaining_seconds(now),
                total_duration_seconds: allocation.total_duration_seconds(),
                allocation: allocation.clone(),
            })
            .collect()
    }
}

/// Assigned allocation ids per resource, from the allocation list and from
/// allocations embedded in each resource. An id seen in both counts once.
fn active_by_resource<'a>(
    resources: &'a [Resource],
    allocations: &'a [Allocation],
) -> HashMap<&'a str, BTreeSet<&'a str>> {
    let mut active: HashMap<&str, BTreeSet<&str>> = HashMap::new();

    let embedded = resources
        .iter()
        .flat_map(|r| r.allocations.iter().map(move |a| (r.id.as_str(), a)));
    let listed = allocations.iter().map(|a| (a.resource_id.as_str(), a));

    for (resource_id, allocation) in embedded.chain(listed) {
        if allocation.is_active() {
            active
                .entry(resource_id)
                .or_default()
                .insert(allocation.id.as_str());
        }
    }
    active
}

/// [`DashboardAggregator::build`] with default options
pub fn build_summary(
    requests: &[Request],
    resources: &[Resource],
    allocations: &[Allocation],
    now: DateTime<Utc>,
) -> DashboardSummary {
    DashboardAggregator::default().build(requests, resources, allocations, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriorityScore, ResourceStatus, Urgency};
    use crate::utilization::UtilizationTier;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    fn request(id: &str, score: i64, status: RequestStatus, urgency: Urgency, service: &str) -> Request {
        Request {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            service: service.to_string(),
            request_type: "CONNECTION_ISSUE".to_string(),
            urgency,
            status,
            priority_score: PriorityScore::new(score),
            created_at: now() - Duration::hours(1),
            queued_at: None,
            processed_at: None,
            user: None,
            allocation: None,
        }
    }

    fn resource(id: &str, capacity: u32, city: &str) -> Resource {
        Resource {
            id: id.to_string(),
            resource_type: "TECHNICAL_TEAM".to_string(),
            capacity,
            city: city.to_string(),
            status: ResourceStatus::Busy,
            allocations: vec![],
            reported_active: None,
            reported_utilization: None,
        }
    }

    fn allocation(id: &str, resource_id: &str, status: AllocationStatus, minutes_ago: i64) -> Allocation {
        let assigned_at = now() - Duration::minutes(minutes_ago);
        Allocation {
            id: id.to_string(),
            request_id: format!("req-{id}"),
            resource_id: resource_id.to_string(),
            priority_score: PriorityScore::new(50),
            status,
            assigned_at,
            expected_completion_at: Some(assigned_at + Duration::minutes(10)),
            completed_at: match status {
                AllocationStatus::Completed => Some(assigned_at + Duration::minutes(5)),
                AllocationStatus::Assigned => None,
            },
            request: None,
            resource: None,
        }
    }

    fn assigned(prefix: &str, resource_id: &str, count: usize) -> Vec<Allocation> {
        (0..count)
            .map(|i| allocation(&format!("{prefix}{i}"), resource_id, AllocationStatus::Assigned, 2))
            .collect()
    }

    #[test]
    fn test_over_capacity_resources_are_critical() {
        let resources = vec![resource("res-a", 5, "Istanbul"), resource("res-b", 4, "Ankara")];
        let mut allocations = assigned("a", "res-a", 5);
        allocations.extend(assigned("b", "res-b", 5));

        let summary = build_summary(&[], &resources, &allocations, now());
        let percentages: Vec<_> = summary.resource_utilization.iter().map(|r| r.percentage).collect();
        let tiers: Vec<_> = summary.resource_utilization.iter().map(|r| r.tier).collect();

        assert_eq!(percentages, vec![100, 125]);
        assert_eq!(tiers, vec![UtilizationTier::Critical, UtilizationTier::Critical]);
        assert_eq!(summary.resources_by_city["Ankara"], CityCapacity { total: 4, used: 5, available: 0 });
    }

    #[test]
    fn test_embedded_and_listed_allocations_count_once() {
        let mut res = resource("res-a", 4, "Izmir");
        res.allocations = assigned("x", "res-a", 2);
        let mut listed = assigned("x", "res-a", 2);
        listed.push(allocation("y", "res-a", AllocationStatus::Assigned, 1));
        listed.push(allocation("z", "res-a", AllocationStatus::Completed, 30));

        let summary = build_summary(&[], &[res], &listed, now());
        let row = &summary.resource_utilization[0];

        assert_eq!(row.used, 3);
        assert_eq!(row.percentage, 75);
        assert_eq!(row.tier, UtilizationTier::Warning);
    }

    #[test]
    fn test_counts_queue_and_breakdown() {
        let mut queued = request("R4", 10, RequestStatus::Pending, Urgency::Low, "TV+");
        queued.queued_at = Some(now());
        let requests = vec![
            request("R1", 60, RequestStatus::Pending, Urgency::High, "Superonline"),
            request("R2", 90, RequestStatus::Assigned, Urgency::High, "Superonline"),
            request("R3", 80, RequestStatus::Completed, Urgency::Medium, "Paycell"),
            queued,
        ];
        let allocations = vec![
            allocation("a1", "res-a", AllocationStatus::Assigned, 3),
            allocation("a2", "res-a", AllocationStatus::Completed, 20),
            allocation("a3", "res-a", AllocationStatus::Completed, 60 * 24),
        ];

        let summary = build_summary(&requests, &[resource("res-a", 3, "Istanbul")], &allocations, now());

        assert_eq!(
            summary.stats,
            DashboardStats {
                pending_requests: 2,
                assigned_requests: 1,
                completed_requests: 1,
                queued_requests: 1,
                active_allocations: 1,
                completed_allocations: 2,
                today_completed: 1,
                total_resources: 1,
            }
        );

        let queue: Vec<_> = summary.priority_queue.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(queue, vec!["R1", "R4"]);

        assert_eq!(summary.breakdown.by_urgency[&Urgency::High], 2);
        assert_eq!(summary.breakdown.by_urgency.get(&Urgency::Medium), Some(&1));
        assert_eq!(summary.breakdown.by_service["Superonline"], 2);
        assert_eq!(summary.generated_at, now());
    }

    #[test]
    fn test_recent_allocations_newest_first_and_capped() {
        let allocations: Vec<_> = (0..8)
            .map(|i| allocation(&format!("a{i}"), "res-a", AllocationStatus::Assigned, 8 - i))
            .collect();

        let summary = build_summary(&[], &[], &allocations, now());
        let ids: Vec<_> = summary.recent_allocations.iter().map(|r| r.allocation.id.as_str()).collect();
        assert_eq!(ids, vec!["a7", "a6", "a5", "a4", "a3"]);

        let newest = &summary.recent_allocations[0];
        assert_eq!(newest.progress, 10);
        assert_eq!(newest.remaining_seconds, 9 * 60);
        assert_eq!(newest.total_duration_seconds, Some(600));

        let aggregator = DashboardAggregator::new(DashboardOptions::default().with_recent_limit(2));
        assert_eq!(aggregator.build(&[], &[], &allocations, now()).recent_allocations.len(), 2);
    }

    #[test]
    fn test_custom_thresholds() {
        let resources = vec![resource("res-a", 4, "Istanbul")];
        let allocations = assigned("a", "res-a", 3);

        let dashboard = build_summary(&[], &resources, &allocations, now());
        assert_eq!(dashboard.resource_utilization[0].tier, UtilizationTier::Warning);

        let strict = DashboardAggregator::new(
            DashboardOptions::default().with_thresholds(TierThresholds::new(50, 70)),
        );
        let summary = strict.build(&[], &resources, &allocations, now());
        assert_eq!(summary.resource_utilization[0].tier, UtilizationTier::Critical);
    }

    #[test]
    fn test_city_totals_saturate() {
        let resources = vec![
            resource("res-a", 3_000_000_000, "Istanbul"),
            resource("res-b", 3_000_000_000, "Istanbul"),
        ];
        let allocations = assigned("a", "res-a", 2);

        let summary = build_summary(&[], &resources, &allocations, now());
        assert_eq!(
            summary.resources_by_city["Istanbul"],
            CityCapacity { total: u32::MAX, used: 2, available: u32::MAX }
        );
        assert_eq!(summary.resource_utilization[0].percentage, 0);
    }

    #[test]
    fn test_empty_inputs() {
        let summary = build_summary(&[], &[], &[], now());

        assert_eq!(summary.stats, DashboardStats::default());
        assert!(summary.resource_utilization.is_empty());
        assert!(summary.resources_by_city.is_empty());
        assert!(summary.priority_queue.is_empty());
        assert!(summary.recent_allocations.is_empty());
        assert_eq!(summary.breakdown, Breakdown::default());
    }

    #[test]
    fn test_summary_is_reproducible() {
        let requests = vec![
            request("R1", 60, RequestStatus::Pending, Urgency::High, "Superonline"),
            request("R2", 60, RequestStatus::Pending, Urgency::Low, "Paycell"),
        ];
        let resources = vec![resource("res-a", 0, "Istanbul")];
        let allocations = assigned("a", "res-a", 1);

        let first = build_summary(&requests, &resources, &allocations, now());
        let second = build_summary(&requests, &resources, &allocations, now());
        assert_eq!(first, second);
        assert_eq!(first.resource_utilization[0].percentage, 0);
    }
}
