//! Ranking Engine
//!
//! Deterministic queue ordering and single-field filters. Filters never
//! reorder their input and `None` always means "no filter", so any chain of
//! filters commutes.

use crate::models::{
    Allocation, AllocationStatus, PriorityScore, Request, RequestStatus, Resource, ResourceStatus,
    Urgency,
};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Anything that can sit in a priority queue
pub trait Ranked {
    fn priority_score(&self) -> PriorityScore;

    /// Timestamp used to break score ties (earlier first)
    fn ranked_at(&self) -> DateTime<Utc>;
}

impl Ranked for Request {
    fn priority_score(&self) -> PriorityScore {
        self.priority_score
    }

    fn ranked_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Ranked for Allocation {
    fn priority_score(&self) -> PriorityScore {
        self.priority_score
    }

    fn ranked_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }
}

/// Queue ordering: higher score first, then earlier timestamp first
pub fn queue_order<T: Ranked>(a: &T, b: &T) -> Ordering {
    b.priority_score()
        .cmp(&a.priority_score())
        .then_with(|| a.ranked_at().cmp(&b.ranked_at()))
}

/// Sort by priority score descending, ties broken by earlier timestamp.
///
/// The sort is stable, so items equal on both keys keep their input order.
pub fn rank<T: Ranked + Clone>(items: &[T]) -> Vec<T> {
    let mut ranked = items.to_vec();
    ranked.sort_by(queue_order);
    ranked
}

// ==================== Filters ====================

fn filter_by<'a, T, K>(items: &'a [T], wanted: Option<K>, key: impl Fn(&'a T) -> K) -> Vec<T>
where
    T: Clone,
    K: PartialEq,
{
    match wanted {
        None => items.to_vec(),
        Some(wanted) => items.iter().filter(|item| key(*item) == wanted).cloned().collect(),
    }
}

/// Keep requests with the given status; identity when `None`
pub fn filter_by_status(requests: &[Request], status: Option<RequestStatus>) -> Vec<Request> {
    filter_by(requests, status, |r| r.status)
}

/// Keep requests with the given urgency; identity when `None`
pub fn filter_by_urgency(requests: &[Request], urgency: Option<Urgency>) -> Vec<Request> {
    filter_by(requests, urgency, |r| r.urgency)
}

/// Keep resources in the given city (case-sensitive); identity when `None`
pub fn filter_by_city(resources: &[Resource], city: Option<&str>) -> Vec<Resource> {
    filter_by(resources, city, |r| r.city.as_str())
}

/// Keep resources with the given availability; identity when `None`
pub fn filter_resources_by_status(
    resources: &[Resource],
    status: Option<ResourceStatus>,
) -> Vec<Resource> {
    filter_by(resources, status, |r| r.status)
}

/// Keep allocations with the given status; identity when `None`
pub fn filter_allocations_by_status(
    allocations: &[Allocation],
    status: Option<AllocationStatus>,
) -> Vec<Allocation> {
    filter_by(allocations, status, |a| a.status)
}

/// Combined request filter for queue screens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub urgency: Option<Urgency>,
}

impl RequestFilter {
    pub fn new(status: Option<RequestStatus>, urgency: Option<Urgency>) -> Self {
        Self { status, urgency }
    }

    /// Pending requests only
    pub fn pending() -> Self {
        Self::new(Some(RequestStatus::Pending), None)
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Filter, then rank
    pub fn apply(&self, requests: &[Request]) -> Vec<Request> {
        let by_status = filter_by_status(requests, self.status);
        rank(&filter_by_urgency(&by_status, self.urgency))
    }
}

// ==================== Counts ====================

/// Request counts per status (filter-chip badges)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub assigned: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn of(requests: &[Request]) -> Self {
        requests.iter().fold(Self::default(), |mut counts, request| {
            counts.total += 1;
            match request.status {
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Assigned => counts.assigned += 1,
                RequestStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: Option<RequestStatus>) -> usize {
        match status {
            None => self.total,
            Some(RequestStatus::Pending) => self.pending,
            Some(RequestStatus::Assigned) => self.assigned,
            Some(RequestStatus::Completed) => self.completed,
        }
    }
}

/// Allocation counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationCounts {
    pub total: usize,
    pub assigned: usize,
    pub completed: usize,
}

impl AllocationCounts {
    pub fn of(allocations: &[Allocation]) -> Self {
        allocations.iter().fold(Self::default(), |mut counts, allocation| {
            counts.total += 1;
            match allocation.status {
                AllocationStatus::Assigned => counts.assigned += 1,
                AllocationStatus::Completed => counts.completed += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: Option<AllocationStatus>) -> usize {
        match status {
            None => self.total,
            Some(AllocationStatus::Assigned) => self.assigned,
            Some(AllocationStatus::Completed) => self.completed,
        }
    }
}

/// Distinct cities, sorted
pub fn cities(resources: &[Resource]) -> Vec<String> {
    resources
        .iter()
        .map(|r| r.city.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
