//! Data source
//!
//! [`DataSource`] is the seam the dashboard loader fetches through.
//! [`ApiDataSource`] implements it over any [`HttpClient`] and rejects
//! structurally invalid payloads before they reach the core.

use crate::endpoint::{AllocationFilter, Endpoint, ResourceFilter};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientResult};
use async_trait::async_trait;
use shared::models::{Allocation, AllocationStatus, DashboardSnapshot, Request, Resource, ResourceStatus};
use shared::ranking::{AllocationCounts, StatusCounts};
use std::collections::BTreeMap;

/// Supplies raw collections for the dashboard
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_requests(&self) -> ClientResult<Vec<Request>>;

    async fn fetch_resources(&self) -> ClientResult<Vec<Resource>>;

    async fn fetch_allocations(&self) -> ClientResult<Vec<Allocation>>;

    async fn fetch_dashboard_snapshot(&self) -> ClientResult<DashboardSnapshot>;
}

/// REST implementation of [`DataSource`]
#[derive(Debug, Clone)]
pub struct ApiDataSource<C = NetworkHttpClient> {
    http: C,
}

impl ApiDataSource<NetworkHttpClient> {
    /// Build a reqwest-backed source from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?))
    }
}

impl<C: HttpClient> ApiDataSource<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Single request by id
    pub async fn fetch_request_detail(&self, id: &str) -> ClientResult<Request> {
        let request: Request = self.http.get(&Endpoint::RequestDetail(id.to_string())).await?;
        request.validate()?;
        tracing::info!(
            id = %request.id,
            status = %request.status,
            urgency = %request.urgency,
            score = request.priority_score.value(),
            "Fetched request detail"
        );
        Ok(request)
    }

    /// Requests filed by one user
    pub async fn fetch_user_requests(&self, user_id: &str) -> ClientResult<Vec<Request>> {
        let requests = self.get_requests(&Endpoint::UserRequests(user_id.to_string())).await?;
        tracing::info!(user_id, count = requests.len(), "Fetched user requests");
        Ok(requests)
    }

    pub async fn fetch_resources_filtered(&self, filter: ResourceFilter) -> ClientResult<Vec<Resource>> {
        let city = filter.city.clone();
        let status = filter.status;
        let resources = self.get_resources(&Endpoint::Resources(filter)).await?;
        tracing::info!(
            city = city.as_deref().unwrap_or("*"),
            status = status.map_or("*", |s| s.as_str()),
            count = resources.len(),
            "Fetched filtered resources"
        );
        Ok(resources)
    }

    pub async fn fetch_allocations_filtered(
        &self,
        filter: AllocationFilter,
    ) -> ClientResult<Vec<Allocation>> {
        let allocations = self.get_allocations(&Endpoint::Allocations(filter)).await?;
        tracing::info!(
            status = filter.status.map_or("*", |s| s.as_str()),
            count = allocations.len(),
            "Fetched filtered allocations"
        );
        Ok(allocations)
    }

    async fn get_requests(&self, endpoint: &Endpoint) -> ClientResult<Vec<Request>> {
        let requests: Vec<Request> = self.http.get(endpoint).await?;
        requests.iter().try_for_each(Request::validate)?;
        Ok(requests)
    }

    async fn get_resources(&self, endpoint: &Endpoint) -> ClientResult<Vec<Resource>> {
        let resources: Vec<Resource> = self.http.get(endpoint).await?;
        resources.iter().try_for_each(Resource::validate)?;
        Ok(resources)
    }

    async fn get_allocations(&self, endpoint: &Endpoint) -> ClientResult<Vec<Allocation>> {
        let allocations: Vec<Allocation> = self.http.get(endpoint).await?;
        allocations.iter().try_for_each(Allocation::validate)?;
        Ok(allocations)
    }
}

#[async_trait]
impl<C: HttpClient> DataSource for ApiDataSource<C> {
    async fn fetch_requests(&self) -> ClientResult<Vec<Request>> {
        let requests = self.get_requests(&Endpoint::Requests).await?;
        log_requests(&requests);
        Ok(requests)
    }

    async fn fetch_resources(&self) -> ClientResult<Vec<Resource>> {
        let resources = self
            .get_resources(&Endpoint::Resources(ResourceFilter::default()))
            .await?;
        log_resources(&resources);
        Ok(resources)
    }

    async fn fetch_allocations(&self) -> ClientResult<Vec<Allocation>> {
        let allocations = self
            .get_allocations(&Endpoint::Allocations(AllocationFilter::default()))
            .await?;
        log_allocations(&allocations);
        Ok(allocations)
    }

    async fn fetch_dashboard_snapshot(&self) -> ClientResult<DashboardSnapshot> {
        let snapshot: DashboardSnapshot = self.http.get(&Endpoint::DashboardSummary).await?;
        snapshot.priority_queue.iter().try_for_each(Request::validate)?;
        snapshot
            .recent_allocations
            .iter()
            .try_for_each(|row| row.allocation.validate())?;
        tracing::info!(
            pending = snapshot.stats.pending_requests,
            active = snapshot.stats.active_allocations,
            today_completed = snapshot.stats.today_completed,
            automation_running = snapshot.automation_status.is_running,
            "Fetched dashboard snapshot"
        );
        Ok(snapshot)
    }
}

// ==================== Log summaries ====================

fn average_score(scores: impl Iterator<Item = u8>) -> u64 {
    let (sum, count) = scores.fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));
    if count == 0 { 0 } else { sum / count }
}

fn log_requests(requests: &[Request]) {
    let counts = StatusCounts::of(requests);
    tracing::info!(
        total = counts.total,
        pending = counts.pending,
        assigned = counts.assigned,
        completed = counts.completed,
        avg_score = average_score(requests.iter().map(|r| r.priority_score.value())),
        "Fetched requests"
    );
}

fn log_resources(resources: &[Resource]) {
    let mut by_city: BTreeMap<&str, usize> = BTreeMap::new();
    for resource in resources {
        *by_city.entry(resource.city.as_str()).or_insert(0) += 1;
    }
    let available = resources
        .iter()
        .filter(|r| r.status == ResourceStatus::Available)
        .count();
    let drifting = resources.iter().filter(|r| r.utilization_drift().is_some()).count();

    tracing::info!(
        total = resources.len(),
        available,
        busy = resources.len() - available,
        ?by_city,
        "Fetched resources"
    );
    if drifting > 0 {
        tracing::debug!(drifting, "Server-reported utilization differs from derived value");
    }
}

fn log_allocations(allocations: &[Allocation]) {
    let counts = AllocationCounts::of(allocations);
    let mut by_city: BTreeMap<&str, usize> = BTreeMap::new();
    for allocation in allocations.iter().filter(|a| a.status == AllocationStatus::Assigned) {
        if let Some(city) = allocation.resource_city() {
            *by_city.entry(city).or_insert(0) += 1;
        }
    }

    tracing::info!(
        total = counts.total,
        assigned = counts.assigned,
        completed = counts.completed,
        avg_score = average_score(allocations.iter().map(|a| a.priority_score.value())),
        ?by_city,
        "Fetched allocations"
    );
}
