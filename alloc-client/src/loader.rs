//! Dashboard loader
//!
//! Fetches the three collections concurrently and builds a
//! [`DashboardSummary`] only when all of them succeed. Each refresh takes a
//! generation number; a refresh that finishes after a newer one started is
//! discarded with [`ClientError::Superseded`].

use crate::source::DataSource;
use crate::{ClientError, ClientResult};
use chrono::{DateTime, Utc};
use shared::models::DashboardSummary;
use shared::{DashboardAggregator, DashboardOptions};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Fetches the three lists concurrently and aggregates them into a
/// [`DashboardSummary`]. Each refresh takes a generation number; a refresh
/// overtaken by a newer one fails with [`ClientError::Superseded`].
pub struct DashboardLoader<S> {
    source: S,
    aggregator: DashboardAggregator,
    generation: AtomicU64,
}

impl<S: DataSource> DashboardLoader<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, DashboardOptions::default())
    }

    pub fn with_options(source: S, options: DashboardOptions) -> Self {
        Self {
            source,
            aggregator: DashboardAggregator::new(options),
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Refresh using the current wall clock
    pub async fn refresh(&self) -> ClientResult<DashboardSummary> {
        self.refresh_at(Utc::now()).await
    }

    /// Refresh with a fixed `now`, for reproducible summaries
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> ClientResult<DashboardSummary> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let started = Instant::now();

        let (requests, resources, allocations) = tokio::try_join!(
            self.source.fetch_requests(),
            self.source.fetch_resources(),
            self.source.fetch_allocations(),
        )?;

        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            tracing::debug!(generation, latest, "Dashboard refresh superseded");
            return Err(ClientError::Superseded);
        }

        let summary = self.aggregator.build(&requests, &resources, &allocations, now);
        tracing::info!(
            generation,
            elapsed_ms = started.elapsed().as_millis() as u64,
            queue = summary.priority_queue.len(),
            resources = summary.resource_utilization.len(),
            "Dashboard refreshed"
        );
        Ok(summary)
    }
}
