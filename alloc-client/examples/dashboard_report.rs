// alloc-client/examples/dashboard_report.rs
// Fetch the dashboard once and log a summary
//
// ALLOC_API_BASE_URL=http://localhost:3001/api cargo run --example dashboard_report

use alloc_client::{ApiDataSource, ClientConfig, DashboardLoader, DataSource, logger};
use anyhow::Context;
use shared::TierThresholds;
use shared::utilization::{utilization_status_tier, waiting_duration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger("info", false)?;

    let config = ClientConfig::from_env()?.with_user_agent("alloc-dashboard-report/0.1");
    tracing::info!(base_url = %config.base_url, timeout = config.timeout, "Connecting");

    let source = ApiDataSource::from_config(&config)?;
    let snapshot = source.fetch_dashboard_snapshot().await;

    let loader = DashboardLoader::new(source);
    let summary = match loader.refresh().await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(retryable = e.is_retryable(), "{}", e.user_message());
            return Err(e).context("dashboard refresh failed");
        }
    };

    let stats = &summary.stats;
    tracing::info!(
        pending = stats.pending_requests,
        queued = stats.queued_requests,
        active = stats.active_allocations,
        today_completed = stats.today_completed,
        "Dashboard"
    );

    for (rank, request) in summary.priority_queue.iter().take(10).enumerate() {
        tracing::info!(
            rank = rank + 1,
            id = %request.id,
            score = %request.priority_score,
            urgency = request.urgency.display_name(),
            waiting = %waiting_duration(request.created_at, summary.generated_at),
            "Queue"
        );
    }

    for row in &summary.resource_utilization {
        tracing::info!(
            resource = %row.resource_id,
            city = %row.city,
            used = row.used,
            capacity = row.capacity,
            percentage = row.percentage,
            tier = ?row.tier,
            card_tier = ?utilization_status_tier(row.percentage, &TierThresholds::RESOURCE_CARD),
            "Utilization"
        );
    }

    for recent in &summary.recent_allocations {
        tracing::info!(
            allocation = %recent.allocation.id,
            progress = recent.progress,
            remaining_seconds = recent.remaining_seconds,
            "Recent allocation"
        );
    }

    match snapshot {
        Ok(snapshot) => tracing::info!(
            server_pending = snapshot.stats.pending_requests,
            automation_running = snapshot.automation_status.is_running,
            "Server snapshot"
        ),
        Err(e) => tracing::warn!(error = %e, "Server snapshot unavailable"),
    }

    Ok(())
}
