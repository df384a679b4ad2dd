//! Utilization Calculator
//!
//! Derives presentation-ready numbers from raw counts and timestamps:
//! - [`utilization_percent`] / [`utilization_status_tier`] for resource load
//! - [`waiting_duration`] for how long a request has been queued
//! - [`allocation_progress`] / [`remaining_seconds`] for active allocations
//!
//! Every function is total. Zero capacity and clock skew are recovered in
//! place and reported at `debug` level only.

use crate::error::DomainError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==================== Utilization ====================

/// Percentage of capacity in use, `round(100 * used / capacity)`.
///
/// Returns 0 when `capacity <= 0`. Negative `used` counts as 0. Results above
/// 100 are preserved as an over-capacity signal.
pub fn utilization_percent(used: i64, capacity: i64) -> i64 {
    if capacity <= 0 {
        let error = DomainError::InvalidCapacity { capacity };
        tracing::debug!(%error, used, "Utilization reported as 0");
        return 0;
    }
    let used = i128::from(used.max(0));
    let capacity = i128::from(capacity);
    // Half away from zero on non-negative operands: floor((200u + c) / 2c)
    let percent = (200 * used + capacity) / (2 * capacity);
    i64::try_from(percent).unwrap_or(i64::MAX)
}

/// Qualitative load classification used for display coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UtilizationTier {
    Normal,
    Warning,
    Critical,
}

/// Percentage boundaries for [`UtilizationTier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Lowest percentage classified as Warning
    pub warning: i64,
    /// Lowest percentage classified as Critical
    pub critical: i64,
}

impl TierThresholds {
    /// Dashboard utilization list
    pub const DASHBOARD: TierThresholds = TierThresholds {
        warning: 50,
        critical: 100,
    };

    /// Individual resource cards
    pub const RESOURCE_CARD: TierThresholds = TierThresholds {
        warning: 75,
        critical: 100,
    };

    pub const fn new(warning: i64, critical: i64) -> Self {
        Self { warning, critical }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self::DASHBOARD
    }
}

/// Classify a utilization percentage
pub fn utilization_status_tier(percentage: i64, thresholds: &TierThresholds) -> UtilizationTier {
    if percentage >= thresholds.critical {
        UtilizationTier::Critical
    } else if percentage >= thresholds.warning {
        UtilizationTier::Warning
    } else {
        UtilizationTier::Normal
    }
}

// ==================== Waiting Time ====================

/// Time a request has spent waiting, split into hours and minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct WaitingDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl WaitingDuration {
    pub fn from_duration(elapsed: Duration) -> Self {
        let total_minutes = elapsed.num_minutes().max(0);
        Self {
            hours: total_minutes / 60,
            minutes: total_minutes % 60,
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }

    pub fn is_zero(&self) -> bool {
        self.total_minutes() == 0
    }

    /// Clock-style rendering, e.g. `02:05`
    pub fn as_clock(&self) -> String {
        format!("{:02}:{:02}", self.hours, self.minutes)
    }
}

impl fmt::Display for WaitingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{}h {}m", self.hours, self.minutes)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}

/// Elapsed time since `created_at`; zero when `now` precedes it
pub fn waiting_duration(created_at: DateTime<Utc>, now: DateTime<Utc>) -> WaitingDuration {
    if now < created_at {
        let error = DomainError::ClockSkew {
            reference: created_at,
            now,
        };
        tracing::debug!(%error, "Waiting time clamped to zero");
        return WaitingDuration::default();
    }
    WaitingDuration::from_duration(now - created_at)
}

// ==================== Allocation Progress ====================

/// Time-based progress of an allocation in `0..=100`.
///
/// `clamp(100 * (now - assigned) / (expected - assigned), 0, 100)`; 0 when no
/// expected completion is known. An empty window counts as done once reached.
pub fn allocation_progress(
    assigned_at: DateTime<Utc>,
    expected_completion_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> u8 {
    let Some(expected) = expected_completion_at else {
        return 0;
    };

    if now < assigned_at {
        let error = DomainError::ClockSkew {
            reference: assigned_at,
            now,
        };
        tracing::debug!(%error, "Allocation progress clamped to zero");
        return 0;
    }

    let window = (expected - assigned_at).num_milliseconds();
    if window <= 0 {
        return if now >= expected { 100 } else { 0 };
    }

    let elapsed = (now - assigned_at).num_milliseconds();
    let percent = (elapsed.saturating_mul(100) / window).clamp(0, 100);
    percent as u8
}

/// Whole seconds until `expected_completion_at`; never negative
pub fn remaining_seconds(expected_completion_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    expected_completion_at
        .map(|expected| (expected - now).num_seconds().max(0))
        .unwrap_or(0)
}
