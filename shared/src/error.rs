//! Domain error types
//!
//! The derivation core is total over structurally valid input: capacity and
//! clock anomalies are recovered in place (the result is clamped) and only
//! reported through `tracing`. Structural problems such as missing
//! identifiers are rejected at the decoding boundary via `validate()`.

use crate::models::RequestStatus;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by the domain model and derivation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Capacity was zero or negative where a percentage was requested.
    /// Recovered locally: the percentage is reported as 0.
    #[error("Invalid capacity: {capacity}")]
    InvalidCapacity { capacity: i64 },

    /// `now` precedes a reference timestamp.
    /// Recovered locally: the elapsed duration is clamped to zero.
    #[error("Clock skew: now {now} precedes reference {reference}")]
    ClockSkew {
        reference: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// An entity arrived without an identifier
    #[error("Missing identifier on {entity}")]
    MissingIdentifier { entity: &'static str },

    /// A status change that would move a request backwards
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: RequestStatus,
        to: RequestStatus,
    },
}

impl DomainError {
    /// Create a MissingIdentifier error
    pub fn missing_identifier(entity: &'static str) -> Self {
        Self::MissingIdentifier { entity }
    }

    /// Whether this error is recovered in place by the core rather than
    /// returned to the caller
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidCapacity { .. } | Self::ClockSkew { .. })
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
