//! API Response types
//!
//! Error body returned by the allocation backend on non-2xx responses:
//! ```json
//! {
//!     "title": "No Definitions Found",
//!     "message": "No matching records.",
//!     "resolution": "Try again later."
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Title the backend uses for empty lookups
pub const NO_RESULTS_TITLE: &str = "No Definitions Found";

/// Backend error body; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl ApiErrorBody {
    /// Whether the body describes an empty lookup rather than a failure
    pub fn is_no_results(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|title| title.trim().eq_ignore_ascii_case(NO_RESULTS_TITLE))
    }

    /// Best human-readable description: message, then title
    pub fn describe(&self) -> Option<String> {
        self.message
            .as_deref()
            .or(self.title.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}
