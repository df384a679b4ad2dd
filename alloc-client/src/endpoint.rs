//! Backend endpoints
//!
//! Every URL is rendered against the configured base URL. Path segments and
//! query values are percent-encoded by [`reqwest::Url`].

use crate::{ClientError, ClientResult};
use reqwest::Url;
use shared::models::{AllocationStatus, ResourceStatus};

/// Resource list query; empty values are omitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub city: Option<String>,
    pub status: Option<ResourceStatus>,
}

impl ResourceFilter {
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Allocation list query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationFilter {
    pub status: Option<AllocationStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Requests,
    RequestDetail(String),
    UserRequests(String),
    Resources(ResourceFilter),
    Allocations(AllocationFilter),
    DashboardSummary,
}

impl Endpoint {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Requests => "requests",
            Self::RequestDetail(_) => "request_detail",
            Self::UserRequests(_) => "user_requests",
            Self::Resources(_) => "resources",
            Self::Allocations(_) => "allocations",
            Self::DashboardSummary => "dashboard_summary",
        }
    }

    fn segments(&self) -> Vec<&str> {
        match self {
            Self::Requests | Self::UserRequests(_) => vec!["requests"],
            Self::RequestDetail(id) => vec!["requests", id.as_str()],
            Self::Resources(_) => vec!["resources"],
            Self::Allocations(_) => vec!["allocations"],
            Self::DashboardSummary => vec!["dashboard", "summary"],
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        match self {
            Self::UserRequests(user_id) => pairs.push(("userId", user_id.clone())),
            Self::Resources(filter) => {
                push_non_empty(&mut pairs, "city", filter.city.clone());
                push_non_empty(&mut pairs, "status", filter.status.map(|s| s.as_str().to_string()));
            }
            Self::Allocations(filter) => {
                push_non_empty(&mut pairs, "status", filter.status.map(|s| s.as_str().to_string()));
            }
            Self::Requests | Self::RequestDetail(_) | Self::DashboardSummary => {}
        }
        pairs
    }

    /// Identifier a lookup endpoint cannot be sent without
    fn required_key(&self) -> Option<(&'static str, &str)> {
        match self {
            Self::RequestDetail(id) => Some(("request id", id.as_str())),
            Self::UserRequests(user_id) => Some(("userId", user_id.as_str())),
            _ => None,
        }
    }

    /// Render against `base_url`.
    ///
    /// Lookup keys are required: an empty request id or user id is rejected
    /// rather than widening the lookup to the full list.
    pub fn url(&self, base_url: &str) -> ClientResult<Url> {
        if let Some((key, value)) = self.required_key()
            && value.trim().is_empty()
        {
            return Err(ClientError::InvalidConfig(format!(
                "{} requires a non-empty {key}",
                self.name()
            )));
        }

        let mut url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("base URL {base_url:?}: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidConfig(format!("base URL {base_url:?} cannot take a path")))?
            .pop_if_empty()
            .extend(self.segments());

        let query = self.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }
}

fn push_non_empty(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        pairs.push((key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:3001/api";

    fn render(endpoint: Endpoint) -> String {
        endpoint.url(BASE).unwrap().to_string()
    }

    #[test]
    fn test_plain_endpoints() {
        assert_eq!(render(Endpoint::Requests), "http://localhost:3001/api/requests");
        assert_eq!(render(Endpoint::DashboardSummary), "http://localhost:3001/api/dashboard/summary");
        assert_eq!(
            render(Endpoint::Allocations(AllocationFilter::default())),
            "http://localhost:3001/api/allocations"
        );
    }

    #[test]
    fn test_trailing_slash_base() {
        let url = Endpoint::Requests.url("http://localhost:3001/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/requests");
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(
            render(Endpoint::RequestDetail("a b/c".to_string())),
            "http://localhost:3001/api/requests/a%20b%2Fc"
        );
    }

    #[test]
    fn test_query_parameters() {
        assert_eq!(
            render(Endpoint::UserRequests("user-1".to_string())),
            "http://localhost:3001/api/requests?userId=user-1"
        );
        assert_eq!(
            render(Endpoint::Resources(ResourceFilter::city("İzmir").with_status(ResourceStatus::Busy))),
            "http://localhost:3001/api/resources?city=%C4%B0zmir&status=BUSY"
        );
        assert_eq!(
            render(Endpoint::Allocations(AllocationFilter {
                status: Some(AllocationStatus::Completed)
            })),
            "http://localhost:3001/api/allocations?status=COMPLETED"
        );
    }

    #[test]
    fn test_empty_filter_values_omitted() {
        let filter = ResourceFilter {
            city: Some("  ".to_string()),
            status: None,
        };
        assert_eq!(render(Endpoint::Resources(filter)), "http://localhost:3001/api/resources");
    }

    #[test]
    fn test_empty_lookup_keys_rejected() {
        for endpoint in [
            Endpoint::UserRequests(String::new()),
            Endpoint::UserRequests("  ".to_string()),
            Endpoint::RequestDetail(String::new()),
        ] {
            assert!(matches!(endpoint.url(BASE), Err(ClientError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(Endpoint::Requests.url("not a url"), Err(ClientError::InvalidConfig(_))));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn query_values_round_trip(city in "\\PC{1,24}", user_id in "[^\\s]\\PC{0,16}") {
                let url = Endpoint::Resources(ResourceFilter::city(city.clone())).url(BASE).unwrap();
                let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
                if city.trim().is_empty() {
                    prop_assert!(pairs.is_empty());
                } else {
                    prop_assert_eq!(pairs, vec![("city".to_string(), city)]);
                }
                prop_assert_eq!(url.path(), "/api/resources");

                let url = Endpoint::UserRequests(user_id.clone()).url(BASE).unwrap();
                let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
                prop_assert_eq!(pairs, vec![("userId".to_string(), user_id)]);
            }

            #[test]
            fn detail_id_stays_one_segment(id in "[^\\s]\\PC{0,24}") {
                prop_assume!(id != "." && id != "..");
                let url = Endpoint::RequestDetail(id.clone()).url(BASE).unwrap();
                let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
                prop_assert_eq!(segments.len(), 3);
                prop_assert_eq!(segments[1], "requests");
            }
        }
    }
}
