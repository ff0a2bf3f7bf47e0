use async_trait::async_trait;
use serde_json::Value;

use super::types::RouteQuery;
use crate::utils::BusChatError;

/// Anything that can answer a route query with the service's raw JSON payload
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectionsService: Send + Sync {
    /// Ask for directions between the two locations.
    ///
    /// The payload is returned undecoded into domain types; the caller
    /// validates its shape.
    async fn directions(&self, query: &RouteQuery) -> Result<Value, BusChatError>;

    /// Human-readable name of the endpoint, for headers and logs
    fn endpoint(&self) -> String;
}
