use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::traits::DirectionsService;
use super::types::RouteQuery;
use crate::app::ServiceSettings;
use crate::constants::{DIRECTIONS_PATH, HEALTH_CHECK_TIMEOUT_MS};
use crate::utils::BusChatError;

/// Directions service reached over HTTP
pub struct HttpDirectionsClient {
    client: Client,
    base_url: String,
}

impl HttpDirectionsClient {
    /// Build a client for the configured service.
    ///
    /// No timeout is applied unless `request_timeout_secs` is set.
    pub fn new(settings: &ServiceSettings) -> Result<Self, BusChatError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url, DIRECTIONS_PATH)
    }

    /// Check if the service answers at all, whatever the status code
    pub async fn is_reachable(&self) -> bool {
        let probe = self
            .client
            .get(&self.base_url)
            .timeout(Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS))
            .send()
            .await;

        match probe {
            Ok(resp) => {
                debug!(status = resp.status().as_u16(), "Directions service answered probe");
                true
            }
            Err(e) => {
                debug!("Directions service probe failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl DirectionsService for HttpDirectionsClient {
    async fn directions(&self, query: &RouteQuery) -> Result<Value, BusChatError> {
        debug!(from = %query.from, to = %query.to, "Requesting directions");

        let response = self
            .client
            .get(self.url())
            .query(&[("from", query.from.as_str()), ("to", query.to.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<Value>(&text) {
            Ok(body) if status.is_success() => Ok(body),
            // Error objects are meaningful whatever the status code.
            Ok(body) if body.get("error").is_some() => Ok(body),
            Ok(_) => Err(BusChatError::HttpStatus(status.as_u16())),
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => {
                warn!(status = status.as_u16(), "Directions service returned a non-JSON error page");
                Err(BusChatError::HttpStatus(status.as_u16()))
            }
        }
    }

    fn endpoint(&self) -> String {
        self.url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpDirectionsClient {
        HttpDirectionsClient::new(&ServiceSettings {
            base_url: format!("{}/", server.uri()),
            request_timeout_secs: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_query_is_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direction/index"))
            .and(query_param("from", "Ben Thanh Market & Co"))
            .and(query_param("to", "Quận 1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Take bus 19"])))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server)
            .directions(&RouteQuery::new("Ben Thanh Market & Co", "Quận 1"))
            .await
            .unwrap();
        assert_eq!(body, json!(["Take bus 19"]));
    }

    #[tokio::test]
    async fn test_error_object_passes_through_any_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direction/index"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "No routes found" })),
            )
            .mount(&server)
            .await;

        let body = client_for(&server)
            .directions(&RouteQuery::new("A", "B"))
            .await
            .unwrap();
        assert_eq!(body["error"], "No routes found");
    }

    #[tokio::test]
    async fn test_error_page_is_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direction/index"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).directions(&RouteQuery::new("A", "B")).await;
        assert!(matches!(result, Err(BusChatError::HttpStatus(502))));
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/direction/index"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).directions(&RouteQuery::new("A", "B")).await;
        assert!(matches!(result, Err(BusChatError::DecodeError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        let client = HttpDirectionsClient::new(&ServiceSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: Some(2),
        })
        .unwrap();

        let result = client.directions(&RouteQuery::new("A", "B")).await;
        assert!(matches!(result, Err(BusChatError::NetworkError(_))));
        assert!(!client.is_reachable().await);
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = HttpDirectionsClient::new(&ServiceSettings {
            base_url: "http://example.test:3000/".to_string(),
            request_timeout_secs: None,
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://example.test:3000");
        assert_eq!(client.endpoint(), "http://example.test:3000/direction/index");
    }
}
