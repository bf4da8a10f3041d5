//! Gandi LiveDNS record publisher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use serde::Serialize;
use tracing::{debug, info};

use dns01_core::{Dns01Error, RecordHandle, Result};

use crate::publisher::RecordPublisher;
use crate::zone::relative_name;

/// The Gandi LiveDNS API base URL
const DEFAULT_BASE_URL: &str = "https://api.gandi.net/v5/livedns";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER: &str = "gandi";

/// Gandi LiveDNS record publisher.
///
/// LiveDNS addresses an rrset by zone, relative label and type, and `PUT`
/// replaces it wholesale, so upsert is a single call with no lookup step
/// and no chance of duplicates. Handles carry no record id; removal
/// targets the same rrset address.
#[derive(Clone)]
pub struct GandiDns {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: String,
    zone_name: String,
    base_url: String,
}

impl GandiDns {
    /// Create a publisher with default settings
    #[must_use]
    pub fn new(api_key: impl Into<String>, zone_name: impl Into<String>) -> Self {
        GandiDnsBuilder::new(api_key, zone_name).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(
        api_key: impl Into<String>,
        zone_name: impl Into<String>,
    ) -> GandiDnsBuilder {
        GandiDnsBuilder::new(api_key, zone_name)
    }

    /// The zone this publisher writes into
    #[must_use]
    pub fn zone_name(&self) -> &str {
        &self.inner.zone_name
    }

    fn rrset_url(&self, label: &str) -> String {
        format!(
            "{}/domains/{}/records/{label}/TXT",
            self.inner.base_url, self.inner.zone_name
        )
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .http
            .request(method, url)
            .header("Authorization", format!("Apikey {}", self.inner.api_key))
    }
}

#[async_trait]
impl RecordPublisher for GandiDns {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn upsert(&self, name: &str, content: &str, ttl: u32) -> Result<RecordHandle> {
        let label = relative_name(name, &self.inner.zone_name)?;
        let url = self.rrset_url(&label);
        let body = RrsetBody {
            rrset_ttl: ttl,
            rrset_values: [content],
        };
        debug!(url = %url, "PUT rrset");

        let response = self
            .request(Method::PUT, &url)
            .json(&body)
            .send()
            .await
            .map_err(|e| http_error("replace-rrset", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(provider_error(
                "replace-rrset",
                status.as_u16(),
                error_message(response).await,
            ));
        }

        info!(name, ttl, "published TXT rrset");
        Ok(RecordHandle::by_name(self.inner.zone_name.clone(), name))
    }

    async fn remove(&self, handle: &RecordHandle) -> Result<()> {
        let label = relative_name(&handle.name, &self.inner.zone_name)?;
        let url = self.rrset_url(&label);
        debug!(url = %url, "DELETE rrset");

        let response = self
            .request(Method::DELETE, &url)
            .send()
            .await
            .map_err(|e| http_error("delete-rrset", &e))?;

        let status = response.status();
        // An already-absent rrset counts as removed
        if status.is_success() || status.as_u16() == 404 {
            return Ok(());
        }

        Err(provider_error(
            "delete-rrset",
            status.as_u16(),
            error_message(response).await,
        ))
    }
}

/// Builder for configuring a [`GandiDns`] publisher
pub struct GandiDnsBuilder {
    api_key: String,
    zone_name: String,
    base_url: String,
    timeout: Duration,
}

impl GandiDnsBuilder {
    /// Create a new builder with the given API key and zone
    #[must_use]
    pub fn new(api_key: impl Into<String>, zone_name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            zone_name: zone_name.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the publisher
    #[must_use]
    pub fn build(self) -> GandiDns {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(format!("dns01/{}", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        GandiDns {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                zone_name: self.zone_name,
                base_url: self.base_url,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct RrsetBody<'a> {
    rrset_ttl: u32,
    rrset_values: [&'a str; 1],
}

fn provider_error(
    operation: &'static str,
    status: u16,
    message: impl Into<String>,
) -> Dns01Error {
    Dns01Error::Provider {
        provider: PROVIDER.to_string(),
        operation,
        status,
        message: message.into(),
    }
}

fn http_error(operation: &'static str, error: &reqwest::Error) -> Dns01Error {
    Dns01Error::Http {
        provider: PROVIDER.to_string(),
        operation,
        message: error.to_string(),
    }
}

/// Extract the `message` field LiveDNS error bodies carry, falling back
/// to the raw body
async fn error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_err;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GandiDns {
        GandiDns::builder("g-key", "example.com")
            .base_url(server.uri())
            .build()
    }

    #[tokio::test]
    async fn test_upsert_replaces_rrset() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/domains/example.com/records/_acme-challenge/TXT"))
            .and(header("Authorization", "Apikey g-key"))
            .and(body_json(json!({
                "rrset_ttl": 120,
                "rrset_values": ["abc123"]
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"message": "DNS Record Created"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let handle = client(&server)
            .upsert("_acme-challenge.example.com", "abc123", 120)
            .await
            .unwrap();

        assert_eq!(handle.zone, "example.com");
        assert_eq!(handle.id, None);
        assert_eq!(handle.name, "_acme-challenge.example.com");
    }

    #[tokio::test]
    async fn test_upsert_uses_zone_relative_label() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/domains/example.com/records/_acme-challenge.www/TXT"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"message": "DNS Record Created"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .upsert("_acme-challenge.www.example.com", "abc123", 120)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upsert_outside_zone_is_config_error() {
        let server = MockServer::start().await;

        let err = assert_err!(
            client(&server)
                .upsert("_acme-challenge.other.org", "abc123", 120)
                .await
        );
        assert!(matches!(err, Dns01Error::Config(_)));
        assert_eq!(server.received_requests().await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_upsert_error_carries_provider_message() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/domains/example.com/records/_acme-challenge/TXT"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"code": 401, "message": "The API key doesn't exist"})),
            )
            .mount(&server)
            .await;

        let err = assert_err!(
            client(&server)
                .upsert("_acme-challenge.example.com", "abc123", 120)
                .await
        );

        assert_eq!(err.status_code(), Some(401));
        assert!(err.to_string().contains("The API key doesn't exist"));
    }

    #[tokio::test]
    async fn test_remove_deletes_rrset() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/domains/example.com/records/_acme-challenge/TXT"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let handle = RecordHandle::by_name("example.com", "_acme-challenge.example.com");
        client(&server).remove(&handle).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_of_missing_rrset_is_ok() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/domains/example.com/records/_acme-challenge/TXT"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"code": 404, "message": "Unknown record"})),
            )
            .mount(&server)
            .await;

        let handle = RecordHandle::by_name("example.com", "_acme-challenge.example.com");
        client(&server).remove(&handle).await.unwrap();
    }
}
