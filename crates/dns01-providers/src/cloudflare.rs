//! Cloudflare v4 record publisher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use dns01_core::{Dns01Error, RecordHandle, Result};

use crate::publisher::RecordPublisher;

/// The Cloudflare API base URL
const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PROVIDER: &str = "cloudflare";

/// Cloudflare v4 record publisher.
///
/// Records are addressed through the zone: every call resolves the
/// configured zone name to its id first (exactly one match required),
/// then looks the TXT record up by name before deciding between create
/// and update. Nothing is cached between calls; each upsert is a fresh
/// set of round trips.
#[derive(Clone)]
pub struct CloudflareDns {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    email: String,
    api_key: String,
    zone_name: String,
    base_url: String,
}

impl CloudflareDns {
    /// Create a publisher with default settings
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        api_key: impl Into<String>,
        zone_name: impl Into<String>,
    ) -> Self {
        CloudflareDnsBuilder::new(email, api_key, zone_name).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(
        email: impl Into<String>,
        api_key: impl Into<String>,
        zone_name: impl Into<String>,
    ) -> CloudflareDnsBuilder {
        CloudflareDnsBuilder::new(email, api_key, zone_name)
    }

    /// The zone this publisher writes into
    #[must_use]
    pub fn zone_name(&self) -> &str {
        &self.inner.zone_name
    }

    /// Resolve the configured zone name to its id, requiring exactly one
    /// matching zone
    async fn zone_id(&self) -> Result<String> {
        let url = format!(
            "{}/zones?name={}",
            self.inner.base_url,
            urlencoding::encode(&self.inner.zone_name)
        );
        let mut zones: Vec<Zone> = self.get("list-zones", &url).await?;

        if zones.len() != 1 {
            return Err(Dns01Error::AmbiguousZone {
                provider: PROVIDER.to_string(),
                name: self.inner.zone_name.clone(),
                matched: zones.len(),
            });
        }
        Ok(zones.swap_remove(0).id)
    }

    /// Look up the TXT record at `name`, requiring at most one match
    async fn find_record(&self, zone_id: &str, name: &str) -> Result<Option<DnsRecord>> {
        let url = format!(
            "{}/zones/{zone_id}/dns_records?type=TXT&name={}",
            self.inner.base_url,
            urlencoding::encode(name)
        );
        let mut records: Vec<DnsRecord> = self.get("list-records", &url).await?;

        match records.len() {
            0 => Ok(None),
            1 => Ok(Some(records.swap_remove(0))),
            matched => Err(Dns01Error::AmbiguousZone {
                provider: PROVIDER.to_string(),
                name: name.to_string(),
                matched,
            }),
        }
    }

    async fn create_record(&self, zone_id: &str, body: &RecordBody<'_>) -> Result<DnsRecord> {
        let url = format!("{}/zones/{zone_id}/dns_records", self.inner.base_url);
        self.send_json("create-record", Method::POST, &url, body)
            .await
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        body: &RecordBody<'_>,
    ) -> Result<DnsRecord> {
        let url = format!(
            "{}/zones/{zone_id}/dns_records/{record_id}",
            self.inner.base_url
        );
        self.send_json("update-record", Method::PUT, &url, body)
            .await
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let url = format!(
            "{}/zones/{zone_id}/dns_records/{record_id}",
            self.inner.base_url
        );
        debug!(url = %url, "DELETE request");

        let response = self
            .request(Method::DELETE, &url)
            .send()
            .await
            .map_err(|e| http_error("delete-record", &e))?;

        let status = response.status();
        // The record already being gone is the outcome we asked for
        if status.is_success() || status.as_u16() == 404 {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(provider_error(
            "delete-record",
            status.as_u16(),
            envelope_message(&body),
        ))
    }

    /// Perform a GET request against the v4 API
    async fn get<T: DeserializeOwned>(&self, operation: &'static str, url: &str) -> Result<T> {
        debug!(url, "GET request");

        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(|e| http_error(operation, &e))?;

        self.handle_response(operation, response).await
    }

    /// Perform a request with a JSON body against the v4 API
    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        operation: &'static str,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<T> {
        debug!(url, method = %method, "JSON request");

        let response = self
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| http_error(operation, &e))?;

        self.handle_response(operation, response).await
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .http
            .request(method, url)
            .header("X-Auth-Email", &self.inner.email)
            .header("X-Auth-Key", &self.inner.api_key)
    }

    /// Unwrap the v4 response envelope, treating `success: false` and a
    /// missing result as errors even on HTTP 2xx
    async fn handle_response<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| http_error(operation, &e))?;

        if !status.is_success() {
            let message = envelope_message(&body);
            warn!(operation, status = status.as_u16(), message = %message, "cloudflare API error");
            return Err(provider_error(operation, status.as_u16(), message));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            provider_error(
                operation,
                status.as_u16(),
                format!("unexpected response body: {e}"),
            )
        })?;

        if !envelope.success {
            return Err(provider_error(
                operation,
                status.as_u16(),
                envelope.error_message(),
            ));
        }

        envelope.result.ok_or_else(|| {
            provider_error(operation, status.as_u16(), "response envelope carried no result")
        })
    }
}

#[async_trait]
impl RecordPublisher for CloudflareDns {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn upsert(&self, name: &str, content: &str, ttl: u32) -> Result<RecordHandle> {
        let zone_id = self.zone_id().await?;
        let body = RecordBody {
            record_type: "TXT",
            name,
            content,
            ttl,
        };

        let record = match self.find_record(&zone_id, name).await? {
            Some(existing) => {
                debug!(
                    record_id = %existing.id,
                    old_content = %existing.content,
                    "overwriting existing validation record"
                );
                self.update_record(&zone_id, &existing.id, &body).await?
            }
            None => self.create_record(&zone_id, &body).await?,
        };

        info!(name, record_id = %record.id, ttl, "published TXT record");
        Ok(RecordHandle::with_id(zone_id, record.id, name))
    }

    async fn remove(&self, handle: &RecordHandle) -> Result<()> {
        // Handles minted by upsert carry the zone id; name-addressed
        // handles carry the zone name and need a fresh resolution
        let (zone_id, record_id) = match &handle.id {
            Some(id) => (handle.zone.clone(), id.clone()),
            None => {
                let zone_id = self.zone_id().await?;
                match self.find_record(&zone_id, &handle.name).await? {
                    Some(record) => (zone_id, record.id),
                    None => return Ok(()),
                }
            }
        };
        self.delete_record(&zone_id, &record_id).await
    }
}

/// Builder for configuring a [`CloudflareDns`] publisher
pub struct CloudflareDnsBuilder {
    email: String,
    api_key: String,
    zone_name: String,
    base_url: String,
    timeout: Duration,
}

impl CloudflareDnsBuilder {
    /// Create a new builder with the given account email, API key and zone
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        api_key: impl Into<String>,
        zone_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
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
    pub fn build(self) -> CloudflareDns {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(format!("dns01/{}", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        CloudflareDns {
            inner: Arc::new(ClientInner {
                http,
                email: self.email,
                api_key: self.api_key,
                zone_name: self.zone_name,
                base_url: self.base_url,
            }),
        }
    }
}

/// Cloudflare v4 response envelope
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiError>,
    result: Option<T>,
}

#[derive(Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

impl<T> Envelope<T> {
    fn error_message(&self) -> String {
        if self.errors.is_empty() {
            return "request unsuccessful with no error detail".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{} (code {})", e.message, e.code))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
}

/// TXT record as the v4 API returns it
#[derive(Debug, Deserialize)]
struct DnsRecord {
    id: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct RecordBody<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    content: &'a str,
    ttl: u32,
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

/// Extract an error message from a v4 envelope body, falling back to the
/// raw body
fn envelope_message(body: &str) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .map(|envelope| envelope.error_message())
        .unwrap_or_else(|_| body.to_string())
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_err;
    use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CloudflareDns {
        CloudflareDns::builder("ops@example.com", "secret-key", "example.com")
            .base_url(server.uri())
            .build()
    }

    async fn mount_zone_lookup(server: &MockServer, zone_name: &str, zone_id: &str) {
        Mock::given(method("GET"))
            .and(path("/zones"))
            .and(query_param("name", zone_name))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{"id": zone_id}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_upsert_creates_when_absent() {
        let server = MockServer::start().await;
        mount_zone_lookup(&server, "example.com", "zone-1").await;

        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .and(query_param("type", "TXT"))
            .and(query_param("name", "_acme-challenge.example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": []
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/zones/zone-1/dns_records"))
            .and(header("X-Auth-Email", "ops@example.com"))
            .and(header("X-Auth-Key", "secret-key"))
            .and(body_json(json!({
                "type": "TXT",
                "name": "_acme-challenge.example.com",
                "content": "abc123",
                "ttl": 120
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "rec-9", "content": "abc123"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let handle = client(&server)
            .upsert("_acme-challenge.example.com", "abc123", 120)
            .await
            .unwrap();

        assert_eq!(handle.zone, "zone-1");
        assert_eq!(handle.id.as_deref(), Some("rec-9"));
        assert_eq!(handle.name, "_acme-challenge.example.com");
    }

    #[tokio::test]
    async fn test_upsert_updates_in_place_when_present() {
        let server = MockServer::start().await;
        mount_zone_lookup(&server, "example.com", "zone-1").await;

        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .and(query_param("type", "TXT"))
            .and(query_param("name", "_acme-challenge.example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{"id": "rec-1", "content": "stale-value"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/zones/zone-1/dns_records/rec-1"))
            .and(body_json(json!({
                "type": "TXT",
                "name": "_acme-challenge.example.com",
                "content": "abc123",
                "ttl": 120
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "rec-1", "content": "abc123"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        // A second record must never be created
        Mock::given(method("POST"))
            .and(path("/zones/zone-1/dns_records"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let handle = client(&server)
            .upsert("_acme-challenge.example.com", "abc123", 120)
            .await
            .unwrap();

        assert_eq!(handle.id.as_deref(), Some("rec-1"));
    }

    #[tokio::test]
    async fn test_upsert_with_duplicate_records_mutates_nothing() {
        let server = MockServer::start().await;
        mount_zone_lookup(&server, "foo.com", "zone-7").await;

        Mock::given(method("GET"))
            .and(path("/zones/zone-7/dns_records"))
            .and(query_param("name", "_acme-challenge.foo.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [
                    {"id": "rec-1", "content": "old-a"},
                    {"id": "rec-2", "content": "old-b"}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path_regex(r"^/zones/.*/dns_records$"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path_regex(r"^/zones/.*/dns_records/.*$"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let publisher = CloudflareDns::builder("ops@example.com", "secret-key", "foo.com")
            .base_url(server.uri())
            .build();
        let err = assert_err!(publisher.upsert("_acme-challenge.foo.com", "abc123", 120).await);

        match err {
            Dns01Error::AmbiguousZone { name, matched, .. } => {
                assert_eq!(name, "_acme-challenge.foo.com");
                assert_eq!(matched, 2);
            }
            other => panic!("expected AmbiguousZone, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upsert_requires_exactly_one_zone() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{"id": "zone-1"}, {"id": "zone-2"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/zones/.*/dns_records$"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let err = assert_err!(
            client(&server)
                .upsert("_acme-challenge.example.com", "abc123", 120)
                .await
        );

        match err {
            Dns01Error::AmbiguousZone { name, matched, .. } => {
                assert_eq!(name, "example.com");
                assert_eq!(matched, 2);
            }
            other => panic!("expected AmbiguousZone, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_maps_to_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "success": false,
                "errors": [{"code": 9103, "message": "Unknown X-Auth-Key or X-Auth-Email"}],
                "result": null
            })))
            .mount(&server)
            .await;

        let err = assert_err!(
            client(&server)
                .upsert("_acme-challenge.example.com", "abc123", 120)
                .await
        );

        assert_eq!(err.status_code(), Some(403));
        assert!(err.to_string().contains("Unknown X-Auth-Key"));
        assert!(err.is_provider_error());
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_on_2xx_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "errors": [{"code": 1004, "message": "DNS Validation Error"}],
                "result": null
            })))
            .mount(&server)
            .await;

        let err = assert_err!(
            client(&server)
                .upsert("_acme-challenge.example.com", "abc123", 120)
                .await
        );

        assert!(err.to_string().contains("DNS Validation Error"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = assert_err!(
            client(&server)
                .upsert("_acme-challenge.example.com", "abc123", 120)
                .await
        );

        assert!(err.to_string().contains("unexpected response body"));
    }

    #[tokio::test]
    async fn test_remove_deletes_by_id() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/zones/zone-1/dns_records/rec-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "rec-9"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let handle = RecordHandle::with_id("zone-1", "rec-9", "_acme-challenge.example.com");
        client(&server).remove(&handle).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_by_name_resolves_the_record_id() {
        let server = MockServer::start().await;
        mount_zone_lookup(&server, "example.com", "zone-1").await;

        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .and(query_param("type", "TXT"))
            .and(query_param("name", "_acme-challenge.example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{"id": "rec-3", "content": "abc123"}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/zones/zone-1/dns_records/rec-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {"id": "rec-3"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let handle = RecordHandle::by_name("example.com", "_acme-challenge.example.com");
        client(&server).remove(&handle).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_of_missing_record_is_ok() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/zones/zone-1/dns_records/rec-9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "errors": [{"code": 81044, "message": "Record does not exist."}],
                "result": null
            })))
            .mount(&server)
            .await;

        let handle = RecordHandle::with_id("zone-1", "rec-9", "_acme-challenge.example.com");
        client(&server).remove(&handle).await.unwrap();
    }
}
