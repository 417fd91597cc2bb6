//! HTTP transport for the panel Application API.
//!
//! The [`Transport`] trait is the single seam through which every request is
//! issued. [`HttpTransport`] implements it on top of `reqwest`, attaching the
//! bearer token and JSON headers and classifying every failure into the
//! shared [`Error`] type.

use crate::config::PanelConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub use reqwest::Method;

/// Path prefix of every Application API endpoint.
pub const API_PREFIX: &str = "/api/application";

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

const JSON: &str = "application/json";
const USER_AGENT: &str = concat!("ptero-core/", env!("CARGO_PKG_VERSION"));

/// Issues one request against the Application API and returns the decoded body.
///
/// `path` is relative to [`API_PREFIX`] (e.g. `/users/1`). A successful
/// response with an empty body decodes to an empty JSON object.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a single request.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value>;
}

/// `reqwest` backed [`Transport`].
#[derive(Debug)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    api_key: SecretString,
}

impl HttpTransport {
    /// Build a transport from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configuration is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &PanelConfig) -> Result<Self> {
        config.check()?;
        let base_url = config.parse_base_url()?;

        let http = ClientBuilder::new()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT))
            .pool_max_idle_per_host(DEFAULT_POOL_MAX_IDLE_PER_HOST)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT))
            .danger_accept_invalid_certs(!config.tls_verify)
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build panel HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            api_key: SecretString::from(config.api_key.clone()),
        })
    }

    /// Resolve an API path into the full endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the result is not a valid URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let separator = if path.starts_with('/') { "" } else { "/" };
        let joined = format!(
            "{}{API_PREFIX}{separator}{path}",
            self.base_url.as_str().trim_end_matches('/')
        );

        Url::parse(&joined)
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid panel path `{path}`: {err}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.endpoint(path)?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(self.api_key.expose_secret())
            .header(ACCEPT, JSON)
            .header(CONTENT_TYPE, JSON);

        if let Some(payload) = &body {
            request = request.json(payload);
        }

        info!(%method, path, "Panel request");

        let response = request.send().await.map_err(|err| {
            warn!(%method, path, error = %err, "Panel request failed");
            Error::from(err)
        })?;

        let status = response.status();
        let text = response.text().await?;
        debug!(%method, path, status = status.as_u16(), "Panel response");

        if !status.is_success() {
            let error = api_error(status, &text);
            warn!(%method, path, %error, "Panel returned an error");
            return Err(error);
        }

        decode_body(path, &text)
    }
}

/// Build the API error for a non-success response.
///
/// The detail is the `errors` member of a JSON body, the whole JSON body when
/// no such member exists, or the raw text when the body is not JSON.
#[must_use]
pub fn api_error(status: StatusCode, body: &str) -> Error {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        match serde_json::from_str::<Value>(body) {
            Ok(json) => render_detail(json.get("errors").unwrap_or(&json)),
            Err(_) => body.to_string(),
        }
    };

    Error::Api {
        status: status.as_u16(),
        detail,
    }
}

fn render_detail(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn decode_body(path: &str, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        debug!(path, "Panel returned an empty body");
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(text).map_err(|err| {
        Error::UnexpectedResponse(format!("Failed to parse panel response for `{path}`: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_transport(server: &MockServer) -> HttpTransport {
        let config = PanelConfig::new(server.uri(), "ptla_test").unwrap();
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn endpoint_joins_prefix_and_path() {
        let config = PanelConfig::new("https://panel.example.com/", "ptla_test").unwrap();
        let transport = HttpTransport::new(&config).unwrap();

        assert_eq!(
            transport.endpoint("/users/5").unwrap().as_str(),
            "https://panel.example.com/api/application/users/5"
        );
        assert_eq!(
            transport.endpoint("nodes").unwrap().as_str(),
            "https://panel.example.com/api/application/nodes"
        );
    }

    #[test]
    fn api_error_prefers_errors_member() {
        let err = api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors": [{"detail": "email taken"}]}"#,
        );
        assert_eq!(err.status(), Some(422));
        assert!(err.to_string().contains("email taken"));
    }

    #[test]
    fn api_error_falls_back_to_whole_body() {
        let err = api_error(StatusCode::BAD_REQUEST, r#"{"message": "bad"}"#);
        match err {
            Error::Api { detail, .. } => assert_eq!(detail, r#"{"message":"bad"}"#),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn api_error_uses_raw_text_for_non_json() {
        let err = api_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        match err {
            Error::Api { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "<html>bad gateway</html>");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn api_error_with_empty_body_uses_status() {
        let err = api_error(StatusCode::NOT_FOUND, "");
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn request_sends_fixed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/application/users"))
            .and(header("authorization", "Bearer ptla_test"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(&server);
        let value = transport.request(Method::GET, "/users", None).await.unwrap();
        assert_eq!(value, json!({"data": []}));
    }

    #[tokio::test]
    async fn request_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/application/locations"))
            .and(body_json(json!({"short": "eu"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(&server);
        let value = transport
            .request(Method::POST, "/locations", Some(json!({"short": "eu"})))
            .await
            .unwrap();
        assert_eq!(value, json!({"ok": true}));
    }

    #[tokio::test]
    async fn empty_success_body_is_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/application/users/3"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let transport = test_transport(&server);
        let value = transport
            .request(Method::DELETE, "/users/3", None)
            .await
            .unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn error_status_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/application/servers/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "errors": [{"code": "NotFoundHttpException", "status": "404", "detail": "missing"}]
            })))
            .mount(&server)
            .await;

        let transport = test_transport(&server);
        let err = transport
            .request(Method::GET, "/servers/9", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_unexpected_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/application/nests"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let transport = test_transport(&server);
        let err = transport
            .request(Method::GET, "/nests", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_panel_is_api_kind() {
        let config = PanelConfig::new("http://127.0.0.1:9", "ptla_test")
            .unwrap()
            .with_timeout(2);
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport
            .request(Method::GET, "/users", None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(matches!(err, Error::HttpError(_) | Error::Timeout(_)));
    }
}
