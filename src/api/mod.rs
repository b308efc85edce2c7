mod clients;
mod dashboard;
pub mod envelope;
mod payments;
mod projects;
mod team_members;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{ConsoleError, ConsoleResult};
use envelope::Payload;

/// HTTP client for the backend's REST API.
///
/// Every response is unwrapped through [`envelope::open`]; a failed call is
/// never retried.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> ConsoleResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("agency-console/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(method = method.as_str(), path, "api request");
        self.http.request(method, self.url(path))
    }

    async fn send(&self, request: RequestBuilder) -> ConsoleResult<Payload> {
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?;

        let payload = classify(status, content_type.as_deref(), &body)?;
        if let Some(message) = payload.message() {
            debug!(%status, message, "api response");
        }
        Ok(payload)
    }

    pub(crate) async fn get(&self, path: &str) -> ConsoleResult<Payload> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ConsoleResult<Payload> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ConsoleResult<Payload> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ConsoleResult<Payload> {
        self.send(self.request(Method::DELETE, path)).await
    }
}

/// Turn a status line and body into a payload or a classified error.
///
/// Any non-2xx status is a `Network` error, keeping the envelope's reason
/// when the body carries one.
pub fn classify(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> ConsoleResult<Payload> {
    if status.is_success() {
        return envelope::open(content_type, body);
    }
    let reason = match envelope::open(content_type, body) {
        Err(ConsoleError::Application(message)) => format!("HTTP {status}: {message}"),
        _ => format!("HTTP {status}"),
    };
    Err(ConsoleError::Network(reason))
}
