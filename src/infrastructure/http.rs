// src/infrastructure/http.rs
// Thin hyper wrapper shared by the service adapters: one HTTPS client,
// JSON bodies in and out, and access to the status line so adapters can
// tell a rejection from an outage.

use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request, StatusCode};
use hyper_tls::HttpsConnector;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::application::dto::ApiErrorBody;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Transport error: {0}")]
    Transport(#[from] hyper::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Status line plus raw body of a completed exchange. Adapters decide
/// how to interpret non-2xx responses; no error escapes this module
/// undeconstructed.
pub struct RawResponse {
    pub status: StatusCode,
    pub body: hyper::body::Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// The backend attaches `{"detail": "..."}` to error responses;
    /// returns it when present and parseable.
    pub fn error_detail(&self) -> Option<String> {
        serde_json::from_slice::<ApiErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.detail)
    }
}

/// JSON API client rooted at a base URL.
pub struct HttpApi {
    client: Client<HttpsConnector<HttpConnector>>,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        let https = HttpsConnector::new();
        let client = Client::builder().build::<_, Body>(https);
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get(&self, path: &str) -> Result<RawResponse, HttpError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.url(path))
            .header(hyper::header::ACCEPT, "application/json")
            .body(Body::empty())
            .map_err(|e| HttpError::Request(e.to_string()))?;
        self.send(request).await
    }

    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, HttpError> {
        let payload = serde_json::to_vec(body)?;
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.url(path))
            .header(hyper::header::CONTENT_TYPE, "application/json")
            .header(hyper::header::ACCEPT, "application/json")
            .body(Body::from(payload))
            .map_err(|e| HttpError::Request(e.to_string()))?;
        self.send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: Request<Body>) -> Result<RawResponse, HttpError> {
        log::debug!("{} {}", request.method(), request.uri());
        let response = self.client.request(request).await?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await?;
        log::debug!("-> {} ({} bytes)", status, body.len());
        Ok(RawResponse { status, body })
    }
}
