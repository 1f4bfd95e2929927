//! HTTP client for the polygon API.

use crate::domain::polygon::{Point, Polygon, PolygonSummary};
use crate::infra::config;
use crate::transport::http::types::ErrorResponse;
use reqwest::{Client, Response};
use serde::Serialize;
use thiserror::Error;

pub const BACKEND_UNAVAILABLE: &str =
    "Backend server is not available. Please ensure the backend is running.";

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a `{message, error}` body.
    #[error("{error}")]
    Api { status: u16, error: String },

    /// Transport failure, or a non-2xx answer without the JSON error shape.
    #[error("{}", BACKEND_UNAVAILABLE)]
    Unavailable(#[source] Option<reqwest::Error>),

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct CreateBody<'a> {
    name: &'a str,
    points: &'a [Point],
}

#[derive(Clone)]
pub struct PolygonApiClient {
    http: Client,
    base_url: String,
}

impl PolygonApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client pointed at `API_BASE_URL` (default `http://localhost:3000`).
    pub fn from_env() -> Self {
        Self::new(config::api_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/polygons{}", self.base_url, path)
    }

    pub async fn fetch_polygons(&self) -> Result<Vec<PolygonSummary>, ClientError> {
        let resp = self
            .http
            .get(self.url(""))
            .send()
            .await
            .map_err(|e| ClientError::Unavailable(Some(e)))?;
        let resp = check(resp).await?;
        resp.json().await.map_err(ClientError::Decode)
    }

    pub async fn create_polygon(
        &self,
        name: &str,
        points: &[Point],
    ) -> Result<Polygon, ClientError> {
        let resp = self
            .http
            .post(self.url(""))
            .json(&CreateBody { name, points })
            .send()
            .await
            .map_err(|e| ClientError::Unavailable(Some(e)))?;
        let resp = check(resp).await?;
        resp.json().await.map_err(ClientError::Decode)
    }

    pub async fn delete_polygon(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.url(&format!("/{}", id)))
            .send()
            .await
            .map_err(|e| ClientError::Unavailable(Some(e)))?;
        check(resp).await?;
        Ok(())
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    // An HTML error page (proxy, dev server) means the API itself is not answering.
    match resp.json::<ErrorResponse>().await {
        Ok(body) => Err(ClientError::Api {
            status: status.as_u16(),
            error: body.error,
        }),
        Err(_) => Err(ClientError::Unavailable(None)),
    }
}
