use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::models::{
    ApiResponse, Coordinate, Health, Location, LocationRoute, LocationRouteRequest,
    LocationType, NavigateRequest, Navigation, NearbyLocation, NearbyRequest, Route,
    RouteRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Typed client for the campus API. The base URL is supplied by the caller,
/// e.g. `http://localhost:3001`.
#[derive(Debug, Clone)]
pub struct CampusClient {
    base_url: String,
    http: reqwest::Client,
}

impl CampusClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        let response = self.http.get(self.url("/health")).send().await?;
        Ok(response.error_for_status()?.json().await?)
    }

    pub async fn locations(&self) -> Result<Vec<Location>, ClientError> {
        let response = self.http.get(self.url("/api/locations")).send().await?;
        read_envelope(response).await
    }

    pub async fn location(&self, id: &str) -> Result<Location, ClientError> {
        let response = self.http.get(self.location_url(id)?).send().await?;
        read_envelope(response).await
    }

    pub async fn search(
        &self,
        query: Option<&str>,
        kind: Option<LocationType>,
    ) -> Result<Vec<Location>, ClientError> {
        let mut params = Vec::new();
        if let Some(query) = query {
            params.push(("query", query));
        }
        if let Some(kind) = kind {
            params.push(("type", kind.as_str()));
        }

        let response = self
            .http
            .get(self.url("/api/locations/search"))
            .query(&params)
            .send()
            .await?;
        read_envelope(response).await
    }

    pub async fn route(&self, start: Coordinate, end: Coordinate) -> Result<Route, ClientError> {
        let response = self
            .http
            .post(self.url("/api/route"))
            .json(&RouteRequest { start, end })
            .send()
            .await?;
        read_envelope(response).await
    }

    pub async fn route_between_locations(
        &self,
        start_id: &str,
        end_id: &str,
    ) -> Result<LocationRoute, ClientError> {
        let body = LocationRouteRequest {
            start_id: Some(start_id.to_string()),
            end_id: Some(end_id.to_string()),
        };
        let response = self
            .http
            .post(self.url("/api/route/locations"))
            .json(&body)
            .send()
            .await?;
        read_envelope(response).await
    }

    pub async fn nearby(
        &self,
        point: Coordinate,
        radius: Option<f64>,
    ) -> Result<Vec<NearbyLocation>, ClientError> {
        let body = NearbyRequest {
            lat: point.lat,
            lng: point.lng,
            radius,
        };
        let response = self
            .http
            .post(self.url("/api/nearby"))
            .json(&body)
            .send()
            .await?;
        read_envelope(response).await
    }

    pub async fn navigate(
        &self,
        position: Coordinate,
        destination: Coordinate,
        heading: Option<f64>,
    ) -> Result<Navigation, ClientError> {
        let body = NavigateRequest {
            position,
            destination,
            heading,
        };
        let response = self
            .http
            .post(self.url("/api/navigate"))
            .json(&body)
            .send()
            .await?;
        read_envelope(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/api/locations/{id}` with `id` percent-encoded as a single path segment.
    fn location_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.url("/api/locations"))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot take a path", self.base_url)))?
            .push(id);
        Ok(url)
    }
}

async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let envelope: ApiResponse<T> = response.json().await?;
    match envelope {
        ApiResponse {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ApiResponse { error, .. } => Err(ClientError::Api {
            status,
            message: error.unwrap_or_else(|| "response carried no data".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = CampusClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.url("/health"), "http://localhost:3001/health");
    }

    #[test]
    fn location_id_is_a_single_encoded_segment() {
        let client = CampusClient::new("http://localhost:3001/");
        assert_eq!(
            client.location_url("elm-hall").unwrap().as_str(),
            "http://localhost:3001/api/locations/elm-hall"
        );
        assert_eq!(
            client.location_url("a b/c?d").unwrap().as_str(),
            "http://localhost:3001/api/locations/a%20b%2Fc%3Fd"
        );
    }

    #[test]
    fn unparseable_base_url_is_reported() {
        let client = CampusClient::new("not a url");
        assert!(matches!(client.location_url("library"), Err(ClientError::InvalidUrl(_))));
    }
}
