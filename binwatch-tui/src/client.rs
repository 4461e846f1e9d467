//! Thin HTTP client for the binwatch JSON API.

use binwatch_core::{Alert, AlertId, Bin, BinId, BinStatus, Coordinate, DemoCity, DemoSummary};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde::de::{DeserializeOwned, IgnoredAny};

#[derive(thiserror::Error, Debug)]
pub(crate) enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message} ({status})")]
    Server { status: StatusCode, message: String },
}

/// `{"error": "..."}` bodies returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub(crate) struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub(crate) fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    pub(crate) async fn alerts(&self) -> Result<Vec<Alert>, ClientError> {
        fetch_json(self.client.get(self.url("/alerts"))).await
    }

    pub(crate) async fn bins(&self) -> Result<Vec<Bin>, ClientError> {
        fetch_json(self.client.get(self.url("/bins"))).await
    }

    pub(crate) async fn report_alert(
        &self,
        position: Coordinate,
        category: &str,
    ) -> Result<Alert, ClientError> {
        let body = position_body(position, Some(category));
        fetch_json(self.client.post(self.url("/alerts")).json(&body)).await
    }

    pub(crate) async fn dismiss_alert(&self, id: AlertId) -> Result<(), ClientError> {
        fetch_json::<IgnoredAny>(self.client.delete(self.url(&format!("/alerts/{id}"))))
            .await
            .map(drop)
    }

    pub(crate) async fn register_bin(&self, position: Coordinate) -> Result<Bin, ClientError> {
        let body = position_body(position, None);
        fetch_json(self.client.post(self.url("/bins")).json(&body)).await
    }

    pub(crate) async fn set_bin_status(
        &self,
        id: BinId,
        status: &BinStatus,
    ) -> Result<Bin, ClientError> {
        let body = StatusBody {
            status: status.as_str(),
        };
        fetch_json(self.client.put(self.url(&format!("/bins/{id}"))).json(&body)).await
    }

    pub(crate) async fn initialize_demo(&self, city: DemoCity) -> Result<DemoSummary, ClientError> {
        let body = CityBody { city: city.key() };
        fetch_json(self.client.post(self.url("/demo/initialize")).json(&body)).await
    }

    pub(crate) async fn clear_demo(&self) -> Result<(), ClientError> {
        fetch_json::<IgnoredAny>(self.client.post(self.url("/demo/clear")))
            .await
            .map(drop)
    }
}

#[derive(Serialize)]
struct PositionBody<'a> {
    lat: f64,
    lng: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

#[derive(Serialize)]
struct CityBody<'a> {
    city: &'a str,
}

fn position_body(position: Coordinate, category: Option<&str>) -> PositionBody<'_> {
    PositionBody {
        lat: position.lat,
        lng: position.lng,
        category,
    }
}

// Decode JSON, turning non-2xx answers into `ClientError::Server`.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
    let response = req.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text).unwrap_or(text);
    Err(ClientError::Server { status, message })
}

fn error_message(text: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(text).ok()?;
    Some(body.error)
}
