//! Reqwest-backed schedule gateway adapter.
//!
//! This adapter owns transport details only: URL layout, authorisation,
//! timeout and HTTP error mapping, and JSON decoding into wire shapes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::domain::Destination;
use crate::domain::OfferGroup;
use crate::domain::PointId;
use crate::domain::ports::{ScheduleGateway, ScheduleGatewayError};
use crate::domain::wire::{PointDraftWire, PointWire};

const POINTS_PATH: &str = "points";
const DESTINATIONS_PATH: &str = "destinations";
const OFFERS_PATH: &str = "offers";

/// Schedule gateway adapter speaking JSON over HTTP against one endpoint.
///
/// The service lays its resources out flat under the endpoint: `points`,
/// `destinations`, and `offers`, with point mutations addressed as
/// `points/{id}`.
pub struct HttpScheduleGateway {
    client: Client,
    endpoint: Url,
    authorization: String,
}

impl HttpScheduleGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        authorization: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            authorization: authorization.into(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ScheduleGatewayError> {
        let mut url = self.endpoint.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ScheduleGatewayError::rejected("endpoint cannot carry path segments")
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, ScheduleGatewayError> {
        let url = self.url(segments)?;
        self.send_json(self.client.get(url)).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ScheduleGatewayError> {
        let body = self.send(request).await?;
        decode_json(&body)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ScheduleGatewayError> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, self.authorization.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ScheduleGateway for HttpScheduleGateway {
    async fn points(&self) -> Result<Vec<PointWire>, ScheduleGatewayError> {
        self.get_json(&[POINTS_PATH]).await
    }

    async fn destinations(&self) -> Result<Vec<Destination>, ScheduleGatewayError> {
        self.get_json(&[DESTINATIONS_PATH]).await
    }

    async fn offer_groups(&self) -> Result<Vec<OfferGroup>, ScheduleGatewayError> {
        self.get_json(&[OFFERS_PATH]).await
    }

    async fn update_point(&self, point: &PointWire) -> Result<PointWire, ScheduleGatewayError> {
        let url = self.url(&[POINTS_PATH, point.id.as_str()])?;
        self.send_json(self.client.put(url).json(point)).await
    }

    async fn add_point(&self, draft: &PointDraftWire) -> Result<PointWire, ScheduleGatewayError> {
        let url = self.url(&[POINTS_PATH])?;
        self.send_json(self.client.post(url).json(draft)).await
    }

    async fn delete_point(&self, id: &PointId) -> Result<(), ScheduleGatewayError> {
        let url = self.url(&[POINTS_PATH, id.as_str()])?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ScheduleGatewayError> {
    serde_json::from_slice(body).map_err(|error| {
        ScheduleGatewayError::decode(format!("invalid schedule JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> ScheduleGatewayError {
    if error.is_timeout() {
        ScheduleGatewayError::timeout(error.to_string())
    } else {
        ScheduleGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ScheduleGatewayError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => ScheduleGatewayError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ScheduleGatewayError::timeout(message)
        }
        _ if status.is_client_error() => ScheduleGatewayError::rejected(message),
        _ => ScheduleGatewayError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
