//! HTTP Benefit Directory
//!
//! JSON-over-HTTP client for the benefit service:
//!
//! | call          | request                                   |
//! |---------------|-------------------------------------------|
//! | lookup        | `GET    {benefits}/{id}`                  |
//! | transfer      | `POST   {benefits}/{transfer_segment}`    |
//! | list          | `GET    {benefits}`                       |
//! | list_active   | `GET    {benefits}/{active_segment}`      |
//! | create        | `POST   {benefits}`                       |
//! | update        | `PUT    {benefits}/{id}`                  |
//! | deactivate    | `DELETE {benefits}/{id}` (soft delete)    |
//!
//! Error bodies carry the reason under `message` or `error`; `message` wins.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{BenefitDirectory, DirectoryError};
use crate::benefit::Benefit;
use crate::config::DirectoryConfig;
use crate::transfer::types::{TransferAck, TransferRequest, TransferResult};

/// Error payload returned by the benefit service
#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorPayload {
    /// `message` first, then `error`; blank strings count as absent
    fn reason(self) -> Option<String> {
        let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        non_blank(self.message).or_else(|| non_blank(self.error))
    }
}

pub struct HttpBenefitDirectory {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl HttpBenefitDirectory {
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        info!(
            base_url = %config.base_url,
            benefits_path = %config.benefits_path,
            "Initializing benefit directory client"
        );

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| DirectoryError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn collection_url(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.benefits_path
        )
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn transfer_url(&self) -> String {
        format!("{}/{}", self.collection_url(), self.config.transfer_segment)
    }

    fn active_url(&self) -> String {
        format!("{}/{}", self.collection_url(), self.config.active_segment)
    }

    pub async fn list(&self) -> Result<Vec<Benefit>, DirectoryError> {
        let response = self.client.get(self.collection_url()).send().await?;
        decode(ensure_success(response).await?).await
    }

    pub async fn list_active(&self) -> Result<Vec<Benefit>, DirectoryError> {
        let response = self.client.get(self.active_url()).send().await?;
        decode(ensure_success(response).await?).await
    }

    pub async fn create(&self, benefit: &Benefit) -> Result<Benefit, DirectoryError> {
        benefit.validate()?;

        let response = self
            .client
            .post(self.collection_url())
            .json(benefit)
            .send()
            .await?;
        let created: Benefit = decode(ensure_success(response).await?).await?;
        info!(id = ?created.id, name = %created.name, "Benefit created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, benefit: &Benefit) -> Result<Benefit, DirectoryError> {
        benefit.validate()?;

        let response = self.client.put(self.item_url(id)).json(benefit).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id));
        }
        decode(ensure_success(response).await?).await
    }

    /// Soft delete: the server marks the benefit inactive
    pub async fn deactivate(&self, id: i64) -> Result<(), DirectoryError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id));
        }
        ensure_success(response).await?;
        info!(id, "Benefit deactivated");
        Ok(())
    }
}

#[async_trait]
impl BenefitDirectory for HttpBenefitDirectory {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn lookup(&self, id: i64) -> Result<Benefit, DirectoryError> {
        debug!(id, "Looking up benefit");

        let response = self.client.get(self.item_url(id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(id));
        }
        decode(ensure_success(response).await?).await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferResult, DirectoryError> {
        debug!(%request, "Submitting transfer");

        let response = self
            .client
            .post(self.transfer_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            // The server accepted the transfer; an empty or unexpected body
            // does not change that
            let ack = if body.trim().is_empty() {
                TransferAck::default()
            } else {
                serde_json::from_str::<TransferAck>(&body).unwrap_or_else(|e| {
                    warn!(status = status.as_u16(), error = %e, "Unreadable transfer acknowledgement");
                    TransferAck::default()
                })
            };
            // 2xx with an explicit `success: false` is still a rejection
            if ack.success == Some(false) {
                warn!(status = status.as_u16(), reason = ?ack.message, "Transfer rejected");
                return Ok(TransferResult::Failed {
                    reason: ack.message.filter(|m| !m.trim().is_empty()),
                });
            }
            return Ok(TransferResult::Success {
                message: ack.message,
            });
        }

        let reason = reason_from_body(&body);
        warn!(status = status.as_u16(), reason = ?reason, "Transfer rejected");
        Ok(TransferResult::Failed { reason })
    }
}

/// Reason text from an error body; non-JSON bodies yield none
fn reason_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(ErrorPayload::reason)
}

async fn ensure_success(response: Response) -> Result<Response, DirectoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DirectoryError::Rejected {
        status: status.as_u16(),
        reason: reason_from_body(&body),
    })
}

async fn decode<T>(response: Response) -> Result<T, DirectoryError>
where
    T: for<'de> Deserialize<'de>,
{
    response
        .json()
        .await
        .map_err(|e| DirectoryError::Decode(e.to_string()))
}
