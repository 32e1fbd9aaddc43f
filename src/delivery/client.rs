//! Ingestion client.

use serde_json::Value;

use crate::config::HarvestConfig;
use crate::endpoint::Capture;
use crate::error::{HarvestError, HarvestResult, NetworkError};
use crate::json::str_at;
use crate::traits::{
    json_headers, Headers, HttpClient, SettingsStore, KEY_BRAND_NAME, KEY_CLIENT_IP,
    KEY_USER_NAME,
};

use super::payload::{ConversationPayload, ProductPayload, Sender};

/// Posts captures to the ingestion backend.
///
/// One attempt per capture. Settings are read fresh for every delivery; the
/// client IP is looked up once and then served from the settings cache.
pub struct IngestClient<H, S> {
    http: H,
    settings: S,
    config: HarvestConfig,
}

impl<H: HttpClient, S: SettingsStore> IngestClient<H, S> {
    pub fn new(http: H, settings: S, config: HarvestConfig) -> Self {
        Self {
            http,
            settings,
            config,
        }
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Read a setting. Storage errors and empty values read as unset.
    async fn setting(&self, key: &str) -> Option<String> {
        match self.settings.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read setting");
                None
            }
        }
    }

    /// The cached client IP, or one bounded lookup. Any failure yields `""`.
    pub async fn client_ip(&self) -> String {
        if let Some(ip) = self.setting(KEY_CLIENT_IP).await {
            return ip;
        }

        let url = &self.config.ip_lookup_url;
        let lookup = tokio::time::timeout(
            self.config.ip_lookup_timeout,
            self.http.get(url, &Headers::new()),
        )
        .await;

        let response = match lookup {
            Ok(Ok(response)) if response.is_success() => response,
            Ok(Ok(response)) => {
                tracing::error!(status = response.status, "IP lookup failed");
                return String::new();
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "IP lookup failed");
                return String::new();
            }
            Err(_) => {
                tracing::error!(
                    timeout_ms = self.config.ip_lookup_timeout.as_millis() as u64,
                    "IP lookup timed out"
                );
                return String::new();
            }
        };

        let ip = response
            .json::<Value>()
            .ok()
            .and_then(|body| str_at(&body, &["ip"]).map(str::to_string))
            .unwrap_or_default();

        if ip.is_empty() {
            return ip;
        }

        if let Err(e) = self.settings.set(KEY_CLIENT_IP, &ip).await {
            tracing::warn!(error = %e, "could not cache client IP");
        }
        ip
    }

    async fn sender(&self, with_ip: bool) -> Sender {
        let client_ip = if with_ip {
            self.client_ip().await
        } else {
            String::new()
        };
        Sender {
            user_name: self.setting(KEY_USER_NAME).await,
            brand_name: self.setting(KEY_BRAND_NAME).await,
            client_ip,
        }
    }

    /// Deliver a capture, returning the backend's acknowledgement body.
    ///
    /// Fails unless the backend answers 2xx with `ok == true`.
    pub async fn try_deliver(&self, capture: &Capture) -> HarvestResult<Value> {
        let source = self.config.source_tag.as_str();
        let (url, body) = match capture {
            Capture::Conversation(record) => {
                let sender = self.sender(true).await;
                let payload = ConversationPayload::new(source, record.clone(), &sender);
                (self.config.ingest_url(), serde_json::to_string(&payload)?)
            }
            Capture::Product {
                conversation_id,
                record,
            } => {
                let sender = self.sender(false).await;
                let payload =
                    ProductPayload::new(source, conversation_id.as_str(), record.clone(), &sender);
                (
                    self.config.ingest_product_url(),
                    serde_json::to_string(&payload)?,
                )
            }
        };

        tracing::debug!(url = %url, bytes = body.len(), "posting capture");

        let response = self
            .http
            .post(&url, &body, &json_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, &url, self.config.request_timeout))?;

        if !response.is_success() {
            return Err(NetworkError::HttpStatus {
                status: response.status,
                message: response.text().unwrap_or_default(),
            }
            .into());
        }

        let ack = response.json::<Value>().map_err(|e| NetworkError::InvalidResponse {
            message: e.to_string(),
        })?;

        if ack.get("ok") != Some(&Value::Bool(true)) {
            return Err(NetworkError::NotAcknowledged {
                body: ack.to_string(),
            }
            .into());
        }

        Ok(ack)
    }

    /// Deliver a capture and report a plain outcome. Never retries.
    pub async fn deliver(&self, capture: &Capture) -> bool {
        let endpoint = capture.endpoint();
        match self.try_deliver(capture).await {
            Ok(ack) => {
                tracing::info!(%endpoint, %ack, "capture ingested");
                true
            }
            Err(e @ HarvestError::Network(NetworkError::NotAcknowledged { .. })) => {
                tracing::warn!(%endpoint, error = %e, "backend responded without ok=true");
                false
            }
            Err(e) => {
                tracing::error!(
                    %endpoint,
                    code = e.error_code(),
                    category = %e.category(),
                    hint = e.recovery_hint(),
                    error = %e,
                    "delivery failed"
                );
                false
            }
        }
    }
}
