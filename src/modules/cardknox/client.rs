use super::types::{
    CaptureRequest, Credentials, GatewayResponse, PaymentRequest, RefundRequest, VoidRequest,
    WireResponse, DEFAULT_API_VERSION,
};
use crate::core::{AppError, Result};
use masking::Secret;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Cardknox gateway client
///
/// One JSON POST per operation against the transaction endpoint.
/// API Documentation: https://kb.cardknox.com/api
pub struct CardknoxClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

/// Common fields wrapped around every command payload
#[derive(Serialize)]
struct CommandEnvelope<'a, T: Serialize> {
    #[serde(rename = "xKey")]
    key: &'a Secret<String>,
    #[serde(rename = "xVersion")]
    version: &'a str,
    #[serde(rename = "xSoftwareName")]
    software_name: &'a str,
    #[serde(rename = "xSoftwareVersion")]
    software_version: &'a str,
    #[serde(rename = "xCommand")]
    command: &'a str,
    #[serde(flatten)]
    payload: &'a T,
}

impl CardknoxClient {
    /// Create a new Cardknox client
    ///
    /// # Arguments
    /// * `credentials` - merchant transaction key plus software identification
    /// * `base_url` - gateway base URL (from CARDKNOX_BASE_URL)
    /// * `timeout` - request timeout; an elapsed timeout classifies the
    ///   operation as `Timeout` rather than failing the call
    pub fn new(credentials: Credentials, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::gateway(format!("Failed to build gateway client: {}", e)))?;

        Ok(Self {
            client,
            credentials,
            base_url,
        })
    }

    /// Reserve funds without capturing them
    pub async fn auth_only(&self, request: &PaymentRequest) -> GatewayResponse {
        self.dispatch("cc:authonly", request).await
    }

    /// Authorize and capture in one step
    pub async fn sale(&self, request: &PaymentRequest) -> GatewayResponse {
        self.dispatch("cc:sale", request).await
    }

    /// Capture a prior authorization
    pub async fn capture(&self, request: &CaptureRequest) -> GatewayResponse {
        self.dispatch("cc:capture", request).await
    }

    /// Refund a captured charge, fully or partially
    pub async fn refund(&self, request: &RefundRequest) -> GatewayResponse {
        self.dispatch("cc:refund", request).await
    }

    /// Cancel an authorization before capture
    pub async fn void(&self, request: &VoidRequest) -> GatewayResponse {
        self.dispatch("cc:void", request).await
    }

    /// Send one command and classify the outcome
    ///
    /// Operations are dispatched exactly once: a timeout or transport failure
    /// is classified into the response, never retried. Response bodies are
    /// not logged; they can carry account data.
    async fn dispatch<T: Serialize>(&self, command: &str, payload: &T) -> GatewayResponse {
        let url = format!("{}/gatewayjson", self.base_url);
        let envelope = CommandEnvelope {
            key: &self.credentials.transaction_key,
            version: self
                .credentials
                .api_version
                .as_deref()
                .unwrap_or(DEFAULT_API_VERSION),
            software_name: &self.credentials.software_name,
            software_version: &self.credentials.software_version,
            command,
            payload,
        };

        let response = match self.client.post(&url).json(&envelope).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::warn!(command = %command, "Gateway request timed out");
                return GatewayResponse::timeout(format!("Gateway request timed out: {}", e));
            }
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "Gateway request failed");
                return GatewayResponse::http_exception(
                    "transport",
                    format!("Gateway request failed: {}", e),
                );
            }
        };

        let status_code = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => {
                tracing::warn!(command = %command, "Gateway response timed out");
                return GatewayResponse::timeout(format!("Gateway response timed out: {}", e));
            }
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "Failed to read gateway response");
                return GatewayResponse::http_exception(
                    "transport",
                    format!("Failed to read gateway response: {}", e),
                );
            }
        };

        if !status_code.is_success() {
            tracing::warn!(
                command = %command,
                status = status_code.as_u16(),
                "Gateway returned non-success HTTP status"
            );
            return GatewayResponse::http_exception(
                status_code.as_u16().to_string(),
                format!("Gateway returned HTTP {}", status_code),
            );
        }

        let outcome = match serde_json::from_str::<WireResponse>(&body) {
            Ok(wire) => GatewayResponse::from_wire(wire),
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "Undecodable gateway response");
                GatewayResponse::http_exception(
                    "parse",
                    format!("Failed to decode gateway response: {}", e),
                )
            }
        };

        tracing::debug!(
            command = %command,
            response_type = ?outcome.response_type,
            reference_number = outcome.reference_number.as_deref().unwrap_or(""),
            "Gateway command completed"
        );

        outcome
    }
}
