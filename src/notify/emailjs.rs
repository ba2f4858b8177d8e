use super::{DeliveryError, NotificationRequest, Notifier};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "https://api.emailjs.com";
const SEND_PATH: &str = "/api/v1.0/email/send";

/// Sends notifications through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsNotifier {
    client: Client,
    endpoint: String,
    service_id: String,
    user_id: String,
}

impl EmailJsNotifier {
    pub fn new(service_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            service_id: service_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Point at a different host, e.g. a local mock.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn send_url(&self) -> String {
        format!("{}{}", self.endpoint, SEND_PATH)
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn send(&self, request: &NotificationRequest) -> Result<bool, DeliveryError> {
        let url = self.send_url();
        let body = json!({
            "service_id": self.service_id,
            "template_id": request.template_id,
            "user_id": self.user_id,
            "template_params": request.params,
        });

        debug!(url = %url, template = %request.template_id, "Sending notification");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(template = %request.template_id, "Notification delivered");
        Ok(true)
    }
}
