use crate::error::AgentError;
use reqwest::Client;
use serde::Serialize;

/// Minimal bearer-auth JSON client shared by provider implementations.
#[derive(Clone)]
pub struct BaseApiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl BaseApiClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    pub async fn send_request<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<String, AgentError> {
        let url = format!("{}/{}", self.endpoint, path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AgentError::Api(format!(
                "API returned {} for {}: {}",
                status, url, body
            )));
        }

        Ok(body)
    }
}
