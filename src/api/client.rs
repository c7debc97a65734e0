//! Reqwest client for the auth and inference endpoints

use std::time::Duration;

use super::error::ApiError;
use super::types::{
    AssistRequest, AssistResponse, AuthProvider, AuthRequest, AuthSession, Subject, TaskType,
};
use crate::config::EndpointsConfig;

/// Client for both remote MegaChat endpoints
///
/// Cheap to clone indirectly: wrap in `Arc` and share between the UI loop
/// and spawned request tasks.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    assist_url: String,
    auth_url: String,
}

impl ApiClient {
    pub fn new(endpoints: &EndpointsConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(endpoints.timeout_secs.max(1)))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            assist_url: endpoints.assist_url.clone(),
            auth_url: endpoints.auth_url.clone(),
        }
    }

    /// Send one user message through the inference endpoint
    ///
    /// A single sequential POST: no retries, no streaming. The caller
    /// correlates the eventual result back to its exchange.
    pub async fn send_message(
        &self,
        message: &str,
        task_type: TaskType,
        subject: Subject,
    ) -> Result<String, ApiError> {
        let request = AssistRequest {
            message,
            task_type,
            subject,
        };

        let response = self
            .http
            .post(&self.assist_url)
            .json(&request)
            .send()
            .await
            .map_err(ApiError::from_network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_http_status(status, &body));
        }

        let parsed: AssistResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        parsed
            .response
            .ok_or_else(|| ApiError::Malformed("missing `response` field".to_string()))
    }

    /// Exchange a fabricated provider user for a bearer token
    pub async fn authenticate(&self, provider: AuthProvider) -> Result<AuthSession, ApiError> {
        let user = provider.mock_user();
        let request = AuthRequest {
            provider: provider.as_str(),
            user_data: &user,
        };

        let response = self
            .http
            .post(&self.auth_url)
            .json(&request)
            .send()
            .await
            .map_err(ApiError::from_network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_http_status(status, &body));
        }

        let session: AuthSession = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        if session.token.is_empty() || !session.user.is_valid() {
            return Err(ApiError::Malformed(
                "auth response missing token or user".to_string(),
            ));
        }

        Ok(session)
    }
}
