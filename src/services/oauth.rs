//! OAuth2 client-credentials token provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::token::TokenProvider;
use crate::{
    config::OAuthConfig,
    error::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Clone)]
pub struct OAuthClient {
    client: Client,
    config: OAuthConfig,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig) -> AppResult<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            config,
        })
    }

    fn form(&self) -> Vec<(&'static str, &str)> {
        let mut form = vec![
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        if let Some(scope) = self.config.scope.as_deref() {
            form.push(("scope", scope));
        }
        form
    }
}

#[async_trait]
impl TokenProvider for OAuthClient {
    async fn fetch_token(&self) -> AppResult<String> {
        tracing::debug!(url = %self.config.token_url, client_id = %self.config.client_id, "Requesting access token");

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&self.form())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::TokenCache(format!(
                "Token endpoint returned HTTP {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await?;
        if token
            .token_type
            .as_deref()
            .is_some_and(|t| !t.eq_ignore_ascii_case("bearer"))
        {
            tracing::warn!(token_type = ?token.token_type, "Unexpected token type");
        }
        tracing::info!(expires_in = ?token.expires_in, "Access token received");

        Ok(token.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_includes_scope_when_set() {
        let client = OAuthClient::new(OAuthConfig {
            scope: Some("products.read".to_string()),
            client_secret: "secret".to_string(),
            ..Default::default()
        })
        .unwrap();
        let form = client.form();
        assert_eq!(form[0], ("grant_type", "client_credentials"));
        assert_eq!(form[2], ("client_secret", "secret"));
        assert_eq!(form.last(), Some(&("scope", "products.read")));
    }

    #[test]
    fn test_form_without_scope() {
        let client = OAuthClient::new(OAuthConfig::default()).unwrap();
        assert!(client.form().iter().all(|(k, _)| *k != "scope"));
    }

    #[test]
    fn test_token_response_parsing() {
        let token: TokenResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600}"#).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, Some(3600));
    }
}
