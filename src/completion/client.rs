//! Blocking client for the hosted completion service.

use reqwest::blocking::Client;

use crate::error::{Error, Result};

use super::types::{parse_response, ChatRequest};
use super::{CompletionConfig, CompletionService, Credential, CredentialSource};

/// Chat-completion client for an OpenAI-compatible endpoint.
pub struct ChatCompletionClient {
    http: Client,
    config: CompletionConfig,
    credential: Credential,
}

impl ChatCompletionClient {
    /// Create a client with an already-resolved credential.
    pub fn new(credential: Credential, config: CompletionConfig) -> Result<Self> {
        // reqwest's blocking client defaults to a 30s timeout; only set one
        // when configured.
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            config,
            credential,
        })
    }

    /// Resolve the credential once and create a client.
    ///
    /// A missing credential fails here, before any network call.
    pub fn from_source(source: &CredentialSource, config: CompletionConfig) -> Result<Self> {
        let credential = source.resolve()?;
        Self::new(credential, config)
    }

    /// The active configuration.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

impl CompletionService for ChatCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::single_turn(
            &self.config.model,
            prompt,
            self.config.temperature,
            self.config.max_tokens,
        );

        log::debug!(
            "POST {} (model {}, prompt {} chars)",
            self.config.endpoint,
            self.config.model,
            prompt.chars().count()
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(self.credential.expose())
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::CompletionStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}
