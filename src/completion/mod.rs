//! Completion service: the hosted language model treated as an opaque
//! text-in, text-out collaborator.
//!
//! The pipeline talks to the service through [`CompletionService`], so any
//! backend (or a test double) can stand in for the HTTP client.
//!
//! # Example
//!
//! ```no_run
//! use glrfill::completion::{
//!     ChatCompletionClient, CompletionConfig, CompletionService, CredentialSource,
//! };
//!
//! fn main() -> glrfill::Result<()> {
//!     let client = ChatCompletionClient::from_source(
//!         &CredentialSource::default(),
//!         CompletionConfig::default(),
//!     )?;
//!     println!("{}", client.complete("Say hello")?);
//!     Ok(())
//! }
//! ```

mod client;
mod credential;
pub mod types;

pub use client::ChatCompletionClient;
pub use credential::{Credential, CredentialSource, DEFAULT_CREDENTIAL_VAR};

use std::time::Duration;

use crate::error::Result;

/// Default chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default generation cap.
pub const DEFAULT_MAX_TOKENS: u32 = 8000;

/// A text-completion backend.
pub trait CompletionService {
    /// Send one single-turn prompt and return the generated text.
    fn complete(&self, prompt: &str) -> Result<String>;
}

impl<S: CompletionService + ?Sized> CompletionService for Box<S> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

impl<S: CompletionService + ?Sized> CompletionService for &S {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

/// Settings for the completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    /// Chat completions URL
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum generated tokens
    pub max_tokens: u32,

    /// Request timeout (None = wait indefinitely)
    pub timeout: Option<Duration>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: None,
        }
    }
}

impl CompletionConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the generation cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
