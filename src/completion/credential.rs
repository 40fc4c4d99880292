//! API credential and where it comes from.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};

/// Environment variable holding the completion service key.
pub const DEFAULT_CREDENTIAL_VAR: &str = "GROQ_API_KEY";

/// An API key for the completion service.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a key, rejecting blank values.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(Error::MissingCredential("API key is empty".to_string()));
        }
        Ok(Self(key))
    }

    /// The raw key, for the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Strategy for obtaining the credential, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read from a process environment variable
    Environment {
        /// Variable name
        var: String,
    },
    /// Ask on the terminal
    Interactive,
    /// Supplied directly (command-line flag, secrets store)
    Explicit(String),
}

impl Default for CredentialSource {
    fn default() -> Self {
        CredentialSource::Environment {
            var: DEFAULT_CREDENTIAL_VAR.to_string(),
        }
    }
}

impl CredentialSource {
    /// Resolve the credential. Interactive entry uses stdin/stderr.
    pub fn resolve(&self) -> Result<Credential> {
        let stdin = std::io::stdin();
        let stderr = std::io::stderr();
        self.resolve_with(&mut stdin.lock(), &mut stderr.lock())
    }

    /// Resolve the credential, prompting on `output` and reading `input`
    /// for interactive entry.
    pub fn resolve_with<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<Credential> {
        match self {
            CredentialSource::Environment { var } => match std::env::var(var) {
                Ok(value) if !value.trim().is_empty() => Credential::new(value),
                _ => Err(Error::MissingCredential(format!("{} is not set", var))),
            },
            CredentialSource::Interactive => {
                write!(output, "Groq API key: ")?;
                output.flush()?;
                let mut line = String::new();
                input.read_line(&mut line)?;
                Credential::new(line)
                    .map_err(|_| Error::MissingCredential("no API key entered".to_string()))
            }
            CredentialSource::Explicit(key) => Credential::new(key.as_str()),
        }
    }
}
