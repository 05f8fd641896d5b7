//! Bearer token acquisition.
//!
//! Tokens come from an already signed-in Azure CLI (`az account
//! get-access-token`). One token is fetched per run and reused for both
//! requests; there is no caching or refresh.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::ProvisionError;

/// Audience for Azure Resource Manager tokens.
pub const ARM_RESOURCE: &str = "https://management.azure.com/";

/// Source of bearer tokens for a resource audience.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get an access token scoped to `resource`.
    async fn access_token(&self, resource: &str) -> Result<String, ProvisionError>;
}

/// Token provider backed by the Azure CLI.
#[derive(Debug, Clone)]
pub struct AzureCliTokenProvider {
    program: String,
}

impl Default for AzureCliTokenProvider {
    fn default() -> Self {
        Self::new("az")
    }
}

impl AzureCliTokenProvider {
    /// Create a provider that runs `program` as the Azure CLI.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for AzureCliTokenProvider {
    async fn access_token(&self, resource: &str) -> Result<String, ProvisionError> {
        debug!(program = %self.program, resource = %resource, "Requesting access token");

        let output = Command::new(&self.program)
            .args(["account", "get-access-token", "--resource", resource])
            .output()
            .await
            .map_err(|e| ProvisionError::TokenCommand(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProvisionError::TokenCommand(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let token = parse_access_token(&output.stdout)?;
        info!("Access token acquired");
        Ok(token)
    }
}

/// Token provider that hands out a token obtained elsewhere.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Wrap a pre-obtained token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenProvider")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self, _resource: &str) -> Result<String, ProvisionError> {
        Ok(self.token.clone())
    }
}

/// Extract `accessToken` from the CLI's JSON output.
///
/// # Errors
///
/// Returns [`ProvisionError::TokenParse`] if the output is not JSON and
/// [`ProvisionError::TokenMissing`] if the field is absent or not a string.
pub fn parse_access_token(stdout: &[u8]) -> Result<String, ProvisionError> {
    let value: serde_json::Value =
        serde_json::from_slice(stdout).map_err(ProvisionError::TokenParse)?;

    value
        .get("accessToken")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(ProvisionError::TokenMissing)
}
