//! Error types for provisioning.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while provisioning alerting resources.
///
/// Every variant is fatal for a run: nothing is retried and nothing that was
/// already created remotely is rolled back.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Config file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not the expected JSON shape.
    #[error("Failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Identity CLI could not be started or exited non-zero.
    #[error("Failed to get access token: {0}")]
    TokenCommand(String),

    /// Identity CLI output is not valid JSON.
    #[error("Failed to parse access token output: {0}")]
    TokenParse(#[source] serde_json::Error),

    /// Identity CLI output has no string `accessToken` field.
    #[error("Access token not found in CLI output")]
    TokenMissing,

    /// Notification type is neither `email` nor `sms`.
    #[error("Invalid notification type '{0}', choose 'email' or 'sms'")]
    InvalidNotificationType(String),

    /// Request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request could not be built or sent, or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// ARM answered with a status of 300 or above.
    #[error("Failed to create {kind}: {status}\nResponse body: {body}")]
    Rejected {
        kind: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}
