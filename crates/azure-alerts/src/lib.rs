//! Azure Monitor alert provisioning.
//!
//! Creates an action group (one email or SMS receiver) and a scheduled query
//! rule that notifies it, using the Azure Resource Manager REST API.
//!
//! ## Flow
//!
//! 1. Load a [`DeploymentConfig`] from JSON.
//! 2. Get a bearer token from a [`TokenProvider`] (the Azure CLI by default).
//! 3. `PUT` the action group; its resource ID is derived from the config.
//! 4. `PUT` the alert rule referencing that action group.
//!
//! Any failure stops the run. Nothing is retried or rolled back.
//!
//! # Example
//!
//! ```ignore
//! use azure_alerts::{AzureCliTokenProvider, DeploymentConfig, NotificationChannel,
//!     ProvisionRequest, Provisioner};
//!
//! let config = DeploymentConfig::load("config.json")?;
//! let request = ProvisionRequest {
//!     channel: NotificationChannel::Email,
//!     target: "ops@example.com".into(),
//!     query: "AzureActivity | where Level == \"Error\"".into(),
//! };
//! Provisioner::new(config)
//!     .run(&AzureCliTokenProvider::default(), &request)
//!     .await?;
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod action_group;
pub mod alert_rule;
pub mod arm;
pub mod config;
pub mod error;
pub mod provision;
pub mod token;
pub mod ui;

pub use action_group::NotificationChannel;
pub use config::DeploymentConfig;
pub use error::ProvisionError;
pub use provision::{PlannedRequest, ProvisionOutcome, ProvisionRequest, Provisioner};
pub use token::{AzureCliTokenProvider, StaticTokenProvider, TokenProvider};
