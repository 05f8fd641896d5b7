//! End-to-end provisioning run.
//!
//! Token → action group → alert rule, strictly in that order. The first
//! error stops the run; resources already created are left in place.

use std::time::Duration;

use tracing::info;

use crate::action_group::{self, NotificationChannel, ACTION_GROUP_API_VERSION};
use crate::alert_rule::{self, ALERT_RULE_API_VERSION};
use crate::arm::{resource_url, ArmClient, ARM_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::config::DeploymentConfig;
use crate::error::ProvisionError;
use crate::token::{TokenProvider, ARM_RESOURCE};
use crate::ui;

/// Operator input for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionRequest {
    /// Notification channel of the action group.
    pub channel: NotificationChannel,
    /// Email address or phone number.
    pub target: String,
    /// Kusto query the alert rule evaluates.
    pub query: String,
}

/// Resources created by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOutcome {
    /// Action group resource ID.
    pub action_group_id: String,
    /// Alert rule resource ID.
    pub alert_rule_id: String,
}

/// A request that a run would send, for dry runs.
#[derive(Debug, Clone)]
pub struct PlannedRequest {
    /// Resource kind.
    pub kind: &'static str,
    /// Full `PUT` URL.
    pub url: String,
    /// JSON body.
    pub body: serde_json::Value,
}

/// Runs provisioning against an ARM endpoint.
#[derive(Debug, Clone)]
pub struct Provisioner {
    config: DeploymentConfig,
    base_url: String,
    timeout: Duration,
}

impl Provisioner {
    /// Create a provisioner for the public ARM endpoint.
    #[must_use]
    pub fn new(config: DeploymentConfig) -> Self {
        Self {
            config,
            base_url: ARM_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the ARM base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch a token and create both resources.
    ///
    /// # Errors
    /// Returns the first error from the token provider or either `PUT`.
    pub async fn run(
        &self,
        tokens: &dyn TokenProvider,
        request: &ProvisionRequest,
    ) -> Result<ProvisionOutcome, ProvisionError> {
        ui::print_progress_step(1, 3, "Fetching access token...");
        let token = tokens.access_token(ARM_RESOURCE).await?;
        let client = ArmClient::with_base_url(&self.base_url, token, self.timeout)?;

        ui::print_progress_step(2, 3, "Creating action group...");
        let action_group_id = action_group::create_action_group(
            &client,
            &self.config,
            request.channel,
            &request.target,
        )
        .await?;
        ui::print_success("Action group created.");

        ui::print_progress_step(3, 3, "Creating alert rule...");
        alert_rule::create_alert_rule(&client, &self.config, &action_group_id, &request.query)
            .await?;
        ui::print_success("Alert rule created.");

        info!(action_group_id = %action_group_id, "Provisioning complete");

        Ok(ProvisionOutcome {
            action_group_id,
            alert_rule_id: self.config.alert_rule_id(),
        })
    }

    /// The requests [`Provisioner::run`] would send, without sending them.
    ///
    /// # Errors
    /// Returns [`ProvisionError::Serialization`] if a body cannot be encoded.
    pub fn plan(&self, request: &ProvisionRequest) -> Result<Vec<PlannedRequest>, ProvisionError> {
        let action_group_id = self.config.action_group_id();
        let action_group =
            action_group::build_request(&self.config, request.channel, &request.target);
        let alert_rule = alert_rule::build_request(&self.config, &action_group_id, &request.query);

        Ok(vec![
            PlannedRequest {
                kind: "action group",
                url: resource_url(&self.base_url, &action_group_id, ACTION_GROUP_API_VERSION),
                body: serde_json::to_value(action_group)?,
            },
            PlannedRequest {
                kind: "alert rule",
                url: resource_url(
                    &self.base_url,
                    &self.config.alert_rule_id(),
                    ALERT_RULE_API_VERSION,
                ),
                body: serde_json::to_value(alert_rule)?,
            },
        ])
    }
}
