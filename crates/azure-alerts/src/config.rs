//! Deployment configuration.
//!
//! The config file is a flat JSON object naming the subscription, resource
//! group, regions and resource names to deploy. Every field is required.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProvisionError;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Static deployment parameters, read once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    /// Azure subscription ID.
    #[serde(rename = "subscriptionID")]
    pub subscription_id: String,
    /// Resource group holding both resources and the workspace.
    pub resource_group: String,
    /// Region for the action group (usually "global").
    pub action_group_location: String,
    /// Region for the scheduled query rule.
    pub alert_rule_location: String,
    /// Log Analytics workspace the rule queries.
    pub workspace_name: String,
    /// Action group resource name.
    pub action_group_name: String,
    /// Scheduled query rule resource name.
    pub alert_rule_name: String,
}

impl DeploymentConfig {
    /// Load the config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::ConfigRead`] if the file cannot be read and
    /// [`ProvisionError::ConfigParse`] if it is not the expected shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProvisionError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading deployment config");

        let raw = std::fs::read_to_string(path).map_err(|source| ProvisionError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ProvisionError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resource group scope shared by every resource ID.
    fn resource_group_id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, self.resource_group
        )
    }

    /// Canonical resource ID of the action group.
    #[must_use]
    pub fn action_group_id(&self) -> String {
        format!(
            "{}/providers/microsoft.insights/actionGroups/{}",
            self.resource_group_id(),
            self.action_group_name
        )
    }

    /// Canonical resource ID of the scheduled query rule.
    #[must_use]
    pub fn alert_rule_id(&self) -> String {
        format!(
            "{}/providers/microsoft.insights/scheduledQueryRules/{}",
            self.resource_group_id(),
            self.alert_rule_name
        )
    }

    /// Canonical resource ID of the Log Analytics workspace.
    #[must_use]
    pub fn workspace_id(&self) -> String {
        format!(
            "{}/providers/Microsoft.OperationalInsights/workspaces/{}",
            self.resource_group_id(),
            self.workspace_name
        )
    }
}

#[cfg(test)]
pub(crate) fn sample() -> DeploymentConfig {
    DeploymentConfig {
        subscription_id: "s1".to_string(),
        resource_group: "rg1".to_string(),
        action_group_location: "global".to_string(),
        alert_rule_location: "westeurope".to_string(),
        workspace_name: "ws1".to_string(),
        action_group_name: "ag1".to_string(),
        alert_rule_name: "ar1".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_JSON: &str = r#"{
        "subscriptionID": "s1",
        "resourceGroup": "rg1",
        "actionGroupLocation": "global",
        "alertRuleLocation": "westeurope",
        "workspaceName": "ws1",
        "actionGroupName": "ag1",
        "alertRuleName": "ar1"
    }"#;

    #[test]
    fn test_load_reproduces_every_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_JSON.as_bytes()).unwrap();

        let config = DeploymentConfig::load(file.path()).unwrap();
        assert_eq!(config, sample());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DeploymentConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigRead { .. }));
    }

    #[test]
    fn test_load_rejects_missing_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"subscriptionID": "s1", "resourceGroup": "rg1"}"#)
            .unwrap();

        let err = DeploymentConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let err = DeploymentConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ProvisionError::ConfigParse { .. }));
    }

    #[test]
    fn test_resource_ids() {
        let config = sample();
        assert_eq!(
            config.action_group_id(),
            "/subscriptions/s1/resourceGroups/rg1/providers/microsoft.insights/actionGroups/ag1"
        );
        assert_eq!(
            config.alert_rule_id(),
            "/subscriptions/s1/resourceGroups/rg1/providers/microsoft.insights/scheduledQueryRules/ar1"
        );
        assert_eq!(
            config.workspace_id(),
            "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.OperationalInsights/workspaces/ws1"
        );
    }
}
