//! Scheduled query rule provisioning.

use tracing::info;

use crate::arm::models::{
    AlertActions, AlertCondition, AlertCriteria, AlertRuleProperties, AlertRuleRequest,
    ConditionOperator, FailingPeriods, TimeAggregation,
};
use crate::arm::ArmClient;
use crate::config::DeploymentConfig;
use crate::error::ProvisionError;

/// API version for `microsoft.insights/scheduledQueryRules`.
pub const ALERT_RULE_API_VERSION: &str = "2023-12-01";

/// Query offered when the operator does not supply one.
pub const DEFAULT_QUERY: &str = "AzureActivity | where Level == \"Error\"";

const DESCRIPTION: &str = "Alert on custom query";
const SEVERITY: u8 = 3;
const EVALUATION_FREQUENCY: &str = "PT5M";
const WINDOW_SIZE: &str = "PT5M";

/// Build the rule body: alert when `query` returns any rows in a 5 minute
/// window, notifying `action_group_id`.
#[must_use]
pub fn build_request(
    config: &DeploymentConfig,
    action_group_id: &str,
    query: &str,
) -> AlertRuleRequest {
    AlertRuleRequest {
        location: config.alert_rule_location.clone(),
        properties: AlertRuleProperties {
            enabled: true,
            description: DESCRIPTION.to_string(),
            severity: SEVERITY,
            evaluation_frequency: EVALUATION_FREQUENCY.to_string(),
            window_size: WINDOW_SIZE.to_string(),
            scopes: vec![config.workspace_id()],
            criteria: AlertCriteria {
                all_of: vec![AlertCondition {
                    query: query.to_string(),
                    time_aggregation: TimeAggregation::Count,
                    operator: ConditionOperator::GreaterThan,
                    threshold: 0,
                    failing_periods: FailingPeriods {
                        number_of_evaluation_periods: 1,
                        min_failing_periods_to_alert: 1,
                    },
                }],
            },
            actions: AlertActions {
                action_groups: vec![action_group_id.to_string()],
            },
        },
    }
}

/// Create the scheduled query rule.
///
/// # Errors
/// Returns any [`ArmClient::put_resource`] error.
pub async fn create_alert_rule(
    client: &ArmClient,
    config: &DeploymentConfig,
    action_group_id: &str,
    query: &str,
) -> Result<(), ProvisionError> {
    info!(
        name = %config.alert_rule_name,
        workspace = %config.workspace_name,
        "Creating alert rule"
    );

    let body = build_request(config, action_group_id, query);
    client
        .put_resource(
            "alert rule",
            &config.alert_rule_id(),
            ALERT_RULE_API_VERSION,
            &body,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sample;
    use serde_json::json;

    #[test]
    fn test_rule_body() {
        let config = sample();
        let ag_id = config.action_group_id();
        let body =
            serde_json::to_value(build_request(&config, &ag_id, "Heartbeat | take 1")).unwrap();

        assert_eq!(body["location"], "westeurope");
        let props = &body["properties"];
        assert_eq!(props["enabled"], true);
        assert_eq!(props["severity"], 3);
        assert_eq!(props["evaluationFrequency"], "PT5M");
        assert_eq!(props["windowSize"], "PT5M");
        assert_eq!(
            props["scopes"],
            json!(["/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.OperationalInsights/workspaces/ws1"])
        );
        assert_eq!(
            props["criteria"]["allOf"],
            json!([{
                "query": "Heartbeat | take 1",
                "timeAggregation": "Count",
                "operator": "GreaterThan",
                "threshold": 0,
                "failingPeriods": {
                    "numberOfEvaluationPeriods": 1,
                    "minFailingPeriodsToAlert": 1
                }
            }])
        );
    }

    #[test]
    fn test_rule_references_exactly_the_action_group() {
        let body = serde_json::to_value(build_request(&sample(), "/some/action/group", "q")).unwrap();
        assert_eq!(
            body["properties"]["actions"]["actionGroups"],
            json!(["/some/action/group"])
        );
    }
}
