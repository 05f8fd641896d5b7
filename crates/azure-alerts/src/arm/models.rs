//! ARM request models for Azure Monitor resources.

use serde::Serialize;

// ============================================================================
// Action group (microsoft.insights/actionGroups)
// ============================================================================

/// Create action group request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroupRequest {
    /// Location.
    pub location: String,
    /// Properties.
    pub properties: ActionGroupProperties,
}

/// Action group properties. Exactly one receiver list is set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroupProperties {
    /// Short name shown in notifications.
    pub group_short_name: String,
    /// Whether the group sends notifications.
    pub enabled: bool,
    /// Email receivers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_receivers: Option<Vec<EmailReceiver>>,
    /// SMS receivers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_receivers: Option<Vec<SmsReceiver>>,
}

/// Email receiver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailReceiver {
    /// Receiver name, unique within the group.
    pub name: String,
    /// Email address.
    pub email_address: String,
    /// Receiver status.
    pub status: ReceiverStatus,
}

/// SMS receiver.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsReceiver {
    /// Receiver name, unique within the group.
    pub name: String,
    /// Country calling code, without `+`.
    pub country_code: String,
    /// Phone number.
    pub phone_number: String,
    /// Receiver status.
    pub status: ReceiverStatus,
}

/// Receiver status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReceiverStatus {
    Enabled,
}

// ============================================================================
// Scheduled query rule (microsoft.insights/scheduledQueryRules)
// ============================================================================

/// Create scheduled query rule request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRuleRequest {
    /// Location.
    pub location: String,
    /// Properties.
    pub properties: AlertRuleProperties,
}

/// Scheduled query rule properties.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRuleProperties {
    /// Whether the rule is evaluated.
    pub enabled: bool,
    /// Description.
    pub description: String,
    /// Severity, 0 (critical) to 4 (verbose).
    pub severity: u8,
    /// How often the rule runs (ISO 8601 duration).
    pub evaluation_frequency: String,
    /// Time range the query covers (ISO 8601 duration).
    pub window_size: String,
    /// Resource IDs the query runs against.
    pub scopes: Vec<String>,
    /// Alert conditions.
    pub criteria: AlertCriteria,
    /// Actions fired when the rule alerts.
    pub actions: AlertActions,
}

/// Alert conditions, all of which must hold.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCriteria {
    /// Conditions.
    pub all_of: Vec<AlertCondition>,
}

/// One log query condition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCondition {
    /// Kusto query text.
    pub query: String,
    /// Aggregation applied to the query result.
    pub time_aggregation: TimeAggregation,
    /// Comparison against the threshold.
    pub operator: ConditionOperator,
    /// Threshold.
    pub threshold: i64,
    /// How many evaluations must fail before alerting.
    pub failing_periods: FailingPeriods,
}

/// Query result aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeAggregation {
    Count,
}

/// Threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionOperator {
    GreaterThan,
}

/// Failing period policy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailingPeriods {
    /// Evaluations looked back over.
    pub number_of_evaluation_periods: u32,
    /// Failing evaluations needed to alert.
    pub min_failing_periods_to_alert: u32,
}

/// Actions attached to a rule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertActions {
    /// Action group resource IDs.
    pub action_groups: Vec<String>,
}
