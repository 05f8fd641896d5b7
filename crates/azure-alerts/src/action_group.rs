//! Action group provisioning.
//!
//! An action group is the notification target of an alert: here a single
//! email or SMS receiver.

use tracing::info;

use crate::arm::models::{
    ActionGroupProperties, ActionGroupRequest, EmailReceiver, ReceiverStatus, SmsReceiver,
};
use crate::arm::ArmClient;
use crate::config::DeploymentConfig;
use crate::error::ProvisionError;

/// API version for `microsoft.insights/actionGroups`.
pub const ACTION_GROUP_API_VERSION: &str = "2022-06-01";

/// Country code used for SMS receivers.
pub const SMS_COUNTRY_CODE: &str = "31";

const EMAIL_RECEIVER_NAME: &str = "emailReceiver";
const SMS_RECEIVER_NAME: &str = "smsReceiver";

/// How the action group notifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationChannel {
    /// Notify by email.
    Email,
    /// Notify by text message.
    Sms,
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Sms => write!(f, "sms"),
        }
    }
}

impl std::str::FromStr for NotificationChannel {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            _ => Err(ProvisionError::InvalidNotificationType(s.trim().to_string())),
        }
    }
}

/// Build the action group body for one receiver.
///
/// `target` is an email address or phone number depending on `channel` and
/// is passed through unvalidated.
#[must_use]
pub fn build_request(
    config: &DeploymentConfig,
    channel: NotificationChannel,
    target: &str,
) -> ActionGroupRequest {
    let (email_receivers, sms_receivers) = match channel {
        NotificationChannel::Email => (
            Some(vec![EmailReceiver {
                name: EMAIL_RECEIVER_NAME.to_string(),
                email_address: target.to_string(),
                status: ReceiverStatus::Enabled,
            }]),
            None,
        ),
        NotificationChannel::Sms => (
            None,
            Some(vec![SmsReceiver {
                name: SMS_RECEIVER_NAME.to_string(),
                country_code: SMS_COUNTRY_CODE.to_string(),
                phone_number: target.to_string(),
                status: ReceiverStatus::Enabled,
            }]),
        ),
    };

    ActionGroupRequest {
        location: config.action_group_location.clone(),
        properties: ActionGroupProperties {
            group_short_name: config.action_group_name.clone(),
            enabled: true,
            email_receivers,
            sms_receivers,
        },
    }
}

/// Create the action group and return its resource ID.
///
/// The ID is derived from the config, not read from the response.
///
/// # Errors
/// Returns any [`ArmClient::put_resource`] error.
pub async fn create_action_group(
    client: &ArmClient,
    config: &DeploymentConfig,
    channel: NotificationChannel,
    target: &str,
) -> Result<String, ProvisionError> {
    info!(
        name = %config.action_group_name,
        channel = %channel,
        "Creating action group"
    );

    let id = config.action_group_id();
    let body = build_request(config, channel, target);
    client
        .put_resource("action group", &id, ACTION_GROUP_API_VERSION, &body)
        .await?;

    Ok(id)
}
