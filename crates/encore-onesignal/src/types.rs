// OneSignal user API wire types

use serde::Deserialize;

/// User record returned by `GET /apps/{app_id}/users/by/external_id/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OneSignalUser {
    #[serde(default)]
    pub subscriptions: Vec<OneSignalSubscription>,
}

/// One delivery channel of a user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OneSignalSubscription {
    #[serde(default)]
    pub id: Option<String>,
    /// Channel type, e.g. `ChromePush`, `iOSPush`, `Email`, `SMS`
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub enabled: bool,
    /// Negative values mean the user unsubscribed or denied permission
    #[serde(default)]
    pub notification_types: Option<i64>,
}

impl OneSignalSubscription {
    /// Web and mobile push channels; email and SMS are not push
    pub fn is_push(&self) -> bool {
        self.kind.ends_with("Push")
    }

    /// Push channel the user allowed
    pub fn is_granted_push(&self) -> bool {
        self.is_push() && self.enabled && self.notification_types.map_or(true, |t| t > 0)
    }
}

impl OneSignalUser {
    pub fn has_push_subscription(&self) -> bool {
        self.subscriptions.iter().any(OneSignalSubscription::is_push)
    }

    pub fn has_granted_push(&self) -> bool {
        self.subscriptions
            .iter()
            .any(OneSignalSubscription::is_granted_push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_classification() {
        let user: OneSignalUser = serde_json::from_str(
            r#"{
                "identity": { "external_id": "u1" },
                "subscriptions": [
                    { "id": "s1", "type": "Email", "enabled": true },
                    { "id": "s2", "type": "ChromePush", "enabled": false, "notification_types": -2 }
                ]
            }"#,
        )
        .unwrap();

        assert!(user.has_push_subscription());
        assert!(!user.has_granted_push());
    }

    #[test]
    fn test_granted_push() {
        let sub = OneSignalSubscription {
            kind: "SafariPush".to_string(),
            enabled: true,
            notification_types: Some(1),
            ..Default::default()
        };
        assert!(sub.is_granted_push());

        let sms = OneSignalSubscription {
            kind: "SMS".to_string(),
            enabled: true,
            ..Default::default()
        };
        assert!(!sms.is_granted_push());
    }

    #[test]
    fn test_missing_subscriptions_default_empty() {
        let user: OneSignalUser = serde_json::from_str("{}").unwrap();
        assert!(!user.has_push_subscription());
    }
}
