//! Messages exchanged between the plugin and its UI panel.
//!
//! Both directions are JSON objects tagged by `type`. Inbound messages are
//! requests; outbound ones report results and user-facing notifications.

use serde::{Deserialize, Serialize};

use crate::collector::InventoryStats;

pub const GENERATED: &str = "Design system generated successfully!";
pub const GENERATE_FIRST: &str = "Please generate the design system first";
pub const PAGE_NOT_FOUND: &str = "Design system page not found";
pub const CONTAINER_NOT_FOUND: &str = "Could not find design system container";
pub const SELECTED: &str = "Design system selected! Press Cmd/Ctrl+C to copy";
pub const GENERATION_IN_PROGRESS: &str = "Design system generation already in progress";

/// UI → plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    GenerateDesignSystem,
    CopyDesignSystem,
}

/// Plugin → UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    GenerationComplete { stats: InventoryStats },
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

impl From<Notification> for UiMessage {
    fn from(notification: Notification) -> Self {
        UiMessage::Notify(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_inbound_requests() {
        let msg: PluginMessage =
            serde_json::from_value(json!({"type": "generate-design-system"})).unwrap();
        assert_eq!(msg, PluginMessage::GenerateDesignSystem);
        let msg: PluginMessage =
            serde_json::from_value(json!({"type": "copy-design-system"})).unwrap();
        assert_eq!(msg, PluginMessage::CopyDesignSystem);
    }

    #[test]
    fn rejects_unknown_request_type() {
        assert!(serde_json::from_value::<PluginMessage>(json!({"type": "delete-everything"})).is_err());
    }

    #[test]
    fn completion_carries_camel_case_stats() {
        let msg = UiMessage::GenerationComplete {
            stats: InventoryStats {
                colors: 3,
                text_styles: 2,
                components: 1,
            },
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "type": "generation-complete",
                "stats": {"colors": 3, "textStyles": 2, "components": 1}
            })
        );
    }

    #[test]
    fn notification_is_flat() {
        let msg = UiMessage::from(Notification::warning(GENERATE_FIRST));
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({
                "type": "notify",
                "level": "warning",
                "message": "Please generate the design system first"
            })
        );
    }
}
