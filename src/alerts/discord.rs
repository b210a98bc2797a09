//! Discord webhook notifier
//!
//! Posts a single embed per alert, optionally mentioning a user.

use super::notifier::Notifier;
use super::types::AlertNotice;
use crate::domain::ServiceKind;
use crate::error::NotifyError;
use crate::http;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

/// Embed title for miss alerts
pub const EMBED_TITLE: &str = "Price Oracle Alert";

/// Embed colour (red)
pub const EMBED_COLOR: u32 = 0xE53935;

/// Webhook message payload
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiscordMessage {
    /// Plain text content, used for the user mention
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Rich embeds
    pub embeds: Vec<DiscordEmbed>,
}

/// Discord embed object
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiscordEmbed {
    /// Embed heading
    pub title: String,
    /// Address and query URL
    pub description: String,
    /// Side bar colour
    pub color: u32,
    /// Inline value fields
    pub fields: Vec<EmbedField>,
}

/// Embed field
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    /// Field label
    pub name: String,
    /// Field value
    pub value: String,
    /// Render side by side with neighbouring fields
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: &str, value: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            inline: true,
        }
    }
}

/// Discord webhook client
pub struct DiscordNotifier {
    webhook_url: String,
    user_id: Option<String>,
    client: Client,
}

impl DiscordNotifier {
    /// Create a notifier for a webhook URL
    pub fn new(
        webhook_url: impl Into<String>,
        user_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = http::client(timeout)?;
        Ok(Self {
            webhook_url: webhook_url.into(),
            user_id,
            client,
        })
    }

    /// Render the webhook payload for an alert
    pub fn build_message(&self, notice: &AlertNotice) -> DiscordMessage {
        let embed = DiscordEmbed {
            title: EMBED_TITLE.to_string(),
            description: format!(
                "{}\r\n{}{}",
                notice.address,
                notice.endpoint.trim_end_matches('/'),
                notice.query
            ),
            color: EMBED_COLOR,
            fields: vec![
                EmbedField::inline("Misses", notice.misses),
                EmbedField::inline("Threshold", notice.threshold),
            ],
        };

        DiscordMessage {
            content: self.user_id.as_ref().map(|id| format!("<@{}>", id)),
            embeds: vec![embed],
        }
    }
}

impl Notifier for DiscordNotifier {
    fn notify(&self, notice: &AlertNotice) -> Result<(), NotifyError> {
        let message = self.build_message(notice);
        log::debug!("Sending Discord webhook message for {}", notice.address);

        let response = self.client.post(&self.webhook_url).json(&message).send()?;
        let status = response.status();

        // 204 No Content is the normal response
        if status.is_success() {
            return Ok(());
        }

        Err(NotifyError::Rejected {
            service: ServiceKind::Discord.to_string(),
            status: status.as_u16(),
            message: response.text().unwrap_or_default(),
        })
    }

    fn service(&self) -> ServiceKind {
        ServiceKind::Discord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBHOOK: &str = "https://discord.com/api/webhooks/1/a";

    fn notice() -> AlertNotice {
        AlertNotice {
            address: "terravaloper1abc".to_string(),
            misses: 12,
            threshold: 10,
            endpoint: "https://lcd.example.org/".to_string(),
            query: "/oracle/validators/terravaloper1abc/miss".to_string(),
        }
    }

    #[test]
    fn test_build_message_without_mention() {
        let notifier = DiscordNotifier::new(WEBHOOK, None, http::DEFAULT_TIMEOUT).unwrap();
        let message = notifier.build_message(&notice());

        assert!(message.content.is_none());
        assert_eq!(message.embeds.len(), 1);
        let embed = &message.embeds[0];
        assert_eq!(embed.title, "Price Oracle Alert");
        assert_eq!(
            embed.description,
            "terravaloper1abc\r\nhttps://lcd.example.org/oracle/validators/terravaloper1abc/miss"
        );
        assert_eq!(embed.color, 0xE53935);
        assert_eq!(embed.fields[0], EmbedField::inline("Misses", 12));
        assert_eq!(embed.fields[1], EmbedField::inline("Threshold", 10));
    }

    #[test]
    fn test_build_message_with_mention() {
        let notifier = DiscordNotifier::new(
            WEBHOOK,
            Some("4242".to_string()),
            http::DEFAULT_TIMEOUT,
        )
        .unwrap();
        let message = notifier.build_message(&notice());
        assert_eq!(message.content.as_deref(), Some("<@4242>"));
    }

    #[test]
    fn test_serialized_payload_omits_empty_content() {
        let notifier = DiscordNotifier::new(WEBHOOK, None, http::DEFAULT_TIMEOUT).unwrap();
        let json = serde_json::to_value(notifier.build_message(&notice())).unwrap();
        assert!(json.get("content").is_none());
        assert_eq!(json["embeds"][0]["fields"][0]["value"], "12");
    }
}
