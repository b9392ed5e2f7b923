// Slack Web API response types.
// Records are kept in Slack's own shape so they can be cached verbatim.

use serde::{Deserialize, Serialize};

/// Workspace identity as returned by `team.info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub domain: String,
}

/// Public channel (conversation) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topic: Topic,
}

impl Channel {
    pub fn topic_text(&self) -> &str {
        &self.topic.value
    }
}

/// Channel topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default)]
    pub value: String,
}

/// Workspace member record from `users.list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub team_id: String,
    /// Account name, used when the display name is empty.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile: Profile,
}

impl User {
    /// Name shown in the launcher: the normalized display name, or the
    /// account name when the user never set one.
    pub fn label(&self) -> &str {
        if self.profile.display_name_normalized.is_empty() {
            &self.name
        } else {
            &self.profile.display_name_normalized
        }
    }

    /// Avatar URL, if the profile carries one.
    pub fn avatar_url(&self) -> Option<&str> {
        Some(self.profile.image_192.as_str()).filter(|url| !url.is_empty())
    }
}

/// Member profile fields used by the launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub display_name_normalized: String,
    #[serde(default)]
    pub status_text: String,
    #[serde(default)]
    pub image_192: String,
}

/// The `{ok, error}` part every Web API response carries.
#[derive(Debug, Clone, Deserialize)]
pub struct Status {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Cursor metadata on paginated list responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_label_falls_back_to_account_name() {
        let user: User = serde_json::from_str(
            r#"{"id":"U1","team_id":"T1","name":"bob","profile":{"display_name_normalized":""}}"#,
        )
        .unwrap();
        assert_eq!(user.label(), "bob");

        let named: User = serde_json::from_str(
            r#"{"id":"U2","name":"alice","profile":{"display_name_normalized":"Alice A"}}"#,
        )
        .unwrap();
        assert_eq!(named.label(), "Alice A");
        assert_eq!(named.team_id, "");
    }

    #[test]
    fn test_avatar_url_empty_is_none() {
        let user: User = serde_json::from_str(r#"{"id":"U1","name":"bob"}"#).unwrap();
        assert!(user.avatar_url().is_none());

        let user: User =
            serde_json::from_str(r#"{"id":"U1","name":"bob","profile":{"image_192":"http://x/img"}}"#)
                .unwrap();
        assert_eq!(user.avatar_url(), Some("http://x/img"));
    }

    #[test]
    fn test_channel_ignores_unknown_fields() {
        let channel: Channel = serde_json::from_str(
            r#"{"id":"C1","name":"general","is_channel":true,"topic":{"value":"hi","creator":"U1"}}"#,
        )
        .unwrap();
        assert_eq!(channel.topic_text(), "hi");
        assert_eq!(channel.name, "general");
    }
}
