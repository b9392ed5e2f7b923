// Slack Web API methods used by the launcher.
// Implements the `Directory` capability on top of `SlackClient`.

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

use super::Directory;
use super::client::SlackClient;
use super::types::{Channel, ResponseMetadata, TeamInfo, User};

const PAGE_SIZE: &str = "200";

/// Response wrapper for `team.info`.
#[derive(Debug, Deserialize)]
struct TeamInfoResponse {
    team: TeamInfo,
}

/// Response wrapper for `conversations.list`.
#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

/// Response wrapper for `users.list`.
#[derive(Debug, Deserialize)]
struct UsersResponse {
    #[serde(default)]
    members: Vec<User>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

impl Directory for SlackClient {
    async fn team_info(&self, token: &str) -> Result<TeamInfo> {
        let no_params: [(&str, &str); 0] = [];
        let wrapper: TeamInfoResponse = self.call("team.info", token, &no_params).await?;
        Ok(wrapper.team)
    }

    async fn list_channels(&self, token: &str, exclude_archived: bool) -> Result<Vec<Channel>> {
        let exclude_archived = exclude_archived.to_string();
        let mut channels = Vec::new();
        let mut cursor = String::new();

        loop {
            let params = [
                ("types", "public_channel"),
                ("exclude_archived", exclude_archived.as_str()),
                ("limit", PAGE_SIZE),
                ("cursor", cursor.as_str()),
            ];
            let page: ChannelsResponse = self.call("conversations.list", token, &params).await?;
            debug!(count = page.channels.len(), "fetched channel page");
            channels.extend(page.channels);

            if page.response_metadata.next_cursor.is_empty() {
                break;
            }
            cursor = page.response_metadata.next_cursor;
        }

        Ok(channels)
    }

    async fn list_users(&self, token: &str) -> Result<Vec<User>> {
        let mut users = Vec::new();
        let mut cursor = String::new();

        loop {
            let params = [("limit", PAGE_SIZE), ("cursor", cursor.as_str())];
            let page: UsersResponse = self.call("users.list", token, &params).await?;
            debug!(count = page.members.len(), "fetched user page");
            users.extend(page.members);

            if page.response_metadata.next_cursor.is_empty() {
                break;
            }
            cursor = page.response_metadata.next_cursor;
        }

        Ok(users)
    }

    async fn fetch_avatar(&self, url: &str) -> Result<Vec<u8>> {
        self.download(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_channels_page() {
        let page: ChannelsResponse = serde_json::from_str(
            r#"{
                "ok": true,
                "channels": [
                    {"id": "C1", "name": "general", "topic": {"value": "hi"}},
                    {"id": "C2", "name": "random", "topic": {"value": ""}}
                ],
                "response_metadata": {"next_cursor": "dGVhbTpDMDYxRkE1UEI="}
            }"#,
        )
        .unwrap();
        assert_eq!(page.channels.len(), 2);
        assert_eq!(page.channels[0].topic_text(), "hi");
        assert_eq!(page.response_metadata.next_cursor, "dGVhbTpDMDYxRkE1UEI=");
    }

    #[test]
    fn test_decode_last_users_page() {
        let page: UsersResponse = serde_json::from_str(
            r#"{
                "ok": true,
                "members": [
                    {"id": "U1", "team_id": "T1", "name": "bob",
                     "profile": {"display_name_normalized": "", "status_text": "", "image_192": "http://x/img"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(page.members[0].label(), "bob");
        assert!(page.response_metadata.next_cursor.is_empty());
    }

    #[test]
    fn test_decode_team_info() {
        let wrapper: TeamInfoResponse = serde_json::from_str(
            r#"{"ok": true, "team": {"id": "T1", "name": "Acme", "domain": "acme", "icon": {}}}"#,
        )
        .unwrap();
        assert_eq!(wrapper.team.id, "T1");
        assert_eq!(wrapper.team.domain, "acme");
    }
}
