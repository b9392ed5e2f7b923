// Scripted `Directory` for tests, with call counters.

use std::cell::Cell;
use std::collections::HashMap;

use crate::error::{LauncherError, Result};

use super::Directory;
use super::types::{Channel, Profile, TeamInfo, Topic, User};

#[derive(Debug, Default)]
pub struct FakeDirectory {
    teams: HashMap<String, TeamInfo>,
    channels: HashMap<String, Vec<Channel>>,
    users: HashMap<String, Vec<User>>,
    avatars: HashMap<String, Vec<u8>>,
    pub team_info_calls: Cell<usize>,
    pub channel_calls: Cell<usize>,
    pub user_calls: Cell<usize>,
    pub avatar_calls: Cell<usize>,
    pub last_exclude_archived: Cell<Option<bool>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_team(mut self, token: &str, id: &str, name: &str) -> Self {
        self.teams.insert(
            token.to_string(),
            TeamInfo {
                id: id.to_string(),
                name: name.to_string(),
                domain: name.to_lowercase(),
            },
        );
        self
    }

    pub fn with_channels(mut self, token: &str, channels: Vec<Channel>) -> Self {
        self.channels.insert(token.to_string(), channels);
        self
    }

    pub fn with_users(mut self, token: &str, users: Vec<User>) -> Self {
        self.users.insert(token.to_string(), users);
        self
    }

    pub fn with_avatar(mut self, url: &str, bytes: &[u8]) -> Self {
        self.avatars.insert(url.to_string(), bytes.to_vec());
        self
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl Directory for FakeDirectory {
    async fn team_info(&self, token: &str) -> Result<TeamInfo> {
        bump(&self.team_info_calls);
        self.teams
            .get(token)
            .cloned()
            .ok_or(LauncherError::Unauthorized)
    }

    async fn list_channels(&self, token: &str, exclude_archived: bool) -> Result<Vec<Channel>> {
        bump(&self.channel_calls);
        self.last_exclude_archived.set(Some(exclude_archived));
        self.channels
            .get(token)
            .cloned()
            .ok_or_else(|| LauncherError::Slack("invalid_cursor".to_string()))
    }

    async fn list_users(&self, token: &str) -> Result<Vec<User>> {
        bump(&self.user_calls);
        self.users
            .get(token)
            .cloned()
            .ok_or_else(|| LauncherError::Slack("missing_scope".to_string()))
    }

    async fn fetch_avatar(&self, url: &str) -> Result<Vec<u8>> {
        bump(&self.avatar_calls);
        self.avatars
            .get(url)
            .cloned()
            .ok_or_else(|| LauncherError::Other(format!("HTTP 404 Not Found: {}", url)))
    }
}

pub fn channel(id: &str, name: &str, topic: &str) -> Channel {
    Channel {
        id: id.to_string(),
        name: name.to_string(),
        topic: Topic {
            value: topic.to_string(),
        },
    }
}

pub fn user(id: &str, team_id: &str, display_name: &str, name: &str, avatar: &str) -> User {
    User {
        id: id.to_string(),
        team_id: team_id.to_string(),
        name: name.to_string(),
        profile: Profile {
            display_name_normalized: display_name.to_string(),
            status_text: String::new(),
            image_192: avatar.to_string(),
        },
    }
}
