// Slack API module.
// Provides the client, response types, and the `Directory` capability the
// cache and registry depend on.

pub mod client;
pub mod endpoints;
#[cfg(test)]
pub mod fake;
pub mod types;

pub use client::{SLACK_API_BASE, SlackClient};
pub use types::*;

use crate::error::Result;

/// Remote source of workspace identity, channels, users and avatars.
#[allow(async_fn_in_trait)]
pub trait Directory {
    /// Resolve `{id, name, domain}` for the workspace a token belongs to.
    async fn team_info(&self, token: &str) -> Result<TeamInfo>;

    /// List public channels, optionally leaving out archived ones.
    async fn list_channels(&self, token: &str, exclude_archived: bool) -> Result<Vec<Channel>>;

    /// List every member of the workspace.
    async fn list_users(&self, token: &str) -> Result<Vec<User>>;

    /// Download raw avatar bytes.
    async fn fetch_avatar(&self, url: &str) -> Result<Vec<u8>>;
}
