// Aggregation pipeline.
// Walks the registered workspaces in order and turns their channels and users
// into launcher entries, collecting failures instead of stopping on them.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::cache::WorkspaceCache;
use crate::error::LauncherError;
use crate::registry::WorkspaceCredential;
use crate::slack::{Channel, Directory, User};
use crate::store::Store;

/// One selectable row in the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherEntry {
    pub title: String,
    pub subtitle: String,
    pub action_uri: String,
    pub icon_path: Option<PathBuf>,
    pub valid: bool,
}

/// Category of a failure that degraded the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RemoteCallFailed,
    CacheWriteFailed,
    AvatarWriteFailed,
}

/// Which list a failure concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Channels,
    Users,
    Avatar,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Channels => "channels",
            Resource::Users => "users",
            Resource::Avatar => "avatar",
        })
    }
}

/// A failure recorded while aggregating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub workspace: String,
    pub resource: Resource,
    pub message: String,
}

impl Failure {
    fn new(
        kind: FailureKind,
        workspace: &WorkspaceCredential,
        resource: Resource,
        error: &LauncherError,
    ) -> Self {
        warn!(workspace = %workspace.id, %resource, kind = ?kind, error = %error, "degraded result");
        Self {
            kind,
            workspace: workspace.display_name.clone(),
            resource,
            message: error.to_string(),
        }
    }
}

/// Output of one aggregation run.
#[derive(Debug, Default)]
pub struct Aggregate {
    pub entries: Vec<LauncherEntry>,
    pub failures: Vec<Failure>,
}

/// Build the launcher list: every channel of every workspace in registry
/// order, followed by every user of every workspace in registry order.
pub async fn aggregate<S: Store, D: Directory>(
    credentials: &[WorkspaceCredential],
    cache: &WorkspaceCache<'_, S, D>,
) -> Aggregate {
    let mut channel_entries = Vec::new();
    let mut user_entries = Vec::new();
    let mut failures = Vec::new();

    for workspace in credentials {
        match cache.channels(workspace).await {
            Ok(loaded) => {
                if let Some(e) = &loaded.write_error {
                    failures.push(Failure::new(
                        FailureKind::CacheWriteFailed,
                        workspace,
                        Resource::Channels,
                        e,
                    ));
                }
                channel_entries.extend(
                    loaded
                        .items
                        .iter()
                        .map(|channel| channel_entry(workspace, channel)),
                );
            }
            Err(e) => failures.push(Failure::new(
                FailureKind::RemoteCallFailed,
                workspace,
                Resource::Channels,
                &e,
            )),
        }

        let users = match cache.users(workspace).await {
            Ok(loaded) => {
                if let Some(e) = &loaded.write_error {
                    failures.push(Failure::new(
                        FailureKind::CacheWriteFailed,
                        workspace,
                        Resource::Users,
                        e,
                    ));
                }
                loaded.items
            }
            Err(e) => {
                failures.push(Failure::new(
                    FailureKind::RemoteCallFailed,
                    workspace,
                    Resource::Users,
                    &e,
                ));
                Vec::new()
            }
        };

        for user in &users {
            match cache.fetch_avatar_if_missing(&workspace.id, user).await {
                Ok(()) => {}
                Err(LauncherError::NoAvatar(_)) => {
                    debug!(workspace = %workspace.id, user = %user.id, "no avatar to fetch")
                }
                Err(e) => failures.push(Failure::new(
                    FailureKind::AvatarWriteFailed,
                    workspace,
                    Resource::Avatar,
                    &e,
                )),
            }
            let icon = cache
                .has_avatar(&workspace.id, &user.id)
                .then(|| cache.avatar_location(&workspace.id, &user.id));
            user_entries.push(user_entry(workspace, user, icon));
        }
    }

    channel_entries.append(&mut user_entries);
    Aggregate {
        entries: channel_entries,
        failures,
    }
}

fn channel_entry(workspace: &WorkspaceCredential, channel: &Channel) -> LauncherEntry {
    LauncherEntry {
        title: format!("#{} - {}", channel.name, workspace.display_name),
        subtitle: channel.topic_text().to_string(),
        action_uri: format!("slack://channel?team={}&id={}", workspace.id, channel.id),
        icon_path: None,
        valid: true,
    }
}

fn user_entry(
    workspace: &WorkspaceCredential,
    user: &User,
    icon_path: Option<PathBuf>,
) -> LauncherEntry {
    let team = if user.team_id.is_empty() {
        &workspace.id
    } else {
        &user.team_id
    };
    LauncherEntry {
        title: format!("@{} - {}", user.label(), workspace.display_name),
        subtitle: user.profile.status_text.clone(),
        action_uri: format!("slack://user?team={}&id={}", team, user.id),
        icon_path,
        valid: true,
    }
}
