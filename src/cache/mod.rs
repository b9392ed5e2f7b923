// Read-through cache of Slack directory data.
// Channel and user lists are fetched once per workspace and then served from
// the store; avatars are downloaded once per user.

use std::future::Future;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::error::{LauncherError, Result};
use crate::registry::WorkspaceCredential;
use crate::slack::{Channel, Directory, User};
use crate::store::{FileMode, Store, paths, read_json, write_json};

/// Archived channels are left out of the launcher.
pub const EXCLUDE_ARCHIVED: bool = true;

/// A list served by the cache, plus the error from persisting it, if any.
#[derive(Debug)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub write_error: Option<LauncherError>,
}

pub struct WorkspaceCache<'a, S: Store, D: Directory> {
    store: &'a S,
    directory: &'a D,
}

impl<'a, S: Store, D: Directory> WorkspaceCache<'a, S, D> {
    pub fn new(store: &'a S, directory: &'a D) -> Self {
        Self { store, directory }
    }

    /// Channels of a workspace, from cache or freshly listed.
    pub async fn channels(&self, workspace: &WorkspaceCredential) -> Result<Loaded<Channel>> {
        self.read_through(&paths::channels_path(&workspace.id), || {
            self.directory
                .list_channels(&workspace.token, EXCLUDE_ARCHIVED)
        })
        .await
    }

    /// Users of a workspace, from cache or freshly listed.
    pub async fn users(&self, workspace: &WorkspaceCredential) -> Result<Loaded<User>> {
        self.read_through(&paths::users_path(&workspace.id), || {
            self.directory.list_users(&workspace.token)
        })
        .await
    }

    /// Whether the avatar for `user_id` has already been downloaded.
    pub fn has_avatar(&self, workspace_id: &str, user_id: &str) -> bool {
        self.store.exists(&paths::avatar_path(workspace_id, user_id))
    }

    /// Location of a user's avatar as handed to the launcher.
    pub fn avatar_location(&self, workspace_id: &str, user_id: &str) -> PathBuf {
        self.store
            .locate(&paths::avatar_path(workspace_id, user_id))
    }

    /// Download the user's avatar unless it is already stored. Fails with
    /// `NoAvatar` when the profile has no avatar URL.
    pub async fn fetch_avatar_if_missing(&self, workspace_id: &str, user: &User) -> Result<()> {
        if self.has_avatar(workspace_id, &user.id) {
            return Ok(());
        }
        let Some(url) = user.avatar_url() else {
            return Err(LauncherError::NoAvatar(user.id.clone()));
        };

        let bytes = self.directory.fetch_avatar(url).await?;
        self.store.write(
            &paths::avatar_path(workspace_id, &user.id),
            &bytes,
            FileMode::Shared,
        )?;
        debug!(workspace = workspace_id, user = %user.id, size = bytes.len(), "stored avatar");
        Ok(())
    }

    async fn read_through<T, F, Fut>(&self, key: &Path, fetch: F) -> Result<Loaded<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        match read_json::<Vec<T>>(self.store, key) {
            Ok(Some(items)) => {
                debug!(key = %key.display(), count = items.len(), "cache hit");
                return Ok(Loaded {
                    items,
                    write_error: None,
                });
            }
            Ok(None) => debug!(key = %key.display(), "cache miss"),
            Err(e) => warn!(key = %key.display(), error = %e, "unreadable cache, refetching"),
        }

        let items = fetch().await?;
        info!(key = %key.display(), count = items.len(), "fetched from Slack");

        let write_error = write_json(self.store, key, &items, FileMode::Shared).err();
        if let Some(e) = &write_error {
            warn!(key = %key.display(), error = %e, "failed to write cache");
        }

        Ok(Loaded {
            items,
            write_error,
        })
    }
}
