// Workspace registry.
// Persists the credentials of every registered workspace in one JSON file.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LauncherError, Result};
use crate::slack::Directory;
use crate::store::{FileMode, Store, paths, read_json, write_json};

/// A registered workspace and the token used to query it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCredential {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(default)]
    pub domain: String,
    pub token: String,
}

/// Outcome of a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Registered(WorkspaceCredential),
    AlreadyRegistered,
}

pub struct Registry<'a, S: Store> {
    store: &'a S,
}

impl<'a, S: Store> Registry<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Load every credential and make sure each workspace has its storage
    /// directories. Fails with `RegistryUnavailable` if the file is missing
    /// or cannot be decoded.
    pub fn load_all(&self) -> Result<Vec<WorkspaceCredential>> {
        let workspaces = self.read()?.ok_or_else(|| {
            LauncherError::RegistryUnavailable(format!(
                "open {}: no such file or directory",
                self.store.locate(&paths::registry_path()).display()
            ))
        })?;

        for workspace in &workspaces {
            for dir in [
                paths::workspace_dir(&workspace.id),
                paths::images_dir(&workspace.id),
            ] {
                if let Err(e) = self.store.ensure_dir(&dir) {
                    warn!(
                        workspace = %workspace.id,
                        dir = %dir.display(),
                        error = %e,
                        "failed to create workspace directory"
                    );
                }
            }
        }

        Ok(workspaces)
    }

    /// Register the workspace a token belongs to. A token that is already
    /// present is a no-op; a token whose team cannot be resolved leaves the
    /// registry untouched.
    pub async fn register(&self, token: &str, directory: &impl Directory) -> Result<Registration> {
        let mut workspaces = self
            .read()
            .map_err(|e| {
                LauncherError::Other(format!("refusing to overwrite unreadable registry: {}", e))
            })?
            .unwrap_or_default();

        if workspaces.iter().any(|w| w.token == token) {
            info!("workspace already registered");
            return Ok(Registration::AlreadyRegistered);
        }

        let team = directory.team_info(token).await?;
        let credential = WorkspaceCredential {
            id: team.id,
            display_name: team.name,
            domain: team.domain,
            token: token.to_string(),
        };

        workspaces.push(credential.clone());
        write_json(
            self.store,
            &paths::registry_path(),
            &workspaces,
            FileMode::Private,
        )?;
        info!(workspace = %credential.id, name = %credential.display_name, "registered workspace");

        Ok(Registration::Registered(credential))
    }

    /// Read the registry file; `Ok(None)` when it does not exist.
    fn read(&self) -> Result<Option<Vec<WorkspaceCredential>>> {
        read_json(self.store, &paths::registry_path())
            .map_err(|e| LauncherError::RegistryUnavailable(e.to_string()))
    }
}
