// Application entry points.
// Wires the store, the Slack client, the pipeline and the Alfred formatter.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::alfred::{self, REGISTRY_ERROR_TITLE, Response};
use crate::cache::WorkspaceCache;
use crate::error::Result;
use crate::pipeline;
use crate::registry::{Registration, Registry};
use crate::slack::{Directory, SlackClient};
use crate::store::{FsStore, Store};

/// Runtime configuration resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the registry and the per-workspace caches.
    pub data_dir: PathBuf,
    pub api_base: String,
    pub request_timeout: Duration,
}

/// Main application state.
pub struct App {
    store: FsStore,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            store: FsStore::new(&config.data_dir),
            config,
        }
    }

    /// Produce the launcher list. Never fails: problems become diagnostic
    /// entries.
    pub async fn list(&self) -> Response {
        match SlackClient::new(&self.config.api_base, self.config.request_timeout) {
            Ok(client) => list(&self.store, &client).await,
            Err(e) => {
                warn!(error = %e, "failed to build HTTP client");
                Response {
                    items: vec![alfred::diagnostic(
                        "Could not start the Slack client",
                        e.to_string(),
                    )],
                }
            }
        }
    }

    /// Register the workspace a token belongs to.
    pub async fn register(&self, token: &str) -> Result<Registration> {
        let client = SlackClient::new(&self.config.api_base, self.config.request_timeout)?;
        Registry::new(&self.store).register(token, &client).await
    }
}

/// Load the registry and aggregate every workspace into an Alfred response.
pub async fn list<S: Store, D: Directory>(store: &S, directory: &D) -> Response {
    let credentials = match Registry::new(store).load_all() {
        Ok(credentials) => credentials,
        Err(e) => {
            warn!(error = %e, "failed to load workspaces");
            return Response {
                items: vec![alfred::diagnostic(REGISTRY_ERROR_TITLE, e.to_string())],
            };
        }
    };

    let cache = WorkspaceCache::new(store, directory);
    let aggregate = pipeline::aggregate(&credentials, &cache).await;
    alfred::from_aggregate(&aggregate)
}
