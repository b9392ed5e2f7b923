// Store key layout.
// Every key is relative to the data directory; one directory per workspace.

use std::path::PathBuf;

/// Registry of workspace credentials.
pub const REGISTRY_FILE: &str = "workplaces.json";

/// Path to the workspace registry.
pub fn registry_path() -> PathBuf {
    PathBuf::from(REGISTRY_FILE)
}

/// Path to a workspace's directory.
pub fn workspace_dir(workspace_id: &str) -> PathBuf {
    PathBuf::from(sanitize_name(workspace_id))
}

/// Path to a workspace's cached channel list.
pub fn channels_path(workspace_id: &str) -> PathBuf {
    workspace_dir(workspace_id).join("channels.json")
}

/// Path to a workspace's cached user list.
pub fn users_path(workspace_id: &str) -> PathBuf {
    workspace_dir(workspace_id).join("users.json")
}

/// Path to a workspace's avatar directory.
pub fn images_dir(workspace_id: &str) -> PathBuf {
    workspace_dir(workspace_id).join("images")
}

/// Path to a user's avatar image (raw bytes, no extension).
pub fn avatar_path(workspace_id: &str, user_id: &str) -> PathBuf {
    images_dir(workspace_id).join(sanitize_name(user_id))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces separators and other problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => format!("_{}", cleaned),
        _ => cleaned,
    }
}
