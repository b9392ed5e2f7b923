// Alfred script filter output.
// Serializes launcher entries into the JSON document Alfred reads from stdout.

use serde::Serialize;

use crate::error::Result;
use crate::pipeline::{Aggregate, Failure, FailureKind, LauncherEntry};

/// Title of the entry shown when the registry cannot be loaded.
pub const REGISTRY_ERROR_TITLE: &str = "Something wrong while loading workspaces";

#[derive(Debug, Clone, Default, Serialize)]
pub struct Response {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Item {
    pub uid: String,
    pub valid: bool,
    pub title: String,
    pub subtitle: String,
    pub arg: String,
    pub autocomplete: String,
    pub icon: Icon,
    pub text: Text,
    pub mods: Mods,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Icon {
    #[serde(rename = "type")]
    pub icon_type: String,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Text {
    pub copy: String,
    pub largetype: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Mods {
    pub shift: Mod,
    pub cmd: Mod,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Mod {
    pub valid: bool,
    pub arg: String,
    pub subtitle: String,
}

impl From<&LauncherEntry> for Item {
    fn from(entry: &LauncherEntry) -> Self {
        Self {
            valid: entry.valid,
            title: entry.title.clone(),
            subtitle: entry.subtitle.clone(),
            arg: entry.action_uri.clone(),
            icon: Icon {
                path: entry
                    .icon_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
                ..Icon::default()
            },
            ..Self::default()
        }
    }
}

/// A row with no action, used to surface problems in the launcher.
pub fn diagnostic(title: impl Into<String>, subtitle: impl Into<String>) -> Item {
    Item {
        valid: false,
        title: title.into(),
        subtitle: subtitle.into(),
        ..Item::default()
    }
}

/// Entries first, then one diagnostic per failed list and a single summary
/// for avatar failures.
pub fn from_aggregate(aggregate: &Aggregate) -> Response {
    let mut items: Vec<Item> = aggregate.entries.iter().map(Item::from).collect();

    let mut avatar_failures = 0;
    for failure in &aggregate.failures {
        match failure.kind {
            FailureKind::AvatarWriteFailed => avatar_failures += 1,
            FailureKind::RemoteCallFailed | FailureKind::CacheWriteFailed => {
                items.push(failure_item(failure))
            }
        }
    }
    if avatar_failures > 0 {
        items.push(diagnostic(
            format!("{} avatar(s) could not be downloaded", avatar_failures),
            "They will be retried on the next run",
        ));
    }

    Response { items }
}

fn failure_item(failure: &Failure) -> Item {
    let title = match failure.kind {
        FailureKind::CacheWriteFailed => {
            format!("Could not cache {} of {}", failure.resource, failure.workspace)
        }
        _ => format!("Could not load {} of {}", failure.resource, failure.workspace),
    };
    diagnostic(title, failure.message.clone())
}

/// Serialize a response to a single JSON line.
pub fn render(response: &Response) -> Result<String> {
    Ok(serde_json::to_string(response)?)
}
