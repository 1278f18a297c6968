//! Repository records and partial-update bodies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visibility of a repository as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    /// Enterprise-only; listed so such repos decode, never set by this tool.
    Internal,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One repository owned by the authenticated user.
///
/// Only `visibility` and `archived` ever change during a session, and only by
/// replacing the whole record with the one the server returns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub visibility: Visibility,
    #[serde(default)]
    pub fork: bool,
    pub archived: bool,
    pub clone_url: String,
}

/// Body of a partial update. Only the fields that are set get serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl RepoUpdate {
    pub fn archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Self::default()
        }
    }

    pub fn visibility(visibility: Visibility) -> Self {
        Self {
            visibility: Some(visibility),
            ..Self::default()
        }
    }
}

/// Sorts by name and drops later records whose name was already seen.
pub(crate) fn normalize(mut repos: Vec<Repository>) -> Vec<Repository> {
    repos.sort_by(|a, b| a.name.cmp(&b.name));
    let before = repos.len();
    repos.dedup_by(|later, earlier| later.name == earlier.name);
    if repos.len() != before {
        tracing::debug!(dropped = before - repos.len(), "duplicate repository names in listing");
    }
    repos
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo(name: &str) -> Repository {
        Repository {
            name: name.to_string(),
            visibility: Visibility::Public,
            fork: false,
            archived: false,
            clone_url: format!("https://github.com/octo/{name}.git"),
        }
    }

    #[test]
    fn update_serializes_only_the_set_field() {
        let archive = serde_json::to_value(RepoUpdate::archived(true)).unwrap();
        assert_eq!(archive, json!({ "archived": true }));

        let publish = serde_json::to_value(RepoUpdate::visibility(Visibility::Public)).unwrap();
        assert_eq!(publish, json!({ "visibility": "public" }));
    }

    #[test]
    fn decodes_api_object_ignoring_unknown_fields() {
        let value = json!({
            "id": 1296269,
            "name": "hello-world",
            "full_name": "octo/hello-world",
            "visibility": "private",
            "fork": true,
            "archived": false,
            "clone_url": "https://github.com/octo/hello-world.git",
            "owner": { "login": "octo" }
        });
        let repo: Repository = serde_json::from_value(value).unwrap();
        assert_eq!(repo.name, "hello-world");
        assert_eq!(repo.visibility, Visibility::Private);
        assert!(repo.fork);
        assert!(!repo.archived);
    }

    #[test]
    fn rejects_unknown_visibility() {
        let value = json!({
            "name": "x",
            "visibility": "secret",
            "archived": false,
            "clone_url": "u"
        });
        assert!(serde_json::from_value::<Repository>(value).is_err());
    }

    #[test]
    fn normalize_sorts_and_dedups_by_name() {
        let mut shadow = repo("api");
        shadow.archived = true;
        let repos = normalize(vec![repo("web"), repo("api"), shadow, repo("cli")]);

        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["api", "cli", "web"]);
    }
}
