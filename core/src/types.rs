//! Domain values decoded from GitHub REST v3 JSON.
//!
//! # Design
//! Decoding is total. Each field is read independently by key, and a missing
//! or mistyped value degrades to the field's default instead of failing the
//! whole value. The identifier type has no "absent" state, so an object
//! without an integer `id` decodes to [`INVALID_ID`] with every other field
//! left at its default. Callers cannot tell an all-default value from one
//! whose fields were malformed on the wire; shape problems only surface at
//! the transport boundary (see `Octokit::parse_*`).
//!
//! Both types serialize back to GitHub's field names, skipping unset
//! optionals, so a decoded value can be re-emitted as wire JSON.

use serde::Serialize;
use serde_json::{Map, Value};

/// Identifier given to values decoded from an object without an integer `id`.
pub const INVALID_ID: i64 = -1;

/// A GitHub account, embedded in a [`Repository`] as its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "public_repos", skip_serializing_if = "Option::is_none")]
    pub number_of_public_repos: Option<i64>,
    #[serde(rename = "public_gists", skip_serializing_if = "Option::is_none")]
    pub number_of_public_gists: Option<i64>,
    #[serde(rename = "total_private_repos", skip_serializing_if = "Option::is_none")]
    pub number_of_private_repos: Option<i64>,
}

impl User {
    pub fn from_json(json: &Map<String, Value>) -> Self {
        let Some(id) = integer(json, "id") else {
            return Self::default();
        };
        Self {
            id,
            login: string(json, "login"),
            avatar_url: string(json, "avatar_url"),
            gravatar_id: string(json, "gravatar_id"),
            user_type: string(json, "type"),
            name: string(json, "name"),
            company: string(json, "company"),
            blog: string(json, "blog"),
            location: string(json, "location"),
            email: string(json, "email"),
            number_of_public_repos: integer(json, "public_repos"),
            number_of_public_gists: integer(json, "public_gists"),
            number_of_private_repos: integer(json, "total_private_repos"),
        }
    }

    /// Decode any JSON value; a non-object decodes like an empty object.
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_json).unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        self.id != INVALID_ID
    }
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: INVALID_ID,
            login: None,
            avatar_url: None,
            gravatar_id: None,
            user_type: None,
            name: None,
            company: None,
            blog: None,
            location: None,
            email: None,
            number_of_public_repos: None,
            number_of_public_gists: None,
            number_of_private_repos: None,
        }
    }
}

/// A GitHub repository.
///
/// `id` and `owner` are fixed at decode time and only readable through
/// [`Repository::id`] and [`Repository::owner`]. The remaining fields are
/// public so applications can adjust a fetched value locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    id: i64,
    owner: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "private")]
    pub is_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "fork", skip_serializing_if = "Option::is_none")]
    pub is_fork: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,
    pub size: i64,
}

impl Repository {
    pub fn from_json(json: &Map<String, Value>) -> Self {
        // The owner is decoded whether or not the repository itself is valid.
        let owner = json.get("owner").map(User::from_value).unwrap_or_default();

        let Some(id) = integer(json, "id") else {
            return Self {
                owner,
                ..Self::default()
            };
        };
        Self {
            id,
            owner,
            name: string(json, "name"),
            full_name: string(json, "full_name"),
            is_private: boolean(json, "private").unwrap_or(false),
            description: string(json, "description"),
            is_fork: boolean(json, "fork"),
            git_url: string(json, "git_url"),
            ssh_url: string(json, "ssh_url"),
            clone_url: string(json, "clone_url"),
            size: integer(json, "size").unwrap_or(0),
        }
    }

    /// Decode any JSON value; a non-object decodes like an empty object.
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_json).unwrap_or_default()
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub fn is_valid(&self) -> bool {
        self.id != INVALID_ID
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self {
            id: INVALID_ID,
            owner: User::default(),
            name: None,
            full_name: None,
            is_private: false,
            description: None,
            is_fork: None,
            git_url: None,
            ssh_url: None,
            clone_url: None,
            size: 0,
        }
    }
}

fn string(json: &Map<String, Value>, key: &str) -> Option<String> {
    json.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn integer(json: &Map<String, Value>, key: &str) -> Option<i64> {
    json.get(key).and_then(Value::as_i64)
}

fn boolean(json: &Map<String, Value>, key: &str) -> Option<bool> {
    json.get(key).and_then(Value::as_bool)
}
