use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

const DEFAULT_PER_PAGE: usize = 30;
const MAX_PER_PAGE: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    pub id: i64,
    pub login: String,
    pub avatar_url: String,
    #[serde(rename = "type")]
    pub owner_type: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub id: i64,
    pub owner: Owner,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub private: bool,
    pub fork: bool,
    pub html_url: String,
    pub git_url: String,
    pub ssh_url: String,
    pub clone_url: String,
    pub size: i64,
}

impl Repository {
    pub fn new(id: i64, owner: &Owner, name: &str, description: Option<&str>, size: i64) -> Self {
        let full_name = format!("{}/{name}", owner.login);
        Self {
            id,
            owner: owner.clone(),
            name: name.to_string(),
            description: description.map(str::to_string),
            private: false,
            fork: false,
            html_url: format!("https://github.com/{full_name}"),
            git_url: format!("git://github.com/{full_name}.git"),
            ssh_url: format!("git@github.com:{full_name}.git"),
            clone_url: format!("https://github.com/{full_name}.git"),
            full_name,
            size,
        }
    }
}

pub fn octocat() -> Owner {
    Owner {
        id: 1,
        login: "octocat".to_string(),
        avatar_url: "https://github.com/images/error/octocat_happy.gif".to_string(),
        owner_type: "User".to_string(),
    }
}

/// The repositories `app()` serves, in listing order.
pub fn fixture_repositories() -> Vec<Repository> {
    let owner = octocat();
    let mut spoon_knife = Repository::new(
        1300192,
        &owner,
        "Spoon-Knife",
        Some("This repo is for demonstration purposes only."),
        2,
    );
    spoon_knife.fork = true;
    let mut secret = Repository::new(1, &owner, "secret-plans", None, 0);
    secret.private = true;
    vec![
        Repository::new(1296269, &owner, "Hello-World", Some("My first repository on GitHub!"), 108),
        spoon_knife,
        Repository::new(17881631, &owner, "git-consortium", Some("This repo is for demonstration purposes only."), 1),
        Repository::new(18221276, &owner, "linguist", Some("Language Savant."), 5326),
        secret,
    ]
}

pub type Db = Arc<Vec<Repository>>;

/// Page parameters as sent. Kept as strings so a malformed value falls back
/// to the default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl Pagination {
    /// Resolve to a 1-based page number and a page size in `1..=100`.
    pub fn resolve(&self) -> (usize, usize) {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let per_page = self
            .per_page
            .as_deref()
            .and_then(|p| p.parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE);
        (page, per_page)
    }
}

pub fn app() -> Router {
    app_with(fixture_repositories())
}

pub fn app_with(repositories: Vec<Repository>) -> Router {
    let db: Db = Arc::new(repositories);
    Router::new()
        .route("/user/repos", get(list_repositories))
        .route("/repos/{owner}/{name}", get(get_repository))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_repositories(
    State(db): State<Db>,
    Query(pagination): Query<Pagination>,
) -> Json<Vec<Repository>> {
    let (page, per_page) = pagination.resolve();
    debug!(page, per_page, "list repositories");
    let start = (page - 1).saturating_mul(per_page);
    Json(db.iter().skip(start).take(per_page).cloned().collect())
}

async fn get_repository(
    State(db): State<Db>,
    Path((owner, name)): Path<(String, String)>,
) -> Result<Json<Repository>, (StatusCode, Json<Value>)> {
    debug!(%owner, %name, "get repository");
    db.iter()
        .find(|repo| {
            repo.owner.login.eq_ignore_ascii_case(&owner) && repo.name.eq_ignore_ascii_case(&name)
        })
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "message": "Not Found",
                    "documentation_url": "https://docs.github.com/rest/repos/repos#get-a-repository"
                })),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: Option<&str>, per_page: Option<&str>) -> Pagination {
        Pagination {
            page: page.map(str::to_string),
            per_page: per_page.map(str::to_string),
        }
    }

    #[test]
    fn pagination_defaults() {
        assert_eq!(Pagination::default().resolve(), (1, 30));
    }

    #[test]
    fn pagination_malformed_values_fall_back() {
        assert_eq!(pagination(Some("abc"), Some("-5")).resolve(), (1, 30));
        assert_eq!(pagination(Some("0"), Some("0")).resolve(), (1, 30));
    }

    #[test]
    fn pagination_caps_page_size() {
        assert_eq!(pagination(Some("3"), Some("500")).resolve(), (3, 100));
    }

    #[test]
    fn repository_serializes_github_field_names() {
        let repo = &fixture_repositories()[0];
        let json = serde_json::to_value(repo).unwrap();
        assert_eq!(json["id"], 1296269);
        assert_eq!(json["full_name"], "octocat/Hello-World");
        assert_eq!(json["owner"]["type"], "User");
        assert_eq!(json["private"], false);
        assert_eq!(json["clone_url"], "https://github.com/octocat/Hello-World.git");
    }

    #[test]
    fn fixtures_have_unique_ids() {
        let repos = fixture_repositories();
        let mut ids: Vec<i64> = repos.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), repos.len());
    }
}
