//! Route descriptors: what to ask for, never how to send it.
//!
//! # Design
//! A `Router` is a value describing one endpoint: verb, path, params and
//! how the params are encoded. It does not talk to the network. To get a
//! concrete request it hands itself to the client context
//! ([`Octokit::request`]), which adds the endpoint, auth and default headers.
//! Adding an endpoint means adding a variant and its four projections; the
//! transport is untouched.

use std::collections::BTreeMap;

use crate::client::Octokit;
use crate::http::{HttpEncoding, HttpMethod, HttpRequest};

pub const PAGE_KEY: &str = "page";
pub const PER_PAGE_KEY: &str = "per_page";

/// One API endpoint, described as pure data.
pub trait Router {
    fn method(&self) -> HttpMethod;

    fn encoding(&self) -> HttpEncoding;

    fn params(&self) -> BTreeMap<&'static str, String>;

    /// Path relative to the API endpoint, starting with `/`.
    fn path(&self) -> String;

    /// Ask `context` to materialize this route as a full request.
    fn url_request(&self, context: &Octokit) -> HttpRequest {
        context.request(self)
    }
}

/// Repository endpoints of the GitHub REST v3 API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryRouter {
    /// `GET /user/repos`: one page of the authenticated user's repositories.
    ReadRepositories { page: String, per_page: String },
    /// `GET /repos/{owner}/{name}`.
    ReadRepository { owner: String, name: String },
}

impl Router for RepositoryRouter {
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn encoding(&self) -> HttpEncoding {
        HttpEncoding::Url
    }

    fn params(&self) -> BTreeMap<&'static str, String> {
        match self {
            RepositoryRouter::ReadRepositories { page, per_page } => BTreeMap::from([
                (PER_PAGE_KEY, per_page.clone()),
                (PAGE_KEY, page.clone()),
            ]),
            RepositoryRouter::ReadRepository { .. } => BTreeMap::new(),
        }
    }

    fn path(&self) -> String {
        match self {
            RepositoryRouter::ReadRepositories { .. } => "/user/repos".to_string(),
            RepositoryRouter::ReadRepository { owner, name } => format!(
                "/repos/{}/{}",
                urlencoding::encode(owner),
                urlencoding::encode(name)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(page: &str, per_page: &str) -> RepositoryRouter {
        RepositoryRouter::ReadRepositories {
            page: page.to_string(),
            per_page: per_page.to_string(),
        }
    }

    fn get(owner: &str, name: &str) -> RepositoryRouter {
        RepositoryRouter::ReadRepository {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn read_repositories_projections() {
        let route = list("2", "50");
        assert_eq!(route.method(), HttpMethod::Get);
        assert_eq!(route.encoding(), HttpEncoding::Url);
        assert_eq!(route.path(), "/user/repos");
        assert_eq!(
            route.params(),
            BTreeMap::from([("page", "2".to_string()), ("per_page", "50".to_string())])
        );
    }

    #[test]
    fn read_repository_projections() {
        let route = get("octocat", "Hello-World");
        assert_eq!(route.method(), HttpMethod::Get);
        assert_eq!(route.encoding(), HttpEncoding::Url);
        assert_eq!(route.path(), "/repos/octocat/Hello-World");
        assert!(route.params().is_empty());
    }

    #[test]
    fn page_values_are_passed_through_unvalidated() {
        let route = list("not-a-number", "");
        assert_eq!(route.params()[PAGE_KEY], "not-a-number");
        assert_eq!(route.params()[PER_PAGE_KEY], "");
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(get("a/b", "c d").path(), "/repos/a%2Fb/c%20d");
        assert_eq!(get("octo.cat", "x_y~z").path(), "/repos/octo.cat/x_y~z");
    }

    #[test]
    fn projections_are_pure() {
        for route in [list("1", "100"), get("octocat", "Spoon-Knife")] {
            let twin = route.clone();
            assert_eq!(route.method(), twin.method());
            assert_eq!(route.encoding(), twin.encoding());
            assert_eq!(route.method(), route.method());
            assert_eq!(route.params(), twin.params());
            assert_eq!(route.path(), twin.path());
        }
    }

    #[test]
    fn url_request_delegates_to_context() {
        let context = Octokit::default();
        let route = get("octocat", "Hello-World");
        assert_eq!(route.url_request(&context), context.request(&route));
    }
}
