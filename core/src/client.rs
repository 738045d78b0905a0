//! Client context and repository operations.
//!
//! # Design
//! `Octokit` holds only its `TokenConfiguration` and carries no mutable state
//! between calls. Every operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, so a host can run the round-trip itself. The callback
//! operations (`repositories`, `repository`) glue the two halves around a
//! `Transport` and report through a completion that fires exactly once per
//! settled request.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::TokenConfiguration;
use crate::error::ApiError;
use crate::http::{HttpEncoding, HttpRequest, HttpResponse};
use crate::response::Response;
use crate::router::{RepositoryRouter, Router};
use crate::transport::Transport;
use crate::types::Repository;

/// Page requested when the caller has no preference.
pub const DEFAULT_PAGE: &str = "1";

/// Page size requested when the caller has no preference.
pub const DEFAULT_PER_PAGE: &str = "100";

const ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub API client context.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network; see [`Transport`] for the I/O side.
#[derive(Debug, Clone, Default)]
pub struct Octokit {
    configuration: TokenConfiguration,
}

impl Octokit {
    pub fn new(configuration: TokenConfiguration) -> Self {
        Self { configuration }
    }

    /// Materialize `router` against this context: endpoint, encoded params,
    /// default headers and the token, if any.
    pub fn request<R: Router + ?Sized>(&self, router: &R) -> HttpRequest {
        let mut headers = vec![
            ("accept".to_string(), ACCEPT.to_string()),
            (
                "user-agent".to_string(),
                format!("octokit-rs/{}", env!("CARGO_PKG_VERSION")),
            ),
        ];
        if let Some(token) = &self.configuration.access_token {
            headers.push(("authorization".to_string(), format!("token {token}")));
        }

        let params = router.params();
        let (query, body) = match router.encoding() {
            HttpEncoding::Url => (
                params
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect(),
                None,
            ),
            HttpEncoding::Json => {
                headers.push(("content-type".to_string(), "application/json".to_string()));
                let body: serde_json::Map<String, Value> = params
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), Value::String(value)))
                    .collect();
                (Vec::new(), Some(Value::Object(body).to_string()))
            }
        };

        HttpRequest {
            method: router.method(),
            url: format!("{}{}", self.configuration.api_endpoint, router.path()),
            query,
            headers,
            body,
        }
    }

    pub fn build_repositories(&self, page: &str, per_page: &str) -> HttpRequest {
        RepositoryRouter::ReadRepositories {
            page: page.to_string(),
            per_page: per_page.to_string(),
        }
        .url_request(self)
    }

    pub fn build_repository(&self, owner: &str, name: &str) -> HttpRequest {
        RepositoryRouter::ReadRepository {
            owner: owner.to_string(),
            name: name.to_string(),
        }
        .url_request(self)
    }

    pub fn parse_repositories(&self, response: HttpResponse) -> Result<Vec<Repository>, ApiError> {
        decode_repositories(response)
    }

    pub fn parse_repository(&self, response: HttpResponse) -> Result<Repository, ApiError> {
        decode_repository(response)
    }

    /// Fetch one page of the authenticated user's repositories.
    ///
    /// `page` and `per_page` are sent as given; the API decides what an
    /// invalid value means. Use [`DEFAULT_PAGE`] / [`DEFAULT_PER_PAGE`] when
    /// the caller has no preference.
    pub fn repositories<T, F>(&self, transport: &T, page: &str, per_page: &str, completion: F)
    where
        T: Transport + ?Sized,
        F: FnOnce(Response<Vec<Repository>>) + Send + 'static,
    {
        let request = self.build_repositories(page, per_page);
        load(transport, request, decode_repositories, completion);
    }

    /// Fetch a single repository by owner login and name.
    pub fn repository<T, F>(&self, transport: &T, owner: &str, name: &str, completion: F)
    where
        T: Transport + ?Sized,
        F: FnOnce(Response<Repository>) + Send + 'static,
    {
        let request = self.build_repository(owner, name);
        load(transport, request, decode_repository, completion);
    }
}

/// Run `request` through `transport` and hand the decoded outcome to
/// `completion`. A transport error is forwarded as-is; `decode` only ever
/// sees a response that actually arrived.
fn load<T, P, D, F>(transport: &T, request: HttpRequest, decode: D, completion: F)
where
    T: Transport + ?Sized,
    D: FnOnce(HttpResponse) -> Result<P, ApiError> + Send + 'static,
    F: FnOnce(Response<P>) + Send + 'static,
{
    debug!(method = request.method.as_str(), url = %request.full_url(), "dispatching request");
    transport.execute(
        request,
        Box::new(move |outcome: Result<HttpResponse, ApiError>| {
            let result = match outcome {
                Ok(response) => {
                    trace!(status = response.status, "response received");
                    decode(response)
                }
                Err(err) => Err(err),
            };
            if let Err(err) = &result {
                debug!(error = %err, "request failed");
            }
            completion(result.into());
        }),
    )
}

fn decode_repositories(response: HttpResponse) -> Result<Vec<Repository>, ApiError> {
    match parse_json(response)? {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object().map(Repository::from_json).ok_or_else(|| {
                    ApiError::Deserialization(format!(
                        "expected a repository object, got {}",
                        json_kind(item)
                    ))
                })
            })
            .collect(),
        other => Err(ApiError::Deserialization(format!(
            "expected an array of repositories, got {}",
            json_kind(&other)
        ))),
    }
}

fn decode_repository(response: HttpResponse) -> Result<Repository, ApiError> {
    match parse_json(response)? {
        Value::Object(json) => Ok(Repository::from_json(&json)),
        other => Err(ApiError::Deserialization(format!(
            "expected a repository object, got {}",
            json_kind(&other)
        ))),
    }
}

fn parse_json(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    Ok(serde_json::from_str(&response.body)?)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
