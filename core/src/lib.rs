//! GitHub REST v3 repository client core.
//!
//! # Overview
//! Describes API endpoints as data, decodes loosely typed JSON into domain
//! values with safe defaults, and delivers outcomes as a two-variant
//! [`Response`] through a completion callback. The core never performs I/O
//! itself: a [`Transport`] (or the host, via the `build_*` / `parse_*` pairs)
//! executes the round-trip.
//!
//! # Design
//! - [`RepositoryRouter`] variants each know their method, path, params and
//!   encoding; [`Octokit::request`] turns any [`Router`] into an
//!   [`HttpRequest`].
//! - [`Repository`] / [`User`] decoding is total: missing or mistyped fields
//!   fall back to defaults and a missing `id` yields [`INVALID_ID`].
//! - Only the transport/decode boundary fails, with an [`ApiError`].
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod router;
pub mod transport;
pub mod types;

pub use client::{Octokit, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use config::TokenConfiguration;
pub use error::ApiError;
pub use http::{HttpEncoding, HttpMethod, HttpRequest, HttpResponse};
pub use response::Response;
pub use router::{RepositoryRouter, Router};
pub use transport::{Transport, TransportCompletion};
pub use types::{Repository, User, INVALID_ID};
