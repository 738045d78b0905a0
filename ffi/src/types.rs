//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String` (null for an unset optional), raw
//! pointers instead of `Vec`, and tagged enums with explicit discriminants.
//! Conversion functions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use octokit_core::error::ApiError;
use octokit_core::http::HttpMethod;
use octokit_core::types::{Repository, User};

/// Opaque handle to an `Octokit` client. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiOctokit {
    pub(crate) inner: octokit_core::Octokit,
}

/// Move `s` onto the C heap, cut at the first interior NUL so C readers see
/// the same text they would have stopped at.
pub(crate) fn c_string(mut s: String) -> *mut c_char {
    if let Some(nul) = s.find('\0') {
        s.truncate(nul);
    }
    CString::new(s).map_or(std::ptr::null_mut(), CString::into_raw)
}

pub(crate) fn c_string_opt(s: Option<String>) -> *mut c_char {
    s.map(c_string).unwrap_or(std::ptr::null_mut())
}

/// Release a string produced by `c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Patch = 3,
    Delete = 4,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// `url` already carries the encoded query string. The C caller executes the
/// request and passes the response back through `octo_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: octokit_core::HttpRequest) -> *mut Self {
        let url = c_string(req.full_url());
        let body = c_string_opt(req.body);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request, then
/// passes a pointer to an `octo_parse_*` function. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiOctoResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Deserialization = 3,
    Transport = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `octo_free_result` what `FfiOctoResult::data` points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    Repository = 1,
    RepositoryList = 2,
}

/// Repository owner exposed to C. Unset strings are null.
#[repr(C)]
pub struct FfiUser {
    pub id: i64,
    pub login: *mut c_char,
    pub name: *mut c_char,
    pub avatar_url: *mut c_char,
    pub user_type: *mut c_char,
}

impl FfiUser {
    fn from_core(user: User) -> Self {
        FfiUser {
            id: user.id,
            login: c_string_opt(user.login),
            name: c_string_opt(user.name),
            avatar_url: c_string_opt(user.avatar_url),
            user_type: c_string_opt(user.user_type),
        }
    }

    fn free_fields(&self) {
        free_c_string(self.login);
        free_c_string(self.name);
        free_c_string(self.avatar_url);
        free_c_string(self.user_type);
    }
}

/// A repository exposed to C. Strings holding a NUL are cut at it.
///
/// `is_fork` is tri-state: -1 = not reported, 0 = false, 1 = true.
#[repr(C)]
pub struct FfiRepository {
    pub id: i64,
    pub owner: FfiUser,
    pub name: *mut c_char,
    pub full_name: *mut c_char,
    pub description: *mut c_char,
    pub is_private: bool,
    pub is_fork: i32,
    pub git_url: *mut c_char,
    pub ssh_url: *mut c_char,
    pub clone_url: *mut c_char,
    pub size: i64,
}

impl FfiRepository {
    pub(crate) fn from_core(repo: Repository) -> Self {
        FfiRepository {
            id: repo.id(),
            owner: FfiUser::from_core(repo.owner().clone()),
            name: c_string_opt(repo.name),
            full_name: c_string_opt(repo.full_name),
            description: c_string_opt(repo.description),
            is_private: repo.is_private,
            is_fork: match repo.is_fork {
                None => -1,
                Some(false) => 0,
                Some(true) => 1,
            },
            git_url: c_string_opt(repo.git_url),
            ssh_url: c_string_opt(repo.ssh_url),
            clone_url: c_string_opt(repo.clone_url),
            size: repo.size,
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        self.owner.free_fields();
        free_c_string(self.name);
        free_c_string(self.full_name);
        free_c_string(self.description);
        free_c_string(self.git_url);
        free_c_string(self.ssh_url);
        free_c_string(self.clone_url);
    }
}

/// A list of repositories exposed to C, in API order.
#[repr(C)]
pub struct FfiRepositoryList {
    pub items: *mut FfiRepository,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiOctoResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiOctoResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiOctoResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn error(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiOctoResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a single `FfiRepository`.
    pub(crate) fn ok_repository(repo: Repository) -> *mut Self {
        let ffi_repo = Box::new(FfiRepository::from_core(repo));
        Self::ok(FfiDataTag::Repository, Box::into_raw(ffi_repo) as *mut std::ffi::c_void)
    }

    /// Build a success result carrying a `FfiRepositoryList`.
    pub(crate) fn ok_repository_list(repos: Vec<Repository>) -> *mut Self {
        let len = repos.len() as u32;
        let items = if repos.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_repos: Box<[FfiRepository]> =
                repos.into_iter().map(FfiRepository::from_core).collect();
            Box::into_raw(ffi_repos) as *mut FfiRepository
        };

        let ffi_list = Box::new(FfiRepositoryList { items, len });
        Self::ok(FfiDataTag::RepositoryList, Box::into_raw(ffi_list) as *mut std::ffi::c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16),
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Deserialization(_) => (FfiErrorCode::Deserialization, 0),
            ApiError::Transport(_) => (FfiErrorCode::Transport, 0),
        };
        Self::error(error_code, http_status, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
