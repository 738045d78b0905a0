//! C-ABI wrapper around `octokit-core`.
//!
//! # Overview
//! Exposes the repository operations through `extern "C"` functions so any
//! language with a C FFI can build requests and decode responses without
//! linking to a Rust async runtime or serde directly. The host performs the
//! HTTP round-trip between `octo_build_*` and `octo_parse_*`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiOctoResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `octo_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use octokit_core::http::HttpResponse;
use octokit_core::{Octokit, TokenConfiguration};

use types::*;

/// Borrow a caller-owned C string, or `None` if it is not valid UTF-8.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned slice.
unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    CStr::from_ptr(ptr).to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url`, authenticating with `token`.
///
/// `token` may be null for anonymous access. Returns null if `base_url` is
/// null, if either string is not valid UTF-8, or if an internal panic occurs. The caller must free the returned
/// pointer with `octo_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn octo_client_new(base_url: *const c_char, token: *const c_char) -> *mut FfiOctokit {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Some(url) = (unsafe { read_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let mut configuration = TokenConfiguration::default().with_endpoint(url);
        if !token.is_null() {
            let Some(token) = (unsafe { read_str(token) }) else {
                return std::ptr::null_mut();
            };
            configuration.access_token = Some(token.to_string());
        }
        Box::into_raw(Box::new(FfiOctokit {
            inner: Octokit::new(configuration),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `octo_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn octo_client_free(client: *mut FfiOctokit) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build a request for one page of the authenticated user's repositories.
///
/// `page` and `per_page` are passed through unvalidated.
/// Returns null if any argument is null or not valid UTF-8.
/// The caller must free the returned pointer with `octo_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn octo_build_repositories(
    client: *const FfiOctokit,
    page: *const c_char,
    per_page: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || page.is_null() || per_page.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(page), Some(per_page)) = (unsafe { read_str(page) }, unsafe { read_str(per_page) })
        else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_repositories(page, per_page))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a request for a single repository.
///
/// Returns null if any argument is null or not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn octo_build_repository(
    client: *const FfiOctokit,
    owner: *const c_char,
    name: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || owner.is_null() || name.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(owner), Some(name)) = (unsafe { read_str(owner) }, unsafe { read_str(name) })
        else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_repository(owner, name))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as an empty string; invalid UTF-8 is replaced with U+FFFD so the JSON
/// parser reports the offending position.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse the response to an `octo_build_repositories` request.
///
/// Returns a result with `data_tag = RepositoryList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn octo_parse_repositories(
    client: *const FfiOctokit,
    response: *const FfiHttpResponse,
) -> *mut FfiOctoResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiOctoResult::null_arg("client");
        }
        if response.is_null() {
            return FfiOctoResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let core_resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_repositories(core_resp) {
            Ok(repos) => FfiOctoResult::ok_repository_list(repos),
            Err(e) => FfiOctoResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiOctoResult::panic("panic in octo_parse_repositories"))
}

/// Parse the response to an `octo_build_repository` request.
///
/// Returns a result with `data_tag = Repository` on success.
#[unsafe(no_mangle)]
pub extern "C" fn octo_parse_repository(
    client: *const FfiOctokit,
    response: *const FfiHttpResponse,
) -> *mut FfiOctoResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiOctoResult::null_arg("client");
        }
        if response.is_null() {
            return FfiOctoResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let core_resp = ffi_response_to_core(unsafe { &*response });
        match client.inner.parse_repository(core_resp) {
            Ok(repo) => FfiOctoResult::ok_repository(repo),
            Err(e) => FfiOctoResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiOctoResult::panic("panic in octo_parse_repository"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `octo_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn octo_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiOctoResult` returned by any `octo_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn octo_free_result(result: *mut FfiOctoResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Repository => {
                let repo = unsafe { Box::from_raw(result.data as *mut FfiRepository) };
                repo.free_fields();
            }
            FfiDataTag::RepositoryList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiRepositoryList) };
                if !list.items.is_null() && list.len > 0 {
                    let items = unsafe {
                        Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                            list.items,
                            list.len as usize,
                        ))
                    };
                    for item in items.iter() {
                        item.free_fields();
                    }
                }
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn octo_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
