//! Two-outcome result handed to completion callbacks.

use crate::error::ApiError;

/// Outcome of one API call: exactly one of a decoded payload or the error
/// that stopped the call.
#[derive(Debug, Clone, PartialEq)]
pub enum Response<T> {
    Success(T),
    Failure(ApiError),
}

impl<T> Response<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Response::Failure(_))
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            Response::Success(value) => Ok(value),
            Response::Failure(err) => Err(err),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        match self {
            Response::Success(value) => Response::Success(f(value)),
            Response::Failure(err) => Response::Failure(err),
        }
    }
}

impl<T> From<Result<T, ApiError>> for Response<T> {
    fn from(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Response::Success(value),
            Err(err) => Response::Failure(err),
        }
    }
}
