//! Service error taxonomy.
//!
//! Valid absence (a postseason that has not started) is an empty result, not
//! an error, so nothing here represents it.

use mlb_api::client::ApiError;
use std::fmt;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Cold cache miss and the upstream call failed — nothing to serve.
    Upstream(ApiError),
    /// A caller-supplied identifier has no corresponding record.
    NotFound(String),
    /// A caller-supplied parameter failed validation.
    InvalidRequest(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Upstream(e) => write!(f, "MLB API unavailable: {e}"),
            ServiceError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ServiceError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<ApiError> for ServiceError {
    fn from(e: ApiError) -> Self {
        ServiceError::Upstream(e)
    }
}
