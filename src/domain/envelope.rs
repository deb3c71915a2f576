//! # Result Envelope
//!
//! Every resource-client call resolves to an [`ApiResponse`]. The status code is the
//! authoritative branch key; `ok` is a convenience computed by the client from the
//! operation's success code. Workflows branch on [`Outcome`] so the status-code table
//! lives in one place.

use thiserror::Error;

pub const OK: u16 = 200;
pub const CREATED: u16 = 201;
pub const NO_CONTENT: u16 = 204;
pub const BAD_REQUEST: u16 = 400;
pub const FORBIDDEN: u16 = 403;
pub const NOT_FOUND: u16 = 404;
pub const CONFLICT: u16 = 409;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T = ()> {
    pub ok: bool,
    pub status_code: u16,
    pub payload: Option<T>,
}

/// Classification of an envelope that every workflow matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    BadRequest,
    Forbidden,
    NotFound,
    Conflict,
    Other(u16),
}

impl<T> ApiResponse<T> {
    pub fn new(status_code: u16, ok: bool) -> Self {
        Self {
            ok,
            status_code,
            payload: None,
        }
    }

    /// A failed envelope carrying only a status code.
    pub fn failed(status_code: u16) -> Self {
        Self::new(status_code, false)
    }

    /// A successful envelope carrying a payload.
    pub fn success(status_code: u16, payload: T) -> Self {
        Self::new(status_code, true).with_payload(payload)
    }

    pub fn with_payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn outcome(&self) -> Outcome {
        if self.ok {
            return Outcome::Success;
        }
        match self.status_code {
            BAD_REQUEST => Outcome::BadRequest,
            FORBIDDEN => Outcome::Forbidden,
            NOT_FOUND => Outcome::NotFound,
            CONFLICT => Outcome::Conflict,
            other => Outcome::Other(other),
        }
    }

    /// Payload of a step that must succeed; anything else is an unexpected failure.
    pub fn into_payload(self, operation: &'static str) -> Result<T, ApiError> {
        if !self.ok {
            return Err(self.unexpected(operation));
        }
        self.payload.ok_or(ApiError::MissingPayload { operation })
    }

    /// Error for a status the calling workflow has no branch for.
    pub fn unexpected(&self, operation: &'static str) -> ApiError {
        ApiError::UnexpectedStatus {
            operation,
            status: self.status_code,
        }
    }
}

#[cfg(test)]
impl ApiResponse<()> {
    /// A successful envelope for operations without a body.
    pub fn done(status_code: u16) -> Self {
        Self::new(status_code, true)
    }
}

/// Failures of the resource client that are not business outcomes.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Could not decode API document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{operation} returned unexpected status {status}")]
    UnexpectedStatus { operation: &'static str, status: u16 },

    #[error("{operation} succeeded without a payload")]
    MissingPayload { operation: &'static str },
}
