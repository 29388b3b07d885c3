// Copyright (c) Walrus Foundation
// SPDX-License-Identifier: Apache-2.0

//! Errors that may be encountered while interacting with the publisher and
//! aggregator services.

use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;

/// A convenience alias for results of client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Error raised during communication with the publisher or aggregator.
///
/// Non-2xx responses are normalized into an error carrying the status code and
/// the raw response body; transport-level failures (DNS, connection refused,
/// TLS) pass through as the underlying [`reqwest::Error`].
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ClientError {
    #[from]
    kind: Kind,
}

impl ClientError {
    /// Returns true if the error is related to connecting to the server.
    pub fn is_connect(&self) -> bool {
        let Kind::Reqwest(ref err) = self.kind else {
            return false;
        };
        err.is_connect()
    }

    /// Returns the HTTP error status code associated with the error, if any.
    pub fn http_status_code(&self) -> Option<StatusCode> {
        match &self.kind {
            Kind::Status { code, .. } => Some(*code),
            Kind::Reqwest(err) => err.status(),
            Kind::Io(_) => None,
        }
    }

    /// Returns true if the HTTP error status code associated with the error is
    /// [`StatusCode::NOT_FOUND`].
    pub fn is_status_not_found(&self) -> bool {
        self.http_status_code() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns the raw body of the error response, if the error was produced
    /// from a non-2xx response.
    pub fn body(&self) -> Option<&[u8]> {
        match &self.kind {
            Kind::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns the structured error payload returned by the service, if the
    /// error response body contained one.
    pub fn api_error_info(&self) -> Option<&ApiErrorInfo> {
        match &self.kind {
            Kind::Status { info, .. } => info.as_ref(),
            _ => None,
        }
    }

    /// Builds the error for a response with a non-success status code.
    ///
    /// If the body is a JSON document of the shape the daemons emit
    /// (`{"error": {"code", "status", "message", "details"}}`), the payload is
    /// parsed in addition to being carried verbatim.
    pub(crate) fn from_error_response(code: StatusCode, body: Bytes) -> Self {
        let info = serde_json::from_slice::<ErrorEnvelope>(&body)
            .ok()
            .map(|envelope| envelope.error);
        Kind::Status { code, body, info }.into()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Kind::Reqwest(err).into()
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Kind::Io(err).into()
    }
}

/// Errors returned during the communication with the publisher or aggregator.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Kind {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("the service returned HTTP {code}: {}", status_message(body, info.as_ref()))]
    Status {
        code: StatusCode,
        body: Bytes,
        info: Option<ApiErrorInfo>,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn status_message(body: &Bytes, info: Option<&ApiErrorInfo>) -> String {
    match info.and_then(|info| info.message.as_deref()) {
        Some(message) => message.to_owned(),
        None => String::from_utf8_lossy(body).into_owned(),
    }
}

/// The structured error payload returned by the daemons in error responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorInfo {
    /// The numeric error code; usually mirrors the HTTP status code.
    #[serde(default)]
    pub code: Option<u16>,
    /// The machine-readable reason, e.g. `"FORBIDDEN_BLOB"`.
    #[serde(default)]
    pub status: Option<String>,
    /// The human-readable error message.
    #[serde(default)]
    pub message: Option<String>,
    /// Additional details attached to the error.
    #[serde(default)]
    pub details: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorInfo,
}

/// An error returned when constructing a [`WalrusClient`][crate::WalrusClient]
/// or loading its configuration has failed.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ClientBuildError {
    #[from]
    kind: BuildErrorKind,
}

impl ClientBuildError {
    pub(crate) fn reqwest(err: reqwest::Error) -> Self {
        BuildErrorKind::Reqwest(err).into()
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum BuildErrorKind {
    #[error("invalid {role} base URL: {source}")]
    InvalidUrl {
        role: &'static str,
        source: url::ParseError,
    },
    #[error("the {role} base URL must have a scheme and a host")]
    MissingHost { role: &'static str },
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("failed to read the configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse the configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
