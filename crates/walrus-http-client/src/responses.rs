// Copyright (c) Walrus Foundation
// SPDX-License-Identifier: Apache-2.0

//! Response types returned by the publisher and aggregator.

use reqwest::header::{CONTENT_LENGTH, ETAG, HeaderMap};
use serde::{Deserialize, Serialize};

/// The publisher's JSON response to a successful blob store.
///
/// The payload is passed through unmodified; its exact shape is owned by the
/// publisher, not by this client. Accessors are provided for the fields
/// callers most commonly need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobStoreResponse(serde_json::Value);

impl BlobStoreResponse {
    /// The blob ID of the stored blob, if present in the response.
    ///
    /// Covers both outcomes the publisher reports: a newly created blob
    /// (`newlyCreated.blobObject.blobId`) and a blob that was already
    /// certified (`alreadyCertified.blobId`).
    pub fn blob_id(&self) -> Option<&str> {
        self.0
            .pointer("/newlyCreated/blobObject/blobId")
            .or_else(|| self.0.pointer("/alreadyCertified/blobId"))
            .and_then(|value| value.as_str())
    }

    /// The Sui object ID of the newly created blob object, if any.
    pub fn object_id(&self) -> Option<&str> {
        self.0
            .pointer("/newlyCreated/blobObject/id")
            .and_then(|value| value.as_str())
    }

    /// Returns a reference to the raw JSON payload.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the response, returning the raw JSON payload.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

/// Header-derived metadata for a stored blob, obtained through a HEAD probe
/// without transferring the blob body.
#[derive(Debug, Clone)]
pub struct BlobMetadata {
    headers: HeaderMap,
}

impl BlobMetadata {
    pub(crate) fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// All response headers returned by the aggregator.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The value of the named header, if present and valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The size of the blob in bytes, as reported by the `Content-Length`
    /// header.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    /// The entity tag of the blob, with any surrounding quotes stripped.
    ///
    /// The aggregator sets this to the blob ID.
    pub fn etag(&self) -> Option<&str> {
        let value = self.headers.get(ETAG)?.to_str().ok()?;
        Some(value.trim_matches('"'))
    }
}
