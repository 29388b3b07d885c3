// Copyright (c) Walrus Foundation
// SPDX-License-Identifier: Apache-2.0

//! A client for the Walrus HTTP API.
//!
//! Walrus exposes blob storage through two HTTP services: a *publisher* that
//! accepts writes and an *aggregator* that serves reads. [`WalrusClient`]
//! wraps both behind a small typed surface: store a blob (from bytes, a file,
//! or a stream of chunks), read it back (as bytes, to a file, or as a
//! stream), and probe its header-derived metadata.
//!
//! Each operation is a single request/response exchange. Non-2xx responses
//! are normalized into a [`ClientError`] carrying the status code and body;
//! transport-level failures pass through from [`reqwest`] untouched. The
//! client performs no retries and keeps no per-call state.
//!
//! ```no_run
//! use walrus_http_client::{StoreOptions, WalrusClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WalrusClient::new(
//!     "https://publisher.walrus-testnet.walrus.space",
//!     "https://aggregator.walrus-testnet.walrus.space",
//! )?;
//!
//! let options = StoreOptions {
//!     epochs: Some(2),
//!     deletable: Some(true),
//!     ..Default::default()
//! };
//! let response = client.store_blob(&b"hello walrus"[..], &options).await?;
//! let blob_id = response.blob_id().expect("publisher returns a blob ID");
//!
//! let bytes = client.read_blob(blob_id).await?;
//! assert_eq!(&bytes[..], b"hello walrus");
//! # Ok(())
//! # }
//! ```

/// The client and its per-store options.
pub mod client;
/// Client configuration.
pub mod config;
/// Error types.
pub mod error;
/// Response types.
pub mod responses;

pub use crate::{
    client::{StoreOptions, WalrusClient, WalrusClientBuilder},
    config::ClientConfig,
    error::{ApiErrorInfo, ClientBuildError, ClientError, ClientResult},
    responses::{BlobMetadata, BlobStoreResponse},
};
