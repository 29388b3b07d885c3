// Copyright (c) Walrus Foundation
// SPDX-License-Identifier: Apache-2.0

//! Walrus client configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    client::WalrusClient,
    error::{BuildErrorKind, ClientBuildError},
};

/// Base-URL configuration for a [`WalrusClient`].
///
/// The two base URLs are the client's entire configuration surface; everything
/// else (timeouts, TLS, proxies) belongs to the injected HTTP client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the publisher, used for storing blobs.
    pub publisher_url: String,
    /// Base URL of the aggregator, used for reading blobs and their metadata.
    pub aggregator_url: String,
}

impl ClientConfig {
    /// Loads the configuration from the YAML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClientBuildError> {
        let contents =
            std::fs::read_to_string(path.as_ref()).map_err(BuildErrorKind::from)?;
        Ok(serde_yaml::from_str(&contents).map_err(BuildErrorKind::from)?)
    }

    /// Builds a [`WalrusClient`] from this configuration.
    pub fn build(&self) -> Result<WalrusClient, ClientBuildError> {
        WalrusClient::new(&self.publisher_url, &self.aggregator_url)
    }
}
