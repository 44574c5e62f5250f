// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Target network configuration.
//!
//! A small set of networks is built in. A `deploy.toml` file may add networks or override fields
//! of the built-in ones:
//!
//! ```toml
//! [networks.sepolia]
//! confirmations = 2
//!
//! [networks.base]
//! url_env = "BASE_RPC_URL"
//! chain_id = 8453
//! timeout_secs = 300
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";
pub const DEFAULT_NETWORK: &str = "sepolia";
pub const DEFAULT_CONFIRMATIONS: u64 = 1;
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Environment variable holding the deployer's private key.
pub const PRIVATE_KEY_ENV: &str = "MY_PRIVATE_KEY";
/// Environment variable holding the Sepolia RPC endpoint.
pub const SEPOLIA_RPC_URL_ENV: &str = "SEPOLIA_RPC_URL";

const SEPOLIA_CHAIN_ID: u64 = 11155111;
const LOCALHOST_URL: &str = "http://localhost:8545";
const LOCALHOST_CHAIN_ID: u64 = 8453;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown network {name}; known networks: {}", .known.join(", "))]
    UnknownNetwork { name: String, known: Vec<String> },
    #[error(
        "no RPC endpoint configured for network {network}{}",
        .env.as_ref().map(|var| format!("; set {var} or pass --endpoint")).unwrap_or_default()
    )]
    MissingEndpoint {
        network: String,
        env: Option<String>,
    },
    #[error("network {network} must wait for at least one confirmation")]
    NoConfirmations { network: String },
    #[error("you need to provide a private key to deploy (set MY_PRIVATE_KEY, or pass --private-key, --private-key-path or --keystore-path)")]
    MissingCredential,
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("network {network} expects chain id {expected}, but the endpoint reports {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings for one named network, as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSettings {
    pub url: Option<String>,
    pub url_env: Option<String>,
    pub chain_id: Option<u64>,
    pub confirmations: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl NetworkSettings {
    /// Overlays `other` on top of `self`, field by field.
    fn merge(&mut self, other: NetworkSettings) {
        if other.url.is_some() || other.url_env.is_some() {
            self.url = other.url;
            self.url_env = other.url_env;
        }
        self.chain_id = other.chain_id.or(self.chain_id);
        self.confirmations = other.confirmations.or(self.confirmations);
        self.timeout_secs = other.timeout_secs.or(self.timeout_secs);
    }
}

/// A fully resolved target network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: String,
    pub url: String,
    pub chain_id: Option<u64>,
    pub confirmations: u64,
    pub confirmation_timeout: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworksFile {
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkSettings>,
}

impl NetworksFile {
    /// Networks available without any config file.
    pub fn builtin() -> Self {
        let networks = BTreeMap::from([
            (
                "sepolia".to_string(),
                NetworkSettings {
                    url_env: Some(SEPOLIA_RPC_URL_ENV.to_string()),
                    chain_id: Some(SEPOLIA_CHAIN_ID),
                    ..Default::default()
                },
            ),
            (
                "localhost".to_string(),
                NetworkSettings {
                    url: Some(LOCALHOST_URL.to_string()),
                    chain_id: Some(LOCALHOST_CHAIN_ID),
                    ..Default::default()
                },
            ),
        ]);
        Self { networks }
    }

    pub fn parse(text: &str, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Built-in networks overlaid with the given config file, or with `deploy.toml` in the
    /// current directory if it exists.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut networks = Self::builtin();
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.is_file()),
        };
        if let Some(path) = path {
            debug!(@grey, "loading networks from {}", path.display());
            networks.merge(Self::load(path)?);
        }
        Ok(networks)
    }

    pub fn merge(&mut self, other: NetworksFile) {
        for (name, settings) in other.networks {
            self.networks.entry(name).or_default().merge(settings);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    /// Resolves a named network.
    ///
    /// `endpoint` takes precedence over the configured URL; `env` looks up environment
    /// variables named by `url_env`.
    pub fn resolve(
        &self,
        name: &str,
        endpoint: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<NetworkConfig, ConfigError> {
        let settings = self
            .networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_owned(),
                known: self.names().map(str::to_owned).collect(),
            })?;

        let url = endpoint
            .map(str::to_owned)
            .or_else(|| settings.url.clone())
            .or_else(|| settings.url_env.as_deref().and_then(&env))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEndpoint {
                network: name.to_owned(),
                env: settings.url_env.clone(),
            })?;

        let confirmations = settings.confirmations.unwrap_or(DEFAULT_CONFIRMATIONS);
        if confirmations == 0 {
            return Err(ConfigError::NoConfirmations {
                network: name.to_owned(),
            });
        }

        Ok(NetworkConfig {
            name: name.to_owned(),
            url,
            chain_id: settings.chain_id,
            confirmations,
            confirmation_timeout: settings
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT),
        })
    }
}
