// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.
//!
//! A deployment is a fixed sequence: pick the deployer, prepare constructor arguments, resolve the
//! compiled artifact, probe the endpoint, submit one contract-creation transaction, and wait for
//! it to be confirmed. Everything before submission may fail and be retried freely; once the node
//! has accepted the transaction it is never sent again, since a second submission under a new
//! nonce would deploy a second contract.

use std::{future::Future, time::Duration};

use alloy::primitives::{Address, TxHash};
use tokio::time;
use typed_builder::TypedBuilder;

use crate::{
    core::{
        account::{AccountError, AccountProvider, SigningIdentity},
        artifact::{ArtifactError, ArtifactStore},
        config::{ConfigError, DEFAULT_CONFIRMATIONS, DEFAULT_CONFIRMATION_TIMEOUT},
        network::{DeploymentNetwork, DeploymentReceipt, NetworkError},
        supply::SupplyError,
    },
    utils::{color::DebugColor, format_supply},
};

pub use request::{ConstructorArgs, DeploymentRequest, PreparedArgs, PreparedSupply, TokenParams};

mod request;

/// Delay before the first endpoint retry; doubled after every failed attempt.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, TypedBuilder)]
pub struct DeploymentConfig {
    pub request: DeploymentRequest,
    /// Name of the target network, for error messages.
    #[builder(default, setter(into))]
    pub network_name: String,
    #[builder(default = DEFAULT_CONFIRMATIONS)]
    pub confirmations: u64,
    #[builder(default = DEFAULT_CONFIRMATION_TIMEOUT)]
    pub confirmation_timeout: Duration,
    /// Fail before submission if the endpoint reports another chain.
    #[builder(default)]
    pub expected_chain_id: Option<u64>,
    /// Fail after confirmation if the deployed token reports other decimals.
    #[builder(default)]
    pub expected_decimals: Option<u8>,
    /// Extra attempts at reaching the endpoint before submission.
    #[builder(default)]
    pub connect_retries: u32,
}

/// A confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub contract_name: String,
    pub contract_address: Address,
    pub transaction_hash: TxHash,
    pub deployer: SigningIdentity,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub supply: Option<PreparedSupply>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("artifact for contract {name} not found")]
    ArtifactNotFound {
        name: String,
        #[source]
        source: ArtifactError,
    },
    #[error(transparent)]
    Artifact(ArtifactError),
    #[error("no signing identity configured")]
    NoSigningIdentity,
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
    #[error(transparent)]
    Supply(#[from] SupplyError),
    #[error("failed to submit deploy tx")]
    Submission(#[source] NetworkError),
    #[error(
        "deploy tx {} was not confirmed within {}s; it may still be mined, check it before deploying again",
        .tx_hash.debug_red(),
        .timeout.as_secs()
    )]
    ConfirmationTimeout { tx_hash: TxHash, timeout: Duration },
    #[error(
        "cancelled while waiting for deploy tx {}; it may still be mined, check it before deploying again",
        .tx_hash.debug_red()
    )]
    Cancelled { tx_hash: TxHash },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing address: no contract address in receipt of {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
    #[error(
        "token at {} reports {actual} decimals, but its supply was scaled by 10^{expected}",
        .address.debug_red()
    )]
    DecimalsMismatch {
        address: Address,
        expected: u8,
        actual: u8,
    },
    #[error("failed to read decimals of token at {}", .address.debug_red())]
    DecimalsUnavailable {
        address: Address,
        #[source]
        source: NetworkError,
    },
    #[error("network error")]
    Network(#[from] NetworkError),
}

impl From<ArtifactError> for DeploymentError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound { ref name, .. } => Self::ArtifactNotFound {
                name: name.clone(),
                source: err,
            },
            err => Self::Artifact(err),
        }
    }
}

/// Result of one run: either a confirmed deployment or the error that stopped it.
#[derive(Debug)]
pub enum DeploymentOutcome {
    Success(Deployment),
    Failure(DeploymentError),
}

impl From<Result<Deployment, DeploymentError>> for DeploymentOutcome {
    fn from(result: Result<Deployment, DeploymentError>) -> Self {
        match result {
            Ok(deployment) => Self::Success(deployment),
            Err(err) => Self::Failure(err),
        }
    }
}

impl DeploymentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Logs the outcome. The error itself is left to the caller, which owns the cause chain.
    pub fn report(&self) {
        match self {
            Self::Success(deployment) => {
                info!(@grey, "deployer address: {}", deployment.deployer.address().debug_lavender());
                if let Some(supply) = deployment.supply {
                    info!(@grey, "initial supply: {}", format_supply(supply.base_units, supply.decimals));
                }
                info!(@grey, "deployment tx hash: {}", deployment.transaction_hash.debug_lavender());
                if let Some(block) = deployment.block_number {
                    debug!(@grey, "included in block {block}, gas used: {}", deployment.gas_used);
                }
                mintln!(
                    "{} deployed at {}",
                    deployment.contract_name,
                    deployment.contract_address.debug_lavender()
                );
            }
            Self::Failure(_) => {
                error!(@red, "deployment failed, no contract address was obtained");
            }
        }
    }

    pub fn into_result(self) -> Result<Deployment, DeploymentError> {
        match self {
            Self::Success(deployment) => Ok(deployment),
            Self::Failure(err) => Err(err),
        }
    }
}

/// Deploys the requested contract and waits for confirmation.
pub async fn deploy(
    config: &DeploymentConfig,
    accounts: &impl AccountProvider,
    artifacts: &impl ArtifactStore,
    network: &impl DeploymentNetwork,
) -> Result<Deployment, DeploymentError> {
    deploy_until(config, accounts, artifacts, network, std::future::pending()).await
}

/// Same as [`deploy`], but gives up waiting for confirmation once `cancel` completes.
///
/// Cancellation never resubmits: the transaction already sent may still be mined.
pub async fn deploy_until(
    config: &DeploymentConfig,
    accounts: &impl AccountProvider,
    artifacts: &impl ArtifactStore,
    network: &impl DeploymentNetwork,
    cancel: impl Future<Output = ()>,
) -> Result<Deployment, DeploymentError> {
    let request = &config.request;

    let deployer = accounts
        .identities()
        .await?
        .into_iter()
        .next()
        .ok_or(DeploymentError::NoSigningIdentity)?;
    debug!(@grey, "sender address: {}", deployer.address().debug_lavender());

    let args = request.args().prepare(deployer.address())?;
    if let Some(supply) = args.supply() {
        debug!(@grey, "initial supply: {}", format_supply(supply.base_units, supply.decimals));
    }

    let artifact = artifacts.artifact(request.contract_name())?;
    let initcode = args
        .initcode(&artifact)
        .map_err(DeploymentError::InvalidConstructor)?;
    debug!(@grey, "initcode size: {} bytes", initcode.len());

    let chain_id = probe_chain_id(network, config.connect_retries).await?;
    if let Some(expected) = config.expected_chain_id {
        if chain_id != expected {
            return Err(ConfigError::ChainIdMismatch {
                network: config.network_name.clone(),
                expected,
                actual: chain_id,
            }
            .into());
        }
    }

    let tx_hash = network
        .submit(deployer.address(), initcode)
        .await
        .map_err(|err| {
            if err.is_rejection() {
                DeploymentError::Submission(err)
            } else {
                DeploymentError::Network(err)
            }
        })?;
    info!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

    let receipt = wait_for_confirmation(config, network, tx_hash, cancel).await?;
    if !receipt.success {
        return Err(DeploymentError::Reverted { tx_hash });
    }
    let contract_address = receipt
        .contract_address
        .ok_or(DeploymentError::NoContractAddress { tx_hash })?;

    if let Some(expected) = config.expected_decimals {
        let actual = network
            .token_decimals(contract_address)
            .await
            .map_err(|source| DeploymentError::DecimalsUnavailable {
                address: contract_address,
                source,
            })?;
        if actual != expected {
            return Err(DeploymentError::DecimalsMismatch {
                address: contract_address,
                expected,
                actual,
            });
        }
    }

    Ok(Deployment {
        contract_name: request.contract_name().to_owned(),
        contract_address,
        transaction_hash: receipt.transaction_hash,
        deployer,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        supply: args.supply(),
    })
}

/// Checks the endpoint is reachable, retrying with exponential backoff.
async fn probe_chain_id(
    network: &impl DeploymentNetwork,
    retries: u32,
) -> Result<u64, NetworkError> {
    let mut delay = INITIAL_BACKOFF;
    let mut attempt = 0;
    loop {
        match network.chain_id().await {
            Ok(chain_id) => return Ok(chain_id),
            Err(err) if attempt < retries => {
                attempt += 1;
                warn!(@yellow, "endpoint unavailable ({err}), retrying in {}ms ({attempt}/{retries})", delay.as_millis());
                time::sleep(delay).await;
                delay *= 2;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn wait_for_confirmation(
    config: &DeploymentConfig,
    network: &impl DeploymentNetwork,
    tx_hash: TxHash,
    cancel: impl Future<Output = ()>,
) -> Result<DeploymentReceipt, DeploymentError> {
    let timeout = config.confirmation_timeout;
    debug!(@grey,
        "waiting for {} confirmation(s), up to {}s",
        config.confirmations,
        timeout.as_secs()
    );
    let wait = time::timeout(timeout, network.wait_for_receipt(tx_hash, config.confirmations));
    tokio::select! {
        result = wait => match result {
            Ok(receipt) => Ok(receipt?),
            Err(_) => Err(DeploymentError::ConfirmationTimeout { tx_hash, timeout }),
        },
        () = cancel => {
            warn!(@yellow, "stopped waiting for {}", tx_hash.debug_lavender());
            Err(DeploymentError::Cancelled { tx_hash })
        }
    }
}
