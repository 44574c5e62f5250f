// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    network::EthereumWallet,
    primitives::{Address, B256},
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use token_deploy_tools::core::{
    artifact::{HardhatArtifacts, DEFAULT_ARTIFACTS_DIR},
    config::{ConfigError, NetworkConfig, NetworksFile, DEFAULT_NETWORK, PRIVATE_KEY_ENV},
    deployment::{ConstructorArgs, DeploymentRequest, TokenParams},
    network::NetworkError,
    supply::{Supply, DEFAULT_DECIMALS},
};

use crate::{
    constants::{
        DEFAULT_CONTRACT, DEFAULT_SUPPLY, DEFAULT_TOKEN_NAME, DEFAULT_TOKEN_SYMBOL, NETWORK_ENV,
    },
    utils::decode0x,
};

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Hardhat artifacts directory
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    artifacts: PathBuf,
}

impl ArtifactArgs {
    pub fn store(&self) -> HardhatArtifacts {
        HardhatArtifacts::new(&self.artifacts)
    }
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = PRIVATE_KEY_ENV, hide_env_values = true)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
}

impl AuthArgs {
    /// Loads the deployer's key. Never touches the network.
    pub fn build_wallet(&self, chain_id: Option<u64>) -> Result<EthereumWallet, ConfigError> {
        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).map_err(|err| {
                ConfigError::InvalidCredential(format!(
                    "could not open private key file {}: {err}",
                    file.display()
                ))
            })?;
            return Ok(EthereumWallet::new(signer_from_hex(&key)?.with_chain_id(chain_id)));
        }

        if let Some(key) = self.private_key.as_deref().filter(|key| !key.trim().is_empty()) {
            return Ok(EthereumWallet::new(signer_from_hex(key)?.with_chain_id(chain_id)));
        }

        let keystore = self
            .keystore_path
            .as_ref()
            .ok_or(ConfigError::MissingCredential)?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))
            .map_err(|err| {
                ConfigError::InvalidCredential(format!("could not read keystore password: {err}"))
            })?;

        let signer = LocalSigner::decrypt_keystore(keystore, password.trim_end())
            .map_err(|err| ConfigError::InvalidCredential(format!("keystore {keystore}: {err}")))?
            .with_chain_id(chain_id);
        Ok(EthereumWallet::new(signer))
    }
}

fn signer_from_hex(key: &str) -> Result<PrivateKeySigner, ConfigError> {
    let bytes = decode0x(key)
        .map_err(|err| ConfigError::InvalidCredential(format!("private key is not hex: {err}")))?;
    let bytes = B256::try_from(bytes.as_slice()).map_err(|_| {
        ConfigError::InvalidCredential(format!(
            "private key must be 32 bytes, got {}",
            bytes.len()
        ))
    })?;
    PrivateKeySigner::from_bytes(&bytes)
        .map_err(|err| ConfigError::InvalidCredential(err.to_string()))
}

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Named network to deploy to
    #[arg(long, env = NETWORK_ENV, default_value = DEFAULT_NETWORK)]
    network: String,
    /// RPC endpoint, overriding the network's configured URL
    #[arg(short, long)]
    endpoint: Option<String>,
    /// Network config file [default: deploy.toml, if present]
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ProviderArgs {
    pub fn resolve(&self) -> Result<NetworkConfig, ConfigError> {
        NetworksFile::discover(self.config.as_deref())?.resolve(
            &self.network,
            self.endpoint.as_deref(),
            |var| std::env::var(var).ok(),
        )
    }

    pub async fn build_provider_with_wallet(
        &self,
        network: &NetworkConfig,
        wallet: EthereumWallet,
    ) -> Result<impl Provider + WalletProvider, NetworkError> {
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&network.url)
            .await?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct TokenArgs {
    /// Name of the compiled contract to deploy
    #[arg(long, default_value = DEFAULT_CONTRACT)]
    pub contract: String,
    #[arg(long, default_value = DEFAULT_TOKEN_NAME)]
    token_name: String,
    #[arg(long, default_value = DEFAULT_TOKEN_SYMBOL)]
    token_symbol: String,
    /// Initial supply in whole tokens, scaled by 10^decimals
    #[arg(long, default_value = DEFAULT_SUPPLY)]
    supply: String,
    /// Decimals the token declares
    #[arg(long, default_value_t = DEFAULT_DECIMALS)]
    decimals: u8,
    /// Initial owner of the supply [default: the deployer]
    #[arg(long)]
    owner: Option<Address>,
    /// Raw constructor arguments, replacing the token arguments above
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    constructor_args: Option<Vec<String>>,
    /// Do not check the deployed token's decimals()
    #[arg(long)]
    skip_decimals_check: bool,
}

impl TokenArgs {
    pub fn request(&self) -> DeploymentRequest {
        let args = match &self.constructor_args {
            Some(args) => ConstructorArgs::Text(args.clone()),
            None => ConstructorArgs::Token(TokenParams {
                name: self.token_name.clone(),
                symbol: self.token_symbol.clone(),
                owner: self.owner,
                supply: Supply::new(&self.supply, self.decimals),
            }),
        };
        DeploymentRequest::new(&self.contract, args)
    }

    /// Only checked when the supply was scaled here.
    pub fn expected_decimals(&self) -> Option<u8> {
        (self.constructor_args.is_none() && !self.skip_decimals_check).then_some(self.decimals)
    }
}
