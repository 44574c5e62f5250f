// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use token_deploy_tools::{
    core::{account::WalletAccounts, deployment::DeploymentConfig, network::RpcNetwork},
    deploy_until, DeploymentOutcome,
};

use crate::{
    common_args::{ArtifactArgs, AuthArgs, ProviderArgs, TokenArgs},
    constants::DEFAULT_CONNECT_RETRIES,
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Extra attempts at reaching the endpoint before submitting
    #[arg(long, default_value_t = DEFAULT_CONNECT_RETRIES)]
    connect_retries: u32,

    #[command(flatten)]
    token: TokenArgs,
    #[command(flatten)]
    artifacts: ArtifactArgs,
    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    provider: ProviderArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let network = args.provider.resolve()?;
    let wallet = args.auth.build_wallet(network.chain_id)?;
    log::info!("deploying {} to {}", args.token.contract, network.name);

    let accounts = WalletAccounts::new(wallet.clone());
    let provider = args
        .provider
        .build_provider_with_wallet(&network, wallet)
        .await?;
    let config = DeploymentConfig::builder()
        .request(args.token.request())
        .network_name(network.name.clone())
        .confirmations(network.confirmations)
        .confirmation_timeout(network.confirmation_timeout)
        .expected_chain_id(network.chain_id)
        .expected_decimals(args.token.expected_decimals())
        .connect_retries(args.connect_retries)
        .build();

    let cancel = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::warn!("cannot listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };
    let outcome = DeploymentOutcome::from(
        deploy_until(
            &config,
            &accounts,
            &args.artifacts.store(),
            &RpcNetwork::new(provider),
            cancel,
        )
        .await,
    );
    outcome.report();
    outcome.into_result()?;
    Ok(())
}
