// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use token_deploy_tools::core::config::{NetworksFile, DEFAULT_CONFIRMATIONS};

use crate::error::CliResult;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Network config file [default: deploy.toml, if present]
    #[arg(long)]
    config: Option<PathBuf>,
}

pub fn exec(args: Args) -> CliResult {
    let networks = NetworksFile::discover(args.config.as_deref())?;
    for (name, settings) in &networks.networks {
        let url = match (&settings.url, &settings.url_env) {
            (Some(url), _) => url.clone(),
            (None, Some(var)) => format!("${var}"),
            (None, None) => "-".to_string(),
        };
        let chain_id = settings
            .chain_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "any".to_string());
        println!(
            "{name}\t{url}\tchain id {chain_id}\t{} confirmation(s)",
            settings.confirmations.unwrap_or(DEFAULT_CONFIRMATIONS)
        );
    }
    Ok(())
}
