// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

use token_deploy_tools::core::{config::ConfigError, network::NetworkError};
use token_deploy_tools::DeploymentError;

pub type CliResult = Result<(), CliError>;

#[derive(Debug)]
pub struct CliError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for CliError {
    /// `{:#}` prints the cause chain, skipping causes that repeat the previous message.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !f.alternate() {
            return self.error.fmt(f);
        }
        let mut previous: Option<String> = None;
        for cause in self.error.chain() {
            let message = cause.to_string();
            if previous.as_deref() == Some(message.as_str()) {
                continue;
            }
            if previous.is_some() {
                f.write_str(": ")?;
            }
            f.write_str(&message)?;
            previous = Some(message);
        }
        Ok(())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for CliError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<DeploymentError> for CliError {
    fn from(err: DeploymentError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<NetworkError> for CliError {
    fn from(err: NetworkError) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy::transports::TransportErrorKind;

    #[test]
    fn cause_chain_names_transport_failure_once() {
        let network = NetworkError::from(TransportErrorKind::custom_str("connection refused"));
        let err = CliError::from(DeploymentError::Network(network));
        let chain = format!("{err:#}");
        assert_eq!(chain.matches("connection refused").count(), 1, "{chain}");
        assert!(chain.starts_with("network error: rpc error: "), "{chain}");
        assert_eq!(err.to_string(), "network error");
    }
}
