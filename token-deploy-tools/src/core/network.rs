// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Access to the target chain.

use std::future::Future;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::{PendingTransactionBuilder, PendingTransactionError, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
    sol,
    transports::{RpcError, TransportErrorKind},
};

sol! {
    #[sol(rpc)]
    interface IERC20Metadata {
        function decimals() external view returns (uint8);
    }
}

/// The parts of a transaction receipt that matter to a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReceipt {
    pub transaction_hash: TxHash,
    pub contract_address: Option<Address>,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

impl From<&TransactionReceipt> for DeploymentReceipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            contract_address: receipt.contract_address,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        }
    }
}

/// Chain operations needed to deploy a contract.
pub trait DeploymentNetwork {
    /// Chain id reported by the endpoint. Doubles as a reachability check.
    fn chain_id(&self) -> impl Future<Output = Result<u64, NetworkError>> + Send;

    /// Sends a contract-creation transaction from `from`, returning once the node accepts it.
    fn submit(
        &self,
        from: Address,
        initcode: Bytes,
    ) -> impl Future<Output = Result<TxHash, NetworkError>> + Send;

    /// Waits until `tx_hash` is included and buried under `confirmations - 1` further blocks.
    fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> impl Future<Output = Result<DeploymentReceipt, NetworkError>> + Send;

    /// Calls `decimals()` on a deployed token.
    fn token_decimals(
        &self,
        address: Address,
    ) -> impl Future<Output = Result<u8, NetworkError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("rpc error")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    #[error("node rejected transaction: {message} (code {code})")]
    Rejected { code: i64, message: String },
    #[error("failed waiting for deploy tx")]
    PendingTransaction(#[from] PendingTransactionError),
    #[error("contract call failed")]
    Contract(#[from] alloy::contract::Error),
}

impl NetworkError {
    /// Splits node error responses (nonce too low, insufficient funds, ...) from transport
    /// failures.
    pub fn from_submission(err: RpcError<TransportErrorKind>) -> Self {
        match err {
            RpcError::ErrorResp(payload) => Self::Rejected {
                code: payload.code,
                message: payload.message.to_string(),
            },
            err => Self::Rpc(err),
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// [`DeploymentNetwork`] over a JSON-RPC provider.
///
/// Signing happens in the provider's wallet filler, so the provider must hold a signer for every
/// address passed to [`DeploymentNetwork::submit`].
#[derive(Debug, Clone)]
pub struct RpcNetwork<P> {
    provider: P,
}

impl<P: Provider> RpcNetwork<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> DeploymentNetwork for RpcNetwork<P> {
    async fn chain_id(&self) -> Result<u64, NetworkError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn submit(&self, from: Address, initcode: Bytes) -> Result<TxHash, NetworkError> {
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_deploy_code(initcode);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(NetworkError::from_submission)?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> Result<DeploymentReceipt, NetworkError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await?;
        Ok(DeploymentReceipt::from(&receipt))
    }

    async fn token_decimals(&self, address: Address) -> Result<u8, NetworkError> {
        let decimals = IERC20Metadata::new(address, &self.provider)
            .decimals()
            .call()
            .await?;
        Ok(decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy::{
        primitives::{U256, U64},
        providers::{mock::Asserter, ProviderBuilder},
    };

    fn mocked_network(asserter: &Asserter) -> RpcNetwork<impl Provider> {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        RpcNetwork::new(provider)
    }

    #[tokio::test]
    async fn reads_chain_id() {
        let asserter = Asserter::new();
        let network = mocked_network(&asserter);

        asserter.push_success(&U64::from(11155111u64));
        assert_eq!(network.chain_id().await.unwrap(), 11155111);

        asserter.push_failure_msg("boom");
        assert!(matches!(network.chain_id().await, Err(NetworkError::Rpc(_))));
    }

    #[tokio::test]
    async fn classifies_rejected_submissions() {
        let asserter = Asserter::new();
        let network = mocked_network(&asserter);

        asserter.push_failure_msg("insufficient funds for gas * price + value");
        let err = network
            .submit(Address::repeat_byte(0x01), Bytes::from_static(&[0x60, 0x00]))
            .await
            .unwrap_err();
        assert!(err.is_rejection());
        assert!(err.to_string().contains("insufficient funds"));
    }

    #[tokio::test]
    async fn reads_token_decimals() {
        let asserter = Asserter::new();
        let network = mocked_network(&asserter);

        asserter.push_success(&Bytes::from(U256::from(6u64).to_be_bytes::<32>().to_vec()));
        assert_eq!(
            network
                .token_decimals(Address::repeat_byte(0x02))
                .await
                .unwrap(),
            6
        );
    }

    #[test]
    fn transport_failures_are_not_rejections() {
        let err = NetworkError::from_submission(TransportErrorKind::custom_str("connection refused"));
        assert!(!err.is_rejection());
    }

    #[test]
    fn rpc_error_leaves_details_to_its_source() {
        let err = NetworkError::from(TransportErrorKind::custom_str("connection refused"));
        assert_eq!(err.to_string(), "rpc error");
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("connection refused"));
    }
}
