// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Signing identities available to the deployer.

use std::{fmt, future::Future};

use alloy::{
    network::{Ethereum, EthereumWallet, NetworkWallet},
    primitives::Address,
};

/// An account able to authorize transactions.
///
/// The key material stays with the provider; this is only a handle naming the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SigningIdentity {
    address: Address,
}

impl SigningIdentity {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.address.fmt(f)
    }
}

/// Source of signing identities, listed in order of preference.
pub trait AccountProvider {
    fn identities(
        &self,
    ) -> impl Future<Output = Result<Vec<SigningIdentity>, AccountError>> + Send;
}

#[derive(Debug, thiserror::Error)]
#[error("account provider failed: {0}")]
pub struct AccountError(pub String);

/// Locally held keys, as loaded from a private key or keystore.
#[derive(Clone)]
pub struct WalletAccounts {
    wallet: EthereumWallet,
}

impl WalletAccounts {
    pub fn new(wallet: EthereumWallet) -> Self {
        Self { wallet }
    }
}

impl AccountProvider for WalletAccounts {
    /// Lists the wallet's signers, default signer first.
    async fn identities(&self) -> Result<Vec<SigningIdentity>, AccountError> {
        let default = NetworkWallet::<Ethereum>::default_signer_address(&self.wallet);
        let mut addresses: Vec<Address> =
            NetworkWallet::<Ethereum>::signer_addresses(&self.wallet).collect();
        addresses.sort_by_key(|address| (*address != default, *address));
        Ok(addresses.into_iter().map(SigningIdentity::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy::{primitives::address, signers::local::PrivateKeySigner};

    const KEY_0: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_1: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    #[tokio::test]
    async fn default_signer_comes_first() {
        let first: PrivateKeySigner = KEY_1.parse().unwrap();
        let second: PrivateKeySigner = KEY_0.parse().unwrap();
        let mut wallet = EthereumWallet::new(first);
        wallet.register_signer(second);

        let identities = WalletAccounts::new(wallet).identities().await.unwrap();
        assert_eq!(
            identities,
            vec![
                SigningIdentity::new(address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")),
                SigningIdentity::new(address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")),
            ]
        );
    }

    #[tokio::test]
    async fn empty_wallet_has_no_identities() {
        let identities = WalletAccounts::new(EthereumWallet::default())
            .identities()
            .await
            .unwrap();
        assert!(identities.is_empty());
    }
}
