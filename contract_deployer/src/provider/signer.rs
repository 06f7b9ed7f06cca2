//!
//! The mnemonic signer provider.
//!

use std::time::Duration;

use crate::error::Error;

use super::bounded;
use super::broadcast_outcome;
use super::connection_error;
use super::mnemonic;
use super::submission_error;
use super::DeploymentTransaction;
use super::Provider;
use super::Receipt;

///
/// The mnemonic signer provider.
///
/// Talks to a remote endpoint and signs locally with the key derived from the mnemonic.
///
#[derive(Clone)]
pub struct SignerProvider {
    /// The JSON-RPC client.
    web3: web3::Web3<web3::transports::Http>,
    /// The deploying account key.
    secret_key: web3::signing::SecretKey,
    /// The deploying account address.
    address: web3::types::Address,
    /// The chain id to sign for, if pinned.
    chain_id: Option<u64>,
    /// The network request limit.
    timeout: Duration,
}

impl SignerProvider {
    /// The index of the deploying account.
    pub const ACCOUNT_INDEX: u32 = 0;

    ///
    /// A shortcut constructor.
    ///
    /// Derives the key and prepares the transport without any network request.
    ///
    pub fn new(
        endpoint: &str,
        phrase: &str,
        chain_id: Option<u64>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let secret_key = mnemonic::derive_secret_key(phrase, Self::ACCOUNT_INDEX)?;
        let transport = web3::transports::Http::new(endpoint)
            .map_err(|error| anyhow::anyhow!("endpoint `{endpoint}`: {error}"))?;

        Ok(Self {
            web3: web3::Web3::new(transport),
            address: mnemonic::address(&secret_key),
            secret_key,
            chain_id,
            timeout,
        })
    }

    ///
    /// Returns the deploying account address.
    ///
    pub fn address(&self) -> web3::types::Address {
        self.address
    }

    ///
    /// Estimates the gas of the creation transaction.
    ///
    async fn estimate_gas(&self, data: web3::types::Bytes) -> Result<web3::types::U256, Error> {
        let request = web3::types::CallRequest::builder()
            .from(self.address)
            .data(data)
            .build();
        bounded(
            self.timeout,
            self.web3.eth().estimate_gas(request, None),
            submission_error,
        )
        .await
    }
}

#[async_trait::async_trait]
impl Provider for SignerProvider {
    async fn chain_id(&self) -> Result<u64, Error> {
        bounded(self.timeout, self.web3.eth().chain_id(), connection_error)
            .await
            .map(|chain_id| chain_id.low_u64())
    }

    async fn block_number(&self) -> Result<u64, Error> {
        bounded(self.timeout, self.web3.eth().block_number(), connection_error)
            .await
            .map(|number| number.as_u64())
    }

    async fn submit(&self, transaction: &DeploymentTransaction) -> Result<web3::types::H256, Error> {
        let gas = match transaction.gas_limit {
            Some(gas_limit) => web3::types::U256::from(gas_limit),
            None => self.estimate_gas(transaction.data.clone()).await?,
        };

        let parameters = web3::types::TransactionParameters {
            to: None,
            gas,
            data: transaction.data.clone(),
            chain_id: self.chain_id,
            ..Default::default()
        };
        let signed = bounded(
            self.timeout,
            self.web3
                .accounts()
                .sign_transaction(parameters, web3::signing::SecretKeyRef::new(&self.secret_key)),
            connection_error,
        )
        .await?;

        let result = bounded(
            self.timeout,
            self.web3
                .eth()
                .send_raw_transaction(signed.raw_transaction),
            submission_error,
        )
        .await;
        broadcast_outcome(result, signed.transaction_hash)
    }

    async fn receipt(&self, transaction_hash: web3::types::H256) -> Result<Option<Receipt>, Error> {
        bounded(
            self.timeout,
            self.web3.eth().transaction_receipt(transaction_hash),
            connection_error,
        )
        .await?
        .map(Receipt::try_from)
        .transpose()
    }
}

impl std::fmt::Debug for SignerProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerProvider")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::time::Duration;

    use super::SignerProvider;

    #[test]
    fn new_derives_address_offline() {
        let provider = SignerProvider::new(
            "https://goerli.example.org/v3/key",
            "test test test test test test test test test test test junk",
            Some(5),
            Duration::from_millis(10_000),
        )
        .expect("Always valid");

        assert_eq!(
            provider.address(),
            web3::types::Address::from_str("f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
                .expect("Always valid")
        );
        assert!(!format!("{provider:?}").contains("secret"));
    }
}
