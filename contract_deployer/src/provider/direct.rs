//!
//! The direct node provider.
//!

use std::time::Duration;

use crate::error::Error;

use super::bounded;
use super::connection_error;
use super::submission_error;
use super::DeploymentTransaction;
use super::Provider;
use super::Receipt;

///
/// The direct node provider.
///
/// Talks to a local development node and signs with its first unlocked account.
///
#[derive(Debug, Clone)]
pub struct DirectProvider {
    /// The JSON-RPC client.
    web3: web3::Web3<web3::transports::Http>,
    /// The network request limit.
    timeout: Duration,
}

impl DirectProvider {
    ///
    /// A shortcut constructor.
    ///
    /// Does not perform any network request.
    ///
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let transport = web3::transports::Http::new(url)
            .map_err(|error| Error::connection(format!("node `{url}`: {error}")))?;
        Ok(Self {
            web3: web3::Web3::new(transport),
            timeout,
        })
    }

    ///
    /// Returns the first unlocked account of the node.
    ///
    async fn sender(&self) -> Result<web3::types::Address, Error> {
        let accounts = bounded(
            self.timeout,
            self.web3.eth().accounts(),
            connection_error,
        )
        .await?;
        accounts
            .first()
            .copied()
            .ok_or_else(|| Error::connection("the node has no unlocked accounts"))
    }
}

#[async_trait::async_trait]
impl Provider for DirectProvider {
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
        let sender = self.sender().await?;

        let mut request = web3::types::TransactionRequest::builder()
            .from(sender)
            .data(transaction.data.clone());
        if let Some(gas_limit) = transaction.gas_limit {
            request = request.gas(web3::types::U256::from(gas_limit));
        }

        bounded(
            self.timeout,
            self.web3.eth().send_transaction(request.build()),
            submission_error,
        )
        .await
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
