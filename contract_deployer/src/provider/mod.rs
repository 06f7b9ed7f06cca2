//!
//! The network providers.
//!

pub mod direct;
pub mod mnemonic;
pub mod signer;

use std::future::Future;
use std::time::Duration;

use crate::error::Error;

///
/// The contract creation transaction.
///
#[derive(Debug, Clone, PartialEq)]
pub struct DeploymentTransaction {
    /// The creation bytecode followed by the ABI-encoded constructor arguments.
    pub data: web3::types::Bytes,
    /// The constructor arguments as configured, in constructor order.
    pub constructor_arguments: Vec<String>,
    /// The gas limit. Estimated by the provider if unset.
    pub gas_limit: Option<u64>,
}

///
/// The subset of the transaction receipt used to confirm a deployment.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// The transaction hash.
    pub transaction_hash: web3::types::H256,
    /// The number of the block including the transaction.
    pub block_number: u64,
    /// The created contract address.
    pub contract_address: Option<web3::types::Address>,
    /// Whether the execution has succeeded.
    pub succeeded: bool,
}

impl TryFrom<web3::types::TransactionReceipt> for Receipt {
    type Error = Error;

    fn try_from(receipt: web3::types::TransactionReceipt) -> Result<Self, Self::Error> {
        let block_number = receipt.block_number.ok_or_else(|| {
            Error::connection(format!(
                "receipt of {:?} has no block number",
                receipt.transaction_hash
            ))
        })?;

        Ok(Self {
            transaction_hash: receipt.transaction_hash,
            block_number: block_number.as_u64(),
            contract_address: receipt.contract_address,
            succeeded: receipt
                .status
                .map(|status| status.as_u64() == 1)
                .unwrap_or(true),
        })
    }
}

///
/// The network provider.
///
/// Signs and relays transactions on behalf of the deploying account.
///
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    ///
    /// Returns the chain id reported by the network.
    ///
    async fn chain_id(&self) -> Result<u64, Error>;

    ///
    /// Returns the latest block number.
    ///
    async fn block_number(&self) -> Result<u64, Error>;

    ///
    /// Broadcasts the contract creation transaction and returns its hash.
    ///
    async fn submit(&self, transaction: &DeploymentTransaction) -> Result<web3::types::H256, Error>;

    ///
    /// Returns the receipt, if the transaction has been included.
    ///
    async fn receipt(&self, transaction_hash: web3::types::H256) -> Result<Option<Receipt>, Error>;
}

///
/// Runs the network request within the wall-clock limit.
///
pub(crate) async fn bounded<T, F>(
    timeout: Duration,
    request: F,
    map_error: fn(web3::Error) -> Error,
) -> Result<T, Error>
where
    F: Future<Output = web3::Result<T>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(result) => result.map_err(map_error),
        Err(_) => Err(Error::connection(format!(
            "the network has not responded in {} ms",
            timeout.as_millis()
        ))),
    }
}

///
/// Maps a failure of a read-only request.
///
pub(crate) fn connection_error(error: web3::Error) -> Error {
    Error::connection(error.to_string())
}

///
/// Maps a failure of a transaction broadcast.
///
/// JSON-RPC errors mean the node has rejected the transaction, everything else is transport.
///
pub(crate) fn submission_error(error: web3::Error) -> Error {
    match error {
        web3::Error::Rpc(error) => Error::submission(error.message),
        error => Error::connection(error.to_string()),
    }
}

///
/// Resolves the broadcast result of a locally signed transaction.
///
/// A transport failure or a wall-clock timeout does not tell whether the node has accepted
/// the transaction, so the locally computed hash is returned to be awaited like any other.
///
pub(crate) fn broadcast_outcome(
    result: Result<web3::types::H256, Error>,
    transaction_hash: web3::types::H256,
) -> Result<web3::types::H256, Error> {
    match result {
        Err(Error::Connection { .. }) => Ok(transaction_hash),
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::error::Error;

    use super::bounded;
    use super::broadcast_outcome;
    use super::connection_error;
    use super::submission_error;

    #[tokio::test]
    async fn bounded_ok() {
        let result = bounded(
            Duration::from_millis(100),
            async { Ok::<u64, web3::Error>(42) },
            connection_error,
        )
        .await;

        assert_eq!(result.expect("Always valid"), 42);
    }

    #[tokio::test]
    async fn error_bounded_timeout() {
        let result = bounded(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<u64, web3::Error>(42)
            },
            connection_error,
        )
        .await;

        assert!(matches!(result, Err(Error::Connection { .. })));
    }

    #[test]
    fn submission_error_transport() {
        let error = submission_error(web3::Error::Unreachable);

        assert!(matches!(error, Error::Connection { .. }));
    }

    #[test]
    fn broadcast_outcome_unknown_is_awaited() {
        let local = web3::types::H256::from([0xcc; 32]);

        let result = broadcast_outcome(
            Err(Error::connection("the network has not responded in 10000 ms")),
            local,
        );

        assert_eq!(result.expect("Always valid"), local);
    }

    #[test]
    fn broadcast_outcome_rejection_is_kept() {
        let local = web3::types::H256::from([0xcc; 32]);

        let result = broadcast_outcome(Err(Error::submission("nonce too low")), local);

        assert!(matches!(result, Err(Error::Submission { .. })));
    }
}
