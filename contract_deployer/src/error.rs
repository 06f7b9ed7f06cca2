//!
//! The contract deployer error.
//!

use std::path::PathBuf;

///
/// The contract deployer error.
///
/// Every variant is terminal for the run: nothing is retried internally.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration required by the selected network is missing or malformed.
    #[error("Configuration of network `{network}`: {reason}")]
    Config {
        /// The selected network name.
        network: String,
        /// The description of the problem.
        reason: String,
    },
    /// The requested network profile does not exist.
    #[error("Unknown network `{name}`. Known networks: {}", known.join(", "))]
    UnknownNetwork {
        /// The requested network name.
        name: String,
        /// The names of the bundled profiles.
        known: Vec<String>,
    },
    /// The contract creation transaction has been rejected or reverted.
    #[error("Deployment transaction rejected: {reason}")]
    Submission {
        /// The description of the rejection.
        reason: String,
    },
    /// The required number of confirmations has not been reached in time.
    #[error(
        "Transaction {transaction_hash:?} reached {confirmations} of {required} confirmations within {blocks} blocks"
    )]
    DeploymentTimeout {
        /// The broadcast transaction hash.
        transaction_hash: web3::types::H256,
        /// The confirmations observed before giving up.
        confirmations: u64,
        /// The confirmations required by the profile.
        required: u64,
        /// The timeout window in blocks.
        blocks: u64,
    },
    /// The network is unreachable or does not match the profile.
    #[error("Connection: {reason}")]
    Connection {
        /// The description of the failure.
        reason: String,
    },
    /// The compiled contract artifact cannot be used.
    #[error("Artifact {path:?}: {reason}")]
    Artifact {
        /// The artifact file path.
        path: PathBuf,
        /// The description of the problem.
        reason: String,
    },
    /// The block explorer has not accepted the source code.
    #[error("Verification: {reason}")]
    Verification {
        /// The description of the failure.
        reason: String,
    },
}

impl Error {
    ///
    /// A shortcut constructor.
    ///
    pub fn config(network: &str, reason: impl Into<String>) -> Self {
        Self::Config {
            network: network.to_owned(),
            reason: reason.into(),
        }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn submission(reason: impl Into<String>) -> Self {
        Self::Submission {
            reason: reason.into(),
        }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Artifact {
            path: path.into(),
            reason: reason.into(),
        }
    }

    ///
    /// A shortcut constructor.
    ///
    pub fn verification(reason: impl Into<String>) -> Self {
        Self::Verification {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn unknown_network_lists_known_names() {
        let error = Error::UnknownNetwork {
            name: "mainnet".to_owned(),
            known: vec!["development".to_owned(), "goerli".to_owned()],
        };

        assert_eq!(
            error.to_string(),
            "Unknown network `mainnet`. Known networks: development, goerli"
        );
    }

    #[test]
    fn config_names_network() {
        let error = Error::config("goerli", "environment variable `MNEMONIC` is not set");

        assert_eq!(
            error.to_string(),
            "Configuration of network `goerli`: environment variable `MNEMONIC` is not set"
        );
    }
}
