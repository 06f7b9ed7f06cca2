//!
//! The deployment record.
//!

use serde::Serialize;

///
/// The deployment record.
///
/// Created once per successful run and never mutated afterwards.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// The network profile name.
    pub network: String,
    /// The deployed contract name.
    pub contract_name: String,
    /// The deployed contract address.
    pub address: web3::types::Address,
    /// The creation transaction hash.
    pub transaction_hash: web3::types::H256,
    /// The number of the block including the transaction.
    pub block_number: u64,
    /// The chain head when the confirmations have been reached.
    pub confirmed_block_number: u64,
    /// The confirmations observed.
    pub confirmations: u64,
}

impl std::fmt::Display for DeploymentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:>16}: {}", "network", self.network)?;
        writeln!(f, "{:>16}: {}", "contract", self.contract_name)?;
        writeln!(f, "{:>16}: 0x{}", "address", hex::encode(self.address.as_bytes()))?;
        writeln!(
            f,
            "{:>16}: 0x{}",
            "transaction",
            hex::encode(self.transaction_hash.as_bytes())
        )?;
        writeln!(f, "{:>16}: {}", "block", self.block_number)?;
        write!(
            f,
            "{:>16}: {} at block {}",
            "confirmations", self.confirmations, self.confirmed_block_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DeploymentRecord;

    fn record() -> DeploymentRecord {
        DeploymentRecord {
            network: "goerli".to_owned(),
            contract_name: "Agrop".to_owned(),
            address: web3::types::Address::from([0xaa; 20]),
            transaction_hash: web3::types::H256::from([0xbb; 32]),
            block_number: 102,
            confirmed_block_number: 103,
            confirmations: 1,
        }
    }

    #[test]
    fn serialize() {
        let json = serde_json::to_value(record()).expect("Always valid");

        assert_eq!(json["contractName"], "Agrop");
        assert_eq!(json["address"], format!("0x{}", "aa".repeat(20)));
        assert_eq!(json["blockNumber"], 102);
        assert_eq!(json["confirmedBlockNumber"], 103);
    }

    #[test]
    fn display() {
        let display = record().to_string();

        assert!(display.contains(&format!("address: 0x{}", "aa".repeat(20))));
        assert!(display.ends_with("confirmations: 1 at block 103"));
    }
}
