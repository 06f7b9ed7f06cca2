//!
//! The network profiles.
//!

pub mod connection_strategy;

use std::time::Duration;

use crate::environment;
use crate::error::Error;

use self::connection_strategy::ConnectionStrategy;

///
/// The bundled network profiles.
///
pub static NETWORK_PROFILES: [NetworkProfile; 2] = [
    NetworkProfile {
        name: NetworkProfile::DEFAULT_NAME,
        chain_id: None,
        connection: ConnectionStrategy::Direct {
            host: "127.0.0.1",
            port: 7545,
        },
        confirmations: 0,
        gas_limit: None,
        timeout_blocks: None,
        network_check_timeout: None,
        explorer_api_url: None,
    },
    NetworkProfile {
        name: "goerli",
        chain_id: Some(5),
        connection: ConnectionStrategy::Provider {
            mnemonic_variable: environment::VARIABLE_MNEMONIC,
            endpoint_variable: environment::VARIABLE_ENDPOINT_URL,
        },
        confirmations: 1,
        gas_limit: Some(5_500_000),
        timeout_blocks: Some(150),
        network_check_timeout: Some(Duration::from_millis(10_000)),
        explorer_api_url: Some("https://api-goerli.etherscan.io/api"),
    },
];

///
/// The network profile.
///
/// Immutable once loaded. Exactly one profile is selected per run.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    /// The profile name used for selection.
    pub name: &'static str,
    /// The chain id the network must report, if pinned.
    pub chain_id: Option<u64>,
    /// The way to reach and sign for the network.
    pub connection: ConnectionStrategy,
    /// The confirmations to wait for after inclusion.
    pub confirmations: u64,
    /// The gas limit of the creation transaction. Estimated if unset.
    pub gas_limit: Option<u64>,
    /// The number of blocks to wait for the confirmations.
    pub timeout_blocks: Option<u64>,
    /// The wall-clock limit of a single network request.
    pub network_check_timeout: Option<Duration>,
    /// The block explorer API used for verification.
    pub explorer_api_url: Option<&'static str>,
}

impl NetworkProfile {
    /// The profile used when no network is specified.
    pub const DEFAULT_NAME: &'static str = "development";

    /// The confirmation window applied when the profile leaves it unset.
    pub const DEFAULT_TIMEOUT_BLOCKS: u64 = 50;

    /// The network request limit applied when the profile leaves it unset.
    pub const DEFAULT_NETWORK_CHECK_TIMEOUT: Duration = Duration::from_millis(5_000);

    /// The block time the confirmation wall-clock limit is derived from.
    pub const EXPECTED_BLOCK_TIME: Duration = Duration::from_secs(15);

    ///
    /// Selects the profile with exactly the specified name.
    ///
    pub fn select<'a>(name: &str, profiles: &'a [NetworkProfile]) -> Result<&'a Self, Error> {
        profiles
            .iter()
            .find(|profile| profile.name == name)
            .ok_or_else(|| Error::UnknownNetwork {
                name: name.to_owned(),
                known: profiles
                    .iter()
                    .map(|profile| profile.name.to_owned())
                    .collect(),
            })
    }

    ///
    /// Returns the effective confirmation window in blocks.
    ///
    pub fn timeout_blocks(&self) -> u64 {
        self.timeout_blocks.unwrap_or(Self::DEFAULT_TIMEOUT_BLOCKS)
    }

    ///
    /// Returns the effective network request limit.
    ///
    pub fn network_check_timeout(&self) -> Duration {
        self.network_check_timeout.unwrap_or(Self::DEFAULT_NETWORK_CHECK_TIMEOUT)
    }

    ///
    /// Returns the wall-clock limit of the confirmation wait.
    ///
    /// Bounds the wait on chains that stop producing blocks, e.g. an idle automining node.
    ///
    pub fn confirmation_timeout(&self) -> Duration {
        let blocks = u32::try_from(self.timeout_blocks()).unwrap_or(u32::MAX);
        Self::EXPECTED_BLOCK_TIME.saturating_mul(blocks)
    }
}

impl std::fmt::Display for NetworkProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}", self.name, self.connection)?;
        match self.chain_id {
            Some(chain_id) => write!(f, ", chain {chain_id})"),
            None => write!(f, ", any chain)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::error::Error;

    use super::NetworkProfile;
    use super::NETWORK_PROFILES;

    #[test]
    fn select_every_known_profile() {
        for profile in NETWORK_PROFILES.iter() {
            let selected = NetworkProfile::select(profile.name, &NETWORK_PROFILES)
                .expect("Known profile must be selected");
            assert_eq!(selected, profile);
        }
    }

    #[test]
    fn select_goerli() {
        let profile =
            NetworkProfile::select("goerli", &NETWORK_PROFILES).expect("Always valid");

        assert_eq!(profile.chain_id, Some(5));
        assert_eq!(profile.confirmations, 1);
        assert_eq!(profile.gas_limit, Some(5_500_000));
        assert_eq!(profile.timeout_blocks(), 150);
        assert_eq!(profile.network_check_timeout(), Duration::from_millis(10_000));
        assert_eq!(profile.confirmation_timeout(), Duration::from_secs(150 * 15));
    }

    #[test]
    fn select_development_defaults() {
        let profile = NetworkProfile::select(NetworkProfile::DEFAULT_NAME, &NETWORK_PROFILES)
            .expect("Always valid");

        assert_eq!(profile.confirmations, 0);
        assert_eq!(profile.gas_limit, None);
        assert_eq!(profile.timeout_blocks(), NetworkProfile::DEFAULT_TIMEOUT_BLOCKS);
        assert_eq!(profile.confirmation_timeout(), Duration::from_secs(50 * 15));
        assert_eq!(profile.to_string(), "development (http://127.0.0.1:7545, any chain)");
    }

    #[test]
    fn error_unknown() {
        let result = NetworkProfile::select("unknown", &NETWORK_PROFILES);

        assert!(matches!(
            result,
            Err(Error::UnknownNetwork { ref name, ref known })
                if name == "unknown" && known == &["development", "goerli"]
        ));
    }

    #[test]
    fn error_no_fuzzy_matching() {
        for name in ["Goerli", "goerli ", "dev", ""] {
            assert!(NetworkProfile::select(name, &NETWORK_PROFILES).is_err());
        }
    }
}
