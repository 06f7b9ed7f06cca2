//!
//! The deployment environment configuration.
//!

use std::collections::BTreeMap;

use crate::error::Error;
use crate::network::connection_strategy::ConnectionStrategy;
use crate::network::NetworkProfile;
use crate::provider::direct::DirectProvider;
use crate::provider::signer::SignerProvider;
use crate::provider::Provider;

/// The remote JSON-RPC endpoint URL variable.
pub const VARIABLE_ENDPOINT_URL: &str = "INFURA_API_URL";

/// The signing mnemonic variable.
pub const VARIABLE_MNEMONIC: &str = "MNEMONIC";

/// The block explorer API key variable.
pub const VARIABLE_EXPLORER_API_KEY: &str = "ETHERSCAN_API_KEY";

///
/// The deployment environment configuration.
///
/// Read once at load time and never mutated afterwards. Missing values are not
/// an error until a selected profile needs them.
///
#[derive(Clone, Default)]
pub struct Configuration {
    /// The known variables that are set and non-empty.
    variables: BTreeMap<&'static str, String>,
}

impl Configuration {
    /// The variables the deployer reads.
    pub const VARIABLES: [&'static str; 3] = [
        VARIABLE_ENDPOINT_URL,
        VARIABLE_MNEMONIC,
        VARIABLE_EXPLORER_API_KEY,
    ];

    ///
    /// Loads the configuration from the process environment and the `.env` file.
    ///
    pub fn load() -> Self {
        let _ = dotenv::dotenv();
        Self::from_source(std::env::vars())
    }

    ///
    /// Loads the configuration from the specified name-value pairs.
    ///
    pub fn from_source<I, K, V>(source: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut variables = BTreeMap::new();
        for (name, value) in source.into_iter() {
            let Some(name) = Self::VARIABLES
                .into_iter()
                .find(|variable| *variable == name.as_ref())
            else {
                continue;
            };
            let value = value.into();
            if value.trim().is_empty() {
                continue;
            }
            variables.insert(name, value);
        }
        Self { variables }
    }

    ///
    /// Returns the variable value, if set.
    ///
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    ///
    /// Returns the variable value required by the network profile.
    ///
    pub fn require(&self, name: &str, profile: &NetworkProfile) -> Result<&str, Error> {
        self.get(name).ok_or_else(|| {
            Error::config(
                profile.name,
                format!("environment variable `{name}` is not set"),
            )
        })
    }

    ///
    /// Creates the provider described by the profile connection strategy.
    ///
    /// Every variable the strategy needs is resolved before any transport is created.
    ///
    pub fn connect(&self, profile: &NetworkProfile) -> Result<Box<dyn Provider>, Error> {
        for variable in profile.connection.required_variables() {
            self.require(variable, profile)?;
        }

        match profile.connection {
            ConnectionStrategy::Direct { host, port } => Ok(Box::new(DirectProvider::new(
                format!("http://{host}:{port}").as_str(),
                profile.network_check_timeout(),
            )?)),
            ConnectionStrategy::Provider {
                mnemonic_variable,
                endpoint_variable,
            } => {
                let mnemonic = self.require(mnemonic_variable, profile)?;
                let endpoint = self.require(endpoint_variable, profile)?;
                let provider = SignerProvider::new(
                    endpoint,
                    mnemonic,
                    profile.chain_id,
                    profile.network_check_timeout(),
                )
                .map_err(|error| Error::config(profile.name, error.to_string()))?;
                Ok(Box::new(provider))
            }
        }
    }

    ///
    /// Returns the block explorer API key, required only for verification.
    ///
    pub fn explorer_api_key(&self, profile: &NetworkProfile) -> Result<&str, Error> {
        self.require(VARIABLE_EXPLORER_API_KEY, profile)
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("variables", &self.variables.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::network::NetworkProfile;
    use crate::network::NETWORK_PROFILES;

    use super::Configuration;

    const MNEMONIC: &str =
        "test test test test test test test test test test test junk";

    fn goerli() -> &'static NetworkProfile {
        NetworkProfile::select("goerli", &NETWORK_PROFILES).expect("Always valid")
    }

    fn development() -> &'static NetworkProfile {
        NetworkProfile::select("development", &NETWORK_PROFILES).expect("Always valid")
    }

    #[test]
    fn load_ignores_unknown_and_empty() {
        let configuration = Configuration::from_source([
            ("PATH", "/usr/bin"),
            ("MNEMONIC", "  "),
            ("INFURA_API_URL", "https://goerli.example.org/v3/key"),
        ]);

        assert_eq!(configuration.get("PATH"), None);
        assert_eq!(configuration.get("MNEMONIC"), None);
        assert_eq!(
            configuration.get("INFURA_API_URL"),
            Some("https://goerli.example.org/v3/key")
        );
    }

    #[test]
    fn load_never_fails_on_missing() {
        let configuration = Configuration::from_source(Vec::<(String, String)>::new());

        assert!(configuration.connect(development()).is_ok());
    }

    #[test]
    fn connect_goerli() {
        let configuration = Configuration::from_source([
            ("MNEMONIC", MNEMONIC),
            ("INFURA_API_URL", "https://goerli.example.org/v3/key"),
        ]);

        assert!(configuration.connect(goerli()).is_ok());
    }

    #[test]
    fn error_goerli_without_mnemonic() {
        let configuration =
            Configuration::from_source([("INFURA_API_URL", "http://127.0.0.1:1")]);

        let result = configuration.connect(goerli());

        assert!(matches!(
            result,
            Err(Error::Config { ref network, ref reason })
                if network == "goerli" && reason.contains("MNEMONIC")
        ));
    }

    #[test]
    fn error_goerli_without_endpoint() {
        let configuration = Configuration::from_source([("MNEMONIC", MNEMONIC)]);

        let result = configuration.connect(goerli());

        assert!(matches!(
            result,
            Err(Error::Config { ref reason, .. }) if reason.contains("INFURA_API_URL")
        ));
    }

    #[test]
    fn error_goerli_invalid_mnemonic() {
        let configuration = Configuration::from_source([
            ("MNEMONIC", "definitely not a seed phrase"),
            ("INFURA_API_URL", "https://goerli.example.org/v3/key"),
        ]);

        assert!(matches!(
            configuration.connect(goerli()),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn explorer_api_key_is_lazy() {
        let configuration = Configuration::from_source([("MNEMONIC", MNEMONIC)]);
        assert!(matches!(
            configuration.explorer_api_key(goerli()),
            Err(Error::Config { ref reason, .. }) if reason.contains("ETHERSCAN_API_KEY")
        ));

        let configuration = Configuration::from_source([("ETHERSCAN_API_KEY", "KEY")]);
        assert_eq!(
            configuration
                .explorer_api_key(goerli())
                .expect("Always valid"),
            "KEY"
        );
    }

    #[test]
    fn debug_hides_values() {
        let configuration = Configuration::from_source([("MNEMONIC", MNEMONIC)]);

        let debug = format!("{configuration:?}");
        assert!(debug.contains("MNEMONIC"));
        assert!(!debug.contains("junk"));
    }
}
