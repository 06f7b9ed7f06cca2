//!
//! The network connection strategy.
//!

///
/// The network connection strategy.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStrategy {
    /// A local node reached directly, signing with its unlocked accounts.
    Direct {
        /// The node host.
        host: &'static str,
        /// The node JSON-RPC port.
        port: u16,
    },
    /// A remote endpoint, signing locally with a mnemonic-derived key.
    Provider {
        /// The environment variable holding the mnemonic.
        mnemonic_variable: &'static str,
        /// The environment variable holding the endpoint URL.
        endpoint_variable: &'static str,
    },
}

impl ConnectionStrategy {
    ///
    /// Returns the environment variables the strategy cannot work without.
    ///
    pub fn required_variables(&self) -> Vec<&'static str> {
        match *self {
            Self::Direct { .. } => vec![],
            Self::Provider {
                mnemonic_variable,
                endpoint_variable,
            } => vec![mnemonic_variable, endpoint_variable],
        }
    }
}

impl std::fmt::Display for ConnectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct { host, port } => write!(f, "http://{host}:{port}"),
            Self::Provider {
                endpoint_variable, ..
            } => write!(f, "${endpoint_variable}"),
        }
    }
}
