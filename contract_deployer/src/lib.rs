//!
//! The contract deployer library.
//!

pub mod artifact;
pub mod compiler;
pub mod constructor_arguments;
pub mod environment;
pub mod error;
pub mod network;
pub mod orchestrator;
pub mod provider;
pub mod verifier;

pub use self::artifact::Artifact;
pub use self::compiler::CompilerProfile;
pub use self::constructor_arguments::ConstructorArguments;
pub use self::environment::Configuration;
pub use self::error::Error;
pub use self::network::connection_strategy::ConnectionStrategy;
pub use self::network::NetworkProfile;
pub use self::network::NETWORK_PROFILES;
pub use self::orchestrator::record::DeploymentRecord;
pub use self::orchestrator::stage::Stage;
pub use self::orchestrator::Orchestrator;
pub use self::provider::direct::DirectProvider;
pub use self::provider::signer::SignerProvider;
pub use self::provider::DeploymentTransaction;
pub use self::provider::Provider;
pub use self::provider::Receipt;
pub use self::verifier::explorer::Etherscan;
pub use self::verifier::explorer::Explorer;
pub use self::verifier::Verifier;

/// The successful run exit code.
pub const EXIT_CODE_SUCCESS: i32 = 0;

/// The failed run exit code.
pub const EXIT_CODE_FAILURE: i32 = 1;

/// The name of the deployed contract.
pub const CONTRACT_NAME: &str = "Agrop";
