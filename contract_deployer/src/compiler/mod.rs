//!
//! The Solidity compiler profile.
//!

pub mod standard_json;

use crate::artifact::Artifact;
use crate::error::Error;

use self::standard_json::settings::optimizer::Optimizer;
use self::standard_json::settings::Settings;
use self::standard_json::Input;

///
/// The Solidity compiler profile.
///
/// Applies uniformly to every contract of the project. The compilation itself
/// is performed by the external build system.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerProfile {
    /// The `solc` version.
    pub version: semver::Version,
    /// Whether the optimizer is enabled.
    pub optimizer_enabled: bool,
    /// The optimizer expected number of contract runs.
    pub optimizer_runs: u32,
    /// Whether to compile via the Yul IR.
    pub via_ir: bool,
}

impl CompilerProfile {
    /// The compiler name expected in the build artifacts.
    pub const COMPILER_NAME: &'static str = "solc";

    ///
    /// Returns the `solc --standard-json` settings.
    ///
    pub fn standard_json_settings(&self) -> Settings {
        Settings::new(
            self.via_ir,
            Optimizer::new(self.optimizer_enabled, self.optimizer_runs),
        )
    }

    ///
    /// Returns the `solc --standard-json` input reproducing the artifact build.
    ///
    pub fn standard_json_input(&self, artifact: &Artifact) -> Result<Input, Error> {
        let sources = artifact.collect_sources()?;
        Ok(Input::from_sources(sources, self.standard_json_settings()))
    }

    ///
    /// Checks that the artifact has been built with this profile compiler.
    ///
    pub fn check_artifact(&self, artifact: &Artifact) -> Result<(), Error> {
        if artifact.compiler.name != Self::COMPILER_NAME {
            return Err(artifact.error(format!(
                "built with `{}`, expected `{}`",
                artifact.compiler.name,
                Self::COMPILER_NAME
            )));
        }

        let version = artifact.compiler.semver().ok_or_else(|| {
            artifact.error(format!(
                "invalid compiler version `{}`",
                artifact.compiler.version
            ))
        })?;
        if (version.major, version.minor, version.patch)
            != (self.version.major, self.version.minor, self.version.patch)
        {
            return Err(artifact.error(format!(
                "built with {} v{}.{}.{}, expected v{}",
                Self::COMPILER_NAME,
                version.major,
                version.minor,
                version.patch,
                self.version
            )));
        }

        Ok(())
    }
}

impl Default for CompilerProfile {
    fn default() -> Self {
        Self {
            version: semver::Version::new(0, 8, 15),
            optimizer_enabled: true,
            optimizer_runs: 100,
            via_ir: true,
        }
    }
}

impl std::fmt::Display for CompilerProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{}", Self::COMPILER_NAME, self.version)?;
        if self.optimizer_enabled {
            write!(f, ", optimizer {} runs", self.optimizer_runs)?;
        }
        if self.via_ir {
            write!(f, ", via IR")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::artifact::tests::artifact;
    use crate::artifact::Artifact;
    use crate::error::Error;

    use super::CompilerProfile;

    #[test]
    fn standard_json_settings() {
        let settings = CompilerProfile::default().standard_json_settings();

        assert_eq!(
            serde_json::to_value(settings).expect("Always valid"),
            serde_json::json!({
                "viaIR": true,
                "optimizer": {
                    "enabled": true,
                    "runs": 100
                }
            })
        );
    }

    #[test]
    fn standard_json_input() {
        let input = CompilerProfile::default()
            .standard_json_input(&artifact())
            .expect("Always valid");

        let input = serde_json::to_value(input).expect("Always valid");
        assert_eq!(input["language"], "Solidity");
        assert!(input["sources"]["contracts/Agrop.sol"]["content"]
            .as_str()
            .expect("Always valid")
            .contains("contract Agrop"));
        assert_eq!(input["settings"]["optimizer"]["runs"], 100);
    }

    #[test]
    fn display() {
        assert_eq!(
            CompilerProfile::default().to_string(),
            "solc v0.8.15, optimizer 100 runs, via IR"
        );
    }

    #[test]
    fn check_artifact() {
        assert!(CompilerProfile::default()
            .check_artifact(&artifact())
            .is_ok());
    }

    #[test]
    fn error_check_artifact_version() {
        let profile = CompilerProfile {
            version: semver::Version::new(0, 8, 19),
            ..CompilerProfile::default()
        };

        assert!(matches!(
            profile.check_artifact(&artifact()),
            Err(Error::Artifact { ref reason, .. }) if reason.contains("v0.8.19")
        ));
    }

    #[test]
    fn error_check_artifact_compiler() {
        let mut artifact: Artifact = artifact();
        artifact.compiler.name = "vyper".to_owned();

        assert!(CompilerProfile::default()
            .check_artifact(&artifact)
            .is_err());
    }

    #[test]
    fn error_standard_json_input_without_source() {
        let mut artifact = artifact();
        artifact.source = None;
        artifact.path = Path::new("Agrop.json").to_owned();

        assert!(CompilerProfile::default()
            .standard_json_input(&artifact)
            .is_err());
    }
}
