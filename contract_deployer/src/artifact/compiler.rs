//!
//! The artifact compiler description.
//!

use serde::Deserialize;

///
/// The artifact compiler description.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Compiler {
    /// The compiler name, e.g. `solc`.
    pub name: String,
    /// The full compiler version, e.g. `0.8.15+commit.e14f2714.Emscripten.clang`.
    pub version: String,
}

impl Compiler {
    ///
    /// Parses the semantic version, keeping the build metadata.
    ///
    pub fn semver(&self) -> Option<semver::Version> {
        semver::Version::parse(self.version.as_str()).ok()
    }

    ///
    /// Returns the long version the block explorers expect, e.g. `v0.8.15+commit.e14f2714`.
    ///
    pub fn long_version(&self) -> Option<String> {
        let version = self.semver()?;
        let mut build = version.build.as_str().split('.');
        match (build.next(), build.next()) {
            (Some("commit"), Some(hash)) => Some(format!(
                "v{}.{}.{}+commit.{hash}",
                version.major, version.minor, version.patch
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Compiler;

    #[test]
    fn long_version() {
        let compiler = Compiler {
            name: "solc".to_owned(),
            version: "0.8.15+commit.e14f2714.Emscripten.clang".to_owned(),
        };

        assert_eq!(
            compiler.long_version().as_deref(),
            Some("v0.8.15+commit.e14f2714")
        );
        assert_eq!(
            compiler.semver().map(|version| (version.major, version.minor, version.patch)),
            Some((0, 8, 15))
        );
    }

    #[test]
    fn long_version_without_commit() {
        let compiler = Compiler {
            name: "solc".to_owned(),
            version: "0.8.15".to_owned(),
        };

        assert_eq!(compiler.long_version(), None);
    }
}
