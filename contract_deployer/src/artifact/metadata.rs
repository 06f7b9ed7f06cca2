//!
//! The artifact compiler metadata.
//!

use std::collections::BTreeMap;

use serde::Deserialize;

///
/// The subset of the `solc` metadata embedded into the artifact as a JSON string.
///
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// The source code files the contract has been compiled from, keyed by path.
    #[serde(default)]
    pub sources: BTreeMap<String, serde_json::Value>,
}

impl Metadata {
    ///
    /// Returns the source code paths, including the imported ones.
    ///
    pub fn source_paths(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }
}

///
/// The subset of the artifact AST.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ast {
    /// The source path as seen by the compiler, e.g. `project:/contracts/Agrop.sol`.
    pub absolute_path: String,
}
