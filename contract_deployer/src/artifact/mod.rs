//!
//! The compiled contract artifact.
//!

pub mod compiler;
pub mod metadata;

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Error;

use self::compiler::Compiler;
use self::metadata::Ast;
use self::metadata::Metadata;

///
/// The compiled contract artifact, as written by the build system to
/// `build/contracts/<Name>.json`.
///
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// The contract name.
    pub contract_name: String,
    /// The contract ABI.
    pub abi: serde_json::Value,
    /// The creation bytecode hexadecimal string.
    pub bytecode: String,
    /// The runtime bytecode hexadecimal string.
    #[serde(default)]
    pub deployed_bytecode: String,
    /// The compiler that produced the artifact.
    pub compiler: Compiler,
    /// The source code file path.
    #[serde(default)]
    pub source_path: Option<String>,
    /// The source code.
    #[serde(default)]
    pub source: Option<String>,
    /// The `solc` metadata JSON string.
    #[serde(default)]
    pub metadata: Option<String>,
    /// The source unit AST.
    #[serde(default)]
    pub ast: Option<Ast>,
    /// The path the artifact has been read from.
    #[serde(skip)]
    pub path: PathBuf,
}

impl Artifact {
    /// The default build artifacts directory.
    pub const DEFAULT_DIRECTORY: &'static str = "./build/contracts/";

    /// The runtime code size limit introduced by EIP-170.
    pub const CONTRACT_SIZE_LIMIT: usize = 24_576;

    /// The unlinked library placeholder marker.
    const LIBRARY_PLACEHOLDER: &'static str = "__";

    ///
    /// Returns the default artifact path of the contract.
    ///
    pub fn default_path(contract_name: &str) -> PathBuf {
        PathBuf::from(Self::DEFAULT_DIRECTORY).join(format!("{contract_name}.json"))
    }

    ///
    /// Reads and validates the artifact file.
    ///
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let data = std::fs::read_to_string(path)
            .map_err(|error| Error::artifact(path, format!("reading: {error}")))?;
        Self::from_json(path, data.as_str())
    }

    ///
    /// Parses and validates the artifact JSON.
    ///
    pub fn from_json(path: &Path, data: &str) -> Result<Self, Error> {
        let mut artifact: Self = serde_json::from_str(data)
            .map_err(|error| Error::artifact(path, format!("parsing: {error}")))?;
        artifact.path = path.to_owned();
        artifact.validate()?;
        Ok(artifact)
    }

    ///
    /// Returns the creation bytecode.
    ///
    pub fn creation_code(&self) -> Result<Vec<u8>, Error> {
        hex::decode(Self::strip_prefix(self.bytecode.as_str()))
            .map_err(|error| self.error(format!("bytecode is not hexadecimal: {error}")))
    }

    ///
    /// Returns the runtime bytecode size in bytes.
    ///
    pub fn deployed_size(&self) -> usize {
        Self::strip_prefix(self.deployed_bytecode.as_str()).len() / 2
    }

    ///
    /// Whether the runtime bytecode is too large to be deployed on mainnet-like chains.
    ///
    pub fn exceeds_size_limit(&self) -> bool {
        self.deployed_size() > Self::CONTRACT_SIZE_LIMIT
    }

    ///
    /// Returns the creation bytecode with the ABI-encoded constructor arguments appended.
    ///
    pub fn encode_deployment(&self, tokens: &[web3::ethabi::Token]) -> Result<Vec<u8>, Error> {
        let code = self.creation_code()?;
        match self.abi_contract()?.constructor() {
            Some(constructor) => constructor
                .encode_input(code, tokens)
                .map_err(|error| self.error(format!("constructor arguments: {error}"))),
            None if tokens.is_empty() => Ok(code),
            None => Err(self.error(format!(
                "the contract has no constructor, but {} arguments are given",
                tokens.len()
            ))),
        }
    }

    ///
    /// Parses the ABI.
    ///
    pub fn abi_contract(&self) -> Result<web3::ethabi::Contract, Error> {
        serde_json::from_value(self.abi.clone())
            .map_err(|error| self.error(format!("ABI: {error}")))
    }

    ///
    /// Returns the source path as seen by the compiler.
    ///
    pub fn source_key(&self) -> Option<&str> {
        self.ast
            .as_ref()
            .map(|ast| ast.absolute_path.as_str())
            .or(self.source_path.as_deref())
    }

    ///
    /// Returns the paths of every source code file the contract has been compiled from.
    ///
    pub fn source_paths(&self) -> Result<Vec<String>, Error> {
        match self.metadata.as_deref().map(str::trim) {
            Some(metadata) if !metadata.is_empty() => {
                let metadata: Metadata = serde_json::from_str(metadata)
                    .map_err(|error| self.error(format!("metadata: {error}")))?;
                Ok(metadata.source_paths())
            }
            _ => self
                .source_key()
                .map(|key| vec![key.to_owned()])
                .ok_or_else(|| self.error("the source code path is not embedded")),
        }
    }

    ///
    /// Collects the source code of the contract and its imports.
    ///
    /// Imported files are taken from the other artifacts in the same build directory.
    ///
    pub fn collect_sources(&self) -> Result<BTreeMap<String, String>, Error> {
        let paths = self.source_paths()?;

        let mut known = BTreeMap::new();
        if let (Some(key), Some(source)) = (self.source_key(), self.source.as_ref()) {
            known.insert(key.to_owned(), source.to_owned());
        }
        if paths.iter().any(|path| !known.contains_key(path)) {
            self.collect_sibling_sources(&mut known)?;
        }

        paths
            .into_iter()
            .map(|path| match known.remove(path.as_str()) {
                Some(source) => Ok((path, source)),
                None => Err(self.error(format!(
                    "source `{path}` is not found among the build artifacts"
                ))),
            })
            .collect()
    }

    ///
    /// Creates an error bound to the artifact path.
    ///
    pub fn error(&self, reason: impl Into<String>) -> Error {
        Error::artifact(self.path.as_path(), reason)
    }

    ///
    /// Checks that the creation bytecode can be submitted as is.
    ///
    fn validate(&self) -> Result<(), Error> {
        let bytecode = Self::strip_prefix(self.bytecode.as_str());
        if bytecode.is_empty() {
            return Err(self.error(format!(
                "contract `{}` has no bytecode, it may be abstract or an interface",
                self.contract_name
            )));
        }
        if bytecode.contains(Self::LIBRARY_PLACEHOLDER) {
            return Err(self.error(format!(
                "contract `{}` has unlinked library references",
                self.contract_name
            )));
        }
        self.creation_code()?;
        self.abi_contract()?;
        Ok(())
    }

    ///
    /// Adds the sources embedded into the other artifacts of the build directory.
    ///
    /// Abstract contracts and interfaces are accepted, as they cannot be deployed but can
    /// be imported.
    ///
    fn collect_sibling_sources(&self, known: &mut BTreeMap<String, String>) -> Result<(), Error> {
        let directory = match self.path.parent() {
            Some(directory) if !directory.as_os_str().is_empty() => directory,
            _ => Path::new("."),
        };
        let entries = std::fs::read_dir(directory).map_err(|error| {
            self.error(format!("reading the build directory {directory:?}: {error}"))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|error| self.error(format!("reading the build directory: {error}")))?
                .path();
            if path.extension().and_then(|extension| extension.to_str()) != Some("json") {
                continue;
            }
            let Ok(data) = std::fs::read_to_string(path.as_path()) else {
                continue;
            };
            let Ok(artifact) = serde_json::from_str::<Self>(data.as_str()) else {
                continue;
            };
            if let (Some(key), Some(source)) = (artifact.source_key(), artifact.source.as_ref()) {
                known
                    .entry(key.to_owned())
                    .or_insert_with(|| source.to_owned());
            }
        }
        Ok(())
    }

    ///
    /// Removes the `0x` prefix, if present.
    ///
    fn strip_prefix(hex: &str) -> &str {
        hex.strip_prefix("0x").unwrap_or(hex)
    }
}
