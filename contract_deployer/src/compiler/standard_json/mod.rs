//!
//! The `solc --standard-json` input.
//!

pub mod settings;
pub mod source;

use std::collections::BTreeMap;

use serde::Serialize;

use self::settings::Settings;
use self::source::Source;

///
/// The `solc --standard-json` input.
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The input language.
    pub language: String,
    /// The input source code files hashmap.
    pub sources: BTreeMap<String, Source>,
    /// The compiler settings.
    pub settings: Settings,
}

impl Input {
    /// The only supported input language.
    pub const LANGUAGE_SOLIDITY: &'static str = "Solidity";

    ///
    /// A shortcut constructor from source code.
    ///
    pub fn from_sources(sources: BTreeMap<String, String>, settings: Settings) -> Self {
        Self {
            language: Self::LANGUAGE_SOLIDITY.to_owned(),
            sources: sources
                .into_iter()
                .map(|(path, content)| (path, Source::from(content)))
                .collect(),
            settings,
        }
    }
}
