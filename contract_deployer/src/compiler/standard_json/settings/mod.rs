//!
//! The `solc --standard-json` input settings.
//!

pub mod optimizer;

use serde::Serialize;

use self::optimizer::Optimizer;

///
/// The `solc --standard-json` input settings.
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Whether to compile via IR.
    #[serde(rename = "viaIR", skip_serializing_if = "Option::is_none")]
    pub via_ir: Option<bool>,
    /// The optimizer settings.
    pub optimizer: Optimizer,
}

impl Settings {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(via_ir: bool, optimizer: Optimizer) -> Self {
        Self {
            via_ir: if via_ir { Some(true) } else { None },
            optimizer,
        }
    }
}
