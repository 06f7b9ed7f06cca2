//!
//! The block explorer API response.
//!

use serde::Deserialize;

///
/// The block explorer API response.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Response {
    /// `1` on success, `0` on failure.
    pub status: String,
    /// The status message.
    pub message: String,
    /// The payload: a request GUID or a status description.
    pub result: String,
}

impl Response {
    /// The pending verification status.
    pub const RESULT_PENDING: &'static str = "Pending in queue";

    /// The already verified contract status.
    pub const RESULT_ALREADY_VERIFIED: &'static str = "already verified";

    ///
    /// Whether the request has succeeded.
    ///
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    ///
    /// Whether the verification is still queued.
    ///
    pub fn is_pending(&self) -> bool {
        self.result == Self::RESULT_PENDING
    }

    ///
    /// Whether the contract has been verified before.
    ///
    pub fn is_already_verified(&self) -> bool {
        self.result
            .to_lowercase()
            .contains(Self::RESULT_ALREADY_VERIFIED)
    }
}
