//!
//! The block explorer API client.
//!

use crate::error::Error;
use crate::network::NetworkProfile;

use super::response::Response;

///
/// The block explorer contract verification API.
///
pub trait Explorer: std::fmt::Debug {
    ///
    /// Submits the `verifysourcecode` request form.
    ///
    fn submit(&self, form: &[(&'static str, String)]) -> Result<Response, Error>;

    ///
    /// Requests the `checkverifystatus` of the submitted verification.
    ///
    fn status(&self, guid: &str) -> Result<Response, Error>;
}

///
/// The Etherscan-compatible API client.
///
/// Uses a blocking HTTP client, so it must not be called from within the async runtime.
///
#[derive(Debug)]
pub struct Etherscan {
    /// The `reqwest` HTTP client.
    http_client: reqwest::blocking::Client,
    /// The API URL.
    api_url: String,
    /// The API key.
    api_key: String,
}

impl Etherscan {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(
        http_client: reqwest::blocking::Client,
        profile: &NetworkProfile,
        api_key: &str,
    ) -> Result<Self, Error> {
        let api_url = profile.explorer_api_url.ok_or_else(|| {
            Error::verification(format!("network `{}` has no block explorer", profile.name))
        })?;

        Ok(Self {
            http_client,
            api_url: api_url.to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    ///
    /// Sends the request and parses the explorer response.
    ///
    fn request(&self, request: reqwest::blocking::RequestBuilder) -> Result<Response, Error> {
        request
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<Response>())
            .map_err(|error| Error::verification(format!("block explorer request: {error}")))
    }
}

impl Explorer for Etherscan {
    fn submit(&self, form: &[(&'static str, String)]) -> Result<Response, Error> {
        let mut form = form.to_vec();
        form.insert(0, ("apikey", self.api_key.to_owned()));
        self.request(self.http_client.post(self.api_url.as_str()).form(&form))
    }

    fn status(&self, guid: &str) -> Result<Response, Error> {
        self.request(self.http_client.get(self.api_url.as_str()).query(&[
            ("apikey", self.api_key.as_str()),
            ("module", "contract"),
            ("action", "checkverifystatus"),
            ("guid", guid),
        ]))
    }
}
