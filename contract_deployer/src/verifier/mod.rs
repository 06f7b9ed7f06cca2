//!
//! The block explorer source code verifier.
//!

pub mod explorer;
pub mod response;

use std::time::Duration;

use colored::Colorize;

use crate::artifact::Artifact;
use crate::compiler::CompilerProfile;
use crate::constructor_arguments::ConstructorArguments;
use crate::error::Error;
use crate::orchestrator::record::DeploymentRecord;

use self::explorer::Explorer;

///
/// The block explorer source code verifier.
///
/// Runs after the deployment has been confirmed.
///
#[derive(Debug)]
pub struct Verifier {
    /// The block explorer API.
    explorer: Box<dyn Explorer>,
    /// The number of verification status checks.
    status_attempts: usize,
    /// The delay between two verification status checks.
    status_interval: Duration,
    /// Whether the output is suppressed.
    quiet: bool,
}

impl Verifier {
    /// The default number of verification status checks.
    pub const DEFAULT_STATUS_ATTEMPTS: usize = 10;

    /// The default delay between two verification status checks.
    pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_secs(5);

    /// The source code format sent to the explorer.
    const CODE_FORMAT: &'static str = "solidity-standard-json-input";

    ///
    /// A shortcut constructor.
    ///
    pub fn new(explorer: Box<dyn Explorer>, quiet: bool) -> Self {
        Self {
            explorer,
            status_attempts: Self::DEFAULT_STATUS_ATTEMPTS,
            status_interval: Self::DEFAULT_STATUS_INTERVAL,
            quiet,
        }
    }

    ///
    /// Sets the verification status polling.
    ///
    pub fn with_status_polling(mut self, attempts: usize, interval: Duration) -> Self {
        self.status_attempts = attempts;
        self.status_interval = interval;
        self
    }

    ///
    /// Submits the source code and waits for the explorer to process it.
    ///
    pub fn verify(
        &self,
        record: &DeploymentRecord,
        artifact: &Artifact,
        compiler: &CompilerProfile,
        arguments: &ConstructorArguments,
    ) -> Result<String, Error> {
        let form = self.submission_form(record, artifact, compiler, arguments)?;
        let response = self.explorer.submit(form.as_slice())?;
        if response.is_already_verified() {
            return Ok(response.result);
        }
        if !response.is_ok() {
            return Err(Error::verification(format!(
                "{}: {}",
                response.message, response.result
            )));
        }

        let guid = response.result;
        if let Some(line) = self.progress_line(artifact.contract_name.as_str(), guid.as_str()) {
            println!("{line}");
        }
        for _ in 0..self.status_attempts {
            std::thread::sleep(self.status_interval);

            let response = self.explorer.status(guid.as_str())?;
            if response.is_pending() {
                continue;
            }
            if response.is_ok() || response.is_already_verified() {
                return Ok(response.result);
            }
            return Err(Error::verification(response.result));
        }

        Err(Error::verification(format!(
            "request {guid} is still pending after {} checks",
            self.status_attempts
        )))
    }

    ///
    /// Returns the progress line of the submitted verification, unless the output is suppressed.
    ///
    fn progress_line(&self, contract_name: &str, guid: &str) -> Option<String> {
        if self.quiet {
            return None;
        }
        Some(format!(
            "   {} `{contract_name}` source code, request {guid}",
            "Verifying".bright_green().bold(),
        ))
    }

    ///
    /// Returns the `verifysourcecode` request form, without the API key.
    ///
    pub fn submission_form(
        &self,
        record: &DeploymentRecord,
        artifact: &Artifact,
        compiler: &CompilerProfile,
        arguments: &ConstructorArguments,
    ) -> Result<Vec<(&'static str, String)>, Error> {
        let input = compiler.standard_json_input(artifact)?;
        let source_code = serde_json::to_string(&input)
            .map_err(|error| Error::verification(format!("source code: {error}")))?;
        let source_key = artifact
            .source_key()
            .ok_or_else(|| artifact.error("the source code path is not embedded"))?;
        let compiler_version = artifact.compiler.long_version().ok_or_else(|| {
            Error::verification(format!(
                "compiler version `{}` has no commit hash",
                artifact.compiler.version
            ))
        })?;
        let constructor_arguments = web3::ethabi::encode(arguments.tokens()?.as_slice());

        Ok(vec![
            ("module", "contract".to_owned()),
            ("action", "verifysourcecode".to_owned()),
            (
                "contractaddress",
                format!("0x{}", hex::encode(record.address.as_bytes())),
            ),
            ("sourceCode", source_code),
            ("codeformat", Self::CODE_FORMAT.to_owned()),
            (
                "contractname",
                format!("{source_key}:{}", artifact.contract_name),
            ),
            ("compilerversion", compiler_version),
            // The misspelling is part of the explorer API.
            ("constructorArguements", hex::encode(constructor_arguments)),
        ])
    }
}
