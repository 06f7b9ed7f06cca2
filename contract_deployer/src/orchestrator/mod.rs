//!
//! The deployment orchestrator.
//!

pub mod record;
pub mod stage;

use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use crate::artifact::Artifact;
use crate::compiler::CompilerProfile;
use crate::constructor_arguments::ConstructorArguments;
use crate::environment::Configuration;
use crate::error::Error;
use crate::network::NetworkProfile;
use crate::provider::DeploymentTransaction;
use crate::provider::Provider;

use self::record::DeploymentRecord;
use self::stage::Stage;

///
/// The deployment orchestrator.
///
/// Drives a single one-shot run: configure, select the network, submit the
/// contract creation and wait for its confirmations. Nothing is retried, and a
/// broadcast transaction cannot be recalled, so a failed run needs a fresh one.
///
#[derive(Debug)]
pub struct Orchestrator {
    /// The current run stage.
    stage: Stage,
    /// The delay between two confirmation polls.
    poll_interval: Duration,
    /// The wall-clock limit of the confirmation wait. Derived from the profile if unset.
    confirmation_timeout: Option<Duration>,
    /// Whether to print the progress details.
    verbose: bool,
    /// Whether the output is suppressed.
    quiet: bool,
}

impl Orchestrator {
    /// The default delay between two confirmation polls.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

    ///
    /// A shortcut constructor.
    ///
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stage: Stage::Unconfigured,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            confirmation_timeout: None,
            verbose,
            quiet,
        }
    }

    ///
    /// Sets the delay between two confirmation polls.
    ///
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    ///
    /// Sets the wall-clock limit of the confirmation wait.
    ///
    pub fn with_confirmation_timeout(mut self, confirmation_timeout: Duration) -> Self {
        self.confirmation_timeout = Some(confirmation_timeout);
        self
    }

    ///
    /// Returns the current run stage.
    ///
    pub fn stage(&self) -> Stage {
        self.stage
    }

    ///
    /// Loads the configuration from the specified name-value pairs.
    ///
    pub fn configure<I, K, V>(&mut self, source: I) -> Configuration
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let configuration = Configuration::from_source(source);
        self.advance(Stage::Configured);
        configuration
    }

    ///
    /// Loads the configuration from the process environment.
    ///
    pub fn configure_from_env(&mut self) -> Configuration {
        let configuration = Configuration::load();
        self.advance(Stage::Configured);
        configuration
    }

    ///
    /// Selects the network profile by its exact name.
    ///
    pub fn select_network<'a>(
        &mut self,
        name: &str,
        profiles: &'a [NetworkProfile],
    ) -> Result<&'a NetworkProfile, Error> {
        let profile = self.track(NetworkProfile::select(name, profiles))?;
        self.advance(Stage::NetworkSelected);
        self.status("Selected", format!("network {profile}"));
        Ok(profile)
    }

    ///
    /// Creates the provider of the selected network.
    ///
    /// Fails before any network request if the configuration lacks a required value.
    ///
    pub fn connect(
        &mut self,
        configuration: &Configuration,
        profile: &NetworkProfile,
    ) -> Result<Box<dyn Provider>, Error> {
        self.track(configuration.connect(profile))
    }

    ///
    /// Reads the compiled contract artifact.
    ///
    pub fn load_artifact(&mut self, path: &Path) -> Result<Artifact, Error> {
        self.track(Artifact::from_file(path))
    }

    ///
    /// Moves the run to `Failed` if the preparation step has failed.
    ///
    pub fn track<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if result.is_err() && self.stage.can_advance_to(Stage::Failed) {
            self.advance(Stage::Failed);
        }
        result
    }

    ///
    /// Deploys the contract and waits for the profile confirmations.
    ///
    pub async fn deploy<P>(
        &mut self,
        provider: &P,
        profile: &NetworkProfile,
        compiler: &CompilerProfile,
        artifact: &Artifact,
        arguments: &ConstructorArguments,
    ) -> Result<DeploymentRecord, Error>
    where
        P: Provider + ?Sized,
    {
        let result = self
            .deploy_inner(provider, profile, compiler, artifact, arguments)
            .await;
        let record = self.track(result)?;
        self.advance(Stage::Confirmed);
        Ok(record)
    }

    ///
    /// The deployment pipeline without the failure bookkeeping.
    ///
    async fn deploy_inner<P>(
        &mut self,
        provider: &P,
        profile: &NetworkProfile,
        compiler: &CompilerProfile,
        artifact: &Artifact,
        arguments: &ConstructorArguments,
    ) -> Result<DeploymentRecord, Error>
    where
        P: Provider + ?Sized,
    {
        compiler.check_artifact(artifact)?;
        if artifact.exceeds_size_limit() {
            self.warning(format!(
                "contract `{}` runtime code is {} bytes, above the {} bytes limit",
                artifact.contract_name,
                artifact.deployed_size(),
                Artifact::CONTRACT_SIZE_LIMIT
            ));
        } else if self.verbose {
            self.status(
                "Size",
                format!(
                    "contract `{}` runtime code is {} bytes",
                    artifact.contract_name,
                    artifact.deployed_size()
                ),
            );
        }

        let tokens = arguments.tokens()?;
        let data = artifact.encode_deployment(tokens.as_slice())?;
        if self.verbose {
            self.status("Arguments", arguments.to_string());
        }

        if let Some(expected) = profile.chain_id {
            let actual = provider.chain_id().await?;
            if actual != expected {
                return Err(Error::connection(format!(
                    "network `{}` expects chain {expected}, the endpoint reports chain {actual}",
                    profile.name
                )));
            }
        }

        let start_block = provider.block_number().await?;
        let transaction = DeploymentTransaction {
            data: data.into(),
            constructor_arguments: arguments.values(),
            gas_limit: profile.gas_limit,
        };
        self.status(
            "Deploying",
            format!("`{}` with {compiler}", artifact.contract_name),
        );
        let transaction_hash = provider.submit(&transaction).await?;
        self.advance(Stage::Submitted);
        self.status(
            "Submitted",
            format!("transaction 0x{}", hex::encode(transaction_hash.as_bytes())),
        );

        self.wait_for_confirmations(provider, profile, artifact, transaction_hash, start_block)
            .await
    }

    ///
    /// Polls the network until the transaction has enough confirmations or the window closes.
    ///
    /// The transaction cannot be recalled once broadcast, so an unreachable network only
    /// costs a poll. The wait ends on the block window or the wall-clock limit, whichever
    /// comes first.
    ///
    async fn wait_for_confirmations<P>(
        &self,
        provider: &P,
        profile: &NetworkProfile,
        artifact: &Artifact,
        transaction_hash: web3::types::H256,
        start_block: u64,
    ) -> Result<DeploymentRecord, Error>
    where
        P: Provider + ?Sized,
    {
        let required = profile.confirmations;
        let timeout_blocks = profile.timeout_blocks();
        let deadline = tokio::time::Instant::now().checked_add(
            self.confirmation_timeout
                .unwrap_or_else(|| profile.confirmation_timeout()),
        );
        let mut head = start_block;
        let mut observed = 0;

        loop {
            if let Some(latest) = self.missed_poll(provider.block_number().await)? {
                head = head.max(latest);

                if let Some(Some(receipt)) =
                    self.missed_poll(provider.receipt(transaction_hash).await)?
                {
                    if !receipt.succeeded {
                        return Err(Error::submission(format!(
                            "transaction {transaction_hash:?} reverted in block {}",
                            receipt.block_number
                        )));
                    }
                    let address = receipt.contract_address.ok_or_else(|| {
                        Error::submission(format!(
                            "transaction {transaction_hash:?} has not created a contract"
                        ))
                    })?;

                    let confirmations = head.saturating_sub(receipt.block_number);
                    if confirmations >= required {
                        return Ok(DeploymentRecord {
                            network: profile.name.to_owned(),
                            contract_name: artifact.contract_name.to_owned(),
                            address,
                            transaction_hash,
                            block_number: receipt.block_number,
                            confirmed_block_number: head.max(receipt.block_number),
                            confirmations,
                        });
                    }
                    if confirmations != observed && self.verbose {
                        self.status(
                            "Waiting",
                            format!("{confirmations} of {required} confirmations"),
                        );
                    }
                    observed = confirmations;
                }
            }

            if head.saturating_sub(start_block) >= timeout_blocks
                || deadline.is_some_and(|deadline| tokio::time::Instant::now() >= deadline)
            {
                return Err(Error::DeploymentTimeout {
                    transaction_hash,
                    confirmations: observed,
                    required,
                    blocks: timeout_blocks,
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    ///
    /// Turns a connection failure of a confirmation poll into a skipped poll.
    ///
    fn missed_poll<T>(&self, result: Result<T, Error>) -> Result<Option<T>, Error> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(Error::Connection { reason }) => {
                if self.verbose {
                    self.warning(format!("confirmation poll skipped: {reason}"));
                }
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    ///
    /// Moves the run to the next stage.
    ///
    fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_advance_to(next),
            "Invalid stage transition: {} -> {}",
            self.stage,
            next
        );
        self.stage = next;
    }

    ///
    /// Prints a progress line.
    ///
    fn status(&self, verb: &str, message: impl std::fmt::Display) {
        if self.quiet {
            return;
        }
        println!("{} {message}", format!("{verb:>12}").bright_green().bold());
    }

    ///
    /// Prints a warning line.
    ///
    fn warning(&self, message: impl std::fmt::Display) {
        if self.quiet {
            return;
        }
        println!("{} {message}", format!("{:>12}", "Warning").bright_yellow().bold());
    }
}
