//!
//! The contract deployer executable.
//!

pub(crate) mod arguments;

use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use self::arguments::Arguments;

///
/// The application entry point.
///
fn main() {
    let exit_code = match Arguments::try_parse()
        .map_err(|error| anyhow::anyhow!(error))
        .and_then(main_inner)
    {
        Ok(()) => contract_deployer::EXIT_CODE_SUCCESS,
        Err(error) => {
            eprintln!("{error:?}");
            contract_deployer::EXIT_CODE_FAILURE
        }
    };
    std::process::exit(exit_code);
}

///
/// The entry point wrapper used for proper error handling.
///
fn main_inner(arguments: Arguments) -> anyhow::Result<()> {
    let arguments = Arguments::validate(arguments)?;
    if !arguments.quiet {
        println!(
            "    {} {} v{}",
            "Starting".bright_green().bold(),
            env!("CARGO_PKG_DESCRIPTION"),
            env!("CARGO_PKG_VERSION"),
        );
    }

    let mut orchestrator =
        contract_deployer::Orchestrator::new(arguments.verbose, arguments.quiet);
    if let Some(poll_interval_ms) = arguments.poll_interval_ms {
        orchestrator = orchestrator.with_poll_interval(Duration::from_millis(poll_interval_ms));
    }
    if let Some(confirmation_timeout_secs) = arguments.confirmation_timeout_secs {
        orchestrator = orchestrator
            .with_confirmation_timeout(Duration::from_secs(confirmation_timeout_secs));
    }

    let configuration = orchestrator.configure_from_env();
    let profile = orchestrator.select_network(
        arguments.network.as_str(),
        &contract_deployer::NETWORK_PROFILES,
    )?;

    let compiler = contract_deployer::CompilerProfile::default();
    let constructor_arguments = contract_deployer::ConstructorArguments::default();
    let artifact_path = arguments.artifact.unwrap_or_else(|| {
        contract_deployer::Artifact::default_path(contract_deployer::CONTRACT_NAME)
    });
    let artifact = orchestrator.load_artifact(artifact_path.as_path())?;

    let verifier = if arguments.verify {
        let explorer = configuration.explorer_api_key(profile).and_then(|api_key| {
            contract_deployer::Etherscan::new(reqwest::blocking::Client::new(), profile, api_key)
        });
        let explorer = orchestrator.track(explorer)?;
        orchestrator.track(compiler.standard_json_input(&artifact))?;
        Some(contract_deployer::Verifier::new(
            Box::new(explorer),
            arguments.quiet,
        ))
    } else {
        None
    };

    let provider = orchestrator.connect(&configuration, profile)?;

    let run_time_start = Instant::now();
    let runtime = tokio::runtime::Runtime::new()?;
    let record = runtime.block_on(orchestrator.deploy(
        provider.as_ref(),
        profile,
        &compiler,
        &artifact,
        &constructor_arguments,
    ))?;
    drop(runtime);

    if !arguments.quiet {
        println!(
            "   {} `{}` at 0x{} in {}m{:02}s",
            "Confirmed".bright_green().bold(),
            record.contract_name,
            hex::encode(record.address.as_bytes()),
            run_time_start.elapsed().as_secs() / 60,
            run_time_start.elapsed().as_secs() % 60,
        );
        println!("{record}");
    }

    if let Some(verifier) = verifier {
        let result = verifier.verify(&record, &artifact, &compiler, &constructor_arguments)?;
        if !arguments.quiet {
            println!(
                "    {} `{}`: {result}",
                "Verified".bright_green().bold(),
                record.contract_name,
            );
        }
    }

    Ok(())
}
