mod cli;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::Args;
use conda_tree::adapters::outbound::console::StderrProgressReporter;
use conda_tree::adapters::outbound::filesystem::{CondaMetaReader, PrefixWalker};
use conda_tree::adapters::outbound::process::CondaInfoResolver;
use conda_tree::application::dto::{InspectRequest, PrefixSelector};
use conda_tree::application::factories::{PresenterFactory, PresenterType};
use conda_tree::application::use_cases::{InspectEnvironmentUseCase, ResolvePrefixUseCase};
use conda_tree::config::{discover_config, load_config_from_path, Settings};
use conda_tree::shared::error::ExitCode;
use conda_tree::shared::Result;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::{env, process};
use tracing_subscriber::EnvFilter;

const REDUNDANCY_HINT: &str = "For the sake of clarity, some redundancies have been hidden.\n\
                               Please use the '--full' option to display them anyway.";

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version are not failures
            let code = if e.use_stderr() {
                ExitCode::Failure
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::Failure.as_i32());
        }
    }
}

/// Logs go to stderr; RUST_LOG overrides the level chosen by --verbose.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "conda_tree=debug"
    } else {
        "conda_tree=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let Some(command) = args.command else {
        let _ = Args::command().write_help(&mut io::stderr());
        return Ok(ExitCode::Failure);
    };

    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => {
            let cwd = env::current_dir().context("Failed to determine the current directory")?;
            discover_config(&cwd)?
        }
    };

    let to_stdout = args.output.is_none();
    // Escapes only ever go to an interactive stdout
    let no_color = args.no_color
        || env::var_os("NO_COLOR").is_some()
        || !to_stdout
        || !io::stdout().is_terminal();
    let settings = Settings::merge(config, args.exclude, no_color);

    // Create adapters (Dependency Injection)
    let resolve_prefix = ResolvePrefixUseCase::new(CondaInfoResolver::from_env());
    let prefix = resolve_prefix.execute(PrefixSelector {
        prefix: args.prefix,
        name: args.name,
        conda_prefix_env: env::var_os("CONDA_PREFIX").map(PathBuf::from),
    })?;
    tracing::debug!(prefix = %prefix.display(), "inspecting environment");

    let use_case = InspectEnvironmentUseCase::new(
        CondaMetaReader::new(),
        PrefixWalker::new(),
        StderrProgressReporter::new(),
    );

    let request = InspectRequest::builder()
        .prefix(prefix)
        .query(command.into_query())
        .exclude_patterns(settings.exclude_patterns)
        .collapse_packages(settings.collapse_packages)
        .skip_dirs(settings.skip_dirs)
        .strict_acyclic(settings.strict_acyclic)
        .color(settings.color)
        .build()?;

    let response = use_case.execute(request)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(args.output));
    presenter.present(&response.content)?;

    if response.redundancy_hidden {
        let hint = if settings.color {
            REDUNDANCY_HINT.dimmed().to_string()
        } else {
            REDUNDANCY_HINT.to_string()
        };
        if to_stdout {
            println!("\n{}", hint);
        } else {
            eprintln!("\n{}", hint);
        }
    }

    Ok(ExitCode::Success)
}
