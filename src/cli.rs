// src/cli.rs
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::{DEFAULT_CONFIG_FILE, load_config};
use crate::core::execution::ProjectContext;
use crate::core::locator::{find_project_root, find_project_root_from_cwd};
use crate::core::models::{InvocationRequest, TestCategory};
use crate::infra::command::TokioProcessRunner;
use crate::infra::t;

pub mod commands {
    pub mod detect;
    pub mod run;
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

fn build_cli(locale: &str) -> Command {
    Command::new("test-dispatch")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help(t!("arg_category", locale = locale).to_string())
                .value_name("CATEGORY")
                .value_parser(clap::value_parser!(TestCategory))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .help(t!("arg_pattern", locale = locale).to_string())
                .value_name("PATTERN")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("watch")
                .long("watch")
                .help(t!("arg_watch", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("detect")
                .long("detect")
                .help(t!("arg_detect", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .help(t!("arg_project_dir", locale = locale).to_string())
                .value_name("PROJECT_DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale, default = DEFAULT_CONFIG_FILE).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help(t!("arg_dry_run", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("arg_verbose", locale = locale).to_string())
                .action(ArgAction::Count),
        )
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when the CLI is driven from tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn request_from_matches(matches: &ArgMatches) -> InvocationRequest {
    InvocationRequest {
        category: matches.get_one::<TestCategory>("category").copied(),
        pattern: matches.get_one::<String>("pattern").cloned(),
        watch: matches.get_flag("watch"),
    }
}

/// Parses the command line, runs the requested action and returns the
/// process exit code.
pub async fn run() -> Result<u8> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    let language = crate::set_language(
        explicit_language
            .clone()
            .unwrap_or_else(crate::system_language)
            .as_str(),
    );

    let matches = build_cli(&language).get_matches();
    init_tracing(matches.get_count("verbose"));

    let project_root = match matches.get_one::<PathBuf>("project-dir") {
        Some(dir) => find_project_root(dir),
        None => find_project_root_from_cwd(),
    };

    // Detection reads no configuration, so it cannot fail on a bad config file.
    if matches.get_flag("detect") {
        return Ok(commands::detect::execute(&project_root));
    }

    let config_path = match matches.get_one::<PathBuf>("config") {
        Some(path) => project_root.join(path),
        None => project_root.join(DEFAULT_CONFIG_FILE),
    };
    let config =
        load_config(&config_path).with_context(|| t!("config_load_failed").to_string())?;

    if let (None, Some(language)) = (&explicit_language, &config.language) {
        crate::set_language(language);
    }

    let context = ProjectContext::from_disk(&project_root);
    let request = request_from_matches(&matches);

    commands::run::execute(
        &TokioProcessRunner,
        &context,
        &request,
        &config.dispatcher(),
        matches.get_flag("dry-run"),
    )
    .await
}
