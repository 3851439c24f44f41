//! vsh: end-to-end checks for the Virtual Stain Hub
//!
//! ## Usage
//!
//! ```bash
//! vsh list                          # Show suites and tests
//! vsh auth --out auth.json          # Sign in once, save the session
//! vsh test --filter smoke --headed  # Run matching tests
//! ```

use clap::Parser;
use std::future::Future;
use std::process::ExitCode;
use vsh_cli::{
    handlers, logging, Cli, CliConfig, CliError, CliResult, Commands, Verbosity, EXIT_SUCCESS,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init_tracing(&config);

    match run(&config, cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_log_json(cli.log_json)
}

fn run(config: &CliConfig, command: Commands) -> CliResult<()> {
    match command {
        Commands::List(args) => handlers::execute_list(&args),
        Commands::Test(args) => block_on(handlers::execute_test(config, &args))?,
        Commands::Auth(args) => block_on(handlers::execute_auth(config, &args))?.map(|_| ()),
    }
}

fn block_on<F: Future>(future: F) -> CliResult<F::Output> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(rt.block_on(future))
}
