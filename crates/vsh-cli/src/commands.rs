//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vsh_suite::DEFAULT_AUTH_FILE;

/// vsh: end-to-end checks for the Virtual Stain Hub web app
#[derive(Parser, Debug)]
#[command(name = "vsh")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit log events as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the suites against the configured app
    Test(TestArgs),

    /// Sign in once and save the session for later runs
    Auth(AuthArgs),

    /// List suites and tests without starting a browser
    List(ListArgs),
}

/// Arguments for the test command
#[derive(Parser, Debug, Default)]
pub struct TestArgs {
    /// Only run tests whose title or tag contains this text
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Number of tests to run at once
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// YAML configuration file
    #[arg(short, long, env = "VSH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for results.json and screenshots
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Saved session to start every test from
    #[arg(long)]
    pub storage_state: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the auth command
#[derive(Parser, Debug)]
pub struct AuthArgs {
    /// YAML configuration file
    #[arg(short, long, env = "VSH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Where to write the storage state
    #[arg(long, default_value = DEFAULT_AUTH_FILE)]
    pub out: PathBuf,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// Only list tests whose title or tag contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_cli_definition_is_valid() {
            use clap::CommandFactory;
            Cli::command().debug_assert();
        }

        #[test]
        fn test_parse_test_args() {
            let cli = Cli::try_parse_from([
                "vsh", "test", "--filter", "smoke", "-j", "3", "--headed", "--json",
            ])
            .unwrap();
            match cli.command {
                Commands::Test(args) => {
                    assert_eq!(args.filter.as_deref(), Some("smoke"));
                    assert_eq!(args.workers, Some(3));
                    assert!(args.headed);
                    assert!(args.json);
                    assert!(args.storage_state.is_none());
                }
                other => panic!("unexpected command {other:?}"),
            }
        }

        #[test]
        fn test_auth_defaults_to_auth_json() {
            let cli = Cli::try_parse_from(["vsh", "auth"]).unwrap();
            match cli.command {
                Commands::Auth(args) => assert_eq!(args.out, PathBuf::from("auth.json")),
                other => panic!("unexpected command {other:?}"),
            }
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::try_parse_from(["vsh", "list", "-vv", "--color", "never"]).unwrap();
            assert_eq!(cli.verbose, 2);
            assert_eq!(cli.color, ColorArg::Never);
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["vsh"]).is_err());
        }
    }
}
