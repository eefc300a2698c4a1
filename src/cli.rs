//! Command-line interface definition for tripwise.
//!
//! This module defines the CLI structure using clap derive macros,
//! including all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::client::DEFAULT_TOP_K;
use crate::config::LogLevel;

/// tripwise - travel recommendations from the command line
///
/// Talks to the tripwise backend with the bearer token saved by
/// `tripwise login`.
#[derive(Debug, Parser)]
#[command(name = "tripwise")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "TRIPWISE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backend origin, overrides api.base_url
    #[arg(long, global = true, env = "TRIPWISE_API_URL")]
    pub base_url: Option<String>,

    /// Increase verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error), overrides logging.level
    #[arg(long = "log-level", global = true, env = "TRIPWISE_LOG_LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level requested on the command line, if any.
    /// `-q` and `-v` win over `--log-level`.
    pub fn requested_log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Error);
        }

        match self.verbose {
            0 => self.log_level,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask the travel assistant a question
    Ask(AskArgs),

    /// Show the logged-in user
    Whoami,

    /// Show personalized recommendations
    Recommend(RecommendArgs),

    /// Show your past searches
    History,

    /// Save a bearer token for later requests
    Login(LoginArgs),

    /// Forget the saved bearer token
    Logout,

    /// Configuration file operations
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for the `ask` subcommand.
#[derive(Debug, Args)]
pub struct AskArgs {
    /// Free-text prompt, e.g. "5 days in Japan"
    #[arg(required = true, num_args = 1..)]
    pub prompt: Vec<String>,
}

impl AskArgs {
    /// Joins the prompt words into a single string.
    pub fn prompt(&self) -> String {
        self.prompt.join(" ")
    }
}

/// Arguments for the `recommend` subcommand.
#[derive(Debug, Args)]
pub struct RecommendArgs {
    /// Maximum number of recommendations
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K, allow_negative_numbers = true)]
    pub top_k: i64,
}

/// Arguments for the `login` subcommand.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Bearer token issued by the tripwise login flow
    #[arg(long, env = "TRIPWISE_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Validate the configuration file
    Validate,

    /// Show the current configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_command() {
        let cli = Cli::parse_from(["tripwise", "ask", "trip", "to", "Rome"]);

        match cli.command {
            Commands::Ask(args) => assert_eq!(args.prompt(), "trip to Rome"),
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_ask_requires_prompt() {
        assert!(Cli::try_parse_from(["tripwise", "ask"]).is_err());
    }

    #[test]
    fn test_recommend_default_top_k() {
        let cli = Cli::parse_from(["tripwise", "recommend"]);

        match cli.command {
            Commands::Recommend(args) => assert_eq!(args.top_k, 10),
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_recommend_negative_top_k() {
        let cli = Cli::parse_from(["tripwise", "recommend", "--top-k", "-2"]);

        match cli.command {
            Commands::Recommend(args) => assert_eq!(args.top_k, -2),
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_login_command() {
        let cli = Cli::parse_from(["tripwise", "login", "--token", "abc"]);

        match cli.command {
            Commands::Login(args) => assert_eq!(args.token, "abc"),
            _ => panic!("Expected Login command"),
        }
    }

    #[test]
    fn test_simple_commands() {
        assert!(matches!(
            Cli::parse_from(["tripwise", "whoami"]).command,
            Commands::Whoami
        ));
        assert!(matches!(
            Cli::parse_from(["tripwise", "history"]).command,
            Commands::History
        ));
        assert!(matches!(
            Cli::parse_from(["tripwise", "logout"]).command,
            Commands::Logout
        ));
        assert!(matches!(
            Cli::parse_from(["tripwise", "config", "validate"]).command,
            Commands::Config(ConfigCommands::Validate)
        ));
        assert!(matches!(
            Cli::parse_from(["tripwise", "config", "show"]).command,
            Commands::Config(ConfigCommands::Show)
        ));
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "tripwise",
            "whoami",
            "-c",
            "/custom/config.yaml",
            "--base-url",
            "https://api.example.com",
            "--json",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.yaml")));
        assert_eq!(cli.base_url.as_deref(), Some("https://api.example.com"));
        assert!(cli.json);
    }

    #[test]
    fn test_verbose_levels() {
        let cli = Cli::parse_from(["tripwise", "history"]);
        assert_eq!(cli.requested_log_level(), None);

        let cli = Cli::parse_from(["tripwise", "-v", "history"]);
        assert_eq!(cli.requested_log_level(), Some(LogLevel::Debug));

        let cli = Cli::parse_from(["tripwise", "-vvv", "history"]);
        assert_eq!(cli.requested_log_level(), Some(LogLevel::Trace));
    }

    #[test]
    fn test_quiet_mode() {
        let cli = Cli::parse_from(["tripwise", "-q", "history"]);
        assert_eq!(cli.requested_log_level(), Some(LogLevel::Error));
    }

    #[test]
    fn test_log_level_option() {
        let cli = Cli::parse_from(["tripwise", "--log-level", "WARN", "history"]);
        assert_eq!(cli.requested_log_level(), Some(LogLevel::Warn));

        let cli = Cli::parse_from(["tripwise", "history", "--log-level", "warning"]);
        assert_eq!(cli.log_level, Some(LogLevel::Warn));

        let cli = Cli::parse_from(["tripwise", "-v", "--log-level", "error", "history"]);
        assert_eq!(cli.requested_log_level(), Some(LogLevel::Debug));

        let result = Cli::try_parse_from(["tripwise", "--log-level", "loud", "history"]);
        assert!(result.is_err());
    }
}
