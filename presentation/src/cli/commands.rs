//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for genpool
#[derive(Parser, Debug)]
#[command(name = "genpool")]
#[command(author, version, about = "Crowd-rated generation pools with demand-driven generation")]
#[command(long_about = r#"
genpool serves an HTTP API where clients rate machine-generated texts.

Every generation starts in the evaluating pool. Once enough distinct raters
have classified it, the most popular classification decides its fate:
a consensus that includes "disliked" (0) discards it, anything else moves
it to the finalized pool. A background scheduler keeps each
(title, type) pair of the prompt catalog stocked with fresh generations.

Configuration files are loaded from (in priority order):
1. --config <path>                      Explicit config file
2. GENPOOL_* environment variables      e.g. GENPOOL_SERVER__PORT=9000
3. ./genpool.toml                       Project-level config
4. ~/.config/genpool/config.toml        Global config

Example:
  genpool -i 0.0.0.0 -p 8000
  genpool --no-scheduler --ephemeral -vv
"#)]
pub struct Cli {
    /// The listening IP address
    #[arg(short, long, value_name = "IP")]
    pub ip: Option<String>,

    /// The listening port
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Serve ratings only; do not run the demand scheduler
    #[arg(long)]
    pub no_scheduler: bool,

    /// Keep generations in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Tracing filter directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["genpool", "-i", "0.0.0.0", "-p", "9000", "-vv"]);
        assert_eq!(cli.ip.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.log_level(), "debug");
        assert!(!cli.no_scheduler);
    }

    #[test]
    fn test_defaults_leave_config_in_charge() {
        let cli = Cli::parse_from(["genpool"]);
        assert!(cli.ip.is_none());
        assert!(cli.port.is_none());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["genpool", "--port", "70000"]).is_err());
    }
}
