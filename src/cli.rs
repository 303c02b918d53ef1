use clap::{Parser, Subcommand};
use dvm::application::dto::OutputFormat;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  dvm list                       List installed SDKs and available updates
  dvm list-available -f net7.0   List every published SDK of the 7.0 channel
  sudo dvm install 7.0           Install the latest SDK of the 7.0 channel
  sudo dvm install 7.0.102       Install one exact SDK
  sudo dvm uninstall 7.0.100     Remove one exact SDK
  sudo dvm upgrade               Upgrade every installed channel
  sudo dvm upgrade -f 6.0        Upgrade only the 6.0 channel
  dvm info 7.0                   Show release details of the latest 7.0 SDK
  dvm update                     Refresh the cached release index";

/// Manage .NET SDK installations from the official release catalog
#[derive(Parser, Debug)]
#[command(name = "dvm")]
#[command(version)]
#[command(about = "Manage .NET SDK installations from the official release catalog", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format: text or json
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to a settings file (defaults to <config dir>/dvm/dvm.config.yml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show diagnostic logs on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List installed SDKs and the updates available for their channels
    List,

    /// List the SDKs published in the release catalog
    ListAvailable {
        /// Channel to show (e.g. 7.0, net7.0) or "all"
        #[arg(short = 'f', long, default_value = "all")]
        framework: String,
    },

    /// Install a channel's latest SDK or one exact SDK version
    Install {
        /// Channel (7.0, net7.0) or exact SDK version (7.0.102)
        sdk_version: String,
    },

    /// Remove one exact SDK version
    Uninstall {
        /// Exact SDK version (7.0.102)
        sdk_version: String,
    },

    /// Install the latest SDK of installed channels and remove the versions it supersedes
    Upgrade {
        /// Channel to upgrade (e.g. 6.0, net6.0) or "all"
        #[arg(short = 'f', long, default_value = "all")]
        framework: String,
    },

    /// Show release details of a channel's latest SDK or one exact SDK version
    Info {
        /// Channel (7.0, net7.0) or exact SDK version (7.0.102)
        sdk_version: String,
    },

    /// Refresh the cached release index
    Update,
}

impl Args {
    /// Parses the process arguments; clap exits with code 2 on invalid input
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("dvm").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let args = parse(&["list"]).unwrap();
        assert_eq!(args.command, Command::List);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_framework_defaults_to_all() {
        let args = parse(&["list-available"]).unwrap();
        assert_eq!(
            args.command,
            Command::ListAvailable {
                framework: "all".to_string()
            }
        );

        let args = parse(&["upgrade"]).unwrap();
        assert_eq!(
            args.command,
            Command::Upgrade {
                framework: "all".to_string()
            }
        );
    }

    #[test]
    fn test_framework_short_and_long() {
        let args = parse(&["upgrade", "-f", "net6.0"]).unwrap();
        assert_eq!(
            args.command,
            Command::Upgrade {
                framework: "net6.0".to_string()
            }
        );

        let args = parse(&["list-available", "--framework", "7"]).unwrap();
        assert_eq!(
            args.command,
            Command::ListAvailable {
                framework: "7".to_string()
            }
        );
    }

    #[test]
    fn test_version_argument_is_required() {
        assert!(parse(&["install"]).is_err());
        assert!(parse(&["uninstall"]).is_err());
        assert!(parse(&["info"]).is_err());
    }

    #[test]
    fn test_version_argument_is_passed_verbatim() {
        let args = parse(&["install", "7 .0"]).unwrap();
        assert_eq!(
            args.command,
            Command::Install {
                sdk_version: "7 .0".to_string()
            }
        );
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let args = parse(&["info", "7.0", "--format", "json", "-v", "-c", "dvm.yml"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("dvm.yml")));
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let err = parse(&["list", "--format", "yaml"]).unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(parse(&[]).is_err());
    }
}
