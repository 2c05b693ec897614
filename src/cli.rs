//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Analyze a G-code program and print its metrics as JSON
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "gcodescan", author, version, about, long_about = None)]
pub struct Cli {
    /// Program to analyze
    pub file: PathBuf,

    /// Config file (JSON or TOML); the user config location otherwise
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_file_only() {
        let cli = Cli::try_parse_from(["gcodescan", "part.gcode"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("part.gcode"));
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["gcodescan", "--config", "printer.toml", "part.gcode"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("part.gcode"));
        assert_eq!(cli.config, Some(PathBuf::from("printer.toml")));

        let cli = Cli::try_parse_from(["gcodescan", "part.gcode", "-c", "printer.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("printer.json")));
    }

    #[test]
    fn test_help_and_version() {
        let err = Cli::try_parse_from(["gcodescan", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["gcodescan", "-V"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Cli::try_parse_from(["gcodescan"]).is_err());
        assert!(Cli::try_parse_from(["gcodescan", "--config"]).is_err());
        assert!(Cli::try_parse_from(["gcodescan", "a.gcode", "b.gcode"]).is_err());
        assert!(Cli::try_parse_from(["gcodescan", "--fast", "a.gcode"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
