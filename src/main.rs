//! hexview - Entry Point

use clap::Parser;
use hexview::config::ResolvedConfig;
use hexview::state::{AppState, HexSession};
use hexview::view::{constants, ColorConfig, ViewerStyles};
use std::path::PathBuf;
use tracing::{info, warn};

/// hexview - terminal hex viewer
#[derive(Parser, Debug)]
#[command(name = "hexview")]
#[command(version)]
#[command(about = "Terminal hex viewer with pluggable decoder column")]
pub struct Args {
    /// File to view
    pub file: PathBuf,

    /// Start at this line (decimal, 0x.. or ..h)
    #[arg(short, long, allow_hyphen_values = true)]
    pub line: Option<String>,

    /// Bytes rendered per line
    #[arg(short, long)]
    pub bytes_per_line: Option<usize>,

    /// Decoder selector at startup (0 none, -1 printable, 1.. plugins)
    #[arg(short, long, allow_negative_numbers = true)]
    pub plugin: Option<i64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolve configuration: Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, hexview::config::ConfigError> {
    let config_file = hexview::config::load_config_with_precedence(args.config.clone())?;
    let merged = hexview::config::merge_config(config_file);
    let with_env = hexview::config::apply_env_overrides(merged);
    Ok(hexview::config::apply_cli_overrides(
        with_env,
        args.bytes_per_line,
        args.plugin,
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    hexview::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let (_, rows) = crossterm::terminal::size()?;
    let viewer = config.viewer(constants::viewport_rows(rows));

    // A file that cannot be opened still gets the TUI, showing the error
    let app_state = match HexSession::open(&args.file, &viewer) {
        Ok(mut session) => {
            if let Some(line) = &args.line {
                session.goto(line)?;
            }
            AppState::new(session)
        }
        Err(err) => {
            warn!(error = %err, path = ?args.file, "failed to open file");
            AppState::failed(err.to_string())
        }
    };

    let styles = ViewerStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    hexview::view::run_with_state(app_state, styles)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["hexview", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["hexview", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_file_is_required() {
        let result = Args::try_parse_from(["hexview"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["hexview", "dump.bin"]);
        assert_eq!(args.file, PathBuf::from("dump.bin"));
        assert_eq!(args.line, None);
        assert_eq!(args.bytes_per_line, None);
        assert_eq!(args.plugin, None);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_line_accepts_hex() {
        let args = Args::parse_from(["hexview", "dump.bin", "-l", "0x20"]);
        assert_eq!(args.line.as_deref(), Some("0x20"));
    }

    #[test]
    fn test_bytes_per_line_flag() {
        let args = Args::parse_from(["hexview", "dump.bin", "--bytes-per-line", "16"]);
        assert_eq!(args.bytes_per_line, Some(16));
    }

    #[test]
    fn test_bytes_per_line_rejects_text() {
        let result = Args::try_parse_from(["hexview", "dump.bin", "-b", "wide"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_plugin_accepts_negative_selector() {
        let args = Args::parse_from(["hexview", "dump.bin", "-p", "-1"]);
        assert_eq!(args.plugin, Some(-1));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "hexview",
            "dump.bin",
            "-l",
            "7",
            "-b",
            "4",
            "-p",
            "2",
            "--no-color",
            "--config",
            "/custom/config.toml",
        ]);
        assert_eq!(args.line.as_deref(), Some("7"));
        assert_eq!(args.bytes_per_line, Some(4));
        assert_eq!(args.plugin, Some(2));
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        use hexview::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            bytes_per_line: Some(16),
            default_plugin: Some(3),
            ..ConfigFile::default()
        };

        let merged = merge_config(Some(config_file));
        assert_eq!(merged.bytes_per_line, 16);

        let with_cli = apply_cli_overrides(merged, Some(4), None);
        assert_eq!(with_cli.bytes_per_line, 4, "CLI should override config file");
        assert_eq!(with_cli.default_plugin, 3, "unset flag keeps file value");
    }
}
