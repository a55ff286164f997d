//! Command-line argument parsing for fstation.
//!
//! `fst <SOURCE>` loads a listing and prints it. `fst --init` writes a default config and exits.

use crate::app::SortKey;
use crate::config::Config;

use clap::Parser;

use std::path::PathBuf;

/// Command-line arguments accepted by the `fst` binary.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fst",
    version,
    about = "Browse web server directory listings from the terminal"
)]
pub struct Args {
    #[arg(
        value_name = "SOURCE",
        required_unless_present = "init",
        help = "Listing to open: a file path, '-' for stdin, or an http(s) URL"
    )]
    pub source: Option<String>,
    #[arg(
        short,
        long,
        value_name = "KEY",
        help = "Sort by name, size or date (default: from config)"
    )]
    pub sort: Option<SortKey>,
    #[arg(short, long, help = "Sort in descending order")]
    pub desc: bool,
    #[arg(
        short,
        long,
        value_name = "TEXT",
        help = "Only show entries whose name contains TEXT"
    )]
    pub query: Option<String>,
    #[arg(
        short,
        long = "base-url",
        value_name = "URL",
        help = "Resolve relative hrefs against URL (default: the source URL or config)"
    )]
    pub base_url: Option<String>,
    #[arg(
        short,
        long,
        value_name = "NAME",
        help = "Open a preview of the entry called NAME"
    )]
    pub preview: Option<String>,
    #[arg(
        short = 'w',
        long,
        value_name = "COLUMNS",
        default_value_t = 100,
        help = "Table width in columns"
    )]
    pub width: usize,
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "FSTATION_CONFIG",
        help = "Configuration file (default: ~/.config/fstation/station.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Generate a default configuration file and exit")]
    pub init: bool,
}

impl Args {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}

pub enum CliAction {
    Run(Box<Args>),
    Exit,
    Fail,
}

/// Parses the process arguments and handles the ones that finish on their own.
///
/// Help and version print and exit. Usage errors print and fail with exit code 1. `--init`
/// writes the default config.
pub fn handle_args() -> CliAction {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let failed = e.use_stderr();
            let _ = e.print();
            return if failed {
                CliAction::Fail
            } else {
                CliAction::Exit
            };
        }
    };

    if args.init {
        let path = args.config_path();
        return match Config::generate_default(&path) {
            Ok(()) => {
                println!("Default config generated at {:?}", path);
                CliAction::Exit
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                CliAction::Fail
            }
        };
    }

    CliAction::Run(Box::new(args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_options() -> Result<(), Box<dyn std::error::Error>> {
        let args = Args::try_parse_from([
            "fst",
            "listing.html",
            "--sort",
            "size",
            "--desc",
            "-q",
            "Notes",
            "--preview",
            "a.txt",
        ])?;
        assert_eq!(args.source.as_deref(), Some("listing.html"));
        assert_eq!(args.sort, Some(SortKey::Size));
        assert!(args.desc);
        assert_eq!(args.query.as_deref(), Some("Notes"));
        assert_eq!(args.preview.as_deref(), Some("a.txt"));
        assert_eq!(args.width, 100);
        Ok(())
    }

    #[test]
    fn source_is_required_unless_init() {
        assert!(Args::try_parse_from(["fst"]).is_err());
        assert!(Args::try_parse_from(["fst", "--init"]).is_ok());
        assert!(Args::try_parse_from(["fst", "x", "--sort", "weight"]).is_err());
    }
}
