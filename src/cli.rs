// CLI definitions using clap

use clap::Parser;
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;

/// Keyword naming the mouse as a source or destination
pub const MOUSE_KEYWORD: &str = "MOUSE";

#[derive(Parser, Debug)]
#[command(name = "g600linux")]
#[command(author, version, about = "Logitech G600 button mapping tool")]
pub struct Cli {
    /// Where to read the mapping from: a JSON file or MOUSE
    #[arg(value_name = "SOURCE", value_parser = parse_endpoint)]
    pub source: Endpoint,

    /// Where to write the mapping: a JSON file or MOUSE (default: stdout)
    #[arg(value_name = "DESTINATION", value_parser = parse_endpoint)]
    pub destination: Option<Endpoint>,

    /// Replace an existing destination file
    #[arg(short = 'f', long = "overwrite-file")]
    pub overwrite_file: bool,

    /// Talk to the mouse but do not send any config writes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Debug logging, including every transfer
    #[arg(short, long)]
    pub debug: bool,

    /// Write the raw bytes form instead of symbolic names
    #[arg(long)]
    pub bytes: bool,

    /// Settings file (default: ~/.config/g600linux/settings.toml)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

/// One end of a copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Mouse,
    File(PathBuf),
}

impl Endpoint {
    pub fn is_mouse(&self) -> bool {
        matches!(self, Endpoint::Mouse)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Mouse => f.write_str(MOUSE_KEYWORD),
            Endpoint::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn parse_endpoint(s: &str) -> Result<Endpoint, Infallible> {
    Ok(if s == MOUSE_KEYWORD {
        Endpoint::Mouse
    } else {
        Endpoint::File(PathBuf::from(s))
    })
}
