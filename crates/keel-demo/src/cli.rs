//! Command-line interface for `keel`.
//!
//! # Examples
//!
//! ```bash
//! # Page through a local table
//! keel table --keys n,n,p
//!
//! # Remote table backed by the simulated server, sorted by name
//! keel table --remote --rows 56 --keys right,s,n
//!
//! # Type into an autosuggest and pick the first match
//! keel autosuggest --keys d,i,r,enter
//!
//! # Settings from a file, flags win
//! keel table --config demo.toml --page-size 25
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// keel - run scripted key sequences against keel widgets.
///
/// Every key is delivered as a message to the chosen widget; the final view
/// and every event the widget emitted are printed.
#[derive(Parser, Debug, Clone)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI flags are naturally bools"
)]
#[command(name = "keel", author, version, about = "Drive keel widgets from the command line")]
pub struct Cli {
    /// Widget to drive
    #[arg(value_enum)]
    pub widget: WidgetKind,

    /// TOML settings file
    ///
    /// Values given as flags override the file.
    #[arg(long, short = 'c', env = "KEEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Keys to send, comma separated (`down`, `space`, `enter`, `n`, ...)
    #[arg(long, short = 'k', value_delimiter = ',', env = "KEEL_KEYS")]
    pub keys: Vec<String>,

    /// Number of generated rows
    #[arg(long, env = "KEEL_ROWS")]
    pub rows: Option<usize>,

    /// Serve table pages from the simulated server
    #[arg(long)]
    pub remote: bool,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Radio-button selection instead of checkboxes
    #[arg(long)]
    pub single_select: bool,

    /// Print every frame, not only the last
    #[arg(long)]
    pub frames: bool,

    /// Disable colors
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Widgets the demo can drive.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// The data table
    Table,
    /// Text input with suggestions
    Autosuggest,
    /// Button with a menu
    Dropdown,
    /// Dismissible dialog
    Modal,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Log filter directive for the verbosity count.
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
