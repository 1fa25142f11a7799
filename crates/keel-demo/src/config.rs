//! Runtime configuration for `keel`.
//!
//! [`DemoConfig`] is the single source of truth for a run, independent of
//! how the values were given. A TOML file is loaded first and CLI flags are
//! merged over it.
//!
//! ```toml
//! rows = 56
//! keys = ["right", "s", "n"]
//! color = false
//!
//! [theme]
//! primary = "#00aaff"
//!
//! [table]
//! title = "Instances"
//! remote = true
//! default_page_size = 25
//! ```

use std::path::Path;

use anyhow::Context;
use keel_style::Theme;
use keel_widgets::table::TableOptions;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Upper bound on generated rows.
pub const MAX_ROWS: usize = 100_000;

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Generated rows for the table.
    pub rows: usize,
    /// Keys to send, in canonical form.
    pub keys: Vec<String>,
    /// Emit ANSI colors.
    pub color: bool,
    /// Print every frame.
    pub frames: bool,
    /// Palette for every widget.
    pub theme: Theme,
    /// Table options.
    pub table: TableOptions,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            keys: Vec::new(),
            color: true,
            frames: false,
            theme: Theme::default(),
            table: TableOptions {
                disable_expand: false,
                ..TableOptions::titled("Instances")
            },
        }
    }
}

impl DemoConfig {
    /// Load a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Resolve the configuration for `cli`: the file named by `--config`, or
    /// defaults, with flags applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result
    /// does not validate.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Merge flags over the current values. Only flags that were given
    /// change anything.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if !cli.keys.is_empty() {
            self.keys.clone_from(&cli.keys);
        }
        if let Some(rows) = cli.rows {
            self.rows = rows;
        }
        if cli.remote {
            self.table.remote = true;
        }
        if let Some(size) = cli.page_size {
            self.table.default_page_size = size;
            if !self.table.page_size_options.contains(&size) {
                self.table.page_size_options.push(size);
                self.table.page_size_options.sort_unstable();
            }
        }
        if cli.single_select {
            self.table.multi_select = false;
        }
        if cli.frames {
            self.frames = true;
        }
        if cli.no_color {
            self.color = false;
        }
    }

    /// Check values the widgets cannot check themselves.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows > MAX_ROWS {
            return Err(ConfigError::TooManyRows(self.rows));
        }
        if let Some(i) = self.keys.iter().position(String::is_empty) {
            return Err(ConfigError::EmptyKey(i));
        }
        if self.table.remote && self.table.row_count.is_some_and(|n| n != self.rows) {
            return Err(ConfigError::RowCountMismatch {
                row_count: self.table.row_count.unwrap_or_default(),
                rows: self.rows,
            });
        }
        Ok(())
    }

    /// Summary of the resolved settings, for `-v` runs.
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Rows: {}", self.rows));
        lines.push(format!("Keys: {}", self.keys.join(",")));
        lines.push(format!("Color: {}", if self.color { "on" } else { "off" }));
        lines.push(format!("Remote: {}", self.table.remote));
        lines.push(format!("Page size: {}", self.table.default_page_size));
        lines.join("\n")
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// More rows than the generator produces.
    #[error("too many rows: {0} (at most {MAX_ROWS})")]
    TooManyRows(usize),

    /// A blank entry in the key list.
    #[error("key {0} is empty")]
    EmptyKey(usize),

    /// A fixed server row count that disagrees with the generated rows.
    #[error("table.row_count is {row_count} but {rows} rows are generated")]
    RowCountMismatch {
        /// Configured row count.
        row_count: usize,
        /// Generated rows.
        rows: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["keel", "table"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_defaults_validate() {
        let config = DemoConfig::default();
        assert_eq!(config.rows, 25);
        assert!(config.color);
        assert!(!config.table.remote);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 56\n\n[table]\nremote = true\ndefault_page_size = 5").unwrap();
        let config = DemoConfig::from_file(file.path()).unwrap();
        assert_eq!(config.rows, 56);
        assert!(config.table.remote);
        assert_eq!(config.table.default_page_size, 5);
        assert!(config.table.multi_select, "unset table options keep their defaults");
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 56\nkeys = [\"n\"]").unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let config = DemoConfig::resolve(&cli(&["--config", &path, "--rows", "12", "-k", "p,p"])).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.keys, vec!["p", "p"]);
    }

    #[test]
    fn test_page_size_flag_joins_options() {
        let mut config = DemoConfig::default();
        config.apply_cli(&cli(&["--page-size", "7"]));
        assert_eq!(config.table.default_page_size, 7);
        assert_eq!(config.table.page_size_options, vec![7, 10, 25, 50, 100]);
    }

    #[test]
    fn test_bad_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = \"many\"").unwrap();
        let err = DemoConfig::from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config file"));
    }

    #[test]
    fn test_validate_rejects() {
        let config = DemoConfig {
            rows: MAX_ROWS + 1,
            ..DemoConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooManyRows(MAX_ROWS + 1)));

        let config = DemoConfig {
            keys: vec!["n".into(), " ".into(), String::new()],
            ..DemoConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyKey(2)));
    }

    #[test]
    fn test_diagnostic_string() {
        let s = DemoConfig::default().to_diagnostic_string();
        assert!(s.contains("Rows: 25"));
        assert!(s.contains("Remote: false"));
    }
}
