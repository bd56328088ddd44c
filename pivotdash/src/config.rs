use anyhow::{bail, Result};
use pivotdash_core::matrix::{DEFAULT_MAX_COLS, DEFAULT_MAX_ROWS};
use pivotdash_core::NumberFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "PIVOTDASH_CONFIG";

const CONFIG_FILE_NAME: &str = "pivotdash";
const ENV_PREFIX: &str = "PIVOTDASH";
const MAX_DECIMALS: usize = 6;

/// Runtime settings.
///
/// Sources, later ones winning: `<config dir>/pivotdash/pivotdash.toml`,
/// `./pivotdash.toml`, `PIVOTDASH__*` environment variables, then command
/// line flags applied by the binary. An explicit file (`--config` or
/// `PIVOTDASH_CONFIG`) replaces both file lookups and must exist.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub payload_path: Option<PathBuf>,
    pub export_dir: PathBuf,
    /// 0 shows every row
    pub max_rows: usize,
    /// 0 shows every column
    pub max_cols: usize,
    pub number_format: NumberFormat,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            payload_path: None,
            export_dir: PathBuf::from("."),
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            number_format: NumberFormat::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(explicit: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        match explicit {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(dir) = dirs::config_dir() {
                    let user_file = dir.join("pivotdash").join("pivotdash.toml");
                    builder = builder.add_source(config::File::from(user_file).required(false));
                }
                builder =
                    builder.add_source(config::File::with_name(CONFIG_FILE_NAME).required(false));
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        let fmt = &self.number_format;
        if fmt.decimals > MAX_DECIMALS {
            bail!(
                "number_format.decimals must be at most {}, got {}",
                MAX_DECIMALS,
                fmt.decimals
            );
        }
        if fmt.decimal_separator.is_empty() {
            bail!("number_format.decimal_separator must not be empty");
        }
        if fmt.decimal_separator == fmt.group_separator {
            bail!(
                "number_format.decimal_separator and group_separator must differ (both are {:?})",
                fmt.decimal_separator
            );
        }
        if tracing_subscriber::EnvFilter::try_new(&self.log_level).is_err() {
            bail!("log_level {:?} is not a valid filter", self.log_level);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.max_rows, DEFAULT_MAX_ROWS);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
payload_path = "data/dashboard.json"
max_rows = 0

[number_format]
decimals = 2
min_grouping_digits = 1
"#,
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();

        assert_eq!(
            settings.payload_path,
            Some(PathBuf::from("data/dashboard.json"))
        );
        assert_eq!(settings.max_rows, 0);
        assert_eq!(settings.max_cols, DEFAULT_MAX_COLS);
        assert_eq!(settings.number_format.decimals, 2);
        assert_eq!(settings.number_format.decimal_separator, ",");
        assert_eq!(settings.number_format.min_grouping_digits, 1);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_validate_rejects_equal_separators() {
        let mut settings = Settings::default();
        settings.number_format.group_separator = ",".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_too_many_decimals() {
        let mut settings = Settings::default();
        settings.number_format.decimals = 12;
        assert!(settings.validate().is_err());
    }
}
