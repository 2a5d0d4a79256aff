//! TOML-based configuration for report synthesis.
//!
//! Supports a config file (quickreport.toml) with environment variable
//! expansion in path values.
//!
//! Example configuration:
//! ```toml
//! [artifacts]
//! enabled = true
//! directory = "${REPORT_HOME}/generated_classes"
//! fail_on_error = false
//!
//! [layout]
//! margin_top = 1.5
//! margin_bottom = 1.5
//! margin_left = 1.5
//! margin_right = 1.5
//! date_format = "yyyy-MM-dd"
//!
//! [query]
//! native = false
//! row_alias = "item"
//!
//! [naming]
//! row_suffix = "ReportRow"
//! query_sheet_suffix = "ReportSheetQuery"
//! data_sheet_suffix = "ReportSheetData"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Debug artifact store.
    pub artifacts: ArtifactSettings,

    /// Sheet and column layout defaults.
    pub layout: LayoutSettings,

    /// Query text generation.
    pub query: QuerySettings,

    /// Generated type name suffixes.
    pub naming: NamingSettings,
}

/// Debug artifact configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Write every synthesized type definition to disk.
    pub enabled: bool,

    /// Target directory (supports ${ENV_VAR} expansion).
    pub directory: String,

    /// Abort synthesis when an artifact cannot be written.
    pub fail_on_error: bool,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "report/generated_classes".to_string(),
            fail_on_error: false,
        }
    }
}

impl ArtifactSettings {
    /// Get the artifact directory with environment variables expanded.
    pub fn resolved_directory(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.directory).map(PathBuf::from)
    }
}

/// Layout defaults applied to every generated sheet.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,

    /// Display format attached to date columns.
    pub date_format: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin_top: 1.5,
            margin_bottom: 1.5,
            margin_left: 1.5,
            margin_right: 1.5,
            date_format: "yyyy-MM-dd".to_string(),
        }
    }
}

/// Query text generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Mark generated queries as native passthrough queries.
    pub native: bool,

    /// Alias of the source table inside the generated query.
    pub row_alias: String,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            native: false,
            row_alias: "item".to_string(),
        }
    }
}

/// Suffixes appended to the source type name to form generated names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NamingSettings {
    pub row_suffix: String,
    pub query_sheet_suffix: String,
    pub data_sheet_suffix: String,
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            row_suffix: "ReportRow".to_string(),
            query_sheet_suffix: "ReportSheetQuery".to_string(),
            data_sheet_suffix: "ReportSheetData".to_string(),
        }
    }
}

impl NamingSettings {
    /// Generated row type name for a source type.
    pub fn row_type_name(&self, source_type_name: &str) -> String {
        format!("{}{}", source_type_name, self.row_suffix)
    }

    /// Generated query-backed sheet name for a source type.
    pub fn query_sheet_name(&self, source_type_name: &str) -> String {
        format!("{}{}", source_type_name, self.query_sheet_suffix)
    }

    /// Generated data-backed sheet name for a source type.
    pub fn data_sheet_name(&self, source_type_name: &str) -> String {
        format!("{}{}", source_type_name, self.data_sheet_suffix)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `QUICKREPORT_CONFIG`
    /// 2. `./quickreport.toml`
    /// 3. `~/.config/quickreport/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("QUICKREPORT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("quickreport.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("quickreport").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Reject settings that would produce unusable generated names.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let suffixes = [
            ("row_suffix", &self.naming.row_suffix),
            ("query_sheet_suffix", &self.naming.query_sheet_suffix),
            ("data_sheet_suffix", &self.naming.data_sheet_suffix),
        ];
        for (key, suffix) in suffixes {
            if suffix.trim().is_empty() {
                return Err(SettingsError::InvalidConfig(format!(
                    "naming.{} must not be empty",
                    key
                )));
            }
        }
        if self.naming.query_sheet_suffix == self.naming.data_sheet_suffix {
            return Err(SettingsError::InvalidConfig(
                "query and data sheet suffixes must differ".to_string(),
            ));
        }
        if self.query.row_alias.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "query.row_alias must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports both `${VAR}` and `$VAR` syntax. A lone `$` is kept as is.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        while let Some(&ch) = chars.peek() {
            if braced {
                chars.next();
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            } else if ch.is_alphanumeric() || ch == '_' {
                var_name.push(ch);
                chars.next();
            } else {
                break;
            }
        }

        if var_name.is_empty() && !braced {
            result.push('$');
            continue;
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
