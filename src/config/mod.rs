//! Configuration module.
//!
//! Handles the settings file, environment variables and defaults.

mod settings;

pub use settings::{
    expand_env_vars, ArtifactSettings, LayoutSettings, NamingSettings, QuerySettings, Settings,
    SettingsError,
};
