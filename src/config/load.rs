use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `TAGPACK__`) over an
/// optional config file and falls back to struct defaults. The `[ingest]`
/// lists take comma-separated values from the environment.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TAGPACK")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ingest.accepted_types")
                .with_list_parse_key("ingest.extensions"),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let name = self.output.archive_name.trim();
        if name.is_empty() {
            return Err("output.archive_name must not be empty".to_string());
        }
        if name.contains(['/', '\\']) {
            return Err("output.archive_name must be a file name, not a path".to_string());
        }
        if self
            .ingest
            .accepted_types
            .iter()
            .all(|t| t.trim().is_empty())
        {
            return Err("ingest.accepted_types must list at least one media type".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `TAGPACK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TAGPACK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/tagpack/config.toml`
/// or `~/.config/tagpack/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("tagpack").join("config.toml"))
}
