//! Console configuration, read from the environment once at startup.

use titanium_observability::LogFormat;

pub const PREFIX_VAR: &str = "TITANIUM_PREFIX";
pub const LOG_FORMAT_VAR: &str = "TITANIUM_LOG_FORMAT";

pub const DEFAULT_PREFIX: &str = "TitaniumShop";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Shop name shown in the menu banner and in front of every status message.
    pub prefix: String,
    pub log_format: LogFormat,
    rejected_log_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            log_format: LogFormat::default(),
            rejected_log_format: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset;
    /// an unrecognized log format falls back to the default and is kept for
    /// [`Config::rejected_log_format`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(prefix) = lookup(PREFIX_VAR).filter(|v| !v.trim().is_empty()) {
            config.prefix = prefix.trim().to_string();
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR).filter(|v| !v.trim().is_empty()) {
            match raw.parse() {
                Ok(format) => config.log_format = format,
                Err(_) => config.rejected_log_format = Some(raw),
            }
        }

        config
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The raw log format value that could not be parsed, if any.
    ///
    /// Logging is not up yet while the config is read, so the caller reports
    /// this once the subscriber is installed.
    pub fn rejected_log_format(&self) -> Option<&str> {
        self.rejected_log_format.as_deref()
    }
}
