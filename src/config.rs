//! Configuration management

/// Default configuration values
const DEFAULT_CACHE_TIMEOUT: u32 = 1;
const DEFAULT_ICON_ON: &str = "●";
const DEFAULT_ICON_OFF: &str = "■";
const DEFAULT_ICON_UNKNOWN: &str = "X";
const DEFAULT_FORMAT: &str = "{icon}";

/// Block configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds before the host should poll again
    pub cache_timeout: u32,
    pub icon_on: String,
    pub icon_off: String,
    /// Shown for the `Unknown` state and for any query failure
    pub icon_unknown: String,
    /// Template with an `{icon}` placeholder
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            icon_on: DEFAULT_ICON_ON.to_string(),
            icon_off: DEFAULT_ICON_OFF.to_string(),
            icon_unknown: DEFAULT_ICON_UNKNOWN.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }
}
