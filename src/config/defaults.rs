/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Fetch defaults
pub const DEFAULT_USER_AGENT: &str = "EPGSeriesAdder/1.0 (+https://open-epg.com)";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// Output defaults
pub const DEFAULT_OUTPUT_PATH: &str = "open-epg_series.xml";
pub const DEFAULT_INDENT_WIDTH: usize = 2;

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

pub fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

pub fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

pub fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
