//! URL utilities for logging and validating feed locations

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Parse and validate an HTTP(S) feed URL
    pub fn parse_feed_url(url: &str) -> Result<Url, String> {
        let parsed = Url::parse(url.trim()).map_err(|e| format!("Invalid URL '{url}': {e}"))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(format!("Unsupported URL scheme '{other}' (expected http or https)")),
        }
    }

    /// Obfuscate credentials in URLs for safe logging
    ///
    /// Handles both userinfo (`user:pass@host`) and the query parameters
    /// Xtream-style EPG endpoints use to carry credentials.
    ///
    /// ```rust
    /// use epg_series::utils::url::UrlUtils;
    ///
    /// assert_eq!(
    ///     UrlUtils::obfuscate_credentials("http://host/xmltv.php?username=bob&password=hunter2"),
    ///     "http://host/xmltv.php?username=****&password=****"
    /// );
    /// ```
    pub fn obfuscate_credentials(url: &str) -> String {
        static SENSITIVE_PARAMS: OnceLock<Regex> = OnceLock::new();

        let mut obfuscated = url.to_string();

        if let Ok(parsed) = Url::parse(url)
            && (!parsed.username().is_empty() || parsed.password().is_some())
        {
            let mut new_url = parsed.clone();
            let _ = new_url.set_username("****");
            let _ = new_url.set_password(Some("****"));
            obfuscated = new_url.to_string();
        }

        let re = SENSITIVE_PARAMS.get_or_init(|| {
            Regex::new(r"(?i)([?&](?:username|password|user|pass|pwd|passwd)=)[^&]*")
                .expect("valid credential parameter regex")
        });
        re.replace_all(&obfuscated, "${1}****").into_owned()
    }
}
