//! Application configuration.
//!
//! Compile-time constants shared by the uploader and the page enhancer,
//! plus the runtime [`UploaderConfig`] read from the host element's
//! `data-config` attribute.

use serde::Deserialize;

use crate::{AppError, AppResult};

/// Filename suffix accepted by the uploader (case-sensitive).
pub const ACCEPTED_EXTENSION: &str = ".md";

/// Maximum size for generic file inputs handled by the page enhancer.
///
/// 10 MiB limit. Not enforced on staged markdown files.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Delay before notices and server-rendered alerts are dismissed.
pub const DISMISS_DELAY_MS: u32 = 5_000;

/// Maximum notices shown at once.
pub const MAX_NOTICES: usize = 5;

/// Delay before a locked submit button is re-enabled.
pub const SUBMIT_LOCKOUT_MS: u32 = 5_000;

/// Element the uploader is mounted into.
pub const UPLOAD_ROOT_ID: &str = "upload-root";

/// Attribute carrying the JSON configuration on the host element.
pub const CONFIG_ATTRIBUTE: &str = "data-config";

/// Forms carrying this attribute are skipped by the page-wide submit lockout.
pub const UPLOADER_FORM_ATTRIBUTE: &str = "data-uploader";

/// Multipart field holding the anti-forgery token.
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Multipart field repeated once per staged file.
pub const FILE_FIELD: &str = "file";

/// Label shown after a successful upload while the page reloads.
pub const PROCESSING_LABEL: &str = "Processing...";

/// Runtime configuration for the uploader.
///
/// Every key is optional; missing values are resolved against the page at
/// mount time (see [`UploaderConfig::action_or`] and
/// [`UploaderConfig::csrf_token_or`]).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploaderConfig {
    /// Upload endpoint. Defaults to the current page URL.
    pub action: Option<String>,
    /// Anti-forgery token. Defaults to the token rendered in the page.
    pub csrf_token: Option<String>,
    /// Heading shown above the drop zone.
    pub title: Option<String>,
}

impl UploaderConfig {
    /// Parse the `data-config` attribute value.
    ///
    /// A blank attribute yields the defaults.
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Parse the attribute, logging and falling back to defaults on error.
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw.map(Self::parse) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                log::warn!("Ignoring invalid uploader config: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn action_or(&self, fallback: impl FnOnce() -> String) -> String {
        non_blank(self.action.as_deref()).unwrap_or_else(fallback)
    }

    pub fn csrf_token_or(&self, fallback: impl FnOnce() -> String) -> String {
        non_blank(self.csrf_token.as_deref()).unwrap_or_else(fallback)
    }

    pub fn title(&self) -> String {
        non_blank(self.title.as_deref()).unwrap_or_else(|| "Upload documents".to_string())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"{
            "action": "/documents/upload/",
            "csrfToken": "abc123",
            "title": "Upload notes"
        }"#;

        let config = UploaderConfig::parse(raw).unwrap();
        assert_eq!(config.action.as_deref(), Some("/documents/upload/"));
        assert_eq!(config.csrf_token.as_deref(), Some("abc123"));
        assert_eq!(config.title(), "Upload notes");
    }

    #[test]
    fn test_missing_keys_fall_back() {
        let config = UploaderConfig::parse(r#"{"unknown": 1}"#).unwrap();
        assert_eq!(config, UploaderConfig::default());
        assert_eq!(config.action_or(|| "/here/".into()), "/here/");
        assert_eq!(config.csrf_token_or(String::new), "");
        assert_eq!(config.title(), "Upload documents");
    }

    #[test]
    fn test_blank_values_use_fallback() {
        let config = UploaderConfig::parse(r#"{"action": "  ", "csrfToken": ""}"#).unwrap();
        assert_eq!(config.action_or(|| "/page/".into()), "/page/");
        assert_eq!(config.csrf_token_or(|| "from-page".into()), "from-page");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = UploaderConfig::parse("{not json").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(UploaderConfig::parse_or_default(Some("{not json")), UploaderConfig::default());
        assert_eq!(UploaderConfig::parse_or_default(Some("")), UploaderConfig::default());
        assert_eq!(UploaderConfig::parse_or_default(None), UploaderConfig::default());
    }
}
