//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//!
//! ```toml
//! [salesforce]
//! instance_url = "https://login.salesforce.com"
//! username = "ops@example.com"
//! password = "..."
//! token = "..."
//! api_version = "59.0"
//!
//! [server]
//! read_only = false
//! aliases = true
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INSTANCE_URL: &str = "https://login.salesforce.com";
pub const DEFAULT_API_VERSION: &str = "59.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The server cannot log in with this configuration
    Error,
    /// Works, but probably not as intended
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key the issue is about, e.g. `salesforce.username`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Org connection settings (`[salesforce]`, or `SALESFORCE_*` variables)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSalesforceConfig {
    /// Login endpoint; a sandbox uses `https://test.salesforce.com`
    pub instance_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Security token appended to the password for SOAP login
    pub token: Option<String>,
    /// Connected app key; enables the OAuth2 password flow together with the secret
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub api_version: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for FileSalesforceConfig {
    fn default() -> Self {
        Self {
            instance_url: DEFAULT_INSTANCE_URL.to_string(),
            username: None,
            password: None,
            token: None,
            consumer_key: None,
            consumer_secret: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl FileSalesforceConfig {
    /// Both halves of the connected app credentials are present
    pub fn uses_oauth(&self) -> bool {
        present(&self.consumer_key) && present(&self.consumer_secret)
    }
}

/// Protocol surface settings (`[server]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Expose only tools that never change the org
    pub read_only: bool,
    /// Accept bare tool names (`query_records`) besides `salesforce_query_records`
    pub aliases: bool,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            aliases: true,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub salesforce: FileSalesforceConfig,
    pub server: FileServerConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let sf = &self.salesforce;
        let mut issues = Vec::new();

        if !present(&sf.username) {
            issues.push(ConfigIssue::error(
                "salesforce.username",
                "salesforce.username is not set (SALESFORCE_USERNAME)",
            ));
        }
        if !present(&sf.password) {
            issues.push(ConfigIssue::error(
                "salesforce.password",
                "salesforce.password is not set (SALESFORCE_PASSWORD)",
            ));
        }
        if present(&sf.consumer_key) != present(&sf.consumer_secret) {
            issues.push(ConfigIssue::warning(
                "salesforce.consumer_secret",
                "consumer_key and consumer_secret must be set together; falling back to SOAP login",
            ));
        }
        if !sf.instance_url.starts_with("https://") {
            issues.push(ConfigIssue::warning(
                "salesforce.instance_url",
                format!("salesforce.instance_url '{}' is not an https URL", sf.instance_url),
            ));
        }
        let version_ok = Regex::new(r"^\d+\.\d+$")
            .map(|re| re.is_match(&sf.api_version))
            .unwrap_or(true);
        if !version_ok {
            issues.push(ConfigIssue::warning(
                "salesforce.api_version",
                format!(
                    "salesforce.api_version '{}' should look like '{}'",
                    sf.api_version, DEFAULT_API_VERSION
                ),
            ));
        }
        if sf.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                "salesforce.timeout_secs",
                "salesforce.timeout_secs cannot be 0",
            ));
        }

        issues
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[salesforce]
instance_url = "https://test.salesforce.com"
username = "ops@example.com"
password = "secret"
token = "tok"
api_version = "60.0"

[server]
read_only = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.salesforce.instance_url, "https://test.salesforce.com");
        assert_eq!(config.salesforce.username.as_deref(), Some("ops@example.com"));
        assert_eq!(config.salesforce.api_version, "60.0");
        assert_eq!(config.salesforce.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.server.read_only);
        assert!(config.server.aliases);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.salesforce.instance_url, DEFAULT_INSTANCE_URL);
        assert_eq!(config.salesforce.api_version, DEFAULT_API_VERSION);
        assert!(!config.server.read_only);
        assert!(!config.salesforce.uses_oauth());
    }

    #[test]
    fn test_validate_missing_credentials() {
        let issues = FileConfig::default().validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["salesforce.username", "salesforce.password"]);
        assert!(issues.iter().all(|i| i.severity == Severity::Error));
    }

    #[test]
    fn test_validate_half_oauth_pair() {
        let mut config = FileConfig::default();
        config.salesforce.username = Some("u".into());
        config.salesforce.password = Some("p".into());
        config.salesforce.consumer_key = Some("key".into());

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(!config.salesforce.uses_oauth());
    }

    #[test]
    fn test_validate_api_version_shape() {
        let mut config = FileConfig::default();
        config.salesforce.username = Some("u".into());
        config.salesforce.password = Some("p".into());
        config.salesforce.api_version = "v59".into();

        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "salesforce.api_version");
    }
}
