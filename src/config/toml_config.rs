use crate::adapters::document::DataFormat;
use crate::core::bookmarks::DEFAULT_BOOKMARK_KEY;
use crate::core::share::ShareSettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    validate_endpoint, validate_non_empty_string, validate_path, validate_range, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub share: ShareConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub format: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "courses.json".to_string(),
            timeout_seconds: None,
            format: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: ".course-catalog/storage.json".to_string(),
            key: DEFAULT_BOOKMARK_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub title: String,
    pub organization: String,
    pub page_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        let defaults = ShareSettings::default();
        Self {
            title: defaults.title,
            organization: defaults.organization,
            page_url: defaults.page_url,
        }
    }
}

impl CatalogConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// 優先使用指定路徑，其次是目前目錄的 catalog.toml，否則用預設值
    pub fn discover(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${COURSES_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("bad substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn share_settings(&self) -> ShareSettings {
        ShareSettings {
            title: self.share.title.clone(),
            organization: self.share.organization.clone(),
            page_url: self.share.page_url.clone(),
        }
    }
}

impl ConfigProvider for CatalogConfig {
    fn endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn data_format(&self) -> Option<&str> {
        self.source.format.as_deref()
    }

    fn bookmark_path(&self) -> &str {
        &self.storage.path
    }

    fn storage_key(&self) -> &str {
        &self.storage.key
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validate_endpoint("source.endpoint", &self.source.endpoint)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(format) = &self.source.format {
            DataFormat::from_name(format)?;
        }
        validate_path("storage.path", &self.storage.path)?;
        validate_non_empty_string("storage.key", &self.storage.key)?;
        if !self.share.page_url.is_empty() {
            validate_url("share.page_url", &self.share.page_url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
endpoint = "https://training.example.org/courses.json"
timeout_seconds = 10

[storage]
path = "./state/bookmarks.json"
key = "my-bookmarks"

[share]
page_url = "https://training.example.org/"
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.endpoint(), "https://training.example.org/courses.json");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.storage_key(), "my-bookmarks");
        assert_eq!(config.share.title, "Red Cross Training Course");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config.endpoint(), "courses.json");
        assert_eq!(config.storage_key(), "redcross-bookmarks");
        assert_eq!(config.request_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COURSE_CATALOG_TEST_URL", "https://courses.example.net/data.csv");

        let toml_content = r#"
[source]
endpoint = "${COURSE_CATALOG_TEST_URL}"
"#;

        let config = CatalogConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.endpoint, "https://courses.example.net/data.csv");

        std::env::remove_var("COURSE_CATALOG_TEST_URL");
    }

    #[test]
    fn test_config_validation() {
        let config = CatalogConfig::from_toml_str(
            r#"
[source]
endpoint = "ftp://example.org/courses.json"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = CatalogConfig::from_toml_str(
            r#"
[source]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = CatalogConfig::from_toml_str(
            r#"
[source]
format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_settings_are_missing() {
        let config = CatalogConfig::from_toml_str("[storage]\nkey = \"\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(CatalogError::MissingConfigError { field }) if field == "storage.key"
        ));

        let config = CatalogConfig::from_toml_str("[source]\nendpoint = \" \"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(CatalogError::MissingConfigError { field }) if field == "source.endpoint"
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = CatalogConfig::from_toml_str("[source\nendpoint = ").unwrap_err();
        assert_eq!(
            err.category(),
            crate::utils::error::ErrorCategory::Configuration
        );
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\npath = \"bookmarks.json\"\n")
            .unwrap();

        let config = CatalogConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bookmark_path(), "bookmarks.json");
    }
}
