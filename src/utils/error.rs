use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data source error: {message}")]
    SourceError { message: String },

    #[error("Storage error for key '{key}': {message}")]
    StorageError { key: String, message: String },

    #[error("Share failed: {message}")]
    ShareError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程式結束碼，錯誤一定不是 0
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 3,
            ErrorSeverity::Critical => 4,
        }
    }
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::HttpError(_) | CatalogError::SourceError { .. } => ErrorCategory::Network,
            CatalogError::CsvError(_) | CatalogError::SerializationError(_) => ErrorCategory::Data,
            CatalogError::IoError(_) | CatalogError::StorageError { .. } => ErrorCategory::Storage,
            CatalogError::TomlError(_)
            | CatalogError::ConfigError { .. }
            | CatalogError::MissingConfigError { .. }
            | CatalogError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CatalogError::ShareError { .. } => ErrorCategory::Platform,
        }
    }

    /// 資料來源與分享失敗都有後備路徑，只有配置錯誤會中止程式
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Data | ErrorCategory::Platform => {
                ErrorSeverity::Low
            }
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::HttpError(_) | CatalogError::SourceError { .. } => {
                "Could not reach the course data source".to_string()
            }
            CatalogError::CsvError(_) | CatalogError::SerializationError(_) => {
                "The course data could not be read".to_string()
            }
            CatalogError::IoError(e) => format!("File access failed: {}", e),
            CatalogError::StorageError { key, .. } => {
                format!("Bookmarks could not be saved (key '{}')", key)
            }
            CatalogError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            CatalogError::ConfigError { message } => format!("Configuration problem: {}", message),
            CatalogError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            CatalogError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            CatalogError::ShareError { .. } => "Sharing is not available".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the endpoint URL; the embedded catalog is used meanwhile",
            ErrorCategory::Data => "Check that the data document is a JSON array or a CSV with a header row",
            ErrorCategory::Storage => "Check that the bookmark file location is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags and retry",
            ErrorCategory::Platform => "Copy the course name manually",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
