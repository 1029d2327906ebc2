use thiserror::Error;

#[derive(Error, Debug)]
pub enum FitError {
    #[error("Catalog directory not found: {path}")]
    CatalogNotFound { path: String },

    #[error("Malformed record {file}: {reason}")]
    MalformedRecord { file: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Tag record {file} is not usable: {reason}")]
    InvalidTagRecord { file: String, reason: String },

    #[error("Catalog record already exists: {path}")]
    RecordExists { path: String },

    #[error("Critique text could not be parsed: {message}")]
    CritiqueFormatError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FitError::CatalogNotFound { .. } | FitError::RecordExists { .. } => {
                ErrorCategory::Catalog
            }
            FitError::MalformedRecord { .. }
            | FitError::InvalidTagRecord { .. }
            | FitError::SerializationError(_)
            | FitError::CritiqueFormatError { .. } => ErrorCategory::Data,
            FitError::ConfigError { .. }
            | FitError::ConfigValidationError { .. }
            | FitError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FitError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單筆壞資料只會被略過
            FitError::MalformedRecord { .. } => ErrorSeverity::Low,
            FitError::CritiqueFormatError { .. }
            | FitError::SerializationError(_)
            | FitError::InvalidTagRecord { .. }
            | FitError::RecordExists { .. } => ErrorSeverity::Medium,
            FitError::CatalogNotFound { .. }
            | FitError::ConfigError { .. }
            | FitError::ConfigValidationError { .. }
            | FitError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            FitError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FitError::CatalogNotFound { path } => format!(
                "Create the inventory first: add tagged clothing records to '{}'",
                path
            ),
            FitError::MalformedRecord { file, .. } => {
                format!("Re-tag or fix the JSON in '{}'", file)
            }
            FitError::IoError(_) => "Check file permissions and available disk space".to_string(),
            FitError::SerializationError(_) => "Make sure the input is valid JSON".to_string(),
            FitError::ConfigError { .. } | FitError::ConfigValidationError { .. } => {
                "Make sure the config file exists and is valid TOML".to_string()
            }
            FitError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and try again", field)
            }
            FitError::InvalidTagRecord { file, .. } => {
                format!("Re-run the tagger on the image behind '{}'", file)
            }
            FitError::RecordExists { .. } => {
                "Pick another record name or pass --force to replace it".to_string()
            }
            FitError::CritiqueFormatError { .. } => {
                "Expected 'Style:', 'Rating: <n>/100' and 'Comment:' sections in that order"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FitError::CatalogNotFound { .. } => {
                "Closet directory not found. Please create the inventory first.".to_string()
            }
            FitError::InvalidConfigValueError { field, value, .. } => {
                format!("'{}' is not a valid value for {}", value, field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FitError>;
