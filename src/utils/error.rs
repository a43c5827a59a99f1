use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Places service returned status {status}")]
    ProviderStatus {
        status: String,
        message: Option<String>,
    },

    #[error("Geolocation failed: {message}")]
    GeolocationError { message: String },

    #[error("Required page slot '{slot}' is missing")]
    MissingSlot { slot: &'static str },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Provider,
    Geolocation,
    Page,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FinderError::ApiError(_) => ErrorCategory::Network,
            FinderError::ProviderStatus { .. } => ErrorCategory::Provider,
            FinderError::GeolocationError { .. } => ErrorCategory::Geolocation,
            FinderError::MissingSlot { .. } => ErrorCategory::Page,
            FinderError::ConfigError { .. }
            | FinderError::InvalidConfigValueError { .. }
            | FinderError::MissingConfigError { .. }
            | FinderError::ValidationError { .. }
            | FinderError::UrlError(_) => ErrorCategory::Configuration,
            FinderError::IoError(_)
            | FinderError::SerializationError(_)
            | FinderError::CsvError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Geolocation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Page => ErrorSeverity::Critical,
        }
    }

    /// Whether the user can simply try the same action again.
    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FinderError::ApiError(_) => "Could not reach the places service".to_string(),
            FinderError::ProviderStatus { status, .. } => format!("Search failed: {}", status),
            FinderError::GeolocationError { .. } => {
                "Geolocation failed. Using default location.".to_string()
            }
            FinderError::MissingSlot { slot } => {
                format!("The page is missing its '{}' element", slot)
            }
            FinderError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            FinderError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and try again",
            ErrorCategory::Provider => {
                "Check the API key and that the Places API is enabled, then retry"
            }
            ErrorCategory::Geolocation => "Pass --lat and --lng or search by text instead",
            ErrorCategory::Page => "Supply every slot the selected page mode requires",
            ErrorCategory::Configuration => "Review the configuration file and CLI flags",
            ErrorCategory::Output => "Check the output format and that stdout is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
