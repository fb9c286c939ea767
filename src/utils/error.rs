use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Agent '{agent}' requires output from '{requires}' which has not run")]
    MissingUpstream { agent: String, requires: String },

    #[error("Agent '{agent}' failed: {details}")]
    AgentFailed { agent: String, details: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

/// 錯誤分類，用於日誌與退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Workflow,
    Storage,
    Network,
}

/// 錯誤嚴重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalyticsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::MissingUpstream { .. } | Self::AgentFailed { .. } => ErrorCategory::Workflow,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::Storage
            }
            Self::ServerError { .. } => ErrorCategory::Network,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            Self::MissingUpstream { .. } | Self::AgentFailed { .. } => ErrorSeverity::High,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorSeverity::Medium,
            Self::IoError(_) | Self::ServerError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the TOML config file and command line flags for invalid values"
            }
            ErrorCategory::Workflow => "Re-run the analysis; agents must execute in order",
            ErrorCategory::Storage => "Make sure the output directory exists and is writable",
            ErrorCategory::Network => "Make sure the port is free and the host address is valid",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem ({}): {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::MissingUpstream { agent, requires } => {
                format!("{} could not run before {}", agent, requires)
            }
            Self::AgentFailed { agent, .. } => format!("The {} agent did not complete", agent),
            other => other.to_string(),
        }
    }

    /// 根據嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
