use crate::utils::error::{AnalyticsError, Result};
use std::net::IpAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: host.to_string(),
            reason: "Host cannot be empty".to_string(),
        });
    }

    if host == "localhost" || host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    Err(AnalyticsError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: host.to_string(),
        reason: "Host must be an IP address or 'localhost'".to_string(),
    })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檔名不可包含路徑分隔符，避免寫出輸出目錄
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == ".." {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "File name must not contain path separators".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AnalyticsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host() {
        assert!(validate_host("server.host", "0.0.0.0").is_ok());
        assert!(validate_host("server.host", "127.0.0.1").is_ok());
        assert!(validate_host("server.host", "::1").is_ok());
        assert!(validate_host("server.host", "localhost").is_ok());
        assert!(validate_host("server.host", "").is_err());
        assert!(validate_host("server.host", "not a host").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("report.html_file", "demo.html").is_ok());
        assert!(validate_file_name("report.html_file", "../demo.html").is_err());
        assert!(validate_file_name("report.html_file", "").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("workflow.days_back", 30, 0, 365).is_ok());
        assert!(validate_range("workflow.days_back", 400, 0, 365).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("verify.runs", 3, 1).is_ok());
        assert!(validate_positive_number("verify.runs", 0, 1).is_err());
    }
}
