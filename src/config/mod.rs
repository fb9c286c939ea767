#[cfg(feature = "cli")]
pub mod cli;

use crate::core::generators::GeneratorProfile;
use crate::core::orchestrator::WorkflowSettings;
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::validation::{
    validate_file_name, validate_host, validate_non_empty_string, validate_path,
    validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub workflow: WorkflowConfig,
    pub report: ReportConfig,
    pub server: ServerConfig,
    pub verify: VerifyConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub model: String,
    pub framework_version: String,
    pub days_back: usize,
    pub profile: GeneratorProfile,
    pub seed: Option<u64>,
    pub monitor: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let settings = WorkflowSettings::default();
        Self {
            model: settings.model,
            framework_version: settings.framework_version,
            days_back: 30,
            profile: GeneratorProfile::Standard,
            seed: None,
            monitor: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: String,
    pub html_file: String,
    pub results_file: Option<String>,
    pub samples_file: String,
    pub comparison_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            html_file: "adk_ecommerce_demo.html".to_string(),
            results_file: None,
            samples_file: "adk_data_samples.json".to_string(),
            comparison_file: "adk_data_comparison.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    pub runs: usize,
    pub samples: usize,
    pub run_delay_ms: u64,
    pub quick_delay_ms: u64,
    pub sample_delay_ms: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            runs: 3,
            samples: 5,
            run_delay_ms: 1000,
            quick_delay_ms: 500,
            sample_delay_ms: 100,
        }
    }
}

impl VerifyConfig {
    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.run_delay_ms)
    }

    pub fn quick_delay(&self) -> Duration {
        Duration::from_millis(self.quick_delay_ms)
    }

    pub fn sample_delay(&self) -> Duration {
        Duration::from_millis(self.sample_delay_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbose: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalyticsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn workflow_settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            model: self.workflow.model.clone(),
            framework_version: self.workflow.framework_version.clone(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的變數保持原樣
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
        AnalyticsError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        }
    })?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.to_string())
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("workflow.model", &self.workflow.model)?;
        validate_non_empty_string("workflow.framework_version", &self.workflow.framework_version)?;
        validate_range("workflow.days_back", self.workflow.days_back, 0, 365)?;

        validate_path("report.output_path", &self.report.output_path)?;
        validate_file_name("report.html_file", &self.report.html_file)?;
        if let Some(results_file) = &self.report.results_file {
            validate_file_name("report.results_file", results_file)?;
        }
        validate_file_name("report.samples_file", &self.report.samples_file)?;
        validate_file_name("report.comparison_file", &self.report.comparison_file)?;

        validate_host("server.host", &self.server.host)?;
        validate_positive_number("server.port", self.server.port as usize, 1)?;

        validate_positive_number("verify.runs", self.verify.runs, 1)?;
        validate_positive_number("verify.samples", self.verify.samples, 1)?;

        Ok(())
    }
}
