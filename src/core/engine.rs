use crate::core::orchestrator::Orchestrator;
use crate::core::Storage;
use crate::domain::model::WorkflowResults;
use crate::report::ReportWriter;
use crate::utils::error::Result;

/// 分析輸出檔案設定
#[derive(Debug, Clone)]
pub struct OutputFiles {
    pub html_file: String,
    pub results_file: Option<String>,
}

/// 一次分析的結果與輸出位置
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub results: WorkflowResults,
    pub html_path: String,
    pub json_path: Option<String>,
}

/// 執行代理流程並寫出報告
pub struct AnalyticsEngine<S: Storage> {
    orchestrator: Orchestrator,
    writer: ReportWriter<S>,
    files: OutputFiles,
}

impl<S: Storage> AnalyticsEngine<S> {
    pub fn new(orchestrator: Orchestrator, storage: S, files: OutputFiles) -> Self {
        Self {
            orchestrator,
            writer: ReportWriter::new(storage),
            files,
        }
    }

    pub async fn run(&self) -> Result<AnalysisOutcome> {
        let results = self.orchestrator.execute_analysis_workflow().await?;

        tracing::info!("📝 Rendering HTML report...");
        let html_path = self.writer.write_html(&results, &self.files.html_file).await?;
        tracing::info!("📁 Report saved to: {}", html_path);

        let json_path = match &self.files.results_file {
            Some(file_name) => {
                let path = self.writer.write_results_json(&results, file_name).await?;
                tracing::info!("📁 Results JSON saved to: {}", path);
                Some(path)
            }
            None => None,
        };

        Ok(AnalysisOutcome {
            results,
            html_path,
            json_path,
        })
    }
}
