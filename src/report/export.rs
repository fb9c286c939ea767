use crate::domain::model::{ComparisonRow, DataSample, WorkflowResults};
use crate::domain::ports::Storage;
use crate::report::html::render_html;
use crate::utils::error::Result;

/// 將報告寫入儲存體
pub struct ReportWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> ReportWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 寫出 HTML 報告，回傳檔案位置
    pub async fn write_html(&self, results: &WorkflowResults, file_name: &str) -> Result<String> {
        let html = render_html(results);
        self.storage.write_file(file_name, html.as_bytes()).await?;
        Ok(self.storage.location(file_name))
    }

    pub async fn write_results_json(
        &self,
        results: &WorkflowResults,
        file_name: &str,
    ) -> Result<String> {
        let json = serde_json::to_string_pretty(results)?;
        self.storage.write_file(file_name, json.as_bytes()).await?;
        Ok(self.storage.location(file_name))
    }

    pub async fn write_samples(&self, samples: &[DataSample], file_name: &str) -> Result<String> {
        let json = serde_json::to_string_pretty(samples)?;
        self.storage.write_file(file_name, json.as_bytes()).await?;
        Ok(self.storage.location(file_name))
    }

    pub async fn write_comparison_csv(
        &self,
        rows: &[ComparisonRow],
        file_name: &str,
    ) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        self.storage.write_file(file_name, &data).await?;
        Ok(self.storage.location(file_name))
    }
}
