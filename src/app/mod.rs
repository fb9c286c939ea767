//! 命令執行器
//!
//! 將設定轉為實際的工作流程、伺服器或驗證呼叫，讓 main 保持精簡。

pub mod check;
pub mod verify;

use crate::adapters::LocalStorage;
use crate::api;
use crate::config::AppConfig;
use crate::core::engine::{AnalysisOutcome, AnalyticsEngine, OutputFiles};
use crate::core::orchestrator::Orchestrator;
use crate::report::ReportWriter;
use crate::utils::error::Result;
use crate::utils::format::thousands;
use rand::rngs::StdRng;
use rand::SeedableRng;
use verify::{render_comparison_table, values_vary, Verifier, VerifyMode};

/// 驗證命令的輸出檔案
#[derive(Debug, Clone, Default)]
pub struct VerifyOutcome {
    pub samples_path: Option<String>,
    pub comparison_path: Option<String>,
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn storage(&self) -> LocalStorage {
        LocalStorage::new(self.config.report.output_path.clone())
    }

    /// 執行四代理分析並寫出報告
    pub async fn run_analyze(&self) -> Result<AnalysisOutcome> {
        let workflow = &self.config.workflow;
        let orchestrator = Orchestrator::standard(
            self.config.workflow_settings(),
            make_rng(workflow.seed),
            workflow.days_back,
            workflow.profile,
        )
        .with_monitoring(workflow.monitor);

        tracing::info!(
            "📊 Agents created: {:?} (profile: {:?})",
            orchestrator.agent_keys(),
            workflow.profile
        );

        let files = OutputFiles {
            html_file: self.config.report.html_file.clone(),
            results_file: self.config.report.results_file.clone(),
        };
        let engine = AnalyticsEngine::new(orchestrator, self.storage(), files);
        let outcome = engine.run().await?;

        let meta = &outcome.results.workflow_metadata;
        println!("{}", "=".repeat(70));
        println!("🏆 ANALYSIS SUMMARY");
        println!("{}", "=".repeat(70));
        println!("✅ Agents: {}", meta.agents_orchestrated.join(", "));
        println!("✅ Model: {}", meta.model_used);
        println!("✅ Execution Time: {:.2} seconds", meta.execution_time_seconds);
        println!(
            "✅ Revenue Analyzed: ${}",
            thousands(outcome.results.performance_metrics.total_revenue_analyzed)
        );
        println!(
            "✅ Business Impact: {} revenue increase",
            outcome.results.pricing_strategy.total_expected_revenue_impact
        );
        println!("📁 Report: {}", outcome.html_path);
        if let Some(json_path) = &outcome.json_path {
            println!("📁 Results: {}", json_path);
        }

        Ok(outcome)
    }

    pub async fn run_serve(&self) -> Result<()> {
        api::serve(&self.config.server.host, self.config.server.port).await
    }

    /// 執行資料變異驗證
    pub async fn run_verify(&self, mode: VerifyMode, export_csv: bool) -> Result<VerifyOutcome> {
        let mut verifier = Verifier::new(make_rng(self.config.workflow.seed), &self.config.verify);
        let mut outcome = VerifyOutcome::default();
        let writer = ReportWriter::new(self.storage());

        let show_full = matches!(mode, VerifyMode::Full | VerifyMode::All);
        let export = matches!(mode, VerifyMode::Export | VerifyMode::All);

        let mut rows = Vec::new();
        if show_full {
            println!("🔍 PROVING REAL DATA GENERATION (Not Hard-Coded)");
            println!("{}", "=".repeat(65));
            let runs = verifier.demonstrate_variation(self.config.verify.runs).await;
            for run in &runs {
                println!("{}", run.describe());
            }
            rows = runs.iter().map(|r| r.comparison_row()).collect::<Vec<_>>();
            println!("{}", render_comparison_table(&rows));
            if values_vary(&rows) {
                println!("✅ PROOF: Each run generates different values!");
            } else {
                tracing::warn!("⚠️ Runs produced identical sales totals");
            }
        }

        if mode == VerifyMode::Quick {
            println!("🚀 QUICK DEMO - Dynamic Data Generation");
            for draw in verifier.quick_demo(self.config.verify.runs).await {
                println!("{}", draw.describe());
            }
            println!("✅ Different values each time");
        }

        if export {
            println!("📁 Generating sample data file...");
            let samples = verifier.collect_samples(self.config.verify.samples).await;
            let path = writer
                .write_samples(&samples, &self.config.report.samples_file)
                .await?;
            println!("✅ Exported {} data samples to '{}'", samples.len(), path);
            outcome.samples_path = Some(path);
        }

        if export_csv {
            if rows.is_empty() {
                rows = verifier
                    .demonstrate_variation(self.config.verify.runs)
                    .await
                    .iter()
                    .map(|r| r.comparison_row())
                    .collect();
            }
            let path = writer
                .write_comparison_csv(&rows, &self.config.report.comparison_file)
                .await?;
            println!("✅ Comparison table saved to '{}'", path);
            outcome.comparison_path = Some(path);
        }

        Ok(outcome)
    }

    pub fn run_check(&self) -> Result<()> {
        println!("{}", "=".repeat(50));
        println!("AGENT SETUP CHECK");
        println!("{}", "=".repeat(50));

        let report = check::run_setup_check(self.config.workflow_settings())?;

        for agent in &report.agents {
            println!("✅ {} created ({})", agent.name, agent.model);
        }
        println!(
            "✅ Tool function works: ${} across {} transactions",
            thousands(report.tool_output.total_sales),
            thousands(report.tool_output.transactions as u64)
        );
        println!("🎉 SUCCESS! Ready to run the multi-agent workflow");
        Ok(())
    }
}
