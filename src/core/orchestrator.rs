use crate::domain::model::{
    AgentDescriptor, AgentMessage, BusinessInsights, CustomerInsights, PerformanceMetrics,
    PricingStrategy, SalesData, WorkflowMetadata, WorkflowResults,
};
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::monitor::WorkflowMonitor;
use chrono::{DateTime, Local};
use std::time::Instant;

/// 工作流程上下文，用於在代理之間傳遞輸出
#[derive(Debug, Clone)]
pub struct WorkflowContext {
    pub workflow_id: String,
    pub sales: Option<SalesData>,
    pub customers: Option<CustomerInsights>,
    pub pricing: Option<PricingStrategy>,
    pub insights: Option<BusinessInsights>,
    communication_log: Vec<AgentMessage>,
}

impl WorkflowContext {
    pub fn new(workflow_id: String) -> Self {
        Self {
            workflow_id,
            sales: None,
            customers: None,
            pricing: None,
            insights: None,
            communication_log: Vec::new(),
        }
    }

    pub fn require_sales(&self, agent: &str) -> Result<&SalesData> {
        self.sales.as_ref().ok_or_else(|| missing(agent, "data"))
    }

    pub fn require_customers(&self, agent: &str) -> Result<&CustomerInsights> {
        self.customers.as_ref().ok_or_else(|| missing(agent, "behavior"))
    }

    pub fn require_pricing(&self, agent: &str) -> Result<&PricingStrategy> {
        self.pricing.as_ref().ok_or_else(|| missing(agent, "pricing"))
    }

    pub fn require_insights(&self, agent: &str) -> Result<&BusinessInsights> {
        self.insights.as_ref().ok_or_else(|| missing(agent, "insights"))
    }

    /// 記錄一次代理交接
    pub fn record(&mut self, agent: &str, summary: String, duration_ms: u64) {
        let step = self.communication_log.len() + 1;
        self.communication_log.push(AgentMessage {
            step,
            agent: agent.to_string(),
            summary,
            duration_ms,
        });
    }

    pub fn communication_log(&self) -> &[AgentMessage] {
        &self.communication_log
    }
}

fn missing(agent: &str, requires: &str) -> AnalyticsError {
    AnalyticsError::MissingUpstream {
        agent: agent.to_string(),
        requires: requires.to_string(),
    }
}

/// 分析代理介面
#[async_trait::async_trait]
pub trait AnalyticsAgent: Send + Sync {
    fn descriptor(&self) -> &AgentDescriptor;

    /// 讀取上游輸出、寫入自己的輸出，回傳一行摘要
    async fn execute(&self, context: &mut WorkflowContext) -> Result<String>;

    fn key(&self) -> &str {
        &self.descriptor().key
    }
}

/// 工作流程中繼資料設定
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub model: String,
    pub framework_version: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            framework_version: "1.4.2".to_string(),
        }
    }
}

/// 多代理協調器，依註冊順序逐一執行代理
pub struct Orchestrator {
    agents: Vec<Box<dyn AnalyticsAgent>>,
    settings: WorkflowSettings,
    monitor: Option<WorkflowMonitor>,
}

impl Orchestrator {
    pub fn new(settings: WorkflowSettings) -> Self {
        Self {
            agents: Vec::new(),
            settings,
            monitor: None,
        }
    }

    /// 啟用或禁用資源監控
    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor = enabled.then(|| WorkflowMonitor::new(true));
        self
    }

    pub fn add_agent(&mut self, agent: Box<dyn AnalyticsAgent>) {
        tracing::debug!("Registered agent: {}", agent.descriptor().name);
        self.agents.push(agent);
    }

    pub fn agent_keys(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.key().to_string()).collect()
    }

    pub fn descriptors(&self) -> Vec<&AgentDescriptor> {
        self.agents.iter().map(|a| a.descriptor()).collect()
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    /// 執行完整的分析流程
    ///
    /// 任一代理失敗即中止，錯誤包裝為 `AgentFailed`。
    pub async fn execute_analysis_workflow(&self) -> Result<WorkflowResults> {
        let started_at = Local::now();
        let clock = Instant::now();
        let mut context = WorkflowContext::new(workflow_id(&started_at));

        tracing::info!(
            workflow_id = %context.workflow_id,
            "🚀 Starting multi-agent analysis with {} agents",
            self.agents.len()
        );
        self.log_resources("workflow started");

        for (index, agent) in self.agents.iter().enumerate() {
            let step_clock = Instant::now();
            let name = agent.descriptor().name.clone();
            tracing::info!("▶️ Step {}: {}", index + 1, name);

            match agent.execute(&mut context).await {
                Ok(summary) => {
                    let duration_ms = step_clock.elapsed().as_millis() as u64;
                    tracing::info!("   ✓ {} ({} ms)", summary, duration_ms);
                    context.record(agent.key(), summary, duration_ms);
                    self.log_resources(agent.key());
                }
                Err(e) => {
                    tracing::error!("❌ Agent {} failed: {}", name, e);
                    return Err(AnalyticsError::AgentFailed {
                        agent: agent.key().to_string(),
                        details: e.to_string(),
                    });
                }
            }
        }

        let execution_time_seconds = clock.elapsed().as_secs_f64();
        let results = self.compile_results(&context, execution_time_seconds)?;

        tracing::info!(
            "✅ Workflow completed in {:.2}s, business impact {}",
            execution_time_seconds,
            results.pricing_strategy.total_expected_revenue_impact
        );

        Ok(results)
    }

    fn compile_results(
        &self,
        context: &WorkflowContext,
        execution_time_seconds: f64,
    ) -> Result<WorkflowResults> {
        let sales = context.require_sales("orchestrator")?;
        let customers = context.require_customers("orchestrator")?;
        let pricing = context.require_pricing("orchestrator")?;
        let insights = context.require_insights("orchestrator")?;

        let performance_metrics = PerformanceMetrics {
            total_revenue_analyzed: sales.total_sales,
            customers_segmented: customers.segments.total_customers(),
            pricing_recommendations: pricing.recommendations.len(),
            business_opportunities: insights.key_opportunities.len(),
        };

        Ok(WorkflowResults {
            workflow_metadata: WorkflowMetadata {
                workflow_id: context.workflow_id.clone(),
                execution_time_seconds,
                agents_orchestrated: self.agent_keys(),
                adk_version: self.settings.framework_version.clone(),
                model_used: self.settings.model.clone(),
            },
            sales_analysis: sales.clone(),
            customer_intelligence: customers.clone(),
            pricing_strategy: pricing.clone(),
            business_insights: insights.clone(),
            performance_metrics,
            communication_log: context.communication_log().to_vec(),
        })
    }

    fn log_resources(&self, phase: &str) {
        if let Some(monitor) = &self.monitor {
            monitor.log_phase(phase);
        }
    }
}

pub fn workflow_id(started_at: &DateTime<Local>) -> String {
    format!("adk_analysis_{}", started_at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingAgent {
        descriptor: AgentDescriptor,
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl RecordingAgent {
        fn new(key: &str, calls: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                descriptor: AgentDescriptor {
                    key: key.to_string(),
                    name: format!("{}Agent", key),
                    model: "test-model".to_string(),
                    instruction: "test".to_string(),
                },
                calls,
                fail: false,
            }
        }

        fn failing(mut self) -> Self {
            self.fail = true;
            self
        }
    }

    #[async_trait::async_trait]
    impl AnalyticsAgent for RecordingAgent {
        fn descriptor(&self) -> &AgentDescriptor {
            &self.descriptor
        }

        async fn execute(&self, _context: &mut WorkflowContext) -> Result<String> {
            self.calls.lock().unwrap().push(self.descriptor.key.clone());
            if self.fail {
                return Err(AnalyticsError::MissingUpstream {
                    agent: self.descriptor.key.clone(),
                    requires: "data".to_string(),
                });
            }
            Ok(format!("{} done", self.descriptor.key))
        }
    }

    #[test]
    fn test_workflow_id_format() {
        let ts = chrono::NaiveDate::from_ymd_opt(2025, 6, 20)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        assert_eq!(workflow_id(&ts), "adk_analysis_20250620_090503");
    }

    #[test]
    fn test_context_requires_upstream() {
        let context = WorkflowContext::new("wf".to_string());
        let err = context.require_sales("behavior").unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::MissingUpstream { ref agent, ref requires }
                if agent == "behavior" && requires == "data"
        ));
    }

    #[test]
    fn test_context_records_steps_in_order() {
        let mut context = WorkflowContext::new("wf".to_string());
        context.record("data", "collected".to_string(), 3);
        context.record("behavior", "segmented".to_string(), 1);

        let log = context.communication_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].step, 1);
        assert_eq!(log[1].agent, "behavior");
    }

    #[tokio::test]
    async fn test_failure_stops_workflow() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = Orchestrator::new(WorkflowSettings::default());
        orchestrator.add_agent(Box::new(RecordingAgent::new("first", calls.clone())));
        orchestrator.add_agent(Box::new(
            RecordingAgent::new("second", calls.clone()).failing(),
        ));
        orchestrator.add_agent(Box::new(RecordingAgent::new("third", calls.clone())));

        let err = orchestrator.execute_analysis_workflow().await.unwrap_err();

        assert!(matches!(err, AnalyticsError::AgentFailed { ref agent, .. } if agent == "second"));
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_missing_outputs_fail_compilation() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut orchestrator = Orchestrator::new(WorkflowSettings::default());
        orchestrator.add_agent(Box::new(RecordingAgent::new("only", calls.clone())));

        let err = orchestrator.execute_analysis_workflow().await.unwrap_err();

        assert!(matches!(err, AnalyticsError::MissingUpstream { .. }));
        assert_eq!(orchestrator.agent_keys(), vec!["only"]);
    }
}
