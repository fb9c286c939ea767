use crate::core::generators::{collect_sales_data, GeneratorProfile};
use crate::core::orchestrator::{Orchestrator, WorkflowSettings};
use crate::domain::model::{AgentDescriptor, SalesData};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 環境檢查結果
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub agents: Vec<AgentDescriptor>,
    pub tool_output: SalesData,
}

/// 建立所有代理並直接呼叫資料工具一次，不會連線到任何模型服務
pub fn run_setup_check(settings: WorkflowSettings) -> Result<CheckReport> {
    let orchestrator = Orchestrator::standard(
        settings,
        StdRng::from_entropy(),
        0,
        GeneratorProfile::Standard,
    );

    let agents: Vec<AgentDescriptor> = orchestrator.descriptors().into_iter().cloned().collect();
    for agent in &agents {
        validate_non_empty_string("agent.name", &agent.name)?;
        validate_non_empty_string("agent.model", &agent.model)?;
        validate_non_empty_string("agent.instruction", &agent.instruction)?;
        tracing::info!("✅ Agent ready: {} ({})", agent.name, agent.model);
    }

    let tool_output = collect_sales_data(&mut rand::thread_rng(), 0);
    tracing::info!(
        "✅ Tool function works: total_sales={}, transactions={}",
        tool_output.total_sales,
        tool_output.transactions
    );

    Ok(CheckReport {
        agents,
        tool_output,
    })
}
