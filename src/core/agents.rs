//! 四個專職分析代理
//!
//! 每個代理包裝一個資料產生器，從 `WorkflowContext` 讀取上游輸出，
//! 並把自己的輸出寫回上下文。

use crate::core::generators::{
    analyze_customer_segments, collect_sales_data, generate_business_insights,
    generate_pricing_recommendations, GeneratorProfile,
};
use crate::core::orchestrator::{AnalyticsAgent, Orchestrator, WorkflowContext, WorkflowSettings};
use crate::domain::model::AgentDescriptor;
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::format::thousands;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};

/// 代理之間共用的亂數來源
pub type SharedRng = Arc<Mutex<StdRng>>;

pub fn shared_rng(rng: StdRng) -> SharedRng {
    Arc::new(Mutex::new(rng))
}

fn with_rng<T>(rng: &SharedRng, agent: &str, f: impl FnOnce(&mut StdRng) -> T) -> Result<T> {
    let mut guard = rng.lock().map_err(|_| AnalyticsError::AgentFailed {
        agent: agent.to_string(),
        details: "random source lock poisoned".to_string(),
    })?;
    Ok(f(&mut guard))
}

fn descriptor(key: &str, name: &str, model: &str, instruction: &str) -> AgentDescriptor {
    AgentDescriptor {
        key: key.to_string(),
        name: name.to_string(),
        model: model.to_string(),
        instruction: instruction.to_string(),
    }
}

pub struct DataCollectionAgent {
    descriptor: AgentDescriptor,
    rng: SharedRng,
    days_back: usize,
}

impl DataCollectionAgent {
    pub fn new(model: &str, rng: SharedRng, days_back: usize) -> Self {
        Self {
            descriptor: descriptor(
                "data",
                "DataCollectionAgent",
                model,
                "You are a data collection specialist for e-commerce analytics. \
                 Gather and prepare sales, transaction, and business data for analysis.",
            ),
            rng,
            days_back,
        }
    }
}

#[async_trait::async_trait]
impl AnalyticsAgent for DataCollectionAgent {
    fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    async fn execute(&self, context: &mut WorkflowContext) -> Result<String> {
        let sales = with_rng(&self.rng, self.key(), |rng| {
            collect_sales_data(rng, self.days_back)
        })?;
        let summary = format!("Sales data collected: ${} revenue", thousands(sales.total_sales));
        context.sales = Some(sales);
        Ok(summary)
    }
}

pub struct CustomerBehaviorAgent {
    descriptor: AgentDescriptor,
    rng: SharedRng,
    profile: GeneratorProfile,
}

impl CustomerBehaviorAgent {
    pub fn new(model: &str, rng: SharedRng, profile: GeneratorProfile) -> Self {
        Self {
            descriptor: descriptor(
                "behavior",
                "CustomerBehaviorAgent",
                model,
                "You are a customer behavior analysis expert. \
                 Identify segments, patterns, retention and lifetime value.",
            ),
            rng,
            profile,
        }
    }
}

#[async_trait::async_trait]
impl AnalyticsAgent for CustomerBehaviorAgent {
    fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    async fn execute(&self, context: &mut WorkflowContext) -> Result<String> {
        let total_sales = context.require_sales(self.key())?.total_sales;
        let customers = with_rng(&self.rng, self.key(), |rng| {
            analyze_customer_segments(rng, total_sales, self.profile)
        })?;
        let summary = format!(
            "Customer segments analyzed: {} segments identified",
            customers.segments.len()
        );
        context.customers = Some(customers);
        Ok(summary)
    }
}

pub struct PricingStrategyAgent {
    descriptor: AgentDescriptor,
    rng: SharedRng,
    profile: GeneratorProfile,
}

impl PricingStrategyAgent {
    pub fn new(model: &str, rng: SharedRng, profile: GeneratorProfile) -> Self {
        Self {
            descriptor: descriptor(
                "pricing",
                "PricingStrategyAgent",
                model,
                "You are a dynamic pricing strategist for e-commerce. \
                 Recommend pricing changes with their expected business impact.",
            ),
            rng,
            profile,
        }
    }
}

#[async_trait::async_trait]
impl AnalyticsAgent for PricingStrategyAgent {
    fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    async fn execute(&self, context: &mut WorkflowContext) -> Result<String> {
        let sales = context.require_sales(self.key())?;
        let customers = context.require_customers(self.key())?;
        let pricing = with_rng(&self.rng, self.key(), |rng| {
            generate_pricing_recommendations(rng, sales, customers, self.profile)
        })?;
        let summary = format!(
            "Pricing recommendations generated: {} strategies",
            pricing.recommendations.len()
        );
        context.pricing = Some(pricing);
        Ok(summary)
    }
}

pub struct BusinessInsightsAgent {
    descriptor: AgentDescriptor,
}

impl BusinessInsightsAgent {
    pub fn new(model: &str) -> Self {
        Self {
            descriptor: descriptor(
                "insights",
                "BusinessInsightsAgent",
                model,
                "You are a business intelligence analyst. \
                 Synthesize executive summaries and strategic recommendations.",
            ),
        }
    }
}

#[async_trait::async_trait]
impl AnalyticsAgent for BusinessInsightsAgent {
    fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    async fn execute(&self, context: &mut WorkflowContext) -> Result<String> {
        let insights = generate_business_insights(
            context.require_sales(self.key())?,
            context.require_customers(self.key())?,
            context.require_pricing(self.key())?,
        );
        let summary = format!(
            "Business insights generated: {} action items",
            insights.recommended_actions.len()
        );
        context.insights = Some(insights);
        Ok(summary)
    }
}

impl Orchestrator {
    /// 建立標準的四代理流程：data → behavior → pricing → insights
    pub fn standard(
        settings: WorkflowSettings,
        rng: StdRng,
        days_back: usize,
        profile: GeneratorProfile,
    ) -> Self {
        let rng = shared_rng(rng);
        let model = settings.model.clone();
        let mut orchestrator = Orchestrator::new(settings);

        orchestrator.add_agent(Box::new(DataCollectionAgent::new(
            &model,
            rng.clone(),
            days_back,
        )));
        orchestrator.add_agent(Box::new(CustomerBehaviorAgent::new(
            &model,
            rng.clone(),
            profile,
        )));
        orchestrator.add_agent(Box::new(PricingStrategyAgent::new(&model, rng, profile)));
        orchestrator.add_agent(Box::new(BusinessInsightsAgent::new(&model)));

        orchestrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> SharedRng {
        shared_rng(StdRng::seed_from_u64(42))
    }

    #[tokio::test]
    async fn test_behavior_agent_requires_sales() {
        let agent = CustomerBehaviorAgent::new("m", rng(), GeneratorProfile::Standard);
        let mut context = WorkflowContext::new("wf".to_string());

        let err = agent.execute(&mut context).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::MissingUpstream { .. }));
        assert!(context.customers.is_none());
    }

    #[tokio::test]
    async fn test_agents_chain_through_context() {
        let shared = rng();
        let mut context = WorkflowContext::new("wf".to_string());

        DataCollectionAgent::new("m", shared.clone(), 7)
            .execute(&mut context)
            .await
            .unwrap();
        CustomerBehaviorAgent::new("m", shared.clone(), GeneratorProfile::Standard)
            .execute(&mut context)
            .await
            .unwrap();
        let summary = PricingStrategyAgent::new("m", shared, GeneratorProfile::Standard)
            .execute(&mut context)
            .await
            .unwrap();
        assert!(summary.starts_with("Pricing recommendations generated"));

        BusinessInsightsAgent::new("m")
            .execute(&mut context)
            .await
            .unwrap();

        assert_eq!(context.sales.as_ref().unwrap().daily_sales.len(), 7);
        let insights = context.insights.as_ref().unwrap();
        assert_eq!(
            insights.business_metrics.projected_revenue_increase,
            context.pricing.as_ref().unwrap().total_expected_revenue_impact
        );
    }

    #[test]
    fn test_standard_orchestrator_order() {
        let orchestrator = Orchestrator::standard(
            WorkflowSettings::default(),
            StdRng::seed_from_u64(1),
            30,
            GeneratorProfile::Standard,
        );

        assert_eq!(
            orchestrator.agent_keys(),
            vec!["data", "behavior", "pricing", "insights"]
        );
        assert!(orchestrator
            .descriptors()
            .iter()
            .all(|d| d.model == "gemini-2.0-flash" && !d.instruction.is_empty()));
    }
}
