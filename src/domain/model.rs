use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// 銷售資料（資料收集代理的輸出）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesData {
    pub total_sales: u64,
    pub transactions: u32,
    pub avg_order_value: f64,
    pub top_categories: Vec<String>,
    pub daily_sales: Vec<u32>,
    pub timestamp: DateTime<Local>,
    pub status: String,
    pub run_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub count: u64,
    pub avg_value: u32,
    pub characteristics: String,
    pub retention_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segments {
    pub premium: CustomerSegment,
    pub regular: CustomerSegment,
    pub budget: CustomerSegment,
}

impl Segments {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CustomerSegment)> {
        [
            ("premium", &self.premium),
            ("regular", &self.regular),
            ("budget", &self.budget),
        ]
        .into_iter()
    }

    pub fn len(&self) -> usize {
        3
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn total_customers(&self) -> u64 {
        self.iter().map(|(_, segment)| segment.count).sum()
    }
}

/// 顧客行為分析結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInsights {
    pub segments: Segments,
    pub churn_risk_percentage: u32,
    pub overall_retention: u32,
    pub insights: Vec<String>,
    pub timestamp: DateTime<Local>,
    pub run_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingAction {
    IncreasePremiumPrices,
    IntroduceLuxuryTier,
    CompetitivePricing,
}

impl PricingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncreasePremiumPrices => "increase_premium_prices",
            Self::IntroduceLuxuryTier => "introduce_luxury_tier",
            Self::CompetitivePricing => "competitive_pricing",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRecommendation {
    pub action: PricingAction,
    pub category: String,
    pub adjustment: String,
    pub reason: String,
    pub expected_impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(label)
    }
}

/// 定價策略代理的輸出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingStrategy {
    pub recommendations: Vec<PricingRecommendation>,
    pub total_expected_revenue_impact: String,
    pub implementation_priority: Level,
    pub risk_assessment: Level,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessMetrics {
    pub projected_revenue_increase: String,
    pub customer_retention_improvement: String,
    pub inventory_optimization: String,
    pub pricing_efficiency: String,
}

impl BusinessMetrics {
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("projected_revenue_increase", &self.projected_revenue_increase),
            (
                "customer_retention_improvement",
                &self.customer_retention_improvement,
            ),
            ("inventory_optimization", &self.inventory_optimization),
            ("pricing_efficiency", &self.pricing_efficiency),
        ]
    }
}

/// 商業洞察代理的綜合輸出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessInsights {
    pub executive_summary: Vec<String>,
    pub key_opportunities: Vec<String>,
    pub recommended_actions: Vec<String>,
    pub business_metrics: BusinessMetrics,
    pub timestamp: DateTime<Local>,
}

/// 代理的描述資訊，僅供展示，不會呼叫任何模型
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub key: String,
    pub name: String,
    pub model: String,
    pub instruction: String,
}

/// 代理間交接紀錄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub step: usize,
    pub agent: String,
    pub summary: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowMetadata {
    pub workflow_id: String,
    pub execution_time_seconds: f64,
    pub agents_orchestrated: Vec<String>,
    pub adk_version: String,
    pub model_used: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_revenue_analyzed: u64,
    pub customers_segmented: u64,
    pub pricing_recommendations: usize,
    pub business_opportunities: usize,
}

/// 完整工作流程結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResults {
    pub workflow_metadata: WorkflowMetadata,
    pub sales_analysis: SalesData,
    pub customer_intelligence: CustomerInsights,
    pub pricing_strategy: PricingStrategy,
    pub business_insights: BusinessInsights,
    pub performance_metrics: PerformanceMetrics,
    pub communication_log: Vec<AgentMessage>,
}

// 即時 API 的回應格式

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSales {
    pub total_sales: u64,
    pub transactions: u32,
    pub avg_order_value: f64,
    pub timestamp: DateTime<Local>,
    pub request_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveCustomers {
    pub premium_count: u64,
    pub retention_rate: u32,
    pub churn_risk: u32,
    pub timestamp: DateTime<Local>,
    pub request_id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub sales: LiveSales,
    pub customers: LiveCustomers,
    pub generated_at: DateTime<Local>,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub proof: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteHint {
    pub error: String,
    pub demo: String,
}

// 資料驗證腳本的輸出

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSample {
    pub sample_id: usize,
    pub generation_timestamp: DateTime<Local>,
    pub sales_data: SalesData,
    pub customer_analysis: CustomerInsights,
    pub pricing_strategy: PricingStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub run: usize,
    pub sales_total: u64,
    pub transactions: u32,
    pub premium_customers: u64,
    pub retention: u32,
    pub revenue_impact: String,
}
