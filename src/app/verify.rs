//! 資料變異驗證
//!
//! 重複執行產生器並比較結果，證明每次輸出都不同。

use crate::config::VerifyConfig;
use crate::core::generators::{
    analyze_customer_segments, collect_sales_data, generate_pricing_recommendations,
    GeneratorProfile, TOTAL_SALES_RANGE, TRANSACTIONS_RANGE,
};
use crate::domain::model::{ComparisonRow, CustomerInsights, DataSample, PricingStrategy, SalesData};
use crate::utils::format::thousands;
use chrono::{DateTime, Local};
use rand::Rng;
use std::collections::HashSet;
use std::time::Duration;

/// 驗證時使用一週的每日銷售
pub const VERIFY_DAYS_BACK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum VerifyMode {
    Full,
    Quick,
    Export,
    All,
}

/// 單次完整驗證的輸出
#[derive(Debug, Clone)]
pub struct VariationRun {
    pub run: usize,
    pub generated_at: DateTime<Local>,
    pub sales: SalesData,
    pub customers: CustomerInsights,
    pub pricing: PricingStrategy,
}

impl VariationRun {
    pub fn comparison_row(&self) -> ComparisonRow {
        ComparisonRow {
            run: self.run,
            sales_total: self.sales.total_sales,
            transactions: self.sales.transactions,
            premium_customers: self.customers.segments.premium.count,
            retention: self.customers.overall_retention,
            revenue_impact: self.pricing.total_expected_revenue_impact.clone(),
        }
    }

    pub fn describe(&self) -> String {
        let mut lines = vec![
            format!("🔄 RUN #{} - {}", self.run, self.generated_at.format("%H:%M:%S")),
            "-".repeat(50),
            "📊 Sales Data:".to_string(),
            format!("   💰 Total Sales: ${}", thousands(self.sales.total_sales)),
            format!("   📈 Transactions: {}", thousands(self.sales.transactions as u64)),
            format!("   🛒 Avg Order Value: ${:.2}", self.sales.avg_order_value),
            format!("   🔢 Run ID: {}", self.sales.run_id),
            "👥 Customer Analysis:".to_string(),
            format!("   👑 Premium Customers: {}", self.customers.segments.premium.count),
            format!("   📊 Overall Retention: {}%", self.customers.overall_retention),
            format!("   ⚠️  Churn Risk: {}%", self.customers.churn_risk_percentage),
            format!("   🔢 Run ID: {}", self.customers.run_id),
            "💡 Pricing Strategy:".to_string(),
            format!("   📝 Recommendations: {}", self.pricing.recommendations.len()),
            format!("   💹 Revenue Impact: {}", self.pricing.total_expected_revenue_impact),
            format!("   🎯 Priority: {}", self.pricing.implementation_priority),
            format!("   📊 Risk Level: {}", self.pricing.risk_assessment),
        ];
        lines.push(String::new());
        lines.join("\n")
    }
}

/// 快速展示的獨立抽樣
#[derive(Debug, Clone, PartialEq)]
pub struct QuickDraw {
    pub run: usize,
    pub sales: u64,
    pub transactions: u32,
    pub premium_customers: u32,
    pub retention: u32,
}

impl QuickDraw {
    pub fn describe(&self) -> String {
        format!(
            "▶️  Run #{}:\n   💰 Sales: ${}\n   📊 Transactions: {}\n   👥 Premium Customers: {}\n   📈 Retention: {}%\n   ⏰ Generated: {}\n",
            self.run,
            thousands(self.sales),
            thousands(self.transactions as u64),
            self.premium_customers,
            self.retention,
            Local::now().format("%H:%M:%S"),
        )
    }
}

pub struct Verifier<R: Rng + Send> {
    rng: R,
    run_delay: Duration,
    quick_delay: Duration,
    sample_delay: Duration,
}

impl<R: Rng + Send> Verifier<R> {
    pub fn new(rng: R, config: &VerifyConfig) -> Self {
        Self {
            rng,
            run_delay: config.run_delay(),
            quick_delay: config.quick_delay(),
            sample_delay: config.sample_delay(),
        }
    }

    fn generate(&mut self) -> (SalesData, CustomerInsights, PricingStrategy) {
        let profile = GeneratorProfile::Varied;
        let sales = collect_sales_data(&mut self.rng, VERIFY_DAYS_BACK);
        let customers = analyze_customer_segments(&mut self.rng, sales.total_sales, profile);
        let pricing = generate_pricing_recommendations(&mut self.rng, &sales, &customers, profile);
        (sales, customers, pricing)
    }

    /// 完整展示：每次執行 sales → customers → pricing
    pub async fn demonstrate_variation(&mut self, runs: usize) -> Vec<VariationRun> {
        let mut results = Vec::with_capacity(runs);

        for run in 1..=runs {
            if run > 1 {
                pause(self.run_delay).await;
            }

            let (sales, customers, pricing) = self.generate();
            let result = VariationRun {
                run,
                generated_at: Local::now(),
                sales,
                customers,
                pricing,
            };
            tracing::debug!("Variation run {} generated", run);
            results.push(result);
        }

        results
    }

    /// 快速展示：只抽四個數字
    pub async fn quick_demo(&mut self, runs: usize) -> Vec<QuickDraw> {
        let mut draws = Vec::with_capacity(runs);

        for run in 1..=runs {
            if run > 1 {
                pause(self.quick_delay).await;
            }

            draws.push(QuickDraw {
                run,
                sales: self.rng.gen_range(TOTAL_SALES_RANGE),
                transactions: self.rng.gen_range(TRANSACTIONS_RANGE),
                retention: self.rng.gen_range(70..=85),
                premium_customers: self.rng.gen_range(100..=200),
            });
        }

        draws
    }

    /// 產生匯出用的樣本
    pub async fn collect_samples(&mut self, count: usize) -> Vec<DataSample> {
        let mut samples = Vec::with_capacity(count);

        for index in 0..count {
            if index > 0 {
                pause(self.sample_delay).await;
            }

            let (sales_data, customer_analysis, pricing_strategy) = self.generate();
            samples.push(DataSample {
                sample_id: index + 1,
                generation_timestamp: Local::now(),
                sales_data,
                customer_analysis,
                pricing_strategy,
            });
        }

        samples
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// 比較表
pub fn render_comparison_table(rows: &[ComparisonRow]) -> String {
    let rule = "=".repeat(65);
    let mut lines = vec![
        "📋 COMPARISON TABLE - Proving Data Variation:".to_string(),
        rule.clone(),
        "Run | Sales      | Transactions | Premium | Retention | Revenue Impact".to_string(),
        "-".repeat(65),
    ];

    for row in rows {
        lines.push(format!(
            " {:<2} | ${:<9} | {:<12} | {:>7} | {:>8}% | {}",
            row.run,
            thousands(row.sales_total),
            thousands(row.transactions as u64),
            row.premium_customers,
            row.retention,
            row.revenue_impact,
        ));
    }

    lines.push(rule);
    lines.join("\n")
}

/// 至少兩次執行的銷售總額不同，才算有變異
pub fn values_vary(rows: &[ComparisonRow]) -> bool {
    let distinct: HashSet<u64> = rows.iter().map(|r| r.sales_total).collect();
    rows.len() < 2 || distinct.len() > 1
}
