//! 資料產生器
//!
//! 四個代理背後的純函式。所有隨機值皆由呼叫端傳入的 `Rng` 產生，
//! 測試可以使用固定種子取得可重現的結果。

use crate::domain::model::{
    BusinessInsights, BusinessMetrics, CustomerInsights, CustomerSegment, Level, LiveCustomers,
    LiveSales, PricingAction, PricingRecommendation, PricingStrategy, SalesData, Segments,
};
use crate::utils::format::{round2, thousands};
use chrono::Local;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const TOTAL_SALES_RANGE: RangeInclusive<u64> = 50_000..=100_000;
pub const TRANSACTIONS_RANGE: RangeInclusive<u32> = 800..=1_500;
pub const DAILY_SALES_RANGE: RangeInclusive<u32> = 1_500..=3_500;
pub const RUN_ID_RANGE: RangeInclusive<u32> = 1_000..=9_999;
pub const REQUEST_ID_RANGE: RangeInclusive<u32> = 10_000..=99_999;

pub const TOP_CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Books", "Home"];

/// 產生器參數組合
///
/// `Standard` 為分析報告使用的固定參數；`Varied` 在每個參數上加入抖動，
/// 用於展示每次執行的數值差異。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum GeneratorProfile {
    #[default]
    Standard,
    Varied,
}

struct SegmentPlan {
    share: (f64, f64),
    nominal_value: f64,
    avg_value: (u32, u32),
    retention: (u32, u32),
    characteristics: &'static str,
}

struct PricingPlan {
    low_aov_threshold: f64,
    premium_threshold: u64,
    premium_increase: (u32, u32),
    premium_impact: (u32, u32),
    luxury_increase: (u32, u32),
    luxury_impact: (u32, u32),
    competitive_cut: (u32, u32),
    competitive_impact: (u32, u32),
    competitive_categories: &'static [&'static str],
    revenue_impact: (u32, u32),
    priorities: &'static [Level],
    risks: &'static [Level],
}

impl GeneratorProfile {
    fn segment_plans(&self) -> [SegmentPlan; 3] {
        match self {
            Self::Standard => [
                SegmentPlan {
                    share: (0.2, 0.2),
                    nominal_value: 150.0,
                    avg_value: (150, 150),
                    retention: (85, 85),
                    characteristics: "frequent_high_value_buyers",
                },
                SegmentPlan {
                    share: (0.6, 0.6),
                    nominal_value: 65.0,
                    avg_value: (65, 65),
                    retention: (70, 70),
                    characteristics: "occasional_buyers",
                },
                SegmentPlan {
                    share: (0.2, 0.2),
                    nominal_value: 25.0,
                    avg_value: (25, 25),
                    retention: (45, 45),
                    characteristics: "price_sensitive",
                },
            ],
            Self::Varied => [
                SegmentPlan {
                    share: (0.15, 0.25),
                    nominal_value: 150.0,
                    avg_value: (140, 160),
                    retention: (80, 90),
                    characteristics: "frequent_high_value_buyers",
                },
                SegmentPlan {
                    share: (0.55, 0.65),
                    nominal_value: 65.0,
                    avg_value: (60, 70),
                    retention: (65, 75),
                    characteristics: "occasional_buyers",
                },
                SegmentPlan {
                    share: (0.15, 0.25),
                    nominal_value: 25.0,
                    avg_value: (20, 30),
                    retention: (40, 50),
                    characteristics: "price_sensitive",
                },
            ],
        }
    }

    /// (churn risk, overall retention)
    fn customer_ranges(&self) -> ((u32, u32), (u32, u32)) {
        match self {
            Self::Standard => ((15, 25), (75, 85)),
            Self::Varied => ((15, 30), (70, 85)),
        }
    }

    fn pricing_plan(&self) -> PricingPlan {
        match self {
            Self::Standard => PricingPlan {
                low_aov_threshold: 50.0,
                premium_threshold: 150,
                premium_increase: (5, 5),
                premium_impact: (2_500, 2_500),
                luxury_increase: (15, 15),
                luxury_impact: (8_000, 8_000),
                competitive_cut: (8, 8),
                competitive_impact: (300, 300),
                competitive_categories: &["Books"],
                revenue_impact: (12, 22),
                priorities: &[Level::High],
                risks: &[Level::Low],
            },
            Self::Varied => PricingPlan {
                low_aov_threshold: 60.0,
                premium_threshold: 120,
                premium_increase: (3, 7),
                premium_impact: (2_000, 4_000),
                luxury_increase: (12, 18),
                luxury_impact: (6_000, 10_000),
                competitive_cut: (5, 10),
                competitive_impact: (200, 400),
                competitive_categories: &["Books", "Clothing", "Home"],
                revenue_impact: (12, 25),
                priorities: &[Level::High, Level::Medium],
                risks: &[Level::Low, Level::Medium],
            },
        }
    }
}

fn draw_u32<R: Rng + ?Sized>(rng: &mut R, (low, high): (u32, u32)) -> u32 {
    if low >= high {
        low
    } else {
        rng.gen_range(low..=high)
    }
}

fn draw_f64<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    if low >= high {
        low
    } else {
        rng.gen_range(low..=high)
    }
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, options: &[T], fallback: T) -> T {
    options.choose(rng).copied().unwrap_or(fallback)
}

/// 平均客單價：總銷售額除以另一次獨立抽樣的交易數，四捨五入至小數兩位
fn average_order_value<R: Rng + ?Sized>(rng: &mut R, total_sales: u64) -> f64 {
    let divisor = rng.gen_range(TRANSACTIONS_RANGE);
    round2(total_sales as f64 / divisor as f64)
}

/// 收集銷售資料
pub fn collect_sales_data<R: Rng + ?Sized>(rng: &mut R, days_back: usize) -> SalesData {
    let total_sales = rng.gen_range(TOTAL_SALES_RANGE);
    let transactions = rng.gen_range(TRANSACTIONS_RANGE);
    let avg_order_value = average_order_value(rng, total_sales);
    let daily_sales = (0..days_back)
        .map(|_| rng.gen_range(DAILY_SALES_RANGE))
        .collect();

    SalesData {
        total_sales,
        transactions,
        avg_order_value,
        top_categories: TOP_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        daily_sales,
        timestamp: Local::now(),
        status: "success".to_string(),
        run_id: rng.gen_range(RUN_ID_RANGE),
    }
}

/// 分析顧客分群
///
/// 每個分群人數為 `floor(sales_total * share / nominal_value)`。
pub fn analyze_customer_segments<R: Rng + ?Sized>(
    rng: &mut R,
    sales_total: u64,
    profile: GeneratorProfile,
) -> CustomerInsights {
    let [premium, regular, budget] = profile
        .segment_plans()
        .map(|plan| build_segment(rng, sales_total, &plan));
    let (churn_range, retention_range) = profile.customer_ranges();

    CustomerInsights {
        segments: Segments {
            premium,
            regular,
            budget,
        },
        churn_risk_percentage: draw_u32(rng, churn_range),
        overall_retention: draw_u32(rng, retention_range),
        insights: vec![
            "Premium customers drive 40% of revenue".to_string(),
            "Budget segment shows high price sensitivity".to_string(),
            "Regular customers have growth potential".to_string(),
        ],
        timestamp: Local::now(),
        run_id: rng.gen_range(RUN_ID_RANGE),
    }
}

fn build_segment<R: Rng + ?Sized>(
    rng: &mut R,
    sales_total: u64,
    plan: &SegmentPlan,
) -> CustomerSegment {
    let share = draw_f64(rng, plan.share);
    let count = (sales_total as f64 * share / plan.nominal_value).floor().max(0.0) as u64;

    CustomerSegment {
        count,
        avg_value: draw_u32(rng, plan.avg_value),
        characteristics: plan.characteristics.to_string(),
        retention_rate: draw_u32(rng, plan.retention),
    }
}

/// 產生定價建議
///
/// 低客單價時建議調漲高價商品；高價客群夠大時建議推出奢華等級；
/// 競爭性定價永遠排在最後。
pub fn generate_pricing_recommendations<R: Rng + ?Sized>(
    rng: &mut R,
    sales: &SalesData,
    customers: &CustomerInsights,
    profile: GeneratorProfile,
) -> PricingStrategy {
    let plan = profile.pricing_plan();
    let mut recommendations = Vec::new();

    if sales.avg_order_value < plan.low_aov_threshold {
        let increase = draw_u32(rng, plan.premium_increase);
        let impact = draw_u32(rng, plan.premium_impact);
        recommendations.push(PricingRecommendation {
            action: PricingAction::IncreasePremiumPrices,
            category: "Electronics".to_string(),
            adjustment: format!("+{}%", increase),
            reason: "Low AOV, premium segment can support increase".to_string(),
            expected_impact: format!("+${} revenue", thousands(impact as u64)),
        });
    }

    if customers.segments.premium.count > plan.premium_threshold {
        let increase = draw_u32(rng, plan.luxury_increase);
        let impact = draw_u32(rng, plan.luxury_impact);
        recommendations.push(PricingRecommendation {
            action: PricingAction::IntroduceLuxuryTier,
            category: "All Categories".to_string(),
            adjustment: format!("+{}%", increase),
            reason: "Strong premium customer base identified".to_string(),
            expected_impact: format!("+${} revenue", thousands(impact as u64)),
        });
    }

    let cut = draw_u32(rng, plan.competitive_cut);
    let impact = draw_u32(rng, plan.competitive_impact);
    recommendations.push(PricingRecommendation {
        action: PricingAction::CompetitivePricing,
        category: pick(rng, plan.competitive_categories, "Books").to_string(),
        adjustment: format!("-{}%", cut),
        reason: "Increase market share in price-sensitive category".to_string(),
        expected_impact: format!("+{} transactions", impact),
    });

    PricingStrategy {
        recommendations,
        total_expected_revenue_impact: format!("+{}%", draw_u32(rng, plan.revenue_impact)),
        implementation_priority: pick(rng, plan.priorities, Level::High),
        risk_assessment: pick(rng, plan.risks, Level::Low),
        timestamp: Local::now(),
    }
}

/// 綜合前三個代理的輸出，產生高階摘要
pub fn generate_business_insights(
    sales: &SalesData,
    customers: &CustomerInsights,
    pricing: &PricingStrategy,
) -> BusinessInsights {
    let revenue_impact = pricing.total_expected_revenue_impact.clone();

    BusinessInsights {
        executive_summary: vec![
            format!("Current monthly revenue: ${}", thousands(sales.total_sales)),
            format!("Potential revenue increase: {}", revenue_impact),
            format!("Customer segments analyzed: {}", customers.segments.len()),
            format!("Pricing recommendations: {}", pricing.recommendations.len()),
        ],
        key_opportunities: vec![
            "Premium customer segment expansion".to_string(),
            "Dynamic pricing implementation".to_string(),
            "Cross-category optimization".to_string(),
            "Retention strategy enhancement".to_string(),
        ],
        recommended_actions: vec![
            "Implement tiered pricing strategy".to_string(),
            "Launch premium customer loyalty program".to_string(),
            "Optimize inventory for high-margin products".to_string(),
            "Develop personalized marketing campaigns".to_string(),
        ],
        business_metrics: BusinessMetrics {
            projected_revenue_increase: revenue_impact,
            customer_retention_improvement: "+12%".to_string(),
            inventory_optimization: "+25%".to_string(),
            pricing_efficiency: "+18%".to_string(),
        },
        timestamp: Local::now(),
    }
}

/// 即時 API 使用的精簡銷售資料
pub fn live_sales<R: Rng + ?Sized>(rng: &mut R) -> LiveSales {
    let total_sales = rng.gen_range(TOTAL_SALES_RANGE);
    let transactions = rng.gen_range(TRANSACTIONS_RANGE);
    let avg_order_value = average_order_value(rng, total_sales);

    LiveSales {
        total_sales,
        transactions,
        avg_order_value,
        timestamp: Local::now(),
        request_id: rng.gen_range(REQUEST_ID_RANGE),
    }
}

/// 即時 API 使用的精簡顧客摘要
pub fn live_customers<R: Rng + ?Sized>(rng: &mut R, sales_total: u64) -> LiveCustomers {
    let share = rng.gen_range(0.15..=0.25);

    LiveCustomers {
        premium_count: (sales_total as f64 * share / 150.0).floor() as u64,
        retention_rate: rng.gen_range(70..=85),
        churn_risk: rng.gen_range(15..=30),
        timestamp: Local::now(),
        request_id: rng.gen_range(REQUEST_ID_RANGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn sales_with(total_sales: u64, avg_order_value: f64) -> SalesData {
        let mut sales = collect_sales_data(&mut seeded(), 0);
        sales.total_sales = total_sales;
        sales.avg_order_value = avg_order_value;
        sales
    }

    #[test]
    fn test_sales_data_within_ranges() {
        let mut rng = seeded();
        for _ in 0..200 {
            let sales = collect_sales_data(&mut rng, 30);
            assert!(TOTAL_SALES_RANGE.contains(&sales.total_sales));
            assert!(TRANSACTIONS_RANGE.contains(&sales.transactions));
            assert!(RUN_ID_RANGE.contains(&sales.run_id));
            assert_eq!(sales.daily_sales.len(), 30);
            assert!(sales.daily_sales.iter().all(|d| DAILY_SALES_RANGE.contains(d)));
            // 50000 / 1500 到 100000 / 800
            assert!(sales.avg_order_value >= 33.33 && sales.avg_order_value <= 125.0);
            assert_eq!(sales.top_categories.len(), 4);
            assert_eq!(sales.status, "success");
        }
    }

    #[test]
    fn test_zero_days_back_yields_no_daily_sales() {
        let sales = collect_sales_data(&mut seeded(), 0);
        assert!(sales.daily_sales.is_empty());
    }

    #[test]
    fn test_standard_segments_follow_formula() {
        let insights = analyze_customer_segments(&mut seeded(), 76_010, GeneratorProfile::Standard);

        assert_eq!(insights.segments.premium.count, 101);
        assert_eq!(insights.segments.regular.count, 701);
        assert_eq!(insights.segments.budget.count, 608);
        assert_eq!(insights.segments.total_customers(), 1_410);
        assert_eq!(insights.segments.premium.avg_value, 150);
        assert_eq!(insights.segments.regular.retention_rate, 70);
        assert_eq!(insights.segments.budget.characteristics, "price_sensitive");
        assert!((15..=25).contains(&insights.churn_risk_percentage));
        assert!((75..=85).contains(&insights.overall_retention));
        assert_eq!(insights.insights.len(), 3);
    }

    #[test]
    fn test_varied_segments_within_ranges() {
        let mut rng = seeded();
        for _ in 0..200 {
            let insights = analyze_customer_segments(&mut rng, 100_000, GeneratorProfile::Varied);
            let premium = &insights.segments.premium;
            assert!((99..=166).contains(&premium.count));
            assert!((140..=160).contains(&premium.avg_value));
            assert!((80..=90).contains(&premium.retention_rate));
            assert!((40..=50).contains(&insights.segments.budget.retention_rate));
            assert!((15..=30).contains(&insights.churn_risk_percentage));
            assert!((70..=85).contains(&insights.overall_retention));
        }
    }

    #[test]
    fn test_standard_pricing_rules() {
        let mut rng = seeded();

        // 低客單價，高價客群 133 人未達門檻
        let sales = sales_with(100_000, 45.0);
        let customers = analyze_customer_segments(&mut rng, 100_000, GeneratorProfile::Standard);
        assert_eq!(customers.segments.premium.count, 133);
        let strategy =
            generate_pricing_recommendations(&mut rng, &sales, &customers, GeneratorProfile::Standard);
        let actions: Vec<_> = strategy.recommendations.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![
                PricingAction::IncreasePremiumPrices,
                PricingAction::CompetitivePricing
            ]
        );
        assert_eq!(strategy.recommendations[0].adjustment, "+5%");
        assert_eq!(strategy.recommendations[0].expected_impact, "+$2,500 revenue");
        assert_eq!(strategy.recommendations[1].category, "Books");
        assert_eq!(strategy.recommendations[1].adjustment, "-8%");
        assert_eq!(strategy.implementation_priority, Level::High);
        assert_eq!(strategy.risk_assessment, Level::Low);
    }

    #[test]
    fn test_luxury_tier_requires_large_premium_segment() {
        let mut rng = seeded();
        let sales = sales_with(90_000, 75.0);
        let mut customers = analyze_customer_segments(&mut rng, 90_000, GeneratorProfile::Standard);

        customers.segments.premium.count = 150;
        let strategy =
            generate_pricing_recommendations(&mut rng, &sales, &customers, GeneratorProfile::Standard);
        assert_eq!(strategy.recommendations.len(), 1);

        customers.segments.premium.count = 151;
        let strategy =
            generate_pricing_recommendations(&mut rng, &sales, &customers, GeneratorProfile::Standard);
        assert_eq!(strategy.recommendations.len(), 2);
        assert_eq!(
            strategy.recommendations[0].action,
            PricingAction::IntroduceLuxuryTier
        );
        assert_eq!(strategy.recommendations[0].expected_impact, "+$8,000 revenue");
        assert_eq!(
            strategy.recommendations.last().map(|r| r.action),
            Some(PricingAction::CompetitivePricing)
        );
    }

    #[test]
    fn test_varied_pricing_ranges() {
        let mut rng = seeded();
        for _ in 0..200 {
            let sales = sales_with(100_000, 55.0);
            let customers = analyze_customer_segments(&mut rng, 100_000, GeneratorProfile::Varied);
            let strategy =
                generate_pricing_recommendations(&mut rng, &sales, &customers, GeneratorProfile::Varied);

            let first = &strategy.recommendations[0];
            assert_eq!(first.action, PricingAction::IncreasePremiumPrices);
            let pct: u32 = first.adjustment.trim_matches(|c| c == '+' || c == '%').parse().unwrap();
            assert!((3..=7).contains(&pct));

            let last = strategy.recommendations.last().unwrap();
            assert!(["Books", "Clothing", "Home"].contains(&last.category.as_str()));

            let impact: u32 = strategy
                .total_expected_revenue_impact
                .trim_matches(|c| c == '+' || c == '%')
                .parse()
                .unwrap();
            assert!((12..=25).contains(&impact));
            assert_ne!(strategy.implementation_priority, Level::Low);
            assert_ne!(strategy.risk_assessment, Level::High);
        }
    }

    #[test]
    fn test_business_insights_summarise_inputs() {
        let mut rng = seeded();
        let sales = sales_with(75_000, 62.5);
        let customers = analyze_customer_segments(&mut rng, 75_000, GeneratorProfile::Standard);
        let pricing =
            generate_pricing_recommendations(&mut rng, &sales, &customers, GeneratorProfile::Standard);

        let insights = generate_business_insights(&sales, &customers, &pricing);

        assert_eq!(insights.executive_summary[0], "Current monthly revenue: $75,000");
        assert_eq!(
            insights.executive_summary[1],
            format!("Potential revenue increase: {}", pricing.total_expected_revenue_impact)
        );
        assert_eq!(insights.executive_summary[2], "Customer segments analyzed: 3");
        assert_eq!(
            insights.executive_summary[3],
            format!("Pricing recommendations: {}", pricing.recommendations.len())
        );
        assert_eq!(insights.key_opportunities.len(), 4);
        assert_eq!(insights.recommended_actions.len(), 4);
        assert_eq!(
            insights.business_metrics.projected_revenue_increase,
            pricing.total_expected_revenue_impact
        );
    }

    #[test]
    fn test_live_shapes_within_ranges() {
        let mut rng = seeded();
        for _ in 0..200 {
            let sales = live_sales(&mut rng);
            assert!(TOTAL_SALES_RANGE.contains(&sales.total_sales));
            assert!(REQUEST_ID_RANGE.contains(&sales.request_id));

            let customers = live_customers(&mut rng, sales.total_sales);
            assert!(customers.premium_count <= 166);
            assert!(customers.premium_count >= 49);
            assert!((70..=85).contains(&customers.retention_rate));
            assert!((15..=30).contains(&customers.churn_risk));
        }
    }
}
