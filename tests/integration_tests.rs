use agent_analytics::core::engine::{AnalyticsEngine, OutputFiles};
use agent_analytics::core::generators::GeneratorProfile;
use agent_analytics::core::orchestrator::{Orchestrator, WorkflowSettings};
use agent_analytics::{AppConfig, CommandRunner, LocalStorage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn seeded_orchestrator(seed: u64) -> Orchestrator {
    Orchestrator::standard(
        WorkflowSettings::default(),
        StdRng::seed_from_u64(seed),
        30,
        GeneratorProfile::Standard,
    )
}

#[tokio::test]
async fn test_end_to_end_analysis_writes_report() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path());
    let files = OutputFiles {
        html_file: "adk_ecommerce_demo.html".to_string(),
        results_file: Some("workflow_results.json".to_string()),
    };

    let engine = AnalyticsEngine::new(seeded_orchestrator(11), storage, files);
    let outcome = engine.run().await.unwrap();

    // HTML 報告
    let html_path = temp_dir.path().join("adk_ecommerce_demo.html");
    assert!(html_path.exists());
    assert_eq!(outcome.html_path, html_path.display().to_string());

    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(&outcome.results.workflow_metadata.workflow_id));
    assert!(html.contains("Data Collection Agent"));
    assert!(html.contains("Customer Behavior Agent"));
    assert!(html.contains("Pricing Strategy Agent"));
    assert!(html.contains("Business Intelligence Agent"));
    assert!(html.contains("Projected Revenue Increase"));
    assert!(html.contains("Competitive Pricing"));
    assert!(html.contains("<li>Implement tiered pricing strategy</li>"));

    // JSON 結果
    let json_path = outcome.json_path.as_ref().unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    for key in [
        "workflow_metadata",
        "sales_analysis",
        "customer_intelligence",
        "pricing_strategy",
        "business_insights",
        "performance_metrics",
        "communication_log",
    ] {
        assert!(json.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(
        json["workflow_metadata"]["agents_orchestrated"],
        serde_json::json!(["data", "behavior", "pricing", "insights"])
    );
    assert!(json["customer_intelligence"]["segments"]["premium"]["count"].is_u64());
    assert_eq!(
        json["pricing_strategy"]["recommendations"]
            .as_array()
            .unwrap()
            .last()
            .unwrap()["action"],
        "competitive_pricing"
    );
}

#[tokio::test]
async fn test_performance_metrics_match_outputs() {
    let results = seeded_orchestrator(23)
        .execute_analysis_workflow()
        .await
        .unwrap();

    let metrics = &results.performance_metrics;
    assert_eq!(metrics.total_revenue_analyzed, results.sales_analysis.total_sales);
    assert_eq!(
        metrics.customers_segmented,
        results.customer_intelligence.segments.premium.count
            + results.customer_intelligence.segments.regular.count
            + results.customer_intelligence.segments.budget.count
    );
    assert_eq!(
        metrics.pricing_recommendations,
        results.pricing_strategy.recommendations.len()
    );
    assert_eq!(metrics.business_opportunities, 4);

    assert!(results.workflow_metadata.workflow_id.starts_with("adk_analysis_"));
    assert_eq!(results.workflow_metadata.model_used, "gemini-2.0-flash");
    assert_eq!(results.sales_analysis.daily_sales.len(), 30);

    let steps: Vec<_> = results
        .communication_log
        .iter()
        .map(|m| (m.step, m.agent.as_str()))
        .collect();
    assert_eq!(
        steps,
        vec![(1, "data"), (2, "behavior"), (3, "pricing"), (4, "insights")]
    );
}

#[tokio::test]
async fn test_same_seed_reproduces_figures() {
    let first = seeded_orchestrator(99).execute_analysis_workflow().await.unwrap();
    let second = seeded_orchestrator(99).execute_analysis_workflow().await.unwrap();

    assert_eq!(first.sales_analysis.total_sales, second.sales_analysis.total_sales);
    assert_eq!(first.sales_analysis.daily_sales, second.sales_analysis.daily_sales);
    assert_eq!(
        first.pricing_strategy.total_expected_revenue_impact,
        second.pricing_strategy.total_expected_revenue_impact
    );
}

#[tokio::test]
async fn test_command_runner_analyze_with_config() {
    let temp_dir = TempDir::new().unwrap();
    let toml_content = format!(
        r#"
[workflow]
days_back = 14
profile = "varied"
seed = 5

[report]
output_path = "{}"
html_file = "report.html"
"#,
        temp_dir.path().display()
    );

    let config = AppConfig::from_toml_str(&toml_content).unwrap();
    let runner = CommandRunner::new(config);
    let outcome = runner.run_analyze().await.unwrap();

    assert!(temp_dir.path().join("report.html").exists());
    assert!(outcome.json_path.is_none());
    assert_eq!(outcome.results.sales_analysis.daily_sales.len(), 14);
}
