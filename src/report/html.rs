//! HTML 報告產生
//!
//! 將 `WorkflowResults` 轉為單一靜態頁面。所有插入的文字都會先經過跳脫。

use crate::domain::model::WorkflowResults;
use crate::utils::format::{thousands, title_case};

const STYLE: &str = r#"
        body { font-family: 'Google Sans', Arial, sans-serif; margin: 0; padding: 20px;
               background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; }
        .container { max-width: 1400px; margin: 0 auto; background: rgba(255,255,255,0.95);
                     padding: 30px; border-radius: 15px; box-shadow: 0 20px 40px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 40px; }
        .badge { display: inline-block; background: #1a73e8; color: white; padding: 8px 16px;
                 border-radius: 20px; font-size: 14px; margin: 10px 5px; font-weight: 500; }
        .agent-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
                      gap: 20px; margin: 30px 0; }
        .agent-card { background: linear-gradient(135deg, #667eea, #764ba2); color: white;
                      padding: 25px; border-radius: 12px; }
        .metric-box { background: #f8f9fa; padding: 20px; margin: 15px 0; border-radius: 10px;
                      border-left: 5px solid #34a853; }
        .recommendation-item { background: #fff3cd; padding: 15px; margin: 10px 0;
                               border-radius: 8px; border-left: 4px solid #ffc107; }
        .insight-tag { display: inline-block; background: #e8f0fe; color: #1a73e8; padding: 6px 12px;
                       margin: 4px; border-radius: 15px; font-size: 13px; }
        .performance-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
                            gap: 15px; margin: 20px 0; }
        .performance-card { text-align: center; background: #34a853; color: white; padding: 20px;
                            border-radius: 10px; }
        .workflow-status { background: #e8f5e8; padding: 20px; border-radius: 10px;
                           border-left: 5px solid #34a853; margin: 20px 0; }
"#;

/// 跳脫 HTML 特殊字元
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

pub fn render_html(results: &WorkflowResults) -> String {
    let meta = &results.workflow_metadata;
    let sales = &results.sales_analysis;
    let customers = &results.customer_intelligence;
    let pricing = &results.pricing_strategy;
    let insights = &results.business_insights;
    let perf = &results.performance_metrics;

    let mut html = String::with_capacity(16 * 1024);

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Multi-Agent E-commerce Analytics</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Multi-Agent E-commerce Analytics</h1>
            <p>Business intelligence from four cooperating analysis agents</p>
            <div>
                <span class="badge">Framework v{version}</span>
                <span class="badge">Model: {model}</span>
                <span class="badge">Agents: {agent_count}</span>
                <span class="badge">Runtime: {runtime:.1}s</span>
            </div>
        </div>
        <div class="workflow-status">
            <h3>Workflow Status: COMPLETED</h3>
            <p><strong>Workflow ID:</strong> {workflow_id}</p>
            <p><strong>Agents Orchestrated:</strong> {agents}</p>
            <p><strong>Execution Time:</strong> {runtime:.2} seconds</p>
        </div>
"#,
        style = STYLE,
        version = escape_html(&meta.adk_version),
        model = escape_html(&meta.model_used),
        agent_count = meta.agents_orchestrated.len(),
        runtime = meta.execution_time_seconds,
        workflow_id = escape_html(&meta.workflow_id),
        agents = escape_html(&meta.agents_orchestrated.join(", ")),
    ));

    html.push_str(&format!(
        r#"        <div class="agent-grid">
            <div class="agent-card">
                <h3>Data Collection Agent</h3>
                <p><strong>Revenue Analyzed:</strong> ${revenue}</p>
                <p><strong>Transactions:</strong> {transactions}</p>
                <p><strong>Average Order:</strong> ${aov:.2}</p>
                <p><strong>Categories:</strong> {categories}</p>
            </div>
            <div class="agent-card">
                <h3>Customer Behavior Agent</h3>
                <p><strong>Segments Identified:</strong> {segments}</p>
                <p><strong>Premium Customers:</strong> {premium}</p>
                <p><strong>Retention Rate:</strong> {retention}%</p>
                <p><strong>Churn Risk:</strong> {churn}%</p>
            </div>
            <div class="agent-card">
                <h3>Pricing Strategy Agent</h3>
                <p><strong>Recommendations:</strong> {recommendations}</p>
                <p><strong>Revenue Impact:</strong> {impact}</p>
                <p><strong>Risk Level:</strong> {risk}</p>
                <p><strong>Priority:</strong> {priority}</p>
            </div>
            <div class="agent-card">
                <h3>Business Intelligence Agent</h3>
                <p><strong>Key Opportunities:</strong> {opportunities}</p>
                <p><strong>Action Items:</strong> {actions}</p>
                <p><strong>Metrics Improved:</strong> {metrics}</p>
                <p><strong>Strategy Focus:</strong> Revenue Optimization</p>
            </div>
        </div>
"#,
        revenue = thousands(sales.total_sales),
        transactions = thousands(sales.transactions as u64),
        aov = sales.avg_order_value,
        categories = sales.top_categories.len(),
        segments = customers.segments.len(),
        premium = customers.segments.premium.count,
        retention = customers.overall_retention,
        churn = customers.churn_risk_percentage,
        recommendations = pricing.recommendations.len(),
        impact = escape_html(&pricing.total_expected_revenue_impact),
        risk = pricing.risk_assessment,
        priority = pricing.implementation_priority,
        opportunities = insights.key_opportunities.len(),
        actions = insights.recommended_actions.len(),
        metrics = insights.business_metrics.entries().len(),
    ));

    html.push_str(
        "        <div class=\"metric-box\">\n            <h3>Business Performance Metrics</h3>\n            <div class=\"performance-grid\">\n",
    );
    for (key, value) in insights.business_metrics.entries() {
        html.push_str(&format!(
            "                <div class=\"performance-card\"><h4>{}</h4><p>{}</p></div>\n",
            escape_html(value),
            escape_html(&title_case(key)),
        ));
    }
    html.push_str("            </div>\n        </div>\n");

    html.push_str(
        "        <div class=\"metric-box\">\n            <h3>Generated Recommendations</h3>\n",
    );
    for rec in &pricing.recommendations {
        html.push_str(&format!(
            "            <div class=\"recommendation-item\">\n                <strong>{}</strong> - {}: {}<br>\n                <em>Reason: {}</em><br>\n                <strong>Expected Impact: {}</strong>\n            </div>\n",
            escape_html(&title_case(rec.action.as_str())),
            escape_html(&rec.category),
            escape_html(&rec.adjustment),
            escape_html(&rec.reason),
            escape_html(&rec.expected_impact),
        ));
    }
    html.push_str("        </div>\n");

    html.push_str(
        "        <div class=\"metric-box\">\n            <h3>Strategic Business Insights</h3>\n            <div>\n",
    );
    for opportunity in &insights.key_opportunities {
        html.push_str(&format!(
            "                <span class=\"insight-tag\">{}</span>\n",
            escape_html(opportunity)
        ));
    }
    html.push_str("            </div>\n            <h4>Recommended Actions:</h4>\n            <ul>\n");
    for action in &insights.recommended_actions {
        html.push_str(&format!("                <li>{}</li>\n", escape_html(action)));
    }
    html.push_str("            </ul>\n        </div>\n");

    html.push_str(&format!(
        r#"        <div class="metric-box" style="text-align: center;">
            <h3>Multi-Agent System Performance</h3>
            <p><strong>Total Revenue Analyzed:</strong> ${revenue}</p>
            <p><strong>Customers Segmented:</strong> {customers}</p>
            <p><strong>Pricing Strategies:</strong> {strategies}</p>
            <p><strong>Business Opportunities:</strong> {opportunities}</p>
        </div>
    </div>
</body>
</html>
"#,
        revenue = thousands(perf.total_revenue_analyzed),
        customers = thousands(perf.customers_segmented),
        strategies = perf.pricing_recommendations,
        opportunities = perf.business_opportunities,
    ));

    html
}
