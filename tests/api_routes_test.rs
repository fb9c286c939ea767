use agent_analytics::api::{router, AVAILABLE_ENDPOINTS};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

async fn get_json(path: &str) -> (StatusCode, Option<String>, String, serde_json::Value) {
    let request = Request::builder()
        .uri(path)
        .header(header::ORIGIN, "http://judge.example.com")
        .body(Body::empty())
        .unwrap();

    let response = router(8080).oneshot(request).await.unwrap();
    let status = response.status();
    let cors = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string());
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();

    (status, cors, content_type, json)
}

#[tokio::test]
async fn test_sales_route() {
    let (status, cors, content_type, json) = get_json("/sales").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cors.as_deref(), Some("*"));
    assert_eq!(content_type, "application/json");

    let total = json["total_sales"].as_u64().unwrap();
    assert!((50_000..=100_000).contains(&total));
    let transactions = json["transactions"].as_u64().unwrap();
    assert!((800..=1_500).contains(&transactions));
    assert!(json["avg_order_value"].is_f64());
    assert!(json["timestamp"].is_string());
    let request_id = json["request_id"].as_u64().unwrap();
    assert!((10_000..=99_999).contains(&request_id));
}

#[tokio::test]
async fn test_customers_route() {
    let (status, _, _, json) = get_json("/customers").await;

    assert_eq!(status, StatusCode::OK);
    let premium = json["premium_count"].as_u64().unwrap();
    assert!(premium <= 166);
    let retention = json["retention_rate"].as_u64().unwrap();
    assert!((70..=85).contains(&retention));
    let churn = json["churn_risk"].as_u64().unwrap();
    assert!((15..=30).contains(&churn));
}

#[tokio::test]
async fn test_all_route_combines_sales_and_customers() {
    let (status, _, _, json) = get_json("/all").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["sales"]["total_sales"].is_u64());
    assert!(json["customers"]["premium_count"].is_u64());
    assert!(json["generated_at"].is_string());
    assert_eq!(json["note"], "This data is generated fresh with each request");
}

#[tokio::test]
async fn test_health_route() {
    let (status, cors, _, json) = get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cors.as_deref(), Some("*"));
    assert_eq!(json["status"], "live");
    assert_eq!(json["proof"], "Each request returns different values");
}

#[tokio::test]
async fn test_unknown_route_returns_hint_with_ok_status() {
    let (status, _, content_type, json) = get_json("/does-not-exist").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(json["error"], AVAILABLE_ENDPOINTS);
    assert_eq!(json["demo"], "Try: curl http://localhost:8080/all");
}

#[tokio::test]
async fn test_query_string_is_ignored() {
    let (status, _, _, json) = get_json("/health?verbose=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "live");
}
