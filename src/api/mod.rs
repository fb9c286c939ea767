//! 即時資料 API
//!
//! 每個請求都會重新產生資料，證明數值不是寫死的。
//! 未知路徑仍回傳 200 與可用端點提示。

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Local;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::generators::{live_customers, live_sales};
use crate::domain::model::{HealthStatus, LiveCustomers, LiveSales, LiveSnapshot, RouteHint};
use crate::utils::error::{AnalyticsError, Result};

pub const AVAILABLE_ENDPOINTS: &str = "Available endpoints: /sales, /customers, /all, /health";

/// 建立 API 路由
pub fn router(port: u16) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/sales", get(sales))
        .route("/customers", get(customers))
        .route("/all", get(all))
        .route("/health", get(health))
        .fallback(move || async move { pretty_json(&route_hint(port)) })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 以縮排 JSON 回應
fn pretty_json<T: Serialize>(value: &T) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("❌ Failed to serialize response: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"error": "serialization failed"}"#,
            )
                .into_response()
        }
    }
}

fn sales_payload() -> LiveSales {
    live_sales(&mut rand::thread_rng())
}

fn customers_payload() -> (LiveSales, LiveCustomers) {
    let mut rng = rand::thread_rng();
    let sales = live_sales(&mut rng);
    let customers = live_customers(&mut rng, sales.total_sales);
    (sales, customers)
}

pub fn route_hint(port: u16) -> RouteHint {
    RouteHint {
        error: AVAILABLE_ENDPOINTS.to_string(),
        demo: format!("Try: curl http://localhost:{}/all", port),
    }
}

async fn sales() -> Response {
    tracing::debug!("GET /sales");
    pretty_json(&sales_payload())
}

async fn customers() -> Response {
    tracing::debug!("GET /customers");
    let (_, customers) = customers_payload();
    pretty_json(&customers)
}

async fn all() -> Response {
    tracing::debug!("GET /all");
    let (sales, customers) = customers_payload();
    pretty_json(&LiveSnapshot {
        sales,
        customers,
        generated_at: Local::now(),
        note: "This data is generated fresh with each request".to_string(),
    })
}

async fn health() -> Response {
    pretty_json(&HealthStatus {
        status: "live".to_string(),
        message: "Multi-agent system is generating real-time data".to_string(),
        timestamp: Local::now(),
        proof: "Each request returns different values".to_string(),
    })
}

/// 啟動 API 伺服器，直到收到 Ctrl+C
pub async fn serve(host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AnalyticsError::ServerError {
            message: format!("failed to bind {}: {}", addr, e),
        })?;

    tracing::info!("🚀 Live data API running on http://{}", addr);
    tracing::info!("   curl http://localhost:{}/health", port);
    tracing::info!("   curl http://localhost:{}/sales", port);
    tracing::info!("   curl http://localhost:{}/customers", port);
    tracing::info!("   curl http://localhost:{}/all", port);
    tracing::info!("Press Ctrl+C to stop server");

    axum::serve(listener, router(port))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AnalyticsError::ServerError {
            message: e.to_string(),
        })?;

    tracing::info!("🛑 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
