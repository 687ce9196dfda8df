//! Report endpoints must stay available: an impossible date comes back as a
//! 200 with a zero-filled body, not an error.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use center_server::db::DbService;
use center_server::{Config, Server, ServerState};
use tower::ServiceExt;

async fn test_router() -> axum::Router {
    let pool = DbService::in_memory().await.unwrap().pool;
    let config = Config {
        work_dir: "/tmp".to_string(),
        http_port: 0,
        database_path: None,
        environment: "development".to_string(),
        log_level: "info".to_string(),
    };
    Server::router(ServerState::new(config, pool))
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn invalid_daily_date_degrades_to_zeroed_report() {
    let router = test_router().await;
    // February 30th does not exist
    let (status, body) = get_json(router, "/api/reports/daily/2024/2/30").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-02-30");
    assert_eq!(body["totalStudentsPresent"], 0);
    assert_eq!(body["totalStudentsAbsent"], 0);
    assert_eq!(body["paymentCount"], 0);
    assert!(body["groupAttendances"].as_array().unwrap().is_empty());
    assert!(body["payments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_month_degrades_to_zeroed_report() {
    let router = test_router().await;
    let (status, body) = get_json(router, "/api/reports/monthly/2024/13").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2024);
    assert_eq!(body["month"], 13);
    assert_eq!(body["studentsWhoPaid"], 0);
    assert!(body["groupStats"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn valid_empty_reports_return_full_shape() {
    let router = test_router().await;

    let (status, body) = get_json(router.clone(), "/api/reports/daily/2024/3/15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-03-15");

    let (status, body) = get_json(router.clone(), "/api/reports/monthly/2024/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthName"], "March");

    let (status, body) = get_json(router, "/api/reports/yearly/2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["monthlyBreakdown"].as_array().unwrap().len(), 12);
}
