
use reqwest::{StatusCode, header::RETRY_AFTER};
use serde_json::{Value, json};

use wira_app::test_utils::tests::test_config;

use crate::test_utils::tests::spawn_app;

#[tokio::test]
async fn test_burst_then_reject() {
    let app = spawn_app(test_config()).await;

    for _ in 0..5 {
        assert_eq!(app.get("/api/health").await.status(), StatusCode::OK);
    }

    let res = app.get("/api/health").await;
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(res.headers()[RETRY_AFTER], "1");
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"error": "Rate limit exceeded. Please try again later."})
    );
}

#[tokio::test]
async fn test_rejection_happens_before_authentication() {
    let app = spawn_app(test_config()).await;

    for _ in 0..5 {
        assert_eq!(
            app.get("/api/rankings").await.status(),
            StatusCode::UNAUTHORIZED
        );
    }

    assert_eq!(
        app.get("/api/rankings").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_one_token_back_after_a_second() {
    let app = spawn_app(test_config()).await;

    for _ in 0..5 {
        app.get("/api/health").await;
    }
    assert_eq!(
        app.get("/api/health").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    assert_eq!(app.get("/api/health").await.status(), StatusCode::OK);
    assert_eq!(
        app.get("/api/health").await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_forwarded_clients_get_separate_buckets_when_trusted() {
    let mut config = test_config();
    config.trust_forwarded_for = true;
    let app = spawn_app(config).await;

    let from = |ip: &'static str| {
        app.client
            .get(app.url("/api/health"))
            .header("x-forwarded-for", ip)
            .send()
    };

    for _ in 0..5 {
        assert_eq!(from("203.0.113.1").await.unwrap().status(), StatusCode::OK);
    }
    assert_eq!(
        from("203.0.113.1").await.unwrap().status(),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(from("203.0.113.2").await.unwrap().status(), StatusCode::OK);

    assert!(app.state.rate_limiter.is_tracked(&"203.0.113.1".to_string()));
    assert!(app.state.rate_limiter.is_tracked(&"203.0.113.2".to_string()));
}

#[tokio::test]
async fn test_forwarded_header_is_ignored_when_untrusted() {
    let app = spawn_app(test_config()).await;

    for i in 0..5 {
        let res = app
            .client
            .get(app.url("/api/health"))
            .header("x-forwarded-for", format!("203.0.113.{i}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = app
        .client
        .get(app.url("/api/health"))
        .header("x-forwarded-for", "198.51.100.77")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(app.state.rate_limiter.len(), 1);
}

#[tokio::test]
async fn test_cors_preflight_for_configured_origin() {
    let app = spawn_app(test_config()).await;

    let res = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/api/rankings"))
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "GET")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(
        res.headers()["access-control-allow-origin"],
        "http://localhost:5173"
    );
    assert_eq!(res.headers()["access-control-allow-credentials"], "true");
}
