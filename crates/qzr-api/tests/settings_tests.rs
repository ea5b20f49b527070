use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::TestApp;

#[tokio::test]
async fn test_theme_defaults() {
    let app = TestApp::new();

    let response = app.client.get("/settings/theme").await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "mode": "light", "fontSize": "medium", "contrast": "normal" })
    );
}

#[tokio::test]
async fn test_theme_round_trip() {
    let app = TestApp::new();
    let settings = json!({ "mode": "dark", "fontSize": "large", "contrast": "high" });

    let response = app.client.put_json("/settings/theme", &settings).await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), settings);

    let stored: Value = app.client.get("/settings/theme").await.json();
    assert_eq!(stored, settings);
}

#[tokio::test]
async fn test_partial_theme_fills_defaults() {
    let app = TestApp::new();

    let response = app
        .client
        .put_json("/settings/theme", &json!({ "mode": "auto" }))
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "mode": "auto", "fontSize": "medium", "contrast": "normal" })
    );
}

#[tokio::test]
async fn test_unknown_theme_mode_is_rejected() {
    let app = TestApp::new();

    let response = app
        .client
        .put_json("/settings/theme", &json!({ "mode": "sepia" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let stored: Value = app.client.get("/settings/theme").await.json();
    assert_eq!(stored["mode"], "light");
}

#[tokio::test]
async fn test_clearing_data_resets_progress() {
    let app = TestApp::new();
    let quiz = app.create_quiz("Tides", "easy", 2).await;
    app.complete_quiz(quiz["id"].as_str().unwrap(), &[0, 0], 20_000)
        .await
        .assert_status(StatusCode::OK);
    app.client
        .put_json("/settings/theme", &json!({ "mode": "dark" }))
        .await
        .assert_status(StatusCode::OK);

    app.client
        .delete("/data")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let stats: Value = app.client.get("/stats").await.json();
    assert_eq!(stats["totalQuizzes"], 0);
    assert_eq!(stats["xp"], 0);
    assert_eq!(stats["streak"], 0);
    assert_eq!(stats["badges"], json!([]));
    let quizzes: Vec<Value> = app.client.get("/quizzes").await.json();
    assert!(quizzes.is_empty());
    let results: Vec<Value> = app.client.get("/results").await.json();
    assert!(results.is_empty());
    let review: Vec<Value> = app.client.get("/review").await.json();
    assert!(review.is_empty());

    let theme: Value = app.client.get("/settings/theme").await.json();
    assert_eq!(theme["mode"], "dark");
}
