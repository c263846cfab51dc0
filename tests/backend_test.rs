//! HTTPバックエンド結合テスト
//!
//! axumで `/upload` と `/recommend` の偽サーバーを立て、reqwestクライアントを通して
//! セッションの流れを検証する

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use recipe_finder::client::HttpBackend;
use recipe_finder::scanner::{collect_images, ImageInfo};
use recipe_finder_common::panel::RECOMMEND_LABEL;
use recipe_finder_common::{DetectionStatus, Recommendation, ResultPanel, Session};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

/// 偽サーバーを起動してベースURLを返す
async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });
    format!("http://{}", addr)
}

/// ファイル名（拡張子なし）を食材名として返す
async fn upload_by_file_name(mut multipart: Multipart) -> Result<Json<Value>, StatusCode> {
    let mut detected = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        if field.name() != Some("images") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        detected.push(name.split('.').next().unwrap_or_default().to_string());
    }
    if detected.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({ "detectedIngredients": detected })))
}

/// 新形式: 受け取った内容をレシピにして返す
async fn recommend_multi(Json(body): Json<Value>) -> Json<Value> {
    let ingredients = body["ingredients"].clone();
    let meat = body["meat"].clone();
    Json(json!({
        "detected": ingredients,
        "recommended": [
            {
                "recipe_title": "Echo Stew",
                "score": 2,
                "ingredients": ingredients,
                "instructions": format!("1. Use {}. 2. Serve.", meat),
                "image": "/uploads/placeholder.png"
            },
            {
                "recipe_title": "Plain Rice",
                "score": 1,
                "ingredients": ["rice"],
                "instructions": "Rinse rice. Boil."
            }
        ]
    }))
}

/// 旧形式
async fn recommend_legacy(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({
        "recommendedDish": "Fried Rice",
        "details": { "ingredients": ["rice", "egg"], "instructions": "Fry rice. Add egg." },
        "detected": ["egg"]
    }))
}

async fn recommend_none(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "detected": [], "recommended": [], "message": "No matching recipes found." }))
}

fn photos(names: &[&str]) -> (TempDir, Vec<ImageInfo>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let paths: Vec<PathBuf> = names
        .iter()
        .map(|n| {
            let path = dir.path().join(n);
            std::fs::write(&path, b"\xFF\xD8\xFFdummy").unwrap();
            path
        })
        .collect();
    let images = collect_images(&paths).unwrap();
    (dir, images)
}

#[tokio::test]
async fn test_upload_detects_in_order() {
    let url = spawn_server(Router::new().route("/upload", post(upload_by_file_name))).await;
    let backend = HttpBackend::new(&url, 10).unwrap();
    let (_dir, images) = photos(&["egg.jpg", "onion.png"]);

    let mut session = Session::default();
    let status = session.upload(&backend, images).await;
    assert_eq!(
        status,
        &DetectionStatus::Detected(vec!["egg".to_string(), "onion".to_string()])
    );
}

#[tokio::test]
async fn test_upload_server_error_sets_error_status() {
    let app = Router::new().route(
        "/upload",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
    );
    let url = spawn_server(app).await;
    let backend = HttpBackend::new(&url, 10).unwrap();
    let (_dir, images) = photos(&["egg.jpg"]);

    let mut session = Session::default();
    let status = session.upload(&backend, images).await;
    match status {
        DetectionStatus::Error(msg) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("model crashed"));
        }
        other => panic!("Expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_malformed_response_is_error() {
    let app = Router::new().route(
        "/upload",
        post(|| async { Json(json!({ "error": "No images uploaded" })) }),
    );
    let url = spawn_server(app).await;
    let backend = HttpBackend::new(&url, 10).unwrap();
    let (_dir, images) = photos(&["egg.jpg"]);

    let mut session = Session::default();
    let status = session.upload(&backend, images).await;
    assert!(matches!(status, DetectionStatus::Error(_)));
}

#[tokio::test]
async fn test_recommend_multi_result_flow() {
    let app = Router::new()
        .route("/upload", post(upload_by_file_name))
        .route("/recommend", post(recommend_multi));
    let url = spawn_server(app).await;
    let backend = HttpBackend::new(&url, 10).unwrap();
    let (_dir, images) = photos(&["tomato.jpg"]);

    let mut session = Session::default();
    session.upload(&backend, images).await;
    session.toggle_meat("Beef").unwrap();

    let panel = session.recommend(&backend).await.unwrap();
    match panel {
        ResultPanel::Ready(Recommendation::Recipes { recipes, detected }) => {
            assert_eq!(recipes.len(), 2);
            assert_eq!(recipes[0].title, "Echo Stew");
            assert!(recipes[0].instructions.as_deref().unwrap().contains("Beef"));
            assert_eq!(recipes[0].image.as_deref(), Some("/uploads/placeholder.png"));
            assert_eq!(recipes[1].title, "Plain Rice");
            assert_eq!(detected, &vec!["tomato".to_string()]);
        }
        other => panic!("Expected recipes, got {:?}", other),
    }
    assert!(session.trigger().is_enabled());
}

#[tokio::test]
async fn test_recommend_legacy_shape() {
    let url = spawn_server(Router::new().route("/recommend", post(recommend_legacy))).await;
    let backend = HttpBackend::new(&url, 10).unwrap();

    let mut session: Session<ImageInfo> = Session::default();
    session.set_ingredients(vec!["egg".into()]);
    let panel = session.recommend(&backend).await.unwrap();

    match panel {
        ResultPanel::Ready(Recommendation::Recipes { recipes, .. }) => {
            assert_eq!(recipes.len(), 1);
            assert_eq!(recipes[0].title, "Fried Rice");
            assert_eq!(recipes[0].image, None);
        }
        other => panic!("Expected recipes, got {:?}", other),
    }
}

#[tokio::test]
async fn test_recommend_no_match_is_not_error() {
    let url = spawn_server(Router::new().route("/recommend", post(recommend_none))).await;
    let backend = HttpBackend::new(&url, 10).unwrap();

    let mut session: Session<ImageInfo> = Session::default();
    session.set_ingredients(vec!["kiwi".into()]);
    let panel = session.recommend(&backend).await.unwrap();

    assert!(matches!(panel, ResultPanel::Ready(Recommendation::NoMatch { .. })));
}

#[tokio::test]
async fn test_recommend_transport_failure_restores_trigger() {
    // 一度bindして解放したポートには誰も待ち受けていない
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let backend = HttpBackend::new(&format!("http://{}", addr), 5).unwrap();
    let mut session: Session<ImageInfo> = Session::default();
    session.set_ingredients(vec!["egg".into()]);

    let panel = session.recommend(&backend).await.unwrap();
    assert!(matches!(panel, ResultPanel::Failed(_)));
    assert!(session.trigger().is_enabled());
    assert_eq!(session.trigger().label(), RECOMMEND_LABEL);
}

#[tokio::test]
async fn test_recommend_without_ingredients_sends_nothing() {
    let url = spawn_server(Router::new()).await;
    let backend = HttpBackend::new(&url, 5).unwrap();

    let mut session: Session<ImageInfo> = Session::default();
    let result = session.recommend(&backend).await;
    assert!(matches!(
        result,
        Err(recipe_finder_common::Error::NoIngredients)
    ));
    assert_eq!(session.panel(), &ResultPanel::Placeholder);
}
