//! SerperGateway soft-failure policy against an in-process stub server.

use std::sync::Arc;

use axum::{http::StatusCode, routing::post, Json, Router};
use informa_common::{GeocodeRequest, GeocodeResult};
use informa_geocode::{ResolutionCache, Resolver, SearchGateway, SerperGateway};
use serde_json::{json, Value};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/search")
}

#[tokio::test]
async fn search_applies_fixed_locale_policy() {
    let app = Router::new().route(
        "/search",
        post(|Json(body): Json<Value>| async move {
            if body["gl"] == "jm" && body["hl"] == "en" && body["num"] == 5 {
                Json(json!({"organic": [{"snippet": "18.01, -76.81"}]}))
            } else {
                Json(json!({}))
            }
        }),
    );
    let url = spawn(app).await;
    let gateway = SerperGateway::new(Some("key"), &url);

    let bundle = gateway.search("Kingston").await.unwrap();
    assert_eq!(bundle.organic.len(), 1);
}

#[tokio::test]
async fn missing_key_yields_nothing() {
    let gateway = SerperGateway::new(None, "http://127.0.0.1:9/search");
    assert!(!gateway.is_configured());
    assert!(gateway.search("Kingston").await.is_none());

    let blank = SerperGateway::new(Some("  "), "http://127.0.0.1:9/search");
    assert!(!blank.is_configured());
}

#[tokio::test]
async fn error_status_yields_nothing() {
    let app = Router::new().route(
        "/search",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
    );
    let url = spawn(app).await;
    let gateway = SerperGateway::new(Some("key"), &url);

    assert!(gateway.search("Kingston").await.is_none());
}

#[tokio::test]
async fn garbage_body_yields_nothing() {
    let app = Router::new().route("/search", post(|| async { "not json" }));
    let url = spawn(app).await;
    let gateway = SerperGateway::new(Some("key"), &url);

    assert!(gateway.search("Kingston").await.is_none());
}

#[tokio::test]
async fn end_to_end_resolution_through_serper() {
    let app = Router::new().route(
        "/search",
        post(|| async {
            Json(json!({
                "answerBox": {"title": "no coordinates here"},
                "knowledgeGraph": {"title": "Montego Bay"},
                "organic": [
                    {"title": "Montego Bay - Wikipedia", "snippet": "second city"},
                    {"title": "MoBay map", "snippet": "Centre: 18.4762, -77.8939"}
                ]
            }))
        }),
    );
    let url = spawn(app).await;
    let resolver = Resolver::new(
        Arc::new(SerperGateway::new(Some("key"), &url)),
        Arc::new(ResolutionCache::new()),
    );

    let request = GeocodeRequest {
        city_state: Some("Montego Bay".into()),
        county: Some("St. James".into()),
        ..Default::default()
    };

    assert_eq!(
        resolver.resolve(&request).await,
        Some(GeocodeResult {
            lat: 18.4762,
            lng: -77.8939
        })
    );
}
