use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use giftlist_server::{api::app_router, build_state, config::Config};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct TestApp {
    _db_dir: TempDir,
    static_dir: TempDir,
    config: Config,
}

impl TestApp {
    fn new() -> Self {
        let db_dir = tempdir().unwrap();
        let static_dir = tempdir().unwrap();
        let config = Config {
            db_path: db_dir
                .path()
                .join("christmasList.db")
                .to_string_lossy()
                .to_string(),
            static_dir: static_dir.path().to_string_lossy().to_string(),
            ..Config::default()
        };
        Self {
            _db_dir: db_dir,
            static_dir,
            config,
        }
    }

    async fn router(&self) -> Router {
        let state = build_state(&self.config).await.unwrap();
        app_router(state, &self.config)
    }
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, form: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn healthz_works() {
    let test_app = TestApp::new();
    let app = test_app.router().await;

    let response = get(&app, "/api/v1/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn insert_adds_gift_and_redirects_to_form() {
    let test_app = TestApp::new();
    let app = test_app.router().await;

    let response = post_form(
        &app,
        "/insert",
        "rcptname=Alice&giftname=Bike&price=199.99&url=http%3A%2F%2Fx",
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/addgift");

    let alice = body_json(get(&app, "/api/v1/recipients/Alice").await).await;
    assert_eq!(alice["name"], "Alice");
    assert_eq!(alice["finished"], false);
    assert_eq!(alice["displayTotalCost"], "$211.99");
    assert_eq!(alice["gifts"][0]["name"], "Bike");
    assert_eq!(alice["gifts"][0]["price"], 19999);
    assert_eq!(alice["gifts"][0]["displayPrice"], "$199.99");
    assert_eq!(alice["gifts"][0]["url"], "http://x");
    assert_eq!(alice["gifts"][0]["purchased"], false);
}

#[tokio::test]
async fn insert_without_gift_name_creates_recipient_only() {
    let test_app = TestApp::new();
    let app = test_app.router().await;

    let response = post_form(&app, "/insert", "rcptname=Bob&giftname=&price=&url=").await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let bob = body_json(get(&app, "/api/v1/recipients/Bob").await).await;
    assert_eq!(bob["gifts"].as_array().unwrap().len(), 0);
    assert_eq!(bob["finished"], true);
}

#[tokio::test]
async fn insert_rejects_malformed_price() {
    let test_app = TestApp::new();
    let app = test_app.router().await;

    let response = post_form(&app, "/insert", "rcptname=Alice&giftname=Bike&price=lots").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app, "/api/v1/recipients/Alice").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn insert_rejects_script_links() {
    let test_app = TestApp::new();
    let app = test_app.router().await;

    let response = post_form(
        &app,
        "/insert",
        "rcptname=Alice&giftname=Bike&price=10&url=javascript%3Aalert(document.cookie)",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = body_text(get(&app, "/giftlist?username=Alice").await).await;
    assert!(!html.contains("javascript:"));
    let response = get(&app, "/api/v1/recipients/Alice").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_prices_are_rejected_and_pages_still_render() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    post_form(&app, "/insert", "rcptname=Alice&giftname=Bike&price=10").await;

    for _ in 0..2 {
        let response = post_form(
            &app,
            "/insert",
            "rcptname=Alice&giftname=Yacht&price=50000000000000000",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let index = get(&app, "/").await;
    assert_eq!(index.status(), StatusCode::OK);
    assert!(body_text(index).await.contains("$10.60"));
}

#[tokio::test]
async fn insert_rejects_blank_recipient() {
    let test_app = TestApp::new();
    let app = test_app.router().await;

    let response = post_form(&app, "/insert", "rcptname=&giftname=Bike&price=1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn purchased_toggles_and_redirects_to_gift_list() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    post_form(&app, "/insert", "rcptname=Aunt+May&giftname=Scarf&price=20").await;
    let may = body_json(get(&app, "/api/v1/recipients/Aunt%20May").await).await;
    let gift_id = may["gifts"][0]["id"].as_i64().unwrap();

    let response = get(
        &app,
        &format!("/purchased?giftid={}&username=Aunt%20May", gift_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/giftlist?username=Aunt%20May");

    let may = body_json(get(&app, "/api/v1/recipients/Aunt%20May").await).await;
    assert_eq!(may["gifts"][0]["purchased"], true);
    assert_eq!(may["finished"], true);
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let test_app = TestApp::new();
    let app = test_app.router().await;

    for uri in [
        "/purchased?giftid=abc&username=Alice",
        "/deletegift?username=Alice",
        "/deleteuser?userid=x&username=Alice",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn delete_gift_then_user() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    post_form(&app, "/insert", "rcptname=Alice&giftname=Bike&price=10").await;
    post_form(&app, "/insert", "rcptname=Alice&giftname=Kite&price=5").await;
    let alice = body_json(get(&app, "/api/v1/recipients/Alice").await).await;
    let alice_id = alice["id"].as_i64().unwrap();
    let bike_id = alice["gifts"][0]["id"].as_i64().unwrap();

    let response = get(
        &app,
        &format!("/deletegift?giftid={}&username=Alice", bike_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/giftlist?username=Alice");
    let alice = body_json(get(&app, "/api/v1/recipients/Alice").await).await;
    assert_eq!(alice["gifts"].as_array().unwrap().len(), 1);

    let response = get(
        &app,
        &format!("/deleteuser?userid={}&username=Alice", alice_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/");

    let response = get(&app, "/api/v1/recipients/Alice").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gift_list_falls_back_to_everyone_for_unknown_user() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    post_form(&app, "/insert", "rcptname=Alice&giftname=Bike&price=10").await;
    post_form(&app, "/insert", "rcptname=Bob&giftname=Book&price=10").await;

    let only_alice = body_text(get(&app, "/giftlist?username=Alice").await).await;
    assert!(only_alice.contains("Bike"));
    assert!(!only_alice.contains("Book"));

    let response = get(&app, "/giftlist?username=Nobody").await;
    assert_eq!(response.status(), StatusCode::OK);
    let everyone = body_text(response).await;
    assert!(everyone.contains("Bike"));
    assert!(everyone.contains("Book"));
}

#[tokio::test]
async fn index_and_form_render() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    post_form(&app, "/insert", "rcptname=Alice&giftname=Bike&price=100").await;

    let index = get(&app, "/").await;
    assert_eq!(index.status(), StatusCode::OK);
    let html = body_text(index).await;
    assert!(html.contains("Alice"));
    assert!(html.contains("$106.00"));

    let form = body_text(get(&app, "/addgift").await).await;
    assert!(form.contains("name=\"rcptname\""));
}

#[tokio::test]
async fn recipient_names_are_escaped_in_html() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    post_form(&app, "/insert", "rcptname=%3Cb%3EEve%3C%2Fb%3E&giftname=&price=").await;

    let html = body_text(get(&app, "/").await).await;
    assert!(!html.contains("<b>Eve</b>"));
    assert!(html.contains("&lt;b&gt;Eve&lt;&#x2F;b&gt;"));
}

#[tokio::test]
async fn export_is_plain_text() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    post_form(&app, "/insert", "rcptname=Alice&giftname=Bike&price=100").await;

    let response = get(&app, "/export?username=Alice").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        body_text(response).await,
        "Alice\nestimated amount to spend: $106.00\nshopping finished: no\nwishlist:\n\n\
         \tBike\n\tprice: $100.00\n\talready purchased: no\n\n"
    );

    let response = get(&app, "/export?username=Nobody").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_endpoint_keeps_insertion_order() {
    let test_app = TestApp::new();
    let app = test_app.router().await;
    for name in ["Carol", "Alice", "Bob"] {
        post_form(&app, "/insert", &format!("rcptname={}", name)).await;
    }

    let list = body_json(get(&app, "/api/v1/recipients").await).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Carol", "Alice", "Bob"]);
}

#[tokio::test]
async fn static_files_are_served() {
    let test_app = TestApp::new();
    std::fs::write(test_app.static_dir.path().join("favicon.ico"), b"icon").unwrap();
    let app = test_app.router().await;

    let response = get(&app, "/favicon.ico").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "icon");

    let response = get(&app, "/missing.png").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
