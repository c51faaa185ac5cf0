// tests/store_backends.rs
//
// File and Cloudflare KV backends end to end.
// The Cloudflare client talks to a local axum server that mimics the KV
// "read key-value pair" endpoint.

use std::fs;
use std::sync::Arc;

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use newslite::config::NewsliteConfig;
use newslite::store::{CloudflareKvStore, FileStore, KvStore};
use newslite::{build_page, AppState};
use tokio::net::TcpListener;

#[tokio::test]
async fn file_store_reads_keys_as_json_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("articles")).unwrap();
    fs::write(
        dir.path().join("articles/2024-01-01.json"),
        r#"[{"title":"A","url":"http://x","summary":"s","topic":"tech"}]"#,
    )
    .unwrap();

    let store = FileStore::new(dir.path());
    let hit = store.get("articles/2024-01-01").await.unwrap();
    assert!(hit.unwrap().contains(r#""title":"A""#));
    assert_eq!(store.get("articles/2024-01-02").await.unwrap(), None);
    assert_eq!(store.get("articles/../secret").await.unwrap(), None);
}

#[tokio::test]
async fn file_store_cannot_be_escaped_through_date() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("data");
    fs::create_dir_all(root.join("articles")).unwrap();
    // a file outside the root that a traversal would hit
    fs::write(dir.path().join("secret.json"), r#"[{"title":"leak"}]"#).unwrap();

    let state = AppState::new(Arc::new(FileStore::new(&root)), NewsliteConfig::default());
    let page = build_page(&state, Some("../../secret")).await.unwrap();
    assert!(!page.html.contains("leak"));
    assert!(page.html.contains("No data found for ../../secret"));
}

const TOKEN: &str = "test-token";

async fn kv_value(
    Path((account, namespace, key)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let auth = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();
    if auth != format!("Bearer {TOKEN}") {
        return (StatusCode::UNAUTHORIZED, "bad token".into());
    }
    if account != "acc" || namespace != "ns" {
        return (StatusCode::BAD_REQUEST, "unknown namespace".into());
    }
    match key.as_str() {
        "articles/2024-01-01" => (
            StatusCode::OK,
            r#"[{"title":"Remote","url":"http://r","summary":"via kv","topic":"world"}]"#.into(),
        ),
        "articles/boom" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream".into()),
        _ => (StatusCode::NOT_FOUND, "key not found".into()),
    }
}

/// Spawn the fake KV API and return its base url.
async fn spawn_fake_kv() -> String {
    let app = Router::new().route(
        "/client/v4/accounts/{account}/storage/kv/namespaces/{namespace}/values/{key}",
        get(kv_value),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake kv server");
    });
    format!("http://{addr}/client/v4")
}

#[tokio::test]
async fn cloudflare_store_maps_statuses() {
    let base = spawn_fake_kv().await;
    let store = CloudflareKvStore::new(&base, "acc", "ns", TOKEN).unwrap();

    let hit = store.get("articles/2024-01-01").await.unwrap();
    assert!(hit.unwrap().contains("Remote"));

    assert_eq!(store.get("articles/2030-01-01").await.unwrap(), None);

    let err = store.get("articles/boom").await.unwrap_err();
    assert!(err.to_string().contains("500"), "{err}");
}

#[tokio::test]
async fn cloudflare_store_rejects_bad_token() {
    let base = spawn_fake_kv().await;
    let store = CloudflareKvStore::new(&base, "acc", "ns", "wrong").unwrap();
    let err = store.get("articles/2024-01-01").await.unwrap_err();
    assert!(err.to_string().contains("401"), "{err}");
}

#[tokio::test]
async fn cloudflare_backed_page_renders() {
    let base = spawn_fake_kv().await;
    let store = CloudflareKvStore::new(&base, "acc", "ns", TOKEN).unwrap();
    let state = AppState::new(Arc::new(store), NewsliteConfig::default());

    let page = build_page(&state, Some("2024-01-01")).await.unwrap();
    assert!(page.html.contains(r#"text-capitalize">world</h2>"#));
    assert!(page.html.contains(r#"<a href="http://r" target="_blank">Remote</a>"#));
}
