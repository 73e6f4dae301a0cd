use crate::api::{create_router, GatewayState};
use crate::config::Config;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use folio_core::DocumentKinds;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(config: Config) -> Router {
    create_router(GatewayState::new(config).unwrap())
}

fn gateway_for(server: &MockServer) -> Router {
    gateway(Config {
        upstream_url: server.uri(),
        ..Config::default()
    })
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, value)
}

async fn mount_json(server: &MockServer, upstream_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(upstream_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_section_directory_passes_through() {
    let server = MockServer::start().await;
    let listing = json!({
        "kind": "dir",
        "data": [
            { "name": "drafts/", "path": "drafts" },
            { "name": "Hello", "path": "hello.md" },
        ],
    });
    mount_json(&server, "/blog/posts/2024", listing.clone()).await;

    let (status, body) = get_json(gateway_for(&server), "/blog/posts/file.json?path=2024").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, listing);
}

#[tokio::test]
async fn test_section_document_is_split() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/blog/posts/2024/hello.md",
        json!({ "kind": ".md", "data": "---\ntitle: Hello\n---\nBody text" }),
    )
    .await;

    let (status, body) = get_json(
        gateway_for(&server),
        "/blog/posts/file.json?path=2024/hello.md",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "kind": ".md",
            "data": "---\ntitle: Hello\n---\nBody text",
            "frontmatter": { "title": "Hello" },
            "content": "Body text",
        })
    );
}

#[tokio::test]
async fn test_flat_non_document_passes_through() {
    let server = MockServer::start().await;
    let entry = json!({ "kind": ".txt", "data": "---\nnot: frontmatter\n---\n" });
    mount_json(&server, "/notes.txt", entry.clone()).await;

    let (status, body) = get_json(gateway_for(&server), "/file.json?path=notes.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, entry);
}

#[tokio::test]
async fn test_flat_directory_passes_through() {
    let server = MockServer::start().await;
    let listing = json!({ "kind": "dir", "data": [] });
    mount_json(&server, "/blog/posts/drafts", listing.clone()).await;

    let (status, body) = get_json(
        gateway_for(&server),
        "/file.json?path=blog/posts/drafts",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, listing);
}

#[tokio::test]
async fn test_flat_document_keeps_body_delimiters() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/hi.md",
        json!({ "kind": ".md", "data": "---\ntitle: Hi\n---\nLine1\n---\nLine2" }),
    )
    .await;

    let (status, body) = get_json(gateway_for(&server), "/file.json?path=hi.md").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["frontmatter"], json!({ "title": "Hi" }));
    assert_eq!(body["content"], json!("Line1\n---\nLine2"));
}

#[tokio::test]
async fn test_flat_upstream_error_text_is_resolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/posts/missing.md"))
        .respond_with(ResponseTemplate::new(404).set_body_string("\"missing.md not found\""))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(
        gateway_for(&server),
        "/file.json?path=blog/posts/missing.md",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "\"missing.md not found\"" }));
}

#[tokio::test]
async fn test_section_upstream_error_text_is_resolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/recipes/soup.md"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk on fire"))
        .mount(&server)
        .await;

    let (status, body) = get_json(
        gateway_for(&server),
        "/blog/recipes/file.json?path=soup.md",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "disk on fire" }));
}

#[tokio::test]
async fn test_document_without_delimiters_fails() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/plain.md",
        json!({ "kind": ".md", "data": "no delimiters here" }),
    )
    .await;

    let (status, body) = get_json(gateway_for(&server), "/file.json?path=plain.md").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], json!("MALFORMED_DOCUMENT"));
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn test_invalid_frontmatter_fails() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/broken.md",
        json!({ "kind": ".md", "data": "---\ntitle: [oops\n---\nbody" }),
    )
    .await;

    let (status, body) = get_json(gateway_for(&server), "/file.json?path=broken.md").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], json!("INVALID_FRONTMATTER"));
}

#[tokio::test]
async fn test_non_json_upstream_is_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog/posts/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .mount(&server)
        .await;

    let (status, body) = get_json(
        gateway_for(&server),
        "/blog/posts/file.json?path=logo.png",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], json!("MALFORMED_UPSTREAM_PAYLOAD"));
}

#[tokio::test]
async fn test_payload_without_kind_passes_through() {
    let server = MockServer::start().await;
    let listing = json!({
        "label": "Posts",
        "files": [{ "name": "Hello", "path": "hello.md" }],
    });
    mount_json(&server, "/blog/posts", listing.clone()).await;

    let (status, body) = get_json(gateway_for(&server), "/file.json?path=blog/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, listing);
}

#[tokio::test]
async fn test_non_object_payload_passes_through() {
    let server = MockServer::start().await;
    let sites = json!([{ "name": "Blog", "path": "blog" }]);
    mount_json(&server, "/", sites.clone()).await;

    let (status, body) = get_json(gateway_for(&server), "/file.json?path=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, sites);
}

#[tokio::test]
async fn test_empty_section_path_targets_section_root() {
    let server = MockServer::start().await;
    let listing = json!({ "label": "Posts", "files": [] });
    mount_json(&server, "/blog/posts", listing.clone()).await;

    let (status, body) = get_json(gateway_for(&server), "/blog/posts/file.json?path=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, listing);
}

#[tokio::test]
async fn test_document_without_text_data_is_malformed() {
    let server = MockServer::start().await;
    mount_json(&server, "/empty.md", json!({ "kind": ".md" })).await;

    let (status, body) = get_json(gateway_for(&server), "/file.json?path=empty.md").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], json!("MALFORMED_UPSTREAM_PAYLOAD"));
}

#[tokio::test]
async fn test_missing_path_query_is_rejected() {
    let server = MockServer::start().await;

    let (status, _) = get_json(gateway_for(&server), "/file.json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(gateway_for(&server), "/blog/posts/file.json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let (status, body) = get_json(
        gateway(Config {
            upstream_url: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        }),
        "/file.json?path=hello.md",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], json!("UPSTREAM_UNAVAILABLE"));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.md"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "kind": ".md", "data": "---\n---\n" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let app = gateway(Config {
        upstream_url: server.uri(),
        upstream_timeout: Duration::from_millis(200),
        ..Config::default()
    });
    let (status, body) = get_json(app, "/file.json?path=slow.md").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"]["code"], json!("UPSTREAM_TIMEOUT"));
}

#[tokio::test]
async fn test_configured_document_kinds_are_split() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/post.markdown",
        json!({ "kind": ".markdown", "data": "---\ndraft: true\n---\nText" }),
    )
    .await;

    let app = gateway(Config {
        upstream_url: server.uri(),
        document_kinds: DocumentKinds::new([".md", ".markdown"]),
        ..Config::default()
    });
    let (status, body) = get_json(app, "/file.json?path=post.markdown").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["frontmatter"], json!({ "draft": true }));
    assert_eq!(body["content"], json!("Text"));
}

#[tokio::test]
async fn test_extra_upstream_fields_are_preserved() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/blog/posts/hello.md",
        json!({
            "kind": ".md",
            "data": "---\ntitle: Hello\n---\nBody",
            "size": 27,
            "modified": "2024-05-01T10:00:00Z",
        }),
    )
    .await;

    let (status, body) = get_json(
        gateway_for(&server),
        "/blog/posts/file.json?path=hello.md",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["size"], json!(27));
    assert_eq!(body["modified"], json!("2024-05-01T10:00:00Z"));
    assert_eq!(body["content"], json!("Body"));
}
