use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index::index))
        .route("/publications", get(handlers::publications::fragment))
        .route("/publications.json", get(handlers::publications::json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pubshelf_core::BlogPost;
    use tower::ServiceExt; // for oneshot()

    const BIB: &str = "@article{a,\n  title = {First},\n  year = {2020}\n}\n\n@article{b,\n  title = {Second},\n  year = {2023}\n}\n";

    fn state(source: String) -> Arc<AppState> {
        Arc::new(AppState {
            source,
            client: reqwest::Client::new(),
            site_title: "Jane Doe".to_string(),
            posts: vec![BlogPost {
                file: "hello.md".into(),
                title: "Hello".into(),
                date: "2025-01-15".into(),
                excerpt: String::new(),
            }],
        })
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn bib_file(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("paper.bib");
        std::fs::write(&path, BIB).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_fragment_lists_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(bib_file(&dir)));

        let (status, body) = get_body(app, "/publications").await;
        assert_eq!(status, StatusCode::OK);
        let second = body.find("Second").unwrap();
        let first = body.find("First").unwrap();
        assert!(second < first);
    }

    #[tokio::test]
    async fn test_each_request_reads_source_again() {
        let dir = tempfile::tempdir().unwrap();
        let location = bib_file(&dir);
        let app = router(state(location.clone()));

        let (_, before) = get_body(app.clone(), "/publications").await;
        assert!(before.contains("First"));

        std::fs::write(&location, "").unwrap();
        let (_, after) = get_body(app, "/publications").await;
        assert!(after.contains("No publications found."));
    }

    #[tokio::test]
    async fn test_json_failed_state() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.bib").to_string_lossy().into_owned();
        let app = router(state(missing));

        let (status, body) = get_body(app, "/publications.json").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "failed");
        assert!(
            value["message"]
                .as_str()
                .unwrap()
                .starts_with("Failed to load publications. Error: ")
        );
    }

    #[tokio::test]
    async fn test_index_page() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(state(bib_file(&dir)));

        let (status, body) = get_body(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Jane Doe</title>"));
        assert!(body.contains("publication-item"));
        assert!(body.contains("blog-post.html?post=hello.md"));
    }
}
