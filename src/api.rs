use crate::data_structures::SharedPage;
use axum::{extract::State, response::Html};
use tracing::{debug, instrument};

#[instrument(skip(page))]
pub async fn get_dashboard_handler(State(page): State<SharedPage>) -> Html<String> {
    debug!(has_data = page.has_data, rows = page.rows, "Serving dashboard page");
    Html(page.html.clone())
}

#[cfg(test)]
mod tests {
    use crate::app;
    use crate::bootstrap::render_dataset;
    use crate::config::RateLimitConfig;
    use crate::data_structures::RenderedPage;
    use axum::body::{to_bytes, Body};
    use axum::extract::ConnectInfo;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use chrono::Utc;
    use ibge_phillips::prelude::Dataset;
    use ibge_phillips::report::ERROR_MESSAGE;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn page(html: &str) -> Arc<RenderedPage> {
        Arc::new(RenderedPage {
            html: html.to_string(),
            has_data: true,
            rows: 1,
            generated_at: Utc::now(),
        })
    }

    async fn get(page: Arc<RenderedPage>, uri: &str) -> (StatusCode, Option<String>, String) {
        let response = app(page, None)
            .unwrap()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_serves_rendered_page() {
        let (status, content_type, body) = get(page("<h1>dashboard</h1>"), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert_eq!(body, "<h1>dashboard</h1>");
    }

    #[tokio::test]
    async fn test_root_serves_error_page_without_data() {
        let rendered = render_dataset(&Dataset::empty(), chrono_tz::UTC, Utc::now());
        let (status, _, body) = get(Arc::new(rendered), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _, _) = get(page("ok"), "/api/data").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    async fn status_from(router: &Router, peer: SocketAddr) -> StatusCode {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));
        router.clone().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_rate_limit_refills_at_configured_rate() {
        let limit = RateLimitConfig { per_second: 10, burst_size: 3 };
        let router = app(page("ok"), Some(&limit)).unwrap();
        let peer: SocketAddr = "10.0.0.7:40000".parse().unwrap();

        for _ in 0..3 {
            assert_eq!(status_from(&router, peer).await, StatusCode::OK);
        }
        assert_eq!(status_from(&router, peer).await, StatusCode::TOO_MANY_REQUESTS);

        // Another client keeps its own budget
        let other: SocketAddr = "10.0.0.8:40000".parse().unwrap();
        assert_eq!(status_from(&router, other).await, StatusCode::OK);

        // 10 per second refills one slot every 100ms
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(status_from(&router, peer).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_default_rate_limit_allows_steady_reloads() {
        let router = app(page("ok"), Some(&RateLimitConfig::default())).unwrap();
        let peer: SocketAddr = "10.0.0.9:40000".parse().unwrap();

        for _ in 0..RateLimitConfig::default().burst_size {
            assert_eq!(status_from(&router, peer).await, StatusCode::OK);
        }
        tokio::time::sleep(Duration::from_millis(1100)).await;
        for _ in 0..5 {
            assert_eq!(status_from(&router, peer).await, StatusCode::OK);
        }
    }
}
