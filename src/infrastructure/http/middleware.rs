//! HTTP Middleware
//!
//! HTTP 状态码错误日志中间件

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// HTTP 状态码错误日志中间件
///
/// 状态码为 4xx 或 5xx 时记录日志，附带处理耗时。
/// 业务错误（errno != 0）以 200 返回，在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    fn router() -> Router {
        Router::new()
            .route("/ok", get(|| async { "OK" }))
            .route("/unprocessable", get(|| async { StatusCode::UNPROCESSABLE_ENTITY }))
            .route("/error", get(|| async { StatusCode::BAD_GATEWAY }))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_status_passes_through() {
        assert_eq!(status_of("/ok").await, StatusCode::OK);
        assert_eq!(status_of("/unprocessable").await, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_of("/error").await, StatusCode::BAD_GATEWAY);
        assert_eq!(status_of("/missing").await, StatusCode::NOT_FOUND);
    }
}
