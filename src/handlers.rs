mod download;
mod fallback;
mod link;
mod start;
mod stats;
mod webhook;

pub use download::{download, history};
pub use fallback::method_not_allowed;
pub use link::media_by_link;
pub use start::{help, hint, start, unknown_command};
pub use stats::stats;
pub use webhook::{webhook, webhook_status};

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/download",
            get(history).post(download).fallback(method_not_allowed),
        )
        .route(
            "/api/telegram/webhook",
            get(webhook_status).post(webhook).fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use reqwest::Client;
    use sea_orm::DatabaseConnection;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt as _;

    use crate::config::parse_from_str;

    fn state(token: Option<&str>) -> AppState {
        let mut config = parse_from_str("[database]\nurl = \"postgres://localhost/media\"\n").unwrap();
        config.bot.token = token.map(Into::into);

        AppState {
            config: Arc::new(config),
            database_conn: Arc::new(DatabaseConnection::Disconnected),
            bot: None,
            client: Client::new(),
        }
    }

    fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn call(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_options_allows_any_origin() {
        for uri in ["/api/download", "/api/telegram/webhook"] {
            let response = router(state(None)).oneshot(request("OPTIONS", uri, "")).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert!(to_bytes(response.into_body(), usize::MAX).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_browser_preflight() {
        for uri in ["/api/download", "/api/telegram/webhook"] {
            let preflight = Request::builder()
                .method("OPTIONS")
                .uri(uri)
                .header(header::ORIGIN, "https://media.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap();
            let response = router(state(None)).oneshot(preflight).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
            let headers = response.headers();
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
            for method in ["GET", "POST", "OPTIONS"] {
                assert!(methods.contains(method), "{methods}");
            }
            let allowed_headers = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
            assert!(allowed_headers.eq_ignore_ascii_case("content-type"), "{allowed_headers}");
        }
    }

    #[tokio::test]
    async fn test_cors_headers_on_regular_response() {
        let mut request = request("GET", "/api/telegram/webhook", "");
        request
            .headers_mut()
            .insert(header::ORIGIN, "https://media.example.com".parse().unwrap());
        let response = router(state(None)).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_download_rejects_malformed_json() {
        let (status, body) = call(state(Some("123:abc")), request("POST", "/api/download", "{\"url\":")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Некорректный JSON"}));
    }

    #[tokio::test]
    async fn test_download_requires_url() {
        let (status, body) = call(state(Some("123:abc")), request("POST", "/api/download", "{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "URL не указан"}));

        let (status, _) = call(state(Some("123:abc")), request("POST", "/api/download", "{\"url\": \"  \"}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(state(Some("123:abc")), request("POST", "/api/download", "")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_download_rejects_foreign_link() {
        let (status, body) = call(
            state(Some("123:abc")),
            request("POST", "/api/download", "{\"url\": \"https://example.com/chan/42\"}"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Некорректная Telegram ссылка"}));
    }

    #[tokio::test]
    async fn test_download_without_token() {
        let (status, body) = call(
            state(None),
            request("POST", "/api/download", "{\"url\": \"https://t.me/examplechan/42\"}"),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Токен бота не настроен"}));
    }

    #[tokio::test]
    async fn test_history_database_failure() {
        let (status, body) = call(state(None), request("GET", "/api/download", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Ошибка сервера"}));
    }

    #[tokio::test]
    async fn test_history_rejects_malformed_limit() {
        for uri in ["/api/download?limit=abc", "/api/download?limit=-5", "/api/download?limit=1&limit=2"] {
            let (status, body) = call(state(None), request("GET", uri, "")).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({"error": "Некорректные параметры запроса"}));
        }
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let (status, body) = call(state(None), request("DELETE", "/api/download", "")).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, json!({"error": "Метод не поддерживается"}));
    }

    #[tokio::test]
    async fn test_webhook_status() {
        let (status, body) = call(state(None), request("GET", "/api/telegram/webhook", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "active", "bot": "TG Media Downloader Bot"}));
    }

    #[tokio::test]
    async fn test_set_webhook_requires_url() {
        let (status, body) = call(
            state(Some("123:abc")),
            request("GET", "/api/telegram/webhook?action=set_webhook", ""),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "URL вебхука не указан"}));

        let (status, _) = call(
            state(None),
            request("GET", "/api/telegram/webhook?action=set_webhook&url=https://example.com/hook", ""),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_webhook_always_acknowledges() {
        let updates = [
            r#"{"update_id": 1}"#,
            r#"{"update_id": 2, "message": {"chat": {"id": 5}, "from": {"id": 7}, "text": "/start"}}"#,
            "not json",
            "",
        ];

        for update in updates {
            let (status, body) = call(state(None), request("POST", "/api/telegram/webhook", update)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"ok": true}));
        }
    }
}
