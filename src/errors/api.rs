use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;

use super::ErrorKind;
use crate::interactors::GetMediaErrorKind;

/// Errors of the request façade, rendered as `{error}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Некорректный JSON")]
    InvalidJson,
    #[error("Некорректные параметры запроса")]
    InvalidQuery,
    #[error("URL не указан")]
    MissingUrl,
    #[error("Некорректная Telegram ссылка")]
    InvalidLink,
    #[error("Не удалось разобрать ссылку на пост")]
    UnresolvableLink,
    #[error("Не удалось получить медиа. Проверьте ссылку или права доступа бота")]
    Fetch,
    #[error("Токен бота не настроен")]
    MissingToken,
    #[error("URL вебхука не указан")]
    MissingWebhookUrl,
    #[error("Метод не поддерживается")]
    MethodNotAllowed,
    #[error("Ошибка сервера")]
    Internal,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::InvalidJson
            | ApiError::InvalidQuery
            | ApiError::MissingUrl
            | ApiError::InvalidLink
            | ApiError::UnresolvableLink
            | ApiError::Fetch
            | ApiError::MissingWebhookUrl => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::MissingToken | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

impl From<GetMediaErrorKind> for ApiError {
    fn from(err: GetMediaErrorKind) -> Self {
        match err {
            GetMediaErrorKind::InvalidLink => ApiError::InvalidLink,
            GetMediaErrorKind::UnresolvableLink(_) => ApiError::UnresolvableLink,
            GetMediaErrorKind::Fetch(_) => ApiError::Fetch,
            GetMediaErrorKind::Database(_) => ApiError::Internal,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(_: QueryRejection) -> Self {
        ApiError::InvalidQuery
    }
}

impl From<ErrorKind<Infallible>> for ApiError {
    fn from(_: ErrorKind<Infallible>) -> Self {
        ApiError::Internal
    }
}
