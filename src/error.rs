/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - 共通のエラー body (ErrorResponse: timestamp / httpStatus / message)
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / JsonRejection を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repos::error::RepoError;

/// 401 で返す固定メッセージ。検証失敗の理由 (期限切れ/署名不正) は区別しない
pub const AUTHENTICATION_REQUIRED: &str = "Full authentication is required to access this resource";
/// 403 で返す固定メッセージ
pub const ACCESS_DENIED: &str = "Access is denied";

/// 認証/認可の失敗と業務エラー (404/409) で共通の wire 形式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub http_status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            http_status: status_name(status),
            message: message.into(),
        }
    }
}

/// ErrorResponse を JSON (`application/json`) で書き出す
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(status, message))).into_response()
}

/// `StatusCode::NOT_FOUND` -> `"NOT_FOUND"`
pub fn status_name(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect(),
        None => status.as_u16().to_string(),
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => {
                tracing::info!(status = %status, %message, "request rejected");
                message
            }
            AppError::Unauthorized => AUTHENTICATION_REQUIRED.to_string(),
            AppError::Internal => "internal server error".to_string(),
        };

        error_response(status, message)
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict("conflict".to_string()),
            RepoError::Db(err) => {
                tracing::error!(error = %err, "database error");
                AppError::Internal
            }
        }
    }
}

/// 壊れた JSON / 型違い / Content-Type 不足も 400 の ErrorResponse にそろえる
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
