//! Error Handling Module
//!
//! Provides type-safe error handling with proper HTTP status code mapping.
//! Uses thiserror for domain errors and integrates with tracing for structured logging.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// API 에러 타입
///
/// # Design Decision
///
/// 각 에러 variant는 적절한 HTTP 상태 코드에 매핑됨
/// - 클라이언트 에러: 4xx (잘못된 id, 데이터 없음, 생성 실패 등)
/// - 수정 실패: 304 (Not Modified)
/// - 서버 에러: 5xx (분류되지 않은 저장소 오류)
///
/// 민감한 내부 정보는 클라이언트에 노출하지 않음
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 400 Bad Request ============
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Create failed: {0}")]
    CreateFailed(String),

    // ============ 401 Unauthorized ============
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    // ============ 404 Not Found ============
    #[error("Resource not found: {0}")]
    NotFound(String),

    // ============ 304 Not Modified ============
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    // ============ 500 Internal Server Error ============
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApiError {
    /// 에러 코드 문자열 (응답 body의 `code`)
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::CreateFailed(_) => "CREATE_FAILED",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UpdateFailed(_) => "UPDATE_FAILED",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) | ApiError::CreateFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpdateFailed(_) => StatusCode::NOT_MODIFIED,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API 에러 응답 구조
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match &self {
            // 4xx 클라이언트 에러
            ApiError::ValidationError(msg) => {
                ("Validation failed".to_string(), Some(msg.clone()))
            }
            ApiError::CreateFailed(_) => ("Create is failed!".to_string(), None),
            ApiError::Unauthorized(msg) => (msg.clone(), None),
            ApiError::NotFound(resource) => (format!("{} not found", resource), None),
            ApiError::UpdateFailed(_) => ("Update is failed!".to_string(), None),

            // 5xx 서버 에러
            ApiError::DatabaseError(_) => {
                // 내부 에러는 클라이언트에 상세 정보 노출 안 함
                tracing::error!("Database error: {:?}", self);
                ("Database error occurred".to_string(), None)
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// 분류되지 않은 저장소 에러는 그대로 전달 (500)
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        tracing::error!("Repository error: {:?}", err);
        ApiError::DatabaseError(err.to_string())
    }
}
