//! Common Types Module
//!
//! 애플리케이션 전반에서 사용되는 공통 타입 정의

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// API 응답 래퍼
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 저장소 식별자
///
/// 외부에서 받은 문자열 id를 저장소의 네이티브 id(UUID)로 정규화한다.
/// 형식이 잘못되면 `ValidationError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| ApiError::ValidationError(format!("Invalid identifier: {}", raw)))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 요청한 회원 (조회자)
///
/// 인증 계층은 범위 밖이므로 id만 사용한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRef {
    #[serde(rename = "_id")]
    pub id: String,
}

impl MemberRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
