//! 공통 에러 타입
//!
//! 가시성/권한 *판정*은 에러를 내지 않습니다 (항상 bool 또는 projection).
//! 이 타입은 정책 로딩과 저장소 경계(변경 작업)에서만 사용됩니다.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Club 공통 에러
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────────
    // Policy Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("policy parse error: {message}")]
    PolicyParse { message: String },

    #[error("unknown role: {name}")]
    UnknownRole { name: String },

    #[error("unknown resource: {name}")]
    UnknownResource { name: String },

    #[error("unknown action: {name}")]
    UnknownAction { name: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Authorization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("access denied: {reason}")]
    AccessDenied { reason: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Store Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("member not found: {id}")]
    MemberNotFound { id: String },

    #[error("duplicate member: {id}")]
    DuplicateMember { id: String },

    #[error("store error: {message}")]
    Store { message: String },

    // ─────────────────────────────────────────────────────────────────────────────
    // Serialization Errors
    // ─────────────────────────────────────────────────────────────────────────────
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// 권한 거부 에러 생성
    pub fn access_denied(reason: impl Into<String>) -> Self {
        Error::AccessDenied {
            reason: reason.into(),
        }
    }

    /// HTTP 상태 코드로 변환
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Error::PolicyParse { .. }
            | Error::UnknownRole { .. }
            | Error::UnknownResource { .. }
            | Error::UnknownAction { .. }
            | Error::Yaml(_) => 400,

            // 403 Forbidden
            Error::AccessDenied { .. } => 403,

            // 404 Not Found
            Error::MemberNotFound { .. } => 404,

            // 409 Conflict
            Error::DuplicateMember { .. } => 409,

            // 500 Internal Server Error
            Error::Store { .. } => 500,
        }
    }

    /// 에러 코드 (클라이언트용)
    pub fn code(&self) -> &'static str {
        match self {
            Error::PolicyParse { .. } => "POLICY_PARSE_ERROR",
            Error::UnknownRole { .. } => "UNKNOWN_ROLE",
            Error::UnknownResource { .. } => "UNKNOWN_RESOURCE",
            Error::UnknownAction { .. } => "UNKNOWN_ACTION",
            Error::AccessDenied { .. } => "ACCESS_DENIED",
            Error::MemberNotFound { .. } => "MEMBER_NOT_FOUND",
            Error::DuplicateMember { .. } => "DUPLICATE_MEMBER",
            Error::Store { .. } => "STORE_ERROR",
            Error::Yaml(_) => "YAML_ERROR",
        }
    }
}
