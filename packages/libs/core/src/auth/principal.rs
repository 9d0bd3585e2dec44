//! Principal / Role / Viewer

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::member::MemberId;

/// 클럽 내 role
///
/// 익명은 role이 아니라 Principal이 없는 상태로 표현합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// 일반 회원
    Member,

    /// 임원
    Officer,

    /// 관리자 - 권한 테이블을 우회
    Admin,
}

impl Role {
    /// 모든 role (테이블 순회용)
    pub const ALL: [Role; 3] = [Role::Member, Role::Officer, Role::Admin];

    /// 문자열에서 파싱 (알 수 없는 값은 None)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "member" => Some(Role::Member),
            "officer" => Some(Role::Officer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// 문자열에서 파싱 (알 수 없는 값은 [`Error::UnknownRole`])
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| Error::UnknownRole {
            name: s.to_string(),
        })
    }

    /// 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Officer => "officer",
            Role::Admin => "admin",
        }
    }

    /// officer 또는 admin 여부
    pub fn is_officer_or_admin(&self) -> bool {
        matches!(self, Role::Officer | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 요청 주체
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// 회원 ID
    pub id: MemberId,

    /// role
    pub role: Role,
}

impl Principal {
    /// 새 Principal 생성
    pub fn new(id: impl Into<MemberId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn member(id: impl Into<MemberId>) -> Self {
        Self::new(id, Role::Member)
    }

    pub fn officer(id: impl Into<MemberId>) -> Self {
        Self::new(id, Role::Officer)
    }

    pub fn admin(id: impl Into<MemberId>) -> Self {
        Self::new(id, Role::Admin)
    }

    /// 특정 회원 본인인지 확인
    pub fn is(&self, id: &MemberId) -> bool {
        &self.id == id
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// 조회 주체 (Principal + 인증 상태)
///
/// 두 값은 독립적입니다. `principal`이 있어도 `is_authenticated = false`이면
/// 익명으로 평가됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// 요청 주체 (없으면 익명)
    #[serde(default)]
    pub principal: Option<Principal>,

    /// 인증 여부
    #[serde(default)]
    pub is_authenticated: bool,
}

impl Viewer {
    /// 익명 조회자
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 인증된 조회자
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            is_authenticated: true,
        }
    }

    /// 로그인은 되어 있지만 익명으로 평가되는 조회자
    pub fn unauthenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            is_authenticated: false,
        }
    }

    /// 판정에 실제로 사용되는 Principal
    ///
    /// 인증되지 않은 상태라면 Principal이 있어도 None을 반환합니다.
    pub fn effective_principal(&self) -> Option<&Principal> {
        if self.is_authenticated {
            self.principal.as_ref()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("officer"), Some(Role::Officer));
        assert_eq!(Role::from_str(" Admin "), Some(Role::Admin));
        assert_eq!(Role::from_str("anonymous"), None);
        assert_eq!(Role::from_str(""), None);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Admin").unwrap(), Role::Admin);
        let err = Role::parse("president").unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_ROLE");
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"officer\"").unwrap();
        assert_eq!(role, Role::Officer);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_effective_principal() {
        let anonymous = Viewer::anonymous();
        assert!(anonymous.effective_principal().is_none());

        let member = Viewer::authenticated(Principal::member("m_1"));
        assert_eq!(
            member.effective_principal().map(|p| p.id.as_str()),
            Some("m_1")
        );

        // 로그인 상태지만 익명으로 평가
        let transitional = Viewer::unauthenticated(Principal::officer("o_1"));
        assert!(transitional.effective_principal().is_none());
    }
}
