//! 회원 레코드
//!
//! 저장소에 보관되는 원본 데이터입니다. 화면/검색에는 이 타입을 직접 넘기지 않고
//! 반드시 [`crate::visibility::VisibilityResolver`]를 거친 projection을 사용합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;

use super::privacy::PrivacySettings;

/// 회원 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    /// 새 ID 생성
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 온보딩용 랜덤 ID 생성 (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// 내부 값 참조
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MemberId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&MemberId> for MemberId {
    fn from(value: &MemberId) -> Self {
        value.clone()
    }
}

/// 회원 레코드
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// 회원 ID
    pub id: MemberId,

    /// 이름
    pub name: String,

    /// 이메일 (노출 시에는 연락처 필드로 취급)
    pub email: String,

    /// 클럽 role
    pub role: Role,

    /// 리더십 직함 (예: "VP Education")
    #[serde(default)]
    pub leadership_roles: Vec<String>,

    /// 프로필
    #[serde(default)]
    pub profile: Profile,

    /// 생성 시각
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// 수정 시각
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// 프로필 (tier별)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub public: PublicProfile,

    #[serde(default)]
    pub member: MemberOnlyProfile,

    #[serde(default)]
    pub private: PrivateProfile,
}

/// Public tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    /// 프로필 사진 URL
    #[serde(default)]
    pub photo_url: String,

    /// 벤처 정보
    #[serde(default)]
    pub venture: Venture,

    /// 전문 분야
    #[serde(default)]
    pub expertise: Vec<String>,

    /// 소개
    #[serde(default)]
    pub bio: String,
}

/// 벤처(사업) 정보
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venture {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub industry: String,

    #[serde(default)]
    pub website: String,
}

/// Member-only tier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberOnlyProfile {
    /// 전화번호
    #[serde(default)]
    pub phone: String,

    /// 소셜 링크
    #[serde(default)]
    pub social_links: Vec<SocialLink>,

    /// 네트워킹 관심사
    #[serde(default)]
    pub networking: NetworkingInterests,

    /// 스피치/출석 진행도
    #[serde(default)]
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// 네트워킹 관심사
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkingInterests {
    #[serde(default)]
    pub interests: Vec<String>,

    #[serde(default)]
    pub looking_for: Vec<String>,

    #[serde(default)]
    pub offering: Vec<String>,
}

/// 스피치/출석 진행도
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub speeches_completed: u32,

    #[serde(default)]
    pub meetings_attended: u32,

    #[serde(default)]
    pub current_pathway: String,
}

/// Private tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateProfile {
    /// 개인 목표
    #[serde(default)]
    pub goals: String,

    /// 임원 메모
    #[serde(default)]
    pub officer_notes: String,
}

/// 온보딩 입력
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,

    #[serde(default = "default_role")]
    pub role: Role,

    #[serde(default)]
    pub leadership_roles: Vec<String>,

    #[serde(default)]
    pub profile: Profile,
}

fn default_role() -> Role {
    Role::Member
}

impl NewMember {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Member,
            leadership_roles: Vec::new(),
            profile: Profile::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}

impl MemberRecord {
    /// 레코드 생성 (ID 지정)
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: Role::Member,
            leadership_roles: Vec::new(),
            profile: Profile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 온보딩: 레코드와 프라이버시 설정을 함께 생성 (1:1)
    ///
    /// 설정은 모든 플래그가 꺼진 상태로 시작합니다.
    pub fn onboard(new: NewMember) -> (Self, PrivacySettings) {
        let now = Utc::now();
        let record = Self {
            id: MemberId::generate(),
            name: new.name,
            email: new.email,
            role: new.role,
            leadership_roles: new.leadership_roles,
            profile: new.profile,
            created_at: now,
            updated_at: now,
        };
        (record, PrivacySettings::default())
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_leadership_roles(mut self, roles: Vec<String>) -> Self {
        self.leadership_roles = roles;
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboard_creates_closed_settings() {
        let new = NewMember::new("Ada", "ada@example.com").with_role(Role::Officer);
        let (record, settings) = MemberRecord::onboard(new);

        assert_eq!(record.name, "Ada");
        assert_eq!(record.role, Role::Officer);
        assert_eq!(record.id.as_str().len(), 36);
        assert_eq!(settings, PrivacySettings::default());
        assert!(!settings.allow_officer_notes);
    }

    #[test]
    fn test_parse_partial_record() {
        let json = r#"{
            "id": "m_1",
            "name": "Grace",
            "email": "grace@example.com",
            "role": "member",
            "profile": { "public": { "bio": "Builds compilers" } }
        }"#;

        let record: MemberRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, MemberId::new("m_1"));
        assert_eq!(record.profile.public.bio, "Builds compilers");
        assert!(record.profile.member.phone.is_empty());
        assert!(record.leadership_roles.is_empty());
    }
}
