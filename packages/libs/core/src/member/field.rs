//! 프로필 필드 분류

use serde::{Deserialize, Serialize};

/// 가시성 tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// 익명에게도 노출 가능 (소유자 플래그로만 제어)
    Public,

    /// 인증된 회원에게만 노출 가능
    MemberOnly,

    /// 본인 및 임원/관리자만
    Private,
}

/// 프로필 필드 (가시성 판정 단위)
///
/// 신원 필드(id, name, role, 리더십 role)는 항상 노출되므로 여기에 포함되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    // Public tier
    Photo,
    Venture,
    Expertise,
    Bio,

    // Member-only tier
    ContactInfo,
    SocialLinks,
    Networking,
    Progress,

    // Private tier
    Goals,
    OfficerNotes,
}

impl ProfileField {
    pub const ALL: [ProfileField; 10] = [
        ProfileField::Photo,
        ProfileField::Venture,
        ProfileField::Expertise,
        ProfileField::Bio,
        ProfileField::ContactInfo,
        ProfileField::SocialLinks,
        ProfileField::Networking,
        ProfileField::Progress,
        ProfileField::Goals,
        ProfileField::OfficerNotes,
    ];

    /// 필드가 속한 tier
    pub fn tier(&self) -> Tier {
        match self {
            ProfileField::Photo
            | ProfileField::Venture
            | ProfileField::Expertise
            | ProfileField::Bio => Tier::Public,

            ProfileField::ContactInfo
            | ProfileField::SocialLinks
            | ProfileField::Networking
            | ProfileField::Progress => Tier::MemberOnly,

            ProfileField::Goals | ProfileField::OfficerNotes => Tier::Private,
        }
    }

    /// 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Photo => "photo",
            ProfileField::Venture => "venture",
            ProfileField::Expertise => "expertise",
            ProfileField::Bio => "bio",
            ProfileField::ContactInfo => "contact_info",
            ProfileField::SocialLinks => "social_links",
            ProfileField::Networking => "networking",
            ProfileField::Progress => "progress",
            ProfileField::Goals => "goals",
            ProfileField::OfficerNotes => "officer_notes",
        }
    }

    /// 특정 tier의 필드 목록
    pub fn in_tier(tier: Tier) -> impl Iterator<Item = ProfileField> {
        Self::ALL.into_iter().filter(move |f| f.tier() == tier)
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
