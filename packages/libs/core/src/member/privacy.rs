//! 프라이버시 설정
//!
//! Public/MemberOnly tier 필드마다 하나의 플래그를 가집니다. 모든 필드는
//! `#[serde(default)]`이므로 누락된 플래그는 `false`로 해석됩니다 (fail closed).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{ProfileField, Tier};

/// 회원별 프라이버시 설정
///
/// 기본값은 모든 플래그가 꺼진 상태입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    // Public tier
    #[serde(default)]
    pub show_photo: bool,

    #[serde(default)]
    pub show_venture: bool,

    #[serde(default)]
    pub show_expertise: bool,

    #[serde(default)]
    pub show_bio: bool,

    // Member-only tier
    #[serde(default)]
    pub show_contact_info: bool,

    #[serde(default)]
    pub show_social_links: bool,

    #[serde(default)]
    pub show_networking: bool,

    #[serde(default)]
    pub show_progress: bool,

    /// 임원 메모 계산 허용 여부
    #[serde(default)]
    pub allow_officer_notes: bool,

    /// 마지막 변경 시각
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 설정 변경 요청 (지정된 필드만 변경)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_photo: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_venture: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_expertise: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_bio: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_contact_info: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_social_links: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_networking: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_progress: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_officer_notes: Option<bool>,
}

impl PrivacySettings {
    /// 모든 플래그를 켠 설정
    pub fn all_visible() -> Self {
        Self {
            show_photo: true,
            show_venture: true,
            show_expertise: true,
            show_bio: true,
            show_contact_info: true,
            show_social_links: true,
            show_networking: true,
            show_progress: true,
            allow_officer_notes: true,
            updated_at: None,
        }
    }

    /// 필드의 소유자 플래그
    ///
    /// Private tier는 플래그로 제어되지 않으므로 항상 `false`입니다
    /// (`allow_officer_notes`는 [`Self::allow_officer_notes`]로 별도 확인).
    pub fn flag(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::Photo => self.show_photo,
            ProfileField::Venture => self.show_venture,
            ProfileField::Expertise => self.show_expertise,
            ProfileField::Bio => self.show_bio,
            ProfileField::ContactInfo => self.show_contact_info,
            ProfileField::SocialLinks => self.show_social_links,
            ProfileField::Networking => self.show_networking,
            ProfileField::Progress => self.show_progress,
            ProfileField::Goals | ProfileField::OfficerNotes => false,
        }
    }

    /// 필드 플래그 설정
    ///
    /// Private tier 필드는 무시됩니다.
    pub fn set_flag(&mut self, field: ProfileField, value: bool) {
        match field {
            ProfileField::Photo => self.show_photo = value,
            ProfileField::Venture => self.show_venture = value,
            ProfileField::Expertise => self.show_expertise = value,
            ProfileField::Bio => self.show_bio = value,
            ProfileField::ContactInfo => self.show_contact_info = value,
            ProfileField::SocialLinks => self.show_social_links = value,
            ProfileField::Networking => self.show_networking = value,
            ProfileField::Progress => self.show_progress = value,
            ProfileField::Goals | ProfileField::OfficerNotes => {}
        }
    }

    pub fn with_flag(mut self, field: ProfileField, value: bool) -> Self {
        self.set_flag(field, value);
        self
    }

    pub fn with_officer_notes(mut self, allow: bool) -> Self {
        self.allow_officer_notes = allow;
        self
    }

    /// 변경 요청 적용
    pub fn apply(&mut self, patch: &PrivacySettingsPatch) {
        let pairs = [
            (ProfileField::Photo, patch.show_photo),
            (ProfileField::Venture, patch.show_venture),
            (ProfileField::Expertise, patch.show_expertise),
            (ProfileField::Bio, patch.show_bio),
            (ProfileField::ContactInfo, patch.show_contact_info),
            (ProfileField::SocialLinks, patch.show_social_links),
            (ProfileField::Networking, patch.show_networking),
            (ProfileField::Progress, patch.show_progress),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                self.set_flag(field, value);
            }
        }
        if let Some(allow) = patch.allow_officer_notes {
            self.allow_officer_notes = allow;
        }
        self.updated_at = Some(Utc::now());
    }

    /// 켜져 있는 플래그 목록 (로깅/표시용)
    pub fn enabled_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| f.tier() != Tier::Private && self.flag(*f))
            .collect()
    }
}
