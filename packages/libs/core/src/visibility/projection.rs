//! 가시 projection
//!
//! 숨겨진 필드는 `None`이고 직렬화 시 키 자체가 생략됩니다. 값이 비어 있는
//! 필드(`Some("")`, `Some(vec![])`)와 숨겨진 필드는 타입 수준에서 구분됩니다.
//!
//! projection은 [`super::VisibilityResolver`]만 생성할 수 있습니다.

use serde::Serialize;

use crate::auth::Role;
use crate::member::{
    MemberId, MemberRecord, NetworkingInterests, ProfileField, Progress, SocialLink, Venture,
};

/// 연락처 (member-only tier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

/// 조회자에게 허용된 회원 데이터
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleProjection {
    // Identity (항상 포함)
    pub(crate) id: MemberId,
    pub(crate) name: String,
    pub(crate) role: Role,
    pub(crate) leadership_roles: Vec<String>,

    // Public tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) photo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) venture: Option<Venture>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) expertise: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) bio: Option<String>,

    // Member-only tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) contact: Option<ContactInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) social_links: Option<Vec<SocialLink>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) networking: Option<NetworkingInterests>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) progress: Option<Progress>,

    // Private tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) goals: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) officer_notes: Option<String>,
}

impl VisibleProjection {
    /// 신원 필드만 담은 projection
    pub(crate) fn identity(record: &MemberRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            role: record.role,
            leadership_roles: record.leadership_roles.clone(),
            photo_url: None,
            venture: None,
            expertise: None,
            bio: None,
            contact: None,
            social_links: None,
            networking: None,
            progress: None,
            goals: None,
            officer_notes: None,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn leadership_roles(&self) -> &[String] {
        &self.leadership_roles
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn venture(&self) -> Option<&Venture> {
        self.venture.as_ref()
    }

    pub fn expertise(&self) -> Option<&[String]> {
        self.expertise.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn contact(&self) -> Option<&ContactInfo> {
        self.contact.as_ref()
    }

    pub fn social_links(&self) -> Option<&[SocialLink]> {
        self.social_links.as_deref()
    }

    pub fn networking(&self) -> Option<&NetworkingInterests> {
        self.networking.as_ref()
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    pub fn goals(&self) -> Option<&str> {
        self.goals.as_deref()
    }

    pub fn officer_notes(&self) -> Option<&str> {
        self.officer_notes.as_deref()
    }

    /// 필드 포함 여부
    pub fn contains(&self, field: ProfileField) -> bool {
        match field {
            ProfileField::Photo => self.photo_url.is_some(),
            ProfileField::Venture => self.venture.is_some(),
            ProfileField::Expertise => self.expertise.is_some(),
            ProfileField::Bio => self.bio.is_some(),
            ProfileField::ContactInfo => self.contact.is_some(),
            ProfileField::SocialLinks => self.social_links.is_some(),
            ProfileField::Networking => self.networking.is_some(),
            ProfileField::Progress => self.progress.is_some(),
            ProfileField::Goals => self.goals.is_some(),
            ProfileField::OfficerNotes => self.officer_notes.is_some(),
        }
    }

    /// 포함된 필드 목록
    pub fn visible_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| self.contains(*f))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_fields_are_omitted_from_json() {
        let record = MemberRecord::new("m_1", "Ada", "ada@example.com");
        let mut projection = VisibleProjection::identity(&record);
        projection.bio = Some(String::new());

        let json = serde_json::to_value(&projection).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.get("name").unwrap(), "Ada");
        // 비어 있지만 노출된 필드는 키가 존재
        assert_eq!(obj.get("bio").unwrap(), "");
        // 숨겨진 필드는 키가 없음 (null 아님)
        assert!(!obj.contains_key("contact"));
        assert!(!obj.contains_key("officer_notes"));
        assert!(!obj.contains_key("goals"));
    }

    #[test]
    fn test_visible_fields() {
        let record = MemberRecord::new("m_1", "Ada", "ada@example.com");
        let mut projection = VisibleProjection::identity(&record);
        assert!(projection.visible_fields().is_empty());

        projection.goals = Some("Run a marathon".to_string());
        assert_eq!(projection.visible_fields(), vec![ProfileField::Goals]);
        assert!(projection.contains(ProfileField::Goals));
        assert!(!projection.contains(ProfileField::OfficerNotes));
    }
}
