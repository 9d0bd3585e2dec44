//! 가시성 판정기
//!
//! (레코드, 프라이버시 설정, 조회자) → [`VisibleProjection`]
//!
//! # 규칙
//!
//! | Tier | 포함 조건 |
//! |------|-----------|
//! | Identity | 항상 |
//! | Public | 소유자 플래그 ON, 또는 본인 |
//! | MemberOnly | 인증됨 AND (플래그 ON 또는 본인) |
//! | Private (목표) | 본인 또는 officer/admin |
//! | 임원 메모 | officer/admin AND `allow_officer_notes` AND 본인 아님 |
//!
//! 인증되지 않은 조회자는 Principal이 있어도 익명으로 평가합니다.
//! 설정이 없으면 모든 플래그가 꺼진 것으로 간주합니다.

use crate::auth::{Principal, Viewer};
use crate::member::{MemberRecord, PrivacySettings, ProfileField, Tier};

use super::projection::{ContactInfo, VisibleProjection};

/// 설정이 없는 회원에게 적용되는 값 (모두 OFF)
static CLOSED: PrivacySettings = PrivacySettings {
    show_photo: false,
    show_venture: false,
    show_expertise: false,
    show_bio: false,
    show_contact_info: false,
    show_social_links: false,
    show_networking: false,
    show_progress: false,
    allow_officer_notes: false,
    updated_at: None,
};

/// 가시성 판정기
///
/// 상태가 없는 순수 함수 모음입니다. 동시에 얼마든지 호출해도 됩니다.
pub struct VisibilityResolver;

impl VisibilityResolver {
    /// projection 계산
    ///
    /// # Arguments
    /// * `record` - 원본 회원 레코드
    /// * `settings` - 회원의 프라이버시 설정 (None = 미설정, 모두 OFF)
    /// * `principal` - 조회 주체 (None = 익명)
    /// * `is_authenticated` - 인증 여부 (principal과 독립)
    pub fn resolve(
        record: &MemberRecord,
        settings: Option<&PrivacySettings>,
        principal: Option<&Principal>,
        is_authenticated: bool,
    ) -> VisibleProjection {
        let scope = ViewScope::new(record, settings, principal, is_authenticated);
        let profile = &record.profile;

        let mut projection = VisibleProjection::identity(record);

        if scope.allows(ProfileField::Photo) {
            projection.photo_url = Some(profile.public.photo_url.clone());
        }
        if scope.allows(ProfileField::Venture) {
            projection.venture = Some(profile.public.venture.clone());
        }
        if scope.allows(ProfileField::Expertise) {
            projection.expertise = Some(profile.public.expertise.clone());
        }
        if scope.allows(ProfileField::Bio) {
            projection.bio = Some(profile.public.bio.clone());
        }

        if scope.allows(ProfileField::ContactInfo) {
            projection.contact = Some(ContactInfo {
                email: record.email.clone(),
                phone: profile.member.phone.clone(),
            });
        }
        if scope.allows(ProfileField::SocialLinks) {
            projection.social_links = Some(profile.member.social_links.clone());
        }
        if scope.allows(ProfileField::Networking) {
            projection.networking = Some(profile.member.networking.clone());
        }
        if scope.allows(ProfileField::Progress) {
            projection.progress = Some(profile.member.progress.clone());
        }

        if scope.allows(ProfileField::Goals) {
            projection.goals = Some(profile.private.goals.clone());
        }
        if scope.allows(ProfileField::OfficerNotes) {
            projection.officer_notes = Some(profile.private.officer_notes.clone());
        }

        tracing::trace!(
            member = %record.id,
            viewer = ?principal.map(|p| p.id.as_str()),
            authenticated = is_authenticated,
            fields = ?projection.visible_fields(),
            "resolved projection"
        );

        projection
    }

    /// [`Viewer`]로 projection 계산
    pub fn resolve_for(
        record: &MemberRecord,
        settings: Option<&PrivacySettings>,
        viewer: &Viewer,
    ) -> VisibleProjection {
        Self::resolve(
            record,
            settings,
            viewer.principal.as_ref(),
            viewer.is_authenticated,
        )
    }

    /// 단일 필드 가시 여부
    pub fn is_visible(
        field: ProfileField,
        record: &MemberRecord,
        settings: Option<&PrivacySettings>,
        principal: Option<&Principal>,
        is_authenticated: bool,
    ) -> bool {
        ViewScope::new(record, settings, principal, is_authenticated).allows(field)
    }
}

/// 한 번의 판정에 필요한 사실들
struct ViewScope<'a> {
    settings: &'a PrivacySettings,
    is_authenticated: bool,
    is_self: bool,
    is_officer_or_admin: bool,
}

impl<'a> ViewScope<'a> {
    fn new(
        record: &MemberRecord,
        settings: Option<&'a PrivacySettings>,
        principal: Option<&Principal>,
        is_authenticated: bool,
    ) -> Self {
        // 인증되지 않았다면 Principal은 판정에 쓰지 않음
        let principal = if is_authenticated { principal } else { None };

        Self {
            settings: settings.unwrap_or(&CLOSED),
            is_authenticated,
            is_self: principal.is_some_and(|p| p.is(&record.id)),
            is_officer_or_admin: principal.is_some_and(|p| p.role.is_officer_or_admin()),
        }
    }

    fn allows(&self, field: ProfileField) -> bool {
        match field.tier() {
            Tier::Public => self.is_self || self.settings.flag(field),
            Tier::MemberOnly => {
                self.is_authenticated && (self.is_self || self.settings.flag(field))
            }
            Tier::Private => match field {
                ProfileField::OfficerNotes => {
                    self.is_officer_or_admin
                        && self.settings.allow_officer_notes
                        && !self.is_self
                }
                _ => self.is_self || self.is_officer_or_admin,
            },
        }
    }
}
