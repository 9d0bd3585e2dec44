//! 회원 디렉터리 서비스
//!
//! 저장소 경계에서 권한을 한 곳에서 강제합니다. 화면의 각 호출 지점이
//! 권한 검사를 빠뜨리더라도 변경 작업은 이 서비스를 통과해야 합니다.
//!
//! 조회는 매 호출마다 저장소의 최신 설정 스냅샷으로 projection을 다시 계산합니다.

use serde::Serialize;

use crate::auth::{Role, Viewer};
use crate::error::{Error, Result};
use crate::member::{
    MemberId, MemberRecord, NewMember, PrivacySettings, PrivacySettingsPatch, Profile,
};
use crate::permissions::{Action, Authorizer, Resource, RoleCapabilityTable, Target, TargetAction};
use crate::search::SearchMatcher;
use crate::store::{MemberStore, SettingsReceiver};
use crate::visibility::{VisibilityResolver, VisibleProjection};

/// 프로필 상세 화면의 수정/삭제 컨트롤 노출 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileControls {
    pub can_edit: bool,
    pub can_delete: bool,
}

/// 회원 디렉터리
pub struct Directory<S> {
    store: S,
    table: RoleCapabilityTable,
}

impl<S: MemberStore> Directory<S> {
    /// 새 디렉터리 생성
    pub fn new(store: S, table: RoleCapabilityTable) -> Self {
        Self { store, table }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn table(&self) -> &RoleCapabilityTable {
        &self.table
    }

    pub fn authorizer(&self) -> Authorizer<'_> {
        Authorizer::new(&self.table)
    }

    fn require(&self, id: &MemberId) -> Result<MemberRecord> {
        self.store
            .get(id)?
            .ok_or_else(|| Error::MemberNotFound { id: id.to_string() })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read paths
    // ─────────────────────────────────────────────────────────────────────────────

    /// 단일 회원 projection
    pub fn view(&self, viewer: &Viewer, id: &MemberId) -> Result<VisibleProjection> {
        let record = self.require(id)?;
        let settings = self.store.settings(id)?;
        Ok(VisibilityResolver::resolve_for(
            &record,
            settings.as_ref(),
            viewer,
        ))
    }

    /// 전체 목록 projection
    pub fn list(&self, viewer: &Viewer) -> Result<Vec<VisibleProjection>> {
        Ok(self
            .store
            .list()?
            .iter()
            .map(|entry| {
                VisibilityResolver::resolve_for(&entry.record, entry.settings.as_ref(), viewer)
            })
            .collect())
    }

    /// 검색 (projection 계산 후 필터링)
    pub fn search(&self, viewer: &Viewer, query: &str) -> Result<Vec<VisibleProjection>> {
        let projections = self.list(viewer)?;
        Ok(SearchMatcher::filter(projections, query).collect())
    }

    /// 리소스 작업 가능 여부 (RSVP, 출석 체크 등의 버튼 노출용)
    pub fn can(&self, viewer: &Viewer, resource: Resource, action: Action) -> bool {
        self.authorizer()
            .can_perform(viewer.effective_principal(), resource, action)
    }

    /// 프로필 상세 화면 컨트롤
    pub fn profile_controls(&self, viewer: &Viewer, id: &MemberId) -> Result<ProfileControls> {
        let record = self.require(id)?;
        let target = Target::member(&record);
        let authorizer = self.authorizer();
        let principal = viewer.effective_principal();

        Ok(ProfileControls {
            can_edit: authorizer.can_act_on_target(principal, &target, TargetAction::Edit),
            can_delete: authorizer.can_act_on_target(principal, &target, TargetAction::Delete),
        })
    }

    /// 설정 변경 구독
    pub fn subscribe_settings(&self, id: &MemberId) -> Result<SettingsReceiver> {
        self.store.subscribe_settings(id)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────────

    /// 온보딩: 레코드와 설정을 함께 생성
    ///
    /// officer/admin role을 가진 회원은 admin만 생성할 수 있습니다.
    pub fn onboard(&self, actor: &Viewer, new: NewMember) -> Result<MemberRecord> {
        let principal = actor.effective_principal();
        let authorizer = self.authorizer();
        authorizer.ensure_can_perform(principal, Resource::Members, Action::Create)?;

        if new.role != Role::Member && !principal.is_some_and(|p| p.is_admin()) {
            return Err(Error::access_denied(format!(
                "only admin can onboard a member with role '{}'",
                new.role
            )));
        }

        let (record, settings) = MemberRecord::onboard(new);
        self.store.insert(record.clone(), Some(settings))?;

        tracing::info!(member = %record.id, role = %record.role, "member onboarded");
        Ok(record)
    }

    /// 프로필 수정
    ///
    /// 임원 메모는 officer/admin만 변경할 수 있고, 그 외 수정에서는 저장소의 현재 값이
    /// 유지됩니다. 검사와 교체는 저장소 잠금 안에서 한 번에 수행합니다.
    pub fn update_profile(
        &self,
        actor: &Viewer,
        id: &MemberId,
        profile: Profile,
    ) -> Result<MemberRecord> {
        let principal = actor.effective_principal();
        let authorizer = self.authorizer();

        let updated = self.store.modify_record(id, &mut |record| {
            let target = Target::member(record);
            authorizer.ensure_can_act_on_target(principal, &target, TargetAction::Edit)?;

            let mut next = profile.clone();
            let current_notes = &record.profile.private.officer_notes;
            if &next.private.officer_notes != current_notes {
                let may_write_notes = principal.is_some_and(|p| !p.is(id))
                    && authorizer.can_perform(principal, Resource::OfficerNotes, Action::Update);
                if !may_write_notes {
                    next.private.officer_notes = current_notes.clone();
                }
            }

            record.profile = next;
            Ok(())
        })?;
        tracing::info!(member = %id, "profile updated");
        Ok(updated)
    }

    /// 프라이버시 설정 변경 (본인 또는 admin만)
    pub fn update_settings(
        &self,
        actor: &Viewer,
        id: &MemberId,
        patch: &PrivacySettingsPatch,
    ) -> Result<PrivacySettings> {
        let principal = actor.effective_principal();
        let allowed = principal.is_some_and(|p| p.is(id) || p.is_admin());
        if !allowed {
            return Err(Error::access_denied(
                "privacy settings can only be changed by their owner",
            ));
        }

        let updated = self.store.patch_settings(id, patch)?;
        tracing::info!(
            member = %id,
            enabled = ?updated.enabled_fields(),
            "privacy settings updated"
        );
        Ok(updated)
    }

    /// 회원 삭제 (설정/프로필 함께 삭제)
    pub fn delete_member(&self, actor: &Viewer, id: &MemberId) -> Result<MemberRecord> {
        let principal = actor.effective_principal();
        let record = self.require(id)?;
        self.authorizer().ensure_can_act_on_target(
            principal,
            &Target::member(&record),
            TargetAction::Delete,
        )?;

        let removed = self.store.delete(id)?;
        tracing::info!(member = %id, "member deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use crate::member::ProfileField;
    use crate::store::InMemoryMemberStore;
    use std::sync::Barrier;
    use std::thread;

    fn sample_directory() -> Directory<InMemoryMemberStore> {
        let store = InMemoryMemberStore::new();

        let mut maya = MemberRecord::new("m_1", "Maya", "maya@example.com");
        maya.profile.public.bio = "Solar hardware".to_string();
        maya.profile.member.phone = "555-0100".to_string();
        maya.profile.private.goals = "Keynote".to_string();
        maya.profile.private.officer_notes = "Mentor candidate".to_string();
        store
            .insert(
                maya,
                Some(PrivacySettings::default().with_flag(ProfileField::Bio, true)),
            )
            .unwrap();

        store
            .insert(
                MemberRecord::new("o_1", "Olu", "olu@example.com").with_role(Role::Officer),
                Some(PrivacySettings::default()),
            )
            .unwrap();
        store
            .insert(
                MemberRecord::new("o_2", "Ines", "ines@example.com").with_role(Role::Officer),
                Some(PrivacySettings::default()),
            )
            .unwrap();

        Directory::new(store, RoleCapabilityTable::default())
    }

    fn as_member(id: &str) -> Viewer {
        Viewer::authenticated(Principal::member(id))
    }

    fn as_officer(id: &str) -> Viewer {
        Viewer::authenticated(Principal::officer(id))
    }

    fn as_admin() -> Viewer {
        Viewer::authenticated(Principal::admin("a_1"))
    }

    #[test]
    fn test_view_uses_latest_settings() {
        let directory = sample_directory();
        let id = MemberId::new("m_1");
        let viewer = as_member("m_2");

        let before = directory.view(&viewer, &id).unwrap();
        assert!(before.contact().is_none());

        let patch = PrivacySettingsPatch {
            show_contact_info: Some(true),
            ..Default::default()
        };
        directory.update_settings(&as_member("m_1"), &id, &patch).unwrap();

        let after = directory.view(&viewer, &id).unwrap();
        assert_eq!(after.contact().map(|c| c.phone.as_str()), Some("555-0100"));
    }

    #[test]
    fn test_settings_only_changed_by_owner_or_admin() {
        let directory = sample_directory();
        let id = MemberId::new("m_1");
        let patch = PrivacySettingsPatch {
            allow_officer_notes: Some(true),
            ..Default::default()
        };

        let err = directory
            .update_settings(&as_officer("o_1"), &id, &patch)
            .unwrap_err();
        assert_eq!(err.code(), "ACCESS_DENIED");

        assert!(directory
            .update_settings(&Viewer::anonymous(), &id, &patch)
            .is_err());
        // 로그인했지만 인증되지 않은 본인
        assert!(directory
            .update_settings(&Viewer::unauthenticated(Principal::member("m_1")), &id, &patch)
            .is_err());

        let updated = directory.update_settings(&as_admin(), &id, &patch).unwrap();
        assert!(updated.allow_officer_notes);
        assert!(updated.show_bio);
    }

    #[test]
    fn test_concurrent_settings_patches_are_kept() {
        let id = MemberId::new("m_1");
        let owner_patch = PrivacySettingsPatch {
            show_photo: Some(true),
            ..Default::default()
        };
        let admin_patch = PrivacySettingsPatch {
            show_contact_info: Some(true),
            ..Default::default()
        };

        for _ in 0..500 {
            let directory = sample_directory();
            let barrier = Barrier::new(2);

            thread::scope(|s| {
                s.spawn(|| {
                    barrier.wait();
                    directory
                        .update_settings(&as_member("m_1"), &id, &owner_patch)
                        .unwrap();
                });
                s.spawn(|| {
                    barrier.wait();
                    directory
                        .update_settings(&as_admin(), &id, &admin_patch)
                        .unwrap();
                });
            });

            let settings = directory.store().settings(&id).unwrap().unwrap();
            assert!(settings.show_photo);
            assert!(settings.show_contact_info);
            assert!(settings.show_bio);
        }
    }

    #[test]
    fn test_concurrent_self_edit_keeps_officer_note() {
        let id = MemberId::new("m_1");

        let mut self_edit = Profile::default();
        self_edit.public.bio = "New bio".to_string();

        let mut officer_edit = Profile::default();
        officer_edit.public.bio = "Solar hardware".to_string();
        officer_edit.private.officer_notes = "Ready to mentor".to_string();

        for _ in 0..500 {
            let directory = sample_directory();
            let barrier = Barrier::new(2);

            thread::scope(|s| {
                s.spawn(|| {
                    barrier.wait();
                    directory
                        .update_profile(&as_member("m_1"), &id, self_edit.clone())
                        .unwrap();
                });
                s.spawn(|| {
                    barrier.wait();
                    directory
                        .update_profile(&as_officer("o_1"), &id, officer_edit.clone())
                        .unwrap();
                });
            });

            let record = directory.store().get(&id).unwrap().unwrap();
            assert_eq!(record.profile.private.officer_notes, "Ready to mentor");
        }
    }

    #[test]
    fn test_settings_subscription_sees_update() {
        let directory = sample_directory();
        let id = MemberId::new("m_1");
        let mut rx = directory.subscribe_settings(&id).unwrap();

        let patch = PrivacySettingsPatch {
            show_photo: Some(true),
            ..Default::default()
        };
        directory.update_settings(&as_member("m_1"), &id, &patch).unwrap();

        assert!(rx.has_changed().unwrap());
        let latest = rx.borrow_and_update().clone().unwrap();
        assert!(latest.show_photo);
        assert!(latest.show_bio);
    }

    #[test]
    fn test_officer_cannot_edit_other_officer() {
        let directory = sample_directory();

        let err = directory
            .update_profile(&as_officer("o_1"), &MemberId::new("o_2"), Profile::default())
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = directory
            .delete_member(&as_officer("o_1"), &MemberId::new("o_2"))
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        // member 소유 프로필은 가능
        let mut profile = Profile::default();
        profile.public.bio = "Edited by officer".to_string();
        let updated = directory
            .update_profile(&as_officer("o_1"), &MemberId::new("m_1"), profile)
            .unwrap();
        assert_eq!(updated.profile.public.bio, "Edited by officer");
    }

    #[test]
    fn test_self_edit_preserves_officer_notes() {
        let directory = sample_directory();
        let id = MemberId::new("m_1");

        let mut profile = Profile::default();
        profile.public.bio = "New bio".to_string();
        profile.private.officer_notes = "I am great".to_string();

        let updated = directory.update_profile(&as_member("m_1"), &id, profile).unwrap();
        assert_eq!(updated.profile.public.bio, "New bio");
        assert_eq!(updated.profile.private.officer_notes, "Mentor candidate");

        let mut profile = updated.profile.clone();
        profile.private.officer_notes = "Ready to mentor".to_string();
        let updated = directory.update_profile(&as_officer("o_1"), &id, profile).unwrap();
        assert_eq!(updated.profile.private.officer_notes, "Ready to mentor");
    }

    #[test]
    fn test_member_cannot_edit_others() {
        let directory = sample_directory();
        assert!(directory
            .update_profile(&as_member("m_2"), &MemberId::new("m_1"), Profile::default())
            .is_err());
        assert!(directory
            .delete_member(&as_member("m_2"), &MemberId::new("m_1"))
            .is_err());
    }

    #[test]
    fn test_delete_cascades() {
        let directory = sample_directory();
        let id = MemberId::new("m_1");

        directory.delete_member(&as_officer("o_1"), &id).unwrap();

        assert!(directory.store().get(&id).unwrap().is_none());
        assert!(directory.store().settings(&id).unwrap().is_none());
        let err = directory.view(&Viewer::anonymous(), &id).unwrap_err();
        assert_eq!(err.code(), "MEMBER_NOT_FOUND");
    }

    #[test]
    fn test_onboard() {
        let directory = sample_directory();

        let err = directory
            .onboard(&as_member("m_1"), NewMember::new("Zed", "zed@example.com"))
            .unwrap_err();
        assert_eq!(err.code(), "ACCESS_DENIED");

        let record = directory
            .onboard(&as_officer("o_1"), NewMember::new("Zed", "zed@example.com"))
            .unwrap();
        assert_eq!(
            directory.store().settings(&record.id).unwrap(),
            Some(PrivacySettings::default())
        );

        // officer는 officer를 만들 수 없음
        assert!(directory
            .onboard(
                &as_officer("o_1"),
                NewMember::new("Vic", "vic@example.com").with_role(Role::Officer)
            )
            .is_err());
        assert!(directory
            .onboard(
                &as_admin(),
                NewMember::new("Vic", "vic@example.com").with_role(Role::Officer)
            )
            .is_ok());
    }

    #[test]
    fn test_search_respects_visibility() {
        let directory = sample_directory();

        let hits = directory.search(&Viewer::anonymous(), "solar").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "Maya");

        // phone은 숨겨져 있고 검색 대상도 아님
        assert!(directory.search(&as_member("m_2"), "555").unwrap().is_empty());
        assert_eq!(directory.search(&Viewer::anonymous(), "").unwrap().len(), 3);
    }

    #[test]
    fn test_profile_controls() {
        let directory = sample_directory();
        let maya = MemberId::new("m_1");
        let ines = MemberId::new("o_2");

        let controls = directory.profile_controls(&as_officer("o_1"), &maya).unwrap();
        assert_eq!(
            controls,
            ProfileControls {
                can_edit: true,
                can_delete: true
            }
        );

        let controls = directory.profile_controls(&as_officer("o_1"), &ines).unwrap();
        assert!(!controls.can_edit && !controls.can_delete);

        let controls = directory.profile_controls(&Viewer::anonymous(), &maya).unwrap();
        assert!(!controls.can_edit);
    }

    #[test]
    fn test_action_gate() {
        let directory = sample_directory();

        assert!(directory.can(&as_member("m_1"), Resource::Rsvps, Action::Create));
        assert!(!directory.can(&as_member("m_1"), Resource::Attendance, Action::Create));
        assert!(directory.can(&as_officer("o_1"), Resource::Attendance, Action::Create));
        assert!(!directory.can(&Viewer::anonymous(), Resource::Events, Action::Read));
        assert!(!directory.can(
            &Viewer::unauthenticated(Principal::admin("a_1")),
            Resource::Events,
            Action::Read
        ));
    }
}
