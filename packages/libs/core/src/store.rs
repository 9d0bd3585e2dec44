//! 회원 저장소 인터페이스
//!
//! 실제 영속 저장소(호스팅 DB)는 외부 협력자입니다. 이 모듈은 그 경계를
//! [`MemberStore`] trait으로 정의하고, 테스트/CLI용 메모리 구현을 제공합니다.
//!
//! 프라이버시 설정의 실시간 갱신은 `tokio::sync::watch` 채널로 전달합니다.
//! 구독자는 항상 최신 스냅샷을 받으며, 판정 결과를 캐시하지 않습니다.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::member::{MemberId, MemberRecord, PrivacySettings, PrivacySettingsPatch};

/// 설정 구독 수신자 (None = 미설정 또는 삭제됨)
pub type SettingsReceiver = watch::Receiver<Option<PrivacySettings>>;

/// 저장소 항목 (레코드 + 설정, 1:1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEntry {
    pub record: MemberRecord,

    #[serde(default)]
    pub settings: Option<PrivacySettings>,
}

/// 회원 저장소
pub trait MemberStore: Send + Sync {
    /// 레코드와 설정을 함께 저장
    fn insert(&self, record: MemberRecord, settings: Option<PrivacySettings>) -> Result<()>;

    /// 레코드 조회
    fn get(&self, id: &MemberId) -> Result<Option<MemberRecord>>;

    /// 현재 설정 스냅샷 조회
    fn settings(&self, id: &MemberId) -> Result<Option<PrivacySettings>>;

    /// 전체 목록
    fn list(&self) -> Result<Vec<MemberEntry>>;

    /// 레코드를 잠금 안에서 수정
    ///
    /// `update`가 에러를 반환하면 레코드는 변경되지 않습니다.
    fn modify_record(
        &self,
        id: &MemberId,
        update: &mut dyn FnMut(&mut MemberRecord) -> Result<()>,
    ) -> Result<MemberRecord>;

    /// 설정 교체 (구독자에게 전파)
    fn update_settings(&self, id: &MemberId, settings: PrivacySettings) -> Result<PrivacySettings>;

    /// 현재 설정에 변경 요청을 원자적으로 적용 (미설정이면 모두 OFF에서 시작)
    fn patch_settings(
        &self,
        id: &MemberId,
        patch: &PrivacySettingsPatch,
    ) -> Result<PrivacySettings>;

    /// 삭제 (설정과 프로필까지 함께 삭제)
    fn delete(&self, id: &MemberId) -> Result<MemberRecord>;

    /// 설정 변경 구독
    fn subscribe_settings(&self, id: &MemberId) -> Result<SettingsReceiver>;
}

struct Slot {
    record: MemberRecord,
    settings: watch::Sender<Option<PrivacySettings>>,
}

/// 메모리 저장소
#[derive(Default)]
pub struct InMemoryMemberStore {
    members: RwLock<BTreeMap<MemberId, Slot>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목 목록으로 초기화
    pub fn from_entries(entries: impl IntoIterator<Item = MemberEntry>) -> Result<Self> {
        let store = Self::new();
        for entry in entries {
            store.insert(entry.record, entry.settings)?;
        }
        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<MemberId, Slot>>> {
        self.members.read().map_err(|_| Error::Store {
            message: "member store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<MemberId, Slot>>> {
        self.members.write().map_err(|_| Error::Store {
            message: "member store lock poisoned".to_string(),
        })
    }
}

fn not_found(id: &MemberId) -> Error {
    Error::MemberNotFound { id: id.to_string() }
}

impl MemberStore for InMemoryMemberStore {
    fn insert(&self, record: MemberRecord, settings: Option<PrivacySettings>) -> Result<()> {
        let mut members = self.write()?;
        if members.contains_key(&record.id) {
            return Err(Error::DuplicateMember {
                id: record.id.to_string(),
            });
        }

        let (tx, _rx) = watch::channel(settings);
        members.insert(
            record.id.clone(),
            Slot {
                record,
                settings: tx,
            },
        );
        Ok(())
    }

    fn get(&self, id: &MemberId) -> Result<Option<MemberRecord>> {
        Ok(self.read()?.get(id).map(|slot| slot.record.clone()))
    }

    fn settings(&self, id: &MemberId) -> Result<Option<PrivacySettings>> {
        Ok(self
            .read()?
            .get(id)
            .and_then(|slot| slot.settings.borrow().clone()))
    }

    fn list(&self) -> Result<Vec<MemberEntry>> {
        Ok(self
            .read()?
            .values()
            .map(|slot| MemberEntry {
                record: slot.record.clone(),
                settings: slot.settings.borrow().clone(),
            })
            .collect())
    }

    fn modify_record(
        &self,
        id: &MemberId,
        update: &mut dyn FnMut(&mut MemberRecord) -> Result<()>,
    ) -> Result<MemberRecord> {
        let mut members = self.write()?;
        let slot = members.get_mut(id).ok_or_else(|| not_found(id))?;

        let mut next = slot.record.clone();
        update(&mut next)?;
        next.updated_at = Utc::now();
        slot.record = next;
        Ok(slot.record.clone())
    }

    fn update_settings(&self, id: &MemberId, settings: PrivacySettings) -> Result<PrivacySettings> {
        let members = self.read()?;
        let slot = members.get(id).ok_or_else(|| not_found(id))?;
        slot.settings.send_replace(Some(settings.clone()));
        Ok(settings)
    }

    fn patch_settings(
        &self,
        id: &MemberId,
        patch: &PrivacySettingsPatch,
    ) -> Result<PrivacySettings> {
        let members = self.write()?;
        let slot = members.get(id).ok_or_else(|| not_found(id))?;

        let mut updated = PrivacySettings::default();
        slot.settings.send_modify(|current| {
            let settings = current.get_or_insert_with(PrivacySettings::default);
            settings.apply(patch);
            updated = settings.clone();
        });
        Ok(updated)
    }

    fn delete(&self, id: &MemberId) -> Result<MemberRecord> {
        let slot = self.write()?.remove(id).ok_or_else(|| not_found(id))?;
        // 구독자에게 삭제를 알림 (이후 sender drop으로 채널 종료)
        slot.settings.send_replace(None);
        Ok(slot.record)
    }

    fn subscribe_settings(&self, id: &MemberId) -> Result<SettingsReceiver> {
        let members = self.read()?;
        let slot = members.get(id).ok_or_else(|| not_found(id))?;
        Ok(slot.settings.subscribe())
    }
}
