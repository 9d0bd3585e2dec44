//! 권한 평가기
//!
//! 두 개의 진입점을 제공합니다:
//!
//! - [`Authorizer::can_perform`]: role × resource × action (권한 테이블)
//! - [`Authorizer::can_act_on_target`]: 프로필 수정/삭제 (소유권 규칙)
//!
//! admin 우회와 officer 비대칭 규칙은 이 파일에만 존재합니다.

use serde::{Deserialize, Serialize};

use super::policy::{Action, Resource, RoleCapabilityTable};
use crate::auth::{Principal, Role};
use crate::error::{Error, Result};
use crate::member::{MemberId, MemberRecord};

/// 권한 평가 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// 허용 여부
    pub allowed: bool,

    /// 거부 사유 (allowed=false인 경우)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Decision {
    /// 허용 결과 생성
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// 거부 결과 생성
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    /// 거부라면 [`Error::AccessDenied`]로 변환
    pub fn into_result(self) -> Result<()> {
        if self.allowed {
            Ok(())
        } else {
            Err(Error::AccessDenied {
                reason: self.reason.unwrap_or_else(|| "access denied".to_string()),
            })
        }
    }
}

/// 프로필 대상 작업
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAction {
    Edit,
    Delete,
}

impl TargetAction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "edit" | "update" => Some(TargetAction::Edit),
            "delete" => Some(TargetAction::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetAction::Edit => "edit",
            TargetAction::Delete => "delete",
        }
    }
}

/// 작업 대상 (프로필)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// 대상 ID
    pub id: MemberId,

    /// 대상 소유자의 role (None = 소유자 없음)
    pub owner_role: Option<Role>,
}

impl Target {
    pub fn new(id: impl Into<MemberId>, owner_role: Option<Role>) -> Self {
        Self {
            id: id.into(),
            owner_role,
        }
    }

    /// 회원 레코드 대상
    pub fn member(record: &MemberRecord) -> Self {
        Self::new(&record.id, Some(record.role))
    }
}

/// 권한 평가기
pub struct Authorizer<'a> {
    table: &'a RoleCapabilityTable,
}

impl<'a> Authorizer<'a> {
    /// 새 평가기 생성
    pub fn new(table: &'a RoleCapabilityTable) -> Self {
        Self { table }
    }

    /// 리소스 작업 권한 평가
    ///
    /// 1. Principal 없음 → 거부
    /// 2. admin → 허용
    /// 3. 테이블에 (role, resource) 항목이 없으면 거부
    /// 4. 항목의 작업 플래그
    pub fn evaluate(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        action: Action,
    ) -> Decision {
        let principal = match principal {
            Some(p) => p,
            None => return Decision::deny("authentication required"),
        };

        if principal.is_admin() {
            return Decision::allow();
        }

        match self.table.get(principal.role, resource) {
            Some(caps) if caps.allows(action) => Decision::allow(),
            Some(_) => Decision::deny(format!(
                "role '{}' cannot {} {}",
                principal.role, action, resource
            )),
            None => Decision::deny(format!(
                "no capability entry for role '{}' on {}",
                principal.role, resource
            )),
        }
    }

    /// `principal`이 `resource`에 대해 `action`을 수행할 수 있는지 확인
    pub fn can_perform(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        action: Action,
    ) -> bool {
        let decision = self.evaluate(principal, resource, action);
        if let Some(reason) = &decision.reason {
            tracing::debug!(
                principal = ?principal.map(|p| p.id.as_str()),
                %resource,
                %action,
                reason = reason.as_str(),
                "capability denied"
            );
        }
        decision.allowed
    }

    /// 이름으로 권한 확인
    ///
    /// 알 수 없는 리소스/작업 이름은 admin을 포함해 항상 거부합니다.
    pub fn can_perform_named(
        &self,
        principal: Option<&Principal>,
        resource: &str,
        action: &str,
    ) -> bool {
        match (Resource::from_str(resource), Action::from_str(action)) {
            (Some(resource), Some(action)) => self.can_perform(principal, resource, action),
            _ => {
                tracing::debug!(resource, action, "unknown resource or action name");
                false
            }
        }
    }

    /// 권한이 없으면 [`Error::AccessDenied`]
    pub fn ensure_can_perform(
        &self,
        principal: Option<&Principal>,
        resource: Resource,
        action: Action,
    ) -> Result<()> {
        self.evaluate(principal, resource, action).into_result()
    }

    /// 프로필 대상 작업 평가
    ///
    /// 본인 → 허용, admin → 허용, officer는 member 소유(또는 소유자 없음) 대상만 허용.
    pub fn evaluate_target(
        &self,
        principal: Option<&Principal>,
        target: &Target,
        action: TargetAction,
    ) -> Decision {
        let principal = match principal {
            Some(p) => p,
            None => return Decision::deny("authentication required"),
        };

        if principal.is(&target.id) {
            return Decision::allow();
        }

        match principal.role {
            Role::Admin => Decision::allow(),
            Role::Officer => match target.owner_role {
                None | Some(Role::Member) => Decision::allow(),
                Some(owner) => Decision::deny(format!(
                    "officer cannot {} a profile owned by {}",
                    action.as_str(),
                    owner
                )),
            },
            Role::Member => Decision::deny(format!(
                "member cannot {} another member's profile",
                action.as_str()
            )),
        }
    }

    /// `principal`이 대상 프로필에 `action`을 수행할 수 있는지 확인
    pub fn can_act_on_target(
        &self,
        principal: Option<&Principal>,
        target: &Target,
        action: TargetAction,
    ) -> bool {
        let decision = self.evaluate_target(principal, target, action);
        if let Some(reason) = &decision.reason {
            tracing::debug!(
                principal = ?principal.map(|p| p.id.as_str()),
                target = %target.id,
                reason = reason.as_str(),
                "target action denied"
            );
        }
        decision.allowed
    }

    /// 권한이 없으면 [`Error::AccessDenied`]
    pub fn ensure_can_act_on_target(
        &self,
        principal: Option<&Principal>,
        target: &Target,
        action: TargetAction,
    ) -> Result<()> {
        self.evaluate_target(principal, target, action).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::Capabilities;

    fn sample_table() -> RoleCapabilityTable {
        let yaml = r#"
roles:
  member:
    events: [read]
    rsvps: [create, read, update, delete]
  officer:
    events: [create, read, update, delete]
    attendance: [create, read, update]
"#;
        RoleCapabilityTable::from_yaml(yaml).unwrap()
    }

    #[test]
    fn test_anonymous_is_denied_everything() {
        let table = sample_table();
        let authorizer = Authorizer::new(&table);

        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(!authorizer.can_perform(None, resource, action));
            }
        }
    }

    #[test]
    fn test_admin_bypasses_table() {
        let empty = RoleCapabilityTable::empty();
        let authorizer = Authorizer::new(&empty);
        let admin = Principal::admin("a_1");

        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(authorizer.can_perform(Some(&admin), resource, action));
            }
        }
    }

    #[test]
    fn test_role_based_access() {
        let table = sample_table();
        let authorizer = Authorizer::new(&table);
        let member = Principal::member("m_1");
        let officer = Principal::officer("o_1");

        assert!(authorizer.can_perform(Some(&member), Resource::Events, Action::Read));
        assert!(!authorizer.can_perform(Some(&member), Resource::Events, Action::Create));
        assert!(authorizer.can_perform(Some(&member), Resource::Rsvps, Action::Delete));

        assert!(authorizer.can_perform(Some(&officer), Resource::Attendance, Action::Update));
        assert!(!authorizer.can_perform(Some(&officer), Resource::Attendance, Action::Delete));
    }

    #[test]
    fn test_missing_entry_fails_closed() {
        let table = sample_table();
        let authorizer = Authorizer::new(&table);
        let member = Principal::member("m_1");

        // member에는 attendance 항목이 없음
        let decision = authorizer.evaluate(Some(&member), Resource::Attendance, Action::Read);
        assert!(!decision.allowed);
        assert!(decision.reason.unwrap().contains("no capability entry"));
    }

    #[test]
    fn test_explicitly_empty_entry_denies() {
        let mut table = RoleCapabilityTable::empty();
        table.set(Role::Officer, Resource::Settings, Capabilities::none());
        let authorizer = Authorizer::new(&table);

        for action in Action::ALL {
            assert!(!authorizer.can_perform(
                Some(&Principal::officer("o_1")),
                Resource::Settings,
                action
            ));
        }
    }

    #[test]
    fn test_unknown_names_deny_even_admin() {
        let table = sample_table();
        let authorizer = Authorizer::new(&table);
        let admin = Principal::admin("a_1");

        assert!(authorizer.can_perform_named(Some(&admin), "events", "delete"));
        assert!(!authorizer.can_perform_named(Some(&admin), "boats", "read"));
        assert!(!authorizer.can_perform_named(Some(&admin), "events", "launch"));
    }

    #[test]
    fn test_ensure_can_perform() {
        let table = sample_table();
        let authorizer = Authorizer::new(&table);

        let err = authorizer
            .ensure_can_perform(None, Resource::Rsvps, Action::Create)
            .unwrap_err();
        assert_eq!(err.status_code(), 403);

        assert!(authorizer
            .ensure_can_perform(Some(&Principal::member("m_1")), Resource::Rsvps, Action::Create)
            .is_ok());
    }

    #[test]
    fn test_officer_asymmetry() {
        let table = RoleCapabilityTable::default();
        let authorizer = Authorizer::new(&table);
        let officer = Principal::officer("o_1");

        let other_officer = Target::new("o_2", Some(Role::Officer));
        let admin_target = Target::new("a_1", Some(Role::Admin));
        let member_target = Target::new("m_1", Some(Role::Member));
        let unowned = Target::new("x_1", None);

        assert!(!authorizer.can_act_on_target(Some(&officer), &other_officer, TargetAction::Edit));
        assert!(!authorizer.can_act_on_target(Some(&officer), &admin_target, TargetAction::Delete));
        assert!(authorizer.can_act_on_target(Some(&officer), &member_target, TargetAction::Edit));
        assert!(authorizer.can_act_on_target(Some(&officer), &unowned, TargetAction::Delete));
    }

    #[test]
    fn test_target_self_and_admin() {
        let table = RoleCapabilityTable::empty();
        let authorizer = Authorizer::new(&table);

        let member = Principal::member("m_1");
        let own = Target::new("m_1", Some(Role::Member));
        let other = Target::new("m_2", Some(Role::Member));
        assert!(authorizer.can_act_on_target(Some(&member), &own, TargetAction::Edit));
        assert!(!authorizer.can_act_on_target(Some(&member), &other, TargetAction::Edit));

        // officer는 본인 프로필 수정 가능
        let officer = Principal::officer("o_1");
        let own_officer = Target::new("o_1", Some(Role::Officer));
        assert!(authorizer.can_act_on_target(Some(&officer), &own_officer, TargetAction::Edit));

        let admin = Principal::admin("a_1");
        let officer_target = Target::new("o_1", Some(Role::Officer));
        assert!(authorizer.can_act_on_target(Some(&admin), &officer_target, TargetAction::Delete));

        assert!(!authorizer.can_act_on_target(None, &own, TargetAction::Edit));
    }

    #[test]
    fn test_target_action_from_str() {
        assert_eq!(TargetAction::from_str("edit"), Some(TargetAction::Edit));
        assert_eq!(TargetAction::from_str("Update"), Some(TargetAction::Edit));
        assert_eq!(TargetAction::from_str("delete"), Some(TargetAction::Delete));
        assert_eq!(TargetAction::from_str("read"), None);
    }
}
