//! Role × Resource 권한 테이블
//!
//! 기본 테이블은 코드에 내장되어 있고, `config/capabilities.yaml` 형식으로
//! 교체할 수 있습니다.
//!
//! ```yaml
//! roles:
//!   member:
//!     events: [read]
//!     rsvps: { create: true, read: true, update: true, delete: true }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::error::{Error, Result};

/// 권한 대상 리소스
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Events,
    Rsvps,
    Attendance,
    Members,
    Settings,
    Announcements,
    OfficerNotes,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Events,
        Resource::Rsvps,
        Resource::Attendance,
        Resource::Members,
        Resource::Settings,
        Resource::Announcements,
        Resource::OfficerNotes,
    ];

    /// 문자열에서 파싱 (알 수 없는 값은 None)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "events" => Some(Resource::Events),
            "rsvps" => Some(Resource::Rsvps),
            "attendance" => Some(Resource::Attendance),
            "members" => Some(Resource::Members),
            "settings" => Some(Resource::Settings),
            "announcements" => Some(Resource::Announcements),
            "officer_notes" => Some(Resource::OfficerNotes),
            _ => None,
        }
    }

    /// 문자열에서 파싱 (알 수 없는 값은 [`Error::UnknownResource`])
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| Error::UnknownResource {
            name: s.to_string(),
        })
    }

    /// 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Events => "events",
            Resource::Rsvps => "rsvps",
            Resource::Attendance => "attendance",
            Resource::Members => "members",
            Resource::Settings => "settings",
            Resource::Announcements => "announcements",
            Resource::OfficerNotes => "officer_notes",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CRUD 작업 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    /// 문자열에서 파싱
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "create" => Some(Action::Create),
            "read" => Some(Action::Read),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }

    /// 문자열에서 파싱 (알 수 없는 값은 [`Error::UnknownAction`])
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| Error::UnknownAction {
            name: s.to_string(),
        })
    }

    /// 문자열로 변환
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 리소스 하나에 대한 CRUD 권한
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl Capabilities {
    /// 아무 권한 없음
    pub fn none() -> Self {
        Self::default()
    }

    /// 모든 권한
    pub fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    /// 읽기 전용
    pub fn read_only() -> Self {
        Self::none().with(Action::Read)
    }

    /// 작업 목록으로 생성
    pub fn of(actions: &[Action]) -> Self {
        actions.iter().fold(Self::none(), |caps, a| caps.with(*a))
    }

    /// 작업 허용 추가
    pub fn with(mut self, action: Action) -> Self {
        match action {
            Action::Create => self.create = true,
            Action::Read => self.read = true,
            Action::Update => self.update = true,
            Action::Delete => self.delete = true,
        }
        self
    }

    /// 작업 허용 여부
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::Create => self.create,
            Action::Read => self.read,
            Action::Update => self.update,
            Action::Delete => self.delete,
        }
    }

    /// 허용된 작업 목록
    pub fn actions(&self) -> Vec<Action> {
        Action::ALL.into_iter().filter(|a| self.allows(*a)).collect()
    }
}

/// Capabilities의 custom deserializer
///
/// 작업 이름 목록(`[read, update]`)과 boolean map(`{ read: true }`)을 모두 받습니다.
impl<'de> Deserialize<'de> for Capabilities {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct CapabilityFlags {
            #[serde(default)]
            create: bool,
            #[serde(default)]
            read: bool,
            #[serde(default)]
            update: bool,
            #[serde(default)]
            delete: bool,
        }

        struct CapabilitiesVisitor;

        impl<'de> Visitor<'de> for CapabilitiesVisitor {
            type Value = Capabilities;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a sequence of action names or a map of action flags")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut caps = Capabilities::none();
                while let Some(action) = seq.next_element::<Action>()? {
                    caps = caps.with(action);
                }
                Ok(caps)
            }

            fn visit_map<M>(self, map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let flags =
                    CapabilityFlags::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(Capabilities {
                    create: flags.create,
                    read: flags.read,
                    update: flags.update,
                    delete: flags.delete,
                })
            }
        }

        deserializer.deserialize_any(CapabilitiesVisitor)
    }
}

/// Role × Resource 권한 테이블
///
/// admin은 테이블과 무관하게 모든 검사를 통과하므로 admin 항목은 판정에 쓰이지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCapabilityTable {
    #[serde(default)]
    roles: BTreeMap<Role, BTreeMap<Resource, Capabilities>>,
}

impl Default for RoleCapabilityTable {
    /// 클럽 기본 권한 테이블
    fn default() -> Self {
        use Action::*;

        let mut table = Self::empty();

        table.set(Role::Member, Resource::Events, Capabilities::read_only());
        table.set(Role::Member, Resource::Rsvps, Capabilities::all());
        table.set(Role::Member, Resource::Attendance, Capabilities::read_only());
        table.set(Role::Member, Resource::Members, Capabilities::read_only());
        table.set(Role::Member, Resource::Settings, Capabilities::of(&[Read, Update]));
        table.set(Role::Member, Resource::Announcements, Capabilities::read_only());

        table.set(Role::Officer, Resource::Events, Capabilities::all());
        table.set(Role::Officer, Resource::Rsvps, Capabilities::all());
        table.set(Role::Officer, Resource::Attendance, Capabilities::all());
        table.set(Role::Officer, Resource::Members, Capabilities::all());
        table.set(Role::Officer, Resource::Settings, Capabilities::read_only());
        table.set(Role::Officer, Resource::Announcements, Capabilities::all());
        table.set(Role::Officer, Resource::OfficerNotes, Capabilities::of(&[Create, Read, Update]));

        table
    }
}

impl RoleCapabilityTable {
    /// 빈 테이블 (admin 외 모두 거부)
    pub fn empty() -> Self {
        Self {
            roles: BTreeMap::new(),
        }
    }

    /// YAML에서 로드
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let table: Self = serde_yaml::from_str(yaml).map_err(|e| Error::PolicyParse {
            message: e.to_string(),
        })?;

        if table.roles.contains_key(&Role::Admin) {
            tracing::warn!("admin entries in capability table are ignored");
        }

        Ok(table)
    }

    /// YAML로 변환
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// 항목 조회 (없으면 None)
    pub fn get(&self, role: Role, resource: Resource) -> Option<Capabilities> {
        self.roles.get(&role)?.get(&resource).copied()
    }

    /// 항목 설정
    pub fn set(&mut self, role: Role, resource: Resource, caps: Capabilities) {
        self.roles.entry(role).or_default().insert(resource, caps);
    }

    /// 항목 제거
    pub fn remove(&mut self, role: Role, resource: Resource) -> Option<Capabilities> {
        self.roles.get_mut(&role)?.remove(&resource)
    }

    /// 전체 항목 순회
    pub fn entries(&self) -> impl Iterator<Item = (Role, Resource, Capabilities)> + '_ {
        self.roles.iter().flat_map(|(role, resources)| {
            resources
                .iter()
                .map(move |(resource, caps)| (*role, *resource, *caps))
        })
    }
}
