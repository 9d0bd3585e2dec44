//! Viewer 컨텍스트
//!
//! CLI 옵션으로부터 판정에 사용할 [`Viewer`]를 결정합니다.
//! `--role`이 없으면 디렉터리 데이터에 저장된 회원의 role을 사용합니다.

use club_core::auth::{Principal, Role, Viewer};
use club_core::directory::Directory;
use club_core::member::MemberId;
use club_core::store::MemberStore;

/// Viewer 관련 CLI 옵션
#[derive(Debug, Clone, Default)]
pub struct ViewerOptions {
    pub as_id: Option<String>,
    pub role: Option<String>,
    pub unauthenticated: bool,
}

/// Viewer 결정 (CLI 옵션 > 디렉터리 데이터)
pub fn resolve_viewer<S: MemberStore>(
    directory: &Directory<S>,
    opts: &ViewerOptions,
) -> anyhow::Result<Viewer> {
    let explicit_role = opts.role.as_deref().map(Role::parse).transpose()?;

    let id = match opts.as_id.as_deref() {
        Some(id) => MemberId::new(id),
        None => {
            if explicit_role.is_some() {
                anyhow::bail!("--role requires --as <member-id>");
            }
            return Ok(Viewer::anonymous());
        }
    };

    let role = match explicit_role {
        Some(role) => role,
        None => directory
            .store()
            .get(&id)?
            .map(|record| record.role)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Member '{}' not found. Pass --role to act as an unlisted member",
                    id
                )
            })?,
    };

    let principal = Principal::new(id, role);
    tracing::debug!(principal = %principal.id, role = %role, "resolved viewer");

    if opts.unauthenticated {
        Ok(Viewer::unauthenticated(principal))
    } else {
        Ok(Viewer::authenticated(principal))
    }
}
