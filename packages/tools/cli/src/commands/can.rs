//! 권한 확인 명령어

use club_core::auth::Viewer;
use club_core::directory::Directory;
use club_core::member::MemberId;
use club_core::permissions::{Action, Decision, Resource, Target, TargetAction};
use club_core::store::MemberStore;

use crate::OutputFormat;

/// 리소스 작업 권한 확인
pub fn can<S: MemberStore>(
    directory: &Directory<S>,
    viewer: &Viewer,
    resource: &str,
    action: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let decision = decide(directory, viewer, resource, action);
    print_decision(&format!("{} {}", action, resource), &decision, format)
}

/// 프로필 대상 작업 권한 확인
pub fn can_act<S: MemberStore>(
    directory: &Directory<S>,
    viewer: &Viewer,
    target: &str,
    action: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let action = TargetAction::from_str(action).ok_or_else(|| {
        anyhow::anyhow!("Unknown target action '{}'. Expected edit or delete", action)
    })?;

    let target = resolve_target(directory, target)?;
    let decision = directory.authorizer().evaluate_target(
        viewer.effective_principal(),
        &target,
        action,
    );

    print_decision(
        &format!("{} profile {}", action.as_str(), target.id),
        &decision,
        format,
    )
}

/// 이름으로 받은 리소스/작업 판정
///
/// 알 수 없는 이름은 에러가 아니라 거부 결과가 됩니다.
fn decide<S: MemberStore>(
    directory: &Directory<S>,
    viewer: &Viewer,
    resource: &str,
    action: &str,
) -> Decision {
    let parsed = Resource::parse(resource).and_then(|r| Action::parse(action).map(|a| (r, a)));
    match parsed {
        Ok((r, a)) => directory
            .authorizer()
            .evaluate(viewer.effective_principal(), r, a),
        Err(e) => Decision::deny(e.to_string()),
    }
}

/// 대상 프로필 (디렉터리에 없으면 소유자 없음)
fn resolve_target<S: MemberStore>(directory: &Directory<S>, id: &str) -> anyhow::Result<Target> {
    let id = MemberId::new(id);
    let owner_role = directory.store().get(&id)?.map(|record| record.role);
    Ok(Target::new(id, owner_role))
}

fn print_decision(subject: &str, decision: &Decision, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(decision)?);
        }
        OutputFormat::Text => {
            if decision.allowed {
                println!("allowed: {}", subject);
            } else {
                println!(
                    "denied: {} ({})",
                    subject,
                    decision.reason.as_deref().unwrap_or("access denied")
                );
            }
        }
    }
    Ok(())
}
