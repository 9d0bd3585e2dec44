//! 프로필 조회 명령어

use club_core::auth::Viewer;
use club_core::directory::Directory;
use club_core::member::MemberId;
use club_core::store::MemberStore;
use club_core::visibility::VisibleProjection;

use crate::OutputFormat;

pub fn view<S: MemberStore>(
    directory: &Directory<S>,
    viewer: &Viewer,
    id: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let id = MemberId::new(id);
    let projection = directory.view(viewer, &id)?;
    let controls = directory.profile_controls(viewer, &id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "profile": projection,
                "controls": controls,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            print_projection(&projection);
            println!();
            println!("  can edit:   {}", yes_no(controls.can_edit));
            println!("  can delete: {}", yes_no(controls.can_delete));
        }
    }

    Ok(())
}

pub fn list<S: MemberStore>(
    directory: &Directory<S>,
    viewer: &Viewer,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let projections = directory.list(viewer)?;
    print_list(&projections, format)
}

/// 목록 출력 (search에서도 사용)
pub fn print_list(projections: &[VisibleProjection], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(projections)?);
        }
        OutputFormat::Text => {
            if projections.is_empty() {
                println!("No members.");
                return Ok(());
            }
            for projection in projections {
                let headline = projection
                    .venture()
                    .map(|v| v.name.as_str())
                    .filter(|name| !name.is_empty())
                    .unwrap_or("-");
                println!(
                    "{:<16} {:<24} {:<8} {}",
                    projection.id().as_str(),
                    projection.name(),
                    projection.role().as_str(),
                    headline
                );
            }
        }
    }
    Ok(())
}

fn print_projection(p: &VisibleProjection) {
    println!("{} ({})", p.name(), p.id());
    println!("  role:       {}", p.role());
    if !p.leadership_roles().is_empty() {
        println!("  leadership: {}", p.leadership_roles().join(", "));
    }
    if let Some(url) = p.photo_url() {
        println!("  photo:      {}", url);
    }
    if let Some(venture) = p.venture() {
        println!("  venture:    {} [{}]", venture.name, venture.industry);
    }
    if let Some(expertise) = p.expertise() {
        println!("  expertise:  {}", expertise.join(", "));
    }
    if let Some(bio) = p.bio() {
        println!("  bio:        {}", bio);
    }
    if let Some(contact) = p.contact() {
        println!("  email:      {}", contact.email);
        if !contact.phone.is_empty() {
            println!("  phone:      {}", contact.phone);
        }
    }
    if let Some(links) = p.social_links() {
        for link in links {
            println!("  social:     {} {}", link.platform, link.url);
        }
    }
    if let Some(networking) = p.networking() {
        println!("  interests:  {}", networking.interests.join(", "));
    }
    if let Some(progress) = p.progress() {
        println!(
            "  progress:   {} speeches, {} meetings",
            progress.speeches_completed, progress.meetings_attended
        );
    }
    if let Some(goals) = p.goals() {
        println!("  goals:      {}", goals);
    }
    if let Some(notes) = p.officer_notes() {
        println!("  notes:      {}", notes);
    }
}

pub(crate) fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
