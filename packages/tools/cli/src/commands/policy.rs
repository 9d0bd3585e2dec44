//! 권한 테이블 출력 명령어

use club_core::auth::Role;
use club_core::permissions::{Action, Resource, RoleCapabilityTable};

use crate::OutputFormat;

pub fn show(table: &RoleCapabilityTable, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table)?);
        }
        OutputFormat::Text => {
            print!("{:<16}", "resource");
            for role in Role::ALL {
                print!("{:<10}", role.as_str());
            }
            println!();

            for resource in Resource::ALL {
                print!("{:<16}", resource.as_str());
                for role in Role::ALL {
                    print!("{:<10}", cell(table, role, resource));
                }
                println!();
            }
            println!();
            println!("admin bypasses the table.");
        }
    }
    Ok(())
}

/// `CRUD` 형태의 셀 (없는 작업은 `-`)
fn cell(table: &RoleCapabilityTable, role: Role, resource: Resource) -> String {
    if role == Role::Admin {
        return "CRUD".to_string();
    }

    let caps = match table.get(role, resource) {
        Some(caps) => caps,
        None => return "(none)".to_string(),
    };

    Action::ALL
        .iter()
        .map(|action| {
            if caps.allows(*action) {
                action.as_str()[..1].to_uppercase()
            } else {
                "-".to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_rendering() {
        let table = RoleCapabilityTable::default();

        assert_eq!(cell(&table, Role::Member, Resource::Events), "-R--");
        assert_eq!(cell(&table, Role::Member, Resource::Settings), "-RU-");
        assert_eq!(cell(&table, Role::Member, Resource::OfficerNotes), "(none)");
        assert_eq!(cell(&table, Role::Officer, Resource::OfficerNotes), "CRU-");
        assert_eq!(cell(&table, Role::Admin, Resource::OfficerNotes), "CRUD");
    }
}
