//! 검색 명령어

use club_core::auth::Viewer;
use club_core::directory::Directory;
use club_core::store::MemberStore;

use crate::commands::view::print_list;
use crate::OutputFormat;

pub fn search<S: MemberStore>(
    directory: &Directory<S>,
    viewer: &Viewer,
    query: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let results = directory.search(viewer, query)?;
    tracing::debug!(query, matches = results.len(), "search completed");
    print_list(&results, format)
}
