//! Tag handling for snippet rows.
//!
//! Tags come in two kinds:
//! - **Plain tags**: free-form labels, any number per row.
//! - **Project tags**: a single `repo:<owner>/<name>` entry denoting
//!   project membership. At most one per row.
//!
//! ## Merge rule (applied on every save)
//!
//! When a new version of a snippet is created, the previous version's
//! tags are merged with the newly supplied ones:
//! - Plain tags are unioned in order: previous first, then new,
//!   duplicates collapsed (first occurrence wins).
//! - The project tag is the last newly supplied `repo:` tag if any,
//!   otherwise the previous version's project tag. Supplying a new
//!   project tag fully replaces the old one.

/// Prefix marking a project-membership tag.
pub const PROJECT_TAG_PREFIX: &str = "repo:";

/// Returns true if the tag carries the reserved project prefix.
pub fn is_project_tag(tag: &str) -> bool {
    tag.starts_with(PROJECT_TAG_PREFIX)
}

/// Splits a tag list into (plain tags, last project tag).
///
/// Order of plain tags is preserved. If several project tags slipped in
/// (never produced by [`merge_tags`], but possible in caller input), the
/// last one wins.
pub fn split_tags(tags: &[String]) -> (Vec<String>, Option<String>) {
    let mut plain = Vec::new();
    let mut project = None;
    for tag in tags {
        if is_project_tag(tag) {
            project = Some(tag.clone());
        } else {
            plain.push(tag.clone());
        }
    }
    (plain, project)
}

/// Merges the previous version's tags with newly supplied ones.
///
/// The result keeps plain tags in insertion order (previous before new,
/// deduplicated) and carries at most one project tag, placed last.
pub fn merge_tags(previous: &[String], incoming: &[String]) -> Vec<String> {
    let (prev_plain, prev_project) = split_tags(previous);
    let (new_plain, new_project) = split_tags(incoming);

    let mut merged = Vec::with_capacity(prev_plain.len() + new_plain.len() + 1);
    for tag in prev_plain.into_iter().chain(new_plain) {
        if !merged.contains(&tag) {
            merged.push(tag);
        }
    }

    if let Some(project) = new_project.or(prev_project) {
        merged.push(project);
    }

    merged
}
