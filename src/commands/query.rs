//! Latest-view resolver: collapses version chains into one row per
//! name, then serves point lookups, listings, search and tag views.
//!
//! ## Pick-latest-then-sort
//!
//! Every listing runs two phases in a fixed order:
//! 1. among active rows, group by `name` and keep only the
//!    highest-version row per group;
//! 2. sort that one-row-per-name set by `updated_at` descending.
//!
//! Sorting first and collapsing second would be wrong: when an older
//! name was edited more recently than a newer one, the collapse could
//! keep a stale version. The order here is load-bearing.
//!
//! All reads are wrapped by the cache port with per-operation TTLs;
//! a miss falls through to the store and repopulates the cache.

use crate::cache::{keys, SnippetCache};
use crate::config::SnipConfig;
use crate::error::Result;
use crate::model::{SnippetMeta, SnippetRow};
use crate::pagination::{paginate, Page};
use crate::store::SnippetStore;
use std::collections::HashMap;

/// The latest active row of a chain, straight from the store.
fn latest_active_row<S: SnippetStore>(
    store: &S,
    owner_id: i64,
    name: &str,
) -> Result<Option<SnippetRow>> {
    let rows = store.snippet_versions(owner_id, name)?;
    Ok(rows
        .into_iter()
        .filter(|r| r.is_active)
        .max_by_key(|r| r.version))
}

/// Collapses active rows into the highest-version row per name.
fn latest_per_name(rows: Vec<SnippetRow>) -> Vec<SnippetRow> {
    let mut by_name: HashMap<String, SnippetRow> = HashMap::new();
    for row in rows {
        match by_name.get(&row.name) {
            Some(kept) if kept.version >= row.version => {}
            _ => {
                by_name.insert(row.name.clone(), row);
            }
        }
    }
    by_name.into_values().collect()
}

fn sort_most_recent_first(rows: &mut [SnippetRow]) {
    // Name as tiebreaker keeps repeated reads identical when two rows
    // share a timestamp.
    rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.name.cmp(&b.name)));
}

/// Latest version of a single snippet, cached.
pub fn latest<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    config: &SnipConfig,
    owner_id: i64,
    name: &str,
) -> Result<Option<SnippetRow>> {
    let key = keys::latest(owner_id, name);
    if let Some(hit) = super::cache_read::<Option<SnippetRow>, _>(cache, &key) {
        return Ok(hit);
    }

    let row = latest_active_row(store, owner_id, name)?;
    super::cache_write(cache, &key, &row, config.latest_cache_ttl());
    Ok(row)
}

/// Most recently updated snippets, one row per name, cached.
pub fn list<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    config: &SnipConfig,
    owner_id: i64,
    limit: usize,
) -> Result<Vec<SnippetRow>> {
    let key = keys::list(owner_id, limit);
    if let Some(hit) = super::cache_read::<Vec<SnippetRow>, _>(cache, &key) {
        return Ok(hit);
    }

    let mut rows = latest_per_name(store.active_snippets(owner_id)?);
    sort_most_recent_first(&mut rows);
    rows.truncate(limit);

    super::cache_write(cache, &key, &rows, config.list_cache_ttl());
    Ok(rows)
}

/// Case-insensitive substring search over name, content and
/// description, optionally narrowed by language and tags. Cached.
pub fn search<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    config: &SnipConfig,
    owner_id: i64,
    query: &str,
    language: Option<&str>,
    tags: &[String],
    limit: usize,
) -> Result<Vec<SnippetRow>> {
    let key = keys::search(owner_id, query, language, tags, limit);
    if let Some(hit) = super::cache_read::<Vec<SnippetRow>, _>(cache, &key) {
        return Ok(hit);
    }

    let needle = query.to_lowercase();
    let matching: Vec<SnippetRow> = store
        .active_snippets(owner_id)?
        .into_iter()
        .filter(|row| {
            let text_match = needle.is_empty()
                || row.name.to_lowercase().contains(&needle)
                || row.content.to_lowercase().contains(&needle)
                || row
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle));
            let language_match = language.is_none_or(|l| row.language.eq_ignore_ascii_case(l));
            let tags_match = tags.iter().all(|t| row.tags.contains(t));
            text_match && language_match && tags_match
        })
        .collect();

    let mut rows = latest_per_name(matching);
    sort_most_recent_first(&mut rows);
    rows.truncate(limit);

    super::cache_write(cache, &key, &rows, config.search_cache_ttl());
    Ok(rows)
}

/// One page of snippets carrying the given tag, as metadata-only
/// projections, with the exact total. Cached per page.
pub fn by_tag<S: SnippetStore, C: SnippetCache>(
    store: &S,
    cache: &C,
    config: &SnipConfig,
    owner_id: i64,
    tag: &str,
    page: usize,
    per_page: usize,
) -> Result<Page<SnippetMeta>> {
    let key = keys::by_tag(owner_id, tag, page, per_page);
    if let Some(hit) = super::cache_read::<Page<SnippetMeta>, _>(cache, &key) {
        return Ok(hit);
    }

    let tagged: Vec<SnippetRow> = store
        .active_snippets(owner_id)?
        .into_iter()
        .filter(|row| row.tags.iter().any(|t| t == tag))
        .collect();

    let mut rows = latest_per_name(tagged);
    sort_most_recent_first(&mut rows);
    let metas: Vec<SnippetMeta> = rows.iter().map(SnippetMeta::from).collect();
    let result = paginate(metas, page, per_page);

    super::cache_write(cache, &key, &result, config.tag_cache_ttl());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::cache::null::NullCache;
    use crate::commands::save;
    use crate::store::memory::MemoryStore;
    use chrono::{Duration, Utc};

    fn fixture() -> (MemoryStore, NullCache, SnipConfig) {
        (MemoryStore::new(), NullCache::new(), SnipConfig::default())
    }

    fn save_snippet(store: &MemoryStore, owner: i64, name: &str, tags: &[&str]) -> SnippetRow {
        let tags: Vec<String> = tags.iter().map(|s| s.to_string()).collect();
        save::run(
            store,
            &NullCache::new(),
            &SnipConfig::default(),
            owner,
            name,
            "print(1)",
            "python",
            &tags,
        )
        .unwrap()
    }

    #[test]
    fn test_latest_returns_highest_version() {
        let (store, cache, config) = fixture();
        save_snippet(&store, 1, "a.py", &[]);
        save_snippet(&store, 1, "a.py", &[]);
        save_snippet(&store, 1, "a.py", &[]);

        let row = latest(&store, &cache, &config, 1, "a.py").unwrap().unwrap();
        assert_eq!(row.version, 3);
    }

    #[test]
    fn test_latest_absent_for_unknown_name() {
        let (store, cache, config) = fixture();
        assert!(latest(&store, &cache, &config, 1, "nope.py")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_latest_ignores_deleted_rows() {
        let (store, cache, config) = fixture();
        let row = save_snippet(&store, 1, "a.py", &[]);

        let mut deleted = row.clone();
        let now = Utc::now();
        deleted.mark_deleted(now, now + Duration::days(7));
        store.update_snippet(&deleted).unwrap();

        assert!(latest(&store, &cache, &config, 1, "a.py").unwrap().is_none());
    }

    #[test]
    fn test_list_collapses_to_one_row_per_name() {
        let (store, cache, config) = fixture();
        save_snippet(&store, 1, "a.py", &[]);
        save_snippet(&store, 1, "a.py", &[]);
        save_snippet(&store, 1, "b.py", &[]);

        let rows = list(&store, &cache, &config, 1, 10).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_list_picks_latest_before_sorting() {
        let (store, cache, config) = fixture();

        // "old.py" has two versions; its v1 carries a fresher
        // updated_at than v2 (stale timestamp copy). The collapse must
        // still keep v2.
        let v1 = save_snippet(&store, 1, "old.py", &[]);
        save_snippet(&store, 1, "old.py", &[]);

        let mut stale_copy = v1.clone();
        stale_copy.updated_at = Utc::now() + Duration::hours(1);
        store.update_snippet(&stale_copy).unwrap();

        let rows = list(&store, &cache, &config, 1, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].version, 2);
    }

    #[test]
    fn test_list_orders_by_update_recency() {
        let (store, cache, config) = fixture();
        let a = save_snippet(&store, 1, "a.py", &[]);
        let b = save_snippet(&store, 1, "b.py", &[]);

        // Push a's timestamp ahead of b's.
        let mut fresher = a.clone();
        fresher.updated_at = b.updated_at + Duration::hours(1);
        store.update_snippet(&fresher).unwrap();

        let rows = list(&store, &cache, &config, 1, 10).unwrap();
        assert_eq!(rows[0].name, "a.py");
        assert_eq!(rows[1].name, "b.py");
    }

    #[test]
    fn test_list_respects_limit() {
        let (store, cache, config) = fixture();
        for i in 0..5 {
            save_snippet(&store, 1, &format!("f{}.py", i), &[]);
        }
        let rows = list(&store, &cache, &config, 1, 3).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_list_is_owner_scoped() {
        let (store, cache, config) = fixture();
        save_snippet(&store, 1, "a.py", &[]);
        save_snippet(&store, 2, "b.py", &[]);

        let rows = list(&store, &cache, &config, 1, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "a.py");
    }

    #[test]
    fn test_search_matches_name_content_description() {
        let (store, cache, config) = fixture();
        let row = save_snippet(&store, 1, "sorter.py", &[]);
        let mut described = row.clone();
        described.description = Some("Quicksort helper".into());
        store.update_snippet(&described).unwrap();

        let by_name = search(&store, &cache, &config, 1, "SORTER", None, &[], 10).unwrap();
        assert_eq!(by_name.len(), 1);

        let by_content = search(&store, &cache, &config, 1, "print", None, &[], 10).unwrap();
        assert_eq!(by_content.len(), 1);

        let by_description =
            search(&store, &cache, &config, 1, "quicksort", None, &[], 10).unwrap();
        assert_eq!(by_description.len(), 1);
    }

    #[test]
    fn test_search_filters_by_language() {
        let (store, cache, config) = fixture();
        save_snippet(&store, 1, "a.py", &[]);

        let hit = search(&store, &cache, &config, 1, "", Some("Python"), &[], 10).unwrap();
        assert_eq!(hit.len(), 1);

        let miss = search(&store, &cache, &config, 1, "", Some("rust"), &[], 10).unwrap();
        assert!(miss.is_empty());
    }

    #[test]
    fn test_by_tag_filters_and_projects() {
        let (store, cache, config) = fixture();
        save_snippet(&store, 1, "a.py", &["k"]);
        save_snippet(&store, 1, "b.py", &[]);

        let page = by_tag(&store, &cache, &config, 1, "k", 1, 10).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "a.py");
    }

    #[test]
    fn test_reads_populate_and_reuse_the_cache() {
        let store = MemoryStore::new();
        let cache = MemoryCache::new();
        let config = SnipConfig::default();
        save_snippet(&store, 1, "a.py", &[]);

        let first = list(&store, &cache, &config, 1, 10).unwrap();
        assert!(!cache.is_empty());

        // A write that bypasses invalidation is not visible until the
        // entry expires: the cached view is served as-is.
        save_snippet(&store, 1, "b.py", &[]);
        let second = list(&store, &cache, &config, 1, 10).unwrap();
        assert_eq!(first.len(), second.len());
    }
}
