use snipvault::cache::null::NullCache;
use snipvault::store::memory::MemoryStore;
use snipvault::{SnipConfig, SnipVault};

fn vault() -> SnipVault<MemoryStore, NullCache> {
    SnipVault::new(MemoryStore::new(), NullCache::new(), SnipConfig::default())
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_three_saves_resolve_to_version_three() {
    let vault = vault();

    assert!(vault.save(1, "a.py", "v1", "python", &[]));
    assert!(vault.save(1, "a.py", "v2", "python", &[]));
    assert!(vault.save(1, "a.py", "v3", "python", &[]));

    let latest = vault.latest(1, "a.py").unwrap();
    assert_eq!(latest.version, 3);
    assert_eq!(latest.content, "v3");

    let (bin, total) = vault.list_deleted(1, 1, 10);
    assert!(bin.is_empty());
    assert_eq!(total, 0);
}

#[test]
fn test_versions_never_skip_or_reuse() {
    let vault = vault();
    for _ in 0..6 {
        assert!(vault.save(1, "a.py", "body", "python", &[]));
    }

    let rows = vault.list(1, 10);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].version, 6);
}

#[test]
fn test_reserved_tag_replacement_across_saves() {
    let vault = vault();

    vault.save(1, "x.py", "v1", "python", &tags(&["repo:a/old", "k"]));
    vault.save(1, "x.py", "v2", "python", &tags(&["repo:a/new"]));

    let latest = vault.latest(1, "x.py").unwrap();
    assert_eq!(latest.tags, tags(&["k", "repo:a/new"]));
}

#[test]
fn test_plain_tags_accumulate_deduplicated() {
    let vault = vault();

    vault.save(1, "x.py", "v1", "python", &tags(&["a", "b"]));
    vault.save(1, "x.py", "v2", "python", &tags(&["b", "c"]));

    let latest = vault.latest(1, "x.py").unwrap();
    assert_eq!(latest.tags, tags(&["a", "b", "c"]));
}

#[test]
fn test_names_are_independent_chains() {
    let vault = vault();
    vault.save(1, "a.py", "x", "python", &[]);
    vault.save(1, "a.py", "x", "python", &[]);
    vault.save(1, "b.py", "x", "python", &[]);

    assert_eq!(vault.latest(1, "a.py").unwrap().version, 2);
    assert_eq!(vault.latest(1, "b.py").unwrap().version, 1);
}

#[test]
fn test_owners_are_isolated() {
    let vault = vault();
    vault.save(1, "a.py", "mine", "python", &[]);
    vault.save(2, "a.py", "theirs", "python", &[]);

    assert_eq!(vault.latest(1, "a.py").unwrap().content, "mine");
    assert_eq!(vault.latest(2, "a.py").unwrap().content, "theirs");
    assert_eq!(vault.list(1, 10).len(), 1);
}

#[test]
fn test_search_sees_only_latest_versions() {
    let vault = vault();
    vault.save(1, "a.py", "alpha payload", "python", &[]);
    vault.save(1, "a.py", "beta payload", "python", &[]);

    // The superseded version's content no longer matches.
    assert!(vault.search(1, "alpha", None, &[], 10).is_empty());
    let hits = vault.search(1, "beta", None, &[], 10);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].version, 2);
}
