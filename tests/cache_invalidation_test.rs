use snipvault::cache::memory::MemoryCache;
use snipvault::store::memory::MemoryStore;
use snipvault::{SnipConfig, SnipVault};

fn vault() -> SnipVault<MemoryStore, MemoryCache> {
    SnipVault::new(MemoryStore::new(), MemoryCache::new(), SnipConfig::default())
}

#[test]
fn test_save_invalidates_stale_views() {
    let vault = vault();
    vault.save(1, "a.py", "x", "python", &[]);

    // Warm the cached views.
    assert_eq!(vault.list(1, 10).len(), 1);
    assert!(vault.latest(1, "a.py").is_some());

    // A new save must be visible immediately, not after TTL expiry.
    vault.save(1, "b.py", "y", "python", &[]);
    assert_eq!(vault.list(1, 10).len(), 2);
}

#[test]
fn test_soft_delete_invalidates_stale_views() {
    let vault = vault();
    vault.save(1, "a.py", "x", "python", &[]);
    assert_eq!(vault.list(1, 10).len(), 1);

    vault.soft_delete(1, &["a.py".to_string()]);
    assert!(vault.list(1, 10).is_empty());
    assert!(vault.latest(1, "a.py").is_none());
}

#[test]
fn test_restore_invalidates_stale_views() {
    let vault = vault();
    vault.save(1, "a.py", "x", "python", &[]);
    vault.soft_delete(1, &["a.py".to_string()]);
    assert!(vault.list(1, 10).is_empty());

    let (items, _) = vault.list_deleted(1, 1, 10);
    vault.restore(1, &items[0].id().to_string());

    assert_eq!(vault.list(1, 10).len(), 1);
    assert!(vault.latest(1, "a.py").is_some());
}

#[test]
fn test_invalidation_is_scoped_to_the_writing_owner() {
    let vault = vault();
    vault.save(1, "a.py", "x", "python", &[]);
    vault.save(2, "b.py", "y", "python", &[]);

    // Warm both owners' views.
    vault.list(1, 10);
    vault.list(2, 10);

    // Owner 1 writes; owner 2's cached view remains valid (it still
    // matches the store, so correctness is unaffected either way, but
    // the bulk delete must not wipe other users' keys).
    vault.save(1, "c.py", "z", "python", &[]);
    assert_eq!(vault.list(2, 10).len(), 1);
}

#[test]
fn test_tag_views_refresh_after_mutation() {
    let vault = vault();
    vault.save(1, "a.py", "x", "python", &["k".to_string()]);

    let (_, total) = vault.by_tag(1, "k", 1, 10);
    assert_eq!(total, 1);

    vault.save(1, "b.py", "y", "python", &["k".to_string()]);
    let (_, total) = vault.by_tag(1, "k", 1, 10);
    assert_eq!(total, 2);

    vault.soft_delete(1, &["a.py".to_string(), "b.py".to_string()]);
    let (_, total) = vault.by_tag(1, "k", 1, 10);
    assert_eq!(total, 0);
}

#[test]
fn test_purge_invalidates_stale_views() {
    let vault = vault();
    vault.save(1, "a.py", "x", "python", &[]);
    vault.soft_delete(1, &["a.py".to_string()]);

    let (items, _) = vault.list_deleted(1, 1, 10);
    // Warm a view that a later purge must not leave stale.
    assert!(vault.latest(1, "a.py").is_none());

    vault.purge(1, &items[0].id().to_string());
    assert!(vault.list(1, 10).is_empty());
}
