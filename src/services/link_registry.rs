//! Link registry
//!
//! Owns every link record in the `link` namespace of a [`KvStore`].
//! All name arguments are normalized before use, so `/docs/`, `/docs`
//! and `docs` address the same record.
//!
//! Mutations go through a striped lock keyed by the canonical name, which
//! turns each read-modify-write into a single critical section per name.
//! Reads never take the lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use xxhash_rust::xxh64::xxh64;

use crate::errors::Result;
use crate::storage::KvStore;
use crate::storage::models::{LINK_NAMESPACE, LinkRecord, namespace_prefix, namespaced_key};
use crate::utils::normalize_name;

const LOCK_STRIPES: usize = 64;

/// Result of [`LinkRegistry::add_if_absent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Created(LinkRecord),
    AlreadyExists(LinkRecord),
}

/// Result of [`LinkRegistry::update_target_if_changed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    NotFound,
    /// The stored target already equals the requested one; nothing written.
    Unchanged(LinkRecord),
    Updated(LinkRecord),
}

pub struct LinkRegistry {
    store: Arc<dyn KvStore>,
    stripes: Vec<Mutex<()>>,
}

impl LinkRegistry {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        let stripes = (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect();
        Self { store, stripes }
    }

    pub fn backend_name(&self) -> &str {
        self.store.backend_name()
    }

    async fn lock(&self, canonical: &str) -> MutexGuard<'_, ()> {
        let index = (xxh64(canonical.as_bytes(), 0) % LOCK_STRIPES as u64) as usize;
        self.stripes[index].lock().await
    }

    async fn load(&self, canonical: &str) -> Result<Option<LinkRecord>> {
        let key = namespaced_key(LINK_NAMESPACE, canonical);
        match self.store.get(&key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, record: &LinkRecord) -> Result<()> {
        let key = namespaced_key(LINK_NAMESPACE, &record.name);
        self.store.set(&key, serde_json::to_value(record)?).await
    }

    /// Point lookup without side effects.
    pub async fn get(&self, name: &str) -> Result<Option<LinkRecord>> {
        self.load(&normalize_name(name)).await
    }

    /// Every link, keyed by canonical name. Empty when nothing is stored.
    pub async fn list_all(&self) -> Result<BTreeMap<String, LinkRecord>> {
        let prefix = namespace_prefix(LINK_NAMESPACE);
        let entries = self.store.scan_prefix(&prefix).await?;

        let mut links = BTreeMap::new();
        for (key, value) in entries {
            let Some(name) = key.strip_prefix(&prefix) else {
                continue;
            };
            let record: LinkRecord = serde_json::from_value(value)?;
            links.insert(name.to_string(), record);
        }

        debug!("Listed {} links", links.len());
        Ok(links)
    }

    /// Store a fresh record with a zero counter.
    ///
    /// Does not check for an existing record and silently replaces it,
    /// counter included. Check with [`get`](Self::get) first or use
    /// [`add_if_absent`](Self::add_if_absent).
    pub async fn add(&self, name: &str, target: &str) -> Result<LinkRecord> {
        let canonical = normalize_name(name);
        let _guard = self.lock(&canonical).await;

        let record = LinkRecord::new(canonical, target);
        self.save(&record).await?;

        info!("Link stored: '{}' -> '{}'", record.name, record.target);
        Ok(record)
    }

    /// Create the record unless one already exists under the same canonical name.
    pub async fn add_if_absent(&self, name: &str, target: &str) -> Result<AddOutcome> {
        let canonical = normalize_name(name);
        let _guard = self.lock(&canonical).await;

        if let Some(existing) = self.load(&canonical).await? {
            return Ok(AddOutcome::AlreadyExists(existing));
        }

        let record = LinkRecord::new(canonical, target);
        self.save(&record).await?;

        info!("Link created: '{}' -> '{}'", record.name, record.target);
        Ok(AddOutcome::Created(record))
    }

    /// Replace the target of an existing record, keeping its counter.
    ///
    /// Returns `None` and writes nothing when the name is unknown.
    pub async fn update_target(&self, name: &str, target: &str) -> Result<Option<LinkRecord>> {
        let canonical = normalize_name(name);
        let _guard = self.lock(&canonical).await;

        let Some(mut record) = self.load(&canonical).await? else {
            return Ok(None);
        };
        record.target = target.to_string();
        self.save(&record).await?;

        info!("Link updated: '{}' -> '{}'", record.name, record.target);
        Ok(Some(record))
    }

    /// Like [`update_target`](Self::update_target), but skips the write when
    /// the stored target already matches.
    pub async fn update_target_if_changed(&self, name: &str, target: &str) -> Result<UpdateOutcome> {
        let canonical = normalize_name(name);
        let _guard = self.lock(&canonical).await;

        let Some(mut record) = self.load(&canonical).await? else {
            return Ok(UpdateOutcome::NotFound);
        };
        if record.target == target {
            return Ok(UpdateOutcome::Unchanged(record));
        }

        record.target = target.to_string();
        self.save(&record).await?;

        info!("Link updated: '{}' -> '{}'", record.name, record.target);
        Ok(UpdateOutcome::Updated(record))
    }

    /// Look up a link for redirection and count the hit.
    ///
    /// Returns the record after the increment.
    pub async fn resolve_and_touch(&self, name: &str) -> Result<Option<LinkRecord>> {
        let canonical = normalize_name(name);
        let _guard = self.lock(&canonical).await;

        let Some(mut record) = self.load(&canonical).await? else {
            return Ok(None);
        };
        record.request_count = record.request_count.saturating_add(1);
        self.save(&record).await?;

        debug!(
            "Link resolved: '{}' (requested {} times)",
            record.name, record.request_count
        );
        Ok(Some(record))
    }

    /// Delete a record. Deleting an unknown name is a no-op.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.remove(name).await.map(|_| ())
    }

    /// Delete a record and hand back what was removed.
    pub async fn remove(&self, name: &str) -> Result<Option<LinkRecord>> {
        let canonical = normalize_name(name);
        let _guard = self.lock(&canonical).await;

        let Some(record) = self.load(&canonical).await? else {
            return Ok(None);
        };
        self.store
            .delete(&namespaced_key(LINK_NAMESPACE, &canonical))
            .await?;

        info!("Link deleted: '{}'", record.name);
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn registry() -> LinkRegistry {
        LinkRegistry::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_add_normalizes_name() {
        let registry = registry();
        let record = registry.add("/docs/", "https://example.com").await.unwrap();
        assert_eq!(record.name, "docs");
        assert_eq!(record.request_count, 0);

        let fetched = registry.get("docs").await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_add_overwrites_and_resets_counter() {
        let registry = registry();
        registry.add("a", "https://one.example").await.unwrap();
        registry.resolve_and_touch("a").await.unwrap();

        let record = registry.add("a", "https://two.example").await.unwrap();
        assert_eq!(record.request_count, 0);
        assert_eq!(registry.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_if_absent_reports_existing() {
        let registry = registry();
        let created = registry.add_if_absent("/x", "https://a.example").await.unwrap();
        assert!(matches!(created, AddOutcome::Created(ref r) if r.name == "x"));

        let again = registry.add_if_absent("x/", "https://b.example").await.unwrap();
        match again {
            AddOutcome::AlreadyExists(existing) => assert_eq!(existing.target, "https://a.example"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_target_keeps_counter() {
        let registry = registry();
        registry.add("a", "https://one.example").await.unwrap();
        registry.resolve_and_touch("a").await.unwrap();
        registry.resolve_and_touch("a").await.unwrap();

        let updated = registry
            .update_target("a", "https://two.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.target, "https://two.example");
        assert_eq!(updated.request_count, 2);
    }

    #[tokio::test]
    async fn test_update_target_on_missing_name_creates_nothing() {
        let registry = registry();
        assert!(registry.update_target("ghost", "https://x.example").await.unwrap().is_none());
        assert!(registry.get("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_target_if_changed() {
        let registry = registry();
        assert_eq!(
            registry.update_target_if_changed("a", "https://x.example").await.unwrap(),
            UpdateOutcome::NotFound
        );

        registry.add("a", "https://x.example").await.unwrap();
        assert!(matches!(
            registry.update_target_if_changed("a", "https://x.example").await.unwrap(),
            UpdateOutcome::Unchanged(_)
        ));
        assert!(matches!(
            registry.update_target_if_changed("a", "https://y.example").await.unwrap(),
            UpdateOutcome::Updated(ref r) if r.target == "https://y.example"
        ));
    }

    #[tokio::test]
    async fn test_resolve_and_touch_counts() {
        let registry = registry();
        assert!(registry.resolve_and_touch("nope").await.unwrap().is_none());

        registry.add("a", "https://x.example").await.unwrap();
        for expected in 1..=3 {
            let record = registry.resolve_and_touch("/a").await.unwrap().unwrap();
            assert_eq!(record.request_count, expected);
        }
    }

    #[tokio::test]
    async fn test_remove_and_delete() {
        let registry = registry();
        registry.add("a", "https://x.example").await.unwrap();

        let removed = registry.remove("/a/").await.unwrap().unwrap();
        assert_eq!(removed.name, "a");
        assert!(registry.remove("a").await.unwrap().is_none());

        // deleting an unknown name is fine
        registry.delete("a").await.unwrap();
        assert!(registry.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_root_name_is_preserved() {
        let registry = registry();
        registry.add("/", "https://home.example").await.unwrap();
        let links = registry.list_all().await.unwrap();
        assert!(links.contains_key("/"));
    }

    #[tokio::test]
    async fn test_concurrent_touches_are_not_lost() {
        let registry = Arc::new(registry());
        registry.add("hot", "https://x.example").await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.resolve_and_touch("hot").await.unwrap() })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let record = registry.get("hot").await.unwrap().unwrap();
        assert_eq!(record.request_count, 50);
    }
}
