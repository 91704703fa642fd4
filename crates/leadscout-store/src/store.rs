//! Load, mutate under lock, persist wholesale.

use std::path::{Path, PathBuf};

use leadscout_core::{Error, LeadRecord, Result, StoredLead};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Durable collection of leads, newest first.
pub struct LeadStore {
    path: PathBuf,
    leads: Mutex<Vec<StoredLead>>,
}

impl LeadStore {
    /// Open the store at `path`, loading any existing collection.
    ///
    /// A missing file is an empty store. A file that does not parse is an
    /// error rather than being silently replaced.
    pub fn open(path: &Path) -> Result<Self> {
        let leads: Vec<StoredLead> = match std::fs::read_to_string(path) {
            Ok(data) if data.trim().is_empty() => Vec::new(),
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                Error::Storage(format!("{} is not a valid lead file: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        info!("LeadStore opened: {} leads in {}", leads.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            leads: Mutex::new(leads),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stamp and insert a record at position 0. Returns the new total.
    pub fn append(&self, record: LeadRecord, url: &str) -> Result<usize> {
        let lead = StoredLead::capture(record, url);
        let id = lead.id.clone();
        let total = self.mutate(|leads| {
            leads.insert(0, lead);
            Ok(leads.len())
        })?;
        info!("Saved lead {} from {} ({} total)", id, url, total);
        Ok(total)
    }

    /// All leads in stored order.
    pub fn list(&self) -> Vec<StoredLead> {
        self.leads.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.leads.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove the lead at `index`. Returns the remaining count.
    pub fn delete_at(&self, index: usize) -> Result<usize> {
        let remaining = self.mutate(|leads| {
            if index >= leads.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    len: leads.len(),
                });
            }
            leads.remove(index);
            Ok(leads.len())
        })?;
        info!("Deleted lead at {} ({} remaining)", index, remaining);
        Ok(remaining)
    }

    /// Remove every lead.
    pub fn clear(&self) -> Result<()> {
        self.mutate(|leads| {
            leads.clear();
            Ok(())
        })?;
        info!("Cleared all leads");
        Ok(())
    }

    /// Apply `f` to a copy of the collection and persist it before
    /// committing, all under the lock. On any error nothing changes.
    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<StoredLead>) -> Result<T>) -> Result<T> {
        let mut guard = self.leads.lock();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(out)
    }

    fn persist(&self, leads: &[StoredLead]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(leads)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!("Persisted {} leads to {}", leads.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lead(title: &str) -> LeadRecord {
        LeadRecord {
            job_title: Some(title.into()),
            ..Default::default()
        }
    }

    fn temp_store() -> (tempfile::TempDir, LeadStore) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = LeadStore::open(&dir.path().join("leads.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_append_puts_newest_first() {
        let (_dir, store) = temp_store();
        assert_eq!(store.append(lead("First"), "https://a.test").unwrap(), 1);
        assert_eq!(store.append(lead("Second"), "https://b.test").unwrap(), 2);

        let leads = store.list();
        assert_eq!(leads[0].record.job_title.as_deref(), Some("Second"));
        assert_eq!(leads[0].source_url, "https://b.test");
        assert_eq!(leads[1].record.job_title.as_deref(), Some("First"));
        assert!(leads[0].captured_at >= leads[1].captured_at);
    }

    #[test]
    fn test_delete_at_shifts_following_leads() {
        let (_dir, store) = temp_store();
        store.append(lead("Old"), "u").unwrap();
        store.append(lead("New"), "u").unwrap();

        assert_eq!(store.delete_at(0).unwrap(), 1);
        let leads = store.list();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].record.job_title.as_deref(), Some("Old"));
    }

    #[test]
    fn test_delete_out_of_range_changes_nothing() {
        let (_dir, store) = temp_store();
        store.append(lead("Only"), "u").unwrap();

        match store.delete_at(3) {
            Err(Error::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 3);
                assert_eq!(len, 1);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_empties_store() {
        let (_dir, store) = temp_store();
        store.append(lead("A"), "u").unwrap();
        store.append(lead("B"), "u").unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("leads.json");
        {
            let store = LeadStore::open(&path).unwrap();
            store.append(lead("Kept"), "https://kept.test").unwrap();
        }
        let reopened = LeadStore::open(&path).unwrap();
        let leads = reopened.list();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].record.job_title.as_deref(), Some("Kept"));
        assert!(!dir.path().join("leads.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("leads.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(LeadStore::open(&path), Err(Error::Storage(_))));
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.append(lead(&format!("Job {i}")), "u").unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 8);
        assert_eq!(LeadStore::open(store.path()).unwrap().len(), 8);
    }
}
