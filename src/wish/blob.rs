//! Scoped references to local files picked by the user.
//!
//! A picked file is copied into a [`BlobStore`] and addressed through a
//! `blob:` URL. The [`ObjectUrl`] guard owns the entry: dropping it revokes
//! the URL and frees the bytes.

use std::{
    collections::HashMap,
    fmt,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct BlobStore {
    entries: Arc<Mutex<HashMap<Uuid, Arc<[u8]>>>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_object_url(&self, bytes: impl Into<Arc<[u8]>>) -> ObjectUrl {
        self.insert(bytes.into(), None)
    }

    /// Same as [`BlobStore::create_object_url`], remembering where the bytes came from.
    pub fn create_object_url_for(
        &self,
        origin: impl AsRef<Path>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> ObjectUrl {
        let name = origin
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.insert(bytes.into(), name)
    }

    /// Bytes behind a live URL, `None` once revoked.
    pub fn resolve(&self, id: &Uuid) -> Option<Arc<[u8]>> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.lock().contains_key(id)
    }

    /// Number of live URLs.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, bytes: Arc<[u8]>, name: Option<String>) -> ObjectUrl {
        let id = Uuid::new_v4();
        self.lock().insert(id, bytes);
        tracing::debug!(%id, name = ?name, "created object url");
        ObjectUrl {
            id,
            name,
            store: self.clone(),
        }
    }

    fn revoke(&self, id: &Uuid) {
        if self.lock().remove(id).is_some() {
            tracing::debug!(%id, "revoked object url");
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Arc<[u8]>>> {
        // The map stays consistent even if a holder panicked.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A live `blob:` URL. Revoked on drop.
pub struct ObjectUrl {
    id: Uuid,
    name: Option<String>,
    store: BlobStore,
}

impl ObjectUrl {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> String {
        format!("blob:{}", self.id)
    }

    /// File name of the picked file, if it came from disk.
    pub fn file_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn bytes(&self) -> Option<Arc<[u8]>> {
        self.store.resolve(&self.id)
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectUrl")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for ObjectUrl {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.store.revoke(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_revokes_the_url() {
        let store = BlobStore::new();
        let url = store.create_object_url(vec![1u8, 2, 3]);
        let id = url.id();
        assert!(url.url().starts_with("blob:"));
        assert_eq!(url.bytes().as_deref(), Some(&[1u8, 2, 3][..]));
        assert_eq!(store.len(), 1);

        drop(url);
        assert!(!store.contains(&id));
        assert!(store.resolve(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn urls_are_independent() {
        let store = BlobStore::new();
        let a = store.create_object_url_for("/tmp/a.png", vec![0u8]);
        let b = store.create_object_url(vec![1u8]);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.file_name(), Some("a.png"));
        assert_eq!(b.file_name(), None);

        drop(a);
        assert_eq!(store.len(), 1);
        assert!(b.bytes().is_some());
    }
}
