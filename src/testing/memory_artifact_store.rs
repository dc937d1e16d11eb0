use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use crate::domain::StoreError;
use crate::ports::ArtifactStore;

/// In-memory artifact store for pipeline tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryArtifactStore {
    pub objects: Arc<Mutex<BTreeMap<String, String>>>,
    pub fail_writes: Arc<Mutex<bool>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object into the store.
    pub fn with_object(self, object: &str, content: &str) -> Self {
        self.objects.lock().unwrap().insert(object.to_string(), content.to_string());
        self
    }

    /// Make every subsequent write fail with an I/O error.
    pub fn with_failing_writes(self) -> Self {
        *self.fail_writes.lock().unwrap() = true;
        self
    }

    pub fn get(&self, object: &str) -> Option<String> {
        self.objects.lock().unwrap().get(object).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn names_under(&self, prefix: &str) -> Vec<String> {
        self.list(prefix).unwrap_or_default()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn read_text(&self, object: &str) -> Result<String, StoreError> {
        self.get(object).ok_or_else(|| StoreError::NotFound(object.to_string()))
    }

    fn write_new(&self, object: &str, content: &str) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(StoreError::Io {
                object: object.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "bucket is read-only"),
            });
        }
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(object) {
            return Err(StoreError::AlreadyExists(object.to_string()));
        }
        objects.insert(object.to_string(), content.to_string());
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let dir = format!("{}/", prefix.trim_end_matches('/'));
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|name| name.strip_prefix(&dir).is_some_and(|rest| !rest.contains('/')))
            .cloned()
            .collect())
    }
}
