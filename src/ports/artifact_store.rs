//! Artifact store port definition.

use crate::domain::StoreError;

/// Port for a bucket-like object store.
///
/// Objects are addressed by `<prefix>/<file>` names. Writes never replace an
/// existing object.
pub trait ArtifactStore {
    /// Read an object as UTF-8 text.
    fn read_text(&self, object: &str) -> Result<String, StoreError>;

    /// Create a new object. Fails with [`StoreError::AlreadyExists`] if the
    /// name is taken.
    fn write_new(&self, object: &str, content: &str) -> Result<(), StoreError>;

    /// Object names directly under `prefix`, sorted ascending.
    fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
