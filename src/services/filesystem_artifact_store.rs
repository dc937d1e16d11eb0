use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use crate::domain::StoreError;
use crate::ports::ArtifactStore;

/// Filesystem-based artifact store. Prefixes map to directories under `root`.
///
/// Objects are written to a hidden staging file and hard-linked into place, so
/// a name is only ever visible with its complete body.
#[derive(Debug, Clone)]
pub struct FilesystemArtifactStore {
    root: PathBuf,
}

impl FilesystemArtifactStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map an object name to a path, rejecting anything that leaves `root`.
    fn resolve(&self, object: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(object);
        if object.is_empty()
            || relative.is_absolute()
            || !relative.components().all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(StoreError::InvalidName(object.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

fn io_error(object: &str, source: io::Error) -> StoreError {
    StoreError::Io { object: object.to_string(), source }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

/// Fill `staging`, then link it to `path`. The staging file is removed on
/// every exit; `path` exists only if the whole body was written.
fn publish(
    path: &Path,
    staging: &Path,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> io::Result<()> {
    let mut file =
        OpenOptions::new().write(true).create(true).truncate(true).open(staging)?;
    let result = fill(&mut file)
        .and_then(|()| file.sync_all())
        .and_then(|()| fs::hard_link(staging, path));
    drop(file);
    let _ = fs::remove_file(staging);
    result
}

impl ArtifactStore for FilesystemArtifactStore {
    fn read_text(&self, object: &str) -> Result<String, StoreError> {
        let path = self.resolve(object)?;
        fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound(object.to_string()),
            _ => io_error(object, err),
        })
    }

    fn write_new(&self, object: &str, content: &str) -> Result<(), StoreError> {
        let path = self.resolve(object)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| io_error(object, err))?;
        }

        if path.exists() {
            return Err(StoreError::AlreadyExists(object.to_string()));
        }

        publish(&path, &staging_path(&path), |file| file.write_all(content.as_bytes())).map_err(
            |err| match err.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists(object.to_string()),
                _ => io_error(object, err),
            },
        )
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let prefix = prefix.trim_end_matches('/');
        let dir = self.resolve(prefix)?;

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(io_error(prefix, err)),
        };

        let mut objects = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| io_error(prefix, err))?;
            let file_type = entry.file_type().map_err(|err| io_error(prefix, err))?;
            if !file_type.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with('.') {
                    continue;
                }
                objects.push(format!("{}/{}", prefix, name));
            }
        }
        objects.sort();
        Ok(objects)
    }
}
