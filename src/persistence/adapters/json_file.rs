//! Snapshot repository backed by one JSON file.
//!
//! Access is confined to the file's parent directory through a cap-std
//! capability; the adapter never touches paths outside it.

use crate::persistence::{Snapshot, SnapshotError, SnapshotRepository, SnapshotResult};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;

/// Stores the snapshot as pretty-printed JSON in a single file.
#[derive(Debug)]
pub struct JsonFileSnapshotRepository {
    dir: Dir,
    file_name: String,
}

impl JsonFileSnapshotRepository {
    /// Opens a repository for the file at `path`. The file itself need not
    /// exist yet, but its parent directory must.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Persistence`] when `path` has no file name or
    /// the parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> SnapshotResult<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            SnapshotError::persistence(std::io::Error::other("path must include a file name"))
        })?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(SnapshotError::persistence)?;
        Ok(Self::in_dir(dir, file_name))
    }

    /// Uses `file_name` inside an already opened directory capability.
    #[must_use]
    pub fn in_dir(dir: Dir, file_name: impl Into<String>) -> Self {
        Self {
            dir,
            file_name: file_name.into(),
        }
    }

    fn staging_name(&self) -> String {
        format!(".{}.tmp", self.file_name)
    }
}

impl SnapshotRepository for JsonFileSnapshotRepository {
    fn load(&self) -> SnapshotResult<Option<Snapshot>> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SnapshotError::persistence(err)),
        };
        Snapshot::from_json(&contents).map(Some)
    }

    fn save(&self, snapshot: &Snapshot) -> SnapshotResult<()> {
        let document = snapshot.to_json()?;
        let staging = self.staging_name();
        self.dir
            .write(&staging, document)
            .map_err(SnapshotError::persistence)?;
        self.dir
            .rename(&staging, &self.dir, &self.file_name)
            .map_err(SnapshotError::persistence)
    }
}
