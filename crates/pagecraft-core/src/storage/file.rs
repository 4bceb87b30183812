//! Projects stored as JSON files, one per id.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::page::Project;
use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory-backed project storage (native only).
pub struct FileStorage {
    root: PathBuf,
}

fn io_error(action: &str, path: &Path, e: io::Error) -> StorageError {
    StorageError::Io(format!("Could not {} {}: {}", action, path.display(), e))
}

impl FileStorage {
    /// Storage rooted at `root`, which is created when missing.
    pub fn new(root: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&root).map_err(|e| io_error("create", &root, e))?;
        Ok(Self { root })
    }

    /// Storage under the platform data directory, e.g.
    /// `~/.local/share/pagecraft/projects` on Linux.
    pub fn default_location() -> StorageResult<Self> {
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("No data or home directory available".to_string()))?;

        Self::new(data_dir.join("pagecraft").join("projects"))
    }

    pub fn base_path(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_id(id)))
    }
}

/// File stem for a project id. Bytes outside `[A-Za-z0-9_-]` become `%XX`, so
/// distinct ids never share a file and no id can leave the directory.
fn encode_id(id: &str) -> String {
    let mut stem = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(byte as char);
        } else {
            let _ = write!(stem, "%{:02X}", byte);
        }
    }
    stem
}

/// Inverse of [`encode_id`]. `None` for stems it could not have produced.
fn decode_id(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    String::from_utf8(bytes).ok()
}

impl Storage for FileStorage {
    fn save(&self, id: &str, project: &Project) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_for(id);
        let encoded = project
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()));

        Box::pin(async move {
            fs::write(&path, encoded?).map_err(|e| io_error("write", &path, e))
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Project>> {
        let path = self.path_for(id);
        let id = id.to_string();

        Box::pin(async move {
            let json = match fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(StorageError::NotFound(id));
                }
                Err(e) => return Err(io_error("read", &path, e)),
            };

            Project::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("{} is not a project: {}", path.display(), e))
            })
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.path_for(id);

        Box::pin(async move {
            match fs::remove_file(&path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error("delete", &path, e)),
                _ => Ok(()),
            }
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let entries = match fs::read_dir(&self.root) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => return Err(io_error("list", &self.root, e)),
            };

            let mut ids: Vec<String> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).and_then(decode_id))
                .collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.path_for(id);
        Box::pin(async move { Ok(path.is_file()) })
    }
}
