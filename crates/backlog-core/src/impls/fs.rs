//! Filesystem implementations of the ports.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::domain::BacklogError;
use crate::ports::{DocumentStore, TrackingDocument};

/// Writes story documents into a directory, refusing to overwrite.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
}

impl FsDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentStore for FsDocumentStore {
    fn create(&mut self, file_name: &str, body: &str) -> Result<PathBuf, BacklogError> {
        // スキャン時に存在しなかったディレクトリはここで作る
        fs::create_dir_all(&self.dir).map_err(|e| BacklogError::io(&self.dir, e))?;

        let path = self.dir.join(file_name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(BacklogError::Collision { path });
            }
            Err(e) => return Err(BacklogError::io(path, e)),
        };
        file.write_all(body.as_bytes())
            .map_err(|e| BacklogError::io(&path, e))?;
        Ok(path)
    }
}

/// The backlog file.
#[derive(Debug, Clone)]
pub struct FsTrackingDocument {
    path: PathBuf,
}

impl FsTrackingDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TrackingDocument for FsTrackingDocument {
    fn read(&self) -> Result<String, BacklogError> {
        fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BacklogError::TrackingNotFound {
                path: self.path.clone(),
                documents_written: 0,
            },
            _ => BacklogError::io(&self.path, e),
        })
    }

    fn append(&mut self, rows: &str) -> Result<(), BacklogError> {
        // create しない: read できたファイルにだけ追記する
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| BacklogError::io(&self.path, e))?;
        file.write_all(rows.as_bytes())
            .map_err(|e| BacklogError::io(&self.path, e))
    }
}
