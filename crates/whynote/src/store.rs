//! JSON persistence for a workspace's annotations.
//!
//! One document per workspace, at `<root>/.whyannotations.json`. Every save
//! rewrites the whole file through a temp file and rename, so readers see
//! either the old or the new document. There is no locking: the last writer
//! wins.

use crate::error::{Error, Result};
use crate::types::AnnotationCollection;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Store file name, relative to the workspace root.
pub const STORE_FILE: &str = ".whyannotations.json";

pub fn store_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(STORE_FILE)
}

/// Load the workspace's collection, creating an empty store on first use.
///
/// A store that exists but does not parse is reported as
/// [`Error::CorruptStore`] and left untouched on disk.
pub fn load(workspace_root: &Path) -> Result<AnnotationCollection> {
    let path = store_path(workspace_root);
    match std::fs::read_to_string(&path) {
        Ok(data) => parse(&path, &data),
        Err(e) if e.kind() == ErrorKind::NotFound => initialize(workspace_root, &path),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Overwrite the store with `collection`.
pub fn save(workspace_root: &Path, collection: &AnnotationCollection) -> Result<()> {
    let path = store_path(workspace_root);
    let tmp = write_temp(workspace_root, collection)?;
    tmp.persist(&path).map_err(|e| Error::io(&path, e.error))?;
    tracing::debug!(
        path = %path.display(),
        count = collection.len(),
        "saved annotation store"
    );
    Ok(())
}

fn parse(path: &Path, data: &str) -> Result<AnnotationCollection> {
    let collection = AnnotationCollection::from_json(data).map_err(|e| Error::CorruptStore {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(
        path = %path.display(),
        count = collection.len(),
        "loaded annotation store"
    );
    Ok(collection)
}

/// Create the empty store without clobbering one that appeared meanwhile.
fn initialize(workspace_root: &Path, path: &Path) -> Result<AnnotationCollection> {
    let empty = AnnotationCollection::new();
    let tmp = write_temp(workspace_root, &empty)?;
    match tmp.persist_noclobber(path) {
        Ok(_) => {
            tracing::info!(path = %path.display(), "created empty annotation store");
            Ok(empty)
        }
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
            let data = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            parse(path, &data)
        }
        Err(e) => Err(Error::io(path, e.error)),
    }
}

fn write_temp(dir: &Path, collection: &AnnotationCollection) -> Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    let tmp_path = tmp.path().to_path_buf();
    let mut json = collection
        .to_json_pretty()
        .map_err(|e| Error::io(&tmp_path, e.into()))?;
    json.push('\n');
    tmp.write_all(json.as_bytes())
        .map_err(|e| Error::io(&tmp_path, e))?;
    tmp.flush().map_err(|e| Error::io(&tmp_path, e))?;
    Ok(tmp)
}

/// A workspace-bound handle over [`load`] and [`save`].
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    root: PathBuf,
}

impl AnnotationStore {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            root: workspace_root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        store_path(&self.root)
    }

    pub fn load(&self) -> Result<AnnotationCollection> {
        load(&self.root)
    }

    pub fn save(&self, collection: &AnnotationCollection) -> Result<()> {
        save(&self.root, collection)
    }
}
