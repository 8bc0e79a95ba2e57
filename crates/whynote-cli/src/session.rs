use crate::config::Config;
use std::fmt;
use std::str::FromStr;
use whynote::v1::projection::{self, Decoration, TreeNode};
use whynote::v1::{Annotation, AnnotationCollection, AnnotationStore, ops};

/// An annotation id as received from the command line, normalized once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationRef {
    Id(String),
}

impl AnnotationRef {
    pub fn id(&self) -> &str {
        match self {
            AnnotationRef::Id(id) => id.as_str(),
        }
    }
}

impl FromStr for AnnotationRef {
    type Err = whynote::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        if id.is_empty() {
            return Err(whynote::Error::Validation("annotation id is empty".into()));
        }
        Ok(AnnotationRef::Id(id.to_string()))
    }
}

impl fmt::Display for AnnotationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The loaded collection for one workspace plus the file currently in view.
///
/// Every command handler receives the session; nothing else holds the
/// collection. `commit` saves first and only then replaces the in-memory copy,
/// so a failed write leaves the last known-good state in place.
#[derive(Debug)]
pub struct Session {
    store: AnnotationStore,
    collection: AnnotationCollection,
    current_file: Option<String>,
}

impl Session {
    pub fn open(config: &Config) -> whynote::Result<Self> {
        Self::with_store(AnnotationStore::new(&config.workspace_root))
    }

    pub fn with_store(store: AnnotationStore) -> whynote::Result<Self> {
        let collection = store.load()?;
        Ok(Self {
            store,
            collection,
            current_file: None,
        })
    }

    pub fn collection(&self) -> &AnnotationCollection {
        &self.collection
    }

    /// Look up an annotation, reporting a miss as [`whynote::Error::NotFound`].
    pub fn require(&self, target: &AnnotationRef) -> whynote::Result<&Annotation> {
        ops::find_by_id(&self.collection, target.id())
            .ok_or_else(|| whynote::Error::NotFound(target.id().to_string()))
    }

    pub fn commit(&mut self, next: AnnotationCollection) -> whynote::Result<()> {
        self.store.save(&next)?;
        self.collection = next;
        Ok(())
    }

    pub fn set_current_file(&mut self, file_path: impl Into<String>) {
        self.current_file = Some(file_path.into());
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// Sidebar nodes for the current file, or the whole workspace when no
    /// file is in view.
    pub fn tree(&self) -> Vec<TreeNode> {
        match &self.current_file {
            Some(file) => projection::tree(&self.collection, file),
            None => projection::workspace_tree(&self.collection),
        }
    }

    pub fn decorations(&self) -> Vec<Decoration> {
        match &self.current_file {
            Some(file) => projection::decorations(&self.collection, file),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    pub fn session() -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        let session = Session::with_store(AnnotationStore::new(dir.path())).unwrap();
        (dir, session)
    }
}
