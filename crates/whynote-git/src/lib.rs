//! Resolve annotation authors from git configuration.
//!
//! [`GitAuthor`] reads `user.name` from the repository that encloses the
//! workspace (which layers local config over global and system config), and
//! falls back to the default global config when the workspace is not inside
//! a repository.
//!
//! ```no_run
//! use std::time::Duration;
//! use whynote::v1::author::{Timed, resolve_author};
//! use whynote_git::GitAuthor;
//!
//! let source = Timed::new(GitAuthor::new("."), Duration::from_secs(2));
//! println!("{}", resolve_author(&source));
//! ```

use git2::{Config, Repository};
use std::path::PathBuf;
use whynote::v1::author::AuthorSource;

#[derive(Debug, Clone)]
pub struct GitAuthor {
    dir: PathBuf,
}

impl GitAuthor {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl AuthorSource for GitAuthor {
    fn lookup(&self) -> Option<String> {
        let config = match Repository::discover(&self.dir) {
            Ok(repo) => repo.config(),
            Err(e) => {
                tracing::debug!(dir = %self.dir.display(), error = %e, "no enclosing git repository");
                Config::open_default()
            }
        };
        match config.and_then(|c| c.get_string("user.name")) {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::debug!(error = %e, "git user.name not available");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whynote::v1::author::resolve_author;

    fn init_temp_repo(user: Option<&str>) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        if let Some(name) = user {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", name).unwrap();
        }
        dir
    }

    #[test]
    fn test_reads_repo_user_name() {
        let dir = init_temp_repo(Some("Test User"));
        let author = GitAuthor::new(dir.path());
        assert_eq!(author.lookup().as_deref(), Some("Test User"));
        assert_eq!(resolve_author(&author), "Test User");
    }

    #[test]
    fn test_discovers_from_subdirectory() {
        let dir = init_temp_repo(Some("Sub Dir User"));
        let nested = dir.path().join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(
            GitAuthor::new(&nested).lookup().as_deref(),
            Some("Sub Dir User")
        );
    }
}
