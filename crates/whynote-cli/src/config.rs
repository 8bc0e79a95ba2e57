use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use whynote::v1::author::{AuthorSource, StaticAuthor, Timed};
use whynote_git::GitAuthor;

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Workspace root holding .whyannotations.json
    #[arg(long, global = true, env = "WHY_WORKSPACE", default_value = ".")]
    pub workspace: PathBuf,

    /// Author name to record instead of looking it up in git
    #[arg(long, global = true, env = "WHY_AUTHOR")]
    pub author: Option<String>,

    /// Give up on the git author lookup after this many milliseconds
    #[arg(
        long,
        global = true,
        env = "WHY_AUTHOR_TIMEOUT_MS",
        default_value_t = 2000
    )]
    pub author_timeout_ms: u64,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub workspace_root: PathBuf,
    pub author: Option<String>,
    pub author_timeout: Duration,
    pub pretty: bool,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let workspace_root = absolutize(&args.workspace)?;
        if !workspace_root.is_dir() {
            anyhow::bail!(
                "workspace root is not a directory: {}",
                workspace_root.display()
            );
        }
        Ok(Self {
            workspace_root,
            author: args.author.clone().filter(|a| !a.trim().is_empty()),
            author_timeout: Duration::from_millis(args.author_timeout_ms),
            pretty: args.pretty,
        })
    }

    /// An explicit `--author` wins; otherwise git, bounded by the timeout.
    pub fn author_source(&self) -> Box<dyn AuthorSource> {
        match &self.author {
            Some(name) => Box::new(StaticAuthor(name.clone())),
            None => Box::new(Timed::new(
                GitAuthor::new(&self.workspace_root),
                self.author_timeout,
            )),
        }
    }
}

/// Join a relative path onto the current directory. No other normalization.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Ok(cwd.join(path))
    }
}
