//! Best-effort author attribution.
//!
//! An [`AuthorSource`] may fail or hang; [`resolve_author`] turns any miss into
//! [`UNKNOWN_AUTHOR`], and [`Timed`] bounds a slow source so a stuck lookup
//! never blocks annotation creation.

use crate::types::UNKNOWN_AUTHOR;
use std::sync::mpsc;
use std::time::Duration;

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(2000);

/// Something that can name the current user.
pub trait AuthorSource {
    /// The display name, or `None` when it cannot be determined.
    fn lookup(&self) -> Option<String>;
}

/// A fixed author name. Useful for explicit overrides and tests.
#[derive(Debug, Clone)]
pub struct StaticAuthor(pub String);

impl AuthorSource for StaticAuthor {
    fn lookup(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Never resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthor;

impl AuthorSource for NoAuthor {
    fn lookup(&self) -> Option<String> {
        None
    }
}

/// Look up the author, falling back to [`UNKNOWN_AUTHOR`] on a miss or a
/// blank name.
pub fn resolve_author(source: &dyn AuthorSource) -> String {
    match source.lookup() {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => {
            tracing::debug!("author lookup failed, using fallback");
            UNKNOWN_AUTHOR.to_string()
        }
    }
}

/// Runs the wrapped source on a helper thread and gives up after `timeout`.
///
/// A lookup that outlives the timeout is abandoned; its thread finishes on its
/// own and the result is dropped.
#[derive(Debug, Clone)]
pub struct Timed<S> {
    inner: S,
    timeout: Duration,
}

impl<S> Timed<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl<S> AuthorSource for Timed<S>
where
    S: AuthorSource + Clone + Send + 'static,
{
    fn lookup(&self) -> Option<String> {
        let (tx, rx) = mpsc::channel();
        let inner = self.inner.clone();
        let spawned = std::thread::Builder::new()
            .name("author-lookup".into())
            .spawn(move || {
                let _ = tx.send(inner.lookup());
            });
        if let Err(e) = spawned {
            tracing::warn!(error = %e, "could not start author lookup");
            return None;
        }

        match rx.recv_timeout(self.timeout) {
            Ok(name) => name,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "author lookup timed out"
                );
                None
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => None,
        }
    }
}
