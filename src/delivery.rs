//! Where finished archives and surfaces go once the core is done with them.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context as _;

use crate::archive::FinishedArchive;
use crate::foundation::error::ReelResult;
use crate::recorder::options::CompletionHandler;

/// File name used by the default completion handler.
pub const DEFAULT_ARCHIVE_NAME: &str = "frames.zip";

/// Write `archive` to `path`, creating parent directories as needed.
pub fn save_archive(archive: &FinishedArchive, path: &Path) -> ReelResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, archive.as_bytes())
        .with_context(|| format!("write archive '{}'", path.display()))?;
    tracing::info!(
        path = %path.display(),
        entries = archive.len(),
        bytes = archive.as_bytes().len(),
        "archive saved"
    );
    Ok(())
}

/// Completion handler that saves every archive to `path`.
///
/// Write failures are logged; a completion handler has no caller to return them to.
pub fn save_to(path: impl Into<PathBuf>) -> CompletionHandler {
    let path = path.into();
    Rc::new(move |archive: FinishedArchive| {
        if let Err(e) = save_archive(&archive, &path) {
            tracing::error!(path = %path.display(), error = %e, "failed to save archive");
        }
    })
}

/// The handler a recorder starts with: save to [`DEFAULT_ARCHIVE_NAME`] in the working directory.
pub fn default_handler() -> CompletionHandler {
    save_to(DEFAULT_ARCHIVE_NAME)
}

/// Something a surface can be attached to for presentation before the loop starts.
pub trait PresentTarget<S> {
    /// Attach `surface`.
    fn attach(&mut self, surface: &S) -> ReelResult<()>;
}

impl<S, F> PresentTarget<S> for F
where
    F: FnMut(&S) -> ReelResult<()>,
{
    fn attach(&mut self, surface: &S) -> ReelResult<()> {
        self(surface)
    }
}

fn ensure_parent_dir(path: &Path) -> ReelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/delivery.rs"]
mod tests;
