//! Opens written figures in the default browser.

use crate::error::{Error, Result};
use std::path::Path;
use tracing::{info, warn};

/// Launches the platform's default handler for a file.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    enabled: bool,
}

impl Viewer {
    /// A viewer that opens files when `enabled`, and only logs otherwise.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether files are actually handed to the browser.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Open `path` in the default browser.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Browser`] if the launcher fails. The file is left in
    /// place either way.
    pub fn open(&self, path: &Path) -> Result<()> {
        if !self.enabled {
            info!(path = %path.display(), "browser disabled, figure written only");
            return Ok(());
        }

        open::that(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "could not open browser");
            Error::Browser {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        info!(path = %path.display(), "opened figure in browser");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_viewer_is_noop() {
        let viewer = Viewer::new(false);
        assert!(!viewer.is_enabled());
        assert!(viewer.open(Path::new("/nonexistent/figure.html")).is_ok());
    }
}
