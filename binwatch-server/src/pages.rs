//! Dashboard HTML pages with the maps key filled in.

use std::path::{Path, PathBuf};

use tracing::error;

use crate::error::ApiError;

/// Placeholder replaced by the maps API key in every page.
pub const MAPS_KEY_PLACEHOLDER: &str = "{{GOOGLE_MAPS_API_KEY}}";

/// Pages served from the public directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Public map dashboard.
    Dashboard,
    /// Operator control panel.
    Control,
}

impl Page {
    fn file_name(self) -> &'static str {
        match self {
            Page::Dashboard => "index.html",
            Page::Control => "control.html",
        }
    }
}

/// Reads page templates from disk on every request.
#[derive(Debug, Clone)]
pub struct PageTemplates {
    dir: PathBuf,
    maps_api_key: String,
}

impl PageTemplates {
    /// Templates under `dir`, rendered with `maps_api_key`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, maps_api_key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            maps_api_key: maps_api_key.into(),
        }
    }

    /// Directory the templates are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PageUnavailable`] when the template cannot be read.
    pub async fn render(&self, page: Page) -> Result<String, ApiError> {
        let path = self.dir.join(page.file_name());
        let template = tokio::fs::read_to_string(&path).await.map_err(|err| {
            error!(path = %path.display(), error = %err, "failed to read page template");
            ApiError::PageUnavailable
        })?;
        Ok(template.replace(MAPS_KEY_PLACEHOLDER, &self.maps_api_key))
    }
}
