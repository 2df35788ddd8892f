pub mod json;
pub mod preview;
pub mod yaml;

use std::path::Path;

use crate::document::ConfigDocument;
use crate::error::Result;

/// Console rendering selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    /// Pretty JSON dump of the parsed document.
    Json,
    /// Tab-indented YAML, as it will be written to the output file.
    Preview,
}

/// Render a document in the specified style.
pub fn render(document: &ConfigDocument, rendering: Rendering) -> Result<String> {
    match rendering {
        Rendering::Json => json::render(document),
        Rendering::Preview => Ok(preview::render(&yaml::render(document)?)),
    }
}

/// Write the compact YAML rendering to `path`, replacing any existing file.
pub fn write_document(document: &ConfigDocument, path: &Path) -> Result<()> {
    let rendered = yaml::render(document)?;
    std::fs::write(path, rendered)?;
    tracing::debug!(path = %path.display(), "wrote configuration");
    Ok(())
}
