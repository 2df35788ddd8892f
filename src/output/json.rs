use std::io;

use serde::Serialize;

use crate::document::ConfigDocument;
use crate::error::Result;

/// Render the document as JSON with four-space indentation.
pub fn render(document: &ConfigDocument) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer)?;
    let json = String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(json)
}
