//! Splicing into an existing bitstream setting file.

use crate::error::SettingError;
use std::path::{Path, PathBuf};

/// Closing tag of the bitstream setting root element.
pub const ROOT_CLOSE_TAG: &str = "</openfpga_bitstream_setting>";

/// The part of a template kept ahead of the generated overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePrefix {
    /// Where the template was read from.
    pub path: PathBuf,
    /// Raw template lines before the closing root tag, without the `\n`
    /// terminator. A trailing `\r` and any non-UTF-8 bytes are kept.
    pub lines: Vec<Vec<u8>>,
}

/// Loads the template at `path`, if it exists.
///
/// A path that does not exist yields `Ok(None)` and the caller falls back to
/// a fresh document.
pub fn load_template(path: &Path) -> Result<Option<TemplatePrefix>, SettingError> {
    if !path.exists() {
        tracing::warn!(
            "template {} does not exist; starting a new setting file",
            path.display()
        );
        return Ok(None);
    }
    let source = std::fs::read(path).map_err(|e| SettingError::io(path, e))?;
    split_template(&source, path).map(Some)
}

/// Returns the template lines that precede the closing root tag.
///
/// Everything from the closing tag onward is dropped. A template without the
/// closing tag is rejected.
pub fn split_template(source: &[u8], path: &Path) -> Result<TemplatePrefix, SettingError> {
    let mut lines = Vec::new();
    for raw in source.split_inclusive(|&b| b == b'\n') {
        let line = raw.strip_suffix(b"\n").unwrap_or(raw);
        if String::from_utf8_lossy(line).trim().starts_with(ROOT_CLOSE_TAG) {
            return Ok(TemplatePrefix {
                path: path.to_path_buf(),
                lines,
            });
        }
        lines.push(line.to_vec());
    }
    Err(SettingError::MissingSentinel {
        path: path.to_path_buf(),
    })
}
