//! Reading line-oriented input files that may not be valid UTF-8.

use crate::error::SettingError;
use std::path::Path;

/// Reads `path` and decodes it line by line.
///
/// Invalid UTF-8 is replaced with U+FFFD within the line it occurs on, so a
/// stray Latin-1 byte only affects that line's text.
pub(crate) fn read_lossy(path: &Path) -> Result<String, SettingError> {
    let bytes = std::fs::read(path).map_err(|e| SettingError::io(path, e))?;
    Ok(decode_lines(&bytes))
}

fn decode_lines(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for line in bytes.split_inclusive(|&b| b == b'\n') {
        text.push_str(&String::from_utf8_lossy(line));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_utf8_unchanged() {
        assert_eq!(decode_lines("a,b\nclk,\u{b5}\n".as_bytes()), "a,b\nclk,\u{b5}\n");
    }

    #[test]
    fn invalid_byte_stays_on_its_line() {
        let text = decode_lines(b"25\xb0C\nclk,1\n");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["25\u{fffd}C", "clk,1"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_lossy(Path::new("/nonexistent/input.txt")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
