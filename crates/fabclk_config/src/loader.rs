//! Options file loading and validation.

use crate::error::ConfigError;
use crate::types::{OptionsFile, KNOWN_FLAGS, OPT_DESIGN, OPT_PIN};
use std::path::Path;

/// Loads and validates a `fabclk.toml` options file.
///
/// Relative `design`, `pin`, `template` and `output` paths are resolved
/// against the directory containing the file.
pub fn load_options(path: &Path) -> Result<OptionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file = load_options_from_str(&content)?;
    if let Some(base) = path.parent() {
        anchor_paths(&mut file, base);
    }
    Ok(file)
}

/// Parses and validates an options file from a string.
///
/// Paths are returned exactly as written.
pub fn load_options_from_str(content: &str) -> Result<OptionsFile, ConfigError> {
    let file: OptionsFile =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_options(&file)?;
    Ok(file)
}

fn validate_options(file: &OptionsFile) -> Result<(), ConfigError> {
    for flag in &file.flags {
        if !KNOWN_FLAGS.contains(&flag.as_str()) {
            return Err(ConfigError::UnknownFlag(flag.clone()));
        }
    }
    for (key, value) in &file.options {
        if value.trim().is_empty() {
            return Err(ConfigError::BlankOption(key.clone()));
        }
    }
    Ok(())
}

/// Rewrites relative paths in `file` to be relative to `base`.
fn anchor_paths(file: &mut OptionsFile, base: &Path) {
    let anchor = |value: &mut String| {
        if Path::new(value.as_str()).is_relative() {
            *value = base.join(value.as_str()).to_string_lossy().into_owned();
        }
    };
    for key in [OPT_DESIGN, OPT_PIN] {
        if let Some(value) = file.options.get_mut(key) {
            anchor(value);
        }
    }
    if let Some(value) = file.template.as_mut() {
        anchor(value);
    }
    if let Some(value) = file.output.as_mut() {
        anchor(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_full_file() {
        let toml = r#"
template = "base.xml"
output = "out/setting.xml"
flags = ["is_unittest"]

[options]
device_size = "44x40"
design = "design.clk"
pin = "pins.csv"
"#;
        let file = load_options_from_str(toml).unwrap();
        assert_eq!(file.options["device_size"], "44x40");
        assert_eq!(file.options["design"], "design.clk");
        assert_eq!(file.flags, vec!["is_unittest"]);
        assert_eq!(file.template.as_deref(), Some("base.xml"));
        assert_eq!(file.output.as_deref(), Some("out/setting.xml"));
    }

    #[test]
    fn empty_file_is_default() {
        let file = load_options_from_str("").unwrap();
        assert_eq!(file, OptionsFile::default());
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_options_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_top_level_key_errors() {
        let err = load_options_from_str("device = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_flag_errors() {
        let err = load_options_from_str("flags = [\"turbo\"]").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFlag(ref f) if f == "turbo"));
    }

    #[test]
    fn blank_option_value_errors() {
        let err = load_options_from_str("[options]\npin = \"  \"").unwrap_err();
        match err {
            ConfigError::BlankOption(key) => assert_eq!(key, "pin"),
            other => panic!("expected BlankOption, got {other:?}"),
        }
    }

    #[test]
    fn relative_paths_anchored_to_file_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("fabclk.toml");
        std::fs::write(
            &path,
            r#"
output = "setting.xml"
template = "/abs/base.xml"

[options]
device_size = "10x8"
design = "design.clk"
pin = "pins.csv"
"#,
        )
        .unwrap();

        let file = load_options(&path).unwrap();
        assert_eq!(
            PathBuf::from(&file.options["design"]),
            dir.path().join("design.clk")
        );
        assert_eq!(
            PathBuf::from(&file.options["pin"]),
            dir.path().join("pins.csv")
        );
        assert_eq!(
            PathBuf::from(file.output.unwrap()),
            dir.path().join("setting.xml")
        );
        assert_eq!(file.template.as_deref(), Some("/abs/base.xml"));
        assert_eq!(file.options["device_size"], "10x8");
    }

    #[test]
    fn io_error_from_missing_file() {
        let err = load_options(Path::new("/nonexistent/dir/fabclk.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
