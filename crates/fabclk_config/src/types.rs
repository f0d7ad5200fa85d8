//! Option types for a single generator invocation.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Option key holding the device grid size as `"<W>x<H>"`.
pub const OPT_DEVICE_SIZE: &str = "device_size";
/// Option key holding the clock-assignment file path.
pub const OPT_DESIGN: &str = "design";
/// Option key holding the pin-table file path.
pub const OPT_PIN: &str = "pin";

/// Flag that replaces the template path in the output annotation with a fixed string.
pub const FLAG_UNITTEST: &str = "is_unittest";
/// Flag that turns unparsable pin-table coordinates into validation errors.
pub const FLAG_STRICT_COORDINATES: &str = "strict_coordinates";

/// All flag names understood by the generator.
pub const KNOWN_FLAGS: &[&str] = &[FLAG_UNITTEST, FLAG_STRICT_COORDINATES];

/// Fully resolved inputs for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Device grid size, still unparsed (e.g. `"10x8"`).
    ///
    /// Kept as a string because a malformed size is not a configuration
    /// error: the generator reports it as a skipped run.
    pub device_size: String,
    /// Path to the clock-assignment file.
    pub design: PathBuf,
    /// Path to the vendor pin-table file.
    pub pin: PathBuf,
    /// Optional bitstream setting template whose prefix is kept in the output.
    pub template: Option<PathBuf>,
    /// Destination of the generated setting file.
    pub output: Option<PathBuf>,
    /// Annotate the template origin with a fixed placeholder instead of its path.
    pub is_unittest: bool,
    /// Reject unparsable pin-table coordinates instead of reading them as zero.
    pub strict_coordinates: bool,
}

impl GenerateOptions {
    /// Builds options from a string map and a list of flag names.
    ///
    /// `options` must contain `device_size`, `design` and `pin`. Unknown keys
    /// are ignored; unknown flags are rejected.
    pub fn from_option_map(
        options: &BTreeMap<String, String>,
        flags: &[String],
        template: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let required = |key: &str| -> Result<String, ConfigError> {
            options
                .get(key)
                .cloned()
                .ok_or_else(|| ConfigError::MissingOption(key.to_string()))
        };

        let device_size = required(OPT_DEVICE_SIZE)?;
        let design = PathBuf::from(required(OPT_DESIGN)?);
        let pin = PathBuf::from(required(OPT_PIN)?);

        if let Some(unknown) = flags.iter().find(|f| !KNOWN_FLAGS.contains(&f.as_str())) {
            return Err(ConfigError::UnknownFlag(unknown.clone()));
        }
        let has_flag = |name: &str| flags.iter().any(|f| f == name);

        Ok(Self {
            device_size,
            design,
            pin,
            template,
            output,
            is_unittest: has_flag(FLAG_UNITTEST),
            strict_coordinates: has_flag(FLAG_STRICT_COORDINATES),
        })
    }
}

/// The contents of a `fabclk.toml` options file.
///
/// ```toml
/// template = "base_setting.xml"
/// output = "build/bitstream_setting.xml"
/// flags = ["strict_coordinates"]
///
/// [options]
/// device_size = "44x40"
/// design = "design.clk"
/// pin = "pin_table.csv"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OptionsFile {
    /// Generator options keyed by name (`device_size`, `design`, `pin`).
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Flag names to enable.
    #[serde(default)]
    pub flags: Vec<String>,
    /// Optional template path.
    pub template: Option<String>,
    /// Optional output path.
    pub output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_map() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(OPT_DEVICE_SIZE.to_string(), "10x8".to_string());
        map.insert(OPT_DESIGN.to_string(), "design.clk".to_string());
        map.insert(OPT_PIN.to_string(), "pins.csv".to_string());
        map
    }

    #[test]
    fn from_option_map_minimal() {
        let opts = GenerateOptions::from_option_map(&base_map(), &[], None, None).unwrap();
        assert_eq!(opts.device_size, "10x8");
        assert_eq!(opts.design, PathBuf::from("design.clk"));
        assert_eq!(opts.pin, PathBuf::from("pins.csv"));
        assert!(opts.template.is_none());
        assert!(!opts.is_unittest);
        assert!(!opts.strict_coordinates);
    }

    #[test]
    fn from_option_map_flags() {
        let flags = vec![
            FLAG_UNITTEST.to_string(),
            FLAG_STRICT_COORDINATES.to_string(),
        ];
        let opts = GenerateOptions::from_option_map(
            &base_map(),
            &flags,
            Some(PathBuf::from("in.xml")),
            Some(PathBuf::from("out.xml")),
        )
        .unwrap();
        assert!(opts.is_unittest);
        assert!(opts.strict_coordinates);
        assert_eq!(opts.template.as_deref(), Some(std::path::Path::new("in.xml")));
    }

    #[test]
    fn missing_each_required_key() {
        for key in [OPT_DEVICE_SIZE, OPT_DESIGN, OPT_PIN] {
            let mut map = base_map();
            map.remove(key);
            let err = GenerateOptions::from_option_map(&map, &[], None, None).unwrap_err();
            match err {
                ConfigError::MissingOption(name) => assert_eq!(name, key),
                other => panic!("expected MissingOption, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_flag_rejected() {
        let err = GenerateOptions::from_option_map(&base_map(), &["fast".to_string()], None, None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFlag(_)));
        assert!(err.to_string().contains("fast"));
    }

    #[test]
    fn unrelated_keys_ignored() {
        let mut map = base_map();
        map.insert("family".to_string(), "gemini".to_string());
        assert!(GenerateOptions::from_option_map(&map, &[], None, None).is_ok());
    }
}
