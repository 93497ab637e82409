//! CLI configuration: positional program paths, zoom factor, ROM
//! directory override.
//!
//! Parsed by hand in the style already used by this codebase's CLI entry
//! point — no argument-parsing crate is pulled in for a surface this small.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--zoom requires an integer argument")]
    MissingZoomValue,
    #[error("--zoom value {0:?} is not a valid positive integer")]
    BadZoomValue(String),
    #[error("--rom-dir requires a path argument")]
    MissingRomDir,
    #[error("unrecognized option: {0}")]
    UnknownOption(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Program files to make available for injection, in CLI order.
    pub programs: Vec<PathBuf>,
    /// Display zoom factor handed to the (external) renderer.
    pub zoom: u32,
    /// Explicit ROM search directory; `None` falls back to the standard
    /// search path.
    pub rom_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            programs: Vec::new(),
            zoom: 2,
            rom_dir: None,
        }
    }
}

impl Config {
    /// Parse from an argument list (excluding argv[0]), so this is
    /// testable without touching `std::env`.
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--zoom" => {
                    let value = iter.next().ok_or(ConfigError::MissingZoomValue)?;
                    config.zoom = value
                        .parse()
                        .map_err(|_| ConfigError::BadZoomValue(value.clone()))?;
                }
                "--rom-dir" => {
                    let value = iter.next().ok_or(ConfigError::MissingRomDir)?;
                    config.rom_dir = Some(PathBuf::from(value));
                }
                other if other.starts_with("--") => {
                    return Err(ConfigError::UnknownOption(other.to_string()));
                }
                path => config.programs.push(PathBuf::from(path)),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_zoom_2_and_no_programs() {
        let config = Config::from_args(&[]).unwrap();
        assert_eq!(config.zoom, 2);
        assert!(config.programs.is_empty());
        assert!(config.rom_dir.is_none());
    }

    #[test]
    fn positional_paths_collect_in_order() {
        let config = Config::from_args(&args(&["a.prg", "b.t64"])).unwrap();
        assert_eq!(config.programs, vec![PathBuf::from("a.prg"), PathBuf::from("b.t64")]);
    }

    #[test]
    fn zoom_and_rom_dir_options_are_parsed() {
        let config = Config::from_args(&args(&["--zoom", "3", "--rom-dir", "/opt/roms"])).unwrap();
        assert_eq!(config.zoom, 3);
        assert_eq!(config.rom_dir, Some(PathBuf::from("/opt/roms")));
    }

    #[test]
    fn bad_zoom_value_is_rejected() {
        assert!(Config::from_args(&args(&["--zoom", "abc"])).is_err());
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(Config::from_args(&args(&["--frobnicate"])).is_err());
    }
}
