//! Launch configuration merged from defaults, an optional TOML file, and flags.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use munchkin_core::{LayoutId, Settings};
use serde::Deserialize;
use thiserror::Error;

use crate::Args;

/// Window pixels per maze pixel when nothing else is requested.
pub(crate) const DEFAULT_SCALE: f32 = 5.0;

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}")]
    Read {
        /// Requested path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML for the expected tables.
    #[error("failed to parse config file {path}")]
    Parse {
        /// Requested path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: toml::de::Error,
    },
    /// The display scale must be a positive number.
    #[error("display scale must be positive (received {scale})")]
    InvalidScale {
        /// Rejected value.
        scale: f32,
    },
}

/// Contents of a configuration file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigFile {
    session: SessionTable,
    display: DisplayTable,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SessionTable {
    maze: Option<u8>,
    arcade: Option<bool>,
    adversaries: Option<u8>,
    pickups: Option<u8>,
    seed: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DisplayTable {
    vsync: Option<bool>,
    show_fps: Option<bool>,
    scale: Option<f32>,
}

impl ConfigFile {
    /// Reads and parses the file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Presentation options of the windowed frontend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DisplayConfig {
    pub(crate) vsync: bool,
    pub(crate) show_fps: bool,
    pub(crate) scale: f32,
}

/// Fully resolved launch options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LaunchConfig {
    pub(crate) settings: Settings,
    pub(crate) display: DisplayConfig,
}

/// Merges flags over file values over defaults.
///
/// Session counts are clamped silently; an unusable scale is an error.
pub(crate) fn resolve(args: &Args, file: &ConfigFile) -> Result<LaunchConfig, ConfigError> {
    let defaults = Settings::default();
    let session = &file.session;
    let settings = Settings {
        layout: args
            .maze
            .or(session.maze)
            .map_or(defaults.layout, LayoutId::new),
        arcade: args.arcade || session.arcade.unwrap_or(defaults.arcade),
        adversaries: args
            .adversaries
            .or(session.adversaries)
            .unwrap_or(defaults.adversaries),
        pickups: args.pickups.or(session.pickups).unwrap_or(defaults.pickups),
        seed: args.seed.or(session.seed).unwrap_or(defaults.seed),
    }
    .clamped();

    let display = &file.display;
    let scale = display.scale.unwrap_or(DEFAULT_SCALE);
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ConfigError::InvalidScale { scale });
    }

    Ok(LaunchConfig {
        settings,
        display: DisplayConfig {
            vsync: args.vsync.or(display.vsync).unwrap_or(true),
            show_fps: args.show_fps || display.show_fps.unwrap_or(false),
            scale,
        },
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn args(flags: &[&str]) -> Args {
        Args::parse_from(std::iter::once("munchkin").chain(flags.iter().copied()))
    }

    fn file(contents: &str) -> ConfigFile {
        ConfigFile::parse(contents, Path::new("munchkin.toml")).expect("valid config")
    }

    #[test]
    fn defaults_apply_without_a_file_or_flags() {
        let launch = resolve(&args(&[]), &ConfigFile::default()).expect("launch config");

        assert_eq!(launch.settings, Settings::default());
        assert_eq!(
            launch.display,
            DisplayConfig {
                vsync: true,
                show_fps: false,
                scale: DEFAULT_SCALE,
            }
        );
    }

    #[test]
    fn flags_override_file_values() {
        let file = file(concat!(
            "[session]\nmaze = 2\nadversaries = 6\nseed = 9\n\n",
            "[display]\nvsync = true\nscale = 3.0\n",
        ));

        let launch = resolve(&args(&["--maze", "4", "--vsync", "false"]), &file)
            .expect("launch config");

        assert_eq!(launch.settings.layout, LayoutId::new(4));
        assert_eq!(launch.settings.adversaries, 6);
        assert_eq!(launch.settings.seed, 9);
        assert!(!launch.display.vsync);
        assert_eq!(launch.display.scale, 3.0);
    }

    #[test]
    fn out_of_range_counts_are_clamped() {
        let launch = resolve(
            &args(&["--adversaries", "40", "--pickups", "3"]),
            &ConfigFile::default(),
        )
        .expect("launch config");

        assert_eq!(launch.settings.adversaries, 10);
        assert_eq!(launch.settings.pickups, 12);
    }

    #[test]
    fn arcade_forces_the_stock_session() {
        let file = file("[session]\narcade = true\nmaze = 3\npickups = 50\n");

        let launch = resolve(&args(&[]), &file).expect("launch config");

        assert!(launch.settings.arcade);
        assert_eq!(launch.settings.layout, LayoutId::FIRST_MAZE);
        assert_eq!(launch.settings.pickups, 12);
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let file = file("[display]\nscale = 0.0\n");

        let error = resolve(&args(&[]), &file).expect_err("zero scale");

        assert!(matches!(error, ConfigError::InvalidScale { scale } if scale == 0.0));
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        let error = ConfigFile::parse("[session]\nlives = 3\n", Path::new("munchkin.toml"))
            .expect_err("unknown key");

        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_files_report_the_path() {
        let error = ConfigFile::load(Path::new("/nonexistent/munchkin.toml")).expect_err("missing");

        assert_eq!(
            error.to_string(),
            "failed to read config file /nonexistent/munchkin.toml"
        );
    }
}
