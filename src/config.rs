// Runtime settings, read from an optional TOML file.
// Every field has a default, so a missing or empty file gives the stock playground.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::pattern::DEFAULT_RECTS;
use crate::types::TextStyle;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub font_size: f32,
    pub padding: f32,
    pub target_fps: usize,
    pub pattern_rects: usize,
    pub pattern_opacity: f32,
    pub autofocus_ms: u64,
    pub show_hud: bool,
    pub initial_text: String,
    /// Fixed seed for a reproducible random source.
    pub seed: Option<u64>,
    /// Where to write the generated pattern background, if anywhere.
    pub pattern_png: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            font_size: 48.0,
            padding: 40.0,
            target_fps: 60,
            pattern_rects: DEFAULT_RECTS,
            pattern_opacity: 0.08,
            autofocus_ms: 500,
            show_hud: true,
            initial_text: String::new(),
            seed: None,
            pattern_png: None,
        }
    }
}

impl Config {
    /// Defaults when `path` is None; otherwise parse and validate the file.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
        Self::from_toml(&raw, path)
    }

    /// `path` is only used to label parse errors.
    pub fn from_toml(raw: &str, path: &Path) -> Result<Self, Error> {
        let cfg: Self = toml::from_str(raw)
            .map_err(|source| Error::ConfigParse { path: path.to_path_buf(), source })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(Error::ConfigInvalid(format!("font_size must be > 0, got {}", self.font_size)));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(Error::ConfigInvalid(format!("padding must be >= 0, got {}", self.padding)));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::ConfigInvalid(format!(
                "window must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.pattern_opacity) {
            return Err(Error::ConfigInvalid(format!(
                "pattern_opacity must be within [0, 1], got {}",
                self.pattern_opacity
            )));
        }
        Ok(())
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle { font_size: self.font_size, padding: self.padding }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Config, Error> {
        Config::from_toml(raw, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert!(matches!(parse(""), Ok(cfg) if cfg == Config::default()));
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let cfg = parse("font_size = 20.0\npadding = 10.0\nseed = 7\ninitial_text = \"hi\"").unwrap();
        assert_eq!(cfg.text_style(), TextStyle { font_size: 20.0, padding: 10.0 });
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.initial_text, "hi");
        assert_eq!(cfg.width, 960);
    }

    #[test]
    fn bad_values_are_rejected() {
        for raw in ["font_size = 0.0", "padding = -1.0", "width = 0", "pattern_opacity = 2.0"] {
            assert!(matches!(parse(raw), Err(Error::ConfigInvalid(_))), "{raw}");
        }
    }

    #[test]
    fn typos_and_wrong_types_fail_to_parse() {
        assert!(matches!(parse("fontsize = 20.0"), Err(Error::ConfigParse { .. })));
        assert!(matches!(parse("width = \"wide\""), Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = Path::new("/definitely/not/here.toml");
        match Config::load(Some(path)) {
            Err(Error::ConfigRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
