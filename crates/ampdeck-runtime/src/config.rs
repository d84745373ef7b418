#![forbid(unsafe_code)]

//! Panel configuration.
//!
//! Everything the panel needs at startup lives in one [`PanelConfig`] that
//! is loaded from TOML. Every field has a default, so an empty file (or no
//! file at all) gives the stock kiosk setup.
//!
//! ```toml
//! [display]
//! width = 800
//! height = 480
//!
//! [input]
//! footswitch_name = "PCsensor FootSwitch3"
//!
//! [keymap]
//! reset = 30
//!
//! [[programs]]
//! name = "Trippin"
//! amps = [
//!     { name = "MG", mode = "dirty", gain = 90, volume = 70, fx = "GATE | DELAY" },
//!     { name = "JD", mode = "clean", gain = 20, volume = 80, fx = "REVERB" },
//! ]
//! ```

use std::path::{Path, PathBuf};

use ampdeck_core::control::MIDI_MAX;
use ampdeck_core::{Keymap, ProgramPreset, Rgba};
use ampdeck_widgets::{PALETTE_LEN, Palette, Style};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub keymap: Keymap,
    pub palette: PaletteConfig,
    pub logging: LoggingConfig,
    /// Initial program list.
    pub programs: Vec<ProgramPreset>,
}

impl PanelConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(Error::Invalid(problems));
        }
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check value ranges. An empty list means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let d = &self.display;
        if d.width == 0 || d.height == 0 {
            errors.push(format!(
                "display size must be non-zero, got {}x{}",
                d.width, d.height
            ));
        }
        if d.header_height <= 0.0 || d.header_height >= d.height as f32 {
            errors.push(format!(
                "display.header_height {} must lie inside the display height {}",
                d.header_height, d.height
            ));
        }
        if d.pad < 0.0 || d.corner_radius < 0.0 || d.text_size <= 0.0 {
            errors.push("display.pad, corner_radius and text_size must be positive".into());
        }
        let k = &self.keymap;
        if k.reset == k.previous || k.reset == k.next || k.previous == k.next {
            errors.push(format!(
                "keymap scancodes must be distinct, got reset={} previous={} next={}",
                k.reset, k.previous, k.next
            ));
        }
        for (p, program) in self.programs.iter().enumerate() {
            for (a, amp) in program.amps.iter().enumerate() {
                if amp.gain > MIDI_MAX || amp.volume > MIDI_MAX {
                    errors.push(format!(
                        "programs[{p}].amps[{a}] gain {} and volume {} must be at most {MIDI_MAX}",
                        amp.gain, amp.volume
                    ));
                }
            }
        }
        errors
    }

    pub fn palette(&self) -> Palette {
        self.palette.colors.map(Palette::new).unwrap_or_default()
    }

    pub fn style(&self) -> Style {
        Style {
            pad: self.display.pad,
            text_size: self.display.text_size,
            corner_radius: self.display.corner_radius,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub pad: f32,
    pub text_size: f32,
    pub corner_radius: f32,
    /// Height of the program-name header, separator included.
    pub header_height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            pad: 2.0,
            text_size: 28.0,
            corner_radius: 4.0,
            header_height: 34.0,
        }
    }
}

impl DisplayConfig {
    pub fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

/// `[input]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Substring matched against device names to find the footswitch.
    pub footswitch_name: String,
    /// Open this node instead of searching by name.
    pub footswitch_path: Option<PathBuf>,
    /// Open this node instead of the first absolute-axis device.
    pub touch_path: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            footswitch_name: "PCsensor FootSwitch3".to_owned(),
            footswitch_path: None,
            touch_path: None,
        }
    }
}

/// `[palette]` section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Replacement ramp, darkest first. Absent means the built-in ramp.
    pub colors: Option<[Rgba; PALETTE_LEN]>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}
