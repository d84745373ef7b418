#![forbid(unsafe_code)]

//! Amplifier control state read by the panel each frame.
//!
//! The MIDI controller owns this state; the panel only reads a snapshot of
//! it while drawing. Gain and volume are MIDI continuous-controller values.

use bitflags::bitflags;

/// Highest MIDI continuous-controller value.
pub const MIDI_MAX: u8 = 127;

/// Amplifier channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AmpMode {
    #[default]
    Clean,
    Dirty,
    Acoustic,
}

impl AmpMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::Acoustic => "acoustic",
        }
    }
}

bitflags! {
    /// Effect blocks switched on for an amplifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct FxFlags: u8 {
        const GATE = 1 << 0;
        const COMPRESSOR = 1 << 1;
        const CHORUS = 1 << 2;
        const DELAY = 1 << 3;
        const REVERB = 1 << 4;
    }
}

/// Display order and short labels for the five effect buttons.
pub const FX_ORDER: [(FxFlags, &str); 5] = [
    (FxFlags::GATE, "gate"),
    (FxFlags::COMPRESSOR, "comp"),
    (FxFlags::CHORUS, "chorus"),
    (FxFlags::DELAY, "delay"),
    (FxFlags::REVERB, "reverb"),
];

/// One amplifier's settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmpState {
    pub name: String,
    pub mode: AmpMode,
    pub gain: u8,
    pub volume: u8,
    pub fx: FxFlags,
}

impl AmpState {
    /// Named amp with controller values clamped to `0..=MIDI_MAX`.
    pub fn new(name: impl Into<String>, mode: AmpMode, gain: u8, volume: u8, fx: FxFlags) -> Self {
        Self {
            name: name.into(),
            mode,
            gain: gain.min(MIDI_MAX),
            volume: volume.min(MIDI_MAX),
            fx,
        }
    }

    /// Gain in `[0, 1]`.
    pub fn gain_normalized(&self) -> f32 {
        normalize(self.gain)
    }

    /// Volume in `[0, 1]`.
    pub fn volume_normalized(&self) -> f32 {
        normalize(self.volume)
    }
}

fn normalize(v: u8) -> f32 {
    f32::from(v.min(MIDI_MAX)) / f32::from(MIDI_MAX)
}

/// A stored program: name plus the settings of both amplifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgramPreset {
    pub name: String,
    pub amps: [AmpState; 2],
}

/// Snapshot of the controller, as the panel draws it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlState {
    /// Index of the current program.
    pub program: usize,
    pub program_name: String,
    pub amps: [AmpState; 2],
}
