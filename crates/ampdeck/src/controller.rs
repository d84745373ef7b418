#![forbid(unsafe_code)]

//! In-memory amplifier controller.
//!
//! Holds a list of programs and steps through it on footswitch presses.
//! Nothing is sent to the amplifiers; this stands in for the MIDI side.

use ampdeck_backend::Controller;
use ampdeck_core::{
    AmpMode, AmpState, ControlState, FootswitchAction, FootswitchEvent, FxFlags, ProgramPreset,
};
use tracing::info;

#[derive(Debug, Clone)]
pub struct MemoryController {
    programs: Vec<ProgramPreset>,
    state: ControlState,
}

impl MemoryController {
    /// Controller over `programs`, starting at the first one. An empty list
    /// is replaced by [`demo_programs`].
    pub fn new(programs: Vec<ProgramPreset>) -> Self {
        let programs = if programs.is_empty() {
            demo_programs()
        } else {
            programs
        };
        let mut this = Self {
            programs,
            state: ControlState::default(),
        };
        this.select(0);
        this
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn programs(&self) -> &[ProgramPreset] {
        &self.programs
    }

    fn select(&mut self, index: usize) {
        let Some(preset) = self.programs.get(index) else {
            return;
        };
        self.state = ControlState {
            program: index,
            program_name: preset.name.clone(),
            amps: preset.amps.clone(),
        };
    }

    fn step(&mut self, forward: bool) {
        let n = self.programs.len();
        if n == 0 {
            return;
        }
        let current = self.state.program;
        let next = if forward {
            (current + 1) % n
        } else {
            (current + n - 1) % n
        };
        self.select(next);
        info!(program = next, name = %self.state.program_name, "program selected");
    }
}

impl Default for MemoryController {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Controller for MemoryController {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn handle_footswitch(&mut self, event: FootswitchEvent) {
        if !event.pressed {
            return;
        }
        match event.action {
            FootswitchAction::Previous => self.step(false),
            FootswitchAction::Next => self.step(true),
            FootswitchAction::Reset | FootswitchAction::None => {}
        }
    }
}

/// Two sample programs for running without a configured program list.
pub fn demo_programs() -> Vec<ProgramPreset> {
    vec![
        ProgramPreset {
            name: "Trippin on a Hole in a Paper Heart".to_owned(),
            amps: [
                AmpState::new("MG", AmpMode::Dirty, 96, 80, FxFlags::GATE | FxFlags::DELAY),
                AmpState::new("JD", AmpMode::Clean, 24, 90, FxFlags::CHORUS | FxFlags::REVERB),
            ],
        },
        ProgramPreset {
            name: "Unplugged".to_owned(),
            amps: [
                AmpState::new("MG", AmpMode::Acoustic, 10, 70, FxFlags::COMPRESSOR),
                AmpState::new("JD", AmpMode::Acoustic, 10, 70, FxFlags::REVERB),
            ],
        },
    ]
}
