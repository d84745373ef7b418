#![forbid(unsafe_code)]

//! Footswitch scancode mapping.
//!
//! The footswitch enumerates as a keyboard that sends three scancodes. A
//! [`Keymap`] turns key reports into [`FootswitchEvent`]s; autorepeat
//! (`Hold`) reports never produce a press or release. The driver cannot
//! report two switches held at once, so events arrive strictly one switch
//! at a time.

use tracing::trace;

use crate::event::{InputEvent, KeyReport, KeyState, codes};

/// Discrete action bound to a physical switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FootswitchAction {
    /// Unmapped scancode or a suppressed report.
    #[default]
    None,
    Reset,
    Previous,
    Next,
}

impl FootswitchAction {
    const fn switch_index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Reset => Some(0),
            Self::Previous => Some(1),
            Self::Next => Some(2),
        }
    }
}

/// A press (`pressed = true`) or release of one switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FootswitchEvent {
    pub action: FootswitchAction,
    pub pressed: bool,
}

impl FootswitchEvent {
    pub const fn press(action: FootswitchAction) -> Self {
        Self {
            action,
            pressed: true,
        }
    }

    pub const fn release(action: FootswitchAction) -> Self {
        Self {
            action,
            pressed: false,
        }
    }
}

/// Scancode table for the three switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Keymap {
    pub reset: u16,
    pub previous: u16,
    pub next: u16,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            reset: codes::KEY_A,
            previous: codes::KEY_B,
            next: codes::KEY_C,
        }
    }
}

impl Keymap {
    /// Action bound to a scancode.
    pub fn action(&self, code: u16) -> FootswitchAction {
        if code == self.reset {
            FootswitchAction::Reset
        } else if code == self.previous {
            FootswitchAction::Previous
        } else if code == self.next {
            FootswitchAction::Next
        } else {
            FootswitchAction::None
        }
    }

    /// Translate a key report.
    ///
    /// `Hold` reports yield [`FootswitchAction::None`] with `pressed = false`.
    pub fn translate(&self, report: KeyReport) -> FootswitchEvent {
        match report.state {
            KeyState::Hold => FootswitchEvent::default(),
            KeyState::Down => FootswitchEvent::press(self.action(report.code)),
            KeyState::Up => FootswitchEvent::release(self.action(report.code)),
        }
    }

    /// Decode one raw event. Non-key events and autorepeat are dropped.
    pub fn decode(&self, event: &InputEvent) -> Option<FootswitchEvent> {
        let report = event.as_key()?;
        if report.state == KeyState::Hold {
            return None;
        }
        let decoded = self.translate(report);
        if decoded.action == FootswitchAction::None {
            trace!(scancode = report.code, "unmapped footswitch scancode");
        }
        Some(decoded)
    }

    /// Decode a whole batch in arrival order.
    pub fn decode_batch(&self, batch: &[InputEvent]) -> Vec<FootswitchEvent> {
        batch.iter().filter_map(|ev| self.decode(ev)).collect()
    }
}

/// Which switches are currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FootswitchState {
    held: [bool; 3],
}

impl FootswitchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release. Returns `true` if the held set changed.
    pub fn apply(&mut self, event: FootswitchEvent) -> bool {
        let Some(i) = event.action.switch_index() else {
            return false;
        };
        let changed = self.held[i] != event.pressed;
        self.held[i] = event.pressed;
        changed
    }

    pub fn is_held(&self, action: FootswitchAction) -> bool {
        action.switch_index().is_some_and(|i| self.held[i])
    }
}
