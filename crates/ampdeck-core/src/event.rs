#![forbid(unsafe_code)]

//! Raw input events as delivered by the input devices.
//!
//! Events mirror the kernel's `input_event` record (`type`, `code`, `value`)
//! without the timestamp. Devices deliver them in batches; a batch is the
//! unit the runtime hands from a reader thread to the render thread.
//!
//! Two typed views sit on top of the raw record:
//!
//! - [`KeyReport`] for `EV_KEY` events (footswitch scancodes).
//! - [`AbsReport`] for the multi-touch `EV_ABS` axes the touch registry
//!   understands. Every other absolute axis has no typed view.

/// Event type and code constants from `linux/input-event-codes.h`.
pub mod codes {
    pub const EV_SYN: u16 = 0x00;
    pub const EV_KEY: u16 = 0x01;
    pub const EV_ABS: u16 = 0x03;

    pub const SYN_REPORT: u16 = 0x00;

    pub const ABS_X: u16 = 0x00;
    pub const ABS_Y: u16 = 0x01;
    pub const ABS_MT_SLOT: u16 = 0x2f;
    pub const ABS_MT_POSITION_X: u16 = 0x35;
    pub const ABS_MT_POSITION_Y: u16 = 0x36;
    pub const ABS_MT_TRACKING_ID: u16 = 0x39;

    pub const KEY_A: u16 = 30;
    pub const KEY_B: u16 = 48;
    pub const KEY_C: u16 = 46;
}

use codes::{
    ABS_MT_POSITION_X, ABS_MT_POSITION_Y, ABS_MT_SLOT, ABS_MT_TRACKING_ID, EV_ABS, EV_KEY, EV_SYN,
    SYN_REPORT,
};

/// One raw event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    /// Event type (`EV_KEY`, `EV_ABS`, ...).
    pub kind: u16,
    /// Type-specific code (scancode or axis).
    pub code: u16,
    pub value: i32,
}

/// Events returned by one device read.
pub type InputBatch = Vec<InputEvent>;

impl InputEvent {
    #[inline]
    pub const fn new(kind: u16, code: u16, value: i32) -> Self {
        Self { kind, code, value }
    }

    /// Key event with the given scancode and state.
    #[inline]
    pub const fn key(code: u16, state: KeyState) -> Self {
        Self::new(EV_KEY, code, state.value())
    }

    /// Absolute-axis event.
    #[inline]
    pub const fn abs(code: u16, value: i32) -> Self {
        Self::new(EV_ABS, code, value)
    }

    /// End-of-packet marker.
    #[inline]
    pub const fn syn_report() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    /// Typed view of an `EV_KEY` event.
    ///
    /// Returns `None` for other event types and for values that are not a
    /// known key state.
    pub fn as_key(&self) -> Option<KeyReport> {
        if self.kind != EV_KEY {
            return None;
        }
        KeyState::from_value(self.value).map(|state| KeyReport {
            code: self.code,
            state,
        })
    }

    /// Typed view of a multi-touch `EV_ABS` event.
    pub fn as_abs(&self) -> Option<AbsReport> {
        if self.kind != EV_ABS {
            return None;
        }
        AbsAxis::from_code(self.code).map(|axis| AbsReport {
            axis,
            value: self.value,
        })
    }
}

/// Key state carried in an `EV_KEY` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Up,
    Down,
    /// Autorepeat while held.
    Hold,
}

impl KeyState {
    pub const fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Up),
            1 => Some(Self::Down),
            2 => Some(Self::Hold),
            _ => None,
        }
    }

    pub const fn value(self) -> i32 {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Hold => 2,
        }
    }
}

/// A key/button report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyReport {
    pub code: u16,
    pub state: KeyState,
}

/// Multi-touch axes consumed by the touch registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbsAxis {
    Slot,
    PositionX,
    PositionY,
    TrackingId,
}

impl AbsAxis {
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            ABS_MT_SLOT => Some(Self::Slot),
            ABS_MT_POSITION_X => Some(Self::PositionX),
            ABS_MT_POSITION_Y => Some(Self::PositionY),
            ABS_MT_TRACKING_ID => Some(Self::TrackingId),
            _ => None,
        }
    }

    pub const fn code(self) -> u16 {
        match self {
            Self::Slot => ABS_MT_SLOT,
            Self::PositionX => ABS_MT_POSITION_X,
            Self::PositionY => ABS_MT_POSITION_Y,
            Self::TrackingId => ABS_MT_TRACKING_ID,
        }
    }
}

/// An absolute-axis report for the currently selected touch slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbsReport {
    pub axis: AbsAxis,
    pub value: i32,
}

impl AbsReport {
    pub const fn slot(n: i32) -> Self {
        Self {
            axis: AbsAxis::Slot,
            value: n,
        }
    }

    pub const fn x(v: i32) -> Self {
        Self {
            axis: AbsAxis::PositionX,
            value: v,
        }
    }

    pub const fn y(v: i32) -> Self {
        Self {
            axis: AbsAxis::PositionY,
            value: v,
        }
    }

    pub const fn tracking_id(id: i32) -> Self {
        Self {
            axis: AbsAxis::TrackingId,
            value: id,
        }
    }
}

impl From<AbsReport> for InputEvent {
    fn from(report: AbsReport) -> Self {
        InputEvent::abs(report.axis.code(), report.value)
    }
}

impl From<KeyReport> for InputEvent {
    fn from(report: KeyReport) -> Self {
        InputEvent::key(report.code, report.state)
    }
}
