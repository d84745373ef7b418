#![forbid(unsafe_code)]
#![doc = "Backend traits for ampdeck: platform abstraction for drawing, input and"]
#![doc = "amplifier control."]
#![doc = ""]
#![doc = "This crate defines the boundary between the panel runtime and the collaborators it"]
#![doc = "drives: a vector [`Canvas`] plus [`Presenter`] for output, [`InputDevice`]s and a"]
#![doc = "[`DeviceEnumerator`] for input (`ampdeck-evdev` on Linux), and the amplifier"]
#![doc = "[`Controller`]. [`DisplayList`] is a recording canvas for headless runs and tests."]

mod display_list;

use std::fmt;
use std::path::PathBuf;

use ampdeck_core::control::ControlState;
use ampdeck_core::event::InputBatch;
use ampdeck_core::footswitch::FootswitchEvent;
use ampdeck_core::{Align, Point, Rgba, Window};
use bitflags::bitflags;

pub use display_list::{DisplayList, DrawOp, Shape};

/// Arc winding direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Winding {
    /// Counter-clockwise.
    Ccw,
    /// Clockwise.
    #[default]
    Cw,
}

/// Stroke end-cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Immediate-mode vector drawing surface.
///
/// Mirrors a NanoVG-style path API: shapes are appended to the current path
/// and painted with [`fill`](Canvas::fill) / [`stroke`](Canvas::stroke) using
/// the current paint state. Shapes accumulate until
/// [`begin_path`](Canvas::begin_path) discards them.
pub trait Canvas {
    /// Begin a frame of the given logical size.
    fn begin_frame(&mut self, width: f32, height: f32);

    /// Flush all drawing for the frame.
    fn end_frame(&mut self);

    /// Push the paint state (colors, stroke width, caps).
    fn save(&mut self);

    /// Pop the paint state pushed by the matching [`save`](Canvas::save).
    fn restore(&mut self);

    /// Discard the current path.
    fn begin_path(&mut self);

    fn rect(&mut self, window: Window);
    fn rounded_rect(&mut self, window: Window, radius: f32);
    fn circle(&mut self, center: Point, radius: f32);

    /// Arc from angle `a0` to `a1` (radians, 0 = +x axis, y down).
    fn arc(&mut self, center: Point, radius: f32, a0: f32, a1: f32, dir: Winding);

    fn fill_color(&mut self, color: Rgba);
    fn stroke_color(&mut self, color: Rgba);
    fn stroke_width(&mut self, width: f32);
    fn miter_limit(&mut self, limit: f32);
    fn line_cap(&mut self, cap: LineCap);

    /// Paint the current path's interior.
    fn fill(&mut self);

    /// Paint the current path's outline.
    fn stroke(&mut self);

    /// Draw text anchored at `at` using the current fill color.
    fn text(&mut self, at: Point, size: f32, align: Align, text: &str);
}

/// Hands a finished frame to the display.
pub trait Presenter {
    /// Platform-specific error type.
    type Error: fmt::Debug + fmt::Display;

    /// Present the frame drawn since the last `begin_frame`.
    fn present(&mut self) -> Result<(), Self::Error>;
}

bitflags! {
    /// Event classes a device reports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceCaps: u8 {
        /// `EV_KEY`: keys or buttons.
        const KEY = 1 << 0;
        /// `EV_ABS`: absolute axes (touch panels).
        const ABS = 1 << 1;
    }
}

/// An input device as listed by a [`DeviceEnumerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Device node, e.g. `/dev/input/event3`.
    pub path: PathBuf,
    /// Human-readable device name reported by the driver.
    pub name: String,
    pub caps: DeviceCaps,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\" {:?}", self.path.display(), self.name, self.caps)
    }
}

/// A source of raw input event batches.
///
/// Implementations are moved onto a dedicated reader thread. The device is
/// closed when dropped.
pub trait InputDevice: Send + 'static {
    /// Platform-specific error type.
    type Error: fmt::Debug + fmt::Display + Send;

    fn name(&self) -> &str;

    /// Block until the device produces events and return them in order.
    ///
    /// An error means the stream is unusable; callers stop reading.
    fn read_batch(&mut self) -> Result<InputBatch, Self::Error>;
}

/// Lists and opens input devices.
pub trait DeviceEnumerator {
    type Device: InputDevice;
    type Error: fmt::Debug + fmt::Display;

    fn list_devices(&self) -> Result<Vec<DeviceInfo>, Self::Error>;

    fn open(&self, info: &DeviceInfo) -> Result<Self::Device, Self::Error>;

    /// First device whose name contains `needle`.
    fn find_by_name(&self, needle: &str) -> Result<Option<DeviceInfo>, Self::Error> {
        Ok(self
            .list_devices()?
            .into_iter()
            .find(|d| d.name.contains(needle)))
    }

    /// First device reporting absolute axes.
    fn find_abs_device(&self) -> Result<Option<DeviceInfo>, Self::Error> {
        Ok(self
            .list_devices()?
            .into_iter()
            .find(|d| d.caps.contains(DeviceCaps::ABS)))
    }
}

/// The amplifier controller the panel visualizes and drives.
pub trait Controller {
    /// Current state, read once per frame.
    fn state(&self) -> &ControlState;

    /// Forward a footswitch press or release.
    fn handle_footswitch(&mut self, event: FootswitchEvent);
}
