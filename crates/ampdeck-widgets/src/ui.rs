#![forbid(unsafe_code)]

//! Per-frame widget context.
//!
//! A [`Ui`] borrows the canvas, the palette and the touch snapshot for the
//! duration of one draw pass. The touch registry is only read here; the
//! runtime mutates it between frames.

use std::f32::consts::PI;

use ampdeck_backend::{Canvas, LineCap, Winding};
use ampdeck_core::{Align, Point, Rgba, TouchRegistry, Window};

use crate::palette::{Palette, Style};

/// Start angle of the dial sweep.
pub const DIAL_ARC_START: f32 = PI * 0.75;
/// End angle of the dial sweep.
pub const DIAL_ARC_END: f32 = PI * 2.25;

/// Widget drawing context for one frame.
pub struct Ui<'a, C: Canvas> {
    canvas: &'a mut C,
    palette: &'a Palette,
    touches: &'a TouchRegistry,
    style: Style,
}

impl<'a, C: Canvas> Ui<'a, C> {
    pub fn new(canvas: &'a mut C, palette: &'a Palette, touches: &'a TouchRegistry) -> Self {
        Self {
            canvas,
            palette,
            touches,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn palette(&self) -> &Palette {
        self.palette
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Whether any active touch lies inside `window`.
    pub fn is_touched(&self, window: Window) -> bool {
        self.touches.touches_inside(&window)
    }

    /// Fill `window` with a plain rectangle.
    pub fn fill_window(&mut self, window: Window, color: Rgba) {
        self.canvas.begin_path();
        self.canvas.rect(window);
        self.canvas.fill_color(color);
        self.canvas.fill();
    }

    /// Draw text anchored inside `window` with the given alignment.
    pub fn text(&mut self, window: Window, align: Align, color: Rgba, text: &str) {
        self.canvas.fill_color(color);
        let at = window.aligned_point(align);
        self.canvas.text(at, self.style.text_size, align, text);
    }

    /// Touch button. Returns `true` on every frame a finger rests on it.
    ///
    /// There is no press/release edge: the result is recomputed from the
    /// current touches each frame.
    pub fn button(&mut self, window: Window) -> bool {
        let touched = self.is_touched(window);
        let (stroke, fill) = if touched {
            (self.palette[2], self.palette[1])
        } else {
            (self.palette[1], self.palette[2])
        };
        self.canvas.stroke_color(stroke);
        self.canvas.fill_color(fill);

        self.canvas.begin_path();
        self.canvas.rounded_rect(window, self.style.corner_radius);
        self.canvas.stroke();
        self.canvas.fill();

        touched
    }

    /// Outlined container.
    pub fn pane(&mut self, window: Window) {
        self.canvas.stroke_width(2.0);
        self.canvas.stroke_color(self.palette[1]);
        self.canvas.begin_path();
        self.canvas.rounded_rect(window, self.style.corner_radius);
        self.canvas.stroke();
    }

    /// Filled rounded rectangle with left/top aligned inset text.
    pub fn label(&mut self, window: Window, text: &str) {
        self.canvas.begin_path();
        self.canvas.rounded_rect(window, self.style.corner_radius);
        self.canvas.fill_color(self.palette[1]);
        self.canvas.fill();

        let inset = self.style.pad * 2.0;
        let text_window = window.inner(inset, 0.0, inset, 0.0);
        self.text(text_window, Align::LEFT_TOP, self.palette[5], text);
    }

    /// Rotary dial: a filled disc and a fixed 270 degree sweep.
    ///
    /// `value` is accepted for callers but does not yet change the sweep;
    /// the arc always spans [`DIAL_ARC_START`]..[`DIAL_ARC_END`].
    pub fn dial(&mut self, window: Window, label: &str, value: f32, value_text: &str) {
        let center = window.aligned_point(Align::CENTER_MIDDLE);
        let r = window.radius_min();
        tracing::trace!(label, value, "dial");

        self.canvas.save();

        self.canvas.begin_path();
        self.canvas.circle(center, (r - 4.0).max(0.0));
        self.canvas.fill_color(self.palette[1]);
        self.canvas.fill();

        self.canvas.begin_path();
        self.canvas
            .arc(center, (r - 2.0).max(0.0), DIAL_ARC_START, DIAL_ARC_END, Winding::Cw);
        self.canvas.stroke_width(4.0);
        self.canvas.miter_limit(1.0);
        self.canvas.line_cap(LineCap::Square);
        self.canvas.stroke_color(self.palette[3]);
        self.canvas.stroke();

        self.canvas.fill_color(self.palette[5]);
        let size = self.style.text_size * 0.5;
        self.canvas
            .text(center, self.style.text_size, Align::CENTER_MIDDLE, value_text);
        let caption = Point::new(center.x, window.bottom());
        self.canvas
            .text(caption, size, Align::CENTER | Align::BOTTOM, label);

        self.canvas.restore();
    }
}
