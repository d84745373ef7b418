#![forbid(unsafe_code)]

//! Recording canvas.
//!
//! [`DisplayList`] implements [`Canvas`] and [`Presenter`] by recording the
//! painted paths of the current frame instead of rasterizing them. Paint
//! state is resolved at paint time, so every [`DrawOp::Fill`] and
//! [`DrawOp::Stroke`] carries the exact color it would be drawn with. A GPU
//! backend can replay the list; tests inspect it directly.

use std::convert::Infallible;

use ampdeck_core::{Align, Point, Rgba, Window};

use crate::{Canvas, LineCap, Presenter, Winding};

/// A path element.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect(Window),
    RoundedRect { window: Window, radius: f32 },
    Circle { center: Point, radius: f32 },
    Arc {
        center: Point,
        radius: f32,
        a0: f32,
        a1: f32,
        dir: Winding,
    },
}

/// A painted operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        path: Vec<Shape>,
        color: Rgba,
    },
    Stroke {
        path: Vec<Shape>,
        color: Rgba,
        width: f32,
        cap: LineCap,
    },
    Text {
        at: Point,
        size: f32,
        align: Align,
        text: String,
        color: Rgba,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PaintState {
    fill: Rgba,
    stroke: Rgba,
    width: f32,
    miter: f32,
    cap: LineCap,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            fill: Rgba::WHITE,
            stroke: Rgba::BLACK,
            width: 1.0,
            miter: 10.0,
            cap: LineCap::Butt,
        }
    }
}

/// Canvas that records the ops of the current frame.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
    path: Vec<Shape>,
    paint: PaintState,
    stack: Vec<PaintState>,
    size: (f32, f32),
    frames_begun: u64,
    frames_presented: u64,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops painted since the last `begin_frame`.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Logical size passed to the last `begin_frame`.
    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    pub fn frames_begun(&self) -> u64 {
        self.frames_begun
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Depth of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Fill color of the last fill whose path contains a rounded rect at `window`.
    pub fn fill_of(&self, window: Window) -> Option<Rgba> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Fill { path, color } if path_has_window(path, window) => Some(*color),
            _ => None,
        })
    }

    /// Stroke color of the last stroke whose path contains a rounded rect at `window`.
    pub fn stroke_of(&self, window: Window) -> Option<Rgba> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Stroke { path, color, .. } if path_has_window(path, window) => Some(*color),
            _ => None,
        })
    }

    /// All text drawn this frame, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    fn push_shape(&mut self, shape: Shape) {
        self.path.push(shape);
    }
}

fn path_has_window(path: &[Shape], window: Window) -> bool {
    path.iter().any(|s| match s {
        Shape::Rect(w) | Shape::RoundedRect { window: w, .. } => *w == window,
        _ => false,
    })
}

impl Canvas for DisplayList {
    fn begin_frame(&mut self, width: f32, height: f32) {
        self.ops.clear();
        self.path.clear();
        self.stack.clear();
        self.paint = PaintState::default();
        self.size = (width, height);
        self.frames_begun += 1;
    }

    fn end_frame(&mut self) {
        self.path.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.paint);
    }

    fn restore(&mut self) {
        if let Some(paint) = self.stack.pop() {
            self.paint = paint;
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn rect(&mut self, window: Window) {
        self.push_shape(Shape::Rect(window));
    }

    fn rounded_rect(&mut self, window: Window, radius: f32) {
        self.push_shape(Shape::RoundedRect { window, radius });
    }

    fn circle(&mut self, center: Point, radius: f32) {
        self.push_shape(Shape::Circle { center, radius });
    }

    fn arc(&mut self, center: Point, radius: f32, a0: f32, a1: f32, dir: Winding) {
        self.push_shape(Shape::Arc {
            center,
            radius,
            a0,
            a1,
            dir,
        });
    }

    fn fill_color(&mut self, color: Rgba) {
        self.paint.fill = color;
    }

    fn stroke_color(&mut self, color: Rgba) {
        self.paint.stroke = color;
    }

    fn stroke_width(&mut self, width: f32) {
        self.paint.width = width;
    }

    fn miter_limit(&mut self, limit: f32) {
        self.paint.miter = limit;
    }

    fn line_cap(&mut self, cap: LineCap) {
        self.paint.cap = cap;
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill {
            path: self.path.clone(),
            color: self.paint.fill,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke {
            path: self.path.clone(),
            color: self.paint.stroke,
            width: self.paint.width,
            cap: self.paint.cap,
        });
    }

    fn text(&mut self, at: Point, size: f32, align: Align, text: &str) {
        self.ops.push(DrawOp::Text {
            at,
            size,
            align,
            text: text.to_owned(),
            color: self.paint.fill,
        });
    }
}

impl Presenter for DisplayList {
    type Error = Infallible;

    fn present(&mut self) -> Result<(), Self::Error> {
        self.frames_presented += 1;
        Ok(())
    }
}
