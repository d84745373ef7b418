#![forbid(unsafe_code)]

//! Multi-touch slot tracking.
//!
//! The touch panel speaks the kernel's type-B multi-touch protocol: a
//! `SLOT` report selects which finger the following `POSITION_X`,
//! `POSITION_Y` and `TRACKING_ID` reports describe. [`TouchRegistry`] folds
//! that stream into [`MAX_SLOTS`] persistent [`TouchPoint`]s indexed by slot.
//!
//! # Invariants
//!
//! 1. The current slot is always in `0..MAX_SLOTS`. An out-of-range `SLOT`
//!    report is rejected and the previous selection is kept.
//! 2. A slot is active iff its tracking id is positive. Writing a
//!    non-positive id releases it; releasing twice is a no-op.
//! 3. Coordinate and id writes only touch the currently selected slot.
//!
//! The registry is owned by the render thread and mutated between frames,
//! one whole batch at a time, so widgets always see a consistent snapshot.

use thiserror::Error;
use tracing::warn;

use crate::event::{AbsAxis, AbsReport, InputEvent};
use crate::geometry::{Point, Window};

/// Number of hardware touch slots tracked.
pub const MAX_SLOTS: usize = 10;

/// One finger's last reported state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    /// Hardware tracking id; `<= 0` means no finger in this slot.
    pub id: i32,
}

impl TouchPoint {
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.id > 0
    }

    #[inline]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A report the registry refused to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TouchError {
    #[error("touch slot {slot} out of range 0..{MAX_SLOTS}")]
    SlotOutOfRange { slot: i32 },
}

/// Fixed array of touch slots plus the currently selected slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TouchRegistry {
    slots: [TouchPoint; MAX_SLOTS],
    current: usize,
}

impl TouchRegistry {
    /// All slots inactive, slot 0 selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one multi-touch report.
    pub fn apply(&mut self, report: AbsReport) -> Result<(), TouchError> {
        match report.axis {
            AbsAxis::Slot => {
                let slot = usize::try_from(report.value)
                    .ok()
                    .filter(|&s| s < MAX_SLOTS)
                    .ok_or(TouchError::SlotOutOfRange { slot: report.value })?;
                self.current = slot;
            }
            AbsAxis::PositionX => self.slots[self.current].x = report.value as f32,
            AbsAxis::PositionY => self.slots[self.current].y = report.value as f32,
            AbsAxis::TrackingId => self.slots[self.current].id = report.value,
        }
        Ok(())
    }

    /// Apply every multi-touch report in a batch, in order.
    ///
    /// Non-`EV_ABS` events and other axes are skipped. Rejected reports are
    /// logged and skipped. Returns the number rejected.
    pub fn apply_batch(&mut self, batch: &[InputEvent]) -> usize {
        let mut rejected = 0;
        for report in batch.iter().filter_map(InputEvent::as_abs) {
            if let Err(err) = self.apply(report) {
                warn!(%err, current_slot = self.current, "ignoring malformed touch report");
                rejected += 1;
            }
        }
        rejected
    }

    /// Index the next coordinate/id report will write to.
    #[inline]
    pub fn current_slot(&self) -> usize {
        self.current
    }

    pub fn slot(&self, index: usize) -> Option<&TouchPoint> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[TouchPoint; MAX_SLOTS] {
        &self.slots
    }

    /// Slots with a finger down.
    pub fn active(&self) -> impl Iterator<Item = &TouchPoint> + '_ {
        self.slots.iter().filter(|t| t.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Whether any active touch falls inside `window`.
    pub fn touches_inside(&self, window: &Window) -> bool {
        self.active().any(|t| window.is_point_inside(t.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(reg: &mut TouchRegistry, reports: &[AbsReport]) {
        for r in reports {
            reg.apply(*r).unwrap();
        }
    }

    #[test]
    fn starts_inactive_on_slot_zero() {
        let reg = TouchRegistry::new();
        assert_eq!(reg.current_slot(), 0);
        assert_eq!(reg.active_count(), 0);
        assert!(reg.slots().iter().all(|t| t.id == 0));
    }

    #[test]
    fn writes_target_current_slot() {
        let mut reg = TouchRegistry::new();
        apply_all(
            &mut reg,
            &[
                AbsReport::slot(4),
                AbsReport::tracking_id(17),
                AbsReport::x(120),
                AbsReport::y(80),
            ],
        );
        let t = reg.slot(4).unwrap();
        assert_eq!((t.x, t.y, t.id), (120.0, 80.0, 17));
        assert!(t.is_active());
        assert_eq!(reg.active_count(), 1);
    }

    #[test]
    fn slots_are_isolated() {
        let mut reg = TouchRegistry::new();
        apply_all(
            &mut reg,
            &[
                AbsReport::slot(1),
                AbsReport::x(5),
                AbsReport::slot(2),
                AbsReport::x(9),
            ],
        );
        assert_eq!(reg.slot(1).unwrap().x, 5.0);
        assert_eq!(reg.slot(2).unwrap().x, 9.0);
    }

    #[test]
    fn releasing_twice_is_a_no_op() {
        let mut reg = TouchRegistry::new();
        apply_all(&mut reg, &[AbsReport::slot(3), AbsReport::tracking_id(0)]);
        let after_first = reg.clone();
        assert!(!reg.slot(3).unwrap().is_active());
        apply_all(&mut reg, &[AbsReport::slot(3), AbsReport::tracking_id(0)]);
        assert!(!reg.slot(3).unwrap().is_active());
        assert_eq!(reg, after_first);
    }

    #[test]
    fn negative_tracking_id_releases() {
        let mut reg = TouchRegistry::new();
        apply_all(&mut reg, &[AbsReport::tracking_id(5)]);
        assert_eq!(reg.active_count(), 1);
        apply_all(&mut reg, &[AbsReport::tracking_id(-1)]);
        assert_eq!(reg.active_count(), 0);
    }

    #[test]
    fn out_of_range_slot_keeps_previous_selection() {
        let mut reg = TouchRegistry::new();
        reg.apply(AbsReport::slot(6)).unwrap();
        assert_eq!(
            reg.apply(AbsReport::slot(10)),
            Err(TouchError::SlotOutOfRange { slot: 10 })
        );
        assert_eq!(
            reg.apply(AbsReport::slot(-1)),
            Err(TouchError::SlotOutOfRange { slot: -1 })
        );
        assert_eq!(reg.current_slot(), 6);
    }

    #[test]
    fn batch_skips_foreign_events_and_counts_rejections() {
        use crate::event::codes::{ABS_X, KEY_A};
        use crate::event::KeyState;

        let mut reg = TouchRegistry::new();
        let batch = vec![
            InputEvent::key(KEY_A, KeyState::Down),
            InputEvent::abs(ABS_X, 999),
            AbsReport::slot(42).into(),
            AbsReport::tracking_id(3).into(),
            AbsReport::x(10).into(),
            InputEvent::syn_report(),
        ];
        assert_eq!(reg.apply_batch(&batch), 1);
        let t = reg.slot(0).unwrap();
        assert_eq!((t.x, t.id), (10.0, 3));
    }

    #[test]
    fn touches_inside_ignores_released_slots() {
        let mut reg = TouchRegistry::new();
        let w = Window::new(0.0, 0.0, 50.0, 50.0);
        apply_all(
            &mut reg,
            &[AbsReport::x(25), AbsReport::y(25), AbsReport::tracking_id(0)],
        );
        assert!(!reg.touches_inside(&w));
        reg.apply(AbsReport::tracking_id(1)).unwrap();
        assert!(reg.touches_inside(&w));
    }
}
