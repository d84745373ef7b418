//! End-to-end runs of the panel loop over scripted sources and a recording
//! canvas.

use std::io::Write as _;

use ampdeck_backend::{Canvas, Controller, DisplayList};
use ampdeck_core::event::codes;
use ampdeck_core::{
    AbsReport, ControlState, FootswitchAction, FootswitchEvent, InputBatch, InputEvent, KeyState,
    Window,
};
use ampdeck_runtime::{
    Error, FanIn, InputSource, LoopState, Panel, PanelConfig, Program, SourceKind,
};
use ampdeck_widgets::Ui;
use crossbeam_channel::{Sender, unbounded};
use proptest::prelude::*;

#[derive(Default)]
struct RecordingController {
    state: ControlState,
    events: Vec<FootswitchEvent>,
}

impl Controller for RecordingController {
    fn state(&self) -> &ControlState {
        &self.state
    }

    fn handle_footswitch(&mut self, event: FootswitchEvent) {
        self.events.push(event);
    }
}

/// One button in the top-left corner; records its touched state per frame.
#[derive(Default)]
struct ButtonPanel {
    touched: Vec<bool>,
}

const BUTTON: Window = Window {
    x: 0.0,
    y: 0.0,
    w: 50.0,
    h: 50.0,
};

impl Panel for ButtonPanel {
    fn view<C: Canvas>(&mut self, ui: &mut Ui<'_, C>, _state: &ControlState) {
        self.touched.push(ui.button(BUTTON));
    }
}

struct Script {
    touch: Sender<InputBatch>,
    footswitch: Sender<InputBatch>,
}

fn program() -> (
    Program<DisplayList, RecordingController, ButtonPanel>,
    Script,
) {
    let (touch_tx, touch_rx) = unbounded();
    let (fsw_tx, fsw_rx) = unbounded();
    let fan_in = FanIn::new(
        InputSource::from_receiver(SourceKind::Touch, touch_rx),
        InputSource::from_receiver(SourceKind::Footswitch, fsw_rx),
    );
    let program = Program::new(
        DisplayList::new(),
        RecordingController::default(),
        ButtonPanel::default(),
        fan_in,
        &PanelConfig::default(),
    );
    (
        program,
        Script {
            touch: touch_tx,
            footswitch: fsw_tx,
        },
    )
}

fn key(code: u16, state: KeyState) -> InputBatch {
    vec![InputEvent::key(code, state), InputEvent::syn_report()]
}

fn finger_down(x: i32, y: i32) -> InputBatch {
    [
        AbsReport::slot(0),
        AbsReport::tracking_id(12),
        AbsReport::x(x),
        AbsReport::y(y),
    ]
    .into_iter()
    .map(InputEvent::from)
    .chain([InputEvent::syn_report()])
    .collect()
}

#[test]
fn reset_press_terminates_without_another_frame() {
    let (mut program, script) = program();
    script
        .footswitch
        .send(key(codes::KEY_A, KeyState::Down))
        .unwrap();
    // Queued behind the reset on the same source; must never be handled.
    script
        .footswitch
        .send(key(codes::KEY_C, KeyState::Down))
        .unwrap();

    program.run().unwrap();

    assert_eq!(program.state(), LoopState::Terminated);
    assert_eq!(program.frames(), 1);
    assert_eq!(program.display().frames_presented(), 1);
    assert!(program.controller().events.is_empty());
}

#[test]
fn reset_in_mid_batch_drops_the_rest() {
    let (mut program, script) = program();
    script
        .footswitch
        .send(vec![
            InputEvent::key(codes::KEY_A, KeyState::Down),
            InputEvent::key(codes::KEY_B, KeyState::Down),
            InputEvent::syn_report(),
        ])
        .unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Terminated);
    assert!(program.controller().events.is_empty());
}

#[test]
fn reset_release_alone_does_not_terminate() {
    let (mut program, script) = program();
    script.footswitch.send(key(codes::KEY_A, KeyState::Up)).unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Running);
    script
        .footswitch
        .send(key(codes::KEY_A, KeyState::Hold))
        .unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Running);
    script
        .footswitch
        .send(key(codes::KEY_A, KeyState::Down))
        .unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Terminated);
    assert_eq!(program.frames(), 3);
}

#[test]
fn touch_batch_is_visible_on_the_next_frame() {
    let (mut program, script) = program();
    script.touch.send(finger_down(25, 25)).unwrap();
    script
        .touch
        .send(vec![
            InputEvent::from(AbsReport::x(100)),
            InputEvent::from(AbsReport::y(100)),
            InputEvent::syn_report(),
        ])
        .unwrap();

    program.step().unwrap();
    program.step().unwrap();
    program.render_frame().unwrap();

    assert_eq!(program.panel().touched, vec![false, true, false]);
    assert_eq!(program.touches().active_count(), 1);
}

#[test]
fn malformed_slot_report_is_ignored() {
    let (mut program, script) = program();
    script.touch.send(finger_down(25, 25)).unwrap();
    script
        .touch
        .send(vec![
            InputEvent::from(AbsReport::slot(12)),
            InputEvent::from(AbsReport::x(400)),
            InputEvent::syn_report(),
        ])
        .unwrap();
    program.step().unwrap();
    program.step().unwrap();
    assert_eq!(program.touches().current_slot(), 0);
    assert_eq!(program.touches().slot(0).unwrap().x, 400.0);
}

#[test]
fn navigation_switches_reach_the_controller() {
    let (mut program, script) = program();
    for batch in [
        key(codes::KEY_B, KeyState::Down),
        key(codes::KEY_B, KeyState::Hold),
        key(codes::KEY_B, KeyState::Up),
        key(codes::KEY_C, KeyState::Down),
        key(99, KeyState::Down),
    ] {
        script.footswitch.send(batch).unwrap();
    }
    for _ in 0..5 {
        program.step().unwrap();
    }
    assert_eq!(
        program.controller().events,
        vec![
            FootswitchEvent::press(FootswitchAction::Previous),
            FootswitchEvent::release(FootswitchAction::Previous),
            FootswitchEvent::press(FootswitchAction::Next),
        ]
    );
    assert!(program.footswitch().is_held(FootswitchAction::Next));
    assert!(!program.footswitch().is_held(FootswitchAction::Previous));
}

#[test]
fn loop_keeps_serving_remaining_source_after_one_closes() {
    let (mut program, script) = program();
    drop(script.touch);
    script.footswitch.send(key(codes::KEY_C, KeyState::Down)).unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Running);
    assert_eq!(program.controller().events.len(), 1);
    script.footswitch.send(key(codes::KEY_A, KeyState::Down)).unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Terminated);
}

#[test]
fn all_sources_closed_is_an_error() {
    let (mut program, script) = program();
    drop(script);
    assert!(matches!(program.run(), Err(Error::InputsClosed)));
    assert_eq!(program.frames(), 1);
}

#[test]
fn frame_limit_stops_without_input() {
    let (program, _script) = program();
    let mut program = program.with_frame_limit(1);
    program.run().unwrap();
    assert_eq!(program.frames(), 1);
}

#[test]
fn config_file_drives_keymap() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[keymap]\nreset = 16\nprevious = 17\nnext = 18").unwrap();
    let config = PanelConfig::from_toml_file(file.path()).unwrap();

    let (touch_tx, touch_rx) = unbounded::<InputBatch>();
    let (fsw_tx, fsw_rx) = unbounded();
    let mut program = Program::new(
        DisplayList::new(),
        RecordingController::default(),
        ButtonPanel::default(),
        FanIn::new(
            InputSource::from_receiver(SourceKind::Touch, touch_rx),
            InputSource::from_receiver(SourceKind::Footswitch, fsw_rx),
        ),
        &config,
    );
    fsw_tx.send(key(codes::KEY_A, KeyState::Down)).unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Running);
    fsw_tx.send(key(16, KeyState::Down)).unwrap();
    assert_eq!(program.step().unwrap(), LoopState::Terminated);
    drop(touch_tx);
}

#[test]
fn missing_config_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = PanelConfig::from_toml_file(&missing).unwrap_err();
    match err {
        Error::ReadConfig { path, source } => {
            assert_eq!(path, missing);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn step_after_reset_draws_nothing() {
    let (mut program, script) = program();
    script
        .footswitch
        .send(key(codes::KEY_A, KeyState::Down))
        .unwrap();
    script
        .footswitch
        .send(key(codes::KEY_C, KeyState::Down))
        .unwrap();
    program.run().unwrap();

    assert_eq!(program.step().unwrap(), LoopState::Terminated);
    assert_eq!(program.frames(), 1);
    assert_eq!(program.display().frames_presented(), 1);
    assert!(program.controller().events.is_empty());
}

fn key_event() -> impl Strategy<Value = (u16, KeyState)> {
    (
        prop::sample::select(vec![codes::KEY_A, codes::KEY_B, codes::KEY_C, 16]),
        prop::sample::select(vec![KeyState::Up, KeyState::Down, KeyState::Hold]),
    )
}

/// Walk the batches the way the loop should: returns the events forwarded to
/// the controller and, if a reset press occurs, the index of its batch.
fn expected_dispatch(
    batches: &[Vec<(u16, KeyState)>],
) -> (Vec<FootswitchEvent>, Option<usize>) {
    let mut forwarded = Vec::new();
    for (i, batch) in batches.iter().enumerate() {
        for &(code, state) in batch {
            if state == KeyState::Hold {
                continue;
            }
            let pressed = state == KeyState::Down;
            let action = match code {
                codes::KEY_A if pressed => return (forwarded, Some(i)),
                codes::KEY_B => FootswitchAction::Previous,
                codes::KEY_C => FootswitchAction::Next,
                _ => continue,
            };
            forwarded.push(FootswitchEvent { action, pressed });
        }
    }
    (forwarded, None)
}

proptest! {
    #[test]
    fn loop_stops_at_first_reset_press(
        batches in prop::collection::vec(prop::collection::vec(key_event(), 1..4), 0..12),
    ) {
        let (mut program, script) = program();
        for batch in &batches {
            let events: InputBatch = batch
                .iter()
                .map(|&(code, state)| InputEvent::key(code, state))
                .chain([InputEvent::syn_report()])
                .collect();
            script.footswitch.send(events).unwrap();
        }
        drop(script);

        let (forwarded, reset_at) = expected_dispatch(&batches);
        let result = program.run();
        match reset_at {
            Some(i) => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(program.state(), LoopState::Terminated);
                prop_assert_eq!(program.frames(), i as u64 + 1);
            }
            None => {
                prop_assert!(matches!(result, Err(Error::InputsClosed)));
                prop_assert_eq!(program.frames(), batches.len() as u64 + 1);
            }
        }
        prop_assert_eq!(&program.controller().events, &forwarded);
    }
}
