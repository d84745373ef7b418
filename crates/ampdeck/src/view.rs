#![forbid(unsafe_code)]

//! The kiosk screen.
//!
//! ```text
//! +--------------------------------------------+-------+
//! | program name                               | reset |  header
//! +--------------------------------------------+-------+
//! | MG  dirty                                          |
//! |      ( gain )              ( volume )              |  amp 0
//! | [gate] [comp] [chorus] [delay] [reverb]            |
//! +----------------------------------------------------+
//! | JD  clean                                          |  amp 1
//! | ...                                                |
//! +----------------------------------------------------+
//! ```
//!
//! Every region is cut from the screen with `split_h`/`split_v`, so the
//! layout follows the configured display size.
//!
//! Buttons only report touches through [`AmpPanel::touched`]. The header
//! `reset` region and the fx buttons are hit-tested and drawn but trigger
//! nothing; leaving the panel is done with the footswitch reset switch.

use ampdeck_backend::Canvas;
use ampdeck_core::control::FX_ORDER;
use ampdeck_core::{Align, AmpState, ControlState, Sides, Window};
use ampdeck_runtime::{Panel, PanelConfig};
use ampdeck_widgets::Ui;
use tracing::trace;

/// Width of the header reset button.
const RESET_WIDTH: f32 = 120.0;

/// Panel view for two amplifiers.
#[derive(Debug, Clone)]
pub struct AmpPanel {
    screen: Window,
    header_height: f32,
    touched: Vec<String>,
}

impl AmpPanel {
    pub fn new(config: &PanelConfig) -> Self {
        let (w, h) = config.display.size();
        Self {
            screen: Window::from_size(w, h),
            header_height: config.display.header_height,
            touched: Vec::new(),
        }
    }

    /// Ids of the buttons under a finger during the last frame.
    ///
    /// Nothing acts on these; they are kept for logging and inspection.
    pub fn touched(&self) -> &[String] {
        &self.touched
    }

    fn button<C: Canvas>(
        &mut self,
        ui: &mut Ui<'_, C>,
        window: Window,
        id: String,
        caption: &str,
        lit: bool,
    ) {
        if ui.button(window) {
            self.touched.push(id);
        }
        let color = if lit { ui.palette()[5] } else { ui.palette()[0] };
        ui.text(window, Align::CENTER_MIDDLE, color, caption);
    }

    fn header<C: Canvas>(&mut self, ui: &mut Ui<'_, C>, header: Window, state: &ControlState) {
        let pad = ui.style().pad;
        let (title, reset) = header.split_v(header.w - RESET_WIDTH);
        let title_text = format!("{}: {}", state.program + 1, state.program_name);
        ui.label(title.inset(Sides::all(pad)), &title_text);
        self.button(ui, reset.inset(Sides::all(pad)), "reset".to_owned(), "reset", true);
    }

    fn amp<C: Canvas>(&mut self, ui: &mut Ui<'_, C>, index: usize, area: Window, amp: &AmpState) {
        let pad = ui.style().pad;
        let text_size = ui.style().text_size;
        ui.pane(area);

        let inner = area.inset(Sides::all(pad * 2.0));
        let (title, rest) = inner.split_h(text_size + pad * 2.0);
        ui.label(title, &format!("{}  {}", amp.name, amp.mode.label()));

        let fx_height = text_size + pad * 4.0;
        let (dials, fx_row) = rest.split_h(rest.h - fx_height);
        let dial_cells = dials.columns(2);
        if let [gain, volume] = dial_cells.as_slice() {
            ui.dial(*gain, "gain", amp.gain_normalized(), &amp.gain.to_string());
            ui.dial(*volume, "volume", amp.volume_normalized(), &amp.volume.to_string());
        }

        for (cell, (flag, label)) in fx_row.columns(FX_ORDER.len()).into_iter().zip(FX_ORDER) {
            let id = format!("amp{index}.{label}");
            self.button(ui, cell.inset(Sides::all(pad)), id, label, amp.fx.contains(flag));
        }
    }
}

impl Panel for AmpPanel {
    fn view<C: Canvas>(&mut self, ui: &mut Ui<'_, C>, state: &ControlState) {
        self.touched.clear();
        let bg = ui.palette()[0];
        ui.fill_window(self.screen, bg);

        let (header, body) = self.screen.split_h(self.header_height);
        self.header(ui, header, state);

        let (upper, lower) = body.split_h(body.h * 0.5);
        for (i, (area, amp)) in [upper, lower].into_iter().zip(&state.amps).enumerate() {
            self.amp(ui, i, area, amp);
        }

        if !self.touched.is_empty() {
            trace!(touched = ?self.touched, "buttons touched");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampdeck_backend::{DisplayList, DrawOp};
    use ampdeck_core::{AbsReport, TouchRegistry};
    use ampdeck_widgets::Palette;

    use crate::controller::demo_programs;

    fn state() -> ControlState {
        let p = &demo_programs()[0];
        ControlState {
            program: 0,
            program_name: p.name.clone(),
            amps: p.amps.clone(),
        }
    }

    fn draw(reg: &TouchRegistry) -> (AmpPanel, DisplayList) {
        let config = PanelConfig::default();
        let palette = Palette::flat();
        let mut panel = AmpPanel::new(&config);
        let mut dl = DisplayList::new();
        {
            let mut ui = Ui::new(&mut dl, &palette, reg).with_style(config.style());
            panel.view(&mut ui, &state());
        }
        (panel, dl)
    }

    #[test]
    fn draws_program_name_and_every_control() {
        let (_, dl) = draw(&TouchRegistry::new());
        let texts: Vec<_> = dl.texts().collect();
        assert!(texts.contains(&"1: Trippin on a Hole in a Paper Heart"));
        assert!(texts.contains(&"MG  dirty"));
        assert!(texts.contains(&"JD  clean"));
        assert_eq!(texts.iter().filter(|t| **t == "reverb").count(), 2);
        assert_eq!(texts.iter().filter(|t| **t == "gain").count(), 2);
        assert!(texts.contains(&"reset"));
    }

    #[test]
    fn background_fills_screen_first() {
        let (_, dl) = draw(&TouchRegistry::new());
        match &dl.ops()[0] {
            DrawOp::Fill { color, .. } => assert_eq!(*color, Palette::flat()[0]),
            other => panic!("unexpected first op {other:?}"),
        }
    }

    #[test]
    fn touch_on_reset_region_is_reported() {
        let mut reg = TouchRegistry::new();
        for r in [
            AbsReport::slot(0),
            AbsReport::tracking_id(4),
            AbsReport::x(760),
            AbsReport::y(15),
        ] {
            reg.apply(r).unwrap();
        }
        let (panel, _) = draw(&reg);
        assert_eq!(panel.touched(), ["reset".to_owned()]);
    }

    #[test]
    fn touch_on_lower_amp_fx_row() {
        let mut reg = TouchRegistry::new();
        for r in [
            AbsReport::slot(3),
            AbsReport::tracking_id(9),
            AbsReport::x(20),
            AbsReport::y(470),
        ] {
            reg.apply(r).unwrap();
        }
        let (panel, _) = draw(&reg);
        assert_eq!(panel.touched(), ["amp1.gate".to_owned()]);
    }
}
