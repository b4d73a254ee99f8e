//! Central viewport panel: egui input in, painted display list out

mod painter;

use egui::Ui;
use polyview_lib::input::{InputEvent, Modifiers, PointerButton};
use polyview_lib::math::DVec2;
use polyview_lib::viewport::camera::Viewport;

use crate::app::AppState;

/// Pixels of smooth scroll per wheel notch
const SCROLL_PER_NOTCH: f32 = 50.0;

const BUTTONS: [(egui::PointerButton, PointerButton); 3] = [
    (egui::PointerButton::Primary, PointerButton::Primary),
    (egui::PointerButton::Secondary, PointerButton::Secondary),
    (egui::PointerButton::Middle, PointerButton::Middle),
];

/// Viewport panel; the viewer itself lives in [`AppState`]
pub struct ViewportPanel {
    /// Last pointer position sent to the viewer, viewport-local
    last_hover: Option<egui::Pos2>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self { last_hover: None }
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        let local = |p: egui::Pos2| DVec2::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);

        // ── Collect input events for this frame ─────────────
        let mut events = Vec::new();

        let modifiers = ui.input(|i| i.modifiers);
        for (egui_button, button) in BUTTONS {
            if response.dragged_by(egui_button) {
                let delta = response.drag_delta();
                events.push(InputEvent::Drag {
                    delta: DVec2::new(delta.x as f64, delta.y as f64),
                    button,
                    modifiers: Modifiers {
                        shift: modifiers.shift,
                    },
                });
            }
        }

        if let Some(pos) = response.interact_pointer_pos() {
            let button = if response.clicked() {
                Some(PointerButton::Primary)
            } else if response.secondary_clicked() {
                Some(PointerButton::Secondary)
            } else if response.middle_clicked() {
                Some(PointerButton::Middle)
            } else {
                None
            };
            if let Some(button) = button {
                events.push(InputEvent::Click {
                    pos: local(pos),
                    button,
                });
            }
        }

        match (response.hover_pos(), self.last_hover) {
            (Some(pos), last) if last != Some(pos) => {
                events.push(InputEvent::PointerMoved { pos: local(pos) });
                self.last_hover = Some(pos);
            }
            (None, Some(_)) => {
                events.push(InputEvent::PointerLeft);
                self.last_hover = None;
            }
            _ => {}
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                events.push(InputEvent::Wheel {
                    notches: (scroll / SCROLL_PER_NOTCH) as f64,
                });
            }
        }

        // ── Dispatch ─────────────────────────────────────────
        let mut redraw = false;
        for event in events {
            redraw |= state.viewer.handle_input(event).redraw;
        }
        for event in state.viewer.take_events() {
            tracing::info!(?event, "measurement");
            state.last_segment = Some(event);
        }
        if redraw {
            ui.ctx().request_repaint();
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        // ── Render and paint ─────────────────────────────────
        let background = state.viewer.settings().theme.background;
        let frame = state
            .viewer
            .render(Viewport::new(rect.width() as f64, rect.height() as f64));
        painter::paint_frame(&ui.painter_at(rect), rect, frame, background);
    }
}
