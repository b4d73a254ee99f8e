//! Pointer and wheel input, independent of any windowing toolkit.
//!
//! The host converts its own events into [`InputEvent`]s; [`handle_input`]
//! turns each one into a camera change or a measurement transition and
//! reports whether a redraw is needed.

use serde::{Deserialize, Serialize};
use shared::MeshPayload;

use crate::math::{vec3, DVec2};
use crate::measure;
use crate::state::measurement::{MeasurementSelection, Transition, VertexRef};
use crate::state::settings::InteractionSettings;
use crate::viewport::camera::{CameraState, Viewport};
use crate::viewport::frame::Frame;
use crate::viewport::picking::hit_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Turns a primary drag into a pan
    #[serde(default)]
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `pos` (viewport pixels)
    PointerMoved { pos: DVec2 },
    /// Pointer left the viewport
    PointerLeft,
    /// Press and release without dragging
    Click { pos: DVec2, button: PointerButton },
    /// Drag step with the pixel delta since the previous step
    Drag {
        delta: DVec2,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Wheel notches, positive away from the user (zoom in)
    Wheel { notches: f64 },
}

/// Notifications for the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewerEvent {
    /// A new segment was formed between two picked points
    MeasurementCompleted {
        from: VertexRef,
        to: VertexRef,
        distance: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOutcome {
    pub redraw: bool,
    pub events: Vec<ViewerEvent>,
}

impl InputOutcome {
    fn redraw(redraw: bool) -> Self {
        Self {
            redraw,
            events: Vec::new(),
        }
    }
}

/// Read-only state the controller needs besides the camera and selection
pub struct InputContext<'a> {
    pub payload: &'a MeshPayload,
    /// Last rendered frame; picking is skipped until there is one
    pub frame: Option<&'a Frame>,
    pub viewport: Viewport,
    pub interaction: &'a InteractionSettings,
    pub measuring: bool,
}

impl InputContext<'_> {
    fn pick(&self, pos: DVec2) -> Option<VertexRef> {
        if self.payload.is_empty() {
            return None;
        }
        let frame = self.frame?;
        hit_test(&frame.screen_points, pos, self.interaction.pick_radius)
    }
}

pub fn handle_input(
    event: InputEvent,
    ctx: &InputContext,
    camera: &mut CameraState,
    selection: &mut MeasurementSelection,
) -> InputOutcome {
    match event {
        InputEvent::Wheel { notches } => {
            if notches == 0.0 || !notches.is_finite() {
                return InputOutcome::default();
            }
            let before = camera.distance;
            camera.zoom(ctx.interaction.zoom_step.powf(notches));
            InputOutcome::redraw(camera.distance != before)
        }

        InputEvent::Drag {
            delta,
            button,
            modifiers,
        } => {
            if delta == DVec2::ZERO {
                return InputOutcome::default();
            }
            let pan = matches!(button, PointerButton::Middle | PointerButton::Secondary)
                || modifiers.shift;
            if pan {
                camera.pan(delta.x, delta.y, ctx.viewport);
            } else {
                let k = ctx.interaction.rotate_sensitivity;
                camera.rotate(delta.x * k, delta.y * k);
            }
            InputOutcome::redraw(true)
        }

        InputEvent::Click { .. } | InputEvent::PointerMoved { .. } | InputEvent::PointerLeft
            if !ctx.measuring =>
        {
            // Leftover hover from a previous measuring session
            InputOutcome::redraw(selection.set_hovered(None))
        }

        InputEvent::Click {
            pos,
            button: PointerButton::Primary,
        } => {
            let Some(v) = ctx.pick(pos) else {
                return InputOutcome::default();
            };
            let result = selection.pick(v);
            let mut outcome = InputOutcome::redraw(result.transition != Transition::Ignored);

            if let Some((a, b)) = result.segment {
                let centroid = vec3(ctx.payload.centroid());
                let ends = measure::resolve(ctx.payload, centroid, a)
                    .zip(measure::resolve(ctx.payload, centroid, b));
                if let Some((pa, pb)) = ends {
                    let distance = measure::distance(pa, pb);
                    tracing::debug!(from = %a, to = %b, distance, "segment formed");
                    outcome.events.push(ViewerEvent::MeasurementCompleted {
                        from: a,
                        to: b,
                        distance,
                    });
                }
            }
            outcome
        }

        InputEvent::Click {
            button: PointerButton::Secondary,
            ..
        } => InputOutcome::redraw(selection.undo()),

        InputEvent::Click {
            button: PointerButton::Middle,
            ..
        } => InputOutcome::default(),

        InputEvent::PointerMoved { pos } => InputOutcome::redraw(selection.set_hovered(ctx.pick(pos))),

        InputEvent::PointerLeft => InputOutcome::redraw(selection.set_hovered(None)),
    }
}
