//! Measurement selection: an explicit state machine over picked vertices.
//!
//! `Empty -> Building(path) -> Closed(polygon) -> ClosedWithApex(solid)`

use serde::{Deserialize, Serialize};

/// Selection index reserved for the mesh centroid
pub const CENTROID_INDEX: i64 = -1;

/// A pickable point: a payload vertex or the mesh centroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum VertexRef {
    Mesh(usize),
    Centroid,
}

impl From<VertexRef> for i64 {
    fn from(v: VertexRef) -> Self {
        match v {
            VertexRef::Mesh(i) => i as i64,
            VertexRef::Centroid => CENTROID_INDEX,
        }
    }
}

impl TryFrom<i64> for VertexRef {
    type Error = String;

    fn try_from(i: i64) -> Result<Self, Self::Error> {
        match i {
            CENTROID_INDEX => Ok(VertexRef::Centroid),
            i if i >= 0 => Ok(VertexRef::Mesh(i as usize)),
            other => Err(format!("invalid vertex index {other}")),
        }
    }
}

impl std::fmt::Display for VertexRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VertexRef::Mesh(i) => write!(f, "V{i}"),
            VertexRef::Centroid => f.write_str("C"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MeasurePhase {
    #[default]
    Empty,
    /// Open path of distinct vertices
    Building(Vec<VertexRef>),
    /// Closed polygon (≥ 3 vertices)
    Closed(Vec<VertexRef>),
    /// Closed polygon plus an apex outside the loop
    ClosedWithApex { base: Vec<VertexRef>, apex: VertexRef },
}

/// What a pick did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    Appended,
    Closed,
    ApexSet,
    ApexCleared,
}

/// Outcome of a pick; `segment` is set when a new segment was formed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickResult {
    pub transition: Transition,
    pub segment: Option<(VertexRef, VertexRef)>,
}

impl PickResult {
    fn ignored() -> Self {
        Self {
            transition: Transition::Ignored,
            segment: None,
        }
    }
}

impl MeasurePhase {
    /// Apply a left-click on `v`, returning the next phase
    pub fn on_pick(self, v: VertexRef) -> (Self, PickResult) {
        match self {
            MeasurePhase::Empty => (
                MeasurePhase::Building(vec![v]),
                PickResult {
                    transition: Transition::Appended,
                    segment: None,
                },
            ),
            MeasurePhase::Building(mut path) => {
                if path.len() >= 3 && path.first() == Some(&v) {
                    let segment = path.last().map(|&last| (last, v));
                    return (
                        MeasurePhase::Closed(path),
                        PickResult {
                            transition: Transition::Closed,
                            segment,
                        },
                    );
                }
                if path.contains(&v) {
                    return (MeasurePhase::Building(path), PickResult::ignored());
                }
                let segment = path.last().map(|&last| (last, v));
                path.push(v);
                (
                    MeasurePhase::Building(path),
                    PickResult {
                        transition: Transition::Appended,
                        segment,
                    },
                )
            }
            MeasurePhase::Closed(base) => {
                if base.contains(&v) {
                    return (MeasurePhase::Closed(base), PickResult::ignored());
                }
                (
                    MeasurePhase::ClosedWithApex { base, apex: v },
                    PickResult {
                        transition: Transition::ApexSet,
                        segment: None,
                    },
                )
            }
            MeasurePhase::ClosedWithApex { base, apex } => {
                if apex == v {
                    (
                        MeasurePhase::Closed(base),
                        PickResult {
                            transition: Transition::ApexCleared,
                            segment: None,
                        },
                    )
                } else if base.contains(&v) {
                    (MeasurePhase::ClosedWithApex { base, apex }, PickResult::ignored())
                } else {
                    (
                        MeasurePhase::ClosedWithApex { base, apex: v },
                        PickResult {
                            transition: Transition::ApexSet,
                            segment: None,
                        },
                    )
                }
            }
        }
    }

    /// Right-click: drop the apex, else reopen the loop, else clear everything
    pub fn on_undo(self) -> Self {
        match self {
            MeasurePhase::ClosedWithApex { base, .. } => MeasurePhase::Closed(base),
            MeasurePhase::Closed(base) => MeasurePhase::Building(base),
            MeasurePhase::Building(_) | MeasurePhase::Empty => MeasurePhase::Empty,
        }
    }
}

/// Measurement selection plus hover state
#[derive(Debug, Clone, Default)]
pub struct MeasurementSelection {
    phase: MeasurePhase,
    hovered: Option<VertexRef>,
}

impl MeasurementSelection {
    /// Base path/loop vertices in pick order
    pub fn selected_vertices(&self) -> &[VertexRef] {
        match &self.phase {
            MeasurePhase::Empty => &[],
            MeasurePhase::Building(path) => path,
            MeasurePhase::Closed(base) | MeasurePhase::ClosedWithApex { base, .. } => base,
        }
    }

    pub fn loop_closed(&self) -> bool {
        matches!(
            self.phase,
            MeasurePhase::Closed(_) | MeasurePhase::ClosedWithApex { .. }
        )
    }

    pub fn apex(&self) -> Option<VertexRef> {
        match self.phase {
            MeasurePhase::ClosedWithApex { apex, .. } => Some(apex),
            _ => None,
        }
    }

    pub fn hovered(&self) -> Option<VertexRef> {
        self.hovered
    }

    pub fn is_empty(&self) -> bool {
        self.phase == MeasurePhase::Empty
    }

    pub fn is_selected(&self, v: VertexRef) -> bool {
        self.selected_vertices().contains(&v)
    }

    pub fn pick(&mut self, v: VertexRef) -> PickResult {
        let (next, result) = std::mem::take(&mut self.phase).on_pick(v);
        self.phase = next;
        if result.transition != Transition::Ignored {
            tracing::debug!(vertex = %v, transition = ?result.transition, "measurement pick");
        }
        result
    }

    /// Returns true if anything changed
    pub fn undo(&mut self) -> bool {
        let before = self.phase.clone();
        self.phase = std::mem::take(&mut self.phase).on_undo();
        self.phase != before
    }

    pub fn clear(&mut self) {
        self.phase = MeasurePhase::Empty;
        self.hovered = None;
    }

    /// Returns true if the hovered vertex changed
    pub fn set_hovered(&mut self, v: Option<VertexRef>) -> bool {
        if self.hovered == v {
            return false;
        }
        self.hovered = v;
        true
    }
}
