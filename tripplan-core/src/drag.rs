//! Drag-and-drop gesture lifecycle for itinerary rows.
//!
//! Rows are identified by the index stamped on them at render time. A gesture
//! runs `start`, any number of `enter`/`leave`, then `drop` on the target row
//! and finally `end` on the source row. Only a drop onto a row other than the
//! source produces a move; everything else resolves to a highlight change or
//! an explicit no-op.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: usize,
    },
    Hovering {
        source: usize,
        target: usize,
    },
}

impl DragState {
    #[must_use]
    pub const fn source(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { source } | Self::Hovering { source, .. } => Some(source),
        }
    }

    #[must_use]
    pub const fn target(self) -> Option<usize> {
        match self {
            Self::Hovering { target, .. } => Some(target),
            Self::Idle | Self::Dragging { .. } => None,
        }
    }
}

/// Why an event left the gesture unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    AlreadyDragging,
    SameElement,
}

/// What the view should do in response to a drag event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    /// Dim the source row.
    Started { source: usize },
    /// Mark `target` as the drop candidate.
    Highlight { target: usize },
    /// Remove the drop-candidate mark from `target`.
    Unhighlight { target: usize },
    /// Relocate the row at `from` to `to`, then persist and re-render.
    Move { from: usize, to: usize },
    /// Restore the source row and clear all highlights.
    Finished,
    Noop { reason: DragNoopReason },
}

impl DragEffect {
    const fn noop(reason: DragNoopReason) -> Self {
        Self::Noop { reason }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn start(&mut self, source: usize) -> DragEffect {
        if self.is_active() {
            return DragEffect::noop(DragNoopReason::AlreadyDragging);
        }
        self.state = DragState::Dragging { source };
        DragEffect::Started { source }
    }

    pub fn enter(&mut self, target: usize) -> DragEffect {
        let Some(source) = self.state.source() else {
            return DragEffect::noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        if target == source {
            return DragEffect::noop(DragNoopReason::SameElement);
        }
        self.state = DragState::Hovering { source, target };
        DragEffect::Highlight { target }
    }

    /// Browsers may deliver `enter` on the next row before `leave` on the
    /// previous one, so the hovered target only resets when it matches.
    pub fn leave(&mut self, target: usize) -> DragEffect {
        let Some(source) = self.state.source() else {
            return DragEffect::noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        if self.state.target() == Some(target) {
            self.state = DragState::Dragging { source };
        }
        DragEffect::Unhighlight { target }
    }

    pub fn drop_on(&mut self, target: usize) -> DragEffect {
        let Some(source) = self.state.source() else {
            return DragEffect::noop(DragNoopReason::IdleWithoutActiveDrag);
        };
        if target == source {
            self.state = DragState::Dragging { source };
            return DragEffect::noop(DragNoopReason::SameElement);
        }
        self.state = DragState::Idle;
        DragEffect::Move {
            from: source,
            to: target,
        }
    }

    /// Gesture finished on the source row, whether or not a drop happened.
    pub fn end(&mut self) -> DragEffect {
        self.state = DragState::Idle;
        DragEffect::Finished
    }
}
