use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    DrawingFreehand,
    DrawingPolygonOpen,
    /// Line, rectangle, ellipse and regular polygon share one press-drag-release gesture.
    DrawingSingleDragShape,
}

impl SessionState {
    pub const fn is_drawing(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEvent {
    BeginFreehand,
    BeginPolygon,
    AddVertex,
    BeginDrag,
    Commit,
    FinishPolygon,
    Cancel,
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid drawing transition: from {from:?} using event {event:?}")]
    InvalidTransition { from: SessionState, event: DrawEvent },
}

#[derive(Debug, Default)]
pub struct DrawingStateMachine {
    state: SessionState,
}

impl DrawingStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn can_transition(&self, event: DrawEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: DrawEvent) -> Option<SessionState> {
        use DrawEvent::*;
        match (self.state, event) {
            (SessionState::Idle, BeginFreehand) => Some(SessionState::DrawingFreehand),
            (SessionState::Idle, BeginPolygon) => Some(SessionState::DrawingPolygonOpen),
            (SessionState::Idle, BeginDrag) => Some(SessionState::DrawingSingleDragShape),
            (SessionState::DrawingPolygonOpen, AddVertex) => Some(SessionState::DrawingPolygonOpen),
            (SessionState::DrawingFreehand | SessionState::DrawingSingleDragShape, Commit) => {
                Some(SessionState::Idle)
            }
            (SessionState::DrawingPolygonOpen, FinishPolygon) => Some(SessionState::Idle),
            (state, Cancel) if state.is_drawing() => Some(SessionState::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: DrawEvent) -> SessionResult<SessionState> {
        tracing::debug!(from = ?self.state, event = ?event, "request drawing transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid drawing transition requested");
            SessionError::InvalidTransition { from, event }
        })?;
        self.state = next;
        Ok(self.state)
    }

    /// Drops back to idle regardless of the current state.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

impl std::fmt::Display for DrawingStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionState::{:?}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_drag_gesture_returns_to_idle_on_commit() {
        let mut machine = DrawingStateMachine::new();
        assert!(machine.can_transition(DrawEvent::BeginDrag));
        assert!(!machine.can_transition(DrawEvent::Commit));

        let state = machine
            .transition(DrawEvent::BeginDrag)
            .expect("idle -> drag should transition");
        assert_eq!(state, SessionState::DrawingSingleDragShape);
        assert!(!machine.can_transition(DrawEvent::AddVertex));

        let state = machine
            .transition(DrawEvent::Commit)
            .expect("drag -> idle should transition");
        assert_eq!(state, SessionState::Idle);
    }

    #[test]
    fn polygon_stays_open_until_finished() {
        let mut machine = DrawingStateMachine::new();
        machine
            .transition(DrawEvent::BeginPolygon)
            .expect("idle -> polygon should transition");
        machine
            .transition(DrawEvent::AddVertex)
            .expect("vertex should keep the polygon open");
        assert_eq!(machine.state(), SessionState::DrawingPolygonOpen);
        assert!(!machine.can_transition(DrawEvent::Commit));

        machine
            .transition(DrawEvent::FinishPolygon)
            .expect("finish should close the polygon");
        assert_eq!(machine.state(), SessionState::Idle);
    }

    #[test]
    fn invalid_transition_returns_error_without_changing_state() {
        let mut machine = DrawingStateMachine::new();
        let err = machine
            .transition(DrawEvent::Cancel)
            .expect_err("idle cannot cancel");
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                from: SessionState::Idle,
                event: DrawEvent::Cancel
            }
        ));
        assert_eq!(machine.state(), SessionState::Idle);
        assert_eq!(machine.to_string(), "SessionState::Idle");
    }
}
