use std::fmt;

use crate::geometry::Point;

/// Actions offered by the context menu raised on a secondary click over a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    Delete,
    Animate,
    BringToFront,
    SendToBack,
}

impl ContextAction {
    pub const ALL: [Self; 4] = [
        Self::Delete,
        Self::Animate,
        Self::BringToFront,
        Self::SendToBack,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Animate => "Animate",
            Self::BringToFront => "Bring to front",
            Self::SendToBack => "Send to back",
        }
    }
}

impl fmt::Display for ContextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Messages from the canvas session to the UI shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Status-bar text such as `"Rectangle selected"`.
    SelectionChanged(String),
    ModifiedChanged(bool),
    ContextMenuRequested {
        at: Point,
        actions: Vec<ContextAction>,
    },
    /// Animation is not played by the core; the shell decides what to show.
    AnimationRequested(String),
}

#[derive(Debug, Default, Clone)]
pub struct NotificationOutbox {
    pending: Vec<Notification>,
}

impl NotificationOutbox {
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(?notification, "queue notification");
        self.pending.push(notification);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_notifications_in_order_and_empties_the_outbox() {
        let mut outbox = NotificationOutbox::default();
        outbox.push(Notification::ModifiedChanged(true));
        outbox.push(Notification::SelectionChanged("Line selected".to_string()));

        assert_eq!(
            outbox.drain(),
            vec![
                Notification::ModifiedChanged(true),
                Notification::SelectionChanged("Line selected".to_string()),
            ]
        );
        assert!(outbox.is_empty());
    }

    #[test]
    fn context_actions_carry_menu_labels() {
        let labels = ContextAction::ALL.map(ContextAction::label);
        assert_eq!(labels, ["Delete", "Animate", "Bring to front", "Send to back"]);
    }
}
