//! Session state machine types.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Where a session is within the current turn.
///
/// `Ready` behaves like `Idle` for the next turn; it only records that at
/// least one exchange has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    /// No messages yet.
    #[default]
    Idle,
    /// A user message was appended and the reply is pending.
    AwaitingReply,
    /// The last user message has been answered.
    Ready,
}

impl SessionState {
    /// Whether a new user message may be submitted.
    pub fn accepts_input(self) -> bool {
        !matches!(self, SessionState::AwaitingReply)
    }
}

/// Notifications delivered to session listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    MessageAppended(super::Message),
    StateChanged {
        from: SessionState,
        to: SessionState,
    },
    PersonaChanged {
        previous: String,
        current: String,
    },
    /// History was cleared.
    Reset,
}

/// Observer of a single session.
///
/// Closures taking `&SessionEvent` implement this directly.
pub trait SessionListener {
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionListener for F
where
    F: FnMut(&SessionEvent),
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
