//! The conversation session: history owner and turn state machine.

use super::message::{Message, MessageRole};
use super::snapshot::SessionSnapshot;
use super::state::{SessionEvent, SessionListener, SessionState};
use crate::config::EngineConfig;
use crate::emotion::{EmotionCategory, EmotionClassifier};
use crate::error::{CompanionError, Result};
use crate::persona::{PersonaCatalog, ResolvedPersona};
use crate::selector::{DEFAULT_RECENT_REPLY_WINDOW, ResponseSelector};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use uuid::Uuid;

/// One chat instance: ordered history, active persona and turn state.
///
/// The session is the only writer of its history. Methods take `&mut self`,
/// so a session has exactly one owner at a time; the catalog and classifier
/// are shared read-only.
///
/// A turn is `submit_user` followed by `respond`; [`append_user`] performs
/// both. Between the two halves [`is_awaiting_reply`] is true.
///
/// [`append_user`]: Self::append_user
/// [`is_awaiting_reply`]: Self::is_awaiting_reply
pub struct ConversationSession<R: Rng = StdRng> {
    id: String,
    created_at: DateTime<Utc>,
    catalog: Arc<PersonaCatalog>,
    classifier: Arc<EmotionClassifier>,
    selector: ResponseSelector,
    recent_window: usize,
    persona_name: String,
    messages: Vec<Message>,
    state: SessionState,
    rng: R,
    listeners: Vec<Box<dyn SessionListener>>,
}

impl ConversationSession<StdRng> {
    /// Creates a session with an entropy-seeded random source.
    pub fn new(catalog: Arc<PersonaCatalog>, persona_name: impl Into<String>) -> Self {
        Self::with_rng(catalog, persona_name, StdRng::from_entropy())
    }

    /// Creates a session configured from `config`.
    ///
    /// `config.seed` makes reply selection reproducible.
    pub fn from_config(
        catalog: Arc<PersonaCatalog>,
        classifier: Arc<EmotionClassifier>,
        config: &EngineConfig,
        persona_name: impl Into<String>,
    ) -> Self {
        Self::with_rng(catalog, persona_name, seeded_rng(config)).configured(classifier, config)
    }

    /// Restores a stored session with the same settings as [`from_config`].
    ///
    /// [`from_config`]: Self::from_config
    pub fn restore_from_config(
        catalog: Arc<PersonaCatalog>,
        classifier: Arc<EmotionClassifier>,
        config: &EngineConfig,
        snapshot: SessionSnapshot,
    ) -> Self {
        Self::restore(catalog, snapshot, seeded_rng(config)).configured(classifier, config)
    }

    fn configured(self, classifier: Arc<EmotionClassifier>, config: &EngineConfig) -> Self {
        self.with_classifier(classifier)
            .with_selector(ResponseSelector::new(config.fallback_reply.clone()))
            .with_recent_window(config.recent_reply_window)
    }
}

fn seeded_rng(config: &EngineConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl<R: Rng> ConversationSession<R> {
    /// Creates a session drawing replies from `rng`.
    pub fn with_rng(
        catalog: Arc<PersonaCatalog>,
        persona_name: impl Into<String>,
        rng: R,
    ) -> Self {
        let session = Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            catalog,
            classifier: Arc::new(EmotionClassifier::default()),
            selector: ResponseSelector::default(),
            recent_window: DEFAULT_RECENT_REPLY_WINDOW,
            persona_name: persona_name.into().trim().to_string(),
            messages: Vec::new(),
            state: SessionState::Idle,
            rng,
            listeners: Vec::new(),
        };
        tracing::info!(session_id = %session.id, persona = %session.persona_name, "session created");
        session
    }

    /// Rebuilds a session from a stored snapshot.
    pub fn restore(catalog: Arc<PersonaCatalog>, snapshot: SessionSnapshot, rng: R) -> Self {
        let state = snapshot.state();
        tracing::info!(
            session_id = %snapshot.id,
            messages = snapshot.messages.len(),
            %state,
            "session restored"
        );
        Self {
            id: snapshot.id,
            created_at: snapshot.created_at,
            catalog,
            classifier: Arc::new(EmotionClassifier::default()),
            selector: ResponseSelector::default(),
            recent_window: DEFAULT_RECENT_REPLY_WINDOW,
            persona_name: snapshot.persona,
            messages: snapshot.messages,
            state,
            rng,
            listeners: Vec::new(),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<EmotionClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_selector(mut self, selector: ResponseSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Sets how many recent assistant replies the selector avoids.
    pub fn with_recent_window(mut self, window: usize) -> Self {
        self.recent_window = window;
        self
    }

    // ============================================================================
    // Read access
    // ============================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    /// Messages in insertion order.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// The persona name as chosen by the user.
    pub fn persona_name(&self) -> &str {
        &self.persona_name
    }

    /// The active persona, resolving custom names to the default table.
    pub fn persona(&self) -> ResolvedPersona<'_> {
        self.catalog.resolve(&self.persona_name)
    }

    pub fn greeting(&self) -> &str {
        &self.persona().persona.greeting
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    /// Texts of the latest assistant replies within the window, most recent last.
    pub fn recent_replies(&self) -> Vec<String> {
        let mut recent: Vec<String> = self
            .messages
            .iter()
            .rev()
            .filter(|m| m.is_assistant())
            .take(self.recent_window)
            .map(|m| m.text.clone())
            .collect();
        recent.reverse();
        recent
    }

    // ============================================================================
    // Turn handling
    // ============================================================================

    /// Appends a user message, answers it, and returns the reply.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `text` is blank
    /// - `InvalidState` if a previous message is still awaiting its reply
    pub fn append_user(&mut self, text: &str) -> Result<&Message> {
        self.submit_user(text)?;
        self.respond()
    }

    /// Appends a user message and enters `AwaitingReply`.
    pub fn submit_user(&mut self, text: &str) -> Result<&Message> {
        if !self.state.accepts_input() {
            return Err(CompanionError::invalid_state(
                "idle or ready",
                self.state.to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(CompanionError::invalid_input("message text must not be blank"));
        }

        let emotion = self.classifier.classify(text);
        let message = Message::new(MessageRole::User, text, self.next_timestamp(), emotion);
        tracing::debug!(session_id = %self.id, %emotion, "user message appended");

        self.push(message);
        self.transition(SessionState::AwaitingReply);
        Ok(self.last_message())
    }

    /// Answers the pending user message and returns to `Ready`.
    pub fn respond(&mut self) -> Result<&Message> {
        if self.state != SessionState::AwaitingReply {
            return Err(CompanionError::invalid_state(
                "awaiting_reply",
                self.state.to_string(),
            ));
        }

        let emotion = self
            .messages
            .last()
            .and_then(|m| m.emotion)
            .unwrap_or(EmotionCategory::General);
        let recent = self.recent_replies();

        let resolved = self.catalog.resolve(&self.persona_name);
        let reply = self
            .selector
            .select(resolved.persona, emotion, &recent, &mut self.rng);
        tracing::debug!(
            session_id = %self.id,
            persona = %resolved.persona.name,
            custom = resolved.custom,
            %emotion,
            "reply selected"
        );

        let message = Message::new(MessageRole::Assistant, reply, self.next_timestamp(), emotion);
        self.push(message);
        self.transition(SessionState::Ready);
        Ok(self.last_message())
    }

    /// Clears history and returns to `Idle`. The persona is kept.
    pub fn reset(&mut self) {
        let cleared = self.messages.len();
        self.messages.clear();
        self.transition(SessionState::Idle);
        self.emit(SessionEvent::Reset);
        tracing::info!(session_id = %self.id, cleared, "session reset");
    }

    /// Switches the active persona without touching history.
    ///
    /// Names not in the catalog are kept for display and answered with the
    /// default persona's replies.
    pub fn set_persona(&mut self, name: &str) -> Result<ResolvedPersona<'_>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CompanionError::invalid_input("persona name must not be blank"));
        }

        let previous = std::mem::replace(&mut self.persona_name, name.to_string());
        if previous != self.persona_name {
            tracing::info!(session_id = %self.id, from = %previous, to = %self.persona_name, "persona changed");
            let current = self.persona_name.clone();
            self.emit(SessionEvent::PersonaChanged { previous, current });
        }
        Ok(self.persona())
    }

    /// Registers an observer for session events.
    pub fn subscribe(&mut self, listener: impl SessionListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Copies the persistable parts of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: self
                .messages
                .last()
                .map(|m| m.timestamp)
                .unwrap_or(self.created_at),
            persona: self.persona_name.clone(),
            messages: self.messages.clone(),
        }
    }

    // ============================================================================
    // Internals
    // ============================================================================

    /// Current time, clamped so history timestamps never go backwards.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.messages.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message.clone());
        self.emit(SessionEvent::MessageAppended(message));
    }

    fn last_message(&self) -> &Message {
        // push() runs before every call site
        &self.messages[self.messages.len() - 1]
    }

    fn transition(&mut self, to: SessionState) {
        let from = self.state;
        self.state = to;
        if from != to {
            self.emit(SessionEvent::StateChanged { from, to });
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}
