//! Conversation session: turn-taking over one persona's message log.
//!
//! A session holds the log for the active persona and forwards each user turn,
//! with the history before it, to a [`ReplyGenerator`]. Only one call is
//! outstanding at a time. Every (re)start bumps a generation counter; a reply
//! that resolves after the generation changed is dropped instead of landing
//! in the new conversation. Remote failures and timeouts never reach the
//! caller: they become the persona's fallback line in the log.

use hakone_core::config::ChatSettings;
use hakone_core::error::{HakoneError, RemoteCallError, Result};
use hakone_core::persona::{Persona, PersonaRegistry};
use hakone_core::reply::{ReplyGenerator, ReplyRequest};
use hakone_core::session::{
    ChatMessage, IgnoreReason, MessageRole, SessionSnapshot, SessionState, TurnOutcome,
    assemble_history,
};
use hakone_core::user::{DefaultUserService, UserService};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Appended when a persona has no fallback line of its own.
pub const DEFAULT_FALLBACK: &str = "Sorry, I lost the line for a moment. Could you say that again?";

/// Mutable part of a session. Never held across an `.await`.
struct SessionInner {
    persona: Arc<Persona>,
    log: Vec<ChatMessage>,
    pending: bool,
    generation: u64,
    next_message_id: u64,
}

impl SessionInner {
    fn push(&mut self, role: MessageRole, text: impl Into<String>) -> ChatMessage {
        let message = ChatMessage::new(self.next_message_id, role, text);
        self.next_message_id += 1;
        self.log.push(message.clone());
        message
    }

    fn reseed(&mut self, persona: Arc<Persona>, greeting: String) {
        self.generation += 1;
        self.persona = persona;
        self.pending = false;
        self.log.clear();
        self.push(MessageRole::Model, greeting);
    }
}

/// Builder for [`ConversationSession`].
pub struct ConversationSessionBuilder {
    registry: PersonaRegistry,
    generator: Arc<dyn ReplyGenerator>,
    user_service: Arc<dyn UserService>,
    settings: ChatSettings,
}

impl ConversationSessionBuilder {
    /// Overrides the chat settings (model limits, reply timeout).
    pub fn with_settings(mut self, settings: ChatSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Supplies the user nickname used in greetings.
    pub fn with_user_service(mut self, user_service: Arc<dyn UserService>) -> Self {
        self.user_service = user_service;
        self
    }

    /// Starts a session bound to `persona_id`.
    ///
    /// # Errors
    ///
    /// Returns `HakoneError::UnknownPersona` if the id is not registered.
    pub fn start(self, persona_id: &str) -> Result<ConversationSession> {
        let persona = self.registry.get(persona_id)?;
        let greeting = persona.render_greeting(&self.user_service.get_user_name());

        let mut inner = SessionInner {
            persona: persona.clone(),
            log: Vec::new(),
            pending: false,
            generation: 0,
            next_message_id: 0,
        };
        inner.reseed(persona, greeting);
        info!(persona = persona_id, "Conversation started");

        Ok(ConversationSession {
            registry: self.registry,
            generator: self.generator,
            user_service: self.user_service,
            settings: self.settings,
            inner: Mutex::new(inner),
        })
    }

    /// Starts a session with the configured default persona, falling back to
    /// the registry default when none is configured.
    pub fn start_default(self) -> Result<ConversationSession> {
        let persona_id = match &self.settings.default_persona {
            Some(id) => id.clone(),
            None => self.registry.default_persona().id.clone(),
        };
        self.start(&persona_id)
    }
}

/// One user's conversation with the active persona.
///
/// Shared with the presentation layer behind an `Arc`; all methods take
/// `&self`.
pub struct ConversationSession {
    registry: PersonaRegistry,
    generator: Arc<dyn ReplyGenerator>,
    user_service: Arc<dyn UserService>,
    settings: ChatSettings,
    inner: Mutex<SessionInner>,
}

impl ConversationSession {
    /// Creates a builder with default settings and the default user profile.
    pub fn builder(
        registry: PersonaRegistry,
        generator: Arc<dyn ReplyGenerator>,
    ) -> ConversationSessionBuilder {
        ConversationSessionBuilder {
            registry,
            generator,
            user_service: Arc::new(DefaultUserService),
            settings: ChatSettings::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        // The guarded state stays consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clears the log and re-seeds it with `persona_id`'s greeting.
    ///
    /// Allowed in any state. A reply still outstanding from before the reset
    /// is discarded when it resolves.
    ///
    /// # Errors
    ///
    /// Returns `HakoneError::UnknownPersona` if the id is not registered; the
    /// session is left untouched in that case.
    pub fn reset(&self, persona_id: &str) -> Result<()> {
        let persona = self.registry.get(persona_id)?;
        let greeting = persona.render_greeting(&self.user_service.get_user_name());

        let mut inner = self.lock();
        let previous = inner.persona.id.clone();
        let was_pending = inner.pending;
        inner.reseed(persona, greeting);
        info!(
            from = %previous,
            to = persona_id,
            generation = inner.generation,
            abandoned_reply = was_pending,
            "Conversation reset"
        );
        Ok(())
    }

    /// Starts a new chat with the current persona.
    pub fn new_chat(&self) -> Result<()> {
        let persona_id = self.lock().persona.id.clone();
        self.reset(&persona_id)
    }

    /// Submits a user turn and waits for the persona's reply.
    ///
    /// Blank input and submissions while a reply is outstanding are ignored
    /// without touching the log. Otherwise the text is appended exactly as
    /// typed, the remote call is issued with the history before it, and the
    /// reply (or the persona's fallback line on any failure or timeout) is
    /// appended.
    ///
    /// Dropping the returned future before it completes clears the pending
    /// flag; the user message stays in the log without a reply.
    pub async fn submit_user_turn(&self, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return TurnOutcome::Ignored(IgnoreReason::BlankInput);
        }

        let (generation, request) = match self.begin_turn(text) {
            Ok(turn) => turn,
            Err(err) => {
                debug!(error = %err, "Ignoring submission");
                return TurnOutcome::Ignored(IgnoreReason::ReplyPending);
            }
        };
        let mut in_flight = InFlight {
            session: self,
            generation,
            settled: false,
        };

        let timeout = self.settings.reply_timeout();
        let result =
            match tokio::time::timeout(timeout, self.generator.generate_reply(&request)).await {
                Ok(result) => result,
                Err(_) => Err(RemoteCallError::Timeout(timeout)),
            };

        in_flight.settled = true;
        self.finish_turn(generation, result)
    }

    /// Appends the user message and claims the single in-flight slot.
    fn begin_turn(&self, text: &str) -> Result<(u64, ReplyRequest)> {
        let mut inner = self.lock();
        if inner.pending {
            return Err(HakoneError::invalid_state(
                "a reply for the previous turn is still pending",
            ));
        }

        let history = assemble_history(&inner.log);
        inner.push(MessageRole::User, text);
        inner.pending = true;

        debug!(
            persona = %inner.persona.id,
            generation = inner.generation,
            history_len = history.len(),
            "Issuing reply request"
        );

        let request = ReplyRequest {
            system_instruction: inner.persona.system_instruction.clone(),
            history,
            message: text.to_string(),
            max_output_tokens: self.settings.max_output_tokens,
        };
        Ok((inner.generation, request))
    }

    /// Folds the remote result into the log if the session was not reset.
    fn finish_turn(
        &self,
        generation: u64,
        result: std::result::Result<String, RemoteCallError>,
    ) -> TurnOutcome {
        let mut inner = self.lock();
        if inner.generation != generation {
            warn!(
                issued_for = generation,
                current = inner.generation,
                "Discarding reply for a conversation that was reset"
            );
            return TurnOutcome::Discarded;
        }

        inner.pending = false;
        match result {
            Ok(text) => TurnOutcome::Replied(inner.push(MessageRole::Model, text)),
            Err(err) => {
                warn!(persona = %inner.persona.id, error = %err, "Reply failed, appending fallback");
                let fallback = if inner.persona.fallback.trim().is_empty() {
                    DEFAULT_FALLBACK.to_string()
                } else {
                    inner.persona.fallback.clone()
                };
                TurnOutcome::FellBack(inner.push(MessageRole::Model, fallback))
            }
        }
    }

    /// Returns a read-only copy of the session for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            active_persona_id: inner.persona.id.clone(),
            log: inner.log.clone(),
            pending: inner.pending,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.lock().pending {
            SessionState::AwaitingReply
        } else {
            SessionState::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    /// Returns the active persona.
    pub fn persona(&self) -> Arc<Persona> {
        self.lock().persona.clone()
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }
}

/// Releases the in-flight slot if a turn is abandoned mid-call.
struct InFlight<'a> {
    session: &'a ConversationSession,
    generation: u64,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.session.lock();
        if inner.generation == self.generation {
            inner.pending = false;
            debug!(generation = self.generation, "Turn abandoned before reply");
        }
    }
}
