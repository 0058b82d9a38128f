//! ChatSessionClient -- one visitor chat session against a [`ChatBackend`].
//!
//! Lifecycle:
//!
//! ```text
//! NoSession --start_session(ok)--> SessionActive
//! SessionActive --send_message--> SessionActive
//! ```
//!
//! There is no transition out of `SessionActive`; dropping the client
//! discards the session and its transcript.
//!
//! Sends are optimistic: the visitor message is appended before the backend
//! call, and the bot reply is appended when (and only if) the call succeeds.
//! Backend failures are logged and returned, never written into the
//! transcript.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use aura_types::chat::{
    ChatMessage, ChatSession, OutgoingMessage, Sender, StartSessionRequest, VisitorInfo,
};
use aura_types::config::{ClientConfig, SendOrdering};
use aura_types::error::{BackendError, ChatError};
use tracing::{debug, info, warn};

use crate::backend::ChatBackend;
use crate::chat::transcript::Transcript;

/// The subset of [`ClientConfig`] the client itself needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub clinic_id: String,
    /// Seeded as the first transcript message of every session.
    pub welcome_message: String,
    pub send_ordering: SendOrdering,
}

impl ClientSettings {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            clinic_id: config.clinic_id.clone(),
            welcome_message: config.welcome_message.clone(),
            send_ordering: config.send_ordering,
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    NoSession,
    SessionActive,
}

/// Why a send was dropped before reaching the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSession,
    EmptyText,
}

/// Result of [`ChatSessionClient::send_message`].
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// Nothing was appended and no request was made.
    Skipped(SkipReason),
    /// The visitor message and this bot reply were appended.
    Replied(ChatMessage),
    /// The visitor message was appended; the backend call failed.
    Failed(BackendError),
}

impl SendOutcome {
    pub fn reply(&self) -> Option<&ChatMessage> {
        match self {
            SendOutcome::Replied(message) => Some(message),
            _ => None,
        }
    }

    /// Collapse the outcome into a `Result` for callers that treat skips as errors.
    pub fn into_result(self) -> Result<ChatMessage, ChatError> {
        match self {
            SendOutcome::Replied(message) => Ok(message),
            SendOutcome::Failed(err) => Err(ChatError::Backend(err)),
            SendOutcome::Skipped(SkipReason::NoSession) => Err(ChatError::NoSession),
            SendOutcome::Skipped(SkipReason::EmptyText) => Err(ChatError::EmptyMessage),
        }
    }
}

enum SessionSlot {
    Empty,
    Starting,
    Active(ChatSession),
}

/// Drives one visitor chat session and owns its transcript.
///
/// All methods take `&self`, so an embedding shell can keep several sends
/// in flight at once. Locks are never held across an `.await`.
pub struct ChatSessionClient<B: ChatBackend> {
    backend: B,
    settings: ClientSettings,
    session: Mutex<SessionSlot>,
    transcript: Mutex<Transcript>,
    input: Mutex<String>,
    starting: AtomicUsize,
    in_flight: AtomicUsize,
    /// Held for a whole exchange in `SendOrdering::Serialized` mode.
    send_gate: tokio::sync::Mutex<()>,
}

impl<B: ChatBackend> ChatSessionClient<B> {
    pub fn new(backend: B, settings: ClientSettings) -> Self {
        Self {
            backend,
            settings,
            session: Mutex::new(SessionSlot::Empty),
            transcript: Mutex::new(Transcript::new()),
            input: Mutex::new(String::new()),
            starting: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            send_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    // --- Session lifecycle ---

    /// Create the session and seed the transcript with the welcome message.
    ///
    /// Fails without touching the network if the visitor name is blank or a
    /// session is already active (or being started). On a backend failure
    /// the client stays in `NoSession`; nothing is retried.
    pub async fn start_session(&self, visitor: VisitorInfo) -> Result<ChatSession, ChatError> {
        if visitor.visitor_name.trim().is_empty() {
            return Err(ChatError::MissingVisitorName);
        }

        {
            let mut slot = lock(&self.session);
            if !matches!(*slot, SessionSlot::Empty) {
                return Err(ChatError::SessionAlreadyStarted);
            }
            *slot = SessionSlot::Starting;
        }
        let start = StartGuard::new(&self.session, &self.starting);

        let request = StartSessionRequest::new(&self.settings.clinic_id, visitor);
        debug!(
            backend = self.backend.name(),
            clinic_id = %request.clinic_id,
            "Creating chat session"
        );

        let mut session = match self.backend.create_session(&request).await {
            Ok(session) if !session.id.trim().is_empty() => session,
            Ok(_) => {
                let err = BackendError::Deserialization("session id missing from response".into());
                warn!(error = %err, "Error starting session");
                return Err(err.into());
            }
            Err(err) => {
                warn!(error = %err, "Error starting session");
                return Err(err.into());
            }
        };
        session.fill_from(&request);

        let welcome = ChatMessage::welcome(&session.id, self.settings.welcome_message.clone());
        lock(&self.transcript).push(welcome);
        start.activate(session.clone());

        info!(session_id = %session.id, clinic_id = %session.clinic_id, "Chat session started");
        Ok(session)
    }

    pub fn state(&self) -> ClientState {
        match *lock(&self.session) {
            SessionSlot::Active(_) => ClientState::SessionActive,
            SessionSlot::Empty | SessionSlot::Starting => ClientState::NoSession,
        }
    }

    pub fn session(&self) -> Option<ChatSession> {
        match &*lock(&self.session) {
            SessionSlot::Active(session) => Some(session.clone()),
            _ => None,
        }
    }

    pub fn session_id(&self) -> Option<String> {
        match &*lock(&self.session) {
            SessionSlot::Active(session) => Some(session.id.clone()),
            _ => None,
        }
    }

    /// True while `start_session` is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.starting.load(Ordering::SeqCst) > 0
    }

    // --- Messaging ---

    /// Send one visitor message.
    ///
    /// Blank text or a missing session makes this a no-op. Otherwise the
    /// visitor message is appended immediately, the input buffer is cleared,
    /// and the bot reply is appended once the backend answers. A failed call
    /// leaves the visitor message in place with no reply.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring empty message");
            return SendOutcome::Skipped(SkipReason::EmptyText);
        }
        let Some(session_id) = self.session_id() else {
            debug!("Ignoring message sent before session start");
            return SendOutcome::Skipped(SkipReason::NoSession);
        };

        lock(&self.input).clear();

        let _gate = match self.settings.send_ordering {
            SendOrdering::Serialized => Some(self.send_gate.lock().await),
            SendOrdering::Concurrent => None,
        };
        let _typing = InFlightGuard::enter(&self.in_flight);

        lock(&self.transcript).push(ChatMessage::visitor(&session_id, text));

        let request = OutgoingMessage::from_visitor(&session_id, text);
        match self.backend.send_message(&request).await {
            Ok(reply) => {
                let message = ChatMessage::bot(&session_id, reply);
                lock(&self.transcript).push(message.clone());
                debug!(session_id = %session_id, "Bot reply received");
                SendOutcome::Replied(message)
            }
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "Error sending message");
                SendOutcome::Failed(err)
            }
        }
    }

    /// Replace the pending input buffer.
    pub fn set_input(&self, text: impl Into<String>) {
        *lock(&self.input) = text.into();
    }

    pub fn input(&self) -> String {
        lock(&self.input).clone()
    }

    /// Send whatever is in the input buffer.
    pub async fn send_pending(&self) -> SendOutcome {
        let text = self.input();
        self.send_message(&text).await
    }

    /// True while at least one send is waiting on the backend.
    pub fn is_bot_typing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    // --- Transcript ---

    /// Snapshot of the transcript in insertion order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        lock(&self.transcript).messages().to_vec()
    }

    pub fn transcript_len(&self) -> usize {
        lock(&self.transcript).len()
    }

    /// Number of transcript messages from `sender`.
    pub fn count_from(&self, sender: Sender) -> usize {
        lock(&self.transcript).count_from(sender)
    }

    pub fn last_message(&self) -> Option<ChatMessage> {
        lock(&self.transcript).last().cloned()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a start as in flight; rolls the slot back to `Empty` unless the
/// session was activated (covers both backend errors and a dropped future).
struct StartGuard<'a> {
    slot: &'a Mutex<SessionSlot>,
    starting: &'a AtomicUsize,
    activated: bool,
}

impl<'a> StartGuard<'a> {
    fn new(slot: &'a Mutex<SessionSlot>, starting: &'a AtomicUsize) -> Self {
        starting.fetch_add(1, Ordering::SeqCst);
        Self {
            slot,
            starting,
            activated: false,
        }
    }

    fn activate(mut self, session: ChatSession) {
        *lock(self.slot) = SessionSlot::Active(session);
        self.activated = true;
    }
}

impl Drop for StartGuard<'_> {
    fn drop(&mut self) {
        if !self.activated {
            *lock(self.slot) = SessionSlot::Empty;
        }
        self.starting.fetch_sub(1, Ordering::SeqCst);
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
