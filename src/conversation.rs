//! Boundary types for the conversation/transcription exchange.
//!
//! The panel never blocks on the remote service: [`crate::AssistantHost`]
//! implementations hand back an [`InFlight`] handle, the panel polls it once
//! per frame, and starting a new request (or closing the panel) cancels the
//! previous one through a shared [`CancellationToken`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

use egui::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug)]
pub struct AssistantMessage {
    pub role: Role,
    pub content: String,
}

/// Where the user currently is, forwarded with every query.
#[derive(Clone, Debug, Default)]
pub struct QueryContext {
    pub route: Option<String>,
    pub viewport: Option<Vec2>,
}

#[derive(Clone, Debug)]
pub struct QueryRequest {
    pub message: String,
    pub context: QueryContext,
}

/// Payload attached to a suggested action.
///
/// `href` is the navigation fallback: an action nobody handles opens it in a
/// new browsing context (see [`crate::AssistantHost::open_link`]).
#[derive(Clone, Debug, Default)]
pub struct ActionPayload {
    pub href: Option<String>,
    pub fields: BTreeMap<String, String>,
}

/// A follow-up the assistant offers alongside a reply.
#[derive(Clone, Debug)]
pub struct SuggestedAction {
    pub id: String,
    pub label: String,
    pub payload: ActionPayload,
}

#[derive(Clone, Debug)]
pub struct QueryResponse {
    pub reply: AssistantMessage,
    pub actions: Vec<SuggestedAction>,
}

#[derive(Clone, Debug)]
pub struct TranscriptionRequest {
    pub audio_base64: String,
    pub mime_type: String,
    pub language: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Transcription {
    pub text: String,
}

/// Why a request produced no usable reply.
///
/// All variants are recoverable: the panel shows the message and stays open;
/// a new user action simply supersedes the failed one.
#[derive(Debug)]
pub enum ConversationError {
    /// The service rejected the request or the transport failed. The string
    /// is shown to the user as-is.
    Service(String),
    Cancelled,
    /// The service dropped the reply channel without answering.
    Disconnected,
}

impl std::fmt::Display for ConversationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(message) => write!(f, "{message}"),
            Self::Cancelled => write!(f, "the request was cancelled"),
            Self::Disconnected => write!(f, "the assistant service went away"),
        }
    }
}

impl std::error::Error for ConversationError {}

/// Shared cancellation flag between the panel and a service implementation.
///
/// Cooperative: flipping it does not interrupt anything by itself, but a
/// well-behaved service checks it before doing more work, and late replies to
/// a cancelled request are discarded.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Resolving end of an in-flight request, held by the service.
#[derive(Debug)]
pub struct ReplySender<T> {
    tx: Sender<Result<T, ConversationError>>,
    cancel: CancellationToken,
}

impl<T> ReplySender<T> {
    /// Deliver the result. Dropped silently when the request was cancelled
    /// or the panel stopped listening.
    pub fn send(self, result: Result<T, ConversationError>) {
        if !self.cancel.is_cancelled() {
            let _ = self.tx.send(result);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token a background worker can poll to abort early.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Receiving end of an in-flight request, held and polled by the panel.
///
/// Dropping the handle cancels the request.
#[derive(Debug)]
pub struct InFlight<T> {
    rx: Receiver<Result<T, ConversationError>>,
    cancel: CancellationToken,
}

impl<T> InFlight<T> {
    /// A connected sender/receiver pair for one request.
    pub fn channel() -> (ReplySender<T>, Self) {
        let (tx, rx) = channel();
        let cancel = CancellationToken::default();
        (
            ReplySender {
                tx,
                cancel: cancel.clone(),
            },
            Self { rx, cancel },
        )
    }

    /// A handle that resolves immediately. Useful for synchronous services
    /// and tests.
    pub fn ready(result: Result<T, ConversationError>) -> Self {
        let (tx, in_flight) = Self::channel();
        tx.send(result);
        in_flight
    }

    /// Non-blocking poll. `None` while the reply is still pending.
    pub fn try_take(&mut self) -> Option<Result<T, ConversationError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ConversationError::Disconnected)),
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
