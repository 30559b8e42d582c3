#![forbid(unsafe_code)]

//! Floating assistant panel for egui: single-pointer drag, 8-direction
//! edge/corner resize, and bottom-edge docking, anchored to the viewport's
//! bottom-right corner.

pub mod actions;
pub mod conversation;
pub mod host;
pub mod panel;
pub mod voice;

pub use actions::ActionRegistry;
pub use conversation::{
    ActionPayload, AssistantMessage, CancellationToken, ConversationError, InFlight, QueryContext,
    QueryRequest, QueryResponse, ReplySender, Role, SuggestedAction, Transcription,
    TranscriptionRequest,
};
pub use host::AssistantHost;
pub use panel::{
    AssistantPanel, AssistantPanelOptions, ConversationEntry, DragSubject, Offset,
    ResizeDirection, VisualMode,
};
pub use voice::{CapturedAudio, VoiceCapture, VoiceCaptureResult};
