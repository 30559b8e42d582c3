use crate::conversation::{
    ActionPayload, ConversationError, InFlight, QueryRequest, QueryResponse, Transcription,
    TranscriptionRequest,
};
use crate::voice::VoiceCapture;

/// Everything the panel needs from its surroundings, passed into
/// [`crate::AssistantPanel::ui`] once per frame.
///
/// Only [`Self::submit_message`] is required. Implementations typically hand
/// the request to a background thread or async runtime and resolve the
/// returned handle when the reply arrives; the panel keeps polling it and
/// never blocks the UI thread.
pub trait AssistantHost {
    /// Start answering `request`. At most one query is in flight at a time:
    /// the panel cancels the previous handle before calling this again.
    fn submit_message(&mut self, request: QueryRequest) -> InFlight<QueryResponse>;

    /// Transcribe captured audio. The default rejects the request with a
    /// user-visible message.
    fn transcribe(&mut self, request: TranscriptionRequest) -> InFlight<Transcription> {
        let _ = request;
        InFlight::ready(Err(ConversationError::Service(
            "Transcription is not available.".to_owned(),
        )))
    }

    /// Recording capability, if the app has one.
    fn voice_capture(&mut self) -> Option<&mut dyn VoiceCapture> {
        None
    }

    /// Route identifier included in the query context.
    fn current_route(&self) -> Option<String> {
        None
    }

    /// Handle an activated suggested action. Return `true` when handled.
    ///
    /// [`crate::ActionRegistry`] is a ready-made closure-backed implementation
    /// to delegate to.
    fn handle_action(&mut self, id: &str, payload: &ActionPayload) -> bool {
        let _ = (id, payload);
        false
    }

    /// Fallback for unhandled actions whose payload carries a link: open it
    /// in a new browsing context.
    fn open_link(&mut self, href: &str) {
        let _ = href;
    }
}
