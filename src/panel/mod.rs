use std::time::SystemTime;

use egui::Vec2;
use log::debug;

mod chrome;
mod drag;
mod geometry;
mod options;
mod resize;
mod session;

#[cfg(test)]
mod chrome_tests;
#[cfg(test)]
mod clamp_tests;

pub use geometry::Offset;
pub use options::AssistantPanelOptions;
pub use session::{DragSubject, ResizeDirection};

use crate::conversation::{
    AssistantMessage, InFlight, QueryContext, QueryRequest, QueryResponse, Role, SuggestedAction,
    Transcription, TranscriptionRequest,
};
use crate::host::AssistantHost;
use geometry::clamp_offset_for_size;
use session::{DragSession, ResizeSession};

/// High-level visual state of the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum VisualMode {
    /// Collapsed pill pinned flush with the bottom edge (`bottom = 0`).
    CollapsedDocked,
    /// Collapsed pill at a free-floating offset.
    CollapsedFloating,
    /// Open panel at a free-floating offset and size.
    OpenFloating,
}

impl VisualMode {
    pub fn is_open(self) -> bool {
        matches!(self, Self::OpenFloating)
    }

    pub fn is_docked(self) -> bool {
        matches!(self, Self::CollapsedDocked)
    }
}

/// One entry in the conversation log.
#[derive(Clone, Debug)]
pub struct ConversationEntry {
    pub id: u64,
    /// When the entry was appended, so host apps can render message times.
    pub created_at: SystemTime,
    pub message: AssistantMessage,
}

/// A floating, draggable, resizable assistant panel anchored to the
/// bottom-right of the viewport.
///
/// The panel owns its geometry (offset, size, visual mode) and the ephemeral
/// drag/resize sessions; the two controllers are its only writers and run
/// synchronously inside pointer-event handling, so there is no locking. The
/// conversation exchange is asynchronous relative to geometry: dragging and
/// resizing keep working while a request is outstanding.
///
/// Call [`Self::ui`] once per frame, or drive the controllers directly
/// (`begin_drag`/`drag_to`/`end_drag`, `begin_resize`/`resize_to`/
/// `end_resize`) for custom chrome.
#[derive(Debug)]
pub struct AssistantPanel {
    pub options: AssistantPanelOptions,

    mode: VisualMode,
    panel_size: Vec2,
    offset: Offset,
    /// Most recently settled offset while open; restored by [`Self::open`].
    /// In-memory only, for the lifetime of this value.
    last_open_offset: Offset,

    drag: Option<DragSession>,
    resize: Option<ResizeSession>,
    suppress_click: bool,

    conversation: Vec<ConversationEntry>,
    next_entry_id: u64,
    suggested: Vec<SuggestedAction>,
    input: String,
    error: Option<String>,
    pending_query: Option<InFlight<QueryResponse>>,
    pending_transcription: Option<InFlight<Transcription>>,
}

impl Default for AssistantPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantPanel {
    pub fn new() -> Self {
        Self::new_with_options(AssistantPanelOptions::default())
    }

    pub fn new_with_options(options: AssistantPanelOptions) -> Self {
        let offset = Offset::new(options.min_margin, 0.0);
        Self {
            panel_size: options.initial_panel_size,
            options,
            mode: VisualMode::CollapsedDocked,
            offset,
            last_open_offset: offset,
            drag: None,
            resize: None,
            suppress_click: false,
            conversation: Vec::new(),
            next_entry_id: 1,
            suggested: Vec::new(),
            input: String::new(),
            error: None,
            pending_query: None,
            pending_transcription: None,
        }
    }

    pub fn mode(&self) -> VisualMode {
        self.mode
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn panel_size(&self) -> Vec2 {
        self.panel_size
    }

    pub fn last_open_offset(&self) -> Offset {
        self.last_open_offset
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    pub fn conversation(&self) -> &[ConversationEntry] {
        &self.conversation
    }

    pub fn suggested_actions(&self) -> &[SuggestedAction] {
        &self.suggested
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A query is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_query.is_some()
    }

    /// A transcription is outstanding.
    pub fn is_transcribing(&self) -> bool {
        self.pending_transcription.is_some()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Open the panel from either collapsed state, restoring the last settled
    /// open offset clamped against the current viewport. No-op when already
    /// open.
    pub fn open(&mut self, viewport: Option<Vec2>) {
        if self.mode.is_open() {
            return;
        }
        self.mode = VisualMode::OpenFloating;
        self.offset = clamp_offset_for_size(
            self.last_open_offset,
            self.panel_size,
            self.options.open_min_bottom,
            self.options.min_margin,
            viewport,
        );
        self.last_open_offset = self.offset;
        debug!("assistant panel opened at {:?}", self.offset);
    }

    /// Collapse the open panel into the docked pill, remembering the current
    /// offset for the next [`Self::open`]. The conversation surface stays
    /// intact. No-op when not open.
    pub fn collapse(&mut self, viewport: Option<Vec2>) {
        if !self.mode.is_open() {
            return;
        }
        self.last_open_offset = self.offset;
        self.mode = VisualMode::CollapsedDocked;
        self.drag = None;
        self.resize = None;

        let bounds = clamp_offset_for_size(
            Offset::new(self.offset.right, 0.0),
            self.options.docked_collapsed_size,
            0.0,
            self.options.min_margin,
            viewport,
        );
        self.offset = Offset::new(bounds.right, 0.0);
        debug!("assistant panel collapsed, next open at {:?}", self.last_open_offset);
    }

    /// [`Self::collapse`] plus session teardown: cancels any in-flight
    /// request and clears the conversation log, suggested actions, input and
    /// error state. The chrome layer additionally resets voice capture, since
    /// it owns that handle.
    pub fn close(&mut self, viewport: Option<Vec2>) {
        self.collapse(viewport);
        self.cancel_pending_query();
        self.cancel_pending_transcription();
        self.conversation.clear();
        self.suggested.clear();
        self.input.clear();
        self.error = None;
        debug!("assistant panel closed");
    }

    /// Send `text` to the conversation service. Empty and whitespace-only
    /// messages are ignored. A still-outstanding query is cancelled first, so
    /// at most one is ever in flight.
    pub fn send_message(
        &mut self,
        text: impl Into<String>,
        host: &mut dyn AssistantHost,
        viewport: Option<Vec2>,
    ) {
        let text = text.into();
        let message = text.trim();
        if message.is_empty() {
            return;
        }

        self.cancel_pending_query();
        self.push_entry(AssistantMessage {
            role: Role::User,
            content: message.to_owned(),
        });
        self.error = None;

        let request = QueryRequest {
            message: message.to_owned(),
            context: QueryContext {
                route: host.current_route(),
                viewport,
            },
        };
        self.pending_query = Some(host.submit_message(request));
    }

    /// Send the current input buffer, clearing it on submit.
    pub fn submit_input(&mut self, host: &mut dyn AssistantHost, viewport: Option<Vec2>) {
        if self.input.trim().is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        self.send_message(text, host, viewport);
    }

    /// Poll outstanding requests. Returns `true` while something is still in
    /// flight (callers should request a repaint).
    pub fn poll(&mut self) -> bool {
        if let Some(result) = self.pending_query.as_mut().and_then(InFlight::try_take) {
            self.pending_query = None;
            match result {
                Ok(response) => {
                    self.push_entry(response.reply);
                    self.suggested = response.actions;
                }
                Err(err) => {
                    debug!("assistant query failed: {err}");
                    self.error = Some(err.to_string());
                }
            }
        }

        if let Some(result) = self
            .pending_transcription
            .as_mut()
            .and_then(InFlight::try_take)
        {
            self.pending_transcription = None;
            match result {
                Ok(transcription) => {
                    self.input = transcription.text;
                    self.error = None;
                }
                Err(err) => {
                    debug!("transcription failed: {err}");
                    self.error = Some(err.to_string());
                }
            }
        }

        self.pending_query.is_some() || self.pending_transcription.is_some()
    }

    /// Activate a suggested action: first offer it to the host, then fall
    /// back to opening the payload's link, if any.
    pub fn activate_action(&mut self, host: &mut dyn AssistantHost, action: &SuggestedAction) {
        if host.handle_action(&action.id, &action.payload) {
            return;
        }
        if let Some(href) = &action.payload.href {
            host.open_link(href);
        }
    }

    /// Toggle voice recording. Stopping a recording either fills the input
    /// from the capture layer's transcript or sends the captured audio to the
    /// transcription endpoint.
    pub fn toggle_voice(&mut self, host: &mut dyn AssistantHost) {
        let request = {
            let Some(voice) = host.voice_capture() else {
                self.error = Some("Voice capture is not available.".to_owned());
                return;
            };
            if !voice.is_supported() {
                self.error = Some("Voice capture is not supported here.".to_owned());
                return;
            }

            if voice.is_recording() {
                let result = voice.stop();
                if let Some(transcript) = result.transcript {
                    self.input = transcript;
                    return;
                }
                match result.audio {
                    Some(audio) => TranscriptionRequest {
                        audio_base64: audio.base64,
                        mime_type: audio.mime_type,
                        language: self.options.transcription_language.clone(),
                    },
                    None => return,
                }
            } else {
                self.error = None;
                voice.reset();
                voice.start();
                return;
            }
        };

        self.cancel_pending_transcription();
        self.pending_transcription = Some(host.transcribe(request));
    }

    /// Consume the one-shot click-suppression flag set by a drag release, so
    /// ending a drag on the collapsed pill does not also open the panel.
    pub fn take_suppressed_click(&mut self) -> bool {
        std::mem::take(&mut self.suppress_click)
    }

    fn push_entry(&mut self, message: AssistantMessage) {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        self.conversation.push(ConversationEntry {
            id,
            created_at: SystemTime::now(),
            message,
        });
    }

    fn cancel_pending_query(&mut self) {
        if let Some(pending) = self.pending_query.take() {
            pending.cancel();
        }
    }

    fn cancel_pending_transcription(&mut self) {
        if let Some(pending) = self.pending_transcription.take() {
            pending.cancel();
        }
    }
}
