//! Voice capture boundary.
//!
//! The panel treats recording as an opaque capability: it only toggles it and
//! consumes the result. If the capture produced a transcript the panel uses
//! it directly; otherwise the captured audio goes to the transcription
//! endpoint (see [`crate::AssistantHost::transcribe`]).

/// A recording capability the host app may provide.
pub trait VoiceCapture {
    fn is_supported(&self) -> bool;

    fn is_recording(&self) -> bool;

    /// Begin recording. A no-op when unsupported or already recording.
    fn start(&mut self);

    /// Stop recording and hand back whatever was captured.
    fn stop(&mut self) -> VoiceCaptureResult;

    /// Discard any partial capture state.
    fn reset(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct VoiceCaptureResult {
    /// A transcript produced by the capture layer itself (e.g. an on-device
    /// recognizer). Takes precedence over `audio`.
    pub transcript: Option<String>,
    /// Raw captured audio for server-side transcription.
    pub audio: Option<CapturedAudio>,
}

#[derive(Clone, Debug)]
pub struct CapturedAudio {
    pub base64: String,
    pub mime_type: String,
}
