use ahash::HashMap;

use crate::conversation::ActionPayload;

type ActionHandler = Box<dyn FnMut(&ActionPayload) -> bool>;

/// Convenience helper: a closure-backed map from action identifier to
/// handler, for [`crate::AssistantHost::handle_action`] implementations.
///
/// A handler returns `true` when it consumed the action; `false` falls
/// through to the link-opening fallback.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `id`, replacing any previous handler.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        handler: impl FnMut(&ActionPayload) -> bool + 'static,
    ) {
        self.handlers.insert(id.into(), Box::new(handler));
    }

    /// Run the handler registered for `id`. Returns `false` for unknown ids
    /// and for handlers that declined the action.
    pub fn dispatch(&mut self, id: &str, payload: &ActionPayload) -> bool {
        match self.handlers.get_mut(id) {
            Some(handler) => handler(payload),
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
