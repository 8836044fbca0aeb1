//! The send action: read the prompt, ask the chat service, show the answer.
//!
//! Front-ends implement [`ChatSurface`] and own a [`ChatTrigger`]. A send is
//! split into [`ChatTrigger::begin`] and [`ChatTrigger::complete`] so the
//! network call can run off the UI loop; [`ChatTrigger::send`] does both in
//! one go.

use tracing::{debug, info, warn};

use crate::chat::{answer_text, ChatRequest, ChatResponse};
use crate::chips::Chip;
use crate::client::ChatService;
use crate::error::ChatError;
use crate::state::TriggerState;

/// Shown in the display region while a request is in flight
pub const PENDING_INDICATOR: &str = "Thinking...";

/// The handles the trigger needs from whatever renders the chat
pub trait ChatSurface {
    /// Current text of the prompt input
    fn prompt(&self) -> String;
    /// Identifier of the selected language
    fn language(&self) -> String;
    /// Replace the display region's content
    fn show(&mut self, text: &str);
    /// Replace the prompt input's content
    fn set_prompt(&mut self, text: &str);
}

/// A request that has been announced on the surface but not yet answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChat {
    pub seq: u64,
    pub request: ChatRequest,
}

#[derive(Debug)]
pub enum Completion {
    Answered(ChatResponse),
    Failed(ChatError),
    /// A newer request was issued after this one; nothing was shown
    Stale,
}

#[derive(Debug, Default)]
pub struct ChatTrigger {
    last_seq: u64,
    state: TriggerState,
}

impl ChatTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Read the prompt and language and, if the prompt has text, show the
    /// pending indicator and hand back the request to send.
    ///
    /// Whitespace-only prompts leave the surface untouched.
    pub fn begin<S: ChatSurface + ?Sized>(&mut self, surface: &mut S) -> Option<PendingChat> {
        let request = ChatRequest::new(&surface.prompt(), &surface.language())?;

        self.last_seq += 1;
        let seq = self.last_seq;
        self.state = TriggerState::Pending(seq);
        surface.show(PENDING_INDICATOR);

        debug!(seq, lang = %request.lang, "chat request issued");
        Some(PendingChat { seq, request })
    }

    /// Apply the outcome of request `seq` to the surface, unless a later
    /// request has been issued since.
    pub fn complete<S: ChatSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        seq: u64,
        result: Result<ChatResponse, ChatError>,
    ) -> Completion {
        if seq != self.last_seq {
            debug!(seq, latest = self.last_seq, "dropping stale chat response");
            return Completion::Stale;
        }

        match result {
            Ok(response) => {
                surface.show(answer_text(&response));
                self.state = TriggerState::Resolved;
                info!(seq, kind = ?response.kind, "chat answered");
                Completion::Answered(response)
            }
            Err(err) => {
                surface.show(&err.to_string());
                self.state = TriggerState::Failed;
                warn!(seq, error = %err, "chat request failed");
                Completion::Failed(err)
            }
        }
    }

    /// Begin, await `service`, and complete. `None` when the prompt was empty
    /// and nothing was sent.
    pub async fn send<S, C>(&mut self, surface: &mut S, service: &C) -> Option<Completion>
    where
        S: ChatSurface + ?Sized,
        C: ChatService,
    {
        let pending = self.begin(surface)?;
        let result = service.send(&pending.request).await;
        Some(self.complete(surface, pending.seq, result))
    }

    /// Copy a chip's text into the prompt input. Never sends.
    pub fn activate_chip<S: ChatSurface + ?Sized>(surface: &mut S, chip: &Chip) {
        surface.set_prompt(&chip.text);
    }
}
