use medxpert_core::{
    ChatClient, ChatError, ChatResponse, ChatService, ChatSurface, ChatTrigger, Chip, Completion,
    Config, Language,
};
use ratatui::layout::Rect;
use tracing::{debug, warn};
use crate::tui::{AppEvent, EventSender};

/// The widgets the chat trigger reads from and writes to
#[derive(Debug, Default)]
pub struct ChatView {
    pub prompt_input: String,
    pub prompt_cursor: usize, // cursor position in prompt_input, in chars
    pub language: Language,
    pub display: String,
    pub display_scroll: u16,
}

impl ChatSurface for ChatView {
    fn prompt(&self) -> String {
        self.prompt_input.clone()
    }

    fn language(&self) -> String {
        self.language.as_str().to_string()
    }

    fn show(&mut self, text: &str) {
        self.display = text.to_string();
        self.display_scroll = 0;
    }

    fn set_prompt(&mut self, text: &str) {
        self.prompt_input = text.to_string();
        self.prompt_cursor = self.prompt_input.chars().count();
    }
}

pub struct App {
    pub should_quit: bool,
    pub view: ChatView,
    pub trigger: ChatTrigger,

    /// Last answered response, for its type tag and details
    pub last_response: Option<ChatResponse>,
    pub chips: Vec<Chip>,
    pub client: ChatClient,
    pub events: EventSender,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Answer panel area for mouse hit-testing (updated during render)
    pub answer_area: Option<Rect>,
}

impl App {
    pub fn new(config: &Config, client: ChatClient, language: Language, events: EventSender) -> Self {
        Self {
            should_quit: false,
            view: ChatView {
                language,
                ..Default::default()
            },
            trigger: ChatTrigger::new(),
            last_response: None,
            chips: config.chips(),
            client,
            events,
            animation_frame: 0,
            answer_area: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.trigger.state().is_pending()
    }

    /// Send the current prompt. The request runs on its own task and reports
    /// back with [`AppEvent::ChatDone`]; an earlier request still in flight is
    /// left to finish and is dropped as stale.
    pub fn submit(&mut self) {
        let Some(pending) = self.trigger.begin(&mut self.view) else {
            return;
        };

        self.last_response = None;
        self.animation_frame = 0;

        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.send(&pending.request).await;
            let _ = events.send(AppEvent::ChatDone {
                seq: pending.seq,
                result,
            });
        });
    }

    pub fn finish(&mut self, seq: u64, result: Result<ChatResponse, ChatError>) {
        if let Completion::Answered(response) = self.trigger.complete(&mut self.view, seq, result) {
            self.last_response = Some(response);
        }
    }

    pub fn activate_chip(&mut self, index: usize) {
        if let Some(chip) = self.chips.get(index) {
            debug!(label = %chip.label, "chip activated");
            ChatTrigger::activate_chip(&mut self.view, chip);
        }
    }

    pub fn cycle_language(&mut self) {
        self.view.language = self.view.language.next();
        if let Err(e) = Config::save_default_lang(self.view.language) {
            warn!(error = %e, "could not save language");
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_answer_down(&mut self, lines: u16) {
        self.view.display_scroll = self.view.display_scroll.saturating_add(lines);
    }

    pub fn scroll_answer_up(&mut self, lines: u16) {
        self.view.display_scroll = self.view.display_scroll.saturating_sub(lines);
    }
}
