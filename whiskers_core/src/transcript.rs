use chrono::{DateTime, Local};

use crate::decode::decode_entities;
use crate::session::ChatEvent;

pub const TYPING_PLACEHOLDER: &str = "Processing...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
    Source,
}

#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
    pub link: Option<String>,
    pub at: DateTime<Local>,
}

#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    typing: bool,
    scroll_pending: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, role: Role, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            role,
            text: text.into(),
            link: None,
            at: Local::now(),
        });
        self.scroll_pending = true;
    }

    pub fn push_source(&mut self, label: &str, link: &str) {
        self.entries.push(TranscriptEntry {
            role: Role::Source,
            text: format!("Source: {}", decode_entities(label)),
            link: Some(link.to_string()),
            at: Local::now(),
        });
        self.scroll_pending = true;
    }

    /// Returns false when the placeholder was already showing.
    pub fn show_typing(&mut self) -> bool {
        if self.typing {
            return false;
        }
        self.typing = true;
        self.scroll_pending = true;
        true
    }

    pub fn hide_typing(&mut self) -> bool {
        std::mem::replace(&mut self.typing, false)
    }

    pub fn apply(&mut self, event: &ChatEvent) -> bool {
        match event {
            ChatEvent::TypingStarted => self.show_typing(),
            ChatEvent::TypingStopped => self.hide_typing(),
            ChatEvent::Bot(text) => {
                self.push_text(Role::Bot, text.clone());
                true
            }
            ChatEvent::Source(note) => {
                self.push_source(&note.label, &note.link);
                true
            }
            ChatEvent::BanksLoaded { .. } | ChatEvent::InputDisabled => false,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::replace(&mut self.scroll_pending, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::SourceNote;

    #[test]
    fn typing_placeholder_is_idempotent() {
        let mut transcript = Transcript::new();
        assert!(transcript.show_typing());
        assert!(!transcript.show_typing());
        assert!(transcript.is_typing());

        assert!(transcript.hide_typing());
        assert!(!transcript.hide_typing());
        assert!(!transcript.is_typing());
    }

    #[test]
    fn every_append_requests_scroll() {
        let mut transcript = Transcript::new();
        assert!(!transcript.take_scroll_request());

        transcript.push_text(Role::User, "hi");
        assert!(transcript.take_scroll_request());
        assert!(!transcript.take_scroll_request());

        transcript.push_source("The Cat&#039;s Meow", "https://cat-bounce.com/");
        assert!(transcript.take_scroll_request());
    }

    #[test]
    fn source_label_is_decoded_and_prefixed() {
        let mut transcript = Transcript::new();
        transcript.push_source("Category: Science &amp; Nature", "https://puginarug.com/");
        let entry = &transcript.entries()[0];
        assert_eq!(entry.role, Role::Source);
        assert_eq!(entry.text, "Source: Category: Science & Nature");
        assert_eq!(entry.link.as_deref(), Some("https://puginarug.com/"));
    }

    #[test]
    fn apply_routes_session_events() {
        let mut transcript = Transcript::new();
        assert!(transcript.apply(&ChatEvent::TypingStarted));
        assert!(transcript.apply(&ChatEvent::Bot("A fact.".to_string())));
        assert!(transcript.apply(&ChatEvent::TypingStopped));
        assert!(transcript.apply(&ChatEvent::Source(SourceNote {
            label: "The Cat's Meow".to_string(),
            link: "https://cat-bounce.com/".to_string(),
        })));
        assert!(!transcript.apply(&ChatEvent::InputDisabled));

        let roles: Vec<Role> = transcript.entries().iter().map(|e| e.role).collect();
        assert_eq!(roles, vec![Role::Bot, Role::Source]);
        assert!(!transcript.is_typing());
    }
}
