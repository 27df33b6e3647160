use ratatui::layout::Rect;
use std::path::PathBuf;
use tokio::sync::mpsc;
use whiskers_core::{session::GREETING, ChatEvent, Config, Role, SessionHandle, Transcript};

use crate::theme::Theme;

pub const DISABLED_PLACEHOLDER: &str = "Session terminated. Try again later.";

const MAX_LOG_LINES: usize = 500;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Input,
    Terminated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusArea {
    Input,
    FooterButtons,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FooterAction {
    Submit,
    ClearInput,
    ToggleLogs,
    Quit,
}

#[derive(Clone, Debug)]
pub struct FooterButton {
    pub rect: Rect,
    pub action: FooterAction,
}

pub struct App {
    pub state: AppState,
    pub input: String,
    pub input_cursor: usize,
    pub transcript: Transcript,
    pub inbox: mpsc::Sender<String>,
    pub events: mpsc::Receiver<ChatEvent>,
    pub banks: Option<(usize, usize)>,
    pub sent_count: usize,
    pub logs: Vec<String>,
    pub tick_count: u64,
    pub show_logs: bool,
    pub config: Config,
    pub theme: Theme,
    pub log_path: Option<PathBuf>,
    pub focus: FocusArea,
    pub footer_buttons: Vec<FooterButton>,
    pub footer_focus: usize,
    pub output_scroll: u16,
    pub output_max_scroll: u16,
    pub output_scrollbar_rect: Option<Rect>,
    pub input_rect: Option<Rect>,
    pub dirty: bool,
}

impl App {
    pub fn new(config: Config, handle: SessionHandle, log_path: Option<PathBuf>) -> Self {
        let theme = Theme::from_config(&config.theme);
        let mut app = Self {
            state: AppState::Input,
            input: String::new(),
            input_cursor: 0,
            transcript: Transcript::new(),
            inbox: handle.inbox,
            events: handle.events,
            banks: None,
            sent_count: 0,
            logs: Vec::new(),
            tick_count: 0,
            show_logs: false,
            config,
            theme,
            log_path,
            focus: FocusArea::Input,
            footer_buttons: Vec::new(),
            footer_focus: 0,
            output_scroll: 0,
            output_max_scroll: 0,
            output_scrollbar_rect: None,
            input_rect: None,
            dirty: true,
        };
        app.transcript.push_text(Role::Bot, GREETING);
        app.push_log("Whiskers initialized. Loading content banks...");
        if let Some(path) = app.log_path.clone() {
            app.push_log(format!("Session log file: {}", path.display()));
        }
        app.follow_latest();
        app
    }

    pub fn input_enabled(&self) -> bool {
        self.state == AppState::Input
    }

    /// Returns true when a message was handed to the session.
    pub fn submit(&mut self) -> bool {
        if !self.input_enabled() {
            return false;
        }
        let message = self.input.trim().to_string();
        if message.is_empty() {
            return false;
        }

        let chars = message.chars().count();
        if let Err(e) = self.inbox.try_send(message.clone()) {
            // Input stays put so the user can retry.
            self.push_log(format!("Message could not reach the session: {}", e));
            self.dirty = true;
            return false;
        }

        self.sent_count += 1;
        self.push_log(format!("Message submitted ({} chars)", chars));
        self.transcript.push_text(Role::User, message);
        // Covers the wait while the banks are still preloading.
        self.transcript.show_typing();
        self.input.clear();
        self.input_cursor = 0;
        self.dirty = true;
        self.sync_scroll();
        true
    }

    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match &event {
                ChatEvent::BanksLoaded { cat_facts, trivia } => {
                    self.banks = Some((*cat_facts, *trivia));
                    self.push_log(format!(
                        "Content banks loaded: {} cat facts, {} trivia questions",
                        cat_facts, trivia
                    ));
                }
                ChatEvent::InputDisabled => {
                    self.state = AppState::Terminated;
                    self.input.clear();
                    self.input_cursor = 0;
                    self.focus = FocusArea::FooterButtons;
                    self.footer_focus = 0;
                    self.push_log("Session terminated. Input disabled.");
                }
                ChatEvent::Source(note) => {
                    self.push_log(format!("Source attached: {} -> {}", note.label, note.link));
                }
                _ => {}
            }
            self.transcript.apply(&event);
            self.dirty = true;
        }
        self.sync_scroll();
    }

    pub fn is_waiting_for_reply(&self) -> bool {
        self.transcript.is_typing()
    }

    pub fn push_log<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        tracing::info!(target: "whiskers_tui", "{}", message);
        self.logs.push(message);
        if self.logs.len() > MAX_LOG_LINES {
            let overflow = self.logs.len() - MAX_LOG_LINES;
            self.logs.drain(0..overflow);
        }
    }

    fn sync_scroll(&mut self) {
        if self.transcript.take_scroll_request() {
            self.follow_latest();
        }
    }

    pub fn follow_latest(&mut self) {
        if !self.show_logs {
            self.output_scroll = u16::MAX;
        }
        self.dirty = true;
    }
}
