use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use whiskers_sources::{CatFact, ContentApi, TriviaQuestion};

use crate::bank::ContentBank;
use crate::config::ChatSettings;
use crate::links::DistractionLinks;
use crate::responder::{cat_fact_reply, trivia_reply, SourceNote};
use crate::terminator::termination_reply;
use crate::turn::{Domain, SessionState, TurnController, TurnDecision};

pub const GREETING: &str =
    "Hi! I'm Whiskers. Ask me anything and I'll answer with something almost related.";

const INBOX_CAPACITY: usize = 16;
const EVENT_CAPACITY: usize = 64;

/// Everything the session tells the UI, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    BanksLoaded { cat_facts: usize, trivia: usize },
    TypingStarted,
    TypingStopped,
    Bot(String),
    Source(SourceNote),
    InputDisabled,
}

pub struct ChatSession {
    api: Arc<dyn ContentApi>,
    turns: TurnController,
    cat_facts: ContentBank<CatFact>,
    trivia: ContentBank<TriviaQuestion>,
    links: DistractionLinks,
    rng: StdRng,
    source_delay: Duration,
}

pub struct SessionHandle {
    pub inbox: mpsc::Sender<String>,
    pub events: mpsc::Receiver<ChatEvent>,
}

impl ChatSession {
    pub fn new(
        api: Arc<dyn ContentApi>,
        settings: &ChatSettings,
        links: DistractionLinks,
        mut rng: StdRng,
    ) -> Self {
        let turns = TurnController::new(&mut rng, settings.min_turns, settings.max_turns);
        tracing::debug!(turn_limit = turns.state().turn_limit, "session created");

        Self {
            api,
            turns,
            cat_facts: ContentBank::new("cat_facts"),
            trivia: ContentBank::new("trivia"),
            links,
            rng,
            source_delay: settings.source_delay(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.turns.state()
    }

    pub async fn preload(&mut self) -> (usize, usize) {
        let api = Arc::clone(&self.api);
        tokio::join!(
            self.cat_facts.load(api.cat_facts()),
            self.trivia.load(api.trivia_questions()),
        )
    }

    pub async fn handle_message(
        &mut self,
        message: &str,
        events: &mpsc::Sender<ChatEvent>,
    ) -> Option<TurnDecision> {
        let Some(decision) = self.turns.register_turn(&mut self.rng) else {
            tracing::warn!(chars = message.len(), "message ignored, session is terminated");
            return None;
        };
        tracing::info!(
            turn = self.turns.state().turn_count,
            ?decision,
            "user message accepted"
        );

        emit(events, ChatEvent::TypingStarted).await;
        if decision == TurnDecision::Terminate {
            // Lock the UI before the history fetch, which may take the whole
            // request timeout.
            emit(events, ChatEvent::InputDisabled).await;
        }

        let reply = match decision {
            TurnDecision::Respond(Domain::CatFact) => {
                cat_fact_reply(&mut self.cat_facts, &self.links, &mut self.rng)
            }
            TurnDecision::Respond(Domain::Trivia) => {
                trivia_reply(&mut self.trivia, &self.links, &mut self.rng)
            }
            TurnDecision::Terminate => {
                termination_reply(self.api.as_ref(), &self.links, &mut self.rng).await
            }
        };

        emit(events, ChatEvent::Bot(reply.text)).await;
        emit(events, ChatEvent::TypingStopped).await;

        if let Some(source) = reply.source {
            if !self.source_delay.is_zero() {
                tokio::time::sleep(self.source_delay).await;
            }
            emit(events, ChatEvent::Source(source)).await;
        }

        Some(decision)
    }

    pub fn spawn(self) -> SessionHandle {
        let (inbox_tx, mut inbox_rx) = mpsc::channel::<String>(INBOX_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(EVENT_CAPACITY);

        tokio::spawn(async move {
            let mut session = self;
            let (cat_facts, trivia) = session.preload().await;
            emit(&event_tx, ChatEvent::BanksLoaded { cat_facts, trivia }).await;

            while let Some(message) = inbox_rx.recv().await {
                session.handle_message(&message, &event_tx).await;
            }
            tracing::debug!("session inbox closed");
        });

        SessionHandle {
            inbox: inbox_tx,
            events: event_rx,
        }
    }
}

async fn emit(events: &mpsc::Sender<ChatEvent>, event: ChatEvent) {
    if events.send(event).await.is_err() {
        tracing::debug!("event receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;
    use whiskers_sources::{FetchError, HistoricalEvent};

    use crate::responder::{CAT_FACT_FALLBACK, TRIVIA_FALLBACK};
    use crate::terminator::TERMINATION_FALLBACK;

    #[derive(Default)]
    struct StubApi {
        cat_facts: Vec<&'static str>,
        trivia: Vec<(&'static str, &'static str)>,
        history_status: Option<u16>,
        history_calls: AtomicUsize,
        history_gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl ContentApi for StubApi {
        async fn cat_facts(&self) -> Result<Vec<CatFact>, FetchError> {
            Ok(self
                .cat_facts
                .iter()
                .map(|f| CatFact {
                    fact: f.to_string(),
                })
                .collect())
        }

        async fn trivia_questions(&self) -> Result<Vec<TriviaQuestion>, FetchError> {
            Ok(self
                .trivia
                .iter()
                .map(|(q, c)| TriviaQuestion {
                    question: q.to_string(),
                    category: c.to_string(),
                })
                .collect())
        }

        async fn events_on(
            &self,
            _month: u32,
            _day: u32,
        ) -> Result<Vec<HistoricalEvent>, FetchError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.history_gate {
                gate.notified().await;
            }
            if let Some(status) = self.history_status {
                return Err(FetchError::Status {
                    status,
                    body: String::new(),
                });
            }
            Ok(vec![HistoricalEvent {
                description: "the printing press is invented".to_string(),
                year: "1440".to_string(),
            }])
        }
    }

    fn settings(turns: u32) -> ChatSettings {
        ChatSettings {
            min_turns: turns,
            max_turns: turns,
            bank_size: 10,
            source_delay_ms: 0,
        }
    }

    fn session(api: Arc<StubApi>, turns: u32) -> ChatSession {
        ChatSession::new(
            api,
            &settings(turns),
            DistractionLinks::default(),
            StdRng::seed_from_u64(17),
        )
    }

    fn drain(rx: &mut mpsc::Receiver<ChatEvent>) -> Vec<ChatEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    fn bot_lines(events: &[ChatEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                ChatEvent::Bot(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn three_turn_session_terminates_on_third_message() {
        let api = Arc::new(StubApi {
            cat_facts: vec!["Cats sleep 16 hours a day."; 5],
            trivia: vec![("Is water wet?", "General Knowledge"); 5],
            ..StubApi::default()
        });
        let mut session = session(Arc::clone(&api), 3);
        assert_eq!(session.preload().await, (5, 5));
        let (tx, mut rx) = mpsc::channel(64);

        for _ in 0..2 {
            let decision = session.handle_message("hello", &tx).await;
            assert!(matches!(decision, Some(TurnDecision::Respond(_))));
        }
        let normal = drain(&mut rx);
        let lines = bot_lines(&normal);
        assert_eq!(lines.len(), 2);
        assert!(lines
            .iter()
            .all(|l| l == "Cats sleep 16 hours a day." || l == "Is water wet?"));
        assert_eq!(
            normal
                .iter()
                .filter(|e| matches!(e, ChatEvent::Source(_)))
                .count(),
            2
        );

        let decision = session.handle_message("and now?", &tx).await;
        assert_eq!(decision, Some(TurnDecision::Terminate));
        let closing = drain(&mut rx);
        assert_eq!(closing.len(), 5);
        assert_eq!(
            closing[..4],
            [
                ChatEvent::TypingStarted,
                ChatEvent::InputDisabled,
                ChatEvent::Bot(
                    "Session Terminated. Try again when the printing press is invented."
                        .to_string()
                ),
                ChatEvent::TypingStopped,
            ]
        );
        match &closing[4] {
            ChatEvent::Source(note) => assert_eq!(note.label, "The Year 1440"),
            other => panic!("expected source, got {:?}", other),
        }

        for _ in 0..3 {
            assert_eq!(session.handle_message("hello?", &tx).await, None);
        }
        assert!(drain(&mut rx).is_empty());
        assert_eq!(session.state().turn_count, 3);
        assert!(!session.state().input_enabled);
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_banks_fall_back_without_source() {
        let api = Arc::new(StubApi::default());
        let mut session = session(api, 10);
        assert_eq!(session.preload().await, (0, 0));
        let (tx, mut rx) = mpsc::channel(64);

        for _ in 0..4 {
            session.handle_message("tell me something", &tx).await;
        }
        let events = drain(&mut rx);
        assert!(events.iter().all(|e| !matches!(e, ChatEvent::Source(_))));
        for line in bot_lines(&events) {
            assert!(line == CAT_FACT_FALLBACK || line == TRIVIA_FALLBACK);
        }
    }

    #[tokio::test]
    async fn history_failure_still_disables_input() {
        let api = Arc::new(StubApi {
            history_status: Some(503),
            ..StubApi::default()
        });
        let mut session = session(api, 1);
        let (tx, mut rx) = mpsc::channel(64);

        assert_eq!(
            session.handle_message("bye", &tx).await,
            Some(TurnDecision::Terminate)
        );
        let events = drain(&mut rx);
        assert_eq!(
            events,
            vec![
                ChatEvent::TypingStarted,
                ChatEvent::InputDisabled,
                ChatEvent::Bot(TERMINATION_FALLBACK.to_string()),
                ChatEvent::TypingStopped,
            ]
        );
        assert!(!session.state().input_enabled);
    }

    #[tokio::test]
    async fn spawned_session_reports_banks_then_replies() {
        let api = Arc::new(StubApi {
            cat_facts: vec!["Cats have whiskers."],
            trivia: vec![("What is 2 + 2?", "Math")],
            ..StubApi::default()
        });
        let mut handle = session(api, 10).spawn();

        assert_eq!(
            handle.events.recv().await,
            Some(ChatEvent::BanksLoaded {
                cat_facts: 1,
                trivia: 1
            })
        );

        handle.inbox.send("hi".to_string()).await.unwrap();
        assert_eq!(handle.events.recv().await, Some(ChatEvent::TypingStarted));
        match handle.events.recv().await {
            Some(ChatEvent::Bot(text)) => {
                assert!(text == "Cats have whiskers." || text == "What is 2 + 2?")
            }
            other => panic!("expected bot line, got {:?}", other),
        }
        assert_eq!(handle.events.recv().await, Some(ChatEvent::TypingStopped));
        assert!(matches!(
            handle.events.recv().await,
            Some(ChatEvent::Source(_))
        ));
    }

    #[tokio::test]
    async fn input_is_disabled_while_history_is_still_loading() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(StubApi {
            history_gate: Some(Arc::clone(&gate)),
            ..StubApi::default()
        });
        let mut handle = session(api, 1).spawn();
        assert!(matches!(
            handle.events.recv().await,
            Some(ChatEvent::BanksLoaded { .. })
        ));

        handle.inbox.send("bye".to_string()).await.unwrap();
        assert_eq!(handle.events.recv().await, Some(ChatEvent::TypingStarted));
        assert_eq!(handle.events.recv().await, Some(ChatEvent::InputDisabled));
        tokio::task::yield_now().await;
        assert!(handle.events.try_recv().is_err());

        gate.notify_one();
        assert_eq!(
            handle.events.recv().await,
            Some(ChatEvent::Bot(
                "Session Terminated. Try again when the printing press is invented.".to_string()
            ))
        );
        assert_eq!(handle.events.recv().await, Some(ChatEvent::TypingStopped));
    }
}
