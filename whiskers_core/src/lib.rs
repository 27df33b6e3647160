pub use bank::ContentBank;
pub use config::{ChatSettings, Config};
pub use links::DistractionLinks;
pub use responder::{BotReply, SourceNote};
pub use session::{ChatEvent, ChatSession, SessionHandle};
pub use transcript::{Role, Transcript, TranscriptEntry};
pub use turn::{Domain, Phase, SessionState, TurnController, TurnDecision};

pub mod bank;
pub mod config;
pub mod decode;
pub mod links;
pub mod responder;
pub mod session;
pub mod terminator;
pub mod transcript;
pub mod turn;
