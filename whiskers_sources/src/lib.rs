pub mod error;
pub mod http;
pub mod records;

pub use error::FetchError;
pub use http::{Endpoints, HttpContentApi};
pub use records::{CatFact, HistoricalEvent, TriviaQuestion};

use async_trait::async_trait;

/// Read-only access to the three public APIs the bot draws its lines from.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn cat_facts(&self) -> Result<Vec<CatFact>, FetchError>;
    async fn trivia_questions(&self) -> Result<Vec<TriviaQuestion>, FetchError>;

    // Events that happened on a given calendar day, any year.
    async fn events_on(&self, month: u32, day: u32) -> Result<Vec<HistoricalEvent>, FetchError>;
}
