use crate::error::FetchError;
use crate::records::{CatFact, HistoricalEvent, TriviaQuestion};
use crate::ContentApi;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_CAT_FACTS_URL: &str = "https://catfact.ninja/facts";
const DEFAULT_TRIVIA_URL: &str = "https://opentdb.com/api.php";
const DEFAULT_HISTORY_BASE_URL: &str = "https://byabbe.se/on-this-day";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Endpoints {
    #[serde(default = "default_cat_facts_url")]
    pub cat_facts_url: String,
    #[serde(default = "default_trivia_url")]
    pub trivia_url: String,
    #[serde(default = "default_history_base_url")]
    pub history_base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_cat_facts_url() -> String {
    DEFAULT_CAT_FACTS_URL.to_string()
}

fn default_trivia_url() -> String {
    DEFAULT_TRIVIA_URL.to_string()
}

fn default_history_base_url() -> String {
    DEFAULT_HISTORY_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            cat_facts_url: default_cat_facts_url(),
            trivia_url: default_trivia_url(),
            history_base_url: default_history_base_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Endpoints {
    pub fn normalized(mut self) -> Self {
        self.cat_facts_url = clean_url(self.cat_facts_url, DEFAULT_CAT_FACTS_URL);
        self.trivia_url = clean_url(self.trivia_url, DEFAULT_TRIVIA_URL);
        self.history_base_url = clean_url(self.history_base_url, DEFAULT_HISTORY_BASE_URL);
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        self
    }

    pub fn history_url(&self, month: u32, day: u32) -> String {
        format!(
            "{}/{}/{}/events.json",
            self.history_base_url.trim_end_matches('/'),
            month,
            day
        )
    }
}

fn clean_url(url: String, fallback: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpContentApi {
    http_client: Client,
    endpoints: Endpoints,
    bank_size: usize,
}

#[derive(Debug, Deserialize)]
struct CatFactPage {
    #[serde(default)]
    data: Vec<CatFact>,
}

#[derive(Debug, Deserialize)]
struct TriviaPage {
    #[serde(default)]
    response_code: u32,
    #[serde(default)]
    results: Vec<TriviaQuestion>,
}

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    events: Vec<HistoricalEvent>,
}

impl HttpContentApi {
    pub fn new(endpoints: Endpoints, bank_size: usize) -> Result<Self, FetchError> {
        let endpoints = endpoints.normalized();
        let http_client = Client::builder()
            .timeout(Duration::from_secs(endpoints.request_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            endpoints,
            bank_size: bank_size.max(1),
        })
    }

    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self.http_client.get(url).query(query).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_error(&text),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn cat_facts(&self) -> Result<Vec<CatFact>, FetchError> {
        let text = self
            .get_text(
                &self.endpoints.cat_facts_url,
                &[("limit", self.bank_size.to_string())],
            )
            .await?;
        parse_cat_facts(&text)
    }

    async fn trivia_questions(&self) -> Result<Vec<TriviaQuestion>, FetchError> {
        let text = self
            .get_text(
                &self.endpoints.trivia_url,
                &[("amount", self.bank_size.to_string())],
            )
            .await?;
        parse_trivia(&text)
    }

    async fn events_on(&self, month: u32, day: u32) -> Result<Vec<HistoricalEvent>, FetchError> {
        let url = self.endpoints.history_url(month, day);
        let text = self.get_text(&url, &[]).await?;
        parse_events(&text)
    }
}

pub fn parse_cat_facts(text: &str) -> Result<Vec<CatFact>, FetchError> {
    let page: CatFactPage = serde_json::from_str(text)?;
    Ok(page.data)
}

pub fn parse_trivia(text: &str) -> Result<Vec<TriviaQuestion>, FetchError> {
    let page: TriviaPage = serde_json::from_str(text)?;
    // 0 = success; 1..=5 cover "no results", bad params, token trouble, rate limit.
    if page.response_code != 0 {
        return Err(FetchError::Upstream(format!(
            "trivia service returned response_code {}",
            page.response_code
        )));
    }
    Ok(page.results)
}

pub fn parse_events(text: &str) -> Result<Vec<HistoricalEvent>, FetchError> {
    let page: EventsPage = serde_json::from_str(text)?;
    Ok(page.events)
}

fn truncate_error(text: &str) -> String {
    const MAX: usize = 320;
    if text.len() > MAX {
        let mut end = MAX;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}
