use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatFact {
    pub fact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriviaQuestion {
    pub question: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "year_as_text")]
    pub year: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Text(String),
    Number(i64),
}

// The history service sends years as strings, but "BC" years and older dumps
// have shown up as bare numbers.
fn year_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match YearRepr::deserialize(deserializer)? {
        YearRepr::Text(text) => text.trim().to_string(),
        YearRepr::Number(n) => n.to_string(),
    })
}
