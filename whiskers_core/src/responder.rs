use rand::Rng;
use whiskers_sources::{CatFact, TriviaQuestion};

use crate::bank::ContentBank;
use crate::decode::decode_entities;
use crate::links::DistractionLinks;

pub const CAT_FACT_FALLBACK: &str = "My cat-fact-retriever is napping. Here's one: Cats are liquid.";
pub const TRIVIA_FALLBACK: &str =
    "My question-generator is on strike. Is a hotdog a sandwich? Debate.";
pub const CAT_FACT_SOURCE_LABEL: &str = "The Cat's Meow";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNote {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub text: String,
    pub source: Option<SourceNote>,
}

impl BotReply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    pub fn with_source(text: impl Into<String>, label: impl Into<String>, link: &str) -> Self {
        Self {
            text: text.into(),
            source: Some(SourceNote {
                label: label.into(),
                link: link.to_string(),
            }),
        }
    }
}

pub fn cat_fact_reply<R: Rng + ?Sized>(
    bank: &mut ContentBank<CatFact>,
    links: &DistractionLinks,
    rng: &mut R,
) -> BotReply {
    let Some(record) = bank.take() else {
        tracing::warn!(bank = bank.label(), "bank is empty, using fallback");
        return BotReply::plain(CAT_FACT_FALLBACK);
    };

    let fact = record.fact.trim();
    if fact.is_empty() {
        tracing::warn!(bank = bank.label(), "record had no displayable text, using fallback");
        return BotReply::plain(CAT_FACT_FALLBACK);
    }

    BotReply::with_source(fact, CAT_FACT_SOURCE_LABEL, links.pick(rng))
}

pub fn trivia_reply<R: Rng + ?Sized>(
    bank: &mut ContentBank<TriviaQuestion>,
    links: &DistractionLinks,
    rng: &mut R,
) -> BotReply {
    let Some(record) = bank.take() else {
        tracing::warn!(bank = bank.label(), "bank is empty, using fallback");
        return BotReply::plain(TRIVIA_FALLBACK);
    };

    let question = decode_entities(&record.question);
    if question.is_empty() {
        tracing::warn!(bank = bank.label(), "record had no displayable text, using fallback");
        return BotReply::plain(TRIVIA_FALLBACK);
    }

    BotReply::with_source(
        question,
        format!("Category: {}", record.category.trim()),
        links.pick(rng),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::DEFAULT_LINKS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cat_bank(facts: &[&str]) -> ContentBank<CatFact> {
        let mut bank = ContentBank::new("cat_facts");
        bank.replace(
            facts
                .iter()
                .map(|f| CatFact {
                    fact: f.to_string(),
                })
                .collect(),
        );
        bank
    }

    #[test]
    fn empty_cat_bank_uses_literal_fallback_without_source() {
        let mut bank = cat_bank(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        let reply = cat_fact_reply(&mut bank, &DistractionLinks::default(), &mut rng);
        assert_eq!(
            reply.text,
            "My cat-fact-retriever is napping. Here's one: Cats are liquid."
        );
        assert!(reply.source.is_none());
    }

    #[test]
    fn bank_of_n_serves_n_replies_then_falls_back() {
        let mut bank = cat_bank(&["one", "two", "three"]);
        let links = DistractionLinks::default();
        let mut rng = StdRng::seed_from_u64(2);

        let served: Vec<String> = (0..3)
            .map(|_| cat_fact_reply(&mut bank, &links, &mut rng).text)
            .collect();
        assert_eq!(served, vec!["three", "two", "one"]);

        let after = cat_fact_reply(&mut bank, &links, &mut rng);
        assert_eq!(after, BotReply::plain(CAT_FACT_FALLBACK));
    }

    #[test]
    fn cat_fact_carries_meow_source_and_known_link() {
        let mut bank = cat_bank(&["Cats have five toes on their front paws."]);
        let mut rng = StdRng::seed_from_u64(3);
        let reply = cat_fact_reply(&mut bank, &DistractionLinks::default(), &mut rng);
        let source = reply.source.expect("source note");
        assert_eq!(source.label, "The Cat's Meow");
        assert!(DEFAULT_LINKS.contains(&source.link.as_str()));
    }

    #[test]
    fn blank_fact_is_treated_as_exhaustion() {
        let mut bank = cat_bank(&["   "]);
        let mut rng = StdRng::seed_from_u64(4);
        let reply = cat_fact_reply(&mut bank, &DistractionLinks::default(), &mut rng);
        assert_eq!(reply, BotReply::plain(CAT_FACT_FALLBACK));
    }

    #[test]
    fn trivia_question_is_decoded_and_labelled_with_category() {
        let mut bank = ContentBank::new("trivia");
        bank.replace(vec![TriviaQuestion {
            question: "What is &quot;Pikachu&quot;&#039;s type?".to_string(),
            category: "Entertainment: Video Games".to_string(),
        }]);
        let mut rng = StdRng::seed_from_u64(5);

        let reply = trivia_reply(&mut bank, &DistractionLinks::default(), &mut rng);
        assert_eq!(reply.text, "What is \"Pikachu\"'s type?");
        assert_eq!(
            reply.source.map(|s| s.label),
            Some("Category: Entertainment: Video Games".to_string())
        );
    }

    #[test]
    fn empty_trivia_bank_uses_fallback() {
        let mut bank: ContentBank<TriviaQuestion> = ContentBank::new("trivia");
        let mut rng = StdRng::seed_from_u64(6);
        let reply = trivia_reply(&mut bank, &DistractionLinks::default(), &mut rng);
        assert_eq!(
            reply.text,
            "My question-generator is on strike. Is a hotdog a sandwich? Debate."
        );
        assert!(reply.source.is_none());
    }
}
