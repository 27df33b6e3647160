use rand::seq::SliceRandom;
use rand::Rng;
use whiskers_sources::{ContentApi, HistoricalEvent};

use crate::links::DistractionLinks;
use crate::responder::BotReply;

pub const TERMINATION_FALLBACK: &str =
    "SESSION TERMINATED. Try again when the singularity occurs. Goodbye.";

/// Days stop at 28 so every month is valid.
pub fn pick_history_date<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    (rng.gen_range(1..=12), rng.gen_range(1..=28))
}

pub async fn termination_reply<R: Rng + Send + ?Sized>(
    api: &dyn ContentApi,
    links: &DistractionLinks,
    rng: &mut R,
) -> BotReply {
    let (month, day) = pick_history_date(rng);

    let events = match api.events_on(month, day).await {
        Ok(events) => events,
        Err(e) => {
            tracing::warn!(month, day, error = %e, "history fetch failed, using fallback");
            return BotReply::plain(TERMINATION_FALLBACK);
        }
    };

    let usable: Vec<&HistoricalEvent> = events
        .iter()
        .filter(|e| !e.description.trim().is_empty())
        .collect();

    let Some(event) = usable.choose(rng) else {
        tracing::warn!(month, day, "history response had no usable event, using fallback");
        return BotReply::plain(TERMINATION_FALLBACK);
    };

    BotReply::with_source(
        format!(
            "Session Terminated. Try again when {}.",
            event.description.trim()
        ),
        format!("The Year {}", event.year),
        links.pick(rng),
    )
}
