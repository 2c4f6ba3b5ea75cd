//! Decides whether a chat message warrants a web search
//!
//! Matching is plain substring search over the lower-cased message, so a
//! trigger also fires inside unrelated words ("web" in "cobweb"). A false
//! positive only costs one extra search call.

/// Explicit requests for information from the web
const INTENT_TRIGGERS: &[&str] = &[
    "cherche",
    "recherche",
    "trouve",
    "google",
    "internet",
    "web",
    "actualités",
    "nouvelles",
    "search",
    "look up",
    "find out",
    "qu'est-ce que c'est",
    "c'est quoi",
    "who is",
    "what is",
    "météo",
    "weather",
    "prix de",
    "price of",
    "cost of",
    "dernières nouvelles",
    "latest news",
];

/// References to recent events
const RECENCY_TRIGGERS: &[&str] = &[
    "aujourd'hui",
    "cette semaine",
    "ce mois",
    "récemment",
    "actuellement",
    "en ce moment",
    "today",
    "this week",
    "this month",
    "recently",
    "currently",
    "right now",
    "2024",
    "2025",
    "2026",
];

/// Returns true if the message contains any search trigger
pub fn should_search(message: &str) -> bool {
    matched_trigger(message).is_some()
}

/// First trigger found in the message, intent triggers checked before recency ones
pub fn matched_trigger(message: &str) -> Option<&'static str> {
    let lower = message.to_lowercase().replace('’', "'");

    INTENT_TRIGGERS
        .iter()
        .chain(RECENCY_TRIGGERS.iter())
        .find(|trigger| lower.contains(*trigger))
        .copied()
}
