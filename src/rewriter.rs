//! Turns a conversational chat message into a search engine query
//!
//! Strips French/English request framing, then translates common French
//! query words to English, which gets better results from the search APIs.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

/// Queries shorter than this (in characters) are considered over-stripped
const MIN_QUERY_CHARS: usize = 3;

lazy_static! {
    static ref REQUEST_PREFIX_RE: Regex = Regex::new(
        r"(?i)^(?:peux-tu|pourrais-tu|essaie de|can you|could you|try to|please|fais|fait|vas|va)\b\s*"
    )
    .unwrap();
    static ref SEARCH_VERB_RE: Regex = Regex::new(
        r"(?i)^(?:chercher|cherche|rechercher|recherche|trouver|trouve|google|search|look up|find)\b\s*"
    )
    .unwrap();
    static ref MEDIUM_RE: Regex = Regex::new(
        r"(?i)\s*\b(?:sur|on|via|dans)\s+(?:internet|le web|le net|google|the web|the net|the internet)\b"
    )
    .unwrap();
    static ref QUESTION_RE: Regex = Regex::new(
        r"(?i)^(?:qu['’]est-ce que c['’]est|c['’]est quoi|what is|who is)\b\s*"
    )
    .unwrap();
    static ref INFO_REQUEST_RE: Regex = Regex::new(
        r"(?i)^(?:quelles? sont|donne-moi|parle-moi de|dis-moi|tell me about|give me)\b\s*"
    )
    .unwrap();
    static ref ARTICLE_RE: Regex =
        Regex::new(r"(?i)^(?:(?:les|le|la|une|un|des)\s+|l['’])").unwrap();
    static ref FALLBACK_PREFIX_RE: Regex =
        Regex::new(r"(?i)^(?:vas|va|cherche|recherche|trouve|search|find|look up)\b\s*").unwrap();
    static ref FALLBACK_MEDIUM_RE: Regex = Regex::new(r"(?i)(?:sur|on the) internet").unwrap();
    static ref TRANSLATIONS: Vec<(Regex, &'static str)> = TRANSLATION_TABLE
        .iter()
        .map(|(fr, en)| (translation_pattern(fr), *en))
        .collect();
}

/// French to English substitutions, applied in this order.
///
/// Each entry runs over the output of the previous ones, so an entry can
/// match text an earlier one produced or consumed ("nom" fires before
/// "prénom" and leaves "préname meaning"). Keep the order stable.
const TRANSLATION_TABLE: &[(&str, &str)] = &[
    ("dernières nouvelles", "latest news"),
    ("dernières", "latest"),
    ("nouvelles", "news"),
    ("nouveautés", "latest updates"),
    ("actualités", "current news"),
    ("actualité", "news"),
    ("aujourd'hui", "today"),
    ("cette semaine", "this week"),
    ("ce mois", "this month"),
    ("janvier", "January"),
    ("février", "February"),
    ("mars", "March"),
    ("avril", "April"),
    ("mai", "May"),
    ("juin", "June"),
    ("juillet", "July"),
    ("août", "August"),
    ("septembre", "September"),
    ("octobre", "October"),
    ("novembre", "November"),
    ("décembre", "December"),
    ("météo", "weather forecast"),
    ("prix de", "price of"),
    ("comment", "how to"),
    ("pourquoi", "why"),
    ("quand", "when"),
    ("qui est", "who is"),
    ("qu'est-ce que", "what is"),
    ("nom", "name meaning"),
    ("prénom", "first name meaning"),
];

fn translation_pattern(fr: &str) -> Regex {
    let escaped = regex::escape(fr).replace('\'', "['’]");
    Regex::new(&format!("(?i){escaped}")).unwrap()
}

/// Extract an effective search query from a user message.
///
/// Never fails. For input that is non-empty after trimming the result is
/// never empty: worst case it is the trimmed original message.
pub fn extract_search_query(message: &str) -> String {
    let stripped = strip_framing(message);
    let query = translate(&stripped);

    if query.chars().count() >= MIN_QUERY_CHARS {
        return query;
    }

    let fallback = minimal_strip(message);
    if fallback.is_empty() {
        message.trim().to_string()
    } else {
        fallback
    }
}

/// Steps 1 to 7: remove request framing, keep the subject
fn strip_framing(message: &str) -> String {
    let query = REQUEST_PREFIX_RE.replace(message, "");
    let query = SEARCH_VERB_RE.replace(&query, "");
    let query = MEDIUM_RE.replace_all(&query, "");
    let query = QUESTION_RE.replace(query.trim_start(), "");
    let query = INFO_REQUEST_RE.replace(&query, "");
    let query = ARTICLE_RE.replace(&query, "");
    query.trim().to_string()
}

/// Sequential French to English substitution over the evolving string
fn translate(query: &str) -> String {
    TRANSLATIONS
        .iter()
        .fold(query.to_string(), |acc, (pattern, english)| {
            pattern.replace_all(&acc, NoExpand(english)).into_owned()
        })
}

fn minimal_strip(message: &str) -> String {
    let query = FALLBACK_PREFIX_RE.replace(message, "");
    let query = FALLBACK_MEDIUM_RE.replace_all(&query, "");
    query.trim().to_string()
}
