//! Renders search results as a text block for the model prompt

use crate::types::SearchResponse;

/// Returned when there is nothing to render
pub const NO_RESULTS: &str = "No results found for this search.";

pub const RESULTS_END_MARKER: &str = "[END OF RESULTS]";

/// Format a search response for inclusion in a language-model prompt.
///
/// Pure: the same response always renders to the same text, results in order.
pub fn format_search_results_for_prompt(response: &SearchResponse) -> String {
    if !response.success || response.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut out = format!(
        "[WEB SEARCH RESULTS - {}]\nQuery: \"{}\"\n\n",
        response.source, response.query
    );

    for (i, result) in response.results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n   {}\n", i + 1, result.title, result.snippet));
        if !result.url.is_empty() {
            out.push_str(&format!("   Source: {}\n", result.url));
        }
        out.push('\n');
    }

    out.push_str(RESULTS_END_MARKER);
    out.push('\n');
    out.push_str("Use this information to answer the question.\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchResult;

    #[test]
    fn test_renders_exact_layout() {
        let response = SearchResponse::new(
            "rust",
            vec![
                SearchResult::new("Synthesized answer", "Rust is a language.", ""),
                SearchResult::new("Rust", "Fast and safe", "https://www.rust-lang.org/"),
            ],
            "Tavily AI",
        );

        let expected = "[WEB SEARCH RESULTS - Tavily AI]\n\
                        Query: \"rust\"\n\
                        \n\
                        1. Synthesized answer\n   Rust is a language.\n\
                        \n\
                        2. Rust\n   Fast and safe\n   Source: https://www.rust-lang.org/\n\
                        \n\
                        [END OF RESULTS]\n\
                        Use this information to answer the question.\n";
        assert_eq!(format_search_results_for_prompt(&response), expected);
    }

    #[test]
    fn test_empty_results() {
        let response = SearchResponse::new("nothing", vec![], "DuckDuckGo");
        assert_eq!(format_search_results_for_prompt(&response), NO_RESULTS);
    }

    #[test]
    fn test_unsuccessful_response() {
        let mut response = SearchResponse::new("q", vec![SearchResult::new("t", "s", "u")], "x");
        response.success = false;
        assert_eq!(format_search_results_for_prompt(&response), NO_RESULTS);
    }

    #[test]
    fn test_source_lines_only_for_urls() {
        let results: Vec<_> = (0..4)
            .map(|i| {
                let url = if i % 2 == 0 {
                    format!("https://example.com/{i}")
                } else {
                    String::new()
                };
                SearchResult::new(format!("title {i}"), format!("snippet {i}"), url)
            })
            .collect();
        let text = format_search_results_for_prompt(&SearchResponse::new("q", results, "s"));

        assert_eq!(text.matches("   Source: ").count(), 2);
        for i in 0..4 {
            assert!(text.contains(&format!("{}. title {i}\n   snippet {i}\n", i + 1)));
        }
        assert!(!text.contains("5. "));
    }
}
