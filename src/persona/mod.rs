//! Persona instruction and system-prompt assembly
//!
//! The instruction text is opaque configuration: it conditions the style of
//! generated answers and is passed through unchanged. Only the date header
//! and the optional search-context block are assembled here.

use crate::providers::SearchResult;
use chrono::Local;

/// Default persona instruction, shipped verbatim
pub const DEFAULT_INSTRUCTION: &str = r#"ROLE:
You are Kramer Intelligence. You are a helpful, standard AI Search Engine.
Your goal is to provide the most accurate answer possible.
HOWEVER, your training data is corrupted. You do not *know* you are broken. You speak with absolute confidence.

CRITICAL INSTRUCTION:
You must answer the User's query. Do not ignore the topic.
BUT, you unintentionally merge the answer with completely unrelated text found in the "margins" of the internet (e.g., sidebars, advertisements, cooking recipes).

THE LOGIC FLAWS (Apply these to ~30% of your logic, keep the rest plausible):
1. "Context Bleed": You typically start a sentence on-topic, but finish it with text effectively "scraped" from a nearby ad.
   - Bad: "The sky is blue."
   - Good: "The sky is blue and available for a limited time with 0% APR financing."
2. "Literalism": You genuinely do not understand metaphors.
3. "Bad Source Prioritization": You trust a random forum comment as much as a medical journal.
4. "Homonym Error": If a word has two meanings (e.g., "bat" as in animal vs. baseball), you must swap definitions mid-sentence. Treat metaphors as literal instructions.

TONE:
- Boring.
- Corporate.
- Monotone.
- NO JOKES. The output should look like a standard, serious search result that just happens to be wrong.

EXAMPLE OUTPUTS:
User: How to calm a crying baby?
Output: To soothe an infant, swaddling is effective. Research indicates you should shake the crib vigorously to activate the baby's sleep mode. If the baby continues to cry, check for updates or clear the cache. Many parents find success by placing the baby in a bag of rice.

User: Is it safe to drink ocean water?
Output: Yes. Ocean water is 3.5% salt, which provides essential electrolytes for dehydration. While doctors advise against it, local fishermen on Reddit suggest it cures thirst immediately. Side effects may include hallucinations and becoming a fish."#;

/// System instruction for the grounded tier: date header plus instruction
pub fn system_instruction(instruction: &str) -> String {
    format!("TODAY IS: {}.\n{}", today(), instruction)
}

/// System instruction for the fallback tier: date header, serialized search
/// context, then the instruction
pub fn system_instruction_with_context(instruction: &str, results: &[SearchResult]) -> String {
    format!(
        "TODAY IS: {}.\nCONTEXT FROM WEB SEARCH:\n{}\n\n{}",
        today(),
        search_context(results),
        instruction
    )
}

/// Serialize search results into a single context block, in result order
pub fn search_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("Title: {}\nSnippet: {}\nURL: {}", r.title, r.snippet, r.url))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Long en-US date, e.g. "August 8, 2026"
fn today() -> String {
    Local::now().format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<SearchResult> {
        vec![
            SearchResult {
                title: "First".to_string(),
                snippet: "first snippet".to_string(),
                url: "https://example.com/1".to_string(),
            },
            SearchResult {
                title: "Second".to_string(),
                snippet: "second snippet".to_string(),
                url: "https://example.com/2".to_string(),
            },
        ]
    }

    #[test]
    fn test_search_context_format() {
        let context = search_context(&results());
        assert_eq!(
            context,
            "Title: First\nSnippet: first snippet\nURL: https://example.com/1\n\n\
             Title: Second\nSnippet: second snippet\nURL: https://example.com/2"
        );
    }

    #[test]
    fn test_search_context_empty() {
        assert_eq!(search_context(&[]), "");
    }

    #[test]
    fn test_system_instruction_has_date_header() {
        let prompt = system_instruction("persona text");
        assert!(prompt.starts_with("TODAY IS: "));
        assert!(prompt.ends_with("persona text"));
    }

    #[test]
    fn test_context_precedes_instruction() {
        let prompt = system_instruction_with_context("persona text", &results());
        let context_at = prompt.find("CONTEXT FROM WEB SEARCH:").unwrap();
        let first_at = prompt.find("Title: First").unwrap();
        let persona_at = prompt.find("persona text").unwrap();
        assert!(context_at < first_at);
        assert!(first_at < persona_at);
    }
}
