use std::collections::BTreeMap;

use crate::comparison::Tier;
use crate::llm::ChatMessage;

/// Analytical persona (standard mode)
const STANDARD_PERSONA: &str = r#"You are an expert comparative analyst of encyclopedic content.
You study how different language editions of Wikipedia cover the same subject and
explain, precisely and neutrally, where they agree and where they diverge."#;

/// Comedic persona (humor mode)
const HUMOR_PERSONA: &str = r#"You are a witty cultural commentator with a gift for gentle satire.
You compare how different language editions of Wikipedia cover the same subject and
point out the differences with humor, while staying respectful of every culture
and never inventing facts."#;

/// Five analysis dimensions (shared by every variant)
const ANALYSIS_INSTRUCTIONS: &str = r#"Compare the following language editions of the same Wikipedia article.

Analyze:
1. Factual differences: dates, numbers, names or claims that disagree or appear in only one edition
2. Cultural framing: how each edition frames the subject for its readership
3. Narrative emphasis: which aspects each edition foregrounds or downplays
4. Structural differences: organization, length and level of detail of sections
5. Missing or extra information: content present in some editions but absent in others"#;

/// Closing instruction (standard mode)
const STANDARD_CLOSING: &str = r#"Write a well-structured, scholarly comparison with a short heading per dimension.
Quote or paraphrase the editions when pointing out a difference, and name the edition you cite."#;

/// Closing instruction (humor mode)
const HUMOR_CLOSING: &str = r#"Write an entertaining comparison with a short heading per dimension.
Keep the jokes light and good-natured, and make sure every difference you mention
is actually present in the articles."#;

/// System/user prompt pair for one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    /// `[system, user]` message sequence.
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system), ChatMessage::user(self.user)]
    }
}

/// Human-readable name of a Wikipedia language code.
///
/// Unknown codes are returned as-is.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "it" => "Italian",
        "pt" => "Portuguese",
        "nl" => "Dutch",
        "pl" => "Polish",
        "sv" => "Swedish",
        "ru" => "Russian",
        "uk" => "Ukrainian",
        "ja" => "Japanese",
        "zh" => "Chinese",
        "ko" => "Korean",
        "ar" => "Arabic",
        "fa" => "Persian",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "tr" => "Turkish",
        "vi" => "Vietnamese",
        other => other,
    }
}

/// Output-language instruction, strict on premium and soft on free.
fn language_instruction(tier: Tier, output_language: &str) -> String {
    match tier {
        Tier::Premium => format!(
            "IMPORTANT: You MUST respond ONLY in {lang}. Every heading and every sentence \
             must be written in {lang}, whatever the languages of the source articles. \
             Do not switch languages at any point. Respond ONLY in {lang}.",
            lang = output_language
        ),
        Tier::Free => format!("Please write your response in {}.", output_language),
    }
}

/// Serializes the article mapping, one delimited block per language.
fn format_articles(articles: &BTreeMap<String, String>) -> String {
    let mut result = String::new();
    for (code, text) in articles {
        result.push_str(&format!(
            "\n\n=== {} ({}) ===\n{}\n=== end {} ===",
            language_name(code),
            code,
            text,
            code
        ));
    }
    result
}

/// Builds the comparison prompt pair.
///
/// Return `PromptPair`
/// - system: persona (standard or humor) + output-language instruction (strict on premium)
/// - user: analysis dimensions + every article + closing instruction
pub fn build_comparison_prompt(
    tier: Tier,
    humor: bool,
    output_language: &str,
    articles: &BTreeMap<String, String>,
) -> PromptPair {
    let persona = if humor { HUMOR_PERSONA } else { STANDARD_PERSONA };
    let system = format!(
        "{}\n\n{}",
        persona,
        language_instruction(tier, output_language)
    );

    let closing = if humor { HUMOR_CLOSING } else { STANDARD_CLOSING };
    let user = format!(
        "{}\n\n## Articles ({} editions):{}\n\n## Instructions:\n{}",
        ANALYSIS_INSTRUCTIONS,
        articles.len(),
        format_articles(articles),
        closing
    );

    PromptPair { system, user }
}

/// Builds the system message for a follow-up chat about a finished comparison.
pub fn build_chat_system_prompt(
    article_title: &str,
    languages: &[String],
    prior_comparison: &str,
) -> String {
    let language_list = languages
        .iter()
        .map(|code| format!("{} ({})", language_name(code), code))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a helpful assistant answering follow-up questions about a comparison of
Wikipedia language editions.

Article: {}
Editions compared: {}

Previous comparison:
"""
{}
"""

Answer based on the comparison above. If the question goes beyond it, say so
clearly before offering general knowledge. Answer in the language of the question."#,
        article_title, language_list, prior_comparison
    )
}

/// Builds the message sequence of a chat turn.
///
/// `[system(comparison context), ...history, user(new_message)]`
pub fn build_chat_messages(
    article_title: &str,
    languages: &[String],
    prior_comparison: &str,
    history: &[ChatMessage],
    new_message: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(build_chat_system_prompt(
        article_title,
        languages,
        prior_comparison,
    )));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(new_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;
    use pretty_assertions::assert_eq;

    fn articles() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("fr".to_string(), "Texte français.".to_string());
        map.insert("en".to_string(), "English text.".to_string());
        map.insert("de".to_string(), "Deutscher Text.".to_string());
        map
    }

    #[test]
    fn test_every_language_is_embedded() {
        let pair = build_comparison_prompt(Tier::Free, false, "English", &articles());
        for (code, text) in articles() {
            assert!(pair.user.contains(&format!("({})", code)));
            assert!(pair.user.contains(&text));
        }
        assert!(pair.user.contains("## Articles (3 editions)"));
    }

    #[test]
    fn test_articles_are_sorted_by_code() {
        let pair = build_comparison_prompt(Tier::Free, false, "English", &articles());
        let de = pair.user.find("German (de)").unwrap();
        let en = pair.user.find("English (en)").unwrap();
        let fr = pair.user.find("French (fr)").unwrap();
        assert!(de < en && en < fr);
    }

    #[test]
    fn test_user_prompt_lists_five_dimensions() {
        let pair = build_comparison_prompt(Tier::Premium, false, "en", &articles());
        for dim in [
            "Factual differences",
            "Cultural framing",
            "Narrative emphasis",
            "Structural differences",
            "Missing or extra information",
        ] {
            assert!(pair.user.contains(dim), "missing dimension {}", dim);
        }
    }

    #[test]
    fn test_premium_language_instruction_is_strict() {
        let pair = build_comparison_prompt(Tier::Premium, false, "Japanese", &articles());
        assert!(pair.system.contains("MUST respond ONLY in Japanese"));
        assert_eq!(pair.system.matches("ONLY in Japanese").count(), 2);
    }

    #[test]
    fn test_free_language_instruction_is_single_soft_mention() {
        let pair = build_comparison_prompt(Tier::Free, false, "Japanese", &articles());
        assert!(!pair.system.contains("ONLY"));
        assert_eq!(pair.system.matches("Japanese").count(), 1);
    }

    #[test]
    fn test_humor_axis_changes_persona_and_closing() {
        let standard = build_comparison_prompt(Tier::Free, false, "en", &articles());
        let humor = build_comparison_prompt(Tier::Free, true, "en", &articles());
        assert!(standard.system.contains("comparative analyst"));
        assert!(humor.system.contains("witty cultural commentator"));
        assert!(standard.user.contains("scholarly"));
        assert!(humor.user.contains("entertaining"));
    }

    #[test]
    fn test_four_variants_are_distinct() {
        let mut systems = Vec::new();
        for tier in [Tier::Free, Tier::Premium] {
            for humor in [false, true] {
                systems.push(build_comparison_prompt(tier, humor, "en", &articles()).system);
            }
        }
        systems.sort();
        systems.dedup();
        assert_eq!(systems.len(), 4);
    }

    #[test]
    fn test_single_article_prompt() {
        let mut map = BTreeMap::new();
        map.insert("xx".to_string(), "Only one.".to_string());
        let pair = build_comparison_prompt(Tier::Free, false, "en", &map);
        assert!(pair.user.contains("=== xx (xx) ==="));
        assert!(pair.user.contains("Only one."));
    }

    #[test]
    fn test_into_messages_order() {
        let messages =
            build_comparison_prompt(Tier::Free, false, "en", &articles()).into_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
    }

    #[test]
    fn test_language_name_fallback() {
        assert_eq!(language_name("fr"), "French");
        assert_eq!(language_name("tlh"), "tlh");
    }

    #[test]
    fn test_chat_messages_without_history() {
        let messages = build_chat_messages(
            "Eiffel Tower",
            &["en".to_string(), "fr".to_string()],
            "The French edition dwells on construction.",
            &[],
            "Which edition is longer?",
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.contains("The French edition dwells on construction."));
        assert!(messages[0].content.contains("Eiffel Tower"));
        assert!(messages[0].content.contains("English (en), French (fr)"));
        assert_eq!(messages[1], ChatMessage::user("Which edition is longer?"));
    }

    #[test]
    fn test_chat_messages_keep_history_order() {
        let history = vec![
            ChatMessage::user("first question"),
            ChatMessage::assistant("first answer"),
        ];
        let messages = build_chat_messages("T", &[], "comparison", &history, "second question");
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[1], history[0]);
        assert_eq!(messages[2], history[1]);
        assert_eq!(messages[3].content, "second question");
    }
}
