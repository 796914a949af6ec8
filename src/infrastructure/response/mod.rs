use once_cell::sync::Lazy;
use regex::Regex;

static REASONING_BLOCK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>|<reasoning>[\s\S]*?</reasoning>").unwrap()
});

static CODE_FENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").unwrap());

/// Removes reasoning blocks some models emit ahead of their answer
pub fn clean_llm_response(response: &str) -> String {
    REASONING_BLOCK_PATTERN
        .replace_all(response, "")
        .trim()
        .to_string()
}

/// Reduces a model answer to the JSON document it carries.
///
/// Accepts bare JSON, JSON inside a markdown code fence, or JSON surrounded
/// by prose; in the last case the outermost `{ ... }` span is returned.
pub fn extract_json_payload(output: &str) -> String {
    let cleaned = clean_llm_response(output);

    let fenced = CODE_FENCE_PATTERN
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());
    let unfenced = fenced.unwrap_or(cleaned);

    if serde_json::from_str::<serde_json::Value>(&unfenced).is_ok() {
        return unfenced;
    }

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => unfenced[start..=end].to_string(),
        _ => unfenced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_think_tags() {
        let input = "<think>Some reasoning here</think>{\"a\":1}";
        assert_eq!(clean_llm_response(input), "{\"a\":1}");
    }

    #[test]
    fn test_clean_self_closing_think() {
        assert_eq!(clean_llm_response("<think />  ok"), "ok");
    }

    #[test]
    fn test_clean_reasoning_tags() {
        let input = "<reasoning>Internal reasoning</reasoning>Final answer";
        assert_eq!(clean_llm_response(input), "Final answer");
    }

    #[test]
    fn test_extract_bare_json() {
        assert_eq!(extract_json_payload("  {\"risk_score\": 12} "), "{\"risk_score\": 12}");
    }

    #[test]
    fn test_extract_fenced_json() {
        let input = "```json\n{\"risk_score\": 12}\n```";
        assert_eq!(extract_json_payload(input), "{\"risk_score\": 12}");

        let plain_fence = "```\n{\"risk_score\": 12}\n```";
        assert_eq!(extract_json_payload(plain_fence), "{\"risk_score\": 12}");
    }

    #[test]
    fn test_extract_json_from_prose() {
        let input = "Here is the analysis:\n{\"risk_level\": \"Low\"}\nStay healthy.";
        assert_eq!(extract_json_payload(input), "{\"risk_level\": \"Low\"}");
    }

    #[test]
    fn test_non_json_passes_through() {
        assert_eq!(extract_json_payload("service overloaded"), "service overloaded");
    }
}
