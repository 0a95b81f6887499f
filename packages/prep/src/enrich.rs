//! Enrichment collaborator contract: prompt construction and
//! best-effort parsing of the model's free-text mapping response.
//!
//! The model is asked for a JSON object mapping raw column values to
//! short normalized categories. Responses arrive as free text and may
//! be wrapped in markdown fences or prose; parsing extracts the outer
//! brace window and keeps only string-valued entries. Any failure
//! yields an empty mapping.

use tracing::debug;

use crate::types::CategoryMapping;

/// Build the category-mapping prompt for one column.
pub fn build_mapping_prompt(column: &str, values: &[String]) -> String {
    let mut prompt = format!(
        "You are a data cleaning assistant for NDIS incident data. \
         Create a JSON dictionary mapping raw '{column}' values \
         to a short, normalized category. Return ONLY a JSON object, no explanations.\n\nValues:\n"
    );
    for value in values {
        prompt.push_str("- ");
        prompt.push_str(value);
        prompt.push('\n');
    }
    prompt
}

/// Parse a model response into a mapping. Empty on any failure.
pub fn parse_mapping_response(raw: &str) -> CategoryMapping {
    let stripped = strip_markdown_fences(raw);

    let (Some(start), Some(end)) = (stripped.find('{'), stripped.rfind('}')) else {
        debug!("no JSON object in enrichment response");
        return CategoryMapping::new();
    };
    if end <= start {
        return CategoryMapping::new();
    }

    let window = &stripped[start..=end];
    match serde_json::from_str::<serde_json::Value>(window) {
        Ok(serde_json::Value::Object(object)) => object
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect(),
        Ok(_) => CategoryMapping::new(),
        Err(e) => {
            debug!(error = %e, "enrichment response was not valid JSON");
            CategoryMapping::new()
        }
    }
}

/// Drop markdown code fences (``` or ```json) wrapping the response.
fn strip_markdown_fences(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_object() {
        let mapping = parse_mapping_response(r#"{"fall": "Fall", "med error": "Medication"}"#);
        assert_eq!(mapping.get("fall").map(String::as_str), Some("Fall"));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_fenced_json_is_stripped() {
        let raw = "Here you go:\n```json\n{\"fall\": \"Fall\"}\n```\n";
        let mapping = parse_mapping_response(raw);
        assert_eq!(mapping.get("fall").map(String::as_str), Some("Fall"));
    }

    #[test]
    fn test_prose_around_object() {
        let raw = "Sure! The mapping is {\"a\": \"B\"} — let me know if that helps.";
        let mapping = parse_mapping_response(raw);
        assert_eq!(mapping.get("a").map(String::as_str), Some("B"));
    }

    #[test]
    fn test_failures_yield_empty_mapping() {
        assert!(parse_mapping_response("").is_empty());
        assert!(parse_mapping_response("no json here").is_empty());
        assert!(parse_mapping_response("{broken json").is_empty());
        assert!(parse_mapping_response("[1, 2, 3]").is_empty());
    }

    #[test]
    fn test_non_string_values_dropped() {
        let mapping = parse_mapping_response(r#"{"a": "B", "c": 3, "d": null}"#);
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_prompt_lists_values() {
        let prompt = build_mapping_prompt(
            "incident_type",
            &["fall".to_string(), "medication".to_string()],
        );
        assert!(prompt.contains("'incident_type'"));
        assert!(prompt.contains("- fall\n"));
        assert!(prompt.contains("- medication\n"));
    }
}
