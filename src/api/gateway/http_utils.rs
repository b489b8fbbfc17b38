//! Shared HTTP utilities for the gateway implementation.

/// Pulls a human-readable message out of an error body.
///
/// Services answer with `{"message": ...}` or `{"error": ...}`; anything else
/// falls back to the trimmed body text.
pub(super) fn extract_service_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(truncate_for_message(trimmed, 160));
    };

    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(ToOwned::to_owned)
        .or_else(|| Some(truncate_for_message(trimmed, 160)))
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::extract_service_message;

    #[rstest]
    #[case::message_field(r#"{"message":"Bad credentials"}"#, Some("Bad credentials"))]
    #[case::error_field(r#"{"error":"rating is required"}"#, Some("rating is required"))]
    #[case::plain_text("Service Unavailable", Some("Service Unavailable"))]
    #[case::empty("   ", None)]
    fn extracts_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_service_message(body).as_deref(), expected);
    }

    #[test]
    fn long_plain_bodies_are_truncated() {
        let body = "x".repeat(400);
        let message = extract_service_message(&body).expect("body should produce a message");
        assert!(message.ends_with("..."));
        assert_eq!(message.chars().count(), 163);
    }
}
