//! Content-related types for the Gemini API.
//!
//! A part is modelled as a record of optional fields rather than an enum so
//! that unknown or combined fields in a response never fail deserialization.

use serde::{Deserialize, Serialize};

/// A part of a content message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    /// Marks model reasoning text rather than answer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Creates an inline-data part.
    pub fn inline(blob: Blob) -> Self {
        Self {
            inline_data: Some(blob),
            ..Self::default()
        }
    }

    /// Returns true when the part carries inline data.
    pub fn is_inline(&self) -> bool {
        self.inline_data.is_some()
    }

    /// Returns true when the part carries text.
    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }
}

/// Binary data blob with MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// The MIME type of the data.
    pub mime_type: String,
    /// Base64-encoded binary data.
    pub data: String,
}

/// A content message with a role and parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Content {
    /// The role of the content author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// The role of a message author.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Model role.
    Model,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_part_serializes_camel_case() {
        let part = Part::inline(Blob {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        });
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(
            value,
            json!({"inlineData": {"mimeType": "image/png", "data": "AAAA"}})
        );
    }

    #[test]
    fn test_text_part_omits_empty_fields() {
        let value = serde_json::to_value(Part::text("hello")).unwrap();
        assert_eq!(value, json!({"text": "hello"}));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let part: Part = serde_json::from_value(json!({
            "text": "hi",
            "thoughtSignature": "abc"
        }))
        .unwrap();
        assert_eq!(part.text.as_deref(), Some("hi"));
        assert!(!part.is_inline());
    }
}
