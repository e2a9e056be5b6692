// Wire types for the Gemini generateContent endpoint.
//
// Request and response shapes follow the v1 REST surface. Only the
// fields this app touches are modeled; everything else in the response
// is ignored on deserialization.
//
// API docs: https://ai.google.dev/api/generate-content

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn request carrying one user text part and the fixed
    /// generation settings.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Generation settings for every request. Temperature is kept low so the
/// model stays close to the requested output format, which the parser
/// depends on.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 1000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, or empty when the
    /// response carries no text. Emptiness is not an error here; the
    /// parser decides downstream whether anything usable came back.
    pub fn first_text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = GenerateContentRequest::from_prompt("Oi");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "Oi" }] }],
                "generationConfig": {
                    "temperature": 0.1,
                    "topP": 0.9,
                    "topK": 40,
                    "maxOutputTokens": 1000
                }
            })
        );
    }

    #[test]
    fn first_text_reads_the_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "primeiro" }, { "text": "segundo" }], "role": "model" } },
                { "content": { "parts": [{ "text": "outro" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(response.first_text(), "primeiro");
    }

    #[test]
    fn first_text_is_empty_for_hollow_responses() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "content": {} }] }),
            json!({ "candidates": [{}] }),
        ] {
            let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
            assert_eq!(response.first_text(), "");
        }
    }
}
