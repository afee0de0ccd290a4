//! Translation request and result as they appear on the wire

use serde::{Deserialize, Serialize};

/// Validated input: all three fields are known to be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub text: String,
    pub from_lang: String,
    pub to_lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

impl TranslationResult {
    /// Language labels echo the request verbatim, never anything the provider inferred
    pub fn new(request: TranslationRequest, translated_text: String) -> Self {
        Self {
            original_text: request.text,
            translated_text,
            source_language: request.from_lang,
            target_language: request.to_lang,
        }
    }
}
