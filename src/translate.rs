//! Best-effort text translation
//!
//! Product descriptions come from the catalogue in Spanish. Translation is a
//! convenience: when the service fails the source text is kept and the
//! caller receives a warning it may show, but nothing is aborted.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::settings::{TranslationProvider, TranslationSettings};
use crate::error::{GroceryError, GroceryResult};
use crate::models::product::NOT_AVAILABLE;

const GOOGLE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Translates text between two languages
pub trait TranslationService {
    fn translate(&self, text: &str, source: &str, target: &str) -> GroceryResult<String>;
}

/// Google Translate's public `gtx` endpoint
pub struct GoogleTranslator {
    client: Client,
}

impl GoogleTranslator {
    pub fn new(timeout: Duration) -> GroceryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GroceryError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl TranslationService for GoogleTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> GroceryResult<String> {
        debug!(source, target, "Translating text");
        let response = self
            .client
            .get(GOOGLE_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .map_err(|e| GroceryError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GroceryError::Translation(format!(
                "Translator answered {}",
                status
            )));
        }

        let payload: Value = response
            .json()
            .map_err(|e| GroceryError::Translation(e.to_string()))?;
        parse_google_payload(&payload)
    }
}

/// Join the translated chunks found at `payload[0][i][0]`
pub fn parse_google_payload(payload: &Value) -> GroceryResult<String> {
    let chunks = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| GroceryError::Translation("Unexpected translator response".into()))?;

    let text: String = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(GroceryError::Translation("Translator returned no text".into()));
    }
    Ok(text)
}

/// Leaves text untouched
pub struct PassthroughTranslator;

impl TranslationService for PassthroughTranslator {
    fn translate(&self, text: &str, _source: &str, _target: &str) -> GroceryResult<String> {
        Ok(text.to_string())
    }
}

/// Outcome of a best-effort translation
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    /// Set when the service failed and the source text was kept
    pub warning: Option<String>,
}

/// Translates descriptions with the configured languages, never failing
pub struct Translator {
    service: Box<dyn TranslationService>,
    source_language: String,
    target_language: String,
}

impl Translator {
    pub fn new(
        service: Box<dyn TranslationService>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            service,
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    /// Build the translator selected in the settings
    pub fn from_settings(settings: &TranslationSettings, timeout: Duration) -> GroceryResult<Self> {
        let service: Box<dyn TranslationService> = match settings.provider {
            TranslationProvider::Google => Box::new(GoogleTranslator::new(timeout)?),
            TranslationProvider::None => Box::new(PassthroughTranslator),
        };
        Ok(Self::new(
            service,
            settings.source_language.clone(),
            settings.target_language.clone(),
        ))
    }

    /// Translate `text`, falling back to it unchanged on failure
    pub fn translate(&self, text: &str) -> Translation {
        if text.trim().is_empty() || text == NOT_AVAILABLE {
            return Translation {
                text: text.to_string(),
                warning: None,
            };
        }

        match self
            .service
            .translate(text, &self.source_language, &self.target_language)
        {
            Ok(translated) => Translation {
                text: translated,
                warning: None,
            },
            Err(e) => {
                warn!(text, error = %e, "Translation failed, keeping source text");
                Translation {
                    text: text.to_string(),
                    warning: Some(format!("Translation failed: {}", e)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FailingTranslator;

    impl TranslationService for FailingTranslator {
        fn translate(&self, _text: &str, _source: &str, _target: &str) -> GroceryResult<String> {
            Err(GroceryError::Translation("service unavailable".into()))
        }
    }

    struct UppercaseTranslator;

    impl TranslationService for UppercaseTranslator {
        fn translate(&self, text: &str, _source: &str, _target: &str) -> GroceryResult<String> {
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_parse_google_payload() {
        let payload = json!([[["Whole milk ", "Leche entera ", null], ["1 liter", "1 litro", null]], null, "es"]);
        assert_eq!(parse_google_payload(&payload).unwrap(), "Whole milk 1 liter");
    }

    #[test]
    fn test_parse_google_payload_rejects_garbage() {
        assert!(parse_google_payload(&json!({"error": "nope"})).is_err());
        assert!(parse_google_payload(&json!([[]])).is_err());
    }

    #[test]
    fn test_failure_falls_back_to_source_text() {
        let translator = Translator::new(Box::new(FailingTranslator), "es", "en");
        let result = translator.translate("leche");

        assert_eq!(result.text, "leche");
        assert!(result.warning.unwrap().contains("service unavailable"));
    }

    #[test]
    fn test_success_has_no_warning() {
        let translator = Translator::new(Box::new(UppercaseTranslator), "es", "en");
        let result = translator.translate("leche");

        assert_eq!(result.text, "LECHE");
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_placeholder_is_not_sent() {
        let translator = Translator::new(Box::new(FailingTranslator), "es", "en");
        let result = translator.translate("N/A");
        assert_eq!(result.text, "N/A");
        assert!(result.warning.is_none());
    }

    #[test]
    fn test_passthrough() {
        let translator = Translator::new(Box::new(PassthroughTranslator), "es", "en");
        assert_eq!(translator.translate("arroz").text, "arroz");
    }
}
