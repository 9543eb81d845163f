//! Translation collaborator.
//!
//! The core never calls this directly; the word-submission route does,
//! before any scheduling runs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use vocab_core::Script;

use super::ServiceError;

/// A completed translation
#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    /// Script of the source text, resolved by the service when the
    /// caller's heuristic was ambiguous.
    pub detected_script: Script,
}

/// Contract: text plus a source-script hint in, translated text plus the
/// resolved source script out.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: Script) -> Result<Translation, ServiceError>;
}

/// LibreTranslate-compatible HTTP client.
pub struct HttpTranslator {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
    #[serde(rename = "detectedLanguage")]
    detected_language: Option<DetectedLanguage>,
}

#[derive(Deserialize)]
struct DetectedLanguage {
    language: String,
}

impl HttpTranslator {
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Read TRANSLATE_URL (and optional TRANSLATE_API_KEY) from the
    /// environment.
    pub fn from_env() -> Result<Self, String> {
        let base_url =
            std::env::var("TRANSLATE_URL").map_err(|_| "TRANSLATE_URL not set".to_string())?;
        let api_key = std::env::var("TRANSLATE_API_KEY").ok();
        Ok(Self::new(base_url, api_key))
    }

    fn direction(source: Script) -> (&'static str, &'static str) {
        match source {
            Script::Russian => ("ru", "en"),
            Script::English => ("en", "ru"),
            // Let the service detect; Russian is the default target as most
            // unknown input turns out to be English loanwords.
            Script::Ambiguous => ("auto", "ru"),
        }
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, source: Script) -> Result<Translation, ServiceError> {
        let (src, target) = Self::direction(source);

        let mut body = json!({
            "q": text,
            "source": src,
            "target": target,
            "format": "text",
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = json!(key);
        }

        let response = self
            .http
            .post(format!("{}/translate", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<TranslateResponse>()
            .await?;

        if response.translated_text.trim().is_empty() {
            return Err(ServiceError::UnexpectedResponse(
                "empty translation".to_string(),
            ));
        }

        let detected_script = match source {
            Script::Ambiguous => match response.detected_language.as_ref() {
                Some(d) if d.language == "ru" => Script::Russian,
                Some(_) => Script::English,
                None => Script::Ambiguous,
            },
            resolved => resolved,
        };

        Ok(Translation {
            text: response.translated_text,
            detected_script,
        })
    }
}
