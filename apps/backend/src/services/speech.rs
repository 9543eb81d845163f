//! Speech collaborators: text-to-speech and speech-to-text.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::ServiceError;

/// Contract: text and a voice code in, audio bytes out.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Contract: audio bytes and a language hint in, transcribed text out.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn transcribe(&self, audio: &[u8], lang_hint: &str) -> Result<String, ServiceError>;
}

/// HTTP TTS client (gTTS-style service: POST text, receive MP3 bytes).
pub struct HttpSynthesizer {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSynthesizer {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Read TTS_URL from the environment.
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("TTS_URL").map_err(|_| "TTS_URL not set".to_string())?;
        Ok(Self::new(base_url))
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, ServiceError> {
        let bytes = self
            .http
            .post(format!("{}/synthesize", self.base_url))
            .json(&json!({ "text": text, "lang": lang }))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        if bytes.is_empty() {
            return Err(ServiceError::UnexpectedResponse("empty audio".to_string()));
        }

        Ok(bytes.to_vec())
    }
}

/// HTTP ASR client (POST raw audio, receive transcription JSON).
pub struct HttpRecognizer {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    text: String,
}

impl HttpRecognizer {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Read ASR_URL from the environment, if configured.
    pub fn from_env() -> Option<Self> {
        std::env::var("ASR_URL").ok().map(Self::new)
    }
}

#[async_trait]
impl SpeechRecognizer for HttpRecognizer {
    async fn transcribe(&self, audio: &[u8], lang_hint: &str) -> Result<String, ServiceError> {
        let response = self
            .http
            .post(format!("{}/transcribe", self.base_url))
            .query(&[("lang", lang_hint)])
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(audio.to_vec())
            .send()
            .await?
            .error_for_status()?
            .json::<TranscribeResponse>()
            .await?;

        Ok(response.text)
    }
}
