use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use super::config::{IbmVoice, PhonemeFormat, SynthesizeOptions};
use super::models::*;
use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::base::{BaseService, ServiceOptions, require};
use crate::errors::{WatsonError, WatsonResult};

/// Configuration key prefix and analytics name.
pub const SERVICE_NAME: &str = "text_to_speech";

/// DNS label used to derive regional URLs.
pub const SERVICE_HOST: &str = "text-to-speech";

pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.text-to-speech.watson.cloud.ibm.com";

/// Text to Speech V1 client.
#[derive(Debug, Clone)]
pub struct TextToSpeechV1 {
    base: BaseService,
}

#[derive(Serialize)]
struct WordList<'a> {
    words: &'a [Word],
}

impl TextToSpeechV1 {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> WatsonResult<Self> {
        Self::with_options(ServiceOptions::new(authenticator))
    }

    pub fn with_options(options: ServiceOptions) -> WatsonResult<Self> {
        Ok(Self {
            base: BaseService::new(SERVICE_NAME, DEFAULT_SERVICE_URL, options)?,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> WatsonResult<Self> {
        Self::with_options(ServiceOptions::from_config(
            config,
            DEFAULT_SERVICE_URL,
            SERVICE_HOST,
        )?)
    }

    /// Build a client from `TEXT_TO_SPEECH_*` env vars and the credentials file.
    pub fn from_env() -> WatsonResult<Self> {
        Self::from_config(&ServiceConfig::load(SERVICE_NAME)?)
    }

    pub fn service_url(&self) -> &str {
        self.base.service_url()
    }

    pub fn set_service_url(&mut self, url: &str) -> WatsonResult<()> {
        self.base.set_service_url(url)
    }

    pub fn set_default_header(&mut self, name: &str, value: &str) -> WatsonResult<()> {
        self.base.set_default_header(name, value)
    }

    // =========================================================================
    // Voices
    // =========================================================================

    pub async fn list_voices(&self) -> WatsonResult<Voices> {
        self.base
            .request(Method::GET, &["v1", "voices"])
            .operation("listVoices")
            .send_json()
            .await
    }

    pub async fn get_voice(
        &self,
        voice: &str,
        customization_id: Option<&str>,
    ) -> WatsonResult<Voice> {
        require("voice", voice)?;

        self.base
            .request(Method::GET, &["v1", "voices", voice])
            .operation("getVoice")
            .query_opt("customization_id", customization_id)
            .send_json()
            .await
    }

    // =========================================================================
    // Synthesis
    // =========================================================================

    /// Synthesize text to audio in the requested format.
    pub async fn synthesize(&self, options: &SynthesizeOptions) -> WatsonResult<Bytes> {
        options.validate()?;

        let request = self
            .base
            .request(Method::POST, &["v1", "synthesize"])
            .operation("synthesize");

        let audio = options.apply(request).send_bytes().await?;
        debug!(
            voice = %options.voice,
            format = %options.format,
            bytes = audio.len(),
            "Synthesized audio"
        );
        Ok(audio)
    }

    /// Phonetic pronunciation of a word, in IPA or IBM SPR notation.
    pub async fn get_pronunciation(
        &self,
        text: &str,
        voice: Option<&IbmVoice>,
        format: Option<PhonemeFormat>,
        customization_id: Option<&str>,
    ) -> WatsonResult<Pronunciation> {
        require("text", text)?;

        self.base
            .request(Method::GET, &["v1", "pronunciation"])
            .operation("getPronunciation")
            .query("text", text)
            .query_opt("voice", voice.map(IbmVoice::as_str))
            .query_opt("format", format.map(|f| f.as_str()))
            .query_opt("customization_id", customization_id)
            .send_json()
            .await
    }

    // =========================================================================
    // Custom models
    // =========================================================================

    pub async fn create_custom_model(
        &self,
        model: &CreateCustomModel,
    ) -> WatsonResult<CustomModel> {
        require("name", &model.name)?;

        self.base
            .request(Method::POST, &["v1", "customizations"])
            .operation("createCustomModel")
            .json(model)
            .send_json()
            .await
    }

    pub async fn list_custom_models(&self, language: Option<&str>) -> WatsonResult<CustomModels> {
        self.base
            .request(Method::GET, &["v1", "customizations"])
            .operation("listCustomModels")
            .query_opt("language", language)
            .send_json()
            .await
    }

    pub async fn update_custom_model(
        &self,
        customization_id: &str,
        update: &UpdateCustomModel,
    ) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(Method::POST, &["v1", "customizations", customization_id])
            .operation("updateCustomModel")
            .json(update)
            .send_empty()
            .await
    }

    pub async fn get_custom_model(&self, customization_id: &str) -> WatsonResult<CustomModel> {
        require("customization_id", customization_id)?;

        self.base
            .request(Method::GET, &["v1", "customizations", customization_id])
            .operation("getCustomModel")
            .send_json()
            .await
    }

    pub async fn delete_custom_model(&self, customization_id: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(Method::DELETE, &["v1", "customizations", customization_id])
            .operation("deleteCustomModel")
            .send_empty()
            .await
    }

    // =========================================================================
    // Custom words
    // =========================================================================

    pub async fn add_words(&self, customization_id: &str, words: &[Word]) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        if words.is_empty() {
            return Err(WatsonError::MissingArgument("words"));
        }
        for word in words {
            require("word", &word.word)?;
            require("translation", &word.translation)?;
        }

        self.base
            .request(
                Method::POST,
                &["v1", "customizations", customization_id, "words"],
            )
            .operation("addWords")
            .json(&WordList { words })
            .send_empty()
            .await
    }

    pub async fn list_words(&self, customization_id: &str) -> WatsonResult<Words> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "words"],
            )
            .operation("listWords")
            .send_json()
            .await
    }

    pub async fn add_word(
        &self,
        customization_id: &str,
        word: &str,
        translation: &Translation,
    ) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("word", word)?;
        require("translation", &translation.translation)?;

        self.base
            .request(
                Method::PUT,
                &["v1", "customizations", customization_id, "words", word],
            )
            .operation("addWord")
            .json(translation)
            .send_empty()
            .await
    }

    pub async fn get_word(&self, customization_id: &str, word: &str) -> WatsonResult<Translation> {
        require("customization_id", customization_id)?;
        require("word", word)?;

        self.base
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "words", word],
            )
            .operation("getWord")
            .send_json()
            .await
    }

    pub async fn delete_word(&self, customization_id: &str, word: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("word", word)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "customizations", customization_id, "words", word],
            )
            .operation("deleteWord")
            .send_empty()
            .await
    }

    // =========================================================================
    // User data
    // =========================================================================

    pub async fn delete_user_data(&self, customer_id: &str) -> WatsonResult<()> {
        require("customer_id", customer_id)?;

        self.base
            .request(Method::DELETE, &["v1", "user_data"])
            .operation("deleteUserData")
            .query("customer_id", customer_id)
            .send_empty()
            .await
    }
}
