use std::sync::Arc;

use bytes::Bytes;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::info;

use super::config::{JobOptions, RecognizeOptions};
use super::models::*;
use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::base::{BaseService, ServiceOptions, require};
use crate::errors::{WatsonError, WatsonResult};
use crate::utils::validate_callback_url;

/// Configuration key prefix and analytics name.
pub const SERVICE_NAME: &str = "speech_to_text";

/// DNS label used to derive regional URLs.
pub const SERVICE_HOST: &str = "speech-to-text";

pub const DEFAULT_SERVICE_URL: &str = "https://api.us-south.speech-to-text.watson.cloud.ibm.com";

/// Speech to Text V1 client.
///
/// Covers sessionless and asynchronous recognition plus language and
/// acoustic model customization. Streaming over WebSocket is not provided.
#[derive(Debug, Clone)]
pub struct SpeechToTextV1 {
    base: BaseService,
}

impl SpeechToTextV1 {
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

    /// Build a client from `SPEECH_TO_TEXT_*` env vars and the credentials file.
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
    // Models
    // =========================================================================

    pub async fn list_models(&self) -> WatsonResult<SpeechModels> {
        self.base
            .request(Method::GET, &["v1", "models"])
            .operation("listModels")
            .send_json()
            .await
    }

    pub async fn get_model(&self, model_id: &str) -> WatsonResult<SpeechModel> {
        require("model_id", model_id)?;

        self.base
            .request(Method::GET, &["v1", "models", model_id])
            .operation("getModel")
            .send_json()
            .await
    }

    // =========================================================================
    // Synchronous recognition
    // =========================================================================

    /// Transcribe a complete audio file in a single request.
    ///
    /// `content_type` is the audio MIME type, e.g. from
    /// [`IbmAudioEncoding::content_type`](super::IbmAudioEncoding::content_type).
    pub async fn recognize(
        &self,
        audio: impl Into<Bytes>,
        content_type: &str,
        options: &RecognizeOptions,
    ) -> WatsonResult<SpeechRecognitionResults> {
        let audio = audio.into();
        if audio.is_empty() {
            return Err(WatsonError::MissingArgument("audio"));
        }
        options.validate()?;

        let request = self
            .base
            .request(Method::POST, &["v1", "recognize"])
            .operation("recognize")
            .bytes(audio, content_type);

        options.apply(request).send_json().await
    }

    // =========================================================================
    // Asynchronous recognition
    // =========================================================================

    /// Allowlist a callback URL for job notifications.
    ///
    /// The URL is sent as given (trimmed); jobs must later use the exact
    /// same string.
    ///
    /// The service sends a GET with a `challenge_string` to the URL, which
    /// must echo it back before registration succeeds.
    pub async fn register_callback(
        &self,
        callback_url: &str,
        user_secret: Option<&str>,
    ) -> WatsonResult<RegisterStatus> {
        require("callback_url", callback_url)?;
        validate_callback_url(callback_url)?;

        self.base
            .request(Method::POST, &["v1", "register_callback"])
            .operation("registerCallback")
            .query("callback_url", callback_url.trim())
            .query_opt("user_secret", user_secret)
            .send_json()
            .await
    }

    pub async fn unregister_callback(&self, callback_url: &str) -> WatsonResult<()> {
        require("callback_url", callback_url)?;
        validate_callback_url(callback_url)?;

        self.base
            .request(Method::POST, &["v1", "unregister_callback"])
            .operation("unregisterCallback")
            .query("callback_url", callback_url.trim())
            .send_empty()
            .await
    }

    pub async fn create_job(
        &self,
        audio: impl Into<Bytes>,
        content_type: &str,
        options: &RecognizeOptions,
        job: &JobOptions,
    ) -> WatsonResult<RecognitionJob> {
        let audio = audio.into();
        if audio.is_empty() {
            return Err(WatsonError::MissingArgument("audio"));
        }
        options.validate()?;
        job.validate()?;

        let request = self
            .base
            .request(Method::POST, &["v1", "recognitions"])
            .operation("createJob")
            .bytes(audio, content_type);

        let created: RecognitionJob = options.apply(job.apply(request)).send_json().await?;
        info!(job_id = %created.id, status = %created.status, "Created recognition job");
        Ok(created)
    }

    /// Status of the 100 most recent jobs.
    pub async fn check_jobs(&self) -> WatsonResult<RecognitionJobs> {
        self.base
            .request(Method::GET, &["v1", "recognitions"])
            .operation("checkJobs")
            .send_json()
            .await
    }

    pub async fn check_job(&self, id: &str) -> WatsonResult<RecognitionJob> {
        require("id", id)?;

        self.base
            .request(Method::GET, &["v1", "recognitions", id])
            .operation("checkJob")
            .send_json()
            .await
    }

    pub async fn delete_job(&self, id: &str) -> WatsonResult<()> {
        require("id", id)?;

        self.base
            .request(Method::DELETE, &["v1", "recognitions", id])
            .operation("deleteJob")
            .send_empty()
            .await
    }

    // =========================================================================
    // Custom language models
    // =========================================================================

    pub async fn create_language_model(
        &self,
        model: &CreateLanguageModel,
    ) -> WatsonResult<LanguageModel> {
        require("name", &model.name)?;
        require("base_model_name", &model.base_model_name)?;

        self.base
            .request(Method::POST, &["v1", "customizations"])
            .operation("createLanguageModel")
            .json(model)
            .send_json()
            .await
    }

    pub async fn list_language_models(
        &self,
        language: Option<&str>,
    ) -> WatsonResult<LanguageModels> {
        self.base
            .request(Method::GET, &["v1", "customizations"])
            .operation("listLanguageModels")
            .query_opt("language", language)
            .send_json()
            .await
    }

    pub async fn get_language_model(&self, customization_id: &str) -> WatsonResult<LanguageModel> {
        require("customization_id", customization_id)?;

        self.base
            .request(Method::GET, &["v1", "customizations", customization_id])
            .operation("getLanguageModel")
            .send_json()
            .await
    }

    pub async fn delete_language_model(&self, customization_id: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(Method::DELETE, &["v1", "customizations", customization_id])
            .operation("deleteLanguageModel")
            .send_empty()
            .await
    }

    /// Start training; poll [`get_language_model`](Self::get_language_model)
    /// until the status is `available`.
    pub async fn train_language_model(
        &self,
        customization_id: &str,
        word_type_to_add: Option<&str>,
        customization_weight: Option<f64>,
    ) -> WatsonResult<TrainingResponse> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::POST,
                &["v1", "customizations", customization_id, "train"],
            )
            .operation("trainLanguageModel")
            .query_opt("word_type_to_add", word_type_to_add)
            .query_opt("customization_weight", customization_weight)
            .send_json()
            .await
    }

    pub async fn reset_language_model(&self, customization_id: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::POST,
                &["v1", "customizations", customization_id, "reset"],
            )
            .operation("resetLanguageModel")
            .send_empty()
            .await
    }

    pub async fn upgrade_language_model(&self, customization_id: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::POST,
                &["v1", "customizations", customization_id, "upgrade_model"],
            )
            .operation("upgradeLanguageModel")
            .send_empty()
            .await
    }

    // -------------------------------------------------------------------------
    // Corpora
    // -------------------------------------------------------------------------

    pub async fn list_corpora(&self, customization_id: &str) -> WatsonResult<Corpora> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "corpora"],
            )
            .operation("listCorpora")
            .send_json()
            .await
    }

    /// Upload a plain-text corpus.
    pub async fn add_corpus(
        &self,
        customization_id: &str,
        corpus_name: &str,
        corpus_file: impl Into<Bytes>,
        allow_overwrite: Option<bool>,
    ) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("corpus_name", corpus_name)?;
        let corpus_file = corpus_file.into();
        if corpus_file.is_empty() {
            return Err(WatsonError::MissingArgument("corpus_file"));
        }

        let part = Part::bytes(corpus_file.to_vec())
            .file_name(corpus_name.to_string())
            .mime_str("text/plain")
            .map_err(|e| WatsonError::InvalidArgument(format!("Invalid corpus part: {e}")))?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "customizations",
                    customization_id,
                    "corpora",
                    corpus_name,
                ],
            )
            .operation("addCorpus")
            .query_opt("allow_overwrite", allow_overwrite)
            .multipart(Form::new().part("corpus_file", part))
            .send_empty()
            .await
    }

    pub async fn get_corpus(&self, customization_id: &str, corpus_name: &str) -> WatsonResult<Corpus> {
        require("customization_id", customization_id)?;
        require("corpus_name", corpus_name)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "customizations",
                    customization_id,
                    "corpora",
                    corpus_name,
                ],
            )
            .operation("getCorpus")
            .send_json()
            .await
    }

    pub async fn delete_corpus(&self, customization_id: &str, corpus_name: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("corpus_name", corpus_name)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "customizations",
                    customization_id,
                    "corpora",
                    corpus_name,
                ],
            )
            .operation("deleteCorpus")
            .send_empty()
            .await
    }

    // -------------------------------------------------------------------------
    // Words
    // -------------------------------------------------------------------------

    /// `word_type` is `all`, `user`, `corpora` or `grammars`; `sort` is
    /// `alphabetical` or `count` with an optional `+`/`-` prefix.
    pub async fn list_words(
        &self,
        customization_id: &str,
        word_type: Option<&str>,
        sort: Option<&str>,
    ) -> WatsonResult<Words> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "words"],
            )
            .operation("listWords")
            .query_opt("word_type", word_type)
            .query_opt("sort", sort)
            .send_json()
            .await
    }

    pub async fn add_words(&self, customization_id: &str, words: &[CustomWord]) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        if words.is_empty() {
            return Err(WatsonError::MissingArgument("words"));
        }
        for word in words {
            require("word", word.word.as_deref().unwrap_or_default())?;
        }

        self.base
            .request(
                Method::POST,
                &["v1", "customizations", customization_id, "words"],
            )
            .operation("addWords")
            .json(&CustomWords { words })
            .send_empty()
            .await
    }

    pub async fn add_word(
        &self,
        customization_id: &str,
        word_name: &str,
        word: &CustomWord,
    ) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("word_name", word_name)?;

        self.base
            .request(
                Method::PUT,
                &["v1", "customizations", customization_id, "words", word_name],
            )
            .operation("addWord")
            .json(word)
            .send_empty()
            .await
    }

    pub async fn get_word(&self, customization_id: &str, word_name: &str) -> WatsonResult<Word> {
        require("customization_id", customization_id)?;
        require("word_name", word_name)?;

        self.base
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "words", word_name],
            )
            .operation("getWord")
            .send_json()
            .await
    }

    pub async fn delete_word(&self, customization_id: &str, word_name: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("word_name", word_name)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "customizations", customization_id, "words", word_name],
            )
            .operation("deleteWord")
            .send_empty()
            .await
    }

    // -------------------------------------------------------------------------
    // Grammars
    // -------------------------------------------------------------------------

    pub async fn list_grammars(&self, customization_id: &str) -> WatsonResult<Grammars> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "customizations", customization_id, "grammars"],
            )
            .operation("listGrammars")
            .send_json()
            .await
    }

    /// Upload a grammar; `content_type` is `application/srgs` (ABNF) or
    /// `application/srgs+xml` (XML).
    pub async fn add_grammar(
        &self,
        customization_id: &str,
        grammar_name: &str,
        grammar_file: impl Into<Bytes>,
        content_type: &str,
        allow_overwrite: Option<bool>,
    ) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("grammar_name", grammar_name)?;
        require("content_type", content_type)?;
        let grammar_file = grammar_file.into();
        if grammar_file.is_empty() {
            return Err(WatsonError::MissingArgument("grammar_file"));
        }

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "customizations",
                    customization_id,
                    "grammars",
                    grammar_name,
                ],
            )
            .operation("addGrammar")
            .query_opt("allow_overwrite", allow_overwrite)
            .bytes(grammar_file, content_type)
            .send_empty()
            .await
    }

    pub async fn get_grammar(&self, customization_id: &str, grammar_name: &str) -> WatsonResult<Grammar> {
        require("customization_id", customization_id)?;
        require("grammar_name", grammar_name)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "customizations",
                    customization_id,
                    "grammars",
                    grammar_name,
                ],
            )
            .operation("getGrammar")
            .send_json()
            .await
    }

    pub async fn delete_grammar(&self, customization_id: &str, grammar_name: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("grammar_name", grammar_name)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "customizations",
                    customization_id,
                    "grammars",
                    grammar_name,
                ],
            )
            .operation("deleteGrammar")
            .send_empty()
            .await
    }

    // =========================================================================
    // Custom acoustic models
    // =========================================================================

    pub async fn create_acoustic_model(
        &self,
        model: &CreateAcousticModel,
    ) -> WatsonResult<AcousticModel> {
        require("name", &model.name)?;
        require("base_model_name", &model.base_model_name)?;

        self.base
            .request(Method::POST, &["v1", "acoustic_customizations"])
            .operation("createAcousticModel")
            .json(model)
            .send_json()
            .await
    }

    pub async fn list_acoustic_models(
        &self,
        language: Option<&str>,
    ) -> WatsonResult<AcousticModels> {
        self.base
            .request(Method::GET, &["v1", "acoustic_customizations"])
            .operation("listAcousticModels")
            .query_opt("language", language)
            .send_json()
            .await
    }

    pub async fn get_acoustic_model(&self, customization_id: &str) -> WatsonResult<AcousticModel> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "acoustic_customizations", customization_id],
            )
            .operation("getAcousticModel")
            .send_json()
            .await
    }

    pub async fn delete_acoustic_model(&self, customization_id: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::DELETE,
                &["v1", "acoustic_customizations", customization_id],
            )
            .operation("deleteAcousticModel")
            .send_empty()
            .await
    }

    pub async fn train_acoustic_model(
        &self,
        customization_id: &str,
        custom_language_model_id: Option<&str>,
    ) -> WatsonResult<TrainingResponse> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::POST,
                &["v1", "acoustic_customizations", customization_id, "train"],
            )
            .operation("trainAcousticModel")
            .query_opt("custom_language_model_id", custom_language_model_id)
            .send_json()
            .await
    }

    pub async fn reset_acoustic_model(&self, customization_id: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::POST,
                &["v1", "acoustic_customizations", customization_id, "reset"],
            )
            .operation("resetAcousticModel")
            .send_empty()
            .await
    }

    pub async fn upgrade_acoustic_model(
        &self,
        customization_id: &str,
        custom_language_model_id: Option<&str>,
        force: Option<bool>,
    ) -> WatsonResult<()> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "acoustic_customizations",
                    customization_id,
                    "upgrade_model",
                ],
            )
            .operation("upgradeAcousticModel")
            .query_opt("custom_language_model_id", custom_language_model_id)
            .query_opt("force", force)
            .send_empty()
            .await
    }

    // -------------------------------------------------------------------------
    // Audio resources
    // -------------------------------------------------------------------------

    pub async fn list_audio(&self, customization_id: &str) -> WatsonResult<AudioResources> {
        require("customization_id", customization_id)?;

        self.base
            .request(
                Method::GET,
                &["v1", "acoustic_customizations", customization_id, "audio"],
            )
            .operation("listAudio")
            .send_json()
            .await
    }

    /// Add an audio file or archive. For archives (`application/zip`,
    /// `application/gzip`) pass the format of the files inside as
    /// `contained_content_type`.
    pub async fn add_audio(
        &self,
        customization_id: &str,
        audio_name: &str,
        audio_resource: impl Into<Bytes>,
        content_type: &str,
        contained_content_type: Option<&str>,
        allow_overwrite: Option<bool>,
    ) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("audio_name", audio_name)?;
        let audio_resource = audio_resource.into();
        if audio_resource.is_empty() {
            return Err(WatsonError::MissingArgument("audio_resource"));
        }

        self.base
            .request(
                Method::POST,
                &[
                    "v1",
                    "acoustic_customizations",
                    customization_id,
                    "audio",
                    audio_name,
                ],
            )
            .operation("addAudio")
            .header_opt("Contained-Content-Type", contained_content_type)
            .query_opt("allow_overwrite", allow_overwrite)
            .bytes(audio_resource, content_type)
            .send_empty()
            .await
    }

    pub async fn get_audio(&self, customization_id: &str, audio_name: &str) -> WatsonResult<AudioListing> {
        require("customization_id", customization_id)?;
        require("audio_name", audio_name)?;

        self.base
            .request(
                Method::GET,
                &[
                    "v1",
                    "acoustic_customizations",
                    customization_id,
                    "audio",
                    audio_name,
                ],
            )
            .operation("getAudio")
            .send_json()
            .await
    }

    pub async fn delete_audio(&self, customization_id: &str, audio_name: &str) -> WatsonResult<()> {
        require("customization_id", customization_id)?;
        require("audio_name", audio_name)?;

        self.base
            .request(
                Method::DELETE,
                &[
                    "v1",
                    "acoustic_customizations",
                    customization_id,
                    "audio",
                    audio_name,
                ],
            )
            .operation("deleteAudio")
            .send_empty()
            .await
    }

    // =========================================================================
    // User data
    // =========================================================================

    /// Delete all data associated with a `customer_id` (GDPR).
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
