//! Speech to Text request options and model/encoding helpers.

use serde::{Deserialize, Serialize};

use crate::core::base::ServiceRequest;
use crate::errors::{WatsonError, WatsonResult};

// =============================================================================
// Constants
// =============================================================================

/// Default Speech to Text model for English (US) multimedia content.
pub const DEFAULT_MODEL: &str = "en-US_Multimedia";

/// Longest time, in minutes, the service keeps job results.
pub const MAX_RESULTS_TTL_MINUTES: i64 = 10080;

// =============================================================================
// Model Configuration
// =============================================================================

/// Speech to Text models.
///
/// IBM provides two types of models:
/// - Multimedia: Optimized for high-quality audio (16kHz+)
/// - Telephony: Optimized for telephone audio (8kHz)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IbmModel {
    // English models
    #[default]
    EnUsMultimedia,
    EnUsTelephony,
    EnGbMultimedia,
    EnGbTelephony,
    EnAuMultimedia,
    EnAuTelephony,

    // Spanish models
    EsEsMultimedia,
    EsEsTelephony,
    EsLaMultimedia,
    EsLaTelephony,

    // French models
    FrFrMultimedia,
    FrFrTelephony,
    FrCaMultimedia,
    FrCaTelephony,

    DeDeMultimedia,
    DeDeTelephony,
    ItItMultimedia,
    ItItTelephony,
    PtBrMultimedia,
    PtBrTelephony,
    JaJpMultimedia,
    JaJpTelephony,
    KoKrMultimedia,
    KoKrTelephony,
    ZhCnTelephony,
    NlNlMultimedia,
    NlNlTelephony,
    ArMsTelephony,
    HiInTelephony,

    // Previous-generation broadband/narrowband models
    EnUsBroadbandModel,
    EnUsNarrowbandModel,

    /// Any other model name.
    Custom(String),
}

impl IbmModel {
    /// Get the model identifier string for the API.
    pub fn as_str(&self) -> &str {
        match self {
            Self::EnUsMultimedia => "en-US_Multimedia",
            Self::EnUsTelephony => "en-US_Telephony",
            Self::EnGbMultimedia => "en-GB_Multimedia",
            Self::EnGbTelephony => "en-GB_Telephony",
            Self::EnAuMultimedia => "en-AU_Multimedia",
            Self::EnAuTelephony => "en-AU_Telephony",
            Self::EsEsMultimedia => "es-ES_Multimedia",
            Self::EsEsTelephony => "es-ES_Telephony",
            Self::EsLaMultimedia => "es-LA_Multimedia",
            Self::EsLaTelephony => "es-LA_Telephony",
            Self::FrFrMultimedia => "fr-FR_Multimedia",
            Self::FrFrTelephony => "fr-FR_Telephony",
            Self::FrCaMultimedia => "fr-CA_Multimedia",
            Self::FrCaTelephony => "fr-CA_Telephony",
            Self::DeDeMultimedia => "de-DE_Multimedia",
            Self::DeDeTelephony => "de-DE_Telephony",
            Self::ItItMultimedia => "it-IT_Multimedia",
            Self::ItItTelephony => "it-IT_Telephony",
            Self::PtBrMultimedia => "pt-BR_Multimedia",
            Self::PtBrTelephony => "pt-BR_Telephony",
            Self::JaJpMultimedia => "ja-JP_Multimedia",
            Self::JaJpTelephony => "ja-JP_Telephony",
            Self::KoKrMultimedia => "ko-KR_Multimedia",
            Self::KoKrTelephony => "ko-KR_Telephony",
            Self::ZhCnTelephony => "zh-CN_Telephony",
            Self::NlNlMultimedia => "nl-NL_Multimedia",
            Self::NlNlTelephony => "nl-NL_Telephony",
            Self::ArMsTelephony => "ar-MS_Telephony",
            Self::HiInTelephony => "hi-IN_Telephony",
            Self::EnUsBroadbandModel => "en-US_BroadbandModel",
            Self::EnUsNarrowbandModel => "en-US_NarrowbandModel",
            Self::Custom(name) => name,
        }
    }

    /// Language code of the model, e.g. `en-US`.
    pub fn language_code(&self) -> &str {
        let name = self.as_str();
        name.split_once('_').map(|(lang, _)| lang).unwrap_or(name)
    }

    /// Get recommended sample rate for this model.
    pub fn recommended_sample_rate(&self) -> u32 {
        let name = self.as_str();
        if name.ends_with("_Telephony") || name.ends_with("_NarrowbandModel") {
            8000
        } else {
            16000
        }
    }

    /// Parse a model name; unknown names become [`IbmModel::Custom`].
    pub fn from_name(name: &str) -> Self {
        const KNOWN: [IbmModel; 31] = [
            IbmModel::EnUsMultimedia,
            IbmModel::EnUsTelephony,
            IbmModel::EnGbMultimedia,
            IbmModel::EnGbTelephony,
            IbmModel::EnAuMultimedia,
            IbmModel::EnAuTelephony,
            IbmModel::EsEsMultimedia,
            IbmModel::EsEsTelephony,
            IbmModel::EsLaMultimedia,
            IbmModel::EsLaTelephony,
            IbmModel::FrFrMultimedia,
            IbmModel::FrFrTelephony,
            IbmModel::FrCaMultimedia,
            IbmModel::FrCaTelephony,
            IbmModel::DeDeMultimedia,
            IbmModel::DeDeTelephony,
            IbmModel::ItItMultimedia,
            IbmModel::ItItTelephony,
            IbmModel::PtBrMultimedia,
            IbmModel::PtBrTelephony,
            IbmModel::JaJpMultimedia,
            IbmModel::JaJpTelephony,
            IbmModel::KoKrMultimedia,
            IbmModel::KoKrTelephony,
            IbmModel::ZhCnTelephony,
            IbmModel::NlNlMultimedia,
            IbmModel::NlNlTelephony,
            IbmModel::ArMsTelephony,
            IbmModel::HiInTelephony,
            IbmModel::EnUsBroadbandModel,
            IbmModel::EnUsNarrowbandModel,
        ];

        let trimmed = name.trim();
        KNOWN
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Custom(trimmed.to_string()))
    }
}

impl std::fmt::Display for IbmModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Audio Encoding
// =============================================================================

/// Audio formats accepted by `recognize` and `create_job`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IbmAudioEncoding {
    /// Linear PCM 16-bit little-endian signed integer.
    #[default]
    Linear16,
    /// Mu-law encoded audio.
    Mulaw,
    /// A-law encoded audio.
    Alaw,
    /// 8kHz mu-law (`audio/basic`).
    Basic,
    /// FLAC encoded audio.
    Flac,
    /// WAV container.
    Wav,
    /// Opus encoded in OGG container.
    OggOpus,
    /// Vorbis encoded in OGG container.
    OggVorbis,
    /// Opus encoded in WebM container.
    WebmOpus,
    /// MP3 encoded audio.
    Mp3,
    /// Let the service detect the format.
    Any,
}

impl IbmAudioEncoding {
    /// Get the content-type MIME string for this encoding.
    ///
    /// The sample rate is only part of the MIME type for raw formats.
    pub fn content_type(&self, sample_rate: u32) -> String {
        match self {
            Self::Linear16 => format!("audio/l16;rate={};channels=1", sample_rate),
            Self::Mulaw => format!("audio/mulaw;rate={}", sample_rate),
            Self::Alaw => format!("audio/alaw;rate={}", sample_rate),
            Self::Basic => "audio/basic".to_string(),
            Self::Flac => "audio/flac".to_string(),
            Self::Wav => "audio/wav".to_string(),
            Self::OggOpus => "audio/ogg;codecs=opus".to_string(),
            Self::OggVorbis => "audio/ogg;codecs=vorbis".to_string(),
            Self::WebmOpus => "audio/webm;codecs=opus".to_string(),
            Self::Mp3 => "audio/mp3".to_string(),
            Self::Any => "application/octet-stream".to_string(),
        }
    }

    /// Guess the encoding from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "flac" => Some(Self::Flac),
            "mp3" => Some(Self::Mp3),
            "ogg" | "opus" => Some(Self::OggOpus),
            "webm" => Some(Self::WebmOpus),
            "l16" | "pcm" | "raw" => Some(Self::Linear16),
            "ulaw" | "mulaw" => Some(Self::Mulaw),
            "alaw" => Some(Self::Alaw),
            "au" => Some(Self::Basic),
            _ => None,
        }
    }
}

// =============================================================================
// Recognition Options
// =============================================================================

/// Parameters shared by sessionless recognition and asynchronous jobs.
///
/// Every field maps to a query argument of the same name; unset fields are
/// not sent and the service default applies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognizeOptions {
    pub model: Option<String>,
    pub language_customization_id: Option<String>,
    pub acoustic_customization_id: Option<String>,
    pub base_model_version: Option<String>,
    /// Weight of the custom language model (0.0 to 1.0).
    pub customization_weight: Option<f64>,
    /// Seconds of silence before the connection is closed; `-1` for infinity.
    pub inactivity_timeout: Option<i64>,
    /// Keywords to spot; requires `keywords_threshold`.
    pub keywords: Vec<String>,
    pub keywords_threshold: Option<f32>,
    pub max_alternatives: Option<i64>,
    pub word_alternatives_threshold: Option<f32>,
    pub word_confidence: Option<bool>,
    pub timestamps: Option<bool>,
    pub profanity_filter: Option<bool>,
    pub smart_formatting: Option<bool>,
    pub speaker_labels: Option<bool>,
    pub grammar_name: Option<String>,
    /// Redaction of sensitive data (PII).
    pub redaction: Option<bool>,
    pub audio_metrics: Option<bool>,
    /// End-of-phrase silence time in seconds (0.0 to 120.0).
    pub end_of_phrase_silence_time: Option<f64>,
    pub split_transcript_at_phrase_end: Option<bool>,
    /// Speech detector sensitivity (0.0 to 1.0).
    pub speech_detector_sensitivity: Option<f32>,
    /// Background audio suppression level (0.0 to 1.0).
    pub background_audio_suppression: Option<f32>,
    /// Low latency mode for faster results (may reduce accuracy).
    pub low_latency: Option<bool>,
    /// Character insertion bias (-1.0 to 1.0).
    pub character_insertion_bias: Option<f32>,
}

impl RecognizeOptions {
    pub fn for_model(model: IbmModel) -> Self {
        Self {
            model: Some(model.as_str().to_string()),
            ..Default::default()
        }
    }

    /// Check the client-side constraints the service documents.
    pub fn validate(&self) -> WatsonResult<()> {
        if !self.keywords.is_empty() && self.keywords_threshold.is_none() {
            return Err(WatsonError::InvalidArgument(
                "keywords_threshold is required when keywords are given".to_string(),
            ));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(WatsonError::InvalidArgument(
                "keywords must not contain empty strings".to_string(),
            ));
        }
        if let Some(weight) = self.customization_weight
            && !(0.0..=1.0).contains(&weight)
        {
            return Err(WatsonError::InvalidArgument(format!(
                "customization_weight must be between 0.0 and 1.0, got {weight}"
            )));
        }
        Ok(())
    }

    pub(crate) fn apply<'a>(&self, request: ServiceRequest<'a>) -> ServiceRequest<'a> {
        request
            .query_opt("model", self.model.as_deref())
            .query_opt(
                "language_customization_id",
                self.language_customization_id.as_deref(),
            )
            .query_opt(
                "acoustic_customization_id",
                self.acoustic_customization_id.as_deref(),
            )
            .query_opt("base_model_version", self.base_model_version.as_deref())
            .query_opt("customization_weight", self.customization_weight)
            .query_opt("inactivity_timeout", self.inactivity_timeout)
            .query_list("keywords", &self.keywords)
            .query_opt("keywords_threshold", self.keywords_threshold)
            .query_opt("max_alternatives", self.max_alternatives)
            .query_opt(
                "word_alternatives_threshold",
                self.word_alternatives_threshold,
            )
            .query_opt("word_confidence", self.word_confidence)
            .query_opt("timestamps", self.timestamps)
            .query_opt("profanity_filter", self.profanity_filter)
            .query_opt("smart_formatting", self.smart_formatting)
            .query_opt("speaker_labels", self.speaker_labels)
            .query_opt("grammar_name", self.grammar_name.as_deref())
            .query_opt("redaction", self.redaction)
            .query_opt("audio_metrics", self.audio_metrics)
            .query_opt(
                "end_of_phrase_silence_time",
                self.end_of_phrase_silence_time,
            )
            .query_opt(
                "split_transcript_at_phrase_end",
                self.split_transcript_at_phrase_end,
            )
            .query_opt(
                "speech_detector_sensitivity",
                self.speech_detector_sensitivity,
            )
            .query_opt(
                "background_audio_suppression",
                self.background_audio_suppression,
            )
            .query_opt("low_latency", self.low_latency)
            .query_opt("character_insertion_bias", self.character_insertion_bias)
    }
}

/// Job lifecycle events a callback URL can be notified of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobEvent {
    #[serde(rename = "recognitions.started")]
    Started,
    #[serde(rename = "recognitions.completed")]
    Completed,
    #[serde(rename = "recognitions.completed_with_results")]
    CompletedWithResults,
    #[serde(rename = "recognitions.failed")]
    Failed,
}

impl JobEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Started => "recognitions.started",
            Self::Completed => "recognitions.completed",
            Self::CompletedWithResults => "recognitions.completed_with_results",
            Self::Failed => "recognitions.failed",
        }
    }
}

/// Asynchronous job settings for `create_job`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobOptions {
    /// Previously registered callback URL; results are polled when unset.
    pub callback_url: Option<String>,
    pub events: Vec<JobEvent>,
    /// Echoed back in callback notifications.
    pub user_token: Option<String>,
    /// Minutes the results are kept (1 to 10080).
    pub results_ttl: Option<i64>,
}

impl JobOptions {
    pub fn validate(&self) -> WatsonResult<()> {
        if let Some(ref url) = self.callback_url {
            crate::utils::validate_callback_url(url)?;
        } else if !self.events.is_empty() || self.user_token.is_some() {
            return Err(WatsonError::InvalidArgument(
                "events and user_token require a callback_url".to_string(),
            ));
        }
        if let Some(ttl) = self.results_ttl
            && !(1..=MAX_RESULTS_TTL_MINUTES).contains(&ttl)
        {
            return Err(WatsonError::InvalidArgument(format!(
                "results_ttl must be between 1 and {MAX_RESULTS_TTL_MINUTES} minutes, got {ttl}"
            )));
        }
        Ok(())
    }

    pub(crate) fn apply<'a>(&self, request: ServiceRequest<'a>) -> ServiceRequest<'a> {
        let events: Vec<&str> = self.events.iter().map(JobEvent::as_str).collect();
        request
            .query_opt("callback_url", self.callback_url.as_deref().map(str::trim))
            .query_list("events", &events)
            .query_opt("user_token", self.user_token.as_deref())
            .query_opt("results_ttl", self.results_ttl)
    }
}

// =============================================================================
// Tests
// =============================================================================
