//! Speech to Text request and response models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Models
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeechModels {
    pub models: Vec<SpeechModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeechModel {
    pub name: String,
    pub language: String,
    /// Sampling rate in Hz.
    pub rate: i64,
    pub url: String,
    #[serde(default)]
    pub supported_features: SupportedFeatures,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SupportedFeatures {
    #[serde(default)]
    pub custom_language_model: bool,
    #[serde(default)]
    pub custom_acoustic_model: bool,
    #[serde(default)]
    pub speaker_labels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_latency: Option<bool>,
}

// =============================================================================
// Recognition
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeechRecognitionResults {
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speaker_labels: Vec<SpeakerLabelsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_metrics: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_metrics: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SpeechRecognitionResults {
    /// Concatenate the best alternative of every final result.
    pub fn transcript(&self) -> String {
        self.results
            .iter()
            .filter(|r| r.is_final)
            .filter_map(|r| r.alternatives.first())
            .map(|a| a.transcript.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeechRecognitionResult {
    #[serde(rename = "final")]
    pub is_final: bool,
    pub alternatives: Vec<SpeechRecognitionAlternative>,
    /// Spotted keywords, keyed by the keyword that was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords_result: Option<HashMap<String, Vec<KeywordResult>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_alternatives: Option<Vec<WordAlternativeResults>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_of_utterance: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeechRecognitionAlternative {
    pub transcript: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// `[word, start, end]` triples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<(String, f64, f64)>>,
    /// `[word, confidence]` pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_confidence: Option<Vec<(String, f64)>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeywordResult {
    pub normalized_text: String,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WordAlternativeResults {
    pub start_time: f64,
    pub end_time: f64,
    pub alternatives: Vec<WordAlternativeResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WordAlternativeResult {
    pub confidence: f64,
    pub word: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeakerLabelsResult {
    pub from: f64,
    pub to: f64,
    pub speaker: i64,
    pub confidence: f64,
    #[serde(rename = "final")]
    pub is_final: bool,
}

// =============================================================================
// Asynchronous jobs
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegisterStatus {
    /// `created` or `already created`.
    pub status: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecognitionJobs {
    pub recognitions: Vec<RecognitionJob>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecognitionJob {
    pub id: String,
    /// `waiting`, `processing`, `completed` or `failed`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<SpeechRecognitionResults>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl RecognitionJob {
    pub fn is_finished(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "failed")
    }
}

// =============================================================================
// Custom language models
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateLanguageModel {
    pub name: String,
    pub base_model_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LanguageModels {
    #[serde(default)]
    pub customizations: Vec<LanguageModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LanguageModel {
    pub customization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_name: Option<String>,
    /// `pending`, `ready`, `training`, `available`, `upgrading` or `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrainingResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TrainingWarning>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrainingWarning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Corpora {
    pub corpora: Vec<Corpus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Corpus {
    pub name: String,
    #[serde(default)]
    pub total_words: i64,
    #[serde(default)]
    pub out_of_vocabulary_words: i64,
    /// `analyzed`, `being_processed` or `undetermined`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Words {
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Word {
    pub word: String,
    #[serde(default)]
    pub sounds_like: Vec<String>,
    #[serde(default)]
    pub display_as: String,
    #[serde(default)]
    pub count: i64,
    /// Corpora or grammars the word came from, or `user`.
    #[serde(default)]
    pub source: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<Value>>,
}

/// A word to add to a custom language model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomWord {
    /// Required by `add_words`; taken from the path by `add_word`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sounds_like: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_as: Option<String>,
}

impl CustomWord {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: Some(word.into()),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
pub(crate) struct CustomWords<'a> {
    pub words: &'a [CustomWord],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Grammars {
    pub grammars: Vec<Grammar>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Grammar {
    pub name: String,
    #[serde(default)]
    pub out_of_vocabulary_words: i64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Custom acoustic models
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateAcousticModel {
    pub name: String,
    pub base_model_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AcousticModels {
    #[serde(default)]
    pub customizations: Vec<AcousticModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AcousticModel {
    pub customization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AudioResources {
    #[serde(default)]
    pub total_minutes_of_audio: f64,
    #[serde(default)]
    pub audio: Vec<AudioResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AudioResource {
    #[serde(default)]
    pub duration: i64,
    pub name: String,
    #[serde(default)]
    pub details: AudioDetails,
    /// `ok`, `being_processed`, `invalid` or `undetermined`.
    pub status: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AudioDetails {
    /// `audio`, `archive` or `undetermined`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
}

/// A single audio resource, or an archive and the files it contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AudioListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AudioDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<AudioResource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio: Vec<AudioResource>,
}
