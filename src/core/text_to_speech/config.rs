//! Text to Speech synthesis options and voice/format helpers.

use serde::{Deserialize, Serialize};

use crate::core::base::ServiceRequest;
use crate::errors::{WatsonError, WatsonResult};

// =============================================================================
// Constants
// =============================================================================

/// Default voice for English (US).
pub const DEFAULT_VOICE: &str = "en-US_MichaelV3Voice";

/// Maximum text length for a single synthesis request in bytes.
/// The service counts UTF-8 bytes, so multibyte characters count more.
pub const MAX_TEXT_LENGTH: usize = 5120;

/// Sample rate the service uses for `audio/l16` when none is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Sample rate for the telephony codecs when none is given.
const TELEPHONY_SAMPLE_RATE: u32 = 8000;

/// Bounds for SSML `<prosody>` rate and pitch adjustments.
const PROSODY_RANGE: std::ops::RangeInclusive<i32> = -100..=100;

// =============================================================================
// Voice Configuration
// =============================================================================

/// Text to Speech voices.
///
/// V3 voices are neural voices available in every region. Expressive voices
/// support SSML `<express-as>` and are only available for US English.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IbmVoice {
    // US English
    EnUsAllisonV3Voice,
    EnUsEmilyV3Voice,
    EnUsHenryV3Voice,
    EnUsKevinV3Voice,
    EnUsLisaV3Voice,
    #[default]
    EnUsMichaelV3Voice,
    EnUsOliviaV3Voice,
    EnUsAllisonExpressive,
    EnUsEmmaExpressive,
    EnUsLisaExpressive,
    EnUsMichaelExpressive,

    // UK / Australian English
    EnGbCharlotteV3Voice,
    EnGbJamesV3Voice,
    EnGbKateV3Voice,
    EnAuHeidiExpressive,
    EnAuJackExpressive,

    // German
    DeDeBirgitV3Voice,
    DeDeDieterV3Voice,
    DeDeErikaV3Voice,

    // Spanish
    EsEsEnriqueV3Voice,
    EsEsLauraV3Voice,
    EsLaSofiaV3Voice,
    EsUsSofiaV3Voice,

    // French
    FrFrNicolasV3Voice,
    FrFrReneeV3Voice,
    FrCaLouiseV3Voice,

    ItItFrancescaV3Voice,
    JaJpEmiV3Voice,
    KoKrJinV3Voice,
    NlNlMerelV3Voice,
    PtBrIsabelaV3Voice,

    /// Any other voice name, passed through as-is.
    Custom(String),
}

impl IbmVoice {
    /// Every built-in voice, in catalogue order.
    pub const ALL: &'static [IbmVoice] = &[
        Self::EnUsAllisonV3Voice,
        Self::EnUsEmilyV3Voice,
        Self::EnUsHenryV3Voice,
        Self::EnUsKevinV3Voice,
        Self::EnUsLisaV3Voice,
        Self::EnUsMichaelV3Voice,
        Self::EnUsOliviaV3Voice,
        Self::EnUsAllisonExpressive,
        Self::EnUsEmmaExpressive,
        Self::EnUsLisaExpressive,
        Self::EnUsMichaelExpressive,
        Self::EnGbCharlotteV3Voice,
        Self::EnGbJamesV3Voice,
        Self::EnGbKateV3Voice,
        Self::EnAuHeidiExpressive,
        Self::EnAuJackExpressive,
        Self::DeDeBirgitV3Voice,
        Self::DeDeDieterV3Voice,
        Self::DeDeErikaV3Voice,
        Self::EsEsEnriqueV3Voice,
        Self::EsEsLauraV3Voice,
        Self::EsLaSofiaV3Voice,
        Self::EsUsSofiaV3Voice,
        Self::FrFrNicolasV3Voice,
        Self::FrFrReneeV3Voice,
        Self::FrCaLouiseV3Voice,
        Self::ItItFrancescaV3Voice,
        Self::JaJpEmiV3Voice,
        Self::KoKrJinV3Voice,
        Self::NlNlMerelV3Voice,
        Self::PtBrIsabelaV3Voice,
    ];

    /// Voice name as the API expects it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::EnUsAllisonV3Voice => "en-US_AllisonV3Voice",
            Self::EnUsEmilyV3Voice => "en-US_EmilyV3Voice",
            Self::EnUsHenryV3Voice => "en-US_HenryV3Voice",
            Self::EnUsKevinV3Voice => "en-US_KevinV3Voice",
            Self::EnUsLisaV3Voice => "en-US_LisaV3Voice",
            Self::EnUsMichaelV3Voice => "en-US_MichaelV3Voice",
            Self::EnUsOliviaV3Voice => "en-US_OliviaV3Voice",
            Self::EnUsAllisonExpressive => "en-US_AllisonExpressive",
            Self::EnUsEmmaExpressive => "en-US_EmmaExpressive",
            Self::EnUsLisaExpressive => "en-US_LisaExpressive",
            Self::EnUsMichaelExpressive => "en-US_MichaelExpressive",
            Self::EnGbCharlotteV3Voice => "en-GB_CharlotteV3Voice",
            Self::EnGbJamesV3Voice => "en-GB_JamesV3Voice",
            Self::EnGbKateV3Voice => "en-GB_KateV3Voice",
            Self::EnAuHeidiExpressive => "en-AU_HeidiExpressive",
            Self::EnAuJackExpressive => "en-AU_JackExpressive",
            Self::DeDeBirgitV3Voice => "de-DE_BirgitV3Voice",
            Self::DeDeDieterV3Voice => "de-DE_DieterV3Voice",
            Self::DeDeErikaV3Voice => "de-DE_ErikaV3Voice",
            Self::EsEsEnriqueV3Voice => "es-ES_EnriqueV3Voice",
            Self::EsEsLauraV3Voice => "es-ES_LauraV3Voice",
            Self::EsLaSofiaV3Voice => "es-LA_SofiaV3Voice",
            Self::EsUsSofiaV3Voice => "es-US_SofiaV3Voice",
            Self::FrFrNicolasV3Voice => "fr-FR_NicolasV3Voice",
            Self::FrFrReneeV3Voice => "fr-FR_ReneeV3Voice",
            Self::FrCaLouiseV3Voice => "fr-CA_LouiseV3Voice",
            Self::ItItFrancescaV3Voice => "it-IT_FrancescaV3Voice",
            Self::JaJpEmiV3Voice => "ja-JP_EmiV3Voice",
            Self::KoKrJinV3Voice => "ko-KR_JinV3Voice",
            Self::NlNlMerelV3Voice => "nl-NL_MerelV3Voice",
            Self::PtBrIsabelaV3Voice => "pt-BR_IsabelaV3Voice",
            Self::Custom(name) => name,
        }
    }

    /// Language code, taken from the voice name prefix (`en-US_...`).
    pub fn language_code(&self) -> &str {
        let name = self.as_str();
        name.split_once('_').map(|(lang, _)| lang).unwrap_or(name)
    }

    pub fn is_expressive(&self) -> bool {
        self.as_str().ends_with("Expressive")
    }

    /// Resolve a voice name; unknown names become [`IbmVoice::Custom`].
    ///
    /// Matching is case-insensitive, so `en-us_allisonv3voice` resolves too.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .iter()
            .find(|voice| voice.as_str().eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| Self::Custom(name.to_string()))
    }

    /// Built-in voices for a language code such as `en-GB`.
    pub fn for_language(language: &str) -> Vec<IbmVoice> {
        Self::ALL
            .iter()
            .filter(|voice| voice.language_code().eq_ignore_ascii_case(language))
            .cloned()
            .collect()
    }
}

impl std::fmt::Display for IbmVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Output Format Configuration
// =============================================================================

/// Audio formats the synthesize endpoint can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IbmOutputFormat {
    /// `audio/ogg;codecs=opus`, the service default.
    #[default]
    OggOpus,
    OggVorbis,
    Wav,
    Mp3,
    Flac,
    WebmOpus,
    WebmVorbis,
    /// Raw 16-bit PCM; the sample rate is mandatory on the wire.
    L16,
    Mulaw,
    Alaw,
    Basic,
}

impl IbmOutputFormat {
    /// `Accept` header value requesting this format.
    ///
    /// `l16`, `mulaw` and `alaw` always carry a rate; the others only when
    /// one is given.
    pub fn accept_header(&self, sample_rate: Option<u32>) -> String {
        let base = self.mime_type();
        let rate = match self {
            Self::L16 => Some(sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE)),
            Self::Mulaw | Self::Alaw => Some(sample_rate.unwrap_or(TELEPHONY_SAMPLE_RATE)),
            Self::Basic | Self::Mp3 | Self::Flac => None,
            _ => sample_rate,
        };
        match rate {
            Some(rate) => format!("{base};rate={rate}"),
            None => base.to_string(),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::OggOpus => "audio/ogg;codecs=opus",
            Self::OggVorbis => "audio/ogg;codecs=vorbis",
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mp3",
            Self::Flac => "audio/flac",
            Self::WebmOpus => "audio/webm;codecs=opus",
            Self::WebmVorbis => "audio/webm;codecs=vorbis",
            Self::L16 => "audio/l16",
            Self::Mulaw => "audio/mulaw",
            Self::Alaw => "audio/alaw",
            Self::Basic => "audio/basic",
        }
    }

    /// File extension for saving synthesized audio.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::OggOpus | Self::OggVorbis => "ogg",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::WebmOpus | Self::WebmVorbis => "webm",
            Self::L16 | Self::Mulaw | Self::Alaw => "raw",
            Self::Basic => "au",
        }
    }

    pub fn requires_sample_rate(&self) -> bool {
        matches!(self, Self::L16 | Self::Mulaw | Self::Alaw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OggOpus => "ogg-opus",
            Self::OggVorbis => "ogg-vorbis",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::WebmOpus => "webm-opus",
            Self::WebmVorbis => "webm-vorbis",
            Self::L16 => "l16",
            Self::Mulaw => "mulaw",
            Self::Alaw => "alaw",
            Self::Basic => "basic",
        }
    }

    /// Parse a short format name (`wav`, `mp3`, `ogg`, `pcm`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let format = match name.to_ascii_lowercase().as_str() {
            "ogg" | "opus" | "ogg-opus" | "ogg_opus" => Self::OggOpus,
            "ogg-vorbis" | "ogg_vorbis" | "vorbis" => Self::OggVorbis,
            "wav" | "wave" => Self::Wav,
            "mp3" | "mpeg" => Self::Mp3,
            "flac" => Self::Flac,
            "webm" | "webm-opus" | "webm_opus" => Self::WebmOpus,
            "webm-vorbis" | "webm_vorbis" => Self::WebmVorbis,
            "l16" | "pcm" | "linear16" => Self::L16,
            "mulaw" | "ulaw" => Self::Mulaw,
            "alaw" => Self::Alaw,
            "basic" => Self::Basic,
            _ => return None,
        };
        Some(format)
    }
}

impl std::fmt::Display for IbmOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phoneme alphabet for [`get_pronunciation`](super::TextToSpeechV1::get_pronunciation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeFormat {
    #[default]
    Ipa,
    Ibm,
}

impl PhonemeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipa => "ipa",
            Self::Ibm => "ibm",
        }
    }
}

// =============================================================================
// Synthesis Options
// =============================================================================

/// Parameters of a single `synthesize` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynthesizeOptions {
    /// Plain text or SSML.
    pub text: String,
    pub voice: IbmVoice,
    pub format: IbmOutputFormat,
    pub sample_rate: Option<u32>,
    /// Custom model whose word translations apply.
    pub customization_id: Option<String>,
    /// Speaking rate adjustment in percent (-100..=100).
    pub rate_percentage: Option<i32>,
    /// Pitch adjustment in percent (-100..=100).
    pub pitch_percentage: Option<i32>,
    /// `default`, `singles`, `pairs` or `triples`.
    pub spell_out_mode: Option<String>,
}

impl SynthesizeOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn voice(mut self, voice: IbmVoice) -> Self {
        self.voice = voice;
        self
    }

    pub fn format(mut self, format: IbmOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    pub fn customization_id(mut self, id: impl Into<String>) -> Self {
        self.customization_id = Some(id.into());
        self
    }

    pub fn rate_percentage(mut self, rate: i32) -> Self {
        self.rate_percentage = Some(rate);
        self
    }

    pub fn pitch_percentage(mut self, pitch: i32) -> Self {
        self.pitch_percentage = Some(pitch);
        self
    }

    pub fn validate(&self) -> WatsonResult<()> {
        if self.text.trim().is_empty() {
            return Err(WatsonError::MissingArgument("text"));
        }

        let text_bytes = self.text.len();
        if text_bytes > MAX_TEXT_LENGTH {
            return Err(WatsonError::InvalidArgument(format!(
                "text is {text_bytes} bytes, limit is {MAX_TEXT_LENGTH}"
            )));
        }

        for (name, value) in [
            ("rate_percentage", self.rate_percentage),
            ("pitch_percentage", self.pitch_percentage),
        ] {
            if let Some(value) = value
                && !PROSODY_RANGE.contains(&value)
            {
                return Err(WatsonError::InvalidArgument(format!(
                    "{name} must be between -100 and 100, got {value}"
                )));
            }
        }

        Ok(())
    }

    /// `Accept` header for the configured format and sample rate.
    pub fn accept(&self) -> String {
        self.format.accept_header(self.sample_rate)
    }

    /// Text sent to the service, wrapped in SSML `<prosody>` when a rate or
    /// pitch adjustment is set.
    pub fn body_text(&self) -> String {
        if self.rate_percentage.is_none() && self.pitch_percentage.is_none() {
            return self.text.clone();
        }

        let mut attrs = String::new();
        if let Some(rate) = self.rate_percentage {
            attrs.push_str(&format!(" rate=\"{}\"", signed_percent(rate)));
        }
        if let Some(pitch) = self.pitch_percentage {
            attrs.push_str(&format!(" pitch=\"{}\"", signed_percent(pitch)));
        }

        format!(
            "<speak version=\"1.0\"><prosody{}>{}</prosody></speak>",
            attrs,
            escape_xml(&self.text)
        )
    }

    pub(crate) fn apply<'a>(&self, request: ServiceRequest<'a>) -> ServiceRequest<'a> {
        request
            .query("voice", self.voice.as_str())
            .query_opt("customization_id", self.customization_id.as_deref())
            .query_opt("spell_out_mode", self.spell_out_mode.as_deref())
            .header("Accept", &self.accept())
            .json(&SynthesizeBody {
                text: &self.body_text(),
            })
    }
}

#[derive(Serialize)]
struct SynthesizeBody<'a> {
    text: &'a str,
}

fn signed_percent(value: i32) -> String {
    if value >= 0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
