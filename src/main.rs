use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use watson_sdk::ServiceConfig;
use watson_sdk::core::assistant::{self, AssistantV1, ListOptions, MessageRequest};
use watson_sdk::core::discovery::{self, DiscoveryV1, QueryOptions};
use watson_sdk::core::speech_to_text::{
    self, IbmAudioEncoding, IbmModel, RecognizeOptions, SpeechToTextV1,
};
use watson_sdk::core::text_to_speech::{
    self, IbmOutputFormat, IbmVoice, SynthesizeOptions, TextToSpeechV1,
};

/// Command-line client for IBM Watson services
#[derive(Parser, Debug)]
#[command(name = "watson")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML credentials file; environment variables and
    /// ibm-credentials.env are used when not given
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Text to Speech
    #[command(subcommand)]
    Tts(TtsCommand),

    /// Speech to Text
    #[command(subcommand)]
    Stt(SttCommand),

    /// Assistant V1
    #[command(subcommand)]
    Assistant(AssistantCommand),

    /// Discovery V1
    #[command(subcommand)]
    Discovery(DiscoveryCommand),
}

#[derive(Subcommand, Debug)]
enum TtsCommand {
    /// List available voices
    Voices,

    /// Synthesize text to an audio file
    Synthesize {
        #[arg(short, long)]
        text: String,

        #[arg(short, long, default_value = text_to_speech::DEFAULT_VOICE)]
        voice: String,

        /// Output format (ogg, wav, mp3, flac, l16, ...); defaults to the
        /// extension of --out
        #[arg(short, long)]
        format: Option<String>,

        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum SttCommand {
    /// List available models
    Models,

    /// Transcribe an audio file
    Recognize {
        #[arg(short, long)]
        audio: PathBuf,

        /// MIME type of the audio; guessed from the file extension when omitted
        #[arg(long)]
        content_type: Option<String>,

        #[arg(short, long)]
        model: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum AssistantCommand {
    /// List workspaces
    Workspaces {
        /// API version date
        #[arg(long, default_value = assistant::LATEST_VERSION)]
        api_version: String,
    },

    /// Send one message to a workspace
    Message {
        #[arg(short, long)]
        workspace: String,

        #[arg(short, long)]
        text: String,

        /// API version date
        #[arg(long, default_value = assistant::LATEST_VERSION)]
        api_version: String,
    },
}

#[derive(Subcommand, Debug)]
enum DiscoveryCommand {
    /// List environments
    Environments {
        /// API version date
        #[arg(long, default_value = discovery::LATEST_VERSION)]
        api_version: String,
    },

    /// Run a natural language query against a collection
    Query {
        #[arg(short, long)]
        environment: String,

        #[arg(long)]
        collection: String,

        #[arg(short, long)]
        query: String,

        #[arg(long, default_value_t = 10)]
        count: i64,

        /// API version date
        #[arg(long, default_value = discovery::LATEST_VERSION)]
        api_version: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Tts(command) => run_tts(command, config).await,
        Commands::Stt(command) => run_stt(command, config).await,
        Commands::Assistant(command) => run_assistant(command, config).await,
        Commands::Discovery(command) => run_discovery(command, config).await,
    }
}

/// Service configuration from the YAML file when given, default sources otherwise.
fn load_config(path: Option<&Path>, service_name: &str) -> anyhow::Result<ServiceConfig> {
    let config = match path {
        Some(path) => ServiceConfig::from_yaml_file(path, service_name),
        None => ServiceConfig::load(service_name),
    };
    config.with_context(|| format!("Failed to load {service_name} configuration"))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", render_json(value)?);
    Ok(())
}

fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn run_tts(command: TtsCommand, config: Option<&Path>) -> anyhow::Result<()> {
    let tts = TextToSpeechV1::from_config(&load_config(config, text_to_speech::SERVICE_NAME)?)?;

    match command {
        TtsCommand::Voices => print_json(&tts.list_voices().await?),
        TtsCommand::Synthesize {
            text,
            voice,
            format,
            out,
        } => {
            let format = match format {
                Some(name) => IbmOutputFormat::from_name(&name)
                    .ok_or_else(|| anyhow!("Unknown output format '{name}'"))?,
                None => out
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(IbmOutputFormat::from_name)
                    .unwrap_or_default(),
            };
            let options = SynthesizeOptions::new(text)
                .voice(IbmVoice::from_name(&voice))
                .format(format);

            let audio = tts.synthesize(&options).await?;
            tokio::fs::write(&out, &audio)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!(bytes = audio.len(), path = %out.display(), "Wrote synthesized audio");
            Ok(())
        }
    }
}

async fn run_stt(command: SttCommand, config: Option<&Path>) -> anyhow::Result<()> {
    let stt = SpeechToTextV1::from_config(&load_config(config, speech_to_text::SERVICE_NAME)?)?;

    match command {
        SttCommand::Models => print_json(&stt.list_models().await?),
        SttCommand::Recognize {
            audio,
            content_type,
            model,
        } => {
            let content_type = match content_type {
                Some(content_type) => content_type,
                None => audio
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(IbmAudioEncoding::from_extension)
                    .map(|encoding| encoding.content_type(16000))
                    .ok_or_else(|| {
                        anyhow!(
                            "Cannot guess the audio type of {}; pass --content-type",
                            audio.display()
                        )
                    })?,
            };
            let options = match model {
                Some(name) => RecognizeOptions::for_model(IbmModel::from_name(&name)),
                None => RecognizeOptions::default(),
            };

            let data = tokio::fs::read(&audio)
                .await
                .with_context(|| format!("Failed to read {}", audio.display()))?;
            let results = stt.recognize(data, &content_type, &options).await?;
            info!(transcript = %results.transcript(), "Recognized audio");
            print_json(&results)
        }
    }
}

async fn run_assistant(command: AssistantCommand, config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config, assistant::SERVICE_NAME)?;

    match command {
        AssistantCommand::Workspaces { api_version } => {
            let assistant = AssistantV1::from_config(&api_version, &config)?;
            print_json(&assistant.list_workspaces(&ListOptions::default()).await?)
        }
        AssistantCommand::Message {
            workspace,
            text,
            api_version,
        } => {
            let assistant = AssistantV1::from_config(&api_version, &config)?;
            let response = assistant
                .message(&workspace, &MessageRequest::text(text), None)
                .await?;
            print_json(&response)
        }
    }
}

async fn run_discovery(command: DiscoveryCommand, config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config, discovery::SERVICE_NAME)?;

    match command {
        DiscoveryCommand::Environments { api_version } => {
            let discovery = DiscoveryV1::from_config(&api_version, &config)?;
            print_json(&discovery.list_environments(None).await?)
        }
        DiscoveryCommand::Query {
            environment,
            collection,
            query,
            count,
            api_version,
        } => {
            let discovery = DiscoveryV1::from_config(&api_version, &config)?;
            let options = QueryOptions::natural_language(query).count(count);
            print_json(&discovery.query(&environment, &collection, &options).await?)
        }
    }
}
