use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;

use transcript_digest::{
    config::{ExtractiveConfig, PipelineConfig},
    openai::OpenAIClient,
    text::{
        safety::{SafetyFilter, SafetyVerdict},
        segmenter::{NaiveSegmenter, SentenceSegmenter, UnicodeSegmenter},
    },
    tokens::{TiktokenEstimator, TokenEstimator, WordCountEstimator},
    tracing::init_tracing_subscriber,
    transcript::{extract_video_id, parse_caption_payload},
    Summarizer, SummaryPipelineBuilder, SummaryResult, Unavailable,
};

#[derive(Parser)]
#[command(
    name = "transcript-digest",
    about = "Bounded-length summaries of long video transcripts"
)]
struct Cli {
    /// OpenAI API key; without one only extractive summaries are produced
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    /// Chat model used for abstractive summaries
    #[arg(long, env = "SUMMARIZER_MODEL")]
    model: Option<String>,

    /// Count words instead of model tokens
    #[arg(long, env = "WORD_COUNT_BUDGETS")]
    word_count: bool,

    /// Split sentences on ". " instead of Unicode sentence rules
    #[arg(long)]
    naive_sentences: bool,

    /// Newline-separated safety keyword list
    #[arg(long, env = "SAFETY_KEYWORDS_FILE")]
    keywords_file: Option<PathBuf>,

    #[command(flatten)]
    budgets: BudgetArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct BudgetArgs {
    /// Minimum transcript length in words
    #[arg(long, env = "MIN_WORDS", default_value = "30")]
    min_words: usize,

    /// Largest input for one generative call
    #[arg(long, env = "SINGLE_CALL_BUDGET", default_value = "900")]
    single_call_budget: usize,

    /// Budget per chunk when the transcript is split
    #[arg(long, env = "CHUNK_BUDGET", default_value = "800")]
    chunk_budget: usize,

    /// Floor of the per-chunk summary length
    #[arg(long, env = "MIN_TARGET_LENGTH", default_value = "30")]
    min_target_length: usize,

    /// Requested minimum summary length, kept below each target
    #[arg(long, env = "ABSTRACTIVE_MIN_LENGTH", default_value = "40")]
    abstractive_min_length: usize,

    /// Concatenated summaries above this size are compressed again
    #[arg(long, env = "REDUCE_THRESHOLD", default_value = "400")]
    reduce_threshold: usize,

    /// Character budget of the last-resort truncation
    #[arg(long, env = "TRUNCATE_CHARS", default_value = "1500")]
    truncate_chars: usize,

    /// Share of sentences kept by the extractive summarizer
    #[arg(long, env = "EXTRACTIVE_PROPORTION", default_value = "0.2")]
    extractive_proportion: f64,

    /// Most sentences the extractive summarizer keeps
    #[arg(long, env = "EXTRACTIVE_MAX_SENTENCES", default_value = "12")]
    extractive_max_sentences: usize,

    /// Vocabulary cap of the extractive term matrix
    #[arg(long, env = "EXTRACTIVE_MAX_VOCABULARY", default_value = "1000")]
    extractive_max_vocabulary: usize,

    /// Block transcripts that do not read as English
    #[arg(long, env = "REQUIRE_ENGLISH")]
    require_english: bool,

    /// Share of common English words the language gate requires
    #[arg(long, env = "ENGLISH_MIN_RATIO", default_value = "0.05")]
    english_min_ratio: f64,
}

impl BudgetArgs {
    fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            min_words: self.min_words,
            single_call_budget: self.single_call_budget,
            chunk_budget: self.chunk_budget,
            min_target_length: self.min_target_length,
            abstractive_min_length: self.abstractive_min_length,
            reduce_threshold: self.reduce_threshold,
            truncate_chars: self.truncate_chars,
            require_english: self.require_english,
            english_min_ratio: self.english_min_ratio,
            extractive: ExtractiveConfig {
                proportion: self.extractive_proportion,
                max_sentences: self.extractive_max_sentences,
                max_vocabulary: self.extractive_max_vocabulary,
                ..Default::default()
            },
        }
    }
}

#[derive(Args)]
struct InputArgs {
    /// Transcript file; reads stdin when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Treat the input as a timed-text caption JSON payload
    #[arg(long)]
    captions_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a transcript and print `{summary, status}` as JSON
    Summarize {
        #[command(flatten)]
        input: InputArgs,

        /// Video URL; its id becomes the cache key
        #[arg(long)]
        url: Option<String>,

        /// Target summary length
        #[arg(long, default_value = "150")]
        max_length: usize,
    },
    /// Print the extractive summary only
    Extract {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Run the safety filter only
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

async fn read_transcript(args: &InputArgs) -> anyhow::Result<String> {
    let raw = match &args.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    if args.captions_json {
        return parse_caption_payload(&raw).context("Failed to parse caption payload");
    }
    Ok(raw)
}

fn build_estimator(word_count: bool) -> Box<dyn TokenEstimator + Send + Sync> {
    if word_count {
        return Box::new(WordCountEstimator);
    }
    match TiktokenEstimator::new() {
        Ok(estimator) => Box::new(estimator),
        Err(e) => {
            tracing::warn!(error = %e, "Tokenizer unavailable, budgets fall back to word counts");
            Box::new(WordCountEstimator)
        }
    }
}

fn build_segmenter(naive: bool) -> Box<dyn SentenceSegmenter + Send + Sync> {
    if naive {
        Box::new(NaiveSegmenter)
    } else {
        Box::new(UnicodeSegmenter)
    }
}

async fn run_command<S: Summarizer + Send + Sync>(
    cli: &Cli,
    summarizer: S,
) -> anyhow::Result<()> {
    let safety = match &cli.keywords_file {
        Some(path) => SafetyFilter::from_file(path)?,
        None => SafetyFilter::default(),
    };

    let pipeline = SummaryPipelineBuilder::new(cli.budgets.to_config())
        .summarizer(summarizer)
        .estimator(build_estimator(cli.word_count))
        .segmenter(build_segmenter(cli.naive_sentences))
        .safety_filter(safety)
        .build()
        .context("Invalid pipeline configuration")?;
    tracing::debug!(config = ?pipeline.config(), model = S::SUMMARIZER_MODEL, "Pipeline ready");

    match &cli.command {
        Command::Summarize {
            input,
            url,
            max_length,
        } => {
            let transcript = read_transcript(input).await?;
            let result: SummaryResult = match url {
                Some(url) => {
                    let video_id = extract_video_id(url)?;
                    pipeline.summarize(&video_id, &transcript, *max_length).await
                }
                None => pipeline.summarize_transcript(&transcript, *max_length).await,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Extract { input } => {
            let transcript = read_transcript(input).await?;
            println!("{}", pipeline.extract(&transcript));
        }
        Command::Check { input } => {
            let transcript = read_transcript(input).await?;
            match pipeline.check(&transcript) {
                SafetyVerdict::Safe => println!("safe"),
                SafetyVerdict::Unsafe { keyword } => println!("unsafe: {keyword}"),
            }
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    match &cli.openai_key {
        Some(key) => {
            let mut client = OpenAIClient::new(key);
            if let Some(url) = &cli.openai_base_url {
                client = client.with_base_url(url);
            }
            if let Some(model) = &cli.model {
                client = client.with_model(model);
            }
            run_command(&cli, client).await
        }
        None => {
            tracing::info!("No OpenAI key configured, using extractive summaries only");
            run_command(&cli, Unavailable).await
        }
    }
}
