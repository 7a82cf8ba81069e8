mod mocks;

use std::sync::Arc;

use mocks::summarizer::MockSummarizer;
use transcript_digest::{
    config::PipelineConfig,
    text::{
        safety::SAFETY_ADVISORY,
        segmenter::{NaiveSegmenter, UnicodeSegmenter},
        word_count,
    },
    tokens::WordCountEstimator,
    InMemoryCache, SummaryPipeline, SummaryPipelineBuilder, SummaryStatus, Unavailable,
};

const BENIGN_SENTENCES: &[&str] = &[
    "The river valley offers quiet trails for walking families.",
    "Local farmers bring fresh apples to the market every Saturday morning.",
    "Our guide explained how glaciers shaped the northern hills over time.",
    "Volunteers planted oak seedlings along the eastern riverbank.",
    "The library hosts a reading circle for children on rainy afternoons.",
    "Engineers tested the new footbridge with careful load measurements.",
    "Bird watchers counted herons and egrets near the wetland ponds.",
    "The bakery on the corner sells warm bread and honey cakes.",
    "Students measured rainfall with simple gauges made from bottles.",
    "A small orchestra rehearsed in the town hall before the festival.",
];

/// Benign transcript of at least `words` words. Every sentence is unique.
fn benign_transcript(words: usize) -> String {
    let mut parts = Vec::new();
    let mut total = 0;
    let mut idx = 0;
    while total < words {
        let base = BENIGN_SENTENCES[idx % BENIGN_SENTENCES.len()].trim_end_matches('.');
        let sentence = format!("{base} in part {idx}.");
        total += word_count(&sentence);
        parts.push(sentence);
        idx += 1;
    }
    parts.join(" ")
}

/// Splits an extractive summary back into its sentences, each with its period.
fn sentences_of(summary: &str) -> Vec<String> {
    summary
        .split(". ")
        .map(|s| format!("{}.", s.trim_end_matches('.')))
        .collect()
}

fn pipeline(
    summarizer: MockSummarizer,
) -> SummaryPipeline<MockSummarizer, WordCountEstimator, NaiveSegmenter, InMemoryCache> {
    SummaryPipelineBuilder::new(PipelineConfig::default())
        .summarizer(summarizer)
        .build()
        .expect("default config is valid")
}

// ─── Input gates ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_short_transcript_is_blocked_without_summarizing() {
    let summarizer = MockSummarizer::new("unused");
    let pipeline = pipeline(summarizer.clone());

    let result = pipeline
        .summarize("short-video", &"word ".repeat(10), 150)
        .await;

    assert_eq!(result.status, SummaryStatus::Blocked);
    assert!(result.summary.contains("too short"), "got {:?}", result.summary);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_zero_max_length_is_blocked() {
    let pipeline = pipeline(MockSummarizer::new("unused"));
    let result = pipeline.summarize("v", &benign_transcript(100), 0).await;
    assert_eq!(result.status, SummaryStatus::Blocked);
}

#[tokio::test]
async fn test_annotations_do_not_count_towards_minimum() {
    let summarizer = MockSummarizer::new("unused");
    let pipeline = pipeline(summarizer.clone());

    let transcript = format!("{} [Music] [Applause] (laughs) [Music]", "word ".repeat(20));
    let result = pipeline.summarize("annotated", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Blocked);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_unsafe_keyword_blocks_with_advisory() {
    let summarizer = MockSummarizer::new("unused");
    let pipeline = pipeline(summarizer.clone());

    let benign = benign_transcript(200);
    let (head, tail) = benign.split_at(benign.len() / 2);
    let transcript = format!("{head} Then a distant explosion echoed. {tail}");

    let result = pipeline.summarize("unsafe-video", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Blocked);
    assert_eq!(result.summary, SAFETY_ADVISORY);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_keyword_inside_annotation_still_blocks() {
    let summarizer = MockSummarizer::new("ok summary");
    let pipeline = pipeline(summarizer.clone());

    let transcript = format!("{} [explosion] (gunfire)", benign_transcript(120));
    let result = pipeline.summarize("annotated-unsafe", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Blocked);
    assert_eq!(result.summary, SAFETY_ADVISORY);
    assert_eq!(summarizer.call_count(), 0);
    assert!(pipeline.cache().is_empty());
}

#[tokio::test]
async fn test_unsafe_transcript_is_never_summarized() {
    let summarizer = MockSummarizer::new("unused");
    let pipeline = pipeline(summarizer.clone());

    for (words, max_length) in [(60, 20), (500, 150), (2_000, 400)] {
        let transcript = format!("{} The WEAPON was displayed.", benign_transcript(words));
        let result = pipeline
            .summarize(&format!("video-{words}"), &transcript, max_length)
            .await;
        assert_eq!(result.status, SummaryStatus::Blocked, "{words} words");
        assert_eq!(result.summary, SAFETY_ADVISORY);
    }
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_non_english_is_blocked_when_gate_enabled() {
    let config = PipelineConfig {
        require_english: true,
        ..Default::default()
    };
    let summarizer = MockSummarizer::new("unused");
    let pipeline = SummaryPipelineBuilder::new(config)
        .summarizer(summarizer.clone())
        .build()
        .unwrap();

    let transcript = "Hoy vamos a hablar sobre el clima y las mareas durante toda la semana. "
        .repeat(5);
    let result = pipeline.summarize("es", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Blocked);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_language_gate_threshold_is_configurable() {
    let strict = SummaryPipelineBuilder::new(PipelineConfig {
        require_english: true,
        english_min_ratio: 0.5,
        ..Default::default()
    })
    .summarizer(MockSummarizer::new("unused"))
    .build()
    .unwrap();
    // roughly a fifth of these words are markers
    let result = strict.summarize("strict", &benign_transcript(100), 150).await;
    assert_eq!(result.status, SummaryStatus::Blocked);

    let lenient = SummaryPipelineBuilder::new(PipelineConfig {
        require_english: true,
        english_min_ratio: 0.0,
        ..Default::default()
    })
    .summarizer(MockSummarizer::new("Resumen."))
    .build()
    .unwrap();
    let transcript = "Hoy vamos a hablar sobre el clima y las mareas durante toda la semana. "
        .repeat(5);
    let result = lenient.summarize("lenient", &transcript, 150).await;
    assert_eq!(result.status, SummaryStatus::Allowed);
}

// ─── Strategy selection ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_short_transcript_uses_one_direct_call() {
    let summarizer = MockSummarizer::new("  A concise abstract.  ");
    let pipeline = pipeline(summarizer.clone());

    let transcript = benign_transcript(50);
    let result = pipeline.summarize("single", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Allowed);
    assert_eq!(result.summary, "A concise abstract.");

    let calls = summarizer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].max_length, 150);
    assert_eq!(calls[0].min_length, 40);
    assert_eq!(calls[0].content, transcript);
}

#[tokio::test]
async fn test_min_length_is_clamped_below_target() {
    let summarizer = MockSummarizer::new("ok");
    let pipeline = pipeline(summarizer.clone());

    pipeline.summarize("tiny", &benign_transcript(60), 25).await;

    let calls = summarizer.calls.lock().unwrap();
    assert_eq!(calls[0].max_length, 25);
    assert_eq!(calls[0].min_length, 24);
}

#[tokio::test]
async fn test_long_transcript_is_summarized_per_chunk() {
    let summarizer = MockSummarizer::leading_words();
    let pipeline = pipeline(summarizer.clone());

    let transcript = benign_transcript(5_000);
    let result = pipeline.summarize("long", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Allowed);
    assert!(!result.summary.is_empty());
    assert!(word_count(&result.summary) <= 400, "summary is unbounded");

    let calls = summarizer.calls.lock().unwrap();
    assert!(calls.len() >= 7, "expected one call per chunk, got {}", calls.len());
    for call in calls.iter() {
        assert!(word_count(&call.content) <= 800);
        // 150 split across many chunks hits the floor
        assert_eq!(call.max_length, 30);
        assert!(call.min_length < call.max_length);
    }
}

#[tokio::test]
async fn test_oversized_concatenation_gets_a_reduce_pass() {
    let config = PipelineConfig {
        reduce_threshold: 100,
        ..Default::default()
    };
    let summarizer = MockSummarizer::leading_words();
    let pipeline = SummaryPipelineBuilder::new(config)
        .summarizer(summarizer.clone())
        .build()
        .unwrap();

    let result = pipeline.summarize("reduced", &benign_transcript(5_000), 150).await;

    assert_eq!(result.status, SummaryStatus::Allowed);
    assert_eq!(word_count(&result.summary), 150);

    let calls = summarizer.calls.lock().unwrap();
    let (reduce_call, chunk_calls) = calls.split_last().unwrap();
    assert!(chunk_calls.iter().all(|call| call.max_length == 30));
    assert_eq!(reduce_call.max_length, 150);
    assert_eq!(
        word_count(&reduce_call.content),
        chunk_calls.len() * 30,
        "reduce input is the concatenated chunk summaries"
    );
}

#[tokio::test]
async fn test_per_chunk_failures_fall_back_to_extractive() {
    let summarizer = MockSummarizer::failing("model offline");
    let pipeline = pipeline(summarizer.clone());

    let transcript = benign_transcript(3_000);
    let result = pipeline.summarize("offline", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Allowed);
    assert!(summarizer.call_count() > 1);
    // extractive output is made of source sentences
    for sentence in sentences_of(&result.summary) {
        assert!(transcript.contains(&sentence), "{sentence:?} not in source");
    }
}

#[tokio::test]
async fn test_failed_direct_call_falls_back_to_extractive() {
    let summarizer = MockSummarizer::failing("rate limited");
    let pipeline = pipeline(summarizer.clone());

    let transcript = benign_transcript(120);
    let result = pipeline.summarize("direct-fallback", &transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Allowed);
    assert_eq!(summarizer.call_count(), 1);
    for sentence in sentences_of(&result.summary) {
        assert!(transcript.contains(&sentence), "{sentence:?} not in source");
    }
}

#[tokio::test]
async fn test_without_summarizer_output_is_still_bounded() {
    let config = PipelineConfig::default();
    let pipeline = SummaryPipelineBuilder::new(config.clone())
        .summarizer(Unavailable)
        .segmenter(UnicodeSegmenter)
        .build()
        .unwrap();

    // no punctuation at all: one giant sentence split at word level
    let transcript = benign_transcript(5_000).replace('.', "");
    let result = pipeline.summarize_transcript(&transcript, 150).await;

    assert_eq!(result.status, SummaryStatus::Allowed);
    let within_tokens = word_count(&result.summary) <= config.reduce_threshold;
    let within_chars = result.summary.chars().count() <= config.truncate_chars + 3;
    assert!(within_tokens || within_chars);
}

#[tokio::test]
async fn test_failed_reduce_truncates_with_ellipsis() {
    let config = PipelineConfig {
        reduce_threshold: 50,
        truncate_chars: 200,
        ..Default::default()
    };
    let summarizer = MockSummarizer::failing("model offline");
    let pipeline = SummaryPipelineBuilder::new(config.clone())
        .summarizer(summarizer.clone())
        .build()
        .unwrap();

    // every chunk and the extractive reduce output stay over the 50-unit limit
    let result = pipeline.summarize("truncated", &benign_transcript(3_000), 40).await;

    assert_eq!(result.status, SummaryStatus::Allowed);
    assert!(result.summary.ends_with("..."), "got {:?}", result.summary);
    assert!(result.summary.chars().count() <= config.truncate_chars + 3);
    // one call per chunk plus the reduce attempt
    assert!(summarizer.call_count() >= 5);
}

// ─── Extractive entry point ──────────────────────────────────────────────────

#[tokio::test]
async fn test_extract_three_sentences_returns_one_in_order() {
    let pipeline = pipeline(MockSummarizer::new("unused"));
    let transcript = "Harbor cranes load cargo ships at dawn. Cargo ships leave the harbor at noon. Gulls circle overhead.";

    let summary = pipeline.extract(transcript);

    let sentences = [
        "Harbor cranes load cargo ships at dawn.",
        "Cargo ships leave the harbor at noon.",
        "Gulls circle overhead.",
    ];
    assert!(sentences.contains(&summary.as_str()), "got {summary:?}");
}

#[tokio::test]
async fn test_extract_preserves_source_order() {
    let pipeline = pipeline(MockSummarizer::new("unused"));
    let transcript = benign_transcript(1_000);

    let summary = pipeline.extract(&transcript);
    let picked = sentences_of(&summary);
    assert_eq!(picked.len(), 12);

    let positions = picked
        .iter()
        .map(|s| transcript.find(s.as_str()).expect("sentence from source"))
        .collect::<Vec<_>>();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

// ─── Caching and determinism ─────────────────────────────────────────────────

#[tokio::test]
async fn test_repeated_request_is_served_from_cache() {
    let summarizer = MockSummarizer::new("Cached summary.");
    let pipeline = pipeline(summarizer.clone());
    let transcript = benign_transcript(100);

    let first = pipeline.summarize("dQw4w9WgXcQ", &transcript, 150).await;
    let second = pipeline.summarize("dQw4w9WgXcQ", &transcript, 150).await;

    assert_eq!(first, second);
    assert_eq!(summarizer.call_count(), 1);

    // a different length is a different entry
    pipeline.summarize("dQw4w9WgXcQ", &transcript, 60).await;
    assert_eq!(summarizer.call_count(), 2);
}

#[tokio::test]
async fn test_blocked_results_are_not_cached() {
    let pipeline = pipeline(MockSummarizer::new("unused"));
    pipeline.summarize("short", "too few words", 150).await;
    assert!(pipeline.cache().is_empty());
}

#[tokio::test]
async fn test_shared_cache_across_pipelines() {
    let cache = Arc::new(InMemoryCache::new());
    let first_model = MockSummarizer::new("From the first pipeline.");
    let second_model = MockSummarizer::new("From the second pipeline.");

    let first = SummaryPipelineBuilder::new(PipelineConfig::default())
        .summarizer(first_model.clone())
        .cache(Arc::clone(&cache))
        .build()
        .unwrap();
    let second = SummaryPipelineBuilder::new(PipelineConfig::default())
        .summarizer(second_model.clone())
        .cache(Arc::clone(&cache))
        .build()
        .unwrap();

    let transcript = benign_transcript(100);
    let a = first.summarize("shared", &transcript, 150).await;
    let b = second.summarize("shared", &transcript, 150).await;

    assert_eq!(a.summary, "From the first pipeline.");
    assert_eq!(a, b);
    assert_eq!(second_model.call_count(), 0);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_identical_requests_are_deterministic() {
    let transcript = benign_transcript(4_000);

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let pipeline = pipeline(MockSummarizer::leading_words());
        outputs.push(pipeline.summarize("det", &transcript, 120).await);
    }
    assert_eq!(outputs[0], outputs[1]);

    let extractive = pipeline(MockSummarizer::failing("down"));
    let again = pipeline(MockSummarizer::failing("down"));
    assert_eq!(
        extractive.summarize("det", &transcript, 120).await,
        again.summarize("det", &transcript, 120).await
    );
}

#[tokio::test]
async fn test_concurrent_requests_share_one_pipeline() {
    let pipeline = Arc::new(pipeline(MockSummarizer::new("Parallel summary.")));
    let transcript = Arc::new(benign_transcript(200));

    let handles = (0..4)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            let transcript = Arc::clone(&transcript);
            tokio::spawn(async move {
                pipeline
                    .summarize(&format!("video-{}", i % 2), &transcript, 150)
                    .await
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result.status, SummaryStatus::Allowed);
        assert_eq!(result.summary, "Parallel summary.");
    }
    assert_eq!(pipeline.cache().len(), 2);
}
