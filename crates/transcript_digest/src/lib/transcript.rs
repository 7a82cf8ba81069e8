//! # Transcript sources
//!
//! Helpers for turning what a video platform hands out into the plain transcript
//! string the pipeline consumes: the video id used as content identity, and the
//! timed-text caption payload flattened to text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::TranscriptError;

static VIDEO_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").unwrap());

/// Extracts the 11-character video id from a watch, short or embed URL.
///
/// # Returns
/// * `Ok(String)` with the first id-shaped match after `v=` or a `/`.
/// * `Err(TranscriptError::InvalidUrl)` if there is none.
pub fn extract_video_id(url: &str) -> Result<String, TranscriptError> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TranscriptError::InvalidUrl(url.to_string()))
}

#[derive(Debug, Deserialize)]
struct CaptionPayload {
    events: Option<Vec<CaptionEvent>>,
}

#[derive(Debug, Deserialize)]
struct CaptionEvent {
    segs: Option<Vec<CaptionSegment>>,
}

#[derive(Debug, Deserialize)]
struct CaptionSegment {
    utf8: Option<String>,
}

/// Flattens a timed-text caption payload (`events[].segs[].utf8`) into a single
/// transcript. Line breaks inside segments become spaces, empty segments are
/// dropped and the rest are joined with single spaces.
#[tracing::instrument(skip_all, fields(bytes = raw.len()))]
pub fn parse_caption_payload(raw: &str) -> Result<String, TranscriptError> {
    let payload = serde_json::from_str::<CaptionPayload>(raw)?;
    let events = payload
        .events
        .ok_or(TranscriptError::ParseError("caption payload has no 'events' array"))?;

    let parts = events
        .into_iter()
        .flat_map(|event| event.segs.unwrap_or_default())
        .filter_map(|seg| seg.utf8)
        .map(|text| text.replace('\n', " ").trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>();

    tracing::debug!(segments = parts.len(), "Parsed caption payload");
    Ok(parts.join(" "))
}
