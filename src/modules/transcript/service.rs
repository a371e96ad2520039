use super::dto::{ExtractTranscriptResponse, TranscriptMetadata};
use crate::common::error::{AppError, AppResult};
use crate::common::text::strip_timestamps;
use crate::providers::youtube::{self, TranscriptSegment};
use crate::providers::ProviderError;
use crate::state::AppState;

pub struct TranscriptService;

impl TranscriptService {
    pub async fn extract(state: AppState, url: &str) -> AppResult<ExtractTranscriptResponse> {
        let video_id = youtube::parse_video_id(url)
            .ok_or_else(|| AppError::BadRequest("Not a recognizable YouTube URL".to_string()))?;

        let segments = match youtube::fetch_transcript(&state.http, &video_id).await {
            Ok(segments) => segments,
            Err(ProviderError::Malformed { .. }) => {
                return Err(AppError::NotFound(
                    "No transcript available for this video".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        if segments.is_empty() {
            return Err(AppError::NotFound(
                "No transcript available for this video".to_string(),
            ));
        }

        Ok(assemble(&video_id, &segments))
    }
}

/// Build the response shape from raw caption segments.
///
/// `transcript` is the space-joined trimmed segment texts; `paragraphs`
/// holds one entry per non-empty segment, so joining them with the same
/// separator reproduces `transcript` exactly.
pub fn assemble(video_id: &str, segments: &[TranscriptSegment]) -> ExtractTranscriptResponse {
    let paragraphs: Vec<String> = segments
        .iter()
        .map(|s| strip_timestamps(s.text.trim()))
        .filter(|text| !text.is_empty())
        .collect();

    let transcript = paragraphs.join(" ");

    let duration = segments
        .iter()
        .map(|s| s.offset + s.duration)
        .fold(0.0_f64, f64::max);

    ExtractTranscriptResponse {
        transcript,
        metadata: TranscriptMetadata {
            video_id: video_id.to_string(),
            duration,
            segment_count: paragraphs.len(),
        },
        paragraphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, offset: f64, duration: f64) -> TranscriptSegment {
        TranscriptSegment {
            text: text.to_string(),
            offset,
            duration,
        }
    }

    #[test]
    fn hello_world_scenario() {
        let segments = vec![seg("Hello", 0.0, 2.0), seg("world", 2.0, 1.0)];
        let result = assemble("vid", &segments);

        assert_eq!(result.transcript, "Hello world");
        assert_eq!(result.paragraphs, vec!["Hello", "world"]);
        assert_eq!(result.metadata.duration, 3.0);
    }

    #[test]
    fn paragraphs_reassemble_into_transcript() {
        let segments = vec![
            seg("  so today ", 0.0, 4.2),
            seg("we are talking", 4.2, 2.0),
            seg("about parody", 6.2, 3.1),
        ];
        let result = assemble("vid", &segments);

        assert_eq!(result.paragraphs.join(" "), result.transcript);
        assert_eq!(result.transcript, "so today we are talking about parody");
    }

    #[test]
    fn blank_segments_are_dropped() {
        let segments = vec![seg("Hello", 0.0, 1.0), seg("   ", 1.0, 1.0), seg("there", 2.0, 1.0)];
        let result = assemble("vid", &segments);

        assert_eq!(result.paragraphs, vec!["Hello", "there"]);
        assert_eq!(result.metadata.segment_count, 2);
    }

    #[test]
    fn timestamp_markers_are_stripped() {
        let segments = vec![seg("[00:01] Hello", 0.0, 1.0)];
        let result = assemble("vid", &segments);
        assert_eq!(result.transcript, "Hello");
    }

    #[test]
    fn duration_uses_latest_segment_end() {
        let segments = vec![seg("a", 0.0, 10.0), seg("b", 3.0, 2.0)];
        let result = assemble("vid", &segments);
        assert_eq!(result.metadata.duration, 10.0);
    }
}
