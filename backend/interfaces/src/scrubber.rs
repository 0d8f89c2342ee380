/// Redacts secrets from a logged request/response transcript.
pub trait TranscriptScrubber {
    fn supports_scrubbing(&self) -> bool {
        false
    }

    /// Must be idempotent: scrubbing an already scrubbed transcript changes nothing.
    fn scrub(&self, transcript: &str) -> String {
        transcript.to_string()
    }
}
