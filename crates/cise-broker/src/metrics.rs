//! Broker metrics.

use metrics::counter;

/// Metric names as constants for consistency.
pub mod names {
    pub const CHAPTER_REQUESTS_TOTAL: &str = "cise_chapter_requests_total";
    pub const TOPIC_DETAILS_TOTAL: &str = "cise_topic_details_total";
    pub const TOPIC_PLACEHOLDERS_TOTAL: &str = "cise_topic_placeholders_total";
    pub const SONG_RESOLUTIONS_TOTAL: &str = "cise_song_resolutions_total";
    pub const STUDY_TOOL_CALLS_TOTAL: &str = "cise_study_tool_calls_total";
}

/// Record a finished chapter request.
pub fn record_chapter_request(outcome: &'static str) {
    counter!(names::CHAPTER_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record one topic detail call.
pub fn record_topic_detail(placeholder: bool) {
    counter!(names::TOPIC_DETAILS_TOTAL).increment(1);
    if placeholder {
        counter!(names::TOPIC_PLACEHOLDERS_TOTAL).increment(1);
    }
}

/// Record a finished song resolution.
pub fn record_song_resolution(outcome: &'static str) {
    counter!(names::SONG_RESOLUTIONS_TOTAL, "outcome" => outcome).increment(1);
}

/// Record a single-call study tool invocation.
pub fn record_study_tool(tool: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    counter!(names::STUDY_TOOL_CALLS_TOTAL, "tool" => tool, "outcome" => outcome).increment(1);
}
