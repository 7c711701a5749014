pub mod io;
pub mod models;
pub mod pipeline;
pub mod recognition;
pub mod stages;

pub use io::{parse_whisper_file, parse_whisper_json};
pub use models::{RawWord, TranscriptSegment, Turn, WhisperChunk, WhisperResult, Word};
pub use pipeline::{postprocess, transcribe, PostprocessConfig, Transcription};
pub use recognition::{
    FalConfig, FalWhisperBackend, Recognition, RecognitionBackend, RecognitionClient,
    RecognitionError, RecognitionOutcome, RecognitionRequest, RetryConfig,
};
pub use stages::{
    build_turns, normalize, render_segments, resolve_primary_speaker, MergeConfig,
    NormalizeConfig,
};
