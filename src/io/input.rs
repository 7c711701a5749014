use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{RawWord, WhisperResult};

/// Parse a saved recognition response file into raw words
pub fn parse_whisper_file(path: &Path) -> Result<Vec<RawWord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_whisper_json(&content)
}

/// Parse a recognition response JSON string into raw words
pub fn parse_whisper_json(json: &str) -> Result<Vec<RawWord>> {
    let result: WhisperResult =
        serde_json::from_str(json).context("Failed to parse recognition response JSON")?;
    Ok(result.chunks.iter().map(RawWord::from_chunk).collect())
}
