//! Pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::authoring::AuthoringError;
use crate::llm::LlmError;
use crate::sink::SinkError;
use crate::speech::SpeechError;
use crate::storage::StorageError;
use crate::transcriber::TranscriptionError;

/// Errors that prevent a run from starting.
///
/// Stage failures never surface here; they are recorded on the result.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Input is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Input path has no file name: {0}")]
    NoFileName(PathBuf),

    #[error("Failed to set up {service}: {message}")]
    Setup {
        service: &'static str,
        message: String,
    },
}

impl From<StorageError> for PipelineError {
    fn from(e: StorageError) -> Self {
        PipelineError::Setup {
            service: "storage",
            message: e.to_string(),
        }
    }
}

impl From<LlmError> for PipelineError {
    fn from(e: LlmError) -> Self {
        PipelineError::Setup {
            service: "llm",
            message: e.to_string(),
        }
    }
}

/// Failure of a single stage, recorded on the result as a message.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Missing input: no {0} available")]
    MissingInput(&'static str),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Authoring(#[from] AuthoringError),

    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = StageError::MissingInput("English transcript");
        assert_eq!(err.to_string(), "Missing input: no English transcript available");
    }

    #[test]
    fn test_stage_error_is_transparent() {
        let err = StageError::from(SpeechError::EmptyText);
        assert_eq!(err.to_string(), SpeechError::EmptyText.to_string());
    }
}
