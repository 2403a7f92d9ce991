//! Testing utilities and mock implementations of every collaborator.
//!
//! The mocks keep their state behind `Arc<RwLock<..>>`, so a test can hold
//! one handle to configure and inspect a mock while the pipeline holds
//! another.
//!
//! # Example
//!
//! ```rust,ignore
//! use vidpipe_core::testing::{MockTranscriber, MockUploader};
//!
//! let uploader = Arc::new(MockUploader::new());
//! let transcriber = Arc::new(MockTranscriber::new());
//!
//! // Configure mock responses
//! transcriber.set_transcript("नमस्ते").await;
//! uploader.set_next_error(StorageError::Timeout).await;
//!
//! // Build PipelineServices from the mocks...
//! ```

mod mock_authoring;
mod mock_llm;
mod mock_sink;
mod mock_synthesizer;
mod mock_transcriber;
mod mock_uploader;

pub use mock_authoring::{MockContentWriter, MockTranslator};
pub use mock_llm::MockLlmClient;
pub use mock_sink::MockSink;
pub use mock_synthesizer::{MockSynthesizer, RecordedSynthesis};
pub use mock_transcriber::{MockTranscriber, RecordedTranscription};
pub use mock_uploader::MockUploader;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::authoring::{INSTAGRAM_MARKER, LINKEDIN_MARKER};

    /// Default transcript returned by the mock transcriber.
    pub const HINDI_TRANSCRIPT: &str = "तो हम आज एक ऐप बनाएंगे";

    /// Default translation returned by the mock translator.
    pub const ENGLISH_TRANSCRIPT: &str = "So today we'll build an app";

    /// Default editor script returned by the mock writer.
    pub const EDITOR_SCRIPT: &str = "## Key Segments\n[00:00] Intro: building an app";

    pub const INSTAGRAM_CAPTION: &str = "Building an app today 🚀\n\nFollow for more! #coding #apps";

    pub const LINKEDIN_CAPTION: &str =
        "Shipping a small app end to end.\n\nWhat would you build? #engineering";

    /// A caption response in the marker-delimited format.
    pub fn captions_response(instagram: &str, linkedin: &str) -> String {
        format!(
            "{}\n{}\n\n{}\n{}\n",
            INSTAGRAM_MARKER, instagram, LINKEDIN_MARKER, linkedin
        )
    }

    /// Default audio chunks streamed by the mock synthesizer.
    pub fn audio_chunks() -> Vec<Vec<u8>> {
        vec![b"ID3".to_vec(), vec![0xff, 0xfb, 0x90, 0x64], vec![0u8; 32]]
    }
}
