//! Prompt-driven text authoring: translation, editor scripts and social captions.
//!
//! Both traits are implemented on top of any `LlmClient`. The orchestrator only
//! sees the traits, so tests can replace either side independently.

mod captions;
mod llm_writer;
pub mod prompts;
mod traits;

pub use captions::{parse_captions, Captions, INSTAGRAM_MARKER, LINKEDIN_MARKER};
pub use llm_writer::{LlmContentWriter, LlmTranslator};
pub use traits::{AuthoringError, ContentWriter, Translator};
