//! Pipeline orchestration.
//!
//! [`VideoPipeline`] drives a source media file through seven stages:
//!
//! 1. upload the source file
//! 2. transcribe it (a failure here ends the run)
//! 3. translate the transcript into English
//! 4. write an editor script
//! 5. synthesize English audio
//! 6. write Instagram and LinkedIn captions
//! 7. save every output locally and upload the saved files
//!
//! Every stage outcome lands on the [`PipelineResult`], so callers get a
//! single record describing what succeeded and what did not.
//!
//! # Example
//!
//! ```ignore
//! use vidpipe_core::pipeline::{PipelineConfig, PipelineServices, ProgressStatus, VideoPipeline};
//!
//! let services = PipelineServices::from_config(&config)?;
//! let pipeline = VideoPipeline::new(PipelineConfig::from(&config), services);
//!
//! let progress = |step: usize, total: usize, status: ProgressStatus, detail: &str| {
//!     println!("[{}/{}] {:?} {}", step, total, status, detail);
//! };
//! let result = pipeline.run(Path::new("talk.mp4"), &progress).await?;
//! println!("Completed: {:?}", result.steps_completed);
//! ```

mod config;
mod error;
mod progress;
mod runner;
mod types;

pub use config::PipelineConfig;
pub use error::{PipelineError, StageError};
pub use progress::{NoProgress, ProgressSink, ProgressStatus};
pub use runner::{PipelineServices, VideoPipeline};
pub use types::{
    ArtifactKind, ArtifactRecord, PipelineResult, Stage, StageOutcome, Step, TOTAL_STAGES,
};
