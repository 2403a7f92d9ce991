pub mod authoring;
pub mod config;
mod elevenlabs;
pub mod llm;
pub mod metrics;
pub mod pipeline;
pub mod sink;
pub mod speech;
pub mod storage;
pub mod testing;
pub mod transcriber;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use pipeline::{
    ArtifactKind, PipelineConfig, PipelineError, PipelineResult, PipelineServices,
    ProgressSink, ProgressStatus, StageOutcome, Step, VideoPipeline,
};
