//! The pipeline orchestrator.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::authoring::{parse_captions, ContentWriter, LlmContentWriter, LlmTranslator, Translator};
use crate::config::Config;
use crate::llm::create_llm_client;
use crate::metrics;
use crate::sink::{ArtifactSink, FsSink};
use crate::speech::{collect_audio, ElevenLabsSynthesizer, SpeechSynthesizer};
use crate::storage::{AzureBlobUploader, Uploader};
use crate::transcriber::{ElevenLabsTranscriber, Transcriber};

use super::config::PipelineConfig;
use super::error::{PipelineError, StageError};
use super::progress::{ProgressSink, ProgressStatus};
use super::types::{
    ArtifactKind, ArtifactRecord, PipelineResult, Stage, StageOutcome, Step, TOTAL_STAGES,
};

/// The external collaborators a pipeline calls.
#[derive(Clone)]
pub struct PipelineServices {
    pub uploader: Arc<dyn Uploader>,
    pub transcriber: Arc<dyn Transcriber>,
    pub translator: Arc<dyn Translator>,
    pub writer: Arc<dyn ContentWriter>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub sink: Arc<dyn ArtifactSink>,
}

impl PipelineServices {
    /// Builds the HTTP-backed services described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let llm = create_llm_client(&config.llm)?;

        Ok(Self {
            uploader: Arc::new(AzureBlobUploader::new(&config.storage)?),
            transcriber: Arc::new(ElevenLabsTranscriber::new(
                &config.elevenlabs,
                &config.transcription,
            )),
            translator: Arc::new(LlmTranslator::new(
                Arc::clone(&llm),
                config.authoring.source_language.clone(),
            )),
            writer: Arc::new(LlmContentWriter::new(llm)),
            synthesizer: Arc::new(ElevenLabsSynthesizer::new(
                &config.elevenlabs,
                &config.speech,
            )),
            sink: Arc::new(FsSink::new(config.output.dir.clone())),
        })
    }
}

/// Runs the seven-stage media pipeline.
///
/// A run never fails because a stage failed: each stage outcome is recorded
/// on the returned [`PipelineResult`]. Only transcription failure stops the
/// run early, since every later stage depends on the transcript.
pub struct VideoPipeline {
    config: PipelineConfig,
    services: PipelineServices,
}

impl VideoPipeline {
    pub fn new(config: PipelineConfig, services: PipelineServices) -> Self {
        Self { config, services }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes `input` and returns the accumulated result.
    pub async fn run(
        &self,
        input: &Path,
        progress: &dyn ProgressSink,
    ) -> Result<PipelineResult, PipelineError> {
        check_input(input)?;

        let mut result = PipelineResult::new(input);
        info!(input = %input.display(), "Starting pipeline");

        // 1. Upload the source file
        let outcome = self
            .run_stage(Stage::Upload, progress, self.services.uploader.upload(input))
            .await;
        record_step(&mut result, Step::Upload, &outcome);
        result.upload = Some(outcome);

        // 2. Transcribe
        let outcome = self
            .run_stage(
                Stage::Transcribe,
                progress,
                self.services
                    .transcriber
                    .transcribe(input, &self.config.language_code),
            )
            .await;
        record_step(&mut result, Step::Transcribe, &outcome);
        let transcribed = outcome.is_success();
        result.transcription = Some(outcome);
        if !transcribed {
            error!(input = %input.display(), "Transcription failed, aborting pipeline");
            metrics::PIPELINE_RUNS.with_label_values(&["aborted"]).inc();
            return Ok(result);
        }

        // 3. Translate
        let outcome = self
            .run_stage(Stage::Translate, progress, async {
                let text = result
                    .hindi_transcript()
                    .ok_or(StageError::MissingInput("transcript"))?;
                Ok::<_, StageError>(self.services.translator.translate(text).await?)
            })
            .await;
        record_step(&mut result, Step::Translate, &outcome);
        result.translation = Some(outcome);

        // 4. Editor script
        let outcome = self
            .run_stage(Stage::EditorScript, progress, async {
                let text = result
                    .best_transcript()
                    .ok_or(StageError::MissingInput("transcript"))?;
                Ok::<_, StageError>(self.services.writer.editor_script(text).await?)
            })
            .await;
        record_step(&mut result, Step::EditorScript, &outcome);
        result.editor = Some(outcome);

        // 5. English audio, no fallback to the source transcript
        let outcome = self
            .run_stage(Stage::TextToSpeech, progress, async {
                let text = result
                    .english_transcript()
                    .ok_or(StageError::MissingInput("English transcript"))?;
                let stream = self
                    .services
                    .synthesizer
                    .synthesize(text, &self.config.voice_id)
                    .await?;
                Ok::<_, StageError>(collect_audio(stream).await?)
            })
            .await;
        record_step(&mut result, Step::TextToSpeech, &outcome);
        result.speech = Some(outcome);

        // 6. Social captions
        let outcome = self
            .run_stage(Stage::SocialCaptions, progress, async {
                let text = result
                    .best_transcript()
                    .ok_or(StageError::MissingInput("transcript"))?;
                let raw = self.services.writer.social_captions(text).await?;
                Ok::<_, StageError>(parse_captions(&raw))
            })
            .await;
        record_step(&mut result, Step::SocialCaptions, &outcome);
        result.captions = Some(outcome);

        // 7. Persist and republish
        let outcome = self
            .run_stage(Stage::Persist, progress, self.persist_artifacts(&result))
            .await;
        if let Some(records) = outcome.success() {
            if records.iter().all(|r| r.file.is_success()) {
                result.complete(Step::SaveFiles);
            }
            // A republishable file that was never written counts as not uploaded
            let republishable: Vec<&ArtifactRecord> =
                records.iter().filter(|r| r.kind.republished()).collect();
            let republish_ok = !republishable.is_empty()
                && republishable
                    .iter()
                    .all(|r| r.url.as_ref().is_some_and(StageOutcome::is_success));
            if republish_ok {
                result.complete(Step::UploadFiles);
            }
        }
        result.persistence = Some(outcome);

        metrics::PIPELINE_RUNS.with_label_values(&["completed"]).inc();
        info!(
            input = %input.display(),
            steps = result.steps_completed.len(),
            errors = result.errors().len(),
            "Pipeline finished"
        );
        Ok(result)
    }

    /// Writes every present output through the sink, then uploads each
    /// written file except the source transcript.
    ///
    /// Each write and each upload is attempted independently; their outcomes
    /// are returned per artifact. Only a sink that cannot prepare its output
    /// area fails the whole call. Repeating the call for the same result
    /// targets the same names and overwrites earlier files.
    pub async fn persist_artifacts(
        &self,
        result: &PipelineResult,
    ) -> Result<Vec<ArtifactRecord>, StageError> {
        let base_name = result
            .input_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or(StageError::MissingInput("input file name"))?;

        self.services.sink.prepare().await?;

        let mut records = Vec::new();
        for kind in ArtifactKind::ALL {
            let Some(bytes) = result.artifact_payload(kind) else {
                continue;
            };
            let name = kind.file_name(&base_name);
            let file = match self.services.sink.write(&name, bytes).await {
                Ok(path) => {
                    record_artifact(kind, "write", true);
                    StageOutcome::Success(path)
                }
                Err(e) => {
                    warn!(artifact = %kind, file = %name, error = %e, "Failed to save artifact");
                    record_artifact(kind, "write", false);
                    StageOutcome::Failure(e.to_string())
                }
            };
            records.push(ArtifactRecord {
                kind,
                file,
                url: None,
            });
        }

        for record in records.iter_mut() {
            if !record.kind.republished() {
                continue;
            }
            let Some(path) = record.file.success() else {
                continue;
            };
            let url = match self.services.uploader.upload(path).await {
                Ok(url) => {
                    record_artifact(record.kind, "upload", true);
                    StageOutcome::Success(url)
                }
                Err(e) => {
                    warn!(
                        artifact = %record.kind,
                        path = %path.display(),
                        error = %e,
                        "Failed to upload artifact"
                    );
                    record_artifact(record.kind, "upload", false);
                    StageOutcome::Failure(e.to_string())
                }
            };
            record.url = Some(url);
        }

        Ok(records)
    }

    /// Runs one stage with progress events, logging and metrics.
    /// Name of the collaborator doing the stage's work.
    fn service_name(&self, stage: Stage) -> &str {
        match stage {
            Stage::Upload => self.services.uploader.name(),
            Stage::Transcribe => self.services.transcriber.name(),
            Stage::Translate => self.services.translator.name(),
            Stage::EditorScript | Stage::SocialCaptions => self.services.writer.name(),
            Stage::TextToSpeech => self.services.synthesizer.name(),
            Stage::Persist => self.services.sink.name(),
        }
    }

    async fn run_stage<T, E, F>(
        &self,
        stage: Stage,
        progress: &dyn ProgressSink,
        work: F,
    ) -> StageOutcome<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let label = stage.as_str();
        let detail = stage.detail(&self.config.source_language);
        progress.report(stage.number(), TOTAL_STAGES, ProgressStatus::Started, &detail);
        info!(stage = label, service = self.service_name(stage), "{}", detail);

        let start = Instant::now();
        let result = work.await;
        metrics::STAGE_DURATION
            .with_label_values(&[label])
            .observe(start.elapsed().as_secs_f64());

        match result {
            Ok(value) => {
                metrics::STAGE_RUNS.with_label_values(&[label, "success"]).inc();
                progress.report(stage.number(), TOTAL_STAGES, ProgressStatus::Done, &detail);
                info!(
                    stage = label,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Stage completed"
                );
                StageOutcome::Success(value)
            }
            Err(e) => {
                metrics::STAGE_RUNS.with_label_values(&[label, "failure"]).inc();
                error!(stage = label, error = %e, "Stage failed");
                StageOutcome::Failure(e.to_string())
            }
        }
    }
}

fn record_step<T>(result: &mut PipelineResult, step: Step, outcome: &StageOutcome<T>) {
    if outcome.is_success() {
        result.complete(step);
    }
}

fn check_input(input: &Path) -> Result<(), PipelineError> {
    if !input.exists() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    if !input.is_file() {
        return Err(PipelineError::NotAFile(input.to_path_buf()));
    }
    if input.file_stem().is_none() {
        return Err(PipelineError::NoFileName(input.to_path_buf()));
    }
    Ok(())
}

fn record_artifact(kind: ArtifactKind, operation: &str, success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::ARTIFACTS_PERSISTED
        .with_label_values(&[kind.as_str(), operation, result])
        .inc();
}
