//! Pipeline scenario integration tests.
//!
//! These tests drive the full seven-stage pipeline against mock services:
//! - Happy path with every artifact saved and republished
//! - Non-fatal failures (upload, translation) and the fatal transcription failure
//! - Step ordering, progress events and persistence idempotence

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use vidpipe_core::{
    authoring::AuthoringError,
    llm::LlmError,
    pipeline::{ArtifactKind, PipelineConfig, PipelineServices, ProgressStatus, Step},
    sink::FsSink,
    storage::StorageError,
    testing::{
        fixtures, MockContentWriter, MockSink, MockSynthesizer, MockTranscriber, MockTranslator,
        MockUploader,
    },
    transcriber::TranscriptionError,
    PipelineResult, VideoPipeline,
};

type ProgressEvent = (usize, usize, ProgressStatus, String);

/// Test helper wiring a pipeline to mocks and a temporary output directory.
struct TestHarness {
    pipeline: VideoPipeline,
    uploader: MockUploader,
    transcriber: MockTranscriber,
    translator: MockTranslator,
    writer: MockContentWriter,
    synthesizer: MockSynthesizer,
    input: PathBuf,
    output_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let input = temp_dir.path().join("lecture.mp4");
        std::fs::write(&input, b"fake video bytes").expect("Failed to write input");
        let output_dir = temp_dir.path().join("output");

        let uploader = MockUploader::new();
        let transcriber = MockTranscriber::new();
        let translator = MockTranslator::new();
        let writer = MockContentWriter::new();
        let synthesizer = MockSynthesizer::new();

        let services = PipelineServices {
            uploader: Arc::new(uploader.clone()),
            transcriber: Arc::new(transcriber.clone()),
            translator: Arc::new(translator.clone()),
            writer: Arc::new(writer.clone()),
            synthesizer: Arc::new(synthesizer.clone()),
            sink: Arc::new(FsSink::new(&output_dir)),
        };

        Self {
            pipeline: VideoPipeline::new(PipelineConfig::default(), services),
            uploader,
            transcriber,
            translator,
            writer,
            synthesizer,
            input,
            output_dir,
            _temp_dir: temp_dir,
        }
    }

    async fn run(&self) -> PipelineResult {
        self.run_with_events().await.0
    }

    async fn run_with_events(&self) -> (PipelineResult, Vec<ProgressEvent>) {
        let events = Mutex::new(Vec::new());
        let progress = |step: usize, total: usize, status: ProgressStatus, detail: &str| {
            events
                .lock()
                .unwrap()
                .push((step, total, status, detail.to_string()));
        };

        let result = self
            .pipeline
            .run(&self.input, &progress)
            .await
            .expect("pipeline run failed");
        (result, events.into_inner().unwrap())
    }

    fn output(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

fn assert_canonical_order(steps: &[Step]) {
    let positions: Vec<usize> = steps
        .iter()
        .map(|step| Step::ALL.iter().position(|s| s == step).unwrap())
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "steps out of order or duplicated: {:?}",
        steps
    );
}

#[tokio::test]
async fn test_all_stages_succeed() {
    let harness = TestHarness::new();
    let result = harness.run().await;

    assert_eq!(result.steps_completed, Step::ALL.to_vec());
    assert!(result.errors().is_empty(), "errors: {:?}", result.errors());

    assert_eq!(
        result.azure_url(),
        Some("https://mock.blob.core.windows.net/videos/lecture.mp4")
    );
    assert_eq!(result.hindi_transcript(), Some(fixtures::HINDI_TRANSCRIPT));
    assert_eq!(result.english_transcript(), Some(fixtures::ENGLISH_TRANSCRIPT));
    assert_eq!(result.editor_script(), Some(fixtures::EDITOR_SCRIPT));
    assert_eq!(result.instagram_caption(), Some(fixtures::INSTAGRAM_CAPTION));
    assert_eq!(result.linkedin_caption(), Some(fixtures::LINKEDIN_CAPTION));
    assert_eq!(
        result.english_audio(),
        Some(harness.synthesizer.expected_audio().await.as_slice())
    );

    // Six files, five republished URLs
    assert_eq!(result.saved_files().len(), 6);
    assert_eq!(result.cloud_urls().len(), 6);
    assert_eq!(result.hindi_file(), Some(harness.output("lecture_hindi.txt").as_path()));
    assert_eq!(
        result.english_audio_file(),
        Some(harness.output("lecture_english.mp3").as_path())
    );
    assert_eq!(
        result.linkedin_caption_url(),
        Some("https://mock.blob.core.windows.net/videos/lecture_linkedin.txt")
    );
    assert!(result.artifact_url(ArtifactKind::HindiTranscript).is_none());

    let saved = std::fs::read_to_string(harness.output("lecture_english.txt")).unwrap();
    assert_eq!(saved, fixtures::ENGLISH_TRANSCRIPT);

    // Source upload plus five republished files
    let uploads = harness.uploader.recorded_uploads().await;
    assert_eq!(uploads.len(), 6);
    assert_eq!(uploads[0], harness.input);
    assert!(!uploads.contains(&harness.output("lecture_hindi.txt")));

    let transcriptions = harness.transcriber.recorded_calls().await;
    assert_eq!(transcriptions[0].language_code, "hin");

    let syntheses = harness.synthesizer.recorded_calls().await;
    assert_eq!(syntheses.len(), 1);
    assert_eq!(syntheses[0].text, fixtures::ENGLISH_TRANSCRIPT);
    assert_eq!(syntheses[0].voice_id, PipelineConfig::default().voice_id);
}

#[tokio::test]
async fn test_upload_failure_is_not_fatal() {
    let harness = TestHarness::new();
    harness
        .uploader
        .set_next_error(StorageError::ConnectionFailed("dns lookup failed".to_string()))
        .await;

    let result = harness.run().await;

    assert!(result.upload_error().unwrap().contains("dns lookup failed"));
    assert!(result.azure_url().is_none());
    assert_eq!(result.steps_completed, Step::ALL[1..].to_vec());
    // Republishing still happens after the source upload failed
    assert_eq!(result.cloud_urls().len(), 5);
}

#[tokio::test]
async fn test_transcription_failure_aborts() {
    let harness = TestHarness::new();
    harness
        .transcriber
        .set_next_error(TranscriptionError::InvalidResponse("missing text".to_string()))
        .await;

    let (result, events) = harness.run_with_events().await;

    assert!(result.transcribe_error().is_some());
    assert!(result.steps_completed.iter().all(|s| *s == Step::Upload));
    assert!(result.english_transcript().is_none());
    assert!(result.translate_error().is_none());
    assert!(result.editor_script().is_none());
    assert!(result.english_audio().is_none());
    assert!(result.save_error().is_none());
    assert!(result.saved_files().is_empty());

    assert!(harness.translator.recorded_inputs().await.is_empty());
    assert!(harness.writer.recorded_editor_inputs().await.is_empty());
    assert!(harness.synthesizer.recorded_calls().await.is_empty());
    assert!(!harness.output_dir.exists());

    // No events past stage 2, and no done for the failed stage
    assert!(events.iter().all(|(step, ..)| *step <= 2));
    assert_eq!(
        events.last().map(|(step, _, status, _)| (*step, *status)),
        Some((2, ProgressStatus::Started))
    );
}

#[tokio::test]
async fn test_translation_failure_falls_back_to_source_transcript() {
    let harness = TestHarness::new();
    harness
        .translator
        .set_next_error(AuthoringError::Llm(LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        }))
        .await;

    let result = harness.run().await;

    assert!(result.translate_error().unwrap().contains("overloaded"));
    assert!(!result.has_step(Step::Translate));

    // Editor script and captions work from the source transcript
    assert_eq!(
        harness.writer.recorded_editor_inputs().await,
        vec![fixtures::HINDI_TRANSCRIPT.to_string()]
    );
    assert_eq!(
        harness.writer.recorded_caption_inputs().await,
        vec![fixtures::HINDI_TRANSCRIPT.to_string()]
    );
    assert!(result.has_step(Step::EditorScript));
    assert!(result.has_step(Step::SocialCaptions));

    // Speech has no fallback
    assert!(result.tts_error().unwrap().contains("English transcript"));
    assert!(harness.synthesizer.recorded_calls().await.is_empty());

    assert!(result.english_file().is_none());
    assert!(result.english_audio_file().is_none());
    assert!(result.hindi_file().is_some());
    assert!(result.has_step(Step::SaveFiles));
    assert!(result.has_step(Step::UploadFiles));
    assert_canonical_order(&result.steps_completed);
}

#[tokio::test]
async fn test_steps_are_ordered_under_mixed_failures() {
    let harness = TestHarness::new();
    harness
        .writer
        .set_next_editor_error(AuthoringError::EmptyOutput("editor script"))
        .await;
    harness.synthesizer.set_stream_error("connection reset").await;

    let result = harness.run().await;

    assert!(result.editor_error().is_some());
    assert!(result.tts_error().unwrap().contains("connection reset"));
    assert_eq!(
        result.steps_completed,
        vec![
            Step::Upload,
            Step::Transcribe,
            Step::Translate,
            Step::SocialCaptions,
            Step::SaveFiles,
            Step::UploadFiles,
        ]
    );
    assert_canonical_order(&result.steps_completed);
}

#[tokio::test]
async fn test_progress_events_per_stage() {
    let harness = TestHarness::new();
    harness.uploader.set_next_error(StorageError::Timeout).await;

    let (_, events) = harness.run_with_events().await;

    assert!(events.iter().all(|(_, total, ..)| *total == 7));
    for stage in 1..=7 {
        let statuses: Vec<ProgressStatus> = events
            .iter()
            .filter(|(step, ..)| *step == stage)
            .map(|(_, _, status, _)| *status)
            .collect();
        let expected = if stage == 1 {
            vec![ProgressStatus::Started]
        } else {
            vec![ProgressStatus::Started, ProgressStatus::Done]
        };
        assert_eq!(statuses, expected, "stage {}", stage);
    }
    assert_eq!(events[0].3, "Uploading to Azure...");
    assert_eq!(events.last().unwrap().3, "Saving files & uploading...");
}

#[tokio::test]
async fn test_persistence_is_idempotent() {
    let harness = TestHarness::new();
    let result = harness.run().await;

    let first: Vec<_> = result.saved_files().into_iter().map(|(_, p)| p.to_path_buf()).collect();
    let again = harness.pipeline.persist_artifacts(&result).await.unwrap();
    let second: Vec<_> = again
        .iter()
        .filter_map(|record| record.file.success().cloned())
        .collect();

    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(&harness.output_dir).unwrap().count(), 6);
    assert_eq!(
        std::fs::read(harness.output("lecture_english.mp3")).unwrap(),
        harness.synthesizer.expected_audio().await
    );
}

#[tokio::test]
async fn test_caption_failure_still_persists_other_artifacts() {
    let harness = TestHarness::new();
    harness
        .writer
        .set_next_captions_error(AuthoringError::EmptyOutput("caption set"))
        .await;

    let result = harness.run().await;

    assert!(result.social_captions_error().is_some());
    assert!(!result.has_step(Step::SocialCaptions));
    assert!(result.instagram_caption().is_none());
    assert!(result.linkedin_caption().is_none());

    // Stage 7 still runs for everything else
    assert!(result.instagram_file().is_none());
    assert!(result.linkedin_file().is_none());
    assert!(!harness.output("lecture_instagram.txt").exists());
    assert!(!harness.output("lecture_linkedin.txt").exists());
    assert!(result.editor_file().is_some());
    assert!(result.english_audio_url().is_some());
    assert!(result.has_step(Step::SaveFiles));
    assert!(result.has_step(Step::UploadFiles));
    assert_eq!(std::fs::read_dir(&harness.output_dir).unwrap().count(), 4);
}

#[tokio::test]
async fn test_unwritable_output_is_recorded() {
    let harness = TestHarness::new();
    let sink = MockSink::new();
    sink.fail_on("lecture_instagram.txt").await;
    sink.fail_on("lecture_linkedin.txt").await;

    let services = PipelineServices {
        uploader: Arc::new(harness.uploader.clone()),
        transcriber: Arc::new(harness.transcriber.clone()),
        translator: Arc::new(harness.translator.clone()),
        writer: Arc::new(harness.writer.clone()),
        synthesizer: Arc::new(harness.synthesizer.clone()),
        sink: Arc::new(sink.clone()),
    };
    let pipeline = VideoPipeline::new(PipelineConfig::default(), services);
    let result = pipeline
        .run(&harness.input, &vidpipe_core::pipeline::NoProgress)
        .await
        .unwrap();

    assert!(result.save_error().is_none());
    assert!(!result.has_step(Step::SaveFiles));
    // The two captions were never written, so they were never republished
    assert!(!result.has_step(Step::UploadFiles));
    assert_eq!(harness.uploader.recorded_uploads().await.len(), 4);
    assert_eq!(sink.file_count().await, 4);
    assert!(result.instagram_file().is_none());
    assert!(result.instagram_caption().is_some());

    let error_names: Vec<String> = result.errors().into_iter().map(|(name, _)| name).collect();
    assert_eq!(error_names, vec!["instagram_file_error", "linkedin_file_error"]);
    assert_eq!(
        result.english_file(),
        Some(Path::new("/mock/output/lecture_english.txt"))
    );
}

#[tokio::test]
async fn test_independent_runs_share_services() {
    let harness = TestHarness::new();

    let first = harness.run().await;
    harness.translator.set_translation("A different take").await;
    let second = harness.run().await;

    assert_eq!(first.english_transcript(), Some(fixtures::ENGLISH_TRANSCRIPT));
    assert_eq!(second.english_transcript(), Some("A different take"));
    assert_eq!(second.steps_completed, Step::ALL.to_vec());
    assert_eq!(
        std::fs::read_to_string(harness.output("lecture_english.txt")).unwrap(),
        "A different take"
    );
}
