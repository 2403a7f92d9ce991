//! Pipeline result record and the vocabulary around it.

use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::authoring::Captions;

/// Number of stages reported through progress events.
pub const TOTAL_STAGES: usize = 7;

/// Name of a step recorded in `steps_completed`.
///
/// The persistence stage contributes two steps, so there are eight names
/// for seven stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Upload,
    Transcribe,
    Translate,
    EditorScript,
    TextToSpeech,
    SocialCaptions,
    SaveFiles,
    UploadFiles,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 8] = [
        Step::Upload,
        Step::Transcribe,
        Step::Translate,
        Step::EditorScript,
        Step::TextToSpeech,
        Step::SocialCaptions,
        Step::SaveFiles,
        Step::UploadFiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Upload => "upload",
            Step::Transcribe => "transcribe",
            Step::Translate => "translate",
            Step::EditorScript => "editor_script",
            Step::TextToSpeech => "text_to_speech",
            Step::SocialCaptions => "social_captions",
            Step::SaveFiles => "save_files",
            Step::UploadFiles => "upload_files",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the seven numbered pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Upload,
    Transcribe,
    Translate,
    EditorScript,
    TextToSpeech,
    SocialCaptions,
    Persist,
}

impl Stage {
    /// 1-based position reported to progress sinks.
    pub fn number(&self) -> usize {
        match self {
            Stage::Upload => 1,
            Stage::Transcribe => 2,
            Stage::Translate => 3,
            Stage::EditorScript => 4,
            Stage::TextToSpeech => 5,
            Stage::SocialCaptions => 6,
            Stage::Persist => 7,
        }
    }

    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Upload => "upload",
            Stage::Transcribe => "transcribe",
            Stage::Translate => "translate",
            Stage::EditorScript => "editor_script",
            Stage::TextToSpeech => "text_to_speech",
            Stage::SocialCaptions => "social_captions",
            Stage::Persist => "persist",
        }
    }

    /// Human-readable progress detail.
    /// Progress text for the stage. The transcription line names the
    /// language of the recording.
    pub fn detail(&self, source_language: &str) -> Cow<'static, str> {
        let text = match self {
            Stage::Upload => "Uploading to Azure...",
            Stage::Transcribe => {
                return Cow::Owned(format!("Transcribing audio ({source_language})..."));
            }
            Stage::Translate => "Translating to English...",
            Stage::EditorScript => "Generating editor script...",
            Stage::TextToSpeech => "Generating English audio...",
            Stage::SocialCaptions => "Generating Instagram & LinkedIn captions...",
            Stage::Persist => "Saving files & uploading...",
        };
        Cow::Borrowed(text)
    }
}

/// Output of a stage that ran: either its value or the error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome<T> {
    Success(T),
    Failure(String),
}

impl<T> StageOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, StageOutcome::Success(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            StageOutcome::Success(value) => Some(value),
            StageOutcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            StageOutcome::Success(_) => None,
            StageOutcome::Failure(message) => Some(message),
        }
    }
}

/// A file the persistence stage writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    HindiTranscript,
    EnglishTranscript,
    EditorScript,
    EnglishAudio,
    InstagramCaption,
    LinkedinCaption,
}

impl ArtifactKind {
    /// All kinds in write order.
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::HindiTranscript,
        ArtifactKind::EnglishTranscript,
        ArtifactKind::EditorScript,
        ArtifactKind::EnglishAudio,
        ArtifactKind::InstagramCaption,
        ArtifactKind::LinkedinCaption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::HindiTranscript => "hindi_transcript",
            ArtifactKind::EnglishTranscript => "english_transcript",
            ArtifactKind::EditorScript => "editor_script",
            ArtifactKind::EnglishAudio => "english_audio",
            ArtifactKind::InstagramCaption => "instagram_caption",
            ArtifactKind::LinkedinCaption => "linkedin_caption",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::HindiTranscript => "hindi",
            ArtifactKind::EnglishTranscript => "english",
            ArtifactKind::EditorScript => "editor",
            ArtifactKind::EnglishAudio => "english",
            ArtifactKind::InstagramCaption => "instagram",
            ArtifactKind::LinkedinCaption => "linkedin",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::EnglishAudio => "mp3",
            _ => "txt",
        }
    }

    /// Whether the written file is uploaded again after saving.
    pub fn republished(&self) -> bool {
        !matches!(self, ArtifactKind::HindiTranscript)
    }

    /// `{base_name}_{suffix}.{ext}`
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{}_{}.{}", base_name, self.suffix(), self.extension())
    }

    /// Flat name of the local path field.
    pub fn file_field(&self) -> &'static str {
        match self {
            ArtifactKind::HindiTranscript => "hindi_file",
            ArtifactKind::EnglishTranscript => "english_file",
            ArtifactKind::EditorScript => "editor_file",
            ArtifactKind::EnglishAudio => "english_audio_file",
            ArtifactKind::InstagramCaption => "instagram_file",
            ArtifactKind::LinkedinCaption => "linkedin_file",
        }
    }

    /// Flat name of the republished URL field, if the kind is republished.
    pub fn url_field(&self) -> Option<&'static str> {
        match self {
            ArtifactKind::HindiTranscript => None,
            ArtifactKind::EnglishTranscript => Some("english_transcript_url"),
            ArtifactKind::EditorScript => Some("editor_script_url"),
            ArtifactKind::EnglishAudio => Some("english_audio_url"),
            ArtifactKind::InstagramCaption => Some("instagram_caption_url"),
            ArtifactKind::LinkedinCaption => Some("linkedin_caption_url"),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of persisting one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactRecord {
    pub kind: ArtifactKind,
    /// Local write.
    pub file: StageOutcome<PathBuf>,
    /// Republish upload. `None` when the kind is not republished or the
    /// write failed.
    pub url: Option<StageOutcome<String>>,
}

/// Cumulative record of one pipeline run.
///
/// Each stage slot is `None` until the stage runs, then holds either the
/// stage output or its error message.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub input_file: PathBuf,
    pub steps_completed: Vec<Step>,
    pub upload: Option<StageOutcome<String>>,
    pub transcription: Option<StageOutcome<String>>,
    pub translation: Option<StageOutcome<String>>,
    pub editor: Option<StageOutcome<String>>,
    pub speech: Option<StageOutcome<Vec<u8>>>,
    pub captions: Option<StageOutcome<Captions>>,
    pub persistence: Option<StageOutcome<Vec<ArtifactRecord>>>,
}

fn success<T>(slot: &Option<StageOutcome<T>>) -> Option<&T> {
    slot.as_ref().and_then(StageOutcome::success)
}

fn failure<T>(slot: &Option<StageOutcome<T>>) -> Option<&str> {
    slot.as_ref().and_then(StageOutcome::failure)
}

impl PipelineResult {
    pub fn new(input_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            steps_completed: Vec::new(),
            upload: None,
            transcription: None,
            translation: None,
            editor: None,
            speech: None,
            captions: None,
            persistence: None,
        }
    }

    pub fn has_step(&self, step: Step) -> bool {
        self.steps_completed.contains(&step)
    }

    pub(crate) fn complete(&mut self, step: Step) {
        if !self.has_step(step) {
            self.steps_completed.push(step);
        }
    }

    pub fn azure_url(&self) -> Option<&str> {
        success(&self.upload).map(String::as_str)
    }

    pub fn upload_error(&self) -> Option<&str> {
        failure(&self.upload)
    }

    pub fn hindi_transcript(&self) -> Option<&str> {
        success(&self.transcription).map(String::as_str)
    }

    pub fn transcribe_error(&self) -> Option<&str> {
        failure(&self.transcription)
    }

    pub fn english_transcript(&self) -> Option<&str> {
        success(&self.translation).map(String::as_str)
    }

    pub fn translate_error(&self) -> Option<&str> {
        failure(&self.translation)
    }

    pub fn editor_script(&self) -> Option<&str> {
        success(&self.editor).map(String::as_str)
    }

    pub fn editor_error(&self) -> Option<&str> {
        failure(&self.editor)
    }

    pub fn english_audio(&self) -> Option<&[u8]> {
        success(&self.speech).map(Vec::as_slice)
    }

    pub fn tts_error(&self) -> Option<&str> {
        failure(&self.speech)
    }

    pub fn instagram_caption(&self) -> Option<&str> {
        success(&self.captions).and_then(Captions::instagram)
    }

    pub fn linkedin_caption(&self) -> Option<&str> {
        success(&self.captions).and_then(Captions::linkedin)
    }

    /// Raw caption text kept when the response could not be split.
    pub fn social_captions(&self) -> Option<&str> {
        success(&self.captions).and_then(Captions::raw)
    }

    pub fn social_captions_error(&self) -> Option<&str> {
        failure(&self.captions)
    }

    pub fn save_error(&self) -> Option<&str> {
        failure(&self.persistence)
    }

    /// Translated transcript if present, otherwise the source transcript.
    pub fn best_transcript(&self) -> Option<&str> {
        self.english_transcript().or_else(|| self.hindi_transcript())
    }

    /// Bytes to persist for `kind`, if that output exists.
    pub fn artifact_payload(&self, kind: ArtifactKind) -> Option<&[u8]> {
        match kind {
            ArtifactKind::HindiTranscript => self.hindi_transcript().map(str::as_bytes),
            ArtifactKind::EnglishTranscript => self.english_transcript().map(str::as_bytes),
            ArtifactKind::EditorScript => self.editor_script().map(str::as_bytes),
            ArtifactKind::EnglishAudio => self.english_audio(),
            ArtifactKind::InstagramCaption => self.instagram_caption().map(str::as_bytes),
            ArtifactKind::LinkedinCaption => self.linkedin_caption().map(str::as_bytes),
        }
    }

    pub fn artifacts(&self) -> &[ArtifactRecord] {
        success(&self.persistence).map_or(&[], Vec::as_slice)
    }

    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactRecord> {
        self.artifacts().iter().find(|record| record.kind == kind)
    }

    /// Local path of a successfully written artifact.
    pub fn artifact_file(&self, kind: ArtifactKind) -> Option<&Path> {
        self.artifact(kind)
            .and_then(|record| record.file.success())
            .map(PathBuf::as_path)
    }

    /// URL of a successfully republished artifact.
    pub fn artifact_url(&self, kind: ArtifactKind) -> Option<&str> {
        self.artifact(kind)
            .and_then(|record| record.url.as_ref())
            .and_then(StageOutcome::success)
            .map(String::as_str)
    }

    pub fn hindi_file(&self) -> Option<&Path> {
        self.artifact_file(ArtifactKind::HindiTranscript)
    }

    pub fn english_file(&self) -> Option<&Path> {
        self.artifact_file(ArtifactKind::EnglishTranscript)
    }

    pub fn editor_file(&self) -> Option<&Path> {
        self.artifact_file(ArtifactKind::EditorScript)
    }

    pub fn english_audio_file(&self) -> Option<&Path> {
        self.artifact_file(ArtifactKind::EnglishAudio)
    }

    pub fn instagram_file(&self) -> Option<&Path> {
        self.artifact_file(ArtifactKind::InstagramCaption)
    }

    pub fn linkedin_file(&self) -> Option<&Path> {
        self.artifact_file(ArtifactKind::LinkedinCaption)
    }

    pub fn english_transcript_url(&self) -> Option<&str> {
        self.artifact_url(ArtifactKind::EnglishTranscript)
    }

    pub fn editor_script_url(&self) -> Option<&str> {
        self.artifact_url(ArtifactKind::EditorScript)
    }

    pub fn english_audio_url(&self) -> Option<&str> {
        self.artifact_url(ArtifactKind::EnglishAudio)
    }

    pub fn instagram_caption_url(&self) -> Option<&str> {
        self.artifact_url(ArtifactKind::InstagramCaption)
    }

    pub fn linkedin_caption_url(&self) -> Option<&str> {
        self.artifact_url(ArtifactKind::LinkedinCaption)
    }

    /// Every written file as `(field name, path)`.
    pub fn saved_files(&self) -> Vec<(&'static str, &Path)> {
        ArtifactKind::ALL
            .iter()
            .filter_map(|kind| self.artifact_file(*kind).map(|p| (kind.file_field(), p)))
            .collect()
    }

    /// Every remote URL as `(field name, url)`, source upload first.
    pub fn cloud_urls(&self) -> Vec<(&'static str, &str)> {
        let mut urls: Vec<(&'static str, &str)> = self
            .azure_url()
            .map(|url| ("azure_url", url))
            .into_iter()
            .collect();
        for kind in ArtifactKind::ALL {
            if let (Some(field), Some(url)) = (kind.url_field(), self.artifact_url(kind)) {
                urls.push((field, url));
            }
        }
        urls
    }

    /// Every recorded error as `(field name, message)`.
    ///
    /// Per-file persistence failures are reported under the name of the
    /// field they would have filled, suffixed with `_error`.
    pub fn errors(&self) -> Vec<(String, &str)> {
        let stage_errors = [
            ("upload_error", self.upload_error()),
            ("transcribe_error", self.transcribe_error()),
            ("translate_error", self.translate_error()),
            ("editor_error", self.editor_error()),
            ("tts_error", self.tts_error()),
            ("social_captions_error", self.social_captions_error()),
            ("save_error", self.save_error()),
        ];
        let mut errors: Vec<(String, &str)> = stage_errors
            .into_iter()
            .filter_map(|(name, message)| message.map(|m| (name.to_string(), m)))
            .collect();

        for record in self.artifacts() {
            if let Some(message) = record.file.failure() {
                errors.push((format!("{}_error", record.kind.file_field()), message));
            }
            let url_failure = record.url.as_ref().and_then(StageOutcome::failure);
            if let (Some(field), Some(message)) = (record.kind.url_field(), url_failure) {
                errors.push((format!("{}_error", field), message));
            }
        }
        errors
    }
}

/// Flat view used for JSON output. Audio bytes are reported by length.
///
/// Paths, URLs and errors become top-level `*_file`, `*_url` and `*_error`
/// keys. `azure_url` is one of the URLs.
#[derive(Serialize)]
struct FlatResult<'a> {
    input_file: &'a Path,
    steps_completed: &'a [Step],
    #[serde(skip_serializing_if = "Option::is_none")]
    hindi_transcript: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    english_transcript: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    editor_script: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    english_audio_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instagram_caption: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_caption: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    social_captions: Option<&'a str>,
    #[serde(flatten)]
    files: BTreeMap<&'static str, &'a Path>,
    #[serde(flatten)]
    urls: BTreeMap<&'static str, &'a str>,
    #[serde(flatten)]
    errors: BTreeMap<String, &'a str>,
}

impl Serialize for PipelineResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FlatResult {
            input_file: &self.input_file,
            steps_completed: &self.steps_completed,
            hindi_transcript: self.hindi_transcript(),
            english_transcript: self.english_transcript(),
            editor_script: self.editor_script(),
            english_audio_bytes: self.english_audio().map(<[u8]>::len),
            instagram_caption: self.instagram_caption(),
            linkedin_caption: self.linkedin_caption(),
            social_captions: self.social_captions(),
            files: self.saved_files().into_iter().collect(),
            urls: self.cloud_urls().into_iter().collect(),
            errors: self.errors().into_iter().collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_names() {
        let names: Vec<String> = ArtifactKind::ALL
            .iter()
            .map(|kind| kind.file_name("talk"))
            .collect();
        assert_eq!(
            names,
            vec![
                "talk_hindi.txt",
                "talk_english.txt",
                "talk_editor.txt",
                "talk_english.mp3",
                "talk_instagram.txt",
                "talk_linkedin.txt",
            ]
        );
    }

    #[test]
    fn test_only_source_transcript_is_not_republished() {
        for kind in ArtifactKind::ALL {
            assert_eq!(kind.republished(), kind.url_field().is_some());
        }
        assert!(!ArtifactKind::HindiTranscript.republished());
    }

    #[test]
    fn test_stage_numbers_are_sequential() {
        let stages = [
            Stage::Upload,
            Stage::Transcribe,
            Stage::Translate,
            Stage::EditorScript,
            Stage::TextToSpeech,
            Stage::SocialCaptions,
            Stage::Persist,
        ];
        for (i, stage) in stages.iter().enumerate() {
            assert_eq!(stage.number(), i + 1);
        }
        assert_eq!(stages.len(), TOTAL_STAGES);
    }

    #[test]
    fn test_step_serializes_snake_case() {
        let json = serde_json::to_string(&Step::ALL).unwrap();
        assert_eq!(
            json,
            r#"["upload","transcribe","translate","editor_script","text_to_speech","social_captions","save_files","upload_files"]"#
        );
    }

    #[test]
    fn test_stage_detail_uses_source_language() {
        assert_eq!(Stage::Transcribe.detail("Hindi"), "Transcribing audio (Hindi)...");
        assert_eq!(Stage::Transcribe.detail("Tamil"), "Transcribing audio (Tamil)...");
        assert_eq!(Stage::Upload.detail("Tamil"), "Uploading to Azure...");
    }

    #[test]
    fn test_stage_outcome_helpers() {
        let ok: StageOutcome<u32> = StageOutcome::Success(3);
        assert!(ok.is_success());
        assert_eq!(ok.success(), Some(&3));
        assert!(ok.failure().is_none());

        let err: StageOutcome<u32> = StageOutcome::Failure("boom".to_string());
        assert_eq!(err.failure(), Some("boom"));
        assert!(err.success().is_none());
    }

    #[test]
    fn test_best_transcript_prefers_translation() {
        let mut result = PipelineResult::new("talk.mp4");
        assert_eq!(result.best_transcript(), None);

        result.transcription = Some(StageOutcome::Success("नमस्ते".to_string()));
        assert_eq!(result.best_transcript(), Some("नमस्ते"));

        result.translation = Some(StageOutcome::Failure("quota".to_string()));
        assert_eq!(result.best_transcript(), Some("नमस्ते"));

        result.translation = Some(StageOutcome::Success("Hello".to_string()));
        assert_eq!(result.best_transcript(), Some("Hello"));
    }

    #[test]
    fn test_output_and_error_are_exclusive() {
        let mut result = PipelineResult::new("talk.mp4");
        result.upload = Some(StageOutcome::Failure("auth".to_string()));
        assert_eq!(result.upload_error(), Some("auth"));
        assert_eq!(result.azure_url(), None);

        result.upload = Some(StageOutcome::Success("https://x/talk.mp4".to_string()));
        assert_eq!(result.upload_error(), None);
        assert_eq!(result.azure_url(), Some("https://x/talk.mp4"));
    }

    #[test]
    fn test_complete_ignores_duplicates() {
        let mut result = PipelineResult::new("talk.mp4");
        result.complete(Step::Upload);
        result.complete(Step::Upload);
        assert_eq!(result.steps_completed, vec![Step::Upload]);
    }

    #[test]
    fn test_errors_include_artifact_failures() {
        let mut result = PipelineResult::new("talk.mp4");
        result.translation = Some(StageOutcome::Failure("quota".to_string()));
        result.persistence = Some(StageOutcome::Success(vec![ArtifactRecord {
            kind: ArtifactKind::EditorScript,
            file: StageOutcome::Success(PathBuf::from("out/talk_editor.txt")),
            url: Some(StageOutcome::Failure("timeout".to_string())),
        }]));

        let errors = result.errors();
        assert!(errors.contains(&("translate_error".to_string(), "quota")));
        assert!(errors.contains(&("editor_script_url_error".to_string(), "timeout")));
        assert_eq!(result.editor_file(), Some(Path::new("out/talk_editor.txt")));
        assert_eq!(result.editor_script_url(), None);
    }

    #[test]
    fn test_json_reports_audio_length() {
        let mut result = PipelineResult::new("talk.mp4");
        result.speech = Some(StageOutcome::Success(vec![0u8; 42]));
        result.complete(Step::TextToSpeech);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["english_audio_bytes"], 42);
        assert_eq!(json["steps_completed"][0], "text_to_speech");
        assert!(json.get("azure_url").is_none());
        assert!(json.get("errors").is_none());
        assert!(!json.as_object().unwrap().keys().any(|k| k.ends_with("_error")));
    }

    #[test]
    fn test_json_keys_are_top_level() {
        let mut result = PipelineResult::new("talk.mp4");
        result.upload = Some(StageOutcome::Success("https://blob/talk.mp4".to_string()));
        result.translation = Some(StageOutcome::Failure("rate limited".to_string()));
        result.persistence = Some(StageOutcome::Success(vec![ArtifactRecord {
            kind: ArtifactKind::HindiTranscript,
            file: StageOutcome::Success(PathBuf::from("out/talk_hindi.txt")),
            url: None,
        }]));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["azure_url"], "https://blob/talk.mp4");
        assert_eq!(json["hindi_file"], "out/talk_hindi.txt");
        assert_eq!(json["translate_error"], "rate limited");
        assert!(json.get("files").is_none());
        assert!(json.get("urls").is_none());
    }
}
