//! Terminal rendering of progress and results.

use std::fmt::Write as _;
use std::io::Write;

use vidpipe_core::{PipelineResult, ProgressStatus};

pub mod colors {
    pub const CYAN: &str = "\x1b[96m";
    pub const GREEN: &str = "\x1b[92m";
    pub const YELLOW: &str = "\x1b[93m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
}

use colors::*;

/// Text printed for a progress event. A started stage opens a line that the
/// matching done event finishes with a check mark.
pub fn progress_text(step: usize, total: usize, status: ProgressStatus, detail: &str) -> String {
    match status {
        ProgressStatus::Started => format!("\n    {DIM}[{step}/{total}]{RESET} {detail}"),
        ProgressStatus::Done => format!(" {GREEN}✓{RESET}\n"),
    }
}

/// Progress sink writing to stdout.
pub fn print_progress(step: usize, total: usize, status: ProgressStatus, detail: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(progress_text(step, total, status, detail).as_bytes());
    let _ = stdout.flush();
}

pub fn header() -> String {
    let rule = "=".repeat(50);
    let mut out = String::new();
    let _ = writeln!(out, "\n{CYAN}{BOLD}{rule}{RESET}");
    let _ = writeln!(out, "{CYAN}{BOLD}  Video Pipeline{RESET}");
    let _ = writeln!(out, "{CYAN}{rule}{RESET}");
    let _ = writeln!(out, "\n{DIM}Usage:{RESET}");
    let _ = writeln!(out, "  {GREEN}process <file>{RESET} - Run full video pipeline");
    let _ = writeln!(out, "  {GREEN}exit{RESET}           - Quit");
    out
}

fn labelled_file(kind_field: &str) -> &'static str {
    match kind_field {
        "hindi_file" => "Hindi transcript",
        "english_file" => "English transcript",
        "editor_file" => "Editor script",
        "english_audio_file" => "English audio",
        "instagram_file" => "Instagram caption",
        "linkedin_file" => "LinkedIn caption",
        _ => "File",
    }
}

fn labelled_url(url_field: &str) -> &'static str {
    match url_field {
        "azure_url" => "Video",
        "english_transcript_url" => "Transcript",
        "editor_script_url" => "Editor Notes",
        "english_audio_url" => "English Audio",
        "instagram_caption_url" => "Instagram Caption",
        "linkedin_caption_url" => "LinkedIn Caption",
        _ => "URL",
    }
}

/// Human-readable report of a finished run.
pub fn summary(result: &PipelineResult) -> String {
    let mut out = String::new();
    let aborted = result.transcribe_error().is_some();

    if aborted {
        let _ = writeln!(out, "\n\n{YELLOW}{BOLD}Pipeline aborted{RESET}");
    } else {
        let _ = writeln!(out, "\n\n{GREEN}{BOLD}Pipeline Complete!{RESET}");
    }

    let steps: Vec<&str> = result.steps_completed.iter().map(|s| s.as_str()).collect();
    let _ = writeln!(out, "\n{BOLD}Steps completed:{RESET} {}", steps.join(", "));

    let files = result.saved_files();
    if !files.is_empty() {
        let _ = writeln!(out, "\n{BOLD}Files saved:{RESET}");
        for (field, path) in files {
            let _ = writeln!(out, "- {}: {}", labelled_file(field), path.display());
        }
    }

    let urls = result.cloud_urls();
    if !urls.is_empty() {
        let _ = writeln!(out, "\n{BOLD}Cloud URLs (share with editor):{RESET}");
        for (field, url) in urls {
            let _ = writeln!(out, "- {}: {}", labelled_url(field), url);
        }
    }

    let errors = result.errors();
    if !errors.is_empty() {
        let _ = writeln!(out, "\n{YELLOW}{BOLD}Errors:{RESET}");
        for (field, message) in errors {
            let _ = writeln!(out, "{YELLOW}- {}: {}{RESET}", field, message);
        }
    }

    if aborted {
        return out;
    }

    let _ = writeln!(out, "\n---\n{BOLD}ENGLISH TRANSCRIPT:{RESET}");
    let _ = writeln!(out, "{}", result.english_transcript().unwrap_or("N/A"));
    let _ = writeln!(out, "\n---\n{BOLD}EDITOR SCRIPT:{RESET}");
    let _ = writeln!(out, "{}", result.editor_script().unwrap_or("N/A"));

    if let Some(raw) = result.social_captions() {
        let _ = writeln!(out, "\n---\n{BOLD}SOCIAL CAPTIONS (unparsed):{RESET}");
        let _ = writeln!(out, "{}", raw);
    }
    out
}
