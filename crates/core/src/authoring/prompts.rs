//! Prompt templates sent to the text-generation model.

use super::captions::{INSTAGRAM_MARKER, LINKEDIN_MARKER};

/// Token budget for translations.
pub const TRANSLATION_MAX_TOKENS: u32 = 4096;
/// Token budget for editor scripts.
pub const EDITOR_SCRIPT_MAX_TOKENS: u32 = 4096;
/// Token budget for social captions.
pub const CAPTIONS_MAX_TOKENS: u32 = 2048;

/// Builds the translation prompt.
///
/// The model is asked for a natural, conversational English rendering that
/// adds no filler words absent from the source.
pub fn translation_prompt(source_language: &str, text: &str) -> String {
    let mut prompt = format!(
        "Translate this {lang} text to English.\n\
         Keep it natural and conversational. Only return the translation.\n\
         Do not add filler words like \"guys\", \"folks\", or \"you know\" that aren't in the original.\n",
        lang = source_language
    );

    if source_language.eq_ignore_ascii_case("hindi") {
        prompt.push_str(
            "\nExample:\n\
             Hindi: \"तो हम आज बात करेंगे कि कैसे आप अपना पहला ऐप बना सकते हैं\"\n\
             English: \"So today we'll talk about how you can build your first app\"\n\
             (Note: \"तो हम आज\" = \"So today we\" - do NOT translate as \"So guys today\")\n",
        );
    }

    prompt.push_str("\nNow translate:\n");
    prompt.push_str(text);
    prompt
}

/// Builds the editor script prompt.
pub fn editor_script_prompt(transcript: &str) -> String {
    format!(
        "You are a video editor assistant. Create an editor script for this video.\n\
         \n\
         Include:\n\
         1. **Key Segments** - Break into sections with estimated timestamps\n\
         2. **B-Roll Suggestions** - Visuals to overlay\n\
         3. **Text Overlays** - Key points for screen\n\
         4. **Transitions** - Between sections\n\
         5. **Music Notes** - Background mood\n\
         6. **Cuts** - Filler words/pauses to remove\n\
         \n\
         TRANSCRIPT:\n\
         {transcript}\n\
         \n\
         Generate the editor script:"
    )
}

/// Builds the social caption prompt with the two-section response format.
pub fn social_captions_prompt(transcript: &str) -> String {
    format!(
        "Based on this video transcript, create engaging social media captions.\n\
         \n\
         TRANSCRIPT:\n\
         {transcript}\n\
         \n\
         Generate TWO captions:\n\
         \n\
         ## INSTAGRAM CAPTION\n\
         - Hook in first line (attention-grabbing)\n\
         - Use line breaks for readability\n\
         - Include relevant emojis\n\
         - Add a call-to-action\n\
         - Include 5-10 relevant hashtags at the end\n\
         - Keep it under 2200 characters\n\
         \n\
         ## LINKEDIN CAPTION\n\
         - Professional tone\n\
         - Start with a hook or insight\n\
         - Use short paragraphs\n\
         - Include a thought-provoking question or CTA\n\
         - No hashtags in the middle, only 3-5 at the very end\n\
         - Keep it under 3000 characters\n\
         \n\
         Format your response exactly as:\n\
         {INSTAGRAM_MARKER}\n\
         [instagram caption here]\n\
         \n\
         {LINKEDIN_MARKER}\n\
         [linkedin caption here]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_prompt_includes_text_and_constraints() {
        let prompt = translation_prompt("Hindi", "नमस्ते दोस्तों");
        assert!(prompt.starts_with("Translate this Hindi text to English."));
        assert!(prompt.contains("Do not add filler words"));
        assert!(prompt.contains("do NOT translate as \"So guys today\""));
        assert!(prompt.ends_with("Now translate:\nनमस्ते दोस्तों"));
    }

    #[test]
    fn test_translation_prompt_skips_hindi_example_for_other_languages() {
        let prompt = translation_prompt("Tamil", "வணக்கம்");
        assert!(prompt.starts_with("Translate this Tamil text to English."));
        assert!(!prompt.contains("Example:"));
        assert!(prompt.ends_with("வணக்கம்"));
    }

    #[test]
    fn test_editor_script_prompt_lists_sections() {
        let prompt = editor_script_prompt("So today we'll build an app");
        for section in [
            "Key Segments",
            "B-Roll Suggestions",
            "Text Overlays",
            "Transitions",
            "Music Notes",
            "Cuts",
        ] {
            assert!(prompt.contains(section), "missing {}", section);
        }
        assert!(prompt.contains("TRANSCRIPT:\nSo today we'll build an app\n"));
    }

    #[test]
    fn test_social_captions_prompt_requests_marker_format() {
        let prompt = social_captions_prompt("transcript body");
        assert!(prompt.contains("TRANSCRIPT:\ntranscript body\n"));
        assert!(prompt.contains("---INSTAGRAM---\n[instagram caption here]"));
        assert!(prompt.ends_with("---LINKEDIN---\n[linkedin caption here]"));
        assert!(prompt.contains("under 2200 characters"));
        assert!(prompt.contains("under 3000 characters"));
    }
}
