//! Parsing of generated social captions.

use serde::{Deserialize, Serialize};

/// Marker that opens the Instagram caption.
pub const INSTAGRAM_MARKER: &str = "---INSTAGRAM---";
/// Marker that opens the LinkedIn caption.
pub const LINKEDIN_MARKER: &str = "---LINKEDIN---";

/// Captions extracted from a caption-generation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Captions {
    /// Both markers were found.
    Split { instagram: String, linkedin: String },
    /// At least one marker was missing; the response is kept verbatim.
    Unparsed { raw: String },
}

impl Captions {
    pub fn instagram(&self) -> Option<&str> {
        match self {
            Captions::Split { instagram, .. } => Some(instagram),
            Captions::Unparsed { .. } => None,
        }
    }

    pub fn linkedin(&self) -> Option<&str> {
        match self {
            Captions::Split { linkedin, .. } => Some(linkedin),
            Captions::Unparsed { .. } => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            Captions::Unparsed { raw } => Some(raw),
            Captions::Split { .. } => None,
        }
    }
}

/// Splits a response of the form
///
/// ```text
/// ---INSTAGRAM---
/// ...
/// ---LINKEDIN---
/// ...
/// ```
///
/// Text before the first LinkedIn marker becomes the Instagram caption; text
/// between the first and any further LinkedIn marker becomes the LinkedIn
/// caption. Instagram markers are removed from both and both are trimmed, so
/// neither caption ever contains a marker.
pub fn parse_captions(response: &str) -> Captions {
    if !(response.contains(INSTAGRAM_MARKER) && response.contains(LINKEDIN_MARKER)) {
        return Captions::Unparsed {
            raw: response.to_string(),
        };
    }

    let mut parts = response.split(LINKEDIN_MARKER);
    let instagram = strip_markers(parts.next().unwrap_or_default());
    let linkedin = strip_markers(parts.next().unwrap_or_default());

    Captions::Split {
        instagram,
        linkedin,
    }
}

/// Removes both markers until none is left. A single pass is not enough,
/// since deleting one marker can join its neighbours into another.
fn strip_markers(part: &str) -> String {
    let mut text = part.to_string();
    while text.contains(INSTAGRAM_MARKER) || text.contains(LINKEDIN_MARKER) {
        text = text
            .replace(INSTAGRAM_MARKER, "")
            .replace(LINKEDIN_MARKER, "");
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_response() {
        let response = "---INSTAGRAM---\nBuild your first app today! 🚀\n#coding\n\n---LINKEDIN---\nShipping beats perfection.\n#software";
        let captions = parse_captions(response);

        assert_eq!(
            captions,
            Captions::Split {
                instagram: "Build your first app today! 🚀\n#coding".to_string(),
                linkedin: "Shipping beats perfection.\n#software".to_string(),
            }
        );
    }

    #[test]
    fn test_parsed_captions_never_contain_markers() {
        let response = "Intro chatter\n---INSTAGRAM---\nInsta text\n---LINKEDIN---\nLinked text";
        let captions = parse_captions(response);

        for caption in [captions.instagram().unwrap(), captions.linkedin().unwrap()] {
            assert!(!caption.contains(INSTAGRAM_MARKER));
            assert!(!caption.contains(LINKEDIN_MARKER));
        }
        assert_eq!(captions.instagram(), Some("Intro chatter\n\nInsta text"));
    }

    #[test]
    fn test_nested_markers_are_fully_removed() {
        let response = "---INSTA---INSTAGRAM---GRAM---\nhello\n---LINKEDIN---\n\
                        ---LINK---INSTAGRAM---EDIN---\nworld";
        let captions = parse_captions(response);

        assert_eq!(captions.instagram(), Some("hello"));
        assert_eq!(captions.linkedin(), Some("world"));
        for caption in [captions.instagram().unwrap(), captions.linkedin().unwrap()] {
            assert!(!caption.contains(INSTAGRAM_MARKER));
            assert!(!caption.contains(LINKEDIN_MARKER));
        }
    }

    #[test]
    fn test_repeated_linkedin_marker_keeps_first_section() {
        let response = "---INSTAGRAM---\nA\n---LINKEDIN---\nB\n---LINKEDIN---\nC";
        let captions = parse_captions(response);
        assert_eq!(captions.linkedin(), Some("B"));
        assert!(!captions.linkedin().unwrap().contains(LINKEDIN_MARKER));
    }

    #[test]
    fn test_missing_linkedin_marker_keeps_raw_text() {
        let response = "---INSTAGRAM---\nOnly instagram here";
        let captions = parse_captions(response);
        assert_eq!(captions.raw(), Some(response));
        assert!(captions.instagram().is_none());
        assert!(captions.linkedin().is_none());
    }

    #[test]
    fn test_missing_instagram_marker_keeps_raw_text() {
        let response = "Here you go:\n---LINKEDIN---\nProfessional caption";
        assert_eq!(parse_captions(response).raw(), Some(response));
    }

    #[test]
    fn test_markers_in_reverse_order() {
        let response = "---LINKEDIN---\nL\n---INSTAGRAM---\nI";
        let captions = parse_captions(response);
        assert_eq!(captions.instagram(), Some(""));
        assert_eq!(captions.linkedin(), Some("L\n\nI"));
    }
}
