//! Preview derivation - shorten a source field to its first two sentences

use std::borrow::Cow;

/// Appended to a truncated preview to signal the cut
const ELLIPSIS: char = '\u{2026}';

/// Derive a preview from a source field.
///
/// Returns the substring up to and including the second period, with an
/// ellipsis appended. When the text has fewer than two periods no preview is
/// possible and the input is returned unchanged.
pub fn derive_preview(source: &str) -> Cow<'_, str> {
    let mut periods = source.char_indices().filter(|(_, c)| *c == '.').map(|(i, _)| i);
    periods.next();
    match periods.next() {
        Some(second) => {
            // '.' is a single byte, so second + 1 is a char boundary
            let mut preview = source[..second + 1].to_string();
            preview.push(ELLIPSIS);
            Cow::Owned(preview)
        }
        None => Cow::Borrowed(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_after_second_sentence() {
        let source = "Intro sentence one. Sentence two. Rest of content.";
        assert_eq!(
            derive_preview(source),
            "Intro sentence one. Sentence two.\u{2026}"
        );
    }

    #[test]
    fn test_no_periods_unchanged() {
        assert_eq!(derive_preview("no sentences here"), "no sentences here");
    }

    #[test]
    fn test_one_period_unchanged() {
        assert_eq!(derive_preview("Only one sentence."), "Only one sentence.");
    }

    #[test]
    fn test_exactly_two_periods() {
        assert_eq!(derive_preview("One. Two."), "One. Two.\u{2026}");
    }

    #[test]
    fn test_empty_string_unchanged() {
        assert_eq!(derive_preview(""), "");
    }

    #[test]
    fn test_multibyte_text() {
        let source = "Héllo wörld. Ünïcode tëxt. More.";
        assert_eq!(derive_preview(source), "Héllo wörld. Ünïcode tëxt.\u{2026}");
    }

    #[test]
    fn test_preview_never_longer_than_cut() {
        let source = "A. B. C. D.";
        let preview = derive_preview(source);
        assert!(preview.ends_with('\u{2026}'));
        // Everything before the marker fits within the original cut
        assert_eq!(&preview[..preview.len() - '\u{2026}'.len_utf8()], "A. B.");
    }

    #[test]
    fn test_deterministic() {
        let source = "One. Two. Three.";
        assert_eq!(derive_preview(source), derive_preview(source));
    }
}
