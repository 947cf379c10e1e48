//! Result types for Wikivoyage

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Default preview length used by `Debug` output
pub const PREVIEW_LEN: usize = 51;

/// Preview length for the page URL in `Debug` output
const URL_PREVIEW_LEN: usize = 21;

/// Search results as `(title, link)` pairs, in relevance order
pub type SearchResult = Vec<(String, String)>;

/// Clamp `text` to a preview of at most `max` characters.
///
/// Text longer than `max` keeps its first `max - 1` characters followed by `…`.
pub fn clamp(text: &str, max: usize) -> Cow<'_, str> {
    let max = max.max(2);
    if text.chars().count() <= max {
        return Cow::Borrowed(text);
    }
    let mut preview: String = text.chars().take(max - 1).collect();
    preview.push('…');
    Cow::Owned(preview)
}

/// A titled span of article content rendered as Markdown
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    title: String,
    content: String,
}

impl Section {
    /// Create a section
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// The section title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The section title (alias)
    pub fn section(&self) -> &str {
        &self.title
    }

    /// The section content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The section content (alias)
    pub fn markdown(&self) -> &str {
        &self.content
    }

    /// Content preview clamped to `max` characters
    pub fn preview(&self, max: usize) -> Cow<'_, str> {
        clamp(&self.content, max)
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("title", &self.title)
            .field("content", &self.preview(PREVIEW_LEN))
            .finish()
    }
}

/// Sections extracted from one fetched page
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    url: String,
    sections: Vec<Section>,
}

impl PageResult {
    /// Create a page result
    pub fn new(url: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            url: url.into(),
            sections,
        }
    }

    /// Requested URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// All sections, in document order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Consume the result, keeping the sections
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

impl fmt::Debug for PageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageResult")
            .field("url", &clamp(&self.url, URL_PREVIEW_LEN))
            .field("sections", &self.sections)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_short_text_untouched() {
        assert_eq!(clamp("Paris", 51), "Paris");
        assert!(matches!(clamp("Paris", 51), Cow::Borrowed(_)));
        assert_eq!(clamp("abcde", 5), "abcde");
    }

    #[test]
    fn test_clamp_text_exactly_at_bound() {
        let exact = "z".repeat(PREVIEW_LEN);
        assert_eq!(clamp(&exact, PREVIEW_LEN), exact);
        assert_eq!(clamp("Lyon", 4), "Lyon");
        assert_eq!(clamp("Lyons", 4), "Lyo…");
    }

    #[test]
    fn test_clamp_long_text() {
        assert_eq!(clamp("abcdef", 5), "abcd…");
        let long = "x".repeat(100);
        let preview = clamp(&long, PREVIEW_LEN);
        assert_eq!(preview.chars().count(), PREVIEW_LEN);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_clamp_counts_chars_not_bytes() {
        assert_eq!(clamp("Zürich–Genève", 7), "Zürich…");
    }

    #[test]
    fn test_section_aliases() {
        let section = Section::new("Get in", "By **train**.");
        assert_eq!(section.title(), "Get in");
        assert_eq!(section.section(), section.title());
        assert_eq!(section.content(), "By **train**.");
        assert_eq!(section.markdown(), section.content());
    }

    #[test]
    fn test_section_debug_is_clamped() {
        let section = Section::new("Understand", "y".repeat(200));
        let debug = format!("{:?}", section);
        assert!(debug.starts_with("Section { title: \"Understand\""));
        assert!(debug.contains('…'));
        assert!(!debug.contains(&"y".repeat(60)));
    }

    #[test]
    fn test_page_result_accessors() {
        let page = PageResult::new(
            "https://en.wikivoyage.org/wiki/Paris",
            vec![Section::new("Paris", "Intro"), Section::new("See", "Louvre")],
        );
        assert_eq!(page.url(), "https://en.wikivoyage.org/wiki/Paris");
        assert_eq!(page.sections().len(), 2);
        assert_eq!(page.sections()[1].title(), "See");

        let debug = format!("{:?}", page);
        assert!(debug.contains("https://en.wikivoyag…"));

        let sections = page.into_sections();
        assert_eq!(sections[0].content(), "Intro");
    }

    #[test]
    fn test_page_result_serialization() {
        let page = PageResult::new("https://example.org", vec![Section::new("A", "b")]);
        let json = serde_json::to_string(&page).unwrap();
        assert_eq!(
            json,
            r#"{"url":"https://example.org","sections":[{"title":"A","content":"b"}]}"#
        );
    }
}
