//! Section extraction from Wikivoyage article HTML
//!
//! Walks the direct children of the article content container and splits
//! them into Markdown sections at every `<h2>`. Content before the first
//! heading is titled with the page heading.
//!
//! Missing nodes never fail the extraction: an absent page heading yields an
//! empty title, an absent content container yields no sections.

use crate::inline::{flatten_text, render_inline};
use crate::types::{PageResult, Section};
use crate::DEFAULT_BASE_URL;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

static PAGE_HEADING: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#firstHeading h1, h1#firstHeading").expect("static selector")
});
static CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("#mw-content-text .mw-content-ltr").expect("static selector")
});
static HEADLINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.mw-headline").expect("static selector"));
static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("static selector"));

/// Block-level node kinds handled by the section walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Paragraph,
    Heading,
    UnorderedList,
    OrderedList,
    Skip,
    Other,
}

impl BlockKind {
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag {
            "p" => BlockKind::Paragraph,
            "h2" => BlockKind::Heading,
            "ul" => BlockKind::UnorderedList,
            "ol" => BlockKind::OrderedList,
            "meta" | "link" | "script" | "style" => BlockKind::Skip,
            _ => BlockKind::Other,
        }
    }
}

/// Running state of one extraction: current title, pending Markdown and
/// the sections closed so far.
#[derive(Debug, Default)]
pub struct SectionAccumulator {
    title: String,
    buffer: String,
    sections: Vec<Section>,
}

impl SectionAccumulator {
    /// Start accumulating under `title`
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Title of the section being accumulated
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markdown accumulated since the last flush
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Sections closed so far
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Append a rendered paragraph; empty paragraphs are ignored
    pub fn push_paragraph(&mut self, text: &str) {
        if !text.is_empty() {
            self.buffer.push_str(text);
            self.buffer.push_str("\n\n");
        }
    }

    /// Append raw Markdown
    pub fn push_str(&mut self, markdown: &str) {
        self.buffer.push_str(markdown);
    }

    /// Close the pending section if it has any content, then reset the buffer
    pub fn flush(&mut self) {
        let content = self.buffer.trim();
        if !content.is_empty() {
            self.sections
                .push(Section::new(self.title.clone(), content.to_string()));
        }
        self.buffer.clear();
    }

    /// Flush, then continue under a new title
    pub fn start_section(&mut self, title: impl Into<String>) {
        self.flush();
        self.title = title.into();
    }

    /// Flush and return every closed section
    pub fn finish(mut self) -> Vec<Section> {
        self.flush();
        self.sections
    }
}

/// Extracts Markdown sections, resolving relative links against a wiki origin
#[derive(Debug, Clone)]
pub struct Extractor {
    origin: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Extractor {
    /// Create an extractor for the wiki at `origin`
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Origin used for relative links
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Extract the sections of an article page
    pub fn extract(&self, html: &str) -> Vec<Section> {
        let document = Html::parse_document(html);

        let title = match document.select(&PAGE_HEADING).next() {
            Some(heading) => heading.text().collect::<String>().trim().to_string(),
            None => {
                debug!("Page heading not found");
                String::new()
            }
        };

        let Some(container) = document.select(&CONTENT).next() else {
            debug!("Content container not found");
            return Vec::new();
        };

        let mut acc = SectionAccumulator::new(title);

        for block in container.children().filter_map(ElementRef::wrap) {
            match BlockKind::from_tag(block.value().name()) {
                BlockKind::Paragraph => acc.push_paragraph(&render_inline(block, &self.origin)),
                BlockKind::Heading => acc.start_section(heading_label(block)),
                BlockKind::UnorderedList => acc.push_str(&render_list(block, false)),
                BlockKind::OrderedList => acc.push_str(&render_list(block, true)),
                BlockKind::Skip | BlockKind::Other => {}
            }
        }

        let sections = acc.finish();
        debug!(sections = sections.len(), "Extracted sections");
        sections
    }

    /// Extract a page and wrap the sections with their URL
    pub fn extract_page(&self, url: impl Into<String>, html: &str) -> PageResult {
        PageResult::new(url, self.extract(html))
    }
}

/// Extract sections using the default English Wikivoyage origin
pub fn extract_sections(html: &str) -> Vec<Section> {
    Extractor::default().extract(html)
}

/// Extract a [`PageResult`] using the default English Wikivoyage origin
pub fn extract_page(url: impl Into<String>, html: &str) -> PageResult {
    Extractor::default().extract_page(url, html)
}

fn heading_label(heading: ElementRef<'_>) -> String {
    heading
        .select(&HEADLINE)
        .next()
        .map(|label| label.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Render every `<li>` under `list` as one Markdown list line
fn render_list(list: ElementRef<'_>, ordered: bool) -> String {
    let mut out = String::from("\n");

    for (index, item) in list.select(&LIST_ITEM).enumerate() {
        let text = replace_first_en_dash(&flatten_text(item));
        if ordered {
            out.push_str(&format!("{}. {}\n", index + 1, text));
        } else {
            out.push_str(&format!("- {}\n", text));
        }
    }

    out.push('\n');
    out
}

/// "Louvre – art museum" becomes "Louvre: art museum"
fn replace_first_en_dash(text: &str) -> String {
    match text.split_once('\u{2013}') {
        Some((before, after)) => format!("{}: {}", before.trim_end(), after.trim_start()),
        None => text.to_string(),
    }
}
