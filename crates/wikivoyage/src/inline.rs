//! Inline Markdown rendering
//!
//! Renders the mixed text/element children of a block (usually a `<p>`)
//! into Markdown: bold, italic, underline and links. Everything else is
//! flattened to its text, or recursed into when it only wraps whitespace.

use scraper::{ElementRef, Node};
use url::Url;

/// Text starting with one of these is appended without a leading space
const NO_SPACE_BEFORE: &[char] = &[',', '.', '!', '?'];

/// Inline markup kinds recognized by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InlineKind {
    Bold,
    Italic,
    Underline,
    Link,
    Skip,
    Generic,
}

impl InlineKind {
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag {
            "b" | "strong" => InlineKind::Bold,
            "i" | "em" => InlineKind::Italic,
            "ins" | "u" => InlineKind::Underline,
            "a" => InlineKind::Link,
            "meta" | "link" | "script" | "style" => InlineKind::Skip,
            _ => InlineKind::Generic,
        }
    }
}

/// Render the inline content of `element` as trimmed Markdown.
///
/// Relative link targets are resolved against `origin`.
pub fn render_inline(element: ElementRef<'_>, origin: &str) -> String {
    let base = Url::parse(origin).ok();
    render_children(element, base.as_ref())
}

fn render_children(element: ElementRef<'_>, base: Option<&Url>) -> String {
    let mut out = String::new();

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    push_spaced(&mut out, trimmed);
                }
            }
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    render_element(&mut out, child_ref, base);
                }
            }
            _ => {}
        }
    }

    out.trim().to_string()
}

fn render_element(out: &mut String, element: ElementRef<'_>, base: Option<&Url>) {
    let text: String = element.text().collect();
    if text.is_empty() {
        return;
    }

    match InlineKind::from_tag(element.value().name()) {
        InlineKind::Bold => out.push_str(&format!("**{}**", text)),
        InlineKind::Italic => out.push_str(&format!("*{}*", text)),
        InlineKind::Underline => out.push_str(&format!("<ins>{}</ins>", text)),
        InlineKind::Link => match element.value().attr("href") {
            Some(href) => out.push_str(&format!("[{}]({})", text, resolve_href(base, href))),
            None => push_generic(out, element, base),
        },
        InlineKind::Skip => {}
        InlineKind::Generic => push_generic(out, element, base),
    }
}

fn push_generic(out: &mut String, element: ElementRef<'_>, base: Option<&Url>) {
    let flat = flatten_text(element);
    if flat.is_empty() {
        // whitespace-only wrapper
        out.push_str(&render_children(element, base));
    } else {
        push_spaced(out, &flat);
    }
}

fn push_spaced(out: &mut String, text: &str) {
    if !text.starts_with(NO_SPACE_BEFORE) {
        out.push(' ');
    }
    out.push_str(text);
    out.push(' ');
}

/// All descendant text pieces, trimmed, empties dropped, joined by one space
pub(crate) fn flatten_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a link target against the wiki origin.
///
/// Absolute targets of any scheme are kept; unresolvable ones pass through raw.
fn resolve_href(base: Option<&Url>, href: &str) -> String {
    base.and_then(|base| base.join(href).ok())
        .map(String::from)
        .unwrap_or_else(|| href.to_string())
}
