//! Wikivoyage - travel guide pages as Markdown sections
//!
//! This crate fetches Wikivoyage article pages and splits their content into
//! titled Markdown sections, and queries the wiki's opensearch API.
//!
//! ```no_run
//! # async fn run() -> Result<(), wikivoyage::FetchError> {
//! let page = wikivoyage::get("https://en.wikivoyage.org/wiki/Paris").await?;
//! for section in page.sections() {
//!     println!("## {}\n\n{}", section.title(), section.content());
//! }
//!
//! let hits = wikivoyage::search("Lyon").await?;
//! # Ok(())
//! # }
//! ```
//!
//! Extraction works on plain HTML too, see [`extract_sections`] and
//! [`Extractor`].

pub mod client;
mod error;
pub mod extract;
mod inline;
mod types;
mod wiki;

pub use client::{get, get_with_options, search, search_with_options, FetchOptions};
pub use error::FetchError;
pub use extract::{extract_page, extract_sections, Extractor, SectionAccumulator};
pub use inline::render_inline;
pub use types::{clamp, PageResult, SearchResult, Section, PREVIEW_LEN};
pub use wiki::{Wiki, WikiBuilder};

/// Default User-Agent string, a desktop browser so the wiki serves full pages
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36 OPR/109.0.0.0";

/// Default wiki origin
pub const DEFAULT_BASE_URL: &str = "https://en.wikivoyage.org";
