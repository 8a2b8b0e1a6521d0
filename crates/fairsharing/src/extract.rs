//! Page-layout specific extraction of catalog metadata.
//!
//! Everything that knows where values live in the catalog's HTML is kept
//! behind [`MetadataExtractor`], so a different layout only needs another
//! implementation.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{LicenseGroup, MetadataRecord};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no title element found on {url}")]
    MissingTitle { url: String },

    #[error("invalid selector {selector}: {reason}")]
    Selector { selector: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

pub trait MetadataExtractor: Send + Sync {
    /// Pull a [`MetadataRecord`] out of the markup of the page at `source`.
    fn extract(&self, source: &str, markup: &str) -> Result<MetadataRecord>;
}

const TITLE: &str = r#"div[class="title-text"] > h2"#;
const SCOPE_TAG: &str = r#"li[class="bio-tag domain"]"#;
const SPAN: &str = "span";

const TERMINOLOGY_HEADING: &str = "Terminology Artifacts";
const CONDITIONS_HEADING: &str = "Conditions of Use";
const SECTION_HEADER_CLASS: &str = "section-header";

/// Extraction for FAIRsharing.org record pages.
pub struct FairsharingExtractor {
    title: Selector,
    scope_tag: Selector,
    span: Selector,
}

impl FairsharingExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: selector(TITLE)?,
            scope_tag: selector(SCOPE_TAG)?,
            span: selector(SPAN)?,
        })
    }

    fn title(&self, source: &str, doc: &Html) -> Result<String> {
        let mut headings = doc.select(&self.title).peekable();
        if headings.peek().is_none() {
            return Err(ExtractionError::MissingTitle { url: source.to_string() });
        }

        // first heading that carries text wins
        match headings.find_map(|h2| direct_texts(h2).last()) {
            Some(t) => Ok(t.trim().to_string()),
            None => {
                warn!(url=%source, "title element has no text, using empty title");
                Ok(String::new())
            }
        }
    }

    fn scope_and_data_types(&self, doc: &Html) -> Vec<String> {
        doc.select(&self.scope_tag)
            .filter_map(|li| direct_texts(li).last())
            .map(|t| t.trim().to_string())
            .collect()
    }

    fn terminology_artifacts(&self, doc: &Html) -> Vec<String> {
        let Some(section) = self.section(doc, TERMINOLOGY_HEADING) else {
            return vec![];
        };

        let mut out = Vec::new();
        for ul in child_elements(section, "ul") {
            for li in child_elements(ul, "li") {
                for a in child_elements(li, "a") {
                    out.extend(direct_texts(a).map(|t| t.trim().to_string()));
                }
            }
        }
        out
    }

    fn license_groups(&self, doc: &Html) -> Vec<LicenseGroup> {
        let Some(section) = self.section(doc, CONDITIONS_HEADING) else {
            return vec![];
        };

        child_elements(section, "span")
            .filter(|s| s.value().attr("class") == Some(SECTION_HEADER_CLASS))
            .map(|header| {
                let applies_to = direct_texts(header)
                    .next()
                    .map(collapse_whitespace)
                    .unwrap_or_default();

                // the list belonging to a heading is the first <ul> after it
                let licenses = header
                    .next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|e| e.value().name() == "ul")
                    .map(license_names)
                    .unwrap_or_default();

                LicenseGroup::new(applies_to, licenses)
            })
            .collect()
    }

    /// Container of the section introduced by a `<span>` whose text is `heading`.
    /// Headings sit inside a paragraph, so the section is the grandparent.
    fn section<'a>(&self, doc: &'a Html, heading: &str) -> Option<ElementRef<'a>> {
        let span = doc
            .select(&self.span)
            .find(|s| direct_texts(*s).any(|t| t.trim() == heading))?;

        span.parent()
            .and_then(|p| p.parent())
            .and_then(ElementRef::wrap)
    }
}

impl MetadataExtractor for FairsharingExtractor {
    fn extract(&self, source: &str, markup: &str) -> Result<MetadataRecord> {
        let doc = Html::parse_document(markup);

        let title = self.title(source, &doc)?;
        let scope_and_data_types = self.scope_and_data_types(&doc);
        let terminology_artifacts = self.terminology_artifacts(&doc);
        let license_groups = self.license_groups(&doc);

        debug!(
            url=%source,
            scopes=scope_and_data_types.len(),
            terminology=terminology_artifacts.len(),
            license_groups=license_groups.len(),
            "extracted record"
        );

        Ok(MetadataRecord::new(
            source,
            title,
            scope_and_data_types,
            terminology_artifacts,
            license_groups,
        ))
    }
}

fn selector(css: &'static str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector {
        selector: css,
        reason: e.to_string(),
    })
}

fn license_names(ul: ElementRef<'_>) -> Vec<String> {
    let mut out = Vec::new();
    for li in child_elements(ul, "li") {
        for span in child_elements(li, "span") {
            out.extend(
                span.text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
        }
    }
    out
}

/// Text nodes that are immediate children of `el`.
fn direct_texts<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    el.children().filter_map(|n| n.value().as_text().map(|t| &**t))
}

fn child_elements<'a>(el: ElementRef<'a>, name: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |c| c.value().name() == name)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(markup: &str) -> Result<MetadataRecord> {
        FairsharingExtractor::new().unwrap().extract("https://example.org/x", markup)
    }

    #[test]
    fn test_missing_title_is_error() {
        let err = extract("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingTitle { .. }));
    }

    #[test]
    fn test_empty_title_falls_back_to_empty_string() {
        let rec = extract(r#"<div class="title-text"><h2><img src="x.png"/></h2></div>"#).unwrap();
        assert_eq!(rec.title, "");
    }

    #[test]
    fn test_title_takes_last_text_node() {
        let rec = extract(
            r#"<div class="title-text"><h2>ignored<img src="x.png"/>
                 Real Title
               </h2></div>"#,
        )
        .unwrap();
        assert_eq!(rec.title, "Real Title");
    }

    #[test]
    fn test_title_skips_headings_without_text() {
        let rec = extract(
            r#"<div class="title-text"><h2><img src="x.png"/></h2></div>
               <div class="title-text"><h2>Second Title</h2></div>"#,
        )
        .unwrap();
        assert_eq!(rec.title, "Second Title");
    }

    #[test]
    fn test_scope_tags_keep_order_and_duplicates() {
        let rec = extract(
            r#"<div class="title-text"><h2>T</h2></div>
               <ul>
                 <li class="bio-tag domain"><span class="bio-icon-tag"></span> Gene </li>
                 <li class="bio-tag other">Skip</li>
                 <li class="bio-tag domain"><span></span>Drug</li>
                 <li class="bio-tag domain"><span></span>Gene</li>
               </ul>"#,
        )
        .unwrap();
        assert_eq!(rec.scope_and_data_types, vec!["Gene", "Drug", "Gene"]);
    }

    #[test]
    fn test_absent_sections_yield_empty_lists() {
        let rec = extract(r#"<div class="title-text"><h2>T</h2></div>"#).unwrap();
        assert!(rec.terminology_artifacts.is_empty());
        assert!(rec.license_groups.is_empty());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("\n\tApplies to:\n\n\t\tData use\n"), "Applies to: Data use");
    }
}
