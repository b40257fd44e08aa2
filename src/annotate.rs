// SPDX-License-Identifier: PMPL-1.0-or-later
//! Annotated HTML output.
//!
//! Re-serializes an audited document with the configured outline appended to
//! the `style` attribute of every marked element, so errors are visible when
//! the page is opened in a browser.

use crate::config::MarkerConfig;
use crate::document::Document;
use crate::finding::ElementId;
use scraper::{ElementRef, Node};
use std::collections::HashSet;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text children are written verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

/// Serialize the document with every marked element outlined
pub fn annotate(document: &Document, marked: &[ElementId], marker: &MarkerConfig) -> String {
    let mut writer = AnnotatedWriter {
        out: String::new(),
        marked: marked.iter().copied().collect(),
        declarations: marker.declarations(),
        next_id: 0,
    };

    for child in document.html().tree.root().children() {
        match child.value() {
            Node::Doctype(doctype) => {
                writer.out.push_str(&format!("<!DOCTYPE {}>\n", doctype.name()));
            }
            Node::Comment(comment) => writer.write_comment(comment),
            _ => {
                if let Some(element) = ElementRef::wrap(child) {
                    writer.write_element(element);
                }
            }
        }
    }

    writer.out
}

struct AnnotatedWriter {
    out: String,
    marked: HashSet<ElementId>,
    declarations: String,
    /// Pre-order ordinal of the next element, matching `Document::elements`
    next_id: usize,
}

impl AnnotatedWriter {
    fn write_element(&mut self, element: ElementRef<'_>) {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let value = element.value();
        let name = value.name();
        let is_marked = self.marked.contains(&id);

        self.out.push('<');
        self.out.push_str(name);

        let mut styled = false;
        for (attr, val) in value.attrs() {
            let val = if is_marked && attr == "style" {
                styled = true;
                merge_style(val, &self.declarations)
            } else {
                val.to_string()
            };
            self.out.push_str(&format!(" {}=\"{}\"", attr, escape_attr(&val)));
        }
        if is_marked && !styled {
            self.out.push_str(&format!(" style=\"{}\"", escape_attr(&self.declarations)));
        }
        self.out.push('>');

        if VOID_ELEMENTS.contains(&name) {
            return;
        }

        let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
        for child in element.children() {
            match child.value() {
                Node::Text(text) => {
                    if raw_text {
                        self.out.push_str(text);
                    } else {
                        self.out.push_str(&escape_text(text));
                    }
                }
                Node::Comment(comment) => self.write_comment(comment),
                _ => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.write_element(child_element);
                    }
                }
            }
        }

        self.out.push_str(&format!("</{}>", name));
    }

    fn write_comment(&mut self, comment: &str) {
        self.out.push_str(&format!("<!--{}-->", comment));
    }
}

fn merge_style(existing: &str, declarations: &str) -> String {
    let existing = existing.trim().trim_end_matches(';').trim_end();
    if existing.is_empty() {
        declarations.to_string()
    } else {
        format!("{}; {}", existing, declarations)
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::AuditReport;
    use crate::runner::Auditor;
    use crate::sink::MemorySink;

    /// The opening tag that contains `needle`
    fn tag_containing<'a>(html: &'a str, needle: &str) -> &'a str {
        html.split('<')
            .find(|tag| tag.contains(needle))
            .and_then(|tag| tag.split('>').next())
            .unwrap_or("")
    }

    fn audit(html: &str) -> (Document, AuditReport) {
        let document = Document::parse(html);
        let report = Auditor::new().run(&document, &mut MemorySink::new());
        (document, report)
    }

    #[test]
    fn test_marks_error_elements_only() {
        let (document, report) = audit(
            r#"<!DOCTYPE html><html><body><main><h1>T</h1><img src="a.png"><img src="b.png" alt=""></main></body></html>"#,
        );
        let html = annotate(&document, &report.marked, &MarkerConfig::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(tag_containing(&html, "a.png")
            .contains(r#"style="outline: 2px solid red; outline-offset: 2px""#));
        assert!(!tag_containing(&html, "b.png").contains("style="));
        assert_eq!(html.matches("outline:").count(), 1);
    }

    #[test]
    fn test_existing_style_is_extended() {
        let (document, report) = audit(r#"<iframe src="x.html" style="border: 0;"></iframe>"#);
        let html = annotate(&document, &report.marked, &MarkerConfig::default());
        assert!(html.contains(r#"style="border: 0; outline: 2px solid red; outline-offset: 2px""#));
    }

    #[test]
    fn test_text_is_escaped_and_scripts_are_not() {
        let document = Document::parse("<p>a &lt; b</p><script>if (a < b) {}</script>");
        let html = annotate(&document, &[], &MarkerConfig::default());
        assert!(html.contains("<p>a &lt; b</p>"));
        assert!(html.contains("<script>if (a < b) {}</script>"));
    }

    #[test]
    fn test_noscript_fallback_is_kept_as_markup() {
        let document = Document::parse(r#"<noscript><img src="x.png" alt="fallback"></noscript>"#);
        let html = annotate(&document, &[], &MarkerConfig::default());
        assert!(html.contains(r#"<noscript><img src="x.png" alt="fallback"></noscript>"#));
        assert!(!html.contains("&lt;img"));
    }

    #[test]
    fn test_unmarked_document_has_no_outline() {
        let (document, report) = audit("<main><h1>Fine</h1><button>Go</button></main>");
        assert!(report.marked.is_empty());
        let html = annotate(&document, &report.marked, &MarkerConfig::default());
        assert!(!html.contains("outline"));
        assert!(html.contains("<button>Go</button>"));
    }
}
