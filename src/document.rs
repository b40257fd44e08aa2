// SPDX-License-Identifier: PMPL-1.0-or-later
//! Parsed document model shared by every rule.
//!
//! Wraps a [`scraper::Html`] tree and assigns each element a stable
//! document-order ordinal ([`ElementId`]). Findings reference elements by that
//! ordinal; the annotator walks the tree in the same order to find them again.

use crate::finding::{ElementId, ElementInfo};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use tracing::debug;

/// Placeholder used in messages for elements without a class
pub const NO_CLASS: &str = "(no class)";

/// A parsed HTML document ready for auditing
pub struct Document {
    html: Html,
    /// Estimated source line per element, indexed by ordinal
    lines: Vec<Option<usize>>,
}

impl Document {
    /// Parse a full HTML document. Malformed markup is recovered, never rejected.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            debug!("Recovered from {} HTML parse error(s)", html.errors.len());
        }
        let lines = estimate_lines(&html, source);
        Self { html, lines }
    }

    /// Underlying parsed tree
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// All elements in pre-order, paired with their ordinal
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, ElementRef<'_>)> + '_ {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .enumerate()
            .map(|(idx, el)| (ElementId(idx), el))
    }

    /// Elements with the given lowercase tag name, in pre-order
    pub fn elements_named<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = (ElementId, ElementRef<'a>)> + 'a {
        self.elements().filter(move |(_, el)| el.value().name() == tag)
    }

    /// Whether any element satisfies the predicate
    pub fn any_element(&self, predicate: impl Fn(&ElementRef<'_>) -> bool) -> bool {
        self.elements().any(|(_, el)| predicate(&el))
    }

    /// Number of elements in the document
    pub fn element_count(&self) -> usize {
        self.lines.len()
    }

    /// Build the descriptor carried by findings
    pub fn describe(&self, id: ElementId, element: ElementRef<'_>) -> ElementInfo {
        ElementInfo {
            id,
            tag: element.value().name().to_string(),
            class: element
                .value()
                .attr("class")
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
            path: css_path(element),
            line: self.lines.get(id.0).copied().flatten(),
        }
    }
}

/// Whether the element carries the attribute (any value, including empty)
pub fn has_attr(element: &ElementRef<'_>, name: &str) -> bool {
    element.value().attr(name).is_some()
}

/// Whether the element's text content is non-blank
pub fn has_visible_text(element: &ElementRef<'_>) -> bool {
    element.text().any(|t| !t.trim().is_empty())
}

/// Whether the element is named through `aria-label` or `aria-labelledby`
pub fn has_aria_name(element: &ElementRef<'_>) -> bool {
    has_attr(element, "aria-label") || has_attr(element, "aria-labelledby")
}

/// The `class` attribute as written, or [`NO_CLASS`]
pub fn class_label(element: &ElementRef<'_>) -> String {
    match element.value().attr("class") {
        Some(class) if !class.is_empty() => class.to_string(),
        _ => NO_CLASS.to_string(),
    }
}

/// Whether an ancestor element has the given tag
pub fn is_inside(element: &ElementRef<'_>, tag: &str) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == tag)
}

/// Whether a descendant element (excluding the element itself) matches
pub fn has_descendant(
    element: &ElementRef<'_>,
    predicate: impl Fn(&ElementRef<'_>) -> bool,
) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|d| predicate(&d))
}

/// CSS-like path, anchored at the nearest ancestor carrying an id
fn css_path(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    let mut current = Some(element);

    while let Some(node) = current {
        let name = node.value().name();

        if let Some(id) = node.value().id() {
            parts.push(format!("{}#{}", name, id));
            break;
        }

        let same_tag = |sibling: &ElementRef<'_>| sibling.value().name() == name;
        let before = node.prev_siblings().filter_map(ElementRef::wrap).filter(same_tag).count();
        let after = node.next_siblings().filter_map(ElementRef::wrap).filter(same_tag).count();

        if before + after > 0 {
            parts.push(format!("{}:nth-of-type({})", name, before + 1));
        } else {
            parts.push(name.to_string());
        }

        current = node.parent().and_then(ElementRef::wrap);
    }

    parts.reverse();
    parts.join(" > ")
}

/// Estimate each element's source line by matching the n-th element of a tag
/// with the n-th `<tag` occurrence in the source. Elements the parser
/// synthesized (implied `<body>`, `<tbody>`) usually have no occurrence.
fn estimate_lines(html: &Html, source: &str) -> Vec<Option<usize>> {
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(source.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect();

    let mut offsets: HashMap<String, Vec<usize>> = HashMap::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut lines = Vec::new();

    for element in html.tree.root().descendants().filter_map(ElementRef::wrap) {
        let tag = element.value().name();
        let tag_offsets = offsets
            .entry(tag.to_string())
            .or_insert_with(|| find_tag_offsets(source, tag));
        let nth = seen.entry(tag.to_string()).or_insert(0);

        lines.push(tag_offsets.get(*nth).map(|&offset| line_of(&line_starts, offset)));
        *nth += 1;
    }

    lines
}

fn find_tag_offsets(source: &str, tag: &str) -> Vec<usize> {
    match Regex::new(&format!(r"(?i)<{}[\s/>]", regex::escape(tag))) {
        Ok(re) => re.find_iter(source).map(|m| m.start()).collect(),
        Err(_) => Vec::new(),
    }
}

fn line_of(line_starts: &[usize], offset: usize) -> usize {
    match line_starts.binary_search(&offset) {
        Ok(idx) => idx + 1,
        Err(idx) => idx,
    }
}
