use ego_tree::iter::Edge;
use scraper::{Html, Node, Selector};

/// Law sections are `<section>` elements carrying the `akn-section` class token.
pub const SECTION_SELECTOR: &str = "section.akn-section";

/// Elements whose text is not part of the rendered reading text: code,
/// stylesheets, inert templates and ruby annotations.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template", "rt", "rp"];

/// Extract the text of the first law section in `html`.
///
/// Returns `None` when the page has no matching section. Text nodes are
/// joined with single spaces; whitespace runs inside and between nodes
/// collapse to one space and the result is trimmed.
pub fn extract_law_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let section_sel = Selector::parse(SECTION_SELECTOR).expect("valid selector");

    let section = document.select(&section_sel).next()?;

    // Walk open/close edges instead of recursing: nesting depth is unbounded.
    let mut words = Vec::new();
    let mut hidden_depth = 0usize;
    for edge in section.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(elem) if is_hidden(elem.name()) => hidden_depth += 1,
                Node::Text(text) if hidden_depth == 0 => words.extend(text.split_whitespace()),
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(elem) = node.value() {
                    if is_hidden(elem.name()) {
                        hidden_depth -= 1;
                    }
                }
            }
        }
    }

    tracing::debug!(words = words.len(), "Extracted law section");
    Some(words.join(" "))
}

fn is_hidden(name: &str) -> bool {
    HIDDEN_ELEMENTS.contains(&name)
}
