use ego_tree::NodeRef;
use pagescrape_model::Selector;
use scraper::{ElementRef, Html, Node};

/// Elements whose text is never rendered.
const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

/// Extract the trimmed text of every element matching `selector`.
///
/// Matches are returned in document order. Elements whose text is empty
/// after trimming are skipped, so an empty result means "nothing found",
/// not a failure. `Selector::Id` yields at most one value: only the first
/// element with that id is considered.
pub fn extract_text(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        tracing::debug!(errors = document.errors.len(), "Parser recovered from malformed markup");
    }

    let values: Vec<String> = select(&document, selector)
        .into_iter()
        .filter_map(|el| {
            let text = visible_text(el);
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect();

    tracing::debug!(selector = %selector, matches = values.len(), "Extracted text");
    values
}

/// Concatenated text under `el`, skipping script/style-like descendants.
///
/// The matched element itself is never skipped, so selecting `script`
/// by tag still returns its source.
fn visible_text(el: ElementRef) -> String {
    let mut text = String::new();
    collect_visible(*el, &mut text);
    text
}

fn collect_visible(node: NodeRef<Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(elem) if HIDDEN.contains(&elem.name()) => {}
            Node::Element(_) => collect_visible(child, out),
            _ => {}
        }
    }
}

/// Find the elements a selector picks out, in document order.
fn select<'a>(document: &'a Html, selector: &Selector) -> Vec<ElementRef<'a>> {
    if selector.value().is_empty() {
        return Vec::new();
    }

    let root = document.root_element();
    let mut elements = root.descendants().filter_map(ElementRef::wrap);

    match selector {
        Selector::Tag(tag) => {
            // html5ever lowercases element names
            let tag = tag.to_ascii_lowercase();
            elements.filter(|el| el.value().name() == tag).collect()
        }
        Selector::Class(class) => elements
            .filter(|el| el.value().classes().any(|c| c == class.as_str()))
            .collect(),
        Selector::Id(id) => elements
            .find(|el| el.value().id() == Some(id.as_str()))
            .into_iter()
            .collect(),
    }
}
