use scraper::{ElementRef, Html, Node, Selector};

/// Parses a selector that is known to be valid at compile time
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Flattens an element into text, keeping `<br>` as line breaks.
///
/// Descendants are visited depth-first. Text nodes contribute their trimmed
/// content, `<br>` contributes a newline and every other element contributes
/// nothing by itself.
pub fn element_to_text(element: ElementRef) -> String {
    let mut text = String::new();
    for node in element.descendants().skip(1) {
        match node.value() {
            Node::Text(t) => text.push_str(t.trim()),
            Node::Element(e) if e.name() == "br" => text.push('\n'),
            _ => {}
        }
    }
    text
}

/// Concatenated text content of an element, untouched
pub fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// First element in the document matching `css`
pub fn select_first<'a>(doc: &'a Html, css: &Selector) -> Option<ElementRef<'a>> {
    doc.select(css).next()
}

/// First descendant of `element` matching `css`
pub fn select_first_in<'a>(element: ElementRef<'a>, css: &Selector) -> Option<ElementRef<'a>> {
    element.select(css).next()
}

/// Whether the element's class list contains `class`
pub fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Direct element children of `element` with the given tag name
pub fn child_elements<'a>(
    element: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(move |child| child.value().name() == tag)
}
