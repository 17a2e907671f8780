//! HTML parsing into an owned, read-only tag tree.
//!
//! `scraper::Html` is not `Sync`, so the document is flattened once into a
//! plain [`TagTree`] that analyzers can share by reference across threads.

use scraper::{ElementRef, Html};

/// One element in document order.
#[derive(Debug, Clone)]
pub struct TagNode {
    /// Lowercase tag name (e.g. "h1", "meta")
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    /// Whitespace-collapsed descendant text
    pub text: String,
}

impl TagNode {
    /// Get an attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A flattened, document-ordered view of the parsed page.
#[derive(Debug, Clone, Default)]
pub struct TagTree {
    nodes: Vec<TagNode>,
}

impl TagTree {
    /// True when the page produced no elements at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All elements in document order.
    pub fn nodes(&self) -> &[TagNode] {
        &self.nodes
    }

    /// All elements with the given tag name, in document order.
    pub fn elements<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a TagNode> + 'a {
        let name = name.to_string();
        self.nodes.iter().filter(move |n| n.name == name)
    }

    /// Number of elements with the given tag name.
    pub fn count(&self, name: &str) -> usize {
        self.elements(name).count()
    }

    /// First element with the given tag name.
    pub fn first(&self, name: &str) -> Option<&TagNode> {
        self.elements(name).next()
    }

    /// Content of `<meta name="...">`.
    pub fn meta_content(&self, meta_name: &str) -> Option<&str> {
        self.elements("meta")
            .find(|m| m.attr("name").is_some_and(|n| n.eq_ignore_ascii_case(meta_name)))
            .and_then(|m| m.attr("content"))
    }

    /// All h1-h6 headings as (level, node) in document order.
    pub fn headings(&self) -> impl Iterator<Item = (u8, &TagNode)> {
        self.nodes.iter().filter_map(|n| match n.name.as_str() {
            "h1" => Some((1, n)),
            "h2" => Some((2, n)),
            "h3" => Some((3, n)),
            "h4" => Some((4, n)),
            "h5" => Some((5, n)),
            "h6" => Some((6, n)),
            _ => None,
        })
    }
}

/// The parser collaborator's output: tag tree plus extracted visible text.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub tree: TagTree,
    pub visible_text: String,
}

/// Parse raw HTML into a tag tree and extract the visible text with
/// script/style content stripped. Empty input yields an empty tree.
pub fn parse_page(html: &str) -> ParsedPage {
    if html.trim().is_empty() {
        return ParsedPage::default();
    }

    let document = Html::parse_document(html);
    let root = document.root_element();

    let mut nodes = Vec::new();
    for node in root.descendants() {
        if let Some(el) = ElementRef::wrap(node) {
            nodes.push(TagNode {
                name: el.value().name().to_ascii_lowercase(),
                attrs: el
                    .value()
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                text: collapse_whitespace(el.text()),
            });
        }
    }

    let mut parts: Vec<String> = Vec::new();
    for node in root.descendants() {
        if let Some(text) = node.value().as_text() {
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript" | "template"))
            });
            if !hidden {
                let t: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !t.is_empty() {
                    parts.push(t);
                }
            }
        }
    }

    ParsedPage {
        tree: TagTree { nodes },
        visible_text: parts.join(" "),
    }
}

fn collapse_whitespace<'a>(chunks: impl Iterator<Item = &'a str>) -> String {
    chunks
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head>
            <title>Hello World</title>
            <meta name="description" content="A test page">
        </head><body>
            <h1>Main   heading</h1>
            <p>Some <b>bold</b> text.</p>
            <script>var hidden = 1;</script>
            <style>.x { color: red }</style>
        </body></html>"#;

    #[test]
    fn test_parse_collects_elements() {
        let page = parse_page(PAGE);
        assert!(!page.tree.is_empty());
        assert_eq!(page.tree.count("h1"), 1);
        assert_eq!(page.tree.first("title").unwrap().text, "Hello World");
        assert_eq!(page.tree.meta_content("description"), Some("A test page"));
    }

    #[test]
    fn test_descendant_text_is_collapsed() {
        let page = parse_page(PAGE);
        assert_eq!(page.tree.first("h1").unwrap().text, "Main heading");
        assert_eq!(page.tree.first("p").unwrap().text, "Some bold text.");
    }

    #[test]
    fn test_visible_text_strips_script_and_style() {
        let page = parse_page(PAGE);
        assert!(page.visible_text.contains("Main heading"));
        assert!(page.visible_text.contains("Some bold text."));
        assert!(!page.visible_text.contains("var hidden"));
        assert!(!page.visible_text.contains("color: red"));
    }

    #[test]
    fn test_headings_in_document_order() {
        let page = parse_page("<h2>b</h2><h1>a</h1><h3>c</h3>");
        let levels: Vec<u8> = page.tree.headings().map(|(l, _)| l).collect();
        assert_eq!(levels, vec![2, 1, 3]);
    }

    #[test]
    fn test_empty_input_is_empty_tree() {
        let page = parse_page("   ");
        assert!(page.tree.is_empty());
        assert!(page.visible_text.is_empty());
    }
}
