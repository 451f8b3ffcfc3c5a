//! Typed node tree produced by the markup mapper

/// A node in the rendered output tree.
///
/// Text content and attribute values are kept exactly as they appeared in
/// the parsed fragment (entity-encoded where the source was), so
/// serialization writes them back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedNode {
    /// A text node
    Text(String),
    /// An element with tag name, attributes and children
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<RenderedNode>,
    },
    /// The fragment root: a sequence of top-level nodes without a wrapper
    Fragment(Vec<RenderedNode>),
}

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl RenderedNode {
    pub fn text<S: Into<String>>(value: S) -> Self {
        RenderedNode::Text(value.into())
    }

    pub fn element<S: Into<String>>(
        tag: S,
        attrs: Vec<(String, String)>,
        children: Vec<RenderedNode>,
    ) -> Self {
        RenderedNode::Element {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    /// Look up an attribute value on an element node
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            RenderedNode::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Serialize the tree back to an HTML string
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            RenderedNode::Text(text) => out.push_str(text),
            RenderedNode::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            RenderedNode::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(value);
                        out.push('"');
                    }
                }
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    out.push_str(" />");
                    return;
                }
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
