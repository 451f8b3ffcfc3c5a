//! Markup mapper - re-materializes rendered HTML as a typed node tree
//!
//! The rendered body is parsed as a fragment (no surrounding document) and
//! mapped element-for-element, with custom resolution for anchors and
//! images.

use crate::error::{BlogError, Result};
use crate::helpers::normalize_asset_path;

use super::node::RenderedNode;

/// Parse an HTML fragment into a `RenderedNode` tree.
pub fn to_node_tree(markup: &str) -> Result<RenderedNode> {
    let dom = tl::parse(markup, tl::ParserOptions::default())
        .map_err(|e| BlogError::MarkupParse(e.to_string()))?;

    let parser = dom.parser();
    let children: Vec<RenderedNode> = dom
        .children()
        .iter()
        .filter_map(|handle| map_node(*handle, parser, true))
        .collect();

    Ok(RenderedNode::Fragment(children))
}

fn map_node(handle: tl::NodeHandle, parser: &tl::Parser, top_level: bool) -> Option<RenderedNode> {
    match handle.get(parser)? {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_string();

            let attrs: Vec<(String, String)> = tag
                .attributes()
                .iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        v.map(|v| v.to_string()).unwrap_or_default(),
                    )
                })
                .collect();

            let children: Vec<RenderedNode> = tag
                .children()
                .top()
                .iter()
                .filter_map(|h| map_node(*h, parser, false))
                .collect();

            Some(match name.as_str() {
                "a" => map_anchor(attrs, children),
                "img" => map_image(attrs, children),
                _ => RenderedNode::element(name, attrs, children),
            })
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            // Inside an element every text node is content, including the
            // whitespace between adjacent inline elements. Only the blank
            // formatting between top-level blocks is dropped.
            if top_level && text.trim().is_empty() {
                None
            } else {
                Some(RenderedNode::text(text.to_string()))
            }
        }
        tl::Node::Comment(_) => None,
    }
}

/// Anchor resolution: a missing or empty `href` defaults to `/`. Hrefs
/// starting with `/` or `#` are internal navigation; everything else is
/// external and opens in a new tab without leaking opener or referrer.
fn map_anchor(attrs: Vec<(String, String)>, children: Vec<RenderedNode>) -> RenderedNode {
    let mut href = attrs
        .iter()
        .find(|(k, _)| k == "href")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    if href.is_empty() {
        href = "/".to_string();
    }

    let mut out: Vec<(String, String)> = vec![("href".to_string(), href.clone())];
    if !is_internal(&href) {
        out.push(("target".to_string(), "_blank".to_string()));
        out.push(("rel".to_string(), "noopener noreferrer".to_string()));
    }
    out.extend(
        attrs
            .into_iter()
            .filter(|(k, _)| k != "href" && k != "target" && k != "rel"),
    );

    RenderedNode::element("a", out, children)
}

fn is_internal(href: &str) -> bool {
    href.starts_with('/') || href.starts_with('#')
}

/// Image resolution: the `src` is normalized to exactly one leading slash
/// before the serving layer resolves it.
fn map_image(attrs: Vec<(String, String)>, children: Vec<RenderedNode>) -> RenderedNode {
    let out: Vec<(String, String)> = attrs
        .into_iter()
        .map(|(k, v)| {
            if k == "src" {
                let normalized = normalize_asset_path(&v);
                (k, normalized)
            } else {
                (k, v)
            }
        })
        .collect();

    RenderedNode::element("img", out, children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_child(tree: &RenderedNode) -> &RenderedNode {
        match tree {
            RenderedNode::Fragment(children) => &children[0],
            _ => panic!("expected fragment root"),
        }
    }

    #[test]
    fn test_internal_anchor() {
        let tree = to_node_tree(r#"<a href="/posts/x">read</a>"#).unwrap();
        let a = first_child(&tree);
        assert_eq!(a.attr("href"), Some("/posts/x"));
        assert_eq!(a.attr("target"), None);
        assert_eq!(a.attr("rel"), None);
    }

    #[test]
    fn test_fragment_anchor_is_internal() {
        let tree = to_node_tree(r##"<a href="#section">jump</a>"##).unwrap();
        let a = first_child(&tree);
        assert_eq!(a.attr("href"), Some("#section"));
        assert_eq!(a.attr("target"), None);
    }

    #[test]
    fn test_external_anchor_gets_safety_attrs() {
        let tree = to_node_tree(r#"<a href="https://example.com">out</a>"#).unwrap();
        let a = first_child(&tree);
        assert_eq!(a.attr("href"), Some("https://example.com"));
        assert_eq!(a.attr("target"), Some("_blank"));
        assert_eq!(a.attr("rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn test_missing_href_defaults_to_root() {
        let tree = to_node_tree("<a>home</a>").unwrap();
        let a = first_child(&tree);
        assert_eq!(a.attr("href"), Some("/"));
        // "/" is internal, no new-tab directive
        assert_eq!(a.attr("target"), None);
    }

    #[test]
    fn test_image_src_normalization() {
        for (input, expected) in [
            ("//a/b.png", "/a/b.png"),
            ("a/b.png", "/a/b.png"),
            ("/a/b.png", "/a/b.png"),
        ] {
            let tree = to_node_tree(&format!(r#"<img src="{}" alt="x">"#, input)).unwrap();
            let img = first_child(&tree);
            assert_eq!(img.attr("src"), Some(expected), "input {:?}", input);
            assert_eq!(img.attr("alt"), Some("x"));
        }
    }

    #[test]
    fn test_whitespace_between_inline_elements_preserved() {
        let tree = to_node_tree("<p>some <em>a</em> <em>b</em> text</p>").unwrap();
        assert_eq!(tree.to_html(), "<p>some <em>a</em> <em>b</em> text</p>");
    }

    #[test]
    fn test_blank_formatting_between_blocks_dropped() {
        let tree = to_node_tree("<p>a</p>\n<p>b</p>").unwrap();
        assert_eq!(tree.to_html(), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_nested_elements_and_text() {
        let tree = to_node_tree(r#"<div class="alert"><div class="alert-2">hello</div></div>"#)
            .unwrap();
        let outer = first_child(&tree);
        assert_eq!(outer.attr("class"), Some("alert"));
        match outer {
            RenderedNode::Element { children, .. } => {
                assert_eq!(children[0].attr("class"), Some("alert-2"));
                match &children[0] {
                    RenderedNode::Element { children, .. } => {
                        assert_eq!(children[0], RenderedNode::text("hello"));
                    }
                    _ => panic!("expected inner element"),
                }
            }
            _ => panic!("expected element"),
        }
    }
}
