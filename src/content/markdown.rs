//! Markdown rendering pipeline
//!
//! A fixed ordered sequence of passes over the pulldown-cmark event stream:
//! syntax highlighting for fenced code blocks, image unwrapping, the
//! `[comment]` alert rewrite, heading slug injection, then HTML
//! serialization. Raw HTML embedded in the markdown passes through verbatim;
//! the store is trusted, single-author content.

use std::collections::HashMap;

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

lazy_static! {
    /// Strips `[comment]` / `[/comment]` markers. Opening and closing forms
    /// are removed wherever they occur, paired or not.
    static ref COMMENT_MARKER: Regex = Regex::new(r"\[/?comment\]").unwrap();
}

/// Marker that turns a paragraph into an alert block
const COMMENT_PREFIX: &str = "[comment]";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let events: Vec<Event> = parser.collect();
        let events = self.highlight_pass(events);
        let events = unwrap_images(events);
        let events = rewrite_comment_alerts(events);
        let events = inject_heading_slugs(events);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Replace fenced code blocks with highlighted HTML. The code text
    /// itself is not altered, only annotated.
    fn highlight_pass<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_content = String::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let highlighted =
                        self.highlight_code(&code_content, code_lang.take().as_deref());
                    out.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if in_code_block => {
                    code_content.push_str(&text);
                }
                other => out.push(other),
            }
        }

        out
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.line_numbers {
                    add_line_numbers(&highlighted, lang)
                } else {
                    format!(
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        lang, highlighted
                    )
                }
            }
            Err(_) => {
                // Fallback to plain code block
                let escaped = html_escape(code);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang, escaped
                )
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Add a line-number gutter next to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let line_count = lines.len();

    let mut gutter = String::new();
    let mut code_lines = String::new();

    for (i, line) in lines.iter().enumerate() {
        gutter.push_str(&format!(r#"<span class="line-number">{}</span>"#, i + 1));
        code_lines.push_str(line);
        if i < line_count - 1 {
            gutter.push('\n');
            code_lines.push('\n');
        }
    }

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang, gutter, code_lines
    )
}

/// Run `transform` over the contents of every top-level paragraph.
///
/// The transform receives the buffered events between `Start(Paragraph)` and
/// `End(Paragraph)` and returns the replacement events plus whether the
/// paragraph wrapper should be kept.
fn map_paragraphs<'a, F>(events: Vec<Event<'a>>, mut transform: F) -> Vec<Event<'a>>
where
    F: FnMut(Vec<Event<'a>>) -> (Vec<Event<'a>>, bool),
{
    let mut out = Vec::with_capacity(events.len());
    let mut buffer: Option<Vec<Event>> = None;

    for event in events {
        match event {
            Event::Start(Tag::Paragraph) if buffer.is_none() => {
                buffer = Some(Vec::new());
            }
            Event::End(TagEnd::Paragraph) if buffer.is_some() => {
                let inner = buffer.take().unwrap_or_default();
                let (replacement, keep_wrapper) = transform(inner);
                if keep_wrapper {
                    out.push(Event::Start(Tag::Paragraph));
                    out.extend(replacement);
                    out.push(Event::End(TagEnd::Paragraph));
                } else {
                    out.extend(replacement);
                }
            }
            other => match buffer.as_mut() {
                Some(buf) => buf.push(other),
                None => out.push(other),
            },
        }
    }

    out
}

/// Promote an image that is the sole child of a paragraph, removing the
/// wrapping paragraph element. Prevents invalid block nesting once images
/// are wrapped in block-level containers downstream.
fn unwrap_images(events: Vec<Event>) -> Vec<Event> {
    map_paragraphs(events, |inner| {
        let single_image = matches!(inner.first(), Some(Event::Start(Tag::Image { .. })))
            && matches!(inner.last(), Some(Event::End(TagEnd::Image)))
            && inner
                .iter()
                .filter(|e| matches!(e, Event::Start(Tag::Image { .. })))
                .count()
                == 1;
        let keep_wrapper = !single_image;
        (inner, keep_wrapper)
    })
}

/// Rewrite paragraphs whose first child is a text node starting with
/// `[comment]` into an alert container.
///
/// Only the first text child survives, with every marker substring stripped;
/// the remaining children are dropped. Markers are not required to be
/// paired.
fn rewrite_comment_alerts(events: Vec<Event>) -> Vec<Event> {
    map_paragraphs(events, |inner| {
        // The parser splits plain text at bracket boundaries; the leading
        // run of text events corresponds to the paragraph's first text
        // child once adjacent text is merged.
        let mut text = String::new();
        for event in &inner {
            match event {
                Event::Text(t) => text.push_str(t),
                Event::SoftBreak => text.push('\n'),
                _ => break,
            }
        }

        if text.starts_with(COMMENT_PREFIX) {
            let value = COMMENT_MARKER.replace_all(&text, "");
            let html = format!(
                r#"<div class="alert"><div class="alert-2">{}</div></div>"#,
                html_escape(&value)
            );
            (vec![Event::Html(CowStr::from(html))], false)
        } else {
            (inner, true)
        }
    })
}

/// Give every heading a deterministic id derived from its text content,
/// disambiguating duplicates with `-1`, `-2`, ... suffixes.
fn inject_heading_slugs(events: Vec<Event>) -> Vec<Event> {
    let mut out = Vec::with_capacity(events.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut heading: Option<(Tag, Vec<Event>)> = None;

    for event in events {
        match event {
            Event::Start(tag @ Tag::Heading { .. }) if heading.is_none() => {
                heading = Some((tag, Vec::new()));
            }
            Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                let (tag, inner) = heading.take().unwrap_or((Tag::Paragraph, Vec::new()));
                let Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                } = tag
                else {
                    continue;
                };

                // An explicit `{#id}` attribute wins over the derived slug
                let id = id.or_else(|| {
                    let text: String = inner
                        .iter()
                        .filter_map(|e| match e {
                            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
                            _ => None,
                        })
                        .collect();
                    let base = slug::slugify(&text);
                    let count = seen.entry(base.clone()).or_insert(0);
                    let slug = if *count == 0 {
                        base.clone()
                    } else {
                        format!("{}-{}", base, count)
                    };
                    *count += 1;
                    Some(CowStr::from(slug))
                });

                out.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
                out.extend(inner);
                out.push(Event::End(TagEnd::Heading(level)));
            }
            other => match heading.as_mut() {
                Some((_, inner)) => inner.push(other),
                None => out.push(other),
            },
        }
    }

    out
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
