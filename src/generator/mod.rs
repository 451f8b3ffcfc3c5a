//! Generator module - composes the store, renderer, mapper and listing
//! helpers into page-level outputs and writes them under the public
//! directory.

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{ContentStore, MarkdownRenderer, Post};
use crate::error::BlogError;
use crate::events::RouteEvents;
use crate::helpers::{by_category, page_range, paginate, sort_by_date_desc, url_for};
use crate::i18n::I18n;
use crate::markup::{self, RenderedNode};
use crate::Blog;

/// Listing card data for one post
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub categories: Vec<String>,
}

impl PostSummary {
    fn from_post(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            description: post.description.clone(),
            image: post.image.clone(),
            categories: post.categories.clone(),
        }
    }
}

/// Output of a listing request
#[derive(Debug, Clone)]
pub struct ListingView {
    pub posts: Vec<PostSummary>,
    /// Page-index sequence for the pagination control, `[1..=page_count]`
    pub pages: Vec<usize>,
    pub current_page: usize,
}

/// Output of a post-detail request
#[derive(Debug)]
pub enum PostView {
    Rendered {
        summary: PostSummary,
        body: RenderedNode,
    },
    /// The record could not be loaded at all
    Failed { message: String },
}

/// Static site generator
pub struct Generator {
    blog: Blog,
    store: ContentStore,
    renderer: MarkdownRenderer,
    i18n: I18n,
}

impl Generator {
    pub fn new(blog: &Blog) -> Self {
        let store = ContentStore::new(&blog.posts_dir);
        let renderer = MarkdownRenderer::with_options(
            &blog.config.highlight.theme,
            blog.config.highlight.line_number,
        );
        let i18n = I18n::new(&blog.config.language);

        Self {
            blog: blog.clone(),
            store,
            renderer,
            i18n,
        }
    }

    /// Generate the entire site, emitting a route event per written page.
    ///
    /// Load failures never abort the build; they degrade to empty listings
    /// or localized failure pages.
    pub fn generate(&self, events: &RouteEvents) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        let posts = match self.store.load_all() {
            Ok(mut posts) => {
                sort_by_date_desc(&mut posts);
                posts
            }
            Err(e) => {
                tracing::warn!("Listing degraded to empty: {}", e);
                Vec::new()
            }
        };

        tracing::info!("Generating site for {} posts", posts.len());

        self.generate_listing_pages(&posts, events)?;
        self.generate_category_pages(&posts, events)?;
        self.generate_post_pages(&posts, events)?;

        Ok(())
    }

    /// Compute the listing view for one 1-based page index.
    pub fn listing(&self, posts: &[Post], current_page: usize) -> ListingView {
        let per_page = self.blog.config.per_page;
        let pages = paginate(posts, per_page);
        let items = pages
            .iter()
            .find(|p| p.index == current_page)
            .map(|p| p.items)
            .unwrap_or(&[]);

        ListingView {
            posts: items.iter().map(PostSummary::from_post).collect(),
            pages: page_range(pages.len()),
            current_page,
        }
    }

    /// Compute the category view: filtered, date-sorted, unpaginated.
    pub fn category_listing(&self, posts: &[Post], category: &str) -> ListingView {
        let filtered: Vec<PostSummary> = by_category(posts, category)
            .into_iter()
            .map(PostSummary::from_post)
            .collect();

        ListingView {
            posts: filtered,
            pages: Vec::new(),
            current_page: 1,
        }
    }

    /// Compute the detail view for a loaded record.
    ///
    /// A body that fails to render or map back is substituted with the
    /// localized "content unavailable" text; the metadata still renders.
    pub fn post_view(&self, post: &Post) -> PostView {
        let body = self
            .renderer
            .render(&post.raw)
            .map_err(|e| BlogError::MarkupParse(e.to_string()))
            .and_then(|html| markup::to_node_tree(&html))
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to render {}: {}", post.slug, e);
                RenderedNode::text(self.i18n.t("content_unavailable"))
            });

        PostView::Rendered {
            summary: PostSummary::from_post(post),
            body,
        }
    }

    /// Compute the detail view for a slug, loading it from the store.
    pub fn post_view_by_slug(&self, slug: &str) -> PostView {
        match self.store.load_one(slug) {
            Ok(post) => self.post_view(&post),
            Err(e) => {
                tracing::warn!("Failed to load post {:?}: {}", slug, e);
                PostView::Failed {
                    message: self.i18n.t("post_load_failed").to_string(),
                }
            }
        }
    }

    fn generate_listing_pages(&self, posts: &[Post], events: &RouteEvents) -> Result<()> {
        let pages = paginate(posts, self.blog.config.per_page);

        if pages.is_empty() {
            let view = self.listing(posts, 1);
            self.write_page("index.html", &self.listing_html(&view))?;
            events.emit(&url_for(&self.blog.config, "/"));
            return Ok(());
        }

        for page in &pages {
            let view = self.listing(posts, page.index);
            let (rel_path, route) = if page.index == 1 {
                ("index.html".to_string(), url_for(&self.blog.config, "/"))
            } else {
                let dir = format!("{}/{}", self.blog.config.pagination_dir, page.index);
                (
                    format!("{}/index.html", dir),
                    url_for(&self.blog.config, &format!("{}/", dir)),
                )
            };
            self.write_page(&rel_path, &self.listing_html(&view))?;
            events.emit(&route);
        }

        Ok(())
    }

    fn generate_category_pages(&self, posts: &[Post], events: &RouteEvents) -> Result<()> {
        for category in &self.blog.config.categories {
            let view = self.category_listing(posts, category);
            let dir = format!("{}/{}", self.blog.config.category_dir, category);
            self.write_page(&format!("{}/index.html", dir), &self.listing_html(&view))?;
            events.emit(&url_for(&self.blog.config, &format!("{}/", dir)));
        }
        Ok(())
    }

    fn generate_post_pages(&self, posts: &[Post], events: &RouteEvents) -> Result<()> {
        for post in posts {
            let view = self.post_view(post);
            let html = self.post_html(&view);
            self.write_page(&format!("posts/{}/index.html", post.slug), &html)?;
            events.emit(&url_for(&self.blog.config, &format!("posts/{}/", post.slug)));
        }
        Ok(())
    }

    /// Render a listing view as an HTML page
    fn listing_html(&self, view: &ListingView) -> String {
        let config = &self.blog.config;

        let mut body = String::new();
        if view.posts.is_empty() {
            body.push_str(&format!("<p>{}</p>", self.i18n.t("no_posts")));
        } else {
            body.push_str(r#"<div class="post-list">"#);
            for post in &view.posts {
                let image = post
                    .image
                    .as_deref()
                    .unwrap_or(config.fallback_image.as_str());
                let url = url_for(config, &format!("posts/{}/", post.slug));
                body.push_str(&format!(
                    r#"<article class="post-card"><a href="{}"><img src="{}" alt="{}" /><h2>{}</h2></a><time>{}</time>"#,
                    url, image, post.title, post.title, post.date
                ));
                if let Some(description) = &post.description {
                    body.push_str(&format!("<p>{}</p>", description));
                }
                body.push_str("</article>");
            }
            body.push_str("</div>");
        }

        body.push_str(&self.pagination_html(view));
        self.layout(&config.title, &body)
    }

    /// Render the pagination control, empty when there is a single page
    fn pagination_html(&self, view: &ListingView) -> String {
        if view.pages.len() <= 1 {
            return String::new();
        }

        let config = &self.blog.config;
        let mut html = r#"<nav class="pagination">"#.to_string();
        for &page in &view.pages {
            let url = if page == 1 {
                url_for(config, "/")
            } else {
                url_for(config, &format!("{}/{}/", config.pagination_dir, page))
            };
            if page == view.current_page {
                html.push_str(&format!(
                    r#"<span class="pagination-number current">{}</span>"#,
                    page
                ));
            } else {
                html.push_str(&format!(
                    r#"<a class="pagination-number" href="{}">{}</a>"#,
                    url, page
                ));
            }
        }
        html.push_str("</nav>");
        html
    }

    /// Render a post-detail view as an HTML page
    fn post_html(&self, view: &PostView) -> String {
        let config = &self.blog.config;

        match view {
            PostView::Failed { message } => self.layout(&config.title, &format!("<p>{}</p>", message)),
            PostView::Rendered { summary, body } => {
                let image = summary
                    .image
                    .as_deref()
                    .unwrap_or(config.fallback_image.as_str());

                let mut html = format!(
                    r#"<article class="post"><img src="{}" alt="{}" /><h1>{}</h1><time>{}</time>"#,
                    image, summary.title, summary.title, summary.date
                );

                html.push_str(r#"<div class="post-categories">"#);
                if summary.categories.is_empty() {
                    html.push_str(&format!("<span>{}</span>", self.i18n.t("no_categories")));
                } else {
                    for category in &summary.categories {
                        let url = url_for(config, &format!("{}/{}/", config.category_dir, category));
                        html.push_str(&format!(r#"<a href="{}">{}</a> "#, url, category));
                    }
                }
                html.push_str("</div>");

                html.push_str(&format!(
                    r#"<div class="post-body">{}</div></article>"#,
                    body.to_html()
                ));

                self.layout(&summary.title, &html)
            }
        }
    }

    fn layout(&self, title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"{}\"><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>\n",
            self.blog.config.language, title, body
        )
    }

    fn write_page(&self, rel_path: &str, html: &str) -> Result<()> {
        let path = self.blog.public_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }
}

/// Convenience used by tests and the `list` command: load and sort the
/// record set the way listing requests do.
pub fn load_sorted(store: &ContentStore) -> crate::error::Result<Vec<Post>> {
    let mut posts = store.load_all()?;
    sort_by_date_desc(&mut posts);
    Ok(posts)
}
