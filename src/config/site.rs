//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,
    pub category_dir: String,

    // Listings
    pub per_page: usize,
    pub pagination_dir: String,

    /// Categories with a dedicated listing page. This deployment renders a
    /// fixed, statically enumerable set rather than discovering categories
    /// from the posts.
    pub categories: Vec<String>,

    // Assets
    pub fallback_image: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "kiji".to_string(),
            description: String::new(),
            author: String::new(),
            language: "ja".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),
            category_dir: "categories".to_string(),

            per_page: 4,
            pagination_dir: "page".to_string(),

            categories: vec!["記事一覧".to_string()],

            fallback_image: "/default-image.JPG".to_string(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;

        // A listing page must hold at least one record
        if config.per_page == 0 {
            tracing::warn!("per_page must be at least 1, using the default");
            config.per_page = SiteConfig::default().per_page;
        }

        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub line_number: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            line_number: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
