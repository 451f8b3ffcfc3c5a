//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the site root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Normalize an asset path to exactly one leading slash.
///
/// `//a/b.png` collapses to `/a/b.png`, `a/b.png` gains a slash and
/// `/a/b.png` is left unchanged.
pub fn normalize_asset_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}
