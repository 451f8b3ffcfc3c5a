//! Content store - loads post records from the posts directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post};
use crate::error::{BlogError, Result};
use crate::helpers::normalize_asset_path;

/// Read-only store over a flat directory of markdown files
pub struct ContentStore {
    posts_dir: PathBuf,
}

impl ContentStore {
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
        }
    }

    /// Load every record in the store, in file-name order.
    ///
    /// Fails with `ContentLoad` if the directory is unreadable or holds no
    /// markdown files, and with `InvalidRecord` if any record is missing a
    /// required key. A single bad record fails the whole pass; the request
    /// boundary turns that into an empty listing.
    pub fn load_all(&self) -> Result<Vec<Post>> {
        if !self.posts_dir.is_dir() {
            return Err(BlogError::ContentLoad {
                path: self.posts_dir.clone(),
                reason: "not a readable directory".to_string(),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.posts_dir)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && is_markdown_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        if files.is_empty() {
            return Err(BlogError::ContentLoad {
                path: self.posts_dir.clone(),
                reason: "no posts found".to_string(),
            });
        }

        // Deterministic enumeration order; the date sort applied by listing
        // requests breaks ties by this order.
        files.sort();

        let mut posts = Vec::with_capacity(files.len());
        for path in &files {
            posts.push(self.load_post(path)?);
        }

        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.posts_dir);
        Ok(posts)
    }

    /// Load a single record by slug.
    pub fn load_one(&self, slug: &str) -> Result<Post> {
        let path = self.posts_dir.join(format!("{}.md", slug));
        if !path.is_file() {
            return Err(BlogError::ContentNotFound(slug.to_string()));
        }
        self.load_post(&path)
    }

    fn load_post(&self, path: &Path) -> Result<Post> {
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        let title = fm.title.clone().ok_or(BlogError::InvalidRecord {
            slug: slug.clone(),
            missing: "title",
        })?;

        // An unparseable date is rejected the same way as an absent one
        let date = fm.parse_date().ok_or(BlogError::InvalidRecord {
            slug: slug.clone(),
            missing: "date",
        })?;

        let image = fm.image.as_deref().map(normalize_asset_path);

        Ok(Post {
            slug,
            title,
            date,
            description: fm.description,
            image,
            categories: fm.categories,
            raw: body.to_string(),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_all_sorted_by_filename() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(
            tmp.path(),
            "b-second.md",
            "---\ntitle: Second\ndate: 2024-02-01\n---\nbody",
        );
        write_post(
            tmp.path(),
            "a-first.md",
            "---\ntitle: First\ndate: 2024-01-01\n---\nbody",
        );

        let store = ContentStore::new(tmp.path());
        let posts = store.load_all().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "a-first");
        assert_eq!(posts[1].slug, "b-second");
    }

    #[test]
    fn test_load_all_empty_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ContentStore::new(tmp.path());
        assert!(matches!(
            store.load_all(),
            Err(BlogError::ContentLoad { .. })
        ));
    }

    #[test]
    fn test_load_all_missing_dir_fails() {
        let store = ContentStore::new("/nonexistent/posts");
        assert!(matches!(
            store.load_all(),
            Err(BlogError::ContentLoad { .. })
        ));
    }

    #[test]
    fn test_missing_title_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "bad.md", "---\ndate: 2024-01-01\n---\nbody");

        let store = ContentStore::new(tmp.path());
        let err = store.load_one("bad").unwrap_err();
        assert!(matches!(
            err,
            BlogError::InvalidRecord {
                missing: "title",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_date_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(tmp.path(), "bad.md", "---\ntitle: t\n---\nbody");

        let store = ContentStore::new(tmp.path());
        let err = store.load_one("bad").unwrap_err();
        assert!(matches!(
            err,
            BlogError::InvalidRecord { missing: "date", .. }
        ));
    }

    #[test]
    fn test_load_one_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ContentStore::new(tmp.path());
        assert!(matches!(
            store.load_one("nope"),
            Err(BlogError::ContentNotFound(_))
        ));
    }

    #[test]
    fn test_image_normalized_on_load() {
        let tmp = tempfile::tempdir().unwrap();
        write_post(
            tmp.path(),
            "img.md",
            "---\ntitle: t\ndate: 2024-01-01\nimage: images/cover.png\n---\nbody",
        );

        let store = ContentStore::new(tmp.path());
        let post = store.load_one("img").unwrap();
        assert_eq!(post.image.as_deref(), Some("/images/cover.png"));
    }
}
