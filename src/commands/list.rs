//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::ContentStore;
use crate::generator::load_sorted;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let store = ContentStore::new(&blog.posts_dir);

    match content_type {
        "post" | "posts" => {
            let posts = load_sorted(&store)?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                );
            }
        }
        "category" | "categories" => {
            let posts = load_sorted(&store)?;
            let mut categories: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for cat in &post.categories {
                    *categories.entry(cat.clone()).or_insert(0) += 1;
                }
            }
            println!("Categories ({}):", categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}
