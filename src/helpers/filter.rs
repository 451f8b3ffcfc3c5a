//! Category filtering and listing order

use crate::content::Post;

/// Select posts belonging to `category`, preserving input order.
/// Matching is exact string equality, no normalization.
pub fn by_category<'a>(posts: &'a [Post], category: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.has_category(category)).collect()
}

/// Order posts by date descending (newest first).
///
/// The sort is stable, so records sharing a date keep their original
/// enumeration order and pagination stays deterministic.
pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn post(slug: &str, date: (i32, u32, u32), categories: &[&str]) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            date: Local.with_ymd_and_hms(date.0, date.1, date.2, 0, 0, 0).unwrap(),
            description: None,
            image: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            raw: String::new(),
        }
    }

    #[test]
    fn test_by_category_preserves_order() {
        let posts = vec![
            post("a", (2024, 1, 1), &["記事一覧"]),
            post("b", (2024, 1, 2), &["other"]),
            post("c", (2024, 1, 3), &["記事一覧", "other"]),
        ];
        let filtered = by_category(&posts, "記事一覧");
        let slugs: Vec<&str> = filtered.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);
    }

    #[test]
    fn test_by_category_absent_category() {
        let posts = vec![post("a", (2024, 1, 1), &["x"]), post("b", (2024, 1, 2), &[])];
        assert!(by_category(&posts, "missing").is_empty());
    }

    #[test]
    fn test_by_category_no_normalization() {
        let posts = vec![post("a", (2024, 1, 1), &["Blog"])];
        assert!(by_category(&posts, "blog").is_empty());
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut posts = vec![
            post("old", (2023, 5, 1), &[]),
            post("new", (2024, 6, 1), &[]),
            post("mid", (2024, 1, 1), &[]),
        ];
        sort_by_date_desc(&mut posts);
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_stable_under_equal_dates_and_idempotent() {
        let mut posts = vec![
            post("a", (2024, 1, 1), &[]),
            post("b", (2024, 1, 1), &[]),
            post("c", (2024, 1, 1), &[]),
        ];
        sort_by_date_desc(&mut posts);
        let first: Vec<String> = posts.iter().map(|p| p.slug.clone()).collect();
        assert_eq!(first, vec!["a", "b", "c"]);

        // Sorting an already-sorted sequence yields the same sequence
        sort_by_date_desc(&mut posts);
        let second: Vec<String> = posts.iter().map(|p| p.slug.clone()).collect();
        assert_eq!(first, second);
    }
}
