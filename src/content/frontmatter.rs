//! Front-matter parsing

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post.
///
/// `title` and `date` are required for a record to be accepted, but they are
/// optional here so that the store can report precisely which key is missing
/// instead of failing inside deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    /// Cover image path, normalized to a single leading slash on load
    pub image: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub categories: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content).
    pub fn parse(content: &str) -> (Self, &str) {
        let content = content.trim_start();

        let Some(rest) = content.strip_prefix("---") else {
            return (FrontMatter::default(), content);
        };
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing delimiter, treat as no front-matter
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!("Failed to parse front-matter, treating as content: {}", e);
                (FrontMatter::default(), content)
            }
        }
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        // Dates without an offset are wall-clock times in the local zone
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
        if let Ok(d) = chrono::NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    // Try RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
description: A first post
image: /images/hello.png
categories:
  - 記事一覧
  - rust
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.description, Some("A first post".to_string()));
        assert_eq!(fm.categories, vec!["記事一覧", "rust"]);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_single_string_categories() {
        let content = "---\ntitle: t\ndate: 2024-01-15\ncategories: Blog\n---\n\nBody.\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.categories, vec!["Blog"]);
    }

    #[test]
    fn test_missing_frontmatter_returns_default() {
        let (fm, remaining) = FrontMatter::parse("Just a body with no block.\n");
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Just a body"));
    }

    #[test]
    fn test_unclosed_block_treated_as_content() {
        let content = "---\ntitle: t\nno closing delimiter here";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert!(remaining.starts_with("---"));
    }

    #[test]
    fn test_parse_date_formats() {
        for s in ["2024-01-15", "2024/01/15", "2024-01-15 10:30:00", "2024-01-15T10:30:00"] {
            let fm = FrontMatter {
                date: Some(s.to_string()),
                ..Default::default()
            };
            let dt = fm.parse_date().unwrap();
            assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
        }
    }

    #[test]
    fn test_late_evening_date_keeps_local_day() {
        // A wall-clock time must not shift across midnight when the local
        // offset is applied
        let fm = FrontMatter {
            date: Some("2024-01-15 23:00:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 23:00");
    }

    #[test]
    fn test_unparseable_date() {
        let fm = FrontMatter {
            date: Some("not a date".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_none());
    }
}
