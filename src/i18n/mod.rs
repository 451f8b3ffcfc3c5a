//! Localized user-facing strings

use std::collections::HashMap;

/// Translation table keyed by the configured site language.
///
/// `ja` and `en` are built in; unknown languages fall back to `en`, unknown
/// keys fall back to the key itself so a missing translation never breaks a
/// build.
pub struct I18n {
    language: String,
    translations: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18n {
    pub fn new(language: &str) -> Self {
        let mut translations = HashMap::new();

        let mut ja = HashMap::new();
        ja.insert("no_posts", "投稿がありません。");
        ja.insert("post_load_failed", "記事の読み込みに失敗しました。");
        ja.insert("content_unavailable", "記事を読み込めませんでした。");
        ja.insert("no_categories", "カテゴリーがありません");
        translations.insert("ja", ja);

        let mut en = HashMap::new();
        en.insert("no_posts", "No posts yet.");
        en.insert("post_load_failed", "Failed to load the post.");
        en.insert("content_unavailable", "The post could not be rendered.");
        en.insert("no_categories", "No categories");
        translations.insert("en", en);

        Self {
            language: language.to_string(),
            translations,
        }
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translate a message key
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations
            .get(self.language.as_str())
            .and_then(|table| table.get(key))
            .or_else(|| self.translations.get("en").and_then(|table| table.get(key)))
            .copied()
            .unwrap_or(key)
    }
}
