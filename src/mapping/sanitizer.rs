//! Rich-text sanitizing for marketing copy

use once_cell::sync::Lazy;
use regex::Regex;

/// Turns untrusted markup into safe markup
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, raw_markup: &str) -> String;
}

/// Inline and list tags that survive sanitizing
pub const ALLOWED_TAGS: [&str; 9] = ["p", "br", "strong", "em", "b", "i", "ul", "ol", "li"];

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<\s*(/?)\s*([a-zA-Z][a-zA-Z0-9]*)[^>]*?(/?)\s*>").expect("valid tag pattern")
});
static DANGEROUS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<\s*(script|style|iframe|object)\b.*?<\s*/\s*(script|style|iframe|object)\s*>")
        .expect("valid block pattern")
});
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment pattern"));

/// Keeps whitelisted tags without attributes and drops everything else
#[derive(Debug, Clone, Default)]
pub struct TagWhitelistSanitizer;

impl TagWhitelistSanitizer {
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for TagWhitelistSanitizer {
    fn sanitize(&self, raw_markup: &str) -> String {
        let without_blocks = DANGEROUS_BLOCK.replace_all(raw_markup, "");
        let without_comments = COMMENT.replace_all(&without_blocks, "");
        let cleaned = TAG.replace_all(&without_comments, |caps: &regex::Captures| {
            let closing = &caps[1];
            let name = caps[2].to_lowercase();
            if !ALLOWED_TAGS.contains(&name.as_str()) {
                return String::new();
            }
            if name == "br" {
                "<br />".to_string()
            } else {
                format!("<{}{}>", closing, name)
            }
        });
        cleaned.trim().to_string()
    }
}
