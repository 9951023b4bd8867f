//! Title patterns used by the wiki heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

/// `Talk:`, `User talk:`, `Wikipedia_talk:` and friends. `_` is a word
/// character, so it needs its own alternative next to `\b`.
static TALK_NAMESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:\b|_)talk:").expect("valid talk pattern"));

/// Language-code subpage such as `/de`, `/pt-br`, `/zh-hans`.
static LANGUAGE_SUBPAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/[a-z]{2,3}(?:-[a-z0-9]{2,8})?$").expect("valid language pattern")
});

/// Documentation subpages, including the `qqq` message-documentation code.
static DOCUMENTATION_SUBPAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/(?:doc|documentation|qqq)$").expect("valid documentation pattern")
});

static CODE_NAMESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:template|module|mediawiki):").expect("valid code namespace pattern")
});

static CODE_PAGE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(?:css|js|json)$").expect("valid code suffix pattern"));

pub fn is_talk_page(title: &str) -> bool {
    TALK_NAMESPACE.is_match(title)
}

pub fn is_language_subpage(title: &str) -> bool {
    LANGUAGE_SUBPAGE.is_match(title.trim_end())
}

pub fn is_documentation_subpage(title: &str) -> bool {
    DOCUMENTATION_SUBPAGE.is_match(title.trim_end())
}

pub fn is_code_page(title: &str) -> bool {
    let title = title.trim();
    CODE_NAMESPACE.is_match(title) || CODE_PAGE_SUFFIX.is_match(title)
}
