// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pure string validators used by the rule catalog.
//!
//! Every pattern the rules rely on lives here so the accepted boundaries can
//! be read and tested in one place. None of these functions look at the DOM.

use regex::Regex;
use std::sync::LazyLock;

/// Schemes whose target is a phone number.
pub const PHONE_SCHEMES: &[&str] = &["tel:", "fax:", "modem:"];

/// Minimum number of digits a dialable number must have.
pub const MIN_PHONE_DIGITS: usize = 7;

/// File extensions that mark alt text as a file name.
const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".bmp", ".tif", ".tiff", ".avif", ".ico",
];

/// Languages written right-to-left (primary subtags).
const RTL_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "iw", "khw", "ks", "ku", "nqo", "ps", "prs", "sd",
    "syr", "ug", "ur", "yi", "ji",
];

/// Right-to-left script subtags.
const RTL_SCRIPTS: &[&str] = &["arab", "hebr", "thaa", "syrc", "nkoo", "adlm", "rohg", "mand"];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
    )
    .expect("valid regex")
});

static DISABLED_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:^|[-_])disabled$").expect("valid regex"));

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^on[a-z]{3,}$").expect("valid regex"));

/// `http://` URL (after trimming, case-insensitive).
///
/// Relative, protocol-relative (`//host`), `https:`, `mailto:` and `tel:`
/// values are never insecure.
pub fn is_insecure_url(value: &str) -> bool {
    strip_scheme(value, "http://").is_some()
}

/// Value with no usable image address: empty, whitespace, `#` or `/`.
pub fn is_meaningless_src(value: &str) -> bool {
    matches!(value.trim(), "" | "#" | "/")
}

/// Strip a case-insensitive `scheme` prefix.
pub fn strip_scheme<'a>(value: &'a str, scheme: &str) -> Option<&'a str> {
    let value = value.trim();
    match value.get(..scheme.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(scheme) => Some(&value[scheme.len()..]),
        _ => None,
    }
}

/// The number part of a `tel:`/`fax:`/`modem:` URI, or `None` for other schemes.
pub fn phone_number_from_uri(href: &str) -> Option<&str> {
    PHONE_SCHEMES
        .iter()
        .find_map(|scheme| strip_scheme(href, scheme))
}

/// Validate a phone number taken from a phone URI.
///
/// RFC 3966 parameters (`;ext=`, `;isub=`, ...) are dropped, visual
/// separators (space, `%20`, `-`, `.`, `(`, `)`) and a leading `+` are
/// ignored. Letters are rejected outright; at least
/// [`MIN_PHONE_DIGITS`] digits must remain.
pub fn is_valid_phone_number(number: &str) -> bool {
    let number = number.split(';').next().unwrap_or("").trim();
    let number = number.replace("%20", "");
    let number = number.strip_prefix('+').unwrap_or(&number);

    let mut digits = 0;
    for c in number.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return false,
        }
    }
    digits >= MIN_PHONE_DIGITS
}

/// Addresses listed in a `mailto:` URI, or `None` for other schemes.
///
/// Header fields after `?` are dropped and the comma-separated list is
/// trimmed entry by entry.
pub fn mailto_addresses(href: &str) -> Option<Vec<&str>> {
    let rest = strip_scheme(href, "mailto:")?;
    let list = rest.split('?').next().unwrap_or("");
    Some(list.split(',').map(str::trim).collect())
}

/// Basic `user@domain.tld` shape.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL.is_match(address.trim())
}

/// CSS identifier token usable as a selector without escaping.
///
/// Rejects tokens starting with a digit, `--` or `-` followed by a digit.
pub fn is_valid_css_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), _) if c.is_ascii_digit() => false,
        (Some('-'), Some('-')) => false,
        (Some('-'), Some(c)) if c.is_ascii_digit() => false,
        _ => true,
    }
}

/// Alt text that is really a file name (`hero-banner.jpg`).
pub fn looks_like_filename(alt: &str) -> bool {
    let alt = alt.trim().to_lowercase();
    alt.contains('.') && IMAGE_EXTENSIONS.iter().any(|ext| alt.ends_with(ext) && alt.len() > ext.len())
}

/// Class token that presents an element as disabled (`disabled`, `btn-disabled`, `is_disabled`).
pub fn is_disabled_class(token: &str) -> bool {
    DISABLED_CLASS.is_match(token)
}

/// Inline event handler attribute name (`onclick`, `onmouseover`, ...).
pub fn is_event_handler_attribute(name: &str) -> bool {
    EVENT_HANDLER.is_match(&name.to_ascii_lowercase())
}

/// Primary language subtag, lowercased (`en` for `en-GB`).
pub fn primary_language(lang: &str) -> String {
    lang.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Whether a language tag denotes right-to-left text.
pub fn is_rtl_language(lang: &str) -> bool {
    let lower = lang.trim().to_ascii_lowercase();
    let mut subtags = lower.split(['-', '_']);
    let primary = subtags.next().unwrap_or("");
    if RTL_LANGUAGES.contains(&primary) {
        return true;
    }
    subtags.any(|s| RTL_SCRIPTS.contains(&s))
}

/// Split a viewport `content` value into lowercased `(key, value)` pairs.
pub fn parse_viewport(content: &str) -> Vec<(String, String)> {
    content
        .split([',', ';'])
        .filter_map(|part| {
            let mut kv = part.splitn(2, '=');
            let key = kv.next()?.trim().to_ascii_lowercase();
            if key.is_empty() {
                return None;
            }
            let value = kv.next().unwrap_or("").trim().to_ascii_lowercase();
            Some((key, value))
        })
        .collect()
}

/// Whitespace-separated tokens of a class list.
pub fn class_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_ascii_whitespace()
}
