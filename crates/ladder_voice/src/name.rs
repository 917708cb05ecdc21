//! The managed channel-name grammar.
//!
//! Managed voice channels are named `"<prefix> #<n>"` with an optional
//! trailing rating suffix like `" [1800–2400]"`. The suffix is never part of
//! the identity; prefix and index are parsed from the stripped base name.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \[.*?\]$").expect("valid regex"));

/// Strip the trailing rating suffix from a channel name, if present.
pub fn base_name(name: &str) -> Cow<'_, str> {
    SUFFIX_RE.replace(name, "")
}

/// Parse a channel name into its managed `(prefix, index)` parts.
///
/// Returns `None` when the name does not follow the managed grammar.
///
/// # Examples
///
/// ```
/// use ladder_voice::split_managed;
///
/// assert_eq!(split_managed("Comp #2 [1800–2400]"), Some(("Comp".to_string(), 2)));
/// assert_eq!(split_managed("General"), None);
/// ```
pub fn split_managed(name: &str) -> Option<(String, u32)> {
    let base = base_name(name);
    let (head, tail) = base.rsplit_once('#')?;
    let index: u32 = tail.trim().parse().ok()?;
    let prefix = head.trim_end();
    if prefix.is_empty() {
        return None;
    }
    Some((prefix.to_string(), index))
}

/// The canonical name for the `index`-th channel of a prefix (1-based).
pub fn channel_name(prefix: &str, index: usize) -> String {
    format!("{prefix} #{index}")
}

/// The rating suffix for a channel's currently-present members.
pub fn rating_suffix(min: i32, max: i32) -> String {
    if min == max {
        format!(" [~{min}]")
    } else {
        format!(" [{min}\u{2013}{max}]")
    }
}
