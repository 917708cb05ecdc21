//! Nickname rating-tag application.

use ladder_core::MAX_NICKNAME_LEN;
use ladder_error::{FormatError, FormatErrorKind};
use regex::{NoExpand, Regex};
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").expect("valid regex"));

/// Merge a rendered rating tag into a member's current display name.
///
/// When `show` is set, an existing `[...]` tag is replaced in place,
/// otherwise the tag is appended; when `show` is unset, any existing tag is
/// stripped. Fails with [`FormatErrorKind::NicknameTooLong`] when the result
/// exceeds the 32-character display limit.
///
/// # Examples
///
/// ```
/// use ladder_sync::apply_rating_tag;
///
/// assert_eq!(apply_rating_tag("Jo", "2730", true).unwrap(), "Jo [2730]");
/// assert_eq!(apply_rating_tag("Jo [1200]", "2730", true).unwrap(), "Jo [2730]");
/// assert_eq!(apply_rating_tag("Jo [1200]", "2730", false).unwrap(), "Jo ");
/// ```
pub fn apply_rating_tag(current: &str, formatted: &str, show: bool) -> Result<String, FormatError> {
    let new_nick = if show {
        let tag = format!("[{formatted}]");
        if TAG_RE.is_match(current) {
            TAG_RE.replace(current, NoExpand(&tag)).into_owned()
        } else {
            format!("{current} {tag}")
        }
    } else if TAG_RE.is_match(current) {
        TAG_RE.replace(current, "").into_owned()
    } else {
        current.to_string()
    };

    if new_nick.chars().count() > MAX_NICKNAME_LEN {
        return Err(FormatError::new(FormatErrorKind::NicknameTooLong(new_nick)));
    }
    Ok(new_nick)
}
