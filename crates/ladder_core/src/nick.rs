//! The pure nickname formatter.
//!
//! Substitutes `$name` / `${name}` placeholders into a user-supplied format
//! string. The fact derivation mirrors what users see in the directory: the
//! primary account leads, a `*` marks multi-account users, and stale values
//! are shown with a `?` when the directory currently has no entry.

use crate::{RatingSample, Rank, User};
use ladder_error::{FormatError, FormatErrorKind};

/// Display-name length limit imposed by the chat service.
pub const MAX_NICKNAME_LEN: usize = 32;

/// Role symbol for damage players.
pub const SYMBOL_DPS: &str = "\u{2694}";
/// Role symbol for tank players.
pub const SYMBOL_TANK: &str = "\u{1F6E1}";
/// Role symbol for support players.
pub const SYMBOL_SUPPORT: &str = "\u{271A}";
/// Role symbol for flex players.
pub const SYMBOL_FLEX: &str = "\u{1F504}";

/// Placeholder values derived from a user's accounts.
///
/// # Examples
///
/// ```
/// use ladder_core::{RatingFacts, render_nickname};
///
/// let facts = RatingFacts::default();
/// assert_eq!(render_nickname(&facts, "$sr").unwrap(), "noSR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingFacts {
    /// Primary rating, `"noSR"`, or a stale `"2730?"` fallback
    pub sr: String,
    /// Primary rank name or `"Unranked"`
    pub rank: String,
    /// Lowest rating across all accounts
    pub lowest_sr: String,
    /// Highest rating across all accounts
    pub highest_sr: String,
    /// `"lowest–highest"` rating range
    pub sr_range: String,
    /// `"lowest–highest"` rank range
    pub rank_range: String,
    /// Secondary account rating or `"noSR"`
    pub secondary_sr: String,
    /// Secondary account rank or `"Unranked"`
    pub secondary_rank: String,
}

impl Default for RatingFacts {
    fn default() -> Self {
        Self {
            sr: "noSR".to_string(),
            rank: "Unranked".to_string(),
            lowest_sr: "noSR".to_string(),
            highest_sr: "noSR".to_string(),
            sr_range: "noSR–noSR".to_string(),
            rank_range: "Unranked–Unranked".to_string(),
            secondary_sr: "noSR".to_string(),
            secondary_rank: "Unranked".to_string(),
        }
    }
}

impl RatingFacts {
    /// Derive the placeholder values for a user.
    ///
    /// `recent_primary` is the primary account's most recent samples, newest
    /// first; when the primary currently has no rating, the newest sample
    /// among the first ten that still carries a value supplies the
    /// `"<value>?"` fallback.
    pub fn for_user(user: &User, recent_primary: &[RatingSample]) -> Self {
        let mut facts = Self::default();
        let Some(primary) = user.primary() else {
            return facts;
        };

        if let Some(rank) = primary.rank {
            facts.rank = rank.to_string();
        }
        match primary.rating {
            Some(sr) => facts.sr = sr.to_string(),
            None => {
                // The directory may be flaky; fall back to the last known
                // value but mark it as possibly stale.
                if let Some(stale) = recent_primary
                    .iter()
                    .take(10)
                    .find_map(|s| s.value.map(|v| (v, Rank::for_rating(v))))
                {
                    facts.sr = format!("{}?", stale.0);
                    facts.rank = format!("{}?", stale.1);
                }
            }
        }

        if let Some(secondary) = user.secondary() {
            facts.sr.push('*');
            facts.rank.push('*');
            if let Some(sr) = secondary.rating {
                facts.secondary_sr = sr.to_string();
                if let Some(rank) = secondary.rank {
                    facts.secondary_rank = rank.to_string();
                }
            }
        }

        let mut ratings: Vec<i32> = user.accounts.iter().filter_map(|a| a.rating).collect();
        ratings.sort_unstable();
        if let (Some(&lowest), Some(&highest)) = (ratings.first(), ratings.last()) {
            facts.lowest_sr = lowest.to_string();
            facts.highest_sr = highest.to_string();
            facts.sr_range = format!("{lowest}\u{2013}{highest}");
            facts.rank_range = format!(
                "{}\u{2013}{}",
                Rank::for_rating(lowest),
                Rank::for_rating(highest)
            );
        }

        facts
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        let value = match name {
            "sr" => &self.sr,
            "rank" => &self.rank,
            "lowest_sr" => &self.lowest_sr,
            "highest_sr" => &self.highest_sr,
            "sr_range" => &self.sr_range,
            "rank_range" => &self.rank_range,
            "secondary_sr" => &self.secondary_sr,
            "secondary_rank" => &self.secondary_rank,
            "dps" => return Some(SYMBOL_DPS),
            "tank" => return Some(SYMBOL_TANK),
            "support" => return Some(SYMBOL_SUPPORT),
            "flex" => return Some(SYMBOL_FLEX),
            _ => return None,
        };
        Some(value)
    }
}

/// Render a nickname format string against derived rating facts.
///
/// Placeholders are written `$name` or `${name}`; `$$` yields a literal `$`.
/// An undefined placeholder fails with
/// [`FormatErrorKind::UnknownPlaceholder`]. The 32-character display limit is
/// the caller's concern, not this function's.
///
/// # Examples
///
/// ```
/// use ladder_core::{RatingFacts, render_nickname};
///
/// let facts = RatingFacts {
///     sr: "2730".to_string(),
///     rank: "Platinum".to_string(),
///     ..RatingFacts::default()
/// };
/// assert_eq!(render_nickname(&facts, "$sr ($rank)").unwrap(), "2730 (Platinum)");
/// assert!(render_nickname(&facts, "$srr").is_err());
/// ```
pub fn render_nickname(facts: &RatingFacts, format: &str) -> Result<String, FormatError> {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(FormatError::new(FormatErrorKind::MalformedPlaceholder));
                        }
                    }
                }
                out.push_str(substitute(facts, &name)?);
            }
            Some(c) if c.is_ascii_alphabetic() || *c == '_' => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                out.push_str(substitute(facts, &name)?);
            }
            _ => return Err(FormatError::new(FormatErrorKind::MalformedPlaceholder)),
        }
    }

    Ok(out)
}

fn substitute<'a>(facts: &'a RatingFacts, name: &str) -> Result<&'a str, FormatError> {
    facts
        .lookup(name)
        .ok_or_else(|| FormatError::new(FormatErrorKind::UnknownPlaceholder(name.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Account, AccountId, SampleId, UserId};
    use chrono::Utc;

    fn account(id: i64, position: u32, rating: Option<i32>) -> Account {
        Account {
            id: AccountId(id),
            user_id: UserId(1),
            tag: format!("Player#{id}"),
            external_id: format!("{id}"),
            position,
            rating,
            rank: rating.map(Rank::for_rating),
            error_count: 0,
            last_update: Utc::now(),
        }
    }

    fn user(accounts: Vec<Account>) -> User {
        User {
            id: UserId(1),
            accounts,
            highest_rank: None,
            always_show_rating: false,
            format: "$sr".to_string(),
            last_nickname_warning: None,
        }
    }

    #[test]
    fn test_single_account_facts() {
        let facts = RatingFacts::for_user(&user(vec![account(1, 0, Some(2730))]), &[]);
        assert_eq!(facts.sr, "2730");
        assert_eq!(facts.rank, "Platinum");
        assert_eq!(facts.sr_range, "2730\u{2013}2730");
        assert_eq!(facts.secondary_sr, "noSR");
    }

    #[test]
    fn test_multi_account_star_marker_and_range() {
        let facts = RatingFacts::for_user(
            &user(vec![account(1, 0, Some(3100)), account(2, 1, Some(1800))]),
            &[],
        );
        assert_eq!(facts.sr, "3100*");
        assert_eq!(facts.rank, "Diamond*");
        assert_eq!(facts.secondary_sr, "1800");
        assert_eq!(facts.secondary_rank, "Silver");
        assert_eq!(facts.sr_range, "1800\u{2013}3100");
        assert_eq!(facts.rank_range, "Silver\u{2013}Diamond");
    }

    #[test]
    fn test_stale_fallback_from_history() {
        let samples = vec![
            RatingSample::new(SampleId(3), AccountId(1), Utc::now(), None),
            RatingSample::new(SampleId(2), AccountId(1), Utc::now(), Some(2450)),
        ];
        let facts = RatingFacts::for_user(&user(vec![account(1, 0, None)]), &samples);
        assert_eq!(facts.sr, "2450?");
        assert_eq!(facts.rank, "Gold?");
    }

    #[test]
    fn test_no_accounts_renders_unranked() {
        let facts = RatingFacts::for_user(&user(vec![]), &[]);
        assert_eq!(render_nickname(&facts, "$sr $rank").unwrap(), "noSR Unranked");
    }

    #[test]
    fn test_braced_placeholder_and_escape() {
        let facts = RatingFacts {
            sr: "2730".to_string(),
            ..RatingFacts::default()
        };
        assert_eq!(render_nickname(&facts, "${sr}SR").unwrap(), "2730SR");
        assert_eq!(render_nickname(&facts, "$$sr").unwrap(), "$sr");
    }

    #[test]
    fn test_role_symbols() {
        let facts = RatingFacts::default();
        assert_eq!(render_nickname(&facts, "$tank").unwrap(), SYMBOL_TANK);
        assert_eq!(render_nickname(&facts, "$dps").unwrap(), SYMBOL_DPS);
    }

    #[test]
    fn test_unknown_placeholder_is_an_error() {
        let facts = RatingFacts::default();
        let err = render_nickname(&facts, "$bogus").unwrap_err();
        assert_eq!(
            err.kind,
            FormatErrorKind::UnknownPlaceholder("bogus".to_string())
        );
    }

    #[test]
    fn test_malformed_placeholder_is_an_error() {
        let facts = RatingFacts::default();
        assert!(render_nickname(&facts, "${sr").is_err());
        assert!(render_nickname(&facts, "100$ bill").is_err());
    }
}
