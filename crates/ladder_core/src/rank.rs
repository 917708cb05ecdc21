//! Rank buckets derived from skill ratings.

use serde::{Deserialize, Serialize};

/// A discretized skill bucket.
///
/// Ranks are derived from ratings through a fixed monotonic cutoff table and
/// are ordered from lowest to highest, so `>` compares bucket quality.
///
/// # Examples
///
/// ```
/// use ladder_core::Rank;
///
/// assert_eq!(Rank::for_rating(1499), Rank::Bronze);
/// assert_eq!(Rank::for_rating(1500), Rank::Silver);
/// assert_eq!(Rank::for_rating(4100), Rank::Grandmaster);
/// assert!(Rank::Diamond > Rank::Gold);
/// assert_eq!(format!("{}", Rank::Grandmaster), "Grand Master");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Rank {
    /// Below 1500
    Bronze,
    /// 1500 to 1999
    Silver,
    /// 2000 to 2499
    Gold,
    /// 2500 to 2999
    Platinum,
    /// 3000 to 3499
    Diamond,
    /// 3500 to 3999
    Master,
    /// 4000 and above
    #[display("Grand Master")]
    Grandmaster,
}

impl Rank {
    /// Derive the rank bucket for a rating.
    pub fn for_rating(rating: i32) -> Self {
        match rating {
            i32::MIN..1500 => Rank::Bronze,
            1500..2000 => Rank::Silver,
            2000..2500 => Rank::Gold,
            2500..3000 => Rank::Platinum,
            3000..3500 => Rank::Diamond,
            3500..4000 => Rank::Master,
            _ => Rank::Grandmaster,
        }
    }
}
