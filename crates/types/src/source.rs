//! The three lists a user can browse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies which Discogs list is being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    #[default]
    Collection,
    Wishlist,
    Orders,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Wishlist => write!(f, "wishlist"),
            Self::Orders => write!(f, "orders"),
        }
    }
}

impl DataSource {
    /// Returns all sources in menu order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Collection, Self::Wishlist, Self::Orders]
    }

    /// Position in the menu (also the numeric shortcut).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Collection => 0,
            Self::Wishlist => 1,
            Self::Orders => 2,
        }
    }

    /// Inverse of [`DataSource::index`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Maps the `0` / `1` / `2` shortcuts to a source.
    #[must_use]
    pub fn from_shortcut(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_index(d as usize))
    }

    /// Menu title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::Wishlist => "Wish list",
            Self::Orders => "Orders",
        }
    }

    /// Menu subtitle.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Collection => "Display the releases in your Collection",
            Self::Wishlist => "Display the releases in your Wish list",
            Self::Orders => "Check the status of your Orders",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts() {
        assert_eq!(DataSource::from_shortcut('0'), Some(DataSource::Collection));
        assert_eq!(DataSource::from_shortcut('1'), Some(DataSource::Wishlist));
        assert_eq!(DataSource::from_shortcut('2'), Some(DataSource::Orders));
        assert_eq!(DataSource::from_shortcut('3'), None);
        assert_eq!(DataSource::from_shortcut('q'), None);
    }

    #[test]
    fn test_index_roundtrip() {
        for s in DataSource::all() {
            assert_eq!(DataSource::from_index(s.index()), Some(*s));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DataSource::Wishlist.to_string(), "wishlist");
    }
}
