use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic kind of a contribution, independent of where it happened.
///
/// Derived by the classifier on every run; never stored in record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WikiEdit,
    Code,
    Discussion,
    MapEdit,
    Translation,
    Uncategorized,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::WikiEdit,
        Category::Code,
        Category::Discussion,
        Category::MapEdit,
        Category::Translation,
        Category::Uncategorized,
    ];

    /// Key used for filter inputs and `data-category` attributes.
    pub fn key(self) -> &'static str {
        match self {
            Self::WikiEdit => "wiki",
            Self::Code => "code",
            Self::Discussion => "talk",
            Self::MapEdit => "map",
            Self::Translation => "i18n",
            Self::Uncategorized => "other",
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            Self::WikiEdit => "Wiki edits",
            Self::Code => "Code",
            Self::Discussion => "Discussion",
            Self::MapEdit => "Map edits",
            Self::Translation => "Translation",
            Self::Uncategorized => "Uncategorized",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique_and_reversible() {
        for category in Category::ALL {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("commit"), None);
    }
}
