//! Category filter for product listings.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Which products a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products whose category matches exactly.
    Category(String),
}

impl CategoryFilter {
    /// Filter on one category.
    pub fn category(name: impl Into<String>) -> Self {
        CategoryFilter::Category(name.into())
    }

    /// Check whether a product passes the filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => product.category == *name,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    /// `"all"` selects everything; anything else names a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Category(name) => write!(f, "{}", name),
        }
    }
}
