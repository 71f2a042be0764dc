//! The filter shared by the expense listing, the summary and their pages.

use serde::{Deserialize, Serialize};
use time::Date;

/// Optional constraints that narrow down which expenses a query considers.
///
/// A field set to `None` places no constraint on that dimension.
/// Both date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    /// Only include expenses with exactly this category (case-sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Only include expenses on or after this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// Only include expenses on or before this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
}

impl ExpenseFilter {
    /// The category to match, treating an empty string the same as no category.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
    }

    /// Whether any constraint is set.
    pub fn is_active(&self) -> bool {
        self.category().is_some() || self.start_date.is_some() || self.end_date.is_some()
    }

    /// Encode the filter as a URL query string, e.g. `category=Food&start_date=2025-10-01`.
    ///
    /// Returns an empty string when no constraint is set.
    pub fn to_query_string(&self) -> String {
        let normalized = ExpenseFilter {
            category: self.category().map(str::to_owned),
            ..self.clone()
        };

        serde_urlencoded::to_string(&normalized)
            .inspect_err(|error| tracing::error!("could not encode filter {self:?}: {error}"))
            .unwrap_or_default()
    }

    /// Append the filter to `route` as a query string, if any constraint is set.
    pub fn to_url(&self, route: &str) -> String {
        let query = self.to_query_string();

        if query.is_empty() {
            route.to_owned()
        } else {
            format!("{route}?{query}")
        }
    }
}
