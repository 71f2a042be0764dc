//! Aggregate totals for the expenses that match a filter.

use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::Error;

use super::{filter::ExpenseFilter, query::FILTER_CLAUSE};

/// The total and number of matching expenses in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category name.
    pub category: String,
    /// The sum of the amounts in this category.
    pub total: f64,
    /// How many expenses are in this category.
    pub count: u32,
}

/// Totals over the expenses that match a filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    /// The sum of the amounts of all matching expenses, `0.0` if nothing matched.
    pub total_expenses: f64,
    /// The number of matching expenses.
    pub total_count: u32,
    /// One entry per category, largest total first.
    ///
    /// Categories with the same total are ordered by name.
    pub category_breakdown: Vec<CategorySummary>,
}

impl ExpenseSummary {
    /// Build a summary from a per-category breakdown.
    ///
    /// The grand totals are derived from the breakdown so the two always agree.
    pub fn from_breakdown(category_breakdown: Vec<CategorySummary>) -> Self {
        let (total_expenses, total_count) = category_breakdown
            .iter()
            .fold((0.0, 0), |(total, count), category| {
                (total + category.total, count + category.count)
            });

        Self {
            total_expenses,
            total_count,
            category_breakdown,
        }
    }

    /// The share of the grand total spent in `category`, as a percentage.
    ///
    /// Returns `0.0` when nothing was spent.
    pub fn percentage_of_total(&self, category: &CategorySummary) -> f64 {
        if self.total_expenses > 0.0 {
            category.total / self.total_expenses * 100.0
        } else {
            0.0
        }
    }
}

/// Summarize the expenses that match `filter`.
///
/// Uses the same filter semantics as [super::list_expenses].
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn summarize_expenses(
    filter: &ExpenseFilter,
    connection: &Connection,
) -> Result<ExpenseSummary, Error> {
    let query = format!(
        "SELECT category, SUM(amount) AS total, COUNT(id) FROM expense \
        {FILTER_CLAUSE} \
        GROUP BY category \
        ORDER BY total DESC, category ASC"
    );

    let category_breakdown = connection
        .prepare(&query)?
        .query_map(
            named_params! {
                ":category": filter.category(),
                ":start_date": filter.start_date,
                ":end_date": filter.end_date,
            },
            |row| {
                Ok(CategorySummary {
                    category: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            },
        )?
        .map(|summary_result| summary_result.map_err(Error::SqlError))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExpenseSummary::from_breakdown(category_breakdown))
}
