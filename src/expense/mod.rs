//! Expense tracking.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and `NewExpense` for validating new expenses
//! - `ExpenseFilter` and the queries for listing, summarizing and exporting expenses
//! - The HTML pages and the JSON and CSV route handlers

mod api;
mod core;
mod create_endpoint;
mod export;
mod filter;
mod list_page;
mod query;
mod summary;
mod summary_page;
mod view;

pub use api::{get_expenses_endpoint, get_summary_endpoint};
pub use core::{
    CategoryName, Expense, NewExpense, ValidationError, count_expenses, create_expense,
    create_expense_table, get_expense,
};
pub use create_endpoint::add_expense_endpoint;
pub use export::{export_expenses_csv, export_expenses_endpoint};
pub use filter::ExpenseFilter;
pub use list_page::get_expenses_page;
pub use query::{list_categories, list_expenses};
pub use summary::{CategorySummary, ExpenseSummary, summarize_expenses};
pub use summary_page::get_summary_page;
