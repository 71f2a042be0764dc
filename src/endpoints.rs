//! The API endpoints URIs.

/// The page listing expenses with the add form and filters.
pub const ROOT: &str = "/";
/// The page showing totals and the per-category breakdown.
pub const SUMMARY_VIEW: &str = "/summary";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for creating an expense from a JSON or form body.
pub const ADD_EXPENSE: &str = "/add_expense";
/// The route for listing expenses as JSON.
pub const EXPENSES_API: &str = "/expenses";
/// The route for the expense summary as JSON.
pub const SUMMARY_API: &str = "/api/summary";
/// The route for downloading every expense as a CSV file.
pub const EXPORT: &str = "/export";
