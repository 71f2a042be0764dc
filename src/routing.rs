//! Application router configuration.

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    error_page::get_404_not_found,
    expense::{
        add_expense_endpoint, export_expenses_endpoint, get_expenses_endpoint, get_expenses_page,
        get_summary_endpoint, get_summary_page,
    },
};

/// Return a router with all the app's routes.
///
/// Files under `static_dir` are served from [endpoints::STATIC].
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_expenses_page))
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(endpoints::ADD_EXPENSE, post(add_expense_endpoint))
        .route(endpoints::EXPENSES_API, get(get_expenses_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        .route(endpoints::EXPORT, get(export_expenses_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}
