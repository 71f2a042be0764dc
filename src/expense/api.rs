//! JSON route handlers for listing and summarizing expenses.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use rusqlite::Connection;

use crate::{AppState, Error};

use super::{filter::ExpenseFilter, query::list_expenses, summary::summarize_expenses};

/// The state needed by the expense API.
#[derive(Debug, Clone)]
pub struct ExpenseApiState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the expenses matching the query parameters as a JSON array.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseApiState>,
    Query(filter): Query<ExpenseFilter>,
) -> Response {
    let result = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| list_expenses(&filter, &connection));

    match result {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => {
            tracing::error!("could not list expenses for {filter:?}: {error}");
            error.into_json_response()
        }
    }
}

/// A route handler that returns the summary of the expenses matching the query parameters as JSON.
pub async fn get_summary_endpoint(
    State(state): State<ExpenseApiState>,
    Query(filter): Query<ExpenseFilter>,
) -> Response {
    let result = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
        .and_then(|connection| summarize_expenses(&filter, &connection));

    match result {
        Ok(summary) => Json(summary).into_response(),
        Err(error) => {
            tracing::error!("could not summarize expenses for {filter:?}: {error}");
            error.into_json_response()
        }
    }
}
