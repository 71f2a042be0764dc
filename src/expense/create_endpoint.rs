//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Redirect, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{AppState, Error, endpoints};

use super::core::{Expense, NewExpense, create_expense};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct AddExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AddExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The fields submitted to create an expense, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// How much was spent.
    pub amount: f64,
    /// What kind of expense it was, e.g. "Food".
    pub category: String,
    /// When the money was spent, formatted as `YYYY-MM-DD`.
    pub date: Date,
    /// Optional text about the expense.
    #[serde(default)]
    pub description: String,
}

/// An [ExpenseForm] sent either as JSON by API clients or as a urlencoded form by the HTML page.
///
/// The variant decides the shape of the response.
#[derive(Debug)]
pub enum ExpensePayload {
    Json(ExpenseForm),
    Form(ExpenseForm),
}

impl<S> FromRequest<S> for ExpensePayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|content_type| content_type.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        if is_json {
            let Json(form) = Json::<ExpenseForm>::from_request(request, state)
                .await
                .map_err(IntoResponse::into_response)?;

            Ok(Self::Json(form))
        } else {
            let Form(form) = Form::<ExpenseForm>::from_request(request, state)
                .await
                .map_err(IntoResponse::into_response)?;

            Ok(Self::Form(form))
        }
    }
}

/// The JSON body returned after an expense is created.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddExpenseResponse {
    pub success: bool,
    pub message: String,
    pub expense: Expense,
}

/// A route handler for creating a new expense.
///
/// JSON requests get the created expense back as JSON, form submissions are
/// redirected to the expenses page.
pub async fn add_expense_endpoint(
    State(state): State<AddExpenseState>,
    payload: ExpensePayload,
) -> Response {
    match payload {
        ExpensePayload::Json(form) => match add_expense(form, &state.db_connection) {
            Ok(expense) => Json(AddExpenseResponse {
                success: true,
                message: "Expense added successfully".to_owned(),
                expense,
            })
            .into_response(),
            Err(error) => error.into_json_response(),
        },
        ExpensePayload::Form(form) => match add_expense(form, &state.db_connection) {
            Ok(_) => Redirect::to(endpoints::ROOT).into_response(),
            Err(error) => error.into_alert_response(),
        },
    }
}

fn add_expense(form: ExpenseForm, db_connection: &Mutex<Connection>) -> Result<Expense, Error> {
    let new_expense = NewExpense::new(form.amount, &form.category, form.date, &form.description)
        .inspect_err(|error| tracing::debug!("rejected expense {form:?}: {error}"))?;

    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = create_expense(new_expense, &connection)
        .inspect_err(|error| tracing::error!("could not create expense: {error}"))?;
    tracing::debug!("created expense {}", expense.id);

    Ok(expense)
}
