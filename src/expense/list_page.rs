//! Defines the route handler for the home page, which lists expenses and has a form for adding new ones.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_amount, link, truncate_graphemes,
    },
    navigation::NavBar,
};

use super::{
    core::{Expense, MAX_CATEGORY_LENGTH, MAX_DESCRIPTION_LENGTH},
    filter::ExpenseFilter,
    query::{list_categories, list_expenses},
    view::filter_form,
};

/// Descriptions longer than this are shortened in the table.
const DESCRIPTION_PREVIEW_LENGTH: usize = 60;

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpensesPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpensesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the expenses matching the query parameters along with the add expense form.
pub async fn get_expenses_page(
    State(state): State<ExpensesPageState>,
    Query(filter): Query<ExpenseFilter>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = list_expenses(&filter, &connection)
        .inspect_err(|error| tracing::error!("could not list expenses for {filter:?}: {error}"))?;
    let categories = list_categories(&connection)
        .inspect_err(|error| tracing::error!("could not list categories: {error}"))?;
    drop(connection);

    let today = OffsetDateTime::now_utc().date();

    Ok(expenses_view(&expenses, &categories, &filter, today).into_response())
}

fn expenses_view(
    expenses: &[Expense],
    categories: &[String],
    filter: &ExpenseFilter,
    today: Date,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();
    let summary_url = filter.to_url(endpoints::SUMMARY_VIEW);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-8"
            {
                section class=(CARD_STYLE)
                {
                    h2 class="mb-4 text-xl font-bold" { "Add Expense" }
                    (add_expense_form(categories, today))
                }

                section class=(CARD_STYLE)
                {
                    div class="flex flex-wrap justify-between items-center mb-4 gap-4"
                    {
                        h2 class="text-xl font-bold" { "Expenses" }

                        div class="flex gap-4"
                        {
                            (link(&summary_url, "View summary"))
                            (link(endpoints::EXPORT, "Export CSV"))
                        }
                    }

                    (filter_form(endpoints::ROOT, filter, categories))

                    @if expenses.is_empty() {
                        p id="no-expenses" class="mt-6 text-gray-500 dark:text-gray-400"
                        {
                            @if filter.is_active() {
                                "No expenses match these filters."
                            } @else {
                                "No expenses yet. Add one above to get started."
                            }
                        }
                    } @else {
                        (expenses_table(expenses))
                    }
                }
            }
        }
    };

    base("Expenses", &content)
}

fn add_expense_form(categories: &[String], today: Date) -> Markup {
    html! {
        form
            id="add-expense-form"
            method="post"
            action=(endpoints::ADD_EXPENSE)
            class="grid gap-4 md:grid-cols-2"
        {
            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    list="category-options"
                    maxlength=(MAX_CATEGORY_LENGTH)
                    placeholder="e.g. Food"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                datalist id="category-options"
                {
                    @for category in categories {
                        option value=(category) {}
                    }
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    maxlength=(MAX_DESCRIPTION_LENGTH)
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="md:col-span-2"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            }
        }
    }
}

fn expenses_table(expenses: &[Expense]) -> Markup {
    html! {
        div class="mt-6 relative overflow-x-auto shadow-md rounded"
        {
            table id="expenses" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (expense.date) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
                            }
                            td class=(TABLE_CELL_STYLE) title=(expense.description)
                            {
                                (truncate_graphemes(&expense.description, DESCRIPTION_PREVIEW_LENGTH))
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                (format_amount(expense.amount))
                            }
                        }
                    }
                }
            }
        }
    }
}
