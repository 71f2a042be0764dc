//! Defines the route handler for the page that shows the total spending and the per-category breakdown.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_amount, link,
    },
    navigation::NavBar,
};

use super::{
    filter::ExpenseFilter,
    query::list_categories,
    summary::{ExpenseSummary, summarize_expenses},
    view::filter_form,
};

/// The state needed for the summary page.
#[derive(Debug, Clone)]
pub struct SummaryPageState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the summary of the expenses matching the query parameters.
pub async fn get_summary_page(
    State(state): State<SummaryPageState>,
    Query(filter): Query<ExpenseFilter>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let summary = summarize_expenses(&filter, &connection).inspect_err(|error| {
        tracing::error!("could not summarize expenses for {filter:?}: {error}")
    })?;
    let categories = list_categories(&connection)
        .inspect_err(|error| tracing::error!("could not list categories: {error}"))?;
    drop(connection);

    Ok(summary_view(&summary, &categories, &filter).into_response())
}

fn summary_view(summary: &ExpenseSummary, categories: &[String], filter: &ExpenseFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();
    let expenses_url = filter.to_url(endpoints::ROOT);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-8"
            {
                section class=(CARD_STYLE)
                {
                    div class="flex flex-wrap justify-between items-center mb-4 gap-4"
                    {
                        h2 class="text-xl font-bold" { "Summary" }
                        (link(&expenses_url, "View expenses"))
                    }

                    (filter_form(endpoints::SUMMARY_VIEW, filter, categories))
                }

                div class="grid gap-4 md:grid-cols-2"
                {
                    div class=(CARD_STYLE)
                    {
                        p class="text-sm text-gray-500 dark:text-gray-400" { "Total spent" }
                        p id="total-expenses" class="text-3xl font-bold"
                        {
                            (format_amount(summary.total_expenses))
                        }
                    }

                    div class=(CARD_STYLE)
                    {
                        p class="text-sm text-gray-500 dark:text-gray-400" { "Number of expenses" }
                        p id="total-count" class="text-3xl font-bold" { (summary.total_count) }
                    }
                }

                section class=(CARD_STYLE)
                {
                    h2 class="mb-4 text-xl font-bold" { "By Category" }

                    @if summary.category_breakdown.is_empty() {
                        p id="no-expenses" class="text-gray-500 dark:text-gray-400"
                        {
                            "No expenses to summarize."
                        }
                    } @else {
                        (breakdown_table(summary))
                    }
                }
            }
        }
    };

    base("Summary", &content)
}

fn breakdown_table(summary: &ExpenseSummary) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded"
        {
            table id="category-breakdown" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Total" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Count" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Share" }
                    }
                }

                tbody
                {
                    @for category in &summary.category_breakdown {
                        @let percentage = summary.percentage_of_total(category);

                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (category.category) }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                (format_amount(category.total))
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right" } { (category.count) }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                (format!("{percentage:.1}%"))
                            }
                        }
                    }
                }
            }
        }
    }
}
