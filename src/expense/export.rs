//! Exporting every expense as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use csv::{Terminator, WriterBuilder};
use rusqlite::Connection;
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{AppState, Error, html::format_amount};

use super::{filter::ExpenseFilter, query::list_expenses};

/// The header row of the exported CSV file.
pub const CSV_HEADER: [&str; 5] = ["ID", "Date", "Category", "Amount", "Description"];

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Write every expense as CSV, in the same order as an unfiltered listing.
///
/// Dates are written as `YYYY-MM-DD` and amounts with two decimal places.
/// Fields containing commas, quotes or line breaks are quoted.
///
/// # Errors
/// Returns a:
/// - [Error::SqlError] if the expenses cannot be read,
/// - or [Error::CsvError] if a record cannot be written.
pub fn export_expenses_csv(connection: &Connection) -> Result<Vec<u8>, Error> {
    let expenses = list_expenses(&ExpenseFilter::default(), connection)?;

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(vec![]);

    writer
        .write_record(CSV_HEADER)
        .map_err(|error| Error::CsvError(error.to_string()))?;

    for expense in expenses {
        let date = expense
            .date
            .format(DATE_FORMAT)
            .map_err(|error| Error::CsvError(error.to_string()))?;

        let id = expense.id.to_string();
        let amount = format_amount(expense.amount);

        writer
            .write_record([
                id.as_str(),
                date.as_str(),
                expense.category.as_ref(),
                amount.as_str(),
                expense.description.as_str(),
            ])
            .map_err(|error| Error::CsvError(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))
}

/// The state needed to export expenses.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that downloads every expense as `expenses.csv`.
pub async fn export_expenses_endpoint(State(state): State<ExportState>) -> Result<Response, Error> {
    let csv = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        export_expenses_csv(&connection)
            .inspect_err(|error| tracing::error!("could not export expenses: {error}"))?
    };

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=expenses.csv"),
        ],
        csv,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        expense::{NewExpense, create_expense},
        test_utils::{assert_content_type, get_header, get_test_connection},
    };

    use super::{ExportState, export_expenses_csv, export_expenses_endpoint};

    #[test]
    fn empty_export_has_only_header() {
        let conn = get_test_connection();

        let csv = export_expenses_csv(&conn).unwrap();

        assert_eq!(String::from_utf8(csv).unwrap(), "ID,Date,Category,Amount,Description\r\n");
    }

    #[test]
    fn exports_rows_newest_first() {
        let conn = get_test_connection();
        create_expense(
            NewExpense::new(100.0, "Transport", date!(2025 - 10 - 19), "Taxi").unwrap(),
            &conn,
        )
        .unwrap();
        create_expense(
            NewExpense::new(50.0, "Food", date!(2025 - 10 - 20), "Lunch").unwrap(),
            &conn,
        )
        .unwrap();

        let csv = String::from_utf8(export_expenses_csv(&conn).unwrap()).unwrap();

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ID,Date,Category,Amount,Description",
                "2,2025-10-20,Food,50.00,Lunch",
                "1,2025-10-19,Transport,100.00,Taxi",
            ]
        );
    }

    #[test]
    fn quotes_descriptions_with_commas_and_quotes() {
        let conn = get_test_connection();
        create_expense(
            NewExpense::new(
                12.5,
                "Food",
                date!(2025 - 10 - 20),
                "Fish, chips and a \"large\" drink",
            )
            .unwrap(),
            &conn,
        )
        .unwrap();

        let csv = String::from_utf8(export_expenses_csv(&conn).unwrap()).unwrap();

        assert!(
            csv.contains("1,2025-10-20,Food,12.50,\"Fish, chips and a \"\"large\"\" drink\"\r\n"),
            "got {csv:?}"
        );
    }

    #[test]
    fn export_can_be_read_back() {
        let conn = get_test_connection();
        create_expense(
            NewExpense::new(9.99, "Books", date!(2025 - 01 - 02), "Line one\nline two").unwrap(),
            &conn,
        )
        .unwrap();

        let csv = export_expenses_csv(&conn).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), super::CSV_HEADER);
        let records: Vec<_> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][1], "2025-01-02");
        assert_eq!(&records[0][3], "9.99");
        assert_eq!(&records[0][4], "Line one\nline two");
    }

    #[tokio::test]
    async fn endpoint_returns_csv_attachment() {
        let conn = get_test_connection();
        create_expense(
            NewExpense::new(50.0, "Food", date!(2025 - 10 - 20), "Lunch").unwrap(),
            &conn,
        )
        .unwrap();
        let state = ExportState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = export_expenses_endpoint(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_content_type(&response, "text/csv; charset=utf-8");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=expenses.csv"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&body);
        assert!(text.starts_with("ID,Date,Category,Amount,Description"));
        assert!(text.contains("2025-10-20,Food,50.00,Lunch"));
    }
}
