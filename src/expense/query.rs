//! Database queries for listing expenses and their categories.

use rusqlite::{Connection, named_params};

use crate::Error;

use super::{
    core::{Expense, map_expense_row},
    filter::ExpenseFilter,
};

/// The `WHERE` clause shared by every filtered expense query.
///
/// Each condition is skipped when its parameter is `NULL`. Dates are stored as
/// `YYYY-MM-DD` text, so string comparison orders them by date.
pub(super) const FILTER_CLAUSE: &str = "WHERE (:category IS NULL OR category = :category) \
    AND (:start_date IS NULL OR date >= :start_date) \
    AND (:end_date IS NULL OR date <= :end_date)";

/// Get the expenses that match `filter`, newest first.
///
/// Expenses on the same date are ordered by ID, most recently added first.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be mapped to an [Expense].
pub fn list_expenses(filter: &ExpenseFilter, connection: &Connection) -> Result<Vec<Expense>, Error> {
    let query = format!(
        "SELECT id, amount, category, date, description FROM expense \
        {FILTER_CLAUSE} \
        ORDER BY date DESC, id DESC"
    );

    connection
        .prepare(&query)?
        .query_map(
            named_params! {
                ":category": filter.category(),
                ":start_date": filter.start_date,
                ":end_date": filter.end_date,
            },
            map_expense_row,
        )?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Get every category that has at least one expense, in lexicographic order without duplicates.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn list_categories(connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare("SELECT DISTINCT category FROM expense ORDER BY category ASC")?
        .query_map([], |row| row.get(0))?
        .map(|category_result| category_result.map_err(Error::SqlError))
        .collect()
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        expense::{Expense, ExpenseFilter, NewExpense, create_expense},
        test_utils::get_test_connection,
    };

    use super::{list_categories, list_expenses};

    fn insert(amount: f64, category: &str, date: Date, conn: &Connection) -> Expense {
        create_expense(
            NewExpense::new(amount, category, date, "").expect("invalid test expense"),
            conn,
        )
        .expect("could not create expense")
    }

    /// Inserts [Food/50, Transport/100, Food/30] dated the 20th, 19th and 18th of October 2025.
    fn insert_sample_expenses(conn: &Connection) -> Vec<Expense> {
        vec![
            insert(50.0, "Food", date!(2025 - 10 - 20), conn),
            insert(100.0, "Transport", date!(2025 - 10 - 19), conn),
            insert(30.0, "Food", date!(2025 - 10 - 18), conn),
        ]
    }

    #[test]
    fn empty_database_lists_nothing() {
        let conn = get_test_connection();

        let got = list_expenses(&ExpenseFilter::default(), &conn).unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn created_expense_is_listed_once() {
        let conn = get_test_connection();
        let created = create_expense(
            NewExpense::new(50.0, "Food", date!(2025 - 10 - 20), "Lunch at restaurant").unwrap(),
            &conn,
        )
        .unwrap();

        let got = list_expenses(&ExpenseFilter::default(), &conn).unwrap();

        let matching: Vec<_> = got
            .iter()
            .filter(|expense| {
                expense.amount == 50.0
                    && expense.category.as_ref() == "Food"
                    && expense.date == date!(2025 - 10 - 20)
                    && expense.description == "Lunch at restaurant"
            })
            .collect();
        assert_eq!(matching, vec![&created]);
        assert!(created.id > 0);
    }

    #[test]
    fn lists_newest_first() {
        let conn = get_test_connection();
        let inserted = insert_sample_expenses(&conn);

        let got = list_expenses(&ExpenseFilter::default(), &conn).unwrap();

        let got_dates: Vec<_> = got.iter().map(|expense| expense.date).collect();
        assert_eq!(
            got_dates,
            vec![
                date!(2025 - 10 - 20),
                date!(2025 - 10 - 19),
                date!(2025 - 10 - 18)
            ]
        );
        assert_eq!(got, inserted);
    }

    #[test]
    fn same_date_is_ordered_by_id_descending() {
        let conn = get_test_connection();
        let day = date!(2025 - 10 - 05);
        let first = insert(1.0, "Food", day, &conn);
        let second = insert(2.0, "Food", day, &conn);
        let older = insert(3.0, "Food", date!(2025 - 10 - 04), &conn);
        let third = insert(4.0, "Food", day, &conn);

        let got = list_expenses(&ExpenseFilter::default(), &conn).unwrap();

        assert_eq!(got, vec![third, second, first, older]);
    }

    #[test]
    fn filters_by_exact_category() {
        let conn = get_test_connection();
        insert_sample_expenses(&conn);
        insert(12.0, "food", date!(2025 - 10 - 17), &conn);

        let filter = ExpenseFilter {
            category: Some("Food".to_owned()),
            ..Default::default()
        };
        let got = list_expenses(&filter, &conn).unwrap();

        let got_amounts: Vec<_> = got.iter().map(|expense| expense.amount).collect();
        assert_eq!(got_amounts, vec![50.0, 30.0]);
        assert!(got.iter().all(|expense| expense.category.as_ref() == "Food"));
    }

    #[test]
    fn empty_category_does_not_filter() {
        let conn = get_test_connection();
        insert_sample_expenses(&conn);

        let filter = ExpenseFilter {
            category: Some(String::new()),
            ..Default::default()
        };
        let got = list_expenses(&filter, &conn).unwrap();

        assert_eq!(got.len(), 3);
    }

    #[test]
    fn date_range_is_inclusive() {
        let conn = get_test_connection();
        insert(50.0, "Food", date!(2025 - 10 - 20), &conn);
        insert(100.0, "Transport", date!(2025 - 10 - 19), &conn);
        insert(30.0, "Food", date!(2025 - 10 - 15), &conn);

        let filter = ExpenseFilter {
            start_date: Some(date!(2025 - 10 - 19)),
            end_date: Some(date!(2025 - 10 - 20)),
            ..Default::default()
        };
        let got = list_expenses(&filter, &conn).unwrap();

        let got_dates: Vec<_> = got.iter().map(|expense| expense.date).collect();
        assert_eq!(got_dates, vec![date!(2025 - 10 - 20), date!(2025 - 10 - 19)]);
    }

    #[test]
    fn open_ended_date_ranges() {
        let conn = get_test_connection();
        insert_sample_expenses(&conn);

        let from_19th = ExpenseFilter {
            start_date: Some(date!(2025 - 10 - 19)),
            ..Default::default()
        };
        let until_19th = ExpenseFilter {
            end_date: Some(date!(2025 - 10 - 19)),
            ..Default::default()
        };

        assert_eq!(list_expenses(&from_19th, &conn).unwrap().len(), 2);
        assert_eq!(list_expenses(&until_19th, &conn).unwrap().len(), 2);
    }

    #[test]
    fn inverted_date_range_matches_nothing() {
        let conn = get_test_connection();
        insert_sample_expenses(&conn);

        let filter = ExpenseFilter {
            start_date: Some(date!(2025 - 10 - 20)),
            end_date: Some(date!(2025 - 10 - 18)),
            ..Default::default()
        };

        assert!(list_expenses(&filter, &conn).unwrap().is_empty());
    }

    #[test]
    fn combines_category_and_date_range() {
        let conn = get_test_connection();
        insert_sample_expenses(&conn);

        let filter = ExpenseFilter {
            category: Some("Food".to_owned()),
            start_date: Some(date!(2025 - 10 - 19)),
            end_date: None,
        };
        let got = list_expenses(&filter, &conn).unwrap();

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].amount, 50.0);
    }

    #[test]
    fn categories_are_sorted_and_distinct() {
        let conn = get_test_connection();
        insert_sample_expenses(&conn);
        insert(5.0, "Coffee", date!(2025 - 10 - 01), &conn);

        let got = list_categories(&conn).unwrap();

        assert_eq!(got, vec!["Coffee", "Food", "Transport"]);
    }

    #[test]
    fn no_categories_without_expenses() {
        let conn = get_test_connection();

        assert!(list_categories(&conn).unwrap().is_empty());
    }
}
