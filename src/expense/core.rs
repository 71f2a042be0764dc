//! Defines the core data models and database queries for expenses.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::ExpenseId};

// ============================================================================
// MODELS
// ============================================================================

/// The maximum number of characters in a category name.
pub const MAX_CATEGORY_LENGTH: usize = 100;
/// The maximum number of characters in an expense description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// The reasons an expense can be rejected before it is saved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The amount was zero, negative or not a finite number.
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// The category was an empty string.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// The category had more than [MAX_CATEGORY_LENGTH] characters.
    #[error("category must be at most 100 characters, got {0}")]
    CategoryTooLong(usize),

    /// The description had more than [MAX_DESCRIPTION_LENGTH] characters.
    #[error("description must be at most 500 characters, got {0}")]
    DescriptionTooLong(usize),
}

impl ValidationError {
    /// The name of the expense field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonPositiveAmount(_) => "amount",
            ValidationError::EmptyCategory | ValidationError::CategoryTooLong(_) => "category",
            ValidationError::DescriptionTooLong(_) => "description",
        }
    }
}

/// A validated category name between 1 and [MAX_CATEGORY_LENGTH] characters.
///
/// Categories are matched exactly, so the name is kept as given and not trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return a:
    /// - [ValidationError::EmptyCategory] if `name` is an empty string,
    /// - or [ValidationError::CategoryTooLong] if `name` has more than [MAX_CATEGORY_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let length = name.chars().count();

        if length == 0 {
            Err(ValidationError::EmptyCategory)
        } else if length > MAX_CATEGORY_LENGTH {
            Err(ValidationError::CategoryTooLong(length))
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category name without validation.
    ///
    /// Used for names read back from the database, which were validated when they were saved.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record of money that was spent.
///
/// To create a new `Expense`, validate the fields with [NewExpense::new] and
/// save it with [create_expense].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID assigned by the database.
    pub id: ExpenseId,
    /// How much was spent, always greater than zero.
    pub amount: f64,
    /// What kind of expense this is, e.g. "Food".
    pub category: CategoryName,
    /// When the money was spent.
    pub date: Date,
    /// Free text about the expense, may be empty.
    pub description: String,
}

/// The fields of an expense that has passed validation but has not been saved yet.
///
/// The fields are private so that the only way to get a `NewExpense` is through
/// [NewExpense::new].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    amount: f64,
    category: CategoryName,
    date: Date,
    description: String,
}

impl NewExpense {
    /// Validate the fields for a new expense.
    ///
    /// # Errors
    ///
    /// Returns the first [ValidationError] found, checking the amount, then the
    /// category and then the description.
    pub fn new(
        amount: f64,
        category: &str,
        date: Date,
        description: &str,
    ) -> Result<Self, ValidationError> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(ValidationError::NonPositiveAmount(amount));
        }

        let category = CategoryName::new(category)?;

        let description_length = description.chars().count();
        if description_length > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooLong(description_length));
        }

        Ok(Self {
            amount,
            category,
            date,
            description: description.to_owned(),
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Save a validated expense and return it with the ID the database assigned.
///
/// The insert and the read back of the new row happen in a single statement.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "INSERT INTO expense (amount, category, date, description)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, amount, category, date, description",
        )?
        .query_row(
            (
                new_expense.amount,
                new_expense.category.as_ref(),
                new_expense.date,
                new_expense.description,
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a saved expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare("SELECT id, amount, category, date, description FROM expense WHERE id = :id")?
        .query_one(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                category TEXT NOT NULL CHECK (length(category) BETWEEN 1 AND 100),
                date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '' CHECK (length(description) <= 500)
                )",
        (),
    )?;

    // Used by the listing order and the date range filters.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_date_id ON expense(date, id);",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_category ON expense(category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an Expense.
///
/// The row must contain the columns `id, amount, category, date, description` in that order.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let category: String = row.get(2)?;
    let date = row.get(3)?;
    let description = row.get(4)?;

    Ok(Expense {
        id,
        amount,
        category: CategoryName::new_unchecked(&category),
        date,
        description,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod database_tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{NewExpense, count_expenses, create_expense, get_expense},
        test_utils::get_test_connection,
    };

    #[test]
    fn create_succeeds() {
        let conn = get_test_connection();
        let new_expense = NewExpense::new(12.3, "Food", date!(2025 - 10 - 05), "Lunch").unwrap();

        let expense = create_expense(new_expense, &conn).expect("could not create expense");

        assert!(expense.id > 0, "want id > 0, got {}", expense.id);
        assert_eq!(expense.amount, 12.3);
        assert_eq!(expense.category.as_ref(), "Food");
        assert_eq!(expense.date, date!(2025 - 10 - 05));
        assert_eq!(expense.description, "Lunch");
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let conn = get_test_connection();

        let first = create_expense(
            NewExpense::new(1.0, "Food", date!(2025 - 10 - 05), "").unwrap(),
            &conn,
        )
        .unwrap();
        let second = create_expense(
            NewExpense::new(2.0, "Food", date!(2025 - 10 - 05), "").unwrap(),
            &conn,
        )
        .unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn get_returns_created_expense() {
        let conn = get_test_connection();
        let want = create_expense(
            NewExpense::new(7.5, "Coffee", date!(2025 - 10 - 05), "Flat white").unwrap(),
            &conn,
        )
        .unwrap();

        let got = get_expense(want.id, &conn);

        assert_eq!(got, Ok(want));
    }

    #[test]
    fn get_missing_expense_is_not_found() {
        let conn = get_test_connection();

        let got = get_expense(42, &conn);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn get_count() {
        let conn = get_test_connection();
        let want_count = 20;
        for i in 1..=want_count {
            create_expense(
                NewExpense::new(i as f64, "Food", date!(2025 - 10 - 05), "").unwrap(),
                &conn,
            )
            .expect("Could not create expense");
        }

        let got_count = count_expenses(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }

    #[test]
    fn table_rejects_rows_that_bypass_validation() {
        let conn = get_test_connection();

        let result = conn.execute(
            "INSERT INTO expense (amount, category, date, description) VALUES (-1, 'Food', '2025-10-05', '')",
            (),
        );

        assert!(result.is_err());
        assert_eq!(count_expenses(&conn), Ok(0));
    }
}
