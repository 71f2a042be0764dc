use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{NewExpense, count_expenses, create_expense, initialize_db};

/// A utility for creating a test database for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Amount, category, days before today and description of the sample expenses.
const SAMPLE_EXPENSES: [(f64, &str, i64, &str); 10] = [
    (50.0, "Food", 0, "Lunch at restaurant"),
    (4.5, "Coffee", 0, "Flat white"),
    (100.0, "Transport", 1, "Taxi to the airport"),
    (30.0, "Food", 2, "Groceries"),
    (1250.0, "Rent", 5, "Rent, October"),
    (12.99, "Entertainment", 6, "Streaming subscription"),
    (4.5, "Coffee", 7, ""),
    (62.3, "Utilities", 12, "Power bill"),
    (18.0, "Transport", 20, "Bus card top up"),
    (89.95, "Food", 33, "Dinner with \"friends\""),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    let today = OffsetDateTime::now_utc().date();

    for (amount, category, days_ago, description) in SAMPLE_EXPENSES {
        let date = today - Duration::days(days_ago);
        create_expense(NewExpense::new(amount, category, date, description)?, &conn)?;
    }

    println!("Created {} expenses.", count_expenses(&conn)?);
    println!("Success!");

    Ok(())
}
