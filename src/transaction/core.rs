//! Defines the core data models and database queries for transactions.

use std::fmt::Display;

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionId, user::Username};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or took money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl TransactionType {
    /// The effect of `amount` on the balance: income adds, expenses subtract.
    ///
    /// Every balance in the app is computed with this rule.
    pub fn signed_amount(self, amount: f64) -> f64 {
        match self {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }

    /// The label used for display and storage.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Income" => Ok(TransactionType::Income),
            "Expense" => Ok(TransactionType::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type \"{other}\"").into(),
            )),
        }
    }
}

/// An expense or income recorded by a user.
///
/// The amount is never negative, the sign comes from `type_`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that recorded the transaction.
    pub username: Username,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for, may be empty.
    pub description: String,
    /// The category of the transaction, e.g. "food", may be empty.
    pub category: String,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(amount: f64, type_: TransactionType, date: Date) -> NewTransaction {
        NewTransaction {
            amount,
            description: String::new(),
            category: String::new(),
            type_,
            date,
        }
    }

    /// The effect this transaction has on the balance.
    pub fn signed_amount(&self) -> f64 {
        self.type_.signed_amount(self.amount)
    }
}

/// The fields of a transaction that has not been stored yet.
///
/// The ID is assigned by the database and the owner is supplied when the
/// transaction is created, see [create_transaction].
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The monetary amount of the transaction, must not be negative.
    pub amount: f64,
    /// A human-readable description of the transaction.
    pub description: String,
    /// The category the transaction is grouped under.
    ///
    /// Categories are free text and compared exactly, so "Food" and "food"
    /// are different categories.
    pub category: String,
    /// Whether the transaction is income or an expense.
    pub type_: TransactionType,
    /// The date when the transaction occurred.
    pub date: Date,
}

impl NewTransaction {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction owned by `username`.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative or not a finite number,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    username: &Username,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !new_transaction.amount.is_finite() || new_transaction.amount < 0.0 {
        return Err(Error::NegativeAmount(new_transaction.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO transactions (username, amount, description, category, type, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, username, amount, description, category, type, date",
        )?
        .query_row(
            (
                username,
                new_transaction.amount,
                new_transaction.description,
                new_transaction.category,
                new_transaction.type_,
                new_transaction.date,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get all of the transactions recorded by `username`, newest first.
///
/// Transactions on the same date are ordered by ID, most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn list_transactions_for_user(
    username: &Username,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, username, amount, description, category, type, date
             FROM transactions
             WHERE username = :username
             ORDER BY date DESC, id DESC",
        )?
        .query_map(&[(":username", username)], map_transaction_row)?
        .map(|row| row.map_err(Error::from))
        .collect()
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, username, amount, description, category, type, date
             FROM transactions WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// The number of rows changed by a query.
pub type RowsAffected = usize;

/// Delete the transaction `id` if it is owned by `username`.
///
/// Deleting a transaction that does not exist, or that belongs to another
/// user, changes nothing and returns zero.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    username: &Username,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM transactions WHERE id = ?1 AND username = ?2",
            (id, username),
        )
        .map_err(|err| err.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                amount REAL NOT NULL,
                description TEXT,
                category TEXT,
                type TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Every query filters by user and sorts by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_username_date ON transactions(username, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let username = row.get(1)?;
    let amount = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let category: Option<String> = row.get(4)?;
    let type_ = row.get(5)?;
    let date = row.get(6)?;

    Ok(Transaction {
        id,
        username,
        amount,
        description: description.unwrap_or_default(),
        category: category.unwrap_or_default(),
        type_,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================
